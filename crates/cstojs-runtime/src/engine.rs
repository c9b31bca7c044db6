//! Passthrough translation engine
//!
//! Performs no syntax translation. It applies the text-level options only,
//! which is enough to exercise the whole pipeline end to end.

use cstojs_core::{EngineError, OptionSet, TranslationEngine, TranslationUnit};
use regex::Regex;

/// Engine that copies the source, applying name substitutions, whitespace
/// normalization and the prepend/append text
#[derive(Debug, Clone)]
pub struct PassthroughEngine {
    extension: String,
}

impl PassthroughEngine {
    /// Create an engine writing files with `extension`
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }
}

impl Default for PassthroughEngine {
    fn default() -> Self {
        Self::new("js")
    }
}

impl TranslationEngine for PassthroughEngine {
    fn target_extension(&self) -> &str {
        &self.extension
    }

    fn translate_one(&self, unit: &TranslationUnit<'_>) -> Result<String, EngineError> {
        let options = unit.options;
        let mut body = rename(unit.source_text, &options.custom_name_map)?;

        if options.normalize_whitespace {
            body = normalize_whitespace(&body);
        }

        if options.debug {
            tracing::debug!(
                source = %unit.id.display(),
                renames = options.custom_name_map.len(),
                bytes = body.len(),
                "passthrough translation"
            );
        }

        Ok(wrap(&body, options))
    }
}

/// Replace whole-identifier occurrences, one mapping at a time in order.
fn rename(source: &str, mappings: &[(String, String)]) -> Result<String, EngineError> {
    let mut text = source.to_string();
    for (from, to) in mappings {
        let pattern = format!(r"\b{}\b", regex::escape(from));
        let re = Regex::new(&pattern)
            .map_err(|e| EngineError::new(format!("invalid name '{}': {}", from, e)))?;
        text = re.replace_all(&text, regex::NoExpand(to.as_str())).into_owned();
    }
    Ok(text)
}

/// Strip trailing whitespace and collapse runs of blank lines.
fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0;

    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn wrap(body: &str, options: &OptionSet) -> String {
    let mut out =
        String::with_capacity(options.prepend_text.len() + body.len() + options.append_text.len());
    out.push_str(&options.prepend_text);
    out.push_str(body);
    out.push_str(&options.append_text);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn translate(source: &str, options: &OptionSet) -> String {
        let unit = TranslationUnit {
            id: Path::new("Program.cs"),
            source_text: source,
            options,
        };
        PassthroughEngine::default().translate_one(&unit).unwrap()
    }

    #[test]
    fn test_default_options_copy_source() {
        let out = translate("Console.WriteLine(1);", &OptionSet::default());
        assert_eq!(out, "Console.WriteLine(1);");
    }

    #[test]
    fn test_renames_whole_identifiers_only() {
        let options = OptionSet {
            custom_name_map: vec![
                ("Console".to_string(), "console".to_string()),
                ("WriteLine".to_string(), "log".to_string()),
            ],
            ..OptionSet::default()
        };
        let out = translate("Console.WriteLine(MyConsole);", &options);
        assert_eq!(out, "console.log(MyConsole);");
    }

    #[test]
    fn test_rename_target_is_literal() {
        let options = OptionSet {
            custom_name_map: vec![("A".to_string(), "$1".to_string())],
            ..OptionSet::default()
        };
        assert_eq!(translate("A + B", &options), "$1 + B");
    }

    #[test]
    fn test_wraps_with_prepend_and_append() {
        let options = OptionSet {
            prepend_text: "// top\n".to_string(),
            append_text: "// bottom\n".to_string(),
            ..OptionSet::default()
        };
        assert_eq!(translate("x\n", &options), "// top\nx\n// bottom\n");
    }

    #[test]
    fn test_normalize_whitespace() {
        let options = OptionSet {
            normalize_whitespace: true,
            ..OptionSet::default()
        };
        assert_eq!(translate("a  \n\n\n\nb\t\n", &options), "a\n\nb\n");
    }

    #[test]
    fn test_extension() {
        assert_eq!(PassthroughEngine::default().target_extension(), "js");
        assert_eq!(PassthroughEngine::new("mjs").target_extension(), "mjs");
    }
}
