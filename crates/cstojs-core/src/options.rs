//! Conversion options and their resolution
//!
//! An [`OptionSet`] starts from fixed defaults. `<Option>` elements in the
//! descriptor carry attribute assignments that are folded into a copy of the
//! current scope's set:
//!
//! ```xml
//! <Option Debug="true" CustomCSNamesToJS="Console-console,WriteLine-log" />
//! ```
//!
//! Resolution never mutates in place; [`OptionSet::resolve`] returns a new
//! value, so a file's options can not change after its scope was resolved.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Resolved conversion flags for one scope (global or a single file)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSet {
    /// Emit verbose diagnostics alongside output
    pub debug: bool,

    /// Translate even when the source does not compile
    pub disable_compilation_errors: bool,

    /// Emit `var` instead of `let`
    pub use_var_over_let: bool,

    /// Keep opening braces on the statement line
    pub keep_brace_on_same_line: bool,

    /// Normalize whitespace in the emitted text
    pub normalize_whitespace: bool,

    /// Emit `===`/`!==` for equality
    pub use_strict_equality: bool,

    /// When false the file is skipped entirely
    pub translate_file: bool,

    /// Emit object properties as enumerable
    pub make_properties_enumerable: bool,

    /// Identifier renames in insertion order; duplicates are kept
    pub custom_name_map: Vec<(String, String)>,

    /// Text placed before the engine output
    pub prepend_text: String,

    /// Text placed after the engine output
    pub append_text: String,
}

impl Default for OptionSet {
    fn default() -> Self {
        Self {
            debug: false,
            disable_compilation_errors: false,
            use_var_over_let: false,
            keep_brace_on_same_line: false,
            normalize_whitespace: false,
            use_strict_equality: true,
            translate_file: true,
            make_properties_enumerable: false,
            custom_name_map: Vec::new(),
            prepend_text: String::new(),
            append_text: String::new(),
        }
    }
}

impl OptionSet {
    /// Produce a new set with the given `(attribute, value)` assignments
    /// applied on top of `self`.
    ///
    /// Assignments are applied in order. The first unknown attribute or
    /// malformed value aborts resolution; `self` is left untouched either way.
    pub fn resolve<'a, I>(&self, overrides: I) -> Result<OptionSet>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut resolved = self.clone();
        for (name, value) in overrides {
            let setter = setter_for(name).ok_or_else(|| Error::UnknownOption {
                name: name.to_string(),
                value: value.to_string(),
                expected: Self::attribute_names().collect::<Vec<_>>().join(", "),
            })?;
            setter(&mut resolved, name, value)?;
            tracing::debug!(option = name, value, "applied option");
        }
        Ok(resolved)
    }

    /// Attribute names accepted on `<Option>`, in table order
    pub fn attribute_names() -> impl Iterator<Item = &'static str> {
        ATTRIBUTES.iter().map(|(name, _)| *name)
    }
}

type Setter = fn(&mut OptionSet, &str, &str) -> Result<()>;

macro_rules! flag {
    ($attr:literal => $field:ident) => {
        ($attr, {
            fn set(options: &mut OptionSet, name: &str, value: &str) -> Result<()> {
                options.$field = parse_bool(name, value)?;
                Ok(())
            }
            set as Setter
        })
    };
}

static ATTRIBUTES: &[(&str, Setter)] = &[
    flag!("Debug" => debug),
    flag!("DisableCompilationErrors" => disable_compilation_errors),
    flag!("UseVarOverLet" => use_var_over_let),
    flag!("KeepBraceOnTheSameLine" => keep_brace_on_same_line),
    flag!("NormalizeWhitespace" => normalize_whitespace),
    flag!("UseStrictEquality" => use_strict_equality),
    flag!("TranslateFile" => translate_file),
    flag!("MakePropertiesEnumerable" => make_properties_enumerable),
    ("CustomCSNamesToJS", set_name_map),
    ("AddSBAtTheTop", set_prepend),
    ("AddSBAtTheBottom", set_append),
];

fn setter_for(name: &str) -> Option<Setter> {
    ATTRIBUTES
        .iter()
        .find(|(attr, _)| *attr == name)
        .map(|(_, setter)| *setter)
}

fn set_name_map(options: &mut OptionSet, _name: &str, value: &str) -> Result<()> {
    options.custom_name_map = parse_name_map(value)?;
    Ok(())
}

fn set_prepend(options: &mut OptionSet, _name: &str, value: &str) -> Result<()> {
    options.prepend_text = value.to_string();
    Ok(())
}

fn set_append(options: &mut OptionSet, _name: &str, value: &str) -> Result<()> {
    options.append_text = value.to_string();
    Ok(())
}

/// Parse a boolean attribute value.
///
/// Accepts `true`/`false` in any letter case, ignoring surrounding whitespace.
pub fn parse_bool(attribute: &str, value: &str) -> Result<bool> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(Error::MalformedBoolean {
            attribute: attribute.to_string(),
            value: value.to_string(),
        })
    }
}

/// Parse the `source-target,source-target` name mapping grammar.
///
/// An empty (or all-whitespace) value yields an empty mapping. Every pair must
/// split on `-` into exactly two non-empty names.
pub fn parse_name_map(value: &str) -> Result<Vec<(String, String)>> {
    if value.trim().is_empty() {
        return Ok(Vec::new());
    }

    value
        .split(',')
        .map(|pair| {
            let mut names = pair.split('-').map(str::trim);
            match (names.next(), names.next(), names.next()) {
                (Some(source), Some(target), None) if !source.is_empty() && !target.is_empty() => {
                    Ok((source.to_string(), target.to_string()))
                }
                _ => Err(Error::MalformedMapping {
                    value: value.to_string(),
                    pair: pair.to_string(),
                }),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let options = OptionSet::default();
        assert!(options.translate_file);
        assert!(!options.debug);
        assert!(options.custom_name_map.is_empty());
        assert!(options.prepend_text.is_empty());
    }

    #[test]
    fn test_every_attribute_has_a_setter() {
        let names: Vec<_> = OptionSet::attribute_names().collect();
        assert_eq!(names.len(), 11);
        for name in names {
            assert!(setter_for(name).is_some(), "{name}");
        }
        assert!(setter_for("debug").is_none());
    }

    #[test]
    fn test_resolve_returns_new_value() {
        let base = OptionSet::default();
        let resolved = base
            .resolve([("Debug", "true"), ("UseVarOverLet", "true")])
            .unwrap();

        assert!(resolved.debug);
        assert!(resolved.use_var_over_let);
        assert!(!base.debug, "base must not change");
    }

    #[test]
    fn test_resolve_later_assignment_wins() {
        let resolved = OptionSet::default()
            .resolve([("Debug", "true"), ("Debug", "false")])
            .unwrap();
        assert!(!resolved.debug);
    }

    #[test]
    fn test_resolve_text_options() {
        let resolved = OptionSet::default()
            .resolve([
                ("AddSBAtTheTop", "// header"),
                ("AddSBAtTheBottom", "// footer"),
                ("CustomCSNamesToJS", "Console-console"),
            ])
            .unwrap();

        assert_eq!(resolved.prepend_text, "// header");
        assert_eq!(resolved.append_text, "// footer");
        assert_eq!(
            resolved.custom_name_map,
            vec![("Console".to_string(), "console".to_string())]
        );
    }

    #[test]
    fn test_resolve_unknown_option() {
        let err = OptionSet::default()
            .resolve([("Minify", "true")])
            .unwrap_err();
        match err {
            Error::UnknownOption {
                name,
                value,
                expected,
            } => {
                assert_eq!(name, "Minify");
                assert_eq!(value, "true");
                assert!(expected.starts_with("Debug, DisableCompilationErrors"));
                assert!(expected.contains("TranslateFile"));
            }
            other => panic!("Expected UnknownOption, got {other:?}"),
        }
    }

    #[rstest]
    #[case("true", true)]
    #[case("false", false)]
    #[case("True", true)]
    #[case(" FALSE ", false)]
    fn test_parse_bool_accepts(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(parse_bool("Debug", input).unwrap(), expected);
    }

    #[rstest]
    #[case("yes")]
    #[case("1")]
    #[case("")]
    fn test_parse_bool_rejects(#[case] input: &str) {
        let err = parse_bool("Debug", input).unwrap_err();
        assert!(matches!(err, Error::MalformedBoolean { ref attribute, .. } if attribute == "Debug"));
    }

    #[test]
    fn test_name_map_multiple_pairs() {
        let map = parse_name_map("Console-console,WriteLine-log").unwrap();
        assert_eq!(
            map,
            vec![
                ("Console".to_string(), "console".to_string()),
                ("WriteLine".to_string(), "log".to_string()),
            ]
        );
    }

    #[test]
    fn test_name_map_single_pair() {
        let map = parse_name_map("A-b").unwrap();
        assert_eq!(map, vec![("A".to_string(), "b".to_string())]);
    }

    #[test]
    fn test_name_map_keeps_duplicates_in_order() {
        let map = parse_name_map("A-b,A-c").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map[1].1, "c");
    }

    #[test]
    fn test_name_map_empty_value() {
        assert!(parse_name_map("").unwrap().is_empty());
    }

    #[rstest]
    #[case("A")]
    #[case("A-")]
    #[case("-b")]
    #[case("A-b-c")]
    #[case("A-b,")]
    #[case("A-b,,C-d")]
    fn test_name_map_malformed(#[case] input: &str) {
        let err = parse_name_map(input).unwrap_err();
        assert!(matches!(err, Error::MalformedMapping { .. }), "{input}");
    }
}
