//! Descriptor parsing
//!
//! A descriptor lists the output folder and the source files to translate:
//!
//! ```xml
//! <ProjectOptions>
//!   <Option Debug="true" />
//!   <Output Folder="./out" />
//!   <File Source="./Program.cs" />
//!   <File Source="./Utils.cs">
//!     <Option Debug="false" UseVarOverLet="true" />
//!   </File>
//! </ProjectOptions>
//! ```
//!
//! The document is read in a single forward pass. `<Option>` outside a
//! `<File>` changes the global defaults from that point on; inside a `<File>`
//! it only changes that file. Each file starts from a snapshot of the global
//! defaults taken when its element opens.

use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};
use crate::job::{FileJob, ProjectConfig};
use crate::options::OptionSet;

/// Conventional descriptor file name
pub const DEFAULT_DESCRIPTOR: &str = "cstojs_options.xml";

/// Text of a starter descriptor declaring `output_folder` and a single
/// `./Program.cs` source.
pub fn starter_descriptor(output_folder: &str) -> String {
    format!(
        "<ProjectOptions>\n  <Output Folder=\"{}\" />\n  <File Source=\"./Program.cs\" />\n</ProjectOptions>\n",
        quick_xml::escape::escape(output_folder)
    )
}

/// Parser for descriptor documents
#[derive(Debug, Clone)]
pub struct DescriptorParser {
    target_extension: String,
}

impl DescriptorParser {
    /// Create a parser naming output files with `target_extension`
    pub fn new(target_extension: impl Into<String>) -> Self {
        Self {
            target_extension: target_extension.into(),
        }
    }

    /// Parse a descriptor file.
    ///
    /// `path` may also be a directory, in which case [`DEFAULT_DESCRIPTOR`]
    /// inside it is used. Relative `Folder`/`Source` values resolve against the
    /// descriptor's own directory.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<ProjectConfig> {
        let path = path.as_ref();
        let descriptor = if path.is_dir() {
            path.join(DEFAULT_DESCRIPTOR)
        } else {
            path.to_path_buf()
        };

        if !descriptor.is_file() {
            return Err(Error::DescriptorNotFound { path: descriptor });
        }

        let descriptor = std::path::absolute(&descriptor)?;
        tracing::debug!("Reading descriptor {}", descriptor.display());
        let contents = std::fs::read_to_string(&descriptor)?;
        self.parse_str(&contents, &descriptor)
    }

    /// Parse descriptor text as if it had been read from `descriptor_path`.
    ///
    /// The file at `descriptor_path` does not have to exist; only its parent
    /// directory is used to resolve relative paths.
    pub fn parse_str(&self, xml: &str, descriptor_path: &Path) -> Result<ProjectConfig> {
        let base_dir = descriptor_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let mut scan = Scan {
            target_extension: &self.target_extension,
            descriptor: descriptor_path,
            base_dir: std::path::absolute(if base_dir.as_os_str().is_empty() {
                Path::new(".")
            } else {
                base_dir.as_path()
            })?,
            global: OptionSet::default(),
            open_file: None,
            output_directory: None,
            jobs: Vec::new(),
        };

        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => scan.element(&e, false)?,
                Ok(Event::Empty(e)) => scan.element(&e, true)?,
                Ok(Event::End(e)) => {
                    if e.name().as_ref() == b"File" {
                        scan.close_file()?;
                    }
                }
                Ok(Event::Eof) => break,
                Err(source) => {
                    return Err(Error::Xml {
                        path: descriptor_path.to_path_buf(),
                        source,
                    });
                }
                _ => {}
            }
        }

        scan.finish()
    }
}

/// State carried across elements during the single pass
struct Scan<'a> {
    target_extension: &'a str,
    descriptor: &'a Path,
    base_dir: PathBuf,
    global: OptionSet,
    open_file: Option<FileJob>,
    output_directory: Option<PathBuf>,
    jobs: Vec<FileJob>,
}

impl Scan<'_> {
    fn element(&mut self, e: &BytesStart<'_>, empty: bool) -> Result<()> {
        let name = e.name();
        tracing::debug!("Start element {}", String::from_utf8_lossy(name.as_ref()));

        match name.as_ref() {
            b"Output" => self.output(e),
            b"File" => self.open_file(e, empty),
            b"Option" => self.option(e),
            _ => Ok(()),
        }
    }

    fn output(&mut self, e: &BytesStart<'_>) -> Result<()> {
        let folder = self
            .attribute(e, "Folder")?
            .ok_or(Error::MissingAttribute {
                element: "Output",
                attribute: "Folder",
            })?;

        let path = self.resolve_path(&folder)?;
        if !path.is_dir() {
            return Err(Error::OutputDirectoryNotFound { path });
        }

        if let Some(previous) = self.output_directory.replace(path) {
            tracing::debug!("Output folder {} overridden", previous.display());
        }
        Ok(())
    }

    fn open_file(&mut self, e: &BytesStart<'_>, empty: bool) -> Result<()> {
        let source = self.attribute(e, "Source")?.ok_or(Error::MissingAttribute {
            element: "File",
            attribute: "Source",
        })?;

        if self.open_file.is_some() {
            return Err(Error::NestedFile {
                source_attr: source,
            });
        }

        let path = self.resolve_path(&source)?;
        let job = FileJob::load(path, self.target_extension, self.global.clone())?;

        if empty {
            self.push_job(job)?;
        } else {
            self.open_file = Some(job);
        }
        Ok(())
    }

    fn close_file(&mut self) -> Result<()> {
        match self.open_file.take() {
            Some(job) => self.push_job(job),
            None => Ok(()),
        }
    }

    fn option(&mut self, e: &BytesStart<'_>) -> Result<()> {
        let assignments = self.attributes(e)?;
        let overrides = assignments.iter().map(|(n, v)| (n.as_str(), v.as_str()));

        match self.open_file.as_mut() {
            Some(job) => job.options = job.options.resolve(overrides)?,
            None => self.global = self.global.resolve(overrides)?,
        }
        Ok(())
    }

    fn push_job(&mut self, job: FileJob) -> Result<()> {
        if !job.options.translate_file {
            tracing::debug!(
                "Skipping {} (TranslateFile=false)",
                job.source_path.display()
            );
            return Ok(());
        }

        if let Some(first) = self
            .jobs
            .iter()
            .find(|j| j.output_file_name == job.output_file_name)
        {
            return Err(Error::DuplicateOutput {
                output_file_name: job.output_file_name,
                first: first.source_path.clone(),
                second: job.source_path,
            });
        }

        self.jobs.push(job);
        Ok(())
    }

    fn finish(mut self) -> Result<ProjectConfig> {
        self.close_file()?;

        let output_directory = self.output_directory.unwrap_or(self.base_dir);
        tracing::debug!(
            "Descriptor {} declares {} file(s)",
            self.descriptor.display(),
            self.jobs.len()
        );

        Ok(ProjectConfig {
            output_directory,
            jobs: self.jobs,
        })
    }

    fn resolve_path(&self, raw: &str) -> Result<PathBuf> {
        let raw = Path::new(raw);
        let joined = if raw.is_absolute() {
            raw.to_path_buf()
        } else {
            self.base_dir.join(raw)
        };
        Ok(std::path::absolute(joined)?)
    }

    fn attribute(&self, e: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
        Ok(self
            .attributes(e)?
            .into_iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v))
    }

    fn attributes(&self, e: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
        let xml_error = |source: quick_xml::Error| Error::Xml {
            path: self.descriptor.to_path_buf(),
            source,
        };

        e.attributes()
            .map(|attr| {
                let attr = attr.map_err(|err| xml_error(err.into()))?;
                let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                let value = attr.unescape_value().map_err(&xml_error)?.into_owned();
                Ok((name, value))
            })
            .collect()
    }
}
