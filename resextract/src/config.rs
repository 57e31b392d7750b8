//! Run configuration: which entries to extract and where files live.
//!
//! Both [`ExtractionSpec`] and [`ExtractorConfig`] are validated when they are
//! built, so a value that exists is always usable by the pipeline.

use std::path::{Component, Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// File name looked up in every locale directory when none is configured.
pub const DEFAULT_SOURCE_FILENAME: &str = "strings.xml";

/// Output directory used when none is configured.
pub const DEFAULT_OUTPUT_ROOT: &str = "output";

/// Substring that marks a directory as a locale directory.
pub const DEFAULT_LOCALE_MARKER: &str = "values";

/// Mapping from source entry name to the name it gets in the output.
///
/// The keys form the filter set. A spec is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSpec {
    names: IndexMap<String, String>,
}

impl ExtractionSpec {
    /// Builds a spec from `(source name, output name)` pairs.
    ///
    /// A source name given twice keeps the last output name.
    pub fn new<I, K, V>(names: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let names: IndexMap<String, String> = names
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        if names.is_empty() {
            return Err(Error::configuration("no entries to extract"));
        }
        Ok(Self { names })
    }

    /// Output name for a source name, if it is to be extracted.
    pub fn get(&self, source_name: &str) -> Option<&str> {
        self.names.get(source_name).map(String::as_str)
    }

    pub fn contains(&self, source_name: &str) -> bool {
        self.names.contains_key(source_name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// What to do when an output file cannot be written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritePolicy {
    /// Stop at the first failed locale and return the error.
    #[default]
    FailFast,
    /// Attempt every locale and report the failures afterwards.
    Continue,
}

/// Immutable settings for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    spec: ExtractionSpec,
    input_root: PathBuf,
    output_root: PathBuf,
    source_filename: String,
    output_filename: Option<String>,
    locale_marker: String,
    write_policy: WritePolicy,
}

impl ExtractorConfig {
    /// Creates a configuration with default output root, file names, locale
    /// marker and write policy.
    pub fn new(spec: ExtractionSpec, input_root: impl Into<PathBuf>) -> Result<Self, Error> {
        let input_root = input_root.into();
        if input_root.as_os_str().is_empty() {
            return Err(Error::configuration("input path not set"));
        }
        Ok(Self {
            spec,
            input_root,
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            source_filename: DEFAULT_SOURCE_FILENAME.to_string(),
            output_filename: None,
            locale_marker: DEFAULT_LOCALE_MARKER.to_string(),
            write_policy: WritePolicy::default(),
        })
    }

    /// Sets the output root. An empty path falls back to the default.
    pub fn with_output_root(mut self, output_root: impl Into<PathBuf>) -> Self {
        let output_root = output_root.into();
        self.output_root = if output_root.as_os_str().is_empty() {
            PathBuf::from(DEFAULT_OUTPUT_ROOT)
        } else {
            output_root
        };
        self
    }

    /// Sets the file name looked up inside each locale directory.
    pub fn with_source_filename(mut self, name: impl Into<String>) -> Result<Self, Error> {
        self.source_filename = validate_file_name("source file name", name.into())?;
        Ok(self)
    }

    /// Sets the name of the written files. Defaults to the source file name.
    pub fn with_output_filename(mut self, name: impl Into<String>) -> Result<Self, Error> {
        self.output_filename = Some(validate_file_name("output file name", name.into())?);
        Ok(self)
    }

    /// Sets the substring that selects locale directories.
    pub fn with_locale_marker(mut self, marker: impl Into<String>) -> Result<Self, Error> {
        let marker = marker.into();
        if marker.is_empty() {
            return Err(Error::configuration("locale marker must not be empty"));
        }
        self.locale_marker = marker;
        Ok(self)
    }

    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.write_policy = policy;
        self
    }

    pub fn spec(&self) -> &ExtractionSpec {
        &self.spec
    }

    pub fn input_root(&self) -> &Path {
        &self.input_root
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn source_filename(&self) -> &str {
        &self.source_filename
    }

    pub fn output_filename(&self) -> &str {
        self.output_filename
            .as_deref()
            .unwrap_or(&self.source_filename)
    }

    pub fn locale_marker(&self) -> &str {
        &self.locale_marker
    }

    pub fn write_policy(&self) -> WritePolicy {
        self.write_policy
    }

    /// Path of the file written for `locale`.
    pub fn target_path(&self, locale: &str) -> PathBuf {
        self.output_root.join(locale).join(self.output_filename())
    }
}

// A file name must be exactly one normal path component.
fn validate_file_name(what: &str, name: String) -> Result<String, Error> {
    if name.is_empty() {
        return Err(Error::configuration(format!("{what} must not be empty")));
    }
    let mut components = Path::new(&name).components();
    let plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !plain {
        return Err(Error::configuration(format!(
            "{what} `{name}` must be a plain file name"
        )));
    }
    Ok(name)
}
