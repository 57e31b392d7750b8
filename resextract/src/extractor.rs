//! The extraction pipeline: scan, parse, filter, aggregate, write.

use std::path::PathBuf;

use log::{debug, error, info, warn};
use serde::Serialize;

use crate::{
    config::{ExtractionSpec, ExtractorConfig, WritePolicy},
    error::{Error, ParseError},
    parser::ResourceDocument,
    scanner::{LocaleFile, scan_locales},
    types::{ExtractionResult, LocaleBundle, RawEntry},
    writer::write_bundle,
};

/// Which pipeline stage a locale was lost in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
    LocaleList,
    Parse,
    Write,
}

/// A locale that produced no output because of an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleFailure {
    pub kind: FailureKind,
    pub locale: String,
    pub path: PathBuf,
    pub message: String,
}

impl LocaleFailure {
    pub fn new(
        kind: FailureKind,
        locale: impl Into<String>,
        path: impl Into<PathBuf>,
        error: &Error,
    ) -> Self {
        Self {
            kind,
            locale: locale.into(),
            path: path.into(),
            message: error.to_string(),
        }
    }

    /// Builds the failure record for an error that names its locale.
    pub fn from_error(error: &Error) -> Option<Self> {
        match error {
            Error::LocaleList { locale, path, .. } => Some(Self::new(
                FailureKind::LocaleList,
                locale.as_str(),
                path.as_path(),
                error,
            )),
            _ => None,
        }
    }
}

/// A file written by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFile {
    pub locale: String,
    pub path: PathBuf,
    pub entries: usize,
}

/// Outcome of the scan/parse/filter phase.
#[derive(Debug, Default)]
pub struct Collection {
    pub result: ExtractionResult,
    /// Locales skipped because they could not be listed or parsed.
    pub skipped: Vec<LocaleFailure>,
}

/// Outcome of a complete run that did not fail fatally.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    pub written: Vec<WrittenFile>,
    pub skipped: Vec<LocaleFailure>,
    /// Only populated under [`WritePolicy::Continue`].
    pub write_failures: Vec<LocaleFailure>,
}

impl ExtractionReport {
    /// True when every discovered locale was processed without error.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.write_failures.is_empty()
    }

    pub fn has_write_failures(&self) -> bool {
        !self.write_failures.is_empty()
    }
}

/// Keeps the entries named in `spec`, renamed, in source order.
///
/// A later entry with the same output name replaces the earlier value.
pub fn filter_entries<I>(
    spec: &ExtractionSpec,
    locale: &str,
    entries: I,
) -> Result<LocaleBundle, ParseError>
where
    I: IntoIterator<Item = Result<RawEntry, ParseError>>,
{
    let mut bundle = LocaleBundle::new(locale);
    for entry in entries {
        let entry = entry?;
        if let Some(output_name) = spec.get(&entry.name) {
            bundle.insert(output_name, entry.value);
        }
    }
    Ok(bundle)
}

/// Runs extractions for one [`ExtractorConfig`].
#[derive(Debug, Clone)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Scans the input root and gathers the matching entries of every locale.
    ///
    /// Only a missing or unreadable input root is fatal. Locales that cannot
    /// be listed or parsed are logged and recorded in [`Collection::skipped`].
    pub fn collect(&self) -> Result<Collection, Error> {
        let config = &self.config;
        let mut collection = Collection::default();

        let scan = scan_locales(
            config.input_root(),
            config.locale_marker(),
            config.source_filename(),
        )?;

        for item in scan {
            let LocaleFile { locale, path } = match item {
                Ok(file) => file,
                Err(err @ Error::LocaleList { .. }) => {
                    warn!("skipping locale: {err}");
                    if let Some(failure) = LocaleFailure::from_error(&err) {
                        collection.skipped.push(failure);
                    }
                    continue;
                }
                Err(err) => return Err(err),
            };

            let parsed = ResourceDocument::read_from(&path)
                .and_then(|doc| filter_entries(config.spec(), &locale, doc.entries()));
            match parsed {
                Ok(bundle) if bundle.is_empty() => {
                    debug!("`{locale}` has no entries to extract");
                }
                Ok(bundle) => {
                    debug!("`{locale}`: {} entries matched", bundle.len());
                    collection.result.insert(bundle);
                }
                Err(source) => {
                    let err = Error::Parse {
                        path: path.clone(),
                        source,
                    };
                    warn!("skipping locale `{locale}`: {err}");
                    collection
                        .skipped
                        .push(LocaleFailure::new(FailureKind::Parse, locale, path, &err));
                }
            }
        }

        collection.skipped.sort_by(|a, b| a.locale.cmp(&b.locale));
        Ok(collection)
    }

    /// Writes one file per bundle under the output root.
    ///
    /// Under [`WritePolicy::FailFast`] the first failure is returned as an
    /// error. Under [`WritePolicy::Continue`] failures are collected into the
    /// returned report and the remaining locales are still written.
    pub fn write(&self, result: ExtractionResult) -> Result<ExtractionReport, Error> {
        let mut report = ExtractionReport::default();

        for bundle in result {
            let target = self.config.target_path(bundle.locale());
            match write_bundle(&target, &bundle) {
                Ok(path) => {
                    info!("wrote {} entries to `{}`", bundle.len(), path.display());
                    report.written.push(WrittenFile {
                        locale: bundle.locale().to_string(),
                        path,
                        entries: bundle.len(),
                    });
                }
                Err(err) => match self.config.write_policy() {
                    WritePolicy::FailFast => return Err(err),
                    WritePolicy::Continue => {
                        error!("failed to write locale `{}`: {err}", bundle.locale());
                        report.write_failures.push(LocaleFailure::new(
                            FailureKind::Write,
                            bundle.locale(),
                            target,
                            &err,
                        ));
                    }
                },
            }
        }

        Ok(report)
    }

    /// Runs the whole pipeline.
    pub fn run(&self) -> Result<ExtractionReport, Error> {
        let Collection { result, skipped } = self.collect()?;
        let mut report = self.write(result)?;
        report.skipped = skipped;

        info!(
            "extraction finished: {} written, {} skipped, {} write failures",
            report.written.len(),
            report.skipped.len(),
            report.write_failures.len()
        );
        Ok(report)
    }
}

/// Convenience wrapper around [`Extractor::run`].
pub fn extract(config: ExtractorConfig) -> Result<ExtractionReport, Error> {
    Extractor::new(config).run()
}
