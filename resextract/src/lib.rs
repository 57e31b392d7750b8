#![forbid(unsafe_code)]
//! Extract a subset of Android string resources into a parallel resource tree.
//!
//! Given a resource root laid out as one directory per locale (`values`,
//! `values-es`, `values-b+sr+Latn`, ...), resextract reads the configured
//! source file of every locale, keeps only the `<string>` entries named in an
//! [`ExtractionSpec`], renames them and writes one smaller file per locale
//! under an output root.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use resextract::{ExtractionSpec, Extractor, ExtractorConfig};
//!
//! let spec = ExtractionSpec::new([
//!     ("mobile_data", "tile_label_mobile_data"),
//!     ("quick_settings_nfc_label", "tile_label_nfc"),
//! ])?;
//! let config = ExtractorConfig::new(spec, "app/src/main/res")?
//!     .with_output_root("build/extracted")
//!     .with_output_filename("tile_labels.xml")?;
//!
//! let report = Extractor::new(config).run()?;
//! for file in &report.written {
//!     println!("{} ({} entries)", file.path.display(), file.entries);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Pipeline
//!
//! - [`scanner`] finds locale directories whose name contains the locale
//!   marker and the source file inside each of them.
//! - [`parser`] reads `<string>` entries from one file.
//! - [`extractor`] filters and renames entries, aggregates them per locale and
//!   drives the [`writer`].
//!
//! Per-locale listing and parse failures are logged through the `log` facade
//! and reported in the [`ExtractionReport`]; a missing input root or a write
//! failure ends the run with an [`Error`].

pub mod config;
pub mod error;
pub mod extractor;
pub mod parser;
pub mod scanner;
pub mod types;
pub mod writer;

// Re-export most used types for easy consumption
pub use crate::{
    config::{
        DEFAULT_LOCALE_MARKER, DEFAULT_OUTPUT_ROOT, DEFAULT_SOURCE_FILENAME, ExtractionSpec,
        ExtractorConfig, WritePolicy,
    },
    error::{Error, ParseError},
    extractor::{
        Collection, ExtractionReport, Extractor, FailureKind, LocaleFailure, WrittenFile, extract,
        filter_entries,
    },
    parser::{ResourceDocument, read_entries},
    scanner::{LocaleFile, scan_locales},
    types::{ExtractionResult, LocaleBundle, RawEntry},
};
