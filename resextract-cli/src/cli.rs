use std::path::PathBuf;

use clap::Parser;

/// Extract a subset of Android string resources into a per-locale tree.
#[derive(Parser, Debug, Default)]
#[command(name = "resextract", author, version, about, long_about = None)]
pub struct Args {
    /// Resource root containing the locale directories (e.g. app/src/main/res)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory the extracted tree is written to [default: output]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// File to read inside each locale directory [default: strings.xml]
    #[arg(long, value_name = "NAME")]
    pub source_file: Option<String>,

    /// Name of the written files [default: the source file name]
    #[arg(long, value_name = "NAME")]
    pub output_file: Option<String>,

    /// Entry to extract, as SOURCE=TARGET or SOURCE (repeatable, comma separated)
    #[arg(short, long = "map", value_name = "SOURCE[=TARGET]", value_delimiter = ',')]
    pub map: Vec<String>,

    /// Prefix for the output name of entries given without `=TARGET`
    #[arg(long)]
    pub prefix: Option<String>,

    /// Substring that marks a directory as a locale directory [default: values]
    #[arg(long)]
    pub marker: Option<String>,

    /// Read settings from a TOML, JSON or YAML file; flags take precedence
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keep writing the remaining locales after a write failure
    #[arg(long)]
    pub keep_going: bool,

    /// Show what would be written without touching the output directory
    #[arg(long)]
    pub dry_run: bool,

    /// Write a machine-readable run report
    #[arg(long, value_name = "FILE")]
    pub report_json: Option<PathBuf>,

    /// Exit with a distinct status when any locale was skipped
    #[arg(long)]
    pub fail_on_skipped: bool,

    /// Log scanner decisions
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Default log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
