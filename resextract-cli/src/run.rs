use log::debug;
use resextract::{Error, Extractor};

use crate::{
    cli::Args,
    exit_status::ExitStatus,
    settings::{FileSettings, build_config, load_settings},
    summary::{plan_json, print_plan, print_report, report_json, write_json},
};

/// A run that ended before producing a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub status: ExitStatus,
    pub message: String,
}

impl Failure {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self {
            status: ExitStatus::Configuration,
            message: message.into(),
        }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self {
            status: ExitStatus::Failure,
            message: message.into(),
        }
    }
}

impl From<Error> for Failure {
    fn from(error: Error) -> Self {
        if error.is_configuration() {
            Failure::configuration(error.to_string())
        } else {
            Failure::runtime(error.to_string())
        }
    }
}

/// Runs one invocation and decides its exit status.
pub fn run(args: &Args) -> Result<ExitStatus, Failure> {
    let settings = match &args.config {
        Some(path) => {
            debug!("loading settings from `{}`", path.display());
            load_settings(path).map_err(Failure::configuration)?
        }
        None => FileSettings::default(),
    };
    let config = build_config(args, settings).map_err(Failure::configuration)?;
    let extractor = Extractor::new(config);

    if args.dry_run {
        let collection = extractor.collect()?;
        print_plan(extractor.config(), &collection);
        if let Some(path) = &args.report_json {
            write_json(path, &plan_json(extractor.config(), &collection))
                .map_err(Failure::runtime)?;
        }
        return Ok(status_for(args, !collection.skipped.is_empty(), false));
    }

    let report = extractor.run()?;
    print_report(&report);
    if let Some(path) = &args.report_json {
        write_json(path, &report_json(extractor.config(), &report)).map_err(Failure::runtime)?;
        println!("Report JSON written: {}", path.display());
    }
    Ok(status_for(
        args,
        !report.skipped.is_empty(),
        report.has_write_failures(),
    ))
}

fn status_for(args: &Args, skipped: bool, write_failures: bool) -> ExitStatus {
    if write_failures {
        ExitStatus::Failure
    } else if args.fail_on_skipped && skipped {
        ExitStatus::Skipped
    } else {
        ExitStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_configuration_errors_map_to_configuration_status() {
        let failure = Failure::from(Error::configuration("no entries to extract"));
        assert_eq!(failure.status, ExitStatus::Configuration);

        let failure = Failure::from(Error::Write {
            path: PathBuf::from("output/values"),
            source: std::io::Error::other("disk full"),
        });
        assert_eq!(failure.status, ExitStatus::Failure);
    }

    #[test]
    fn test_status_for() {
        let mut args = Args::default();
        assert_eq!(status_for(&args, true, false), ExitStatus::Success);
        assert_eq!(status_for(&args, false, true), ExitStatus::Failure);
        args.fail_on_skipped = true;
        assert_eq!(status_for(&args, true, false), ExitStatus::Skipped);
        assert_eq!(status_for(&args, false, false), ExitStatus::Success);
    }

    #[test]
    fn test_missing_map_is_configuration_failure() {
        let args = Args {
            input: Some(PathBuf::from("res")),
            ..Args::default()
        };
        let failure = run(&args).unwrap_err();
        assert_eq!(failure.status, ExitStatus::Configuration);
    }
}
