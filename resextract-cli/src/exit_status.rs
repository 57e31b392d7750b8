use std::process::ExitCode;

/// Process exit status of a `resextract` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Run completed; skipped locales only count with `--fail-on-skipped`.
    Success,
    /// Input root unreadable or output could not be written.
    Failure,
    /// Invalid flags or configuration.
    Configuration,
    /// Run completed but some locales were skipped.
    Skipped,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Configuration => ExitCode::from(2),
            ExitStatus::Skipped => ExitCode::from(3),
        }
    }
}
