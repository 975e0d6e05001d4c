use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed, no errors found
/// - `Failure` (1): Command completed but locales are inconsistent or
///   other error-level issues were found
/// - `Error` (1): Command could not complete (config error, reference
///   locale parse error, unwritable file, ...)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure | ExitStatus::Error => ExitCode::from(1),
        }
    }
}
