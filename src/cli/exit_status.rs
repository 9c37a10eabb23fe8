use std::process::ExitCode;

/// Exit status for the CLI.
///
/// - `Success` (0): the run completed; per-file translation failures are
///   narrated on the console but do not change the exit code.
/// - `Error` (1): the run aborted on a fatal error (missing `en.json`,
///   unreadable directory). Argument errors, including a missing
///   credential, are handled by clap and exit with its own code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Run completed.
    Success,
    /// Run aborted on a fatal error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Error => ExitCode::from(1),
        }
    }
}
