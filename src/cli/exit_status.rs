use std::process::ExitCode;

/// Process exit status.
///
/// - `Success` (0): command finished and there is nothing left to do
/// - `Failure` (1): a scan found untranslated text, or `init` found an existing config
/// - `Error` (2): config error, unreadable/unparsable source, or a failed patch
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
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
