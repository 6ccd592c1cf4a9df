use std::error::Error as ErrorTrait;
use std::fmt::Display;
use std::time::Duration;

/// Error types for uemacs.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// No usable Emacs installation was found at the last refresh.
    NotInstalled,
    /// The client binary could not be started. Holds the attempted target.
    LaunchFailure(String),
    /// The synchronous `--eval` round trip did not complete.
    TransportFailure(String),
    /// The synchronous `--eval` round trip ran longer than allowed.
    EvalTimeout(Duration),
    /// The host did not provide a project descriptor.
    ProjectFileNotFound,
    /// No registered accessor has this identifier.
    UnknownAccessor(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInstalled => f.write_str("no usable Emacs installation found"),
            Self::LaunchFailure(target) => write!(f, "failed to open {target}"),
            Self::TransportFailure(reason) => {
                write!(f, "evaluating in Emacs failed: {reason}")
            }
            Self::EvalTimeout(timeout) => write!(
                f,
                "Emacs did not answer within {:.1} seconds",
                timeout.as_secs_f64()
            ),
            Self::ProjectFileNotFound => f.write_str("no .uproject file found"),
            Self::UnknownAccessor(name) => {
                write!(f, "no source code accessor named '{name}'")
            }
        }
    }
}

impl ErrorTrait for Error {}
