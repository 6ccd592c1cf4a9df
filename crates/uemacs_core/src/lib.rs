/*!
This library contains all logic that happens in `uemacs` under the hood: finding an Emacs
installation, composing `emacsclient` invocations and starting them.

The host-facing surface is the [`SourceCodeAccessor`] trait. [`Emacs`] is its only
implementation and is built on three platform primitives ([`EnvironmentLookup`],
[`FileSystemProbe`] and [`ProcessLauncher`]) so that hosts and tests can swap them out.
*/

#![warn(
    clippy::as_conversions,
    clippy::cognitive_complexity,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::option_if_let_else,
    clippy::redundant_pub_crate,
    clippy::semicolon_if_nothing_returned,
    clippy::unused_self,
    clippy::unwrap_used,
    clippy::use_debug,
    clippy::use_self,
    clippy::wildcard_dependencies,
    missing_docs
)]

mod accessor;
mod action;
mod args;
mod cmd;
mod config;
mod core;
mod env;
mod errors;
mod invocation;
mod path;
mod platform;
#[cfg(test)]
mod test_support;

pub use crate::accessor::{
    AccessorIter, AccessorState, Accessors, Emacs, EmacsSettings, SourceCodeAccessor, Switches,
    Text,
};
pub use crate::args::{get as get_args, Arguments};
pub use crate::cmd::{ExecOutput, LaunchOutcome, ProcessLauncher, SystemLauncher};
pub use crate::config::{Config, DiscoveryMode, SaveAllStrategy};
pub use crate::core::{get_version_string, Uemacs};
pub use crate::env::{get_log_filter, EnvironmentLookup, SystemEnvironment, EMACS_DIR_VAR};
pub use crate::errors::Error;
pub use crate::invocation::InvocationRequest;
pub use crate::path::{get_config_path, FileSystemProbe, SystemFileSystem};
pub use crate::platform::{AlternateEditor, LaunchFlags, PlatformProfile, SeparatorStyle};

extern crate uemacs_macros;
