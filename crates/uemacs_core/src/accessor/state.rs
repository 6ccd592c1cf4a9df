use std::path::{Path, PathBuf};

use serde_derive::Serialize;

/// What the last availability refresh found.
///
/// If `installed` is true, both paths are non-empty. Otherwise both are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccessorState {
    installed: bool,
    editor_path: PathBuf,
    client_path: PathBuf,
}

impl AccessorState {
    /// Nothing found, or not refreshed yet.
    #[must_use]
    pub fn uninstalled() -> Self {
        Self::default()
    }

    pub(crate) fn found(editor_path: PathBuf, client_path: PathBuf) -> Self {
        debug_assert!(!editor_path.as_os_str().is_empty());
        debug_assert!(!client_path.as_os_str().is_empty());
        Self {
            installed: true,
            editor_path,
            client_path,
        }
    }

    /// Whether a usable installation was found.
    #[must_use]
    pub const fn is_installed(&self) -> bool {
        self.installed
    }

    /// The direct-launch binary, empty if not installed.
    #[must_use]
    pub fn editor_path(&self) -> &Path {
        &self.editor_path
    }

    /// The client binary, empty if not installed.
    #[must_use]
    pub fn client_path(&self) -> &Path {
        &self.client_path
    }
}
