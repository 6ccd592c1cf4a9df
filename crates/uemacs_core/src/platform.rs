/*!
Per-platform facts about an Emacs installation: where it usually lives, what the binaries
are called and how `emacsclient` is told what to do when no server is running.
*/

use crate::accessor::{Switches, Text};

const SWITCHES_LAUNCH: Switches = &["-q", "-n"];

/// Which separator composed executable paths use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorStyle {
    /// `/`, on Linux and macOS.
    Forward,
    /// `\`, on Windows.
    Backslash,
}

/// How `emacsclient` is told what to run when no Emacs server is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlternateEditor {
    /// `-a "<editor-path>"`: start the resolved direct-launch binary.
    EditorPath,
    /// `--alternate-editor=`: let the client start a daemon itself. `emacsclientw` fails if
    /// the alternate editor path contains spaces, quoted or not.
    StartDaemon,
}

/// The flags that precede every detached launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchFlags {
    /// Quiet, do not wait for the editor.
    pub switches: Switches,
    /// Fallback when there is no server to talk to.
    pub alternate_editor: AlternateEditor,
}

/// Everything about an Emacs installation that differs between platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformProfile {
    /// The direct-launch binary.
    pub editor_file_name: Text,
    /// The client that forwards requests to a running server.
    pub client_file_name: Text,
    /// Where to look when [`crate::EMACS_DIR_VAR`] is unset. May be empty if the platform has
    /// no sensible default, in which case Emacs is never found there.
    pub default_directory: Text,
    /// Separator used in composed executable paths.
    pub separator_style: SeparatorStyle,
    /// Flags that precede every detached launch.
    pub launch_flags: LaunchFlags,
}

impl PlatformProfile {
    /// Linux and macOS.
    #[must_use]
    pub const fn unix() -> Self {
        Self {
            editor_file_name: "emacs",
            client_file_name: "emacsclient",
            default_directory: "/usr/local/bin",
            separator_style: SeparatorStyle::Forward,
            launch_flags: LaunchFlags {
                switches: SWITCHES_LAUNCH,
                alternate_editor: AlternateEditor::EditorPath,
            },
        }
    }

    /// Windows, using the windowed client so that no console pops up.
    #[must_use]
    pub const fn windows() -> Self {
        Self {
            editor_file_name: "runemacs.exe",
            client_file_name: "emacsclientw.exe",
            default_directory: "C:/Program Files/Emacs/x86_64/bin",
            separator_style: SeparatorStyle::Backslash,
            launch_flags: LaunchFlags {
                switches: SWITCHES_LAUNCH,
                alternate_editor: AlternateEditor::StartDaemon,
            },
        }
    }

    /// The profile of the platform this crate was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::windows()
        } else if cfg!(unix) {
            Self::unix()
        } else {
            Self {
                default_directory: "",
                ..Self::unix()
            }
        }
    }

    /// Bring a directory into canonical form: backslashes become `/` and trailing separators
    /// are removed, unless the directory is a root (`/` or `C:/`).
    #[must_use]
    pub fn normalize_directory(dir: &str) -> String {
        let mut normalized = dir.replace('\\', "/");
        while normalized.ends_with('/') && !is_root(&normalized) {
            normalized.pop();
        }
        normalized
    }

    /// Join a normalized directory and a file name into an executable path in this
    /// platform's separator style.
    #[must_use]
    pub fn compose_executable_path(&self, dir: &str, file_name: &str) -> String {
        let joined = if dir.ends_with('/') {
            format!("{dir}{file_name}")
        } else {
            format!("{dir}/{file_name}")
        };

        self.native_path(&joined)
    }

    /// Rewrite `path` into this platform's separator style.
    #[must_use]
    pub fn native_path(&self, path: &str) -> String {
        match self.separator_style {
            SeparatorStyle::Forward => path.to_string(),
            SeparatorStyle::Backslash => path.replace('/', "\\"),
        }
    }

    /// The client path used when there is no directory discovery at all.
    #[must_use]
    pub fn default_client_path(&self) -> String {
        if self.default_directory.is_empty() {
            return String::new();
        }
        let dir = Self::normalize_directory(self.default_directory);
        self.compose_executable_path(&dir, self.client_file_name)
    }
}

fn is_root(dir: &str) -> bool {
    match dir.as_bytes() {
        [b'/'] => true,
        [drive, b':', b'/'] => drive.is_ascii_alphabetic(),
        _ => false,
    }
}
