use std::fs::{create_dir_all, read_to_string, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde_derive::{Deserialize, Serialize};

/// How the Emacs installation is located.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryMode {
    /// Use `$UNREAL_EMACS_EMACSDIR`, or the platform's default directory, and require both
    /// `emacs` and `emacsclient` to exist in it.
    #[default]
    EnvThenPlatformDefault,
    /// Use a single fixed client path and assume `emacs` is on `PATH`.
    FixedPath,
}

/// What "save all open documents" does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveAllStrategy {
    /// Report failure without asking Emacs.
    #[default]
    Disabled,
    /// Evaluate `save_all_expression` in the running Emacs server.
    Eval,
}

/// Config for the program, as listed in `$XDG_CONFIG_HOME/uemacs/uemacs.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Identifier of the accessor to use.
    pub preferred_accessor: String,
    /// How the Emacs installation is located.
    pub discovery: DiscoveryMode,
    /// The client binary for [`DiscoveryMode::FixedPath`]. Defaults to the client in the
    /// platform's default directory.
    pub fixed_client_path: Option<PathBuf>,
    /// What "save all open documents" does.
    pub save_all: SaveAllStrategy,
    /// The Lisp expression evaluated for [`SaveAllStrategy::Eval`].
    pub save_all_expression: String,
    /// How long to wait for Emacs to answer an evaluation.
    pub eval_timeout_secs: u64,
    /// The project descriptor. If unset, the first `*.uproject` in the working directory is
    /// used.
    pub project_file: Option<PathBuf>,
    /// Log filter, used unless `$UEMACS_LOG` is set.
    pub log_level: String,
}

impl Config {
    /// Load the config from the associated file. If the file does not exist, create a default config.
    ///
    /// # Errors
    ///
    /// This function will return an error if the config file exists but cannot be read, its
    /// contents are not UTF-8, or the file is malformed.
    pub fn load(config_file: &Path) -> Result<Self> {
        let from_file = read_to_string(config_file);

        let content = match from_file {
            Ok(content) => content,
            Err(e) => {
                if e.kind() == ErrorKind::NotFound {
                    eprintln!(
                        "creating default config under {}",
                        config_file.to_string_lossy()
                    );
                    return Self::use_default_and_save_to(config_file);
                }
                bail!("unexpected error occured: {e:?}");
            }
        };

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).context("parsing yaml config")
    }

    fn use_default_and_save_to(file: &Path) -> Result<Self> {
        let result = Self::default();

        if let Some(parent) = file.parent() {
            create_dir_all(parent).context("creating config directory")?;
        }

        let content = serde_yaml::to_string(&result).context("converting Config to yaml")?;
        let mut output = File::create(file).context("creating default config file")?;
        write!(output, "{content}").context("writing default config")?;

        Ok(result)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preferred_accessor: "UnrealEmacs".into(),
            discovery: DiscoveryMode::default(),
            fixed_client_path: None,
            save_all: SaveAllStrategy::default(),
            save_all_expression: "(projectile-save-project-buffers)".into(),
            eval_timeout_secs: 5,
            project_file: None,
            log_level: "warn".into(),
        }
    }
}
