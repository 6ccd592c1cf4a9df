use std::env::current_dir;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use const_format::formatcp;
use serde_json::json;
use tracing::debug;

use crate::accessor::{Accessors, SourceCodeAccessor};
use crate::args::{self, Column, File, Files, Json, Line, Subcommand};
use crate::env::EMACS_DIR_VAR;
use crate::errors::Error;
use crate::path::{find_project_file, get_absolutized_file_paths};
use crate::Config;

const NOT_INSTALLED_HINT: &str =
    formatcp!("set ${EMACS_DIR_VAR} to the directory containing emacs and emacsclient");

/// Most data that is required during runtime of the program.
/// `args` is an `Option` so that we can take ownership later without cloning.
pub struct Uemacs {
    args: Option<args::Arguments>,
    config: Config,
}

impl Uemacs {
    /// Creates a new [`Uemacs`]. `config` should be passed from [`Config::load`], and `args`
    /// from [`crate::get_args`].
    #[must_use]
    pub const fn new(args: args::Arguments, config: Config) -> Self {
        Self {
            args: Some(args),
            config,
        }
    }

    /// Run the action that was provided by the user as first argument.
    ///
    /// # Errors
    ///
    /// This function returns an error if the accessor is unknown or not installed, or if the
    /// accessor reports that the requested operation failed.
    #[allow(clippy::unit_arg)]
    pub fn run_action_from_arg(mut self) -> Result<()> {
        let args = self
            .args
            .take()
            .context("arguments were already consumed")?;

        self.resolve_project_file(args.project)
            .context("resolving project file")?;

        match args.subcommand {
            Subcommand::List => Ok(self.list_accessors()),
            Subcommand::Version => Ok(self.show_version()),
            Subcommand::Status(Json(json)) => {
                let accessor = self.load_accessor(args.accessor)?;
                self.show_status(&*accessor, json)
            }
            Subcommand::Solution(path) => {
                open_solution(&*self.load_accessor(args.accessor)?, path.as_deref())
            }
            Subcommand::Goto(File(file), Line(line), Column(column)) => open_file_at_line(
                &*self.load_accessor(args.accessor)?,
                &file,
                line,
                column,
            ),
            Subcommand::Open(Files(files)) => {
                open_source_files(&*self.load_accessor(args.accessor)?, &files)
            }
            Subcommand::Save => save_all(&*self.load_accessor(args.accessor)?),
        }
    }

    /// The project descriptor is, in order: the command line argument, the config file, the
    /// first `*.uproject` in the working directory.
    fn resolve_project_file(&mut self, from_args: Option<PathBuf>) -> Result<()> {
        if from_args.is_some() {
            self.config.project_file = from_args;
        } else if self.config.project_file.is_none() {
            let cwd = current_dir().context("getting working directory")?;
            self.config.project_file = find_project_file(&cwd);
        }
        debug!("project file: {:?}", self.config.project_file);
        Ok(())
    }

    /// Look up the accessor named on the command line, or the preferred one, and refresh it.
    fn load_accessor(&self, identifier: Option<String>) -> Result<Box<dyn SourceCodeAccessor>> {
        let identifier = identifier.unwrap_or_else(|| self.config.preferred_accessor.clone());
        let mut accessor = Accessors::find(&identifier, &self.config)?;
        accessor.refresh_availability();
        Ok(accessor)
    }

    fn show_status(&self, accessor: &dyn SourceCodeAccessor, as_json: bool) -> Result<()> {
        let project_file = self.config.project_file.as_deref();

        if as_json {
            let status = json!({
                "identifier": accessor.get_identifier(),
                "name": accessor.get_display_name(),
                "installed": accessor.can_access_source_code(),
                "installation": accessor.installation(),
                "project_file": project_file,
                "solution_exists": accessor.does_solution_exist(),
            });
            let text = serde_json::to_string_pretty(&status).context("serializing status")?;
            println!("{text}");
            return Ok(());
        }

        println!(
            "accessor:  {} ({})",
            accessor.get_identifier(),
            accessor.get_display_name()
        );
        println!(
            "installed: {}",
            if accessor.can_access_source_code() {
                "yes"
            } else {
                "no"
            }
        );
        if let Some(state) = accessor.installation().filter(|s| s.is_installed()) {
            println!("editor:    {}", state.editor_path().display());
            println!("client:    {}", state.client_path().display());
        }
        match project_file {
            Some(file) if accessor.does_solution_exist() => {
                println!("project:   {}", file.display());
            }
            Some(file) => println!("project:   {} (missing)", file.display()),
            None => println!("project:   none"),
        }
        Ok(())
    }

    fn list_accessors(&self) {
        for mut accessor in Accessors::iter(&self.config) {
            accessor.refresh_availability();
            let preferred = if accessor.get_identifier() == self.config.preferred_accessor {
                '*'
            } else {
                ' '
            };
            let availability = if accessor.can_access_source_code() {
                ""
            } else {
                " (not installed)"
            };
            println!(
                "{preferred} {:<14} {}{availability}",
                accessor.get_identifier(),
                accessor.get_description(),
            );
        }
    }

    #[allow(clippy::unused_self)]
    fn show_version(&self) {
        println!("{}", get_name_and_version(&self.config));
    }
}

fn ensure_installed(accessor: &dyn SourceCodeAccessor) -> Result<()> {
    if accessor.can_access_source_code() {
        Ok(())
    } else {
        Err(Error::NotInstalled).context(NOT_INSTALLED_HINT)
    }
}

fn open_solution(accessor: &dyn SourceCodeAccessor, path: Option<&Path>) -> Result<()> {
    ensure_installed(accessor)?;

    let opened = match path {
        Some(path) => {
            let path = get_absolutized_file_paths(&[path.to_path_buf()])?.remove(0);
            accessor.open_solution_at_path(&path)
        }
        None => {
            ensure!(accessor.does_solution_exist(), Error::ProjectFileNotFound);
            accessor.open_solution()
        }
    };

    ensure!(opened, "{} could not open the project", accessor.get_display_name());
    Ok(())
}

fn open_file_at_line(
    accessor: &dyn SourceCodeAccessor,
    file: &Path,
    line: u32,
    column: Option<u32>,
) -> Result<()> {
    ensure_installed(accessor)?;

    let file = get_absolutized_file_paths(&[file.to_path_buf()])?.remove(0);
    ensure!(
        accessor.open_file_at_line(&file, line, column),
        "{} could not open {}",
        accessor.get_display_name(),
        file.display()
    );
    Ok(())
}

fn open_source_files(accessor: &dyn SourceCodeAccessor, files: &[PathBuf]) -> Result<()> {
    ensure_installed(accessor)?;

    let files = get_absolutized_file_paths(files)?;
    ensure!(
        accessor.open_source_files(&files),
        "{} could not open the files",
        accessor.get_display_name()
    );
    Ok(())
}

fn save_all(accessor: &dyn SourceCodeAccessor) -> Result<()> {
    ensure_installed(accessor)?;

    ensure!(
        accessor.save_all_open_documents(),
        "{} did not save all open documents",
        accessor.get_display_name()
    );
    Ok(())
}

/// Return `uemacs, version: <version>` and the list of supported accessors.
fn get_name_and_version(config: &Config) -> String {
    let mut result = format!("uemacs, version: {}\n", get_version_string());
    result.push_str("supported accessors:");
    for accessor in Accessors::iter(config) {
        result.push_str("\n  ");
        result.push_str(accessor.get_identifier());
    }
    result
}

/// If the crate was compiled from git, return `<version> (<hash>)`. Otherwise
/// return `<version>`.
#[must_use]
pub const fn get_version_string() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const HASH: &str = env!("GIT_HASH");

    if HASH.is_empty() {
        VERSION
    } else {
        formatcp!("{VERSION} ({HASH})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_starts_with_package_version() {
        assert!(get_version_string().starts_with(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn version_lists_accessors() {
        let text = get_name_and_version(&Config::default());
        assert!(text.starts_with("uemacs, version: "));
        assert!(text.ends_with("supported accessors:\n  UnrealEmacs"));
    }

    #[test]
    fn project_file_from_args_wins() {
        let config = Config {
            project_file: Some(PathBuf::from("/configured/Game.uproject")),
            ..Config::default()
        };
        let mut uemacs = Uemacs::new(
            args::Arguments {
                accessor: None,
                project: None,
                subcommand: Subcommand::Version,
            },
            config,
        );

        uemacs
            .resolve_project_file(Some(PathBuf::from("/cli/Other.uproject")))
            .expect("resolve");
        assert_eq!(
            uemacs.config.project_file,
            Some(PathBuf::from("/cli/Other.uproject"))
        );

        uemacs.resolve_project_file(None).expect("resolve");
        assert_eq!(
            uemacs.config.project_file,
            Some(PathBuf::from("/cli/Other.uproject"))
        );
    }

    #[test]
    fn unknown_accessor_on_command_line_is_an_error() {
        let uemacs = Uemacs::new(
            args::Arguments {
                accessor: Some("Notepad".into()),
                project: Some(PathBuf::from("/nowhere/Game.uproject")),
                subcommand: Subcommand::Status(Json(false)),
            },
            Config::default(),
        );

        let error = uemacs.run_action_from_arg().expect_err("not registered");

        assert!(matches!(
            error.root_cause().downcast_ref::<Error>(),
            Some(Error::UnknownAccessor(name)) if name == "Notepad"
        ));
    }

    #[test]
    fn listing_needs_no_accessor_lookup() {
        let uemacs = Uemacs::new(
            args::Arguments {
                accessor: Some("Notepad".into()),
                project: Some(PathBuf::from("/nowhere/Game.uproject")),
                subcommand: Subcommand::List,
            },
            Config::default(),
        );

        assert!(uemacs.run_action_from_arg().is_ok());
    }

    #[test]
    fn not_installed_error_names_the_override_variable() {
        let accessor = Accessors::find("UnrealEmacs", &Config::default()).expect("registered");

        let error = ensure_installed(&*accessor).expect_err("never refreshed");

        assert!(error.to_string().contains(EMACS_DIR_VAR));
        assert!(matches!(
            error.root_cause().downcast_ref::<Error>(),
            Some(Error::NotInstalled)
        ));
    }
}
