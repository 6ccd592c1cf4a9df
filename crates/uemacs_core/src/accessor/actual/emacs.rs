use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::accessor::{AccessorState, SourceCodeAccessor, Switches, Text};
use crate::cmd::{LaunchOutcome, ProcessLauncher, SystemLauncher};
use crate::config::{Config, DiscoveryMode, SaveAllStrategy};
use crate::env::{get_non_empty_var, EnvironmentLookup, SystemEnvironment, EMACS_DIR_VAR};
use crate::errors::Error;
use crate::invocation::InvocationRequest;
use crate::path::{FileSystemProbe, SystemFileSystem};
use crate::platform::{AlternateEditor, PlatformProfile};

// Hosts persist this as the user's choice (Unreal: `PreferredAccessor=UnrealEmacs`), and the
// project generator is looked up by it. It must not change.
const IDENTIFIER: Text = "UnrealEmacs";
const DISPLAY_NAME: Text = "Emacs";
const DESCRIPTION: Text = "Open source files in Emacs";

const SWITCHES_EVAL: Switches = &["--no-wait", "--eval"];

/// The parts of [`Config`] that concern [`Emacs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmacsSettings {
    /// How the installation is located.
    pub discovery: DiscoveryMode,
    /// Client binary for [`DiscoveryMode::FixedPath`].
    pub fixed_client_path: Option<PathBuf>,
    /// What "save all open documents" does.
    pub save_all: SaveAllStrategy,
    /// Expression evaluated for [`SaveAllStrategy::Eval`].
    pub save_all_expression: String,
    /// Upper bound for one evaluation round trip.
    pub eval_timeout: Duration,
    /// The host's project descriptor.
    pub project_file: Option<PathBuf>,
}

impl From<&Config> for EmacsSettings {
    fn from(config: &Config) -> Self {
        Self {
            discovery: config.discovery,
            fixed_client_path: config.fixed_client_path.clone(),
            save_all: config.save_all,
            save_all_expression: config.save_all_expression.clone(),
            eval_timeout: Duration::from_secs(config.eval_timeout_secs),
            project_file: config.project_file.clone(),
        }
    }
}

impl Default for EmacsSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Opens projects and files in GNU Emacs through `emacsclient`.
///
/// Every launch goes to the client with `-n`, so it returns as soon as the running server
/// took the request. Without a server, the client falls back to starting one.
#[derive(Debug)]
pub struct Emacs<E = SystemEnvironment, F = SystemFileSystem, L = SystemLauncher> {
    profile: PlatformProfile,
    settings: EmacsSettings,
    state: AccessorState,
    env: E,
    fs: F,
    launcher: L,
}

impl Emacs {
    /// An accessor for the current platform that talks to the real system.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::with_primitives(
            PlatformProfile::current(),
            EmacsSettings::from(config),
            SystemEnvironment,
            SystemFileSystem,
            SystemLauncher,
        )
    }
}

impl<E, F, L> Emacs<E, F, L>
where
    E: EnvironmentLookup,
    F: FileSystemProbe,
    L: ProcessLauncher,
{
    /// An accessor built on the given primitives. It is uninstalled until the first
    /// [`SourceCodeAccessor::refresh_availability`].
    pub fn with_primitives(
        profile: PlatformProfile,
        settings: EmacsSettings,
        env: E,
        fs: F,
        launcher: L,
    ) -> Self {
        Self {
            profile,
            settings,
            state: AccessorState::uninstalled(),
            env,
            fs,
            launcher,
        }
    }

    /// The installation found by the last refresh.
    pub const fn state(&self) -> &AccessorState {
        &self.state
    }

    /// Evaluate `expression` in the running Emacs server and wait for the answer, at most for
    /// the configured timeout. Returns whether the round trip succeeded along with the trimmed
    /// output, which may be partial if it did not.
    pub fn eval(&self, expression: &str) -> (bool, String) {
        if !self.state.is_installed() {
            return (false, String::new());
        }

        let request = InvocationRequest::new()
            .switches(SWITCHES_EVAL)
            .quoted(expression);

        let output = match self.launcher.run_to_completion(
            self.state.client_path(),
            &request,
            self.settings.eval_timeout,
        ) {
            Ok(output) => output,
            Err(error) => {
                warn!("{}", Error::TransportFailure(format!("{error:#}")));
                return (false, String::new());
            }
        };

        let response = output.stdout.trim().to_string();
        let stderr = output.stderr.trim();

        if output.timed_out {
            warn!("{}", Error::EvalTimeout(self.settings.eval_timeout));
        } else if !output.success {
            warn!("{}", Error::TransportFailure(stderr.to_string()));
        }
        debug!(
            success = output.success,
            "Emacs evaluated {expression}: '{response}' '{stderr}'"
        );

        (output.success, response)
    }

    fn find_emacs_directory(&self) -> String {
        get_non_empty_var(&self.env, EMACS_DIR_VAR)
            .unwrap_or_else(|| self.profile.default_directory.to_string())
    }

    fn resolve_installation(&self) -> AccessorState {
        match self.settings.discovery {
            DiscoveryMode::EnvThenPlatformDefault => self.discover_in_directory(),
            DiscoveryMode::FixedPath => self.check_fixed_client(),
        }
    }

    fn discover_in_directory(&self) -> AccessorState {
        let dir = PlatformProfile::normalize_directory(&self.find_emacs_directory());
        if dir.is_empty() || !self.fs.dir_exists(Path::new(&dir)) {
            debug!("Emacs directory '{dir}' does not exist");
            return AccessorState::uninstalled();
        }

        let editor = PathBuf::from(
            self.profile
                .compose_executable_path(&dir, self.profile.editor_file_name),
        );
        let client = PathBuf::from(
            self.profile
                .compose_executable_path(&dir, self.profile.client_file_name),
        );

        if self.fs.file_exists(&editor) && self.fs.file_exists(&client) {
            AccessorState::found(editor, client)
        } else {
            debug!(
                "expected {} and {} in '{dir}'",
                self.profile.editor_file_name, self.profile.client_file_name
            );
            AccessorState::uninstalled()
        }
    }

    fn check_fixed_client(&self) -> AccessorState {
        let client = match &self.settings.fixed_client_path {
            Some(path) => PathBuf::from(self.profile.native_path(&path.to_string_lossy())),
            None => PathBuf::from(self.profile.default_client_path()),
        };

        if client.as_os_str().is_empty() || !self.fs.file_exists(&client) {
            debug!("Emacs client '{}' does not exist", client.display());
            return AccessorState::uninstalled();
        }

        // the client resolves the bare name through PATH
        AccessorState::found(PathBuf::from(self.profile.editor_file_name), client)
    }

    fn compose_launch(&self, rest: InvocationRequest) -> InvocationRequest {
        let flags = self.profile.launch_flags;
        let request = InvocationRequest::new().switches(flags.switches);

        let request = match flags.alternate_editor {
            AlternateEditor::EditorPath => request.literal("-a").path(self.state.editor_path()),
            AlternateEditor::StartDaemon => request.literal("--alternate-editor="),
        };

        request.append(rest)
    }

    fn run_emacs(&self, rest: InvocationRequest, target: &str) -> bool {
        if !self.state.is_installed() {
            return false;
        }

        let request = self.compose_launch(rest);
        debug!("running {} {request}", self.state.client_path().display());

        match self
            .launcher
            .launch_detached(self.state.client_path(), &request)
        {
            LaunchOutcome::Started => true,
            LaunchOutcome::FailedToStart => {
                warn!("{}", Error::LaunchFailure(target.to_string()));
                false
            }
        }
    }

    fn project_file_location(&self) -> Result<PathBuf> {
        let project_file = self
            .settings
            .project_file
            .as_deref()
            .ok_or(Error::ProjectFileNotFound)?;
        self.fs
            .absolutize(project_file)
            .context("resolving project file")
    }
}

impl<E, F, L> SourceCodeAccessor for Emacs<E, F, L>
where
    E: EnvironmentLookup,
    F: FileSystemProbe,
    L: ProcessLauncher,
{
    fn refresh_availability(&mut self) {
        self.state = self.resolve_installation();
        info!(
            installed = self.state.is_installed(),
            client = %self.state.client_path().display(),
            "refreshed Emacs availability"
        );
    }

    fn can_access_source_code(&self) -> bool {
        self.state.is_installed()
    }

    fn get_identifier(&self) -> Text {
        IDENTIFIER
    }

    fn get_display_name(&self) -> Text {
        DISPLAY_NAME
    }

    fn get_description(&self) -> Text {
        DESCRIPTION
    }

    fn installation(&self) -> Option<&AccessorState> {
        Some(&self.state)
    }

    fn open_solution(&self) -> bool {
        if !self.state.is_installed() {
            return false;
        }

        match self.project_file_location() {
            Ok(project_file) => self.open_solution_at_path(&project_file),
            Err(error) => {
                warn!("could not open solution: {error:#}");
                false
            }
        }
    }

    fn open_solution_at_path(&self, path: &Path) -> bool {
        let rest = InvocationRequest::new().path(path);
        self.run_emacs(rest, &format!("solution '{}'", path.display()))
    }

    fn does_solution_exist(&self) -> bool {
        self.project_file_location()
            .is_ok_and(|project_file| self.fs.file_exists(&project_file))
    }

    fn open_file_at_line(&self, path: &Path, line: u32, column: Option<u32>) -> bool {
        let rest = InvocationRequest::new()
            .position(line, column.unwrap_or(0))
            .path(path);
        self.run_emacs(rest, &format!("file '{}'", path.display()))
    }

    fn open_source_files(&self, paths: &[PathBuf]) -> bool {
        let rest = paths
            .iter()
            .fold(InvocationRequest::new(), |request, path| request.path(path));
        if rest.is_empty() {
            debug!("no source files to open");
            return false;
        }
        let target = format!("source files {rest}");
        self.run_emacs(rest, &target)
    }

    fn save_all_open_documents(&self) -> bool {
        match self.settings.save_all {
            SaveAllStrategy::Disabled => false,
            SaveAllStrategy::Eval => {
                let (success, response) = self.eval(&self.settings.save_all_expression);
                info!(success, "asked Emacs to save all open documents: '{response}'");
                success
            }
        }
    }
}
