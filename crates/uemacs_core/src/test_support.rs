//! In-memory stand-ins for the platform primitives.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use anyhow::{bail, Result};

use crate::cmd::{ExecOutput, LaunchOutcome, ProcessLauncher};
use crate::env::EnvironmentLookup;
use crate::invocation::InvocationRequest;
use crate::path::FileSystemProbe;

#[derive(Debug, Default)]
pub(crate) struct FakeEnvironment {
    vars: HashMap<String, String>,
}

impl FakeEnvironment {
    pub(crate) fn with(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl EnvironmentLookup for FakeEnvironment {
    fn get_var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Relative paths are resolved against `/work`.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeFileSystem {
    dirs: Rc<RefCell<HashSet<PathBuf>>>,
    files: Rc<RefCell<HashSet<PathBuf>>>,
    probes: Rc<RefCell<usize>>,
}

impl FakeFileSystem {
    pub(crate) fn with_dir(self, dir: &str) -> Self {
        self.dirs.borrow_mut().insert(PathBuf::from(dir));
        self
    }

    pub(crate) fn with_file(self, file: &str) -> Self {
        self.files.borrow_mut().insert(PathBuf::from(file));
        self
    }

    pub(crate) fn remove_file(&self, file: &str) {
        self.files.borrow_mut().remove(Path::new(file));
    }

    pub(crate) fn probe_count(&self) -> usize {
        *self.probes.borrow()
    }
}

impl FileSystemProbe for FakeFileSystem {
    fn dir_exists(&self, path: &Path) -> bool {
        *self.probes.borrow_mut() += 1;
        self.dirs.borrow().contains(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        *self.probes.borrow_mut() += 1;
        self.files.borrow().contains(path)
    }

    fn absolutize(&self, path: &Path) -> Result<PathBuf> {
        if path.is_absolute() || path.starts_with("/") {
            Ok(path.to_path_buf())
        } else {
            Ok(Path::new("/work").join(path))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedCall {
    pub(crate) program: PathBuf,
    pub(crate) rendered: String,
    pub(crate) args: Vec<String>,
    pub(crate) timeout: Option<Duration>,
}

/// Records every call. Clones share the record.
#[derive(Debug, Clone)]
pub(crate) struct FakeLauncher {
    calls: Rc<RefCell<Vec<RecordedCall>>>,
    outcome: LaunchOutcome,
    eval_output: Option<ExecOutput>,
}

impl Default for FakeLauncher {
    fn default() -> Self {
        Self {
            calls: Rc::default(),
            outcome: LaunchOutcome::Started,
            eval_output: None,
        }
    }
}

impl FakeLauncher {
    pub(crate) fn failing() -> Self {
        Self {
            outcome: LaunchOutcome::FailedToStart,
            ..Self::default()
        }
    }

    pub(crate) fn answering(output: ExecOutput) -> Self {
        Self {
            eval_output: Some(output),
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, program: &Path, request: &InvocationRequest, timeout: Option<Duration>) {
        self.calls.borrow_mut().push(RecordedCall {
            program: program.to_path_buf(),
            rendered: request.render(),
            args: request.args(),
            timeout,
        });
    }
}

impl ProcessLauncher for FakeLauncher {
    fn launch_detached(&self, program: &Path, request: &InvocationRequest) -> LaunchOutcome {
        self.record(program, request, None);
        self.outcome
    }

    fn run_to_completion(
        &self,
        program: &Path,
        request: &InvocationRequest,
        timeout: Duration,
    ) -> Result<ExecOutput> {
        self.record(program, request, Some(timeout));
        match &self.eval_output {
            Some(output) => Ok(output.clone()),
            None => bail!("no Emacs server to talk to"),
        }
    }
}
