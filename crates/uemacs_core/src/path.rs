/*!
All functions related to paths: `uemacs`'s own config location, probing the filesystem for
an installation and finding the project descriptor of the host.
*/

use std::env;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use path_absolutize::Absolutize;
use walkdir::WalkDir;

const CONFIG_FILE_NAME: &str = "uemacs.yaml";
const PROJECT_FILE_EXTENSION: &str = "uproject";

/// Read-only questions about the filesystem.
pub trait FileSystemProbe: Debug {
    /// Whether `path` exists and is a directory.
    fn dir_exists(&self, path: &Path) -> bool;

    /// Whether `path` exists and is a regular file.
    fn file_exists(&self, path: &Path) -> bool;

    /// Turn `path` into an absolute path without touching the filesystem.
    ///
    /// # Errors
    ///
    /// This function returns an error if the current directory cannot be determined.
    fn absolutize(&self, path: &Path) -> Result<PathBuf>;
}

/// [`FileSystemProbe`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFileSystem;

impl FileSystemProbe for SystemFileSystem {
    fn dir_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn absolutize(&self, path: &Path) -> Result<PathBuf> {
        Ok(path
            .absolutize()
            .with_context(|| format!("absolutizing {}", path.display()))?
            .into_owned())
    }
}

/// Get the path to the uemacs config file. This is `$XDG_CONFIG_HOME/uemacs/uemacs.yaml`.
///
/// # Errors
///
/// This function returns an error if both `$XDG_CONFIG_HOME` and `$HOME` are undefined.
pub fn get_config_path() -> Result<PathBuf> {
    let mut file = get_uemacs_base_dir().context("getting uemacs base dir for config file")?;
    file.push(CONFIG_FILE_NAME);
    Ok(file)
}

pub(crate) fn get_uemacs_base_dir() -> Result<PathBuf> {
    let mut dir = get_xdg_config_home().context("getting XDG_CONFIG_HOME")?;
    dir.push("uemacs");
    Ok(dir)
}

fn get_xdg_config_home() -> Result<PathBuf> {
    match env::var("XDG_CONFIG_HOME") {
        Ok(config) if !config.is_empty() => Ok(config.into()),
        _ => {
            let mut config = get_home_dir().context("falling back to $HOME/.config")?;
            config.push(".config");
            Ok(config)
        }
    }
}

pub(crate) fn get_home_dir() -> Result<PathBuf> {
    Ok(env::var("HOME").context("getting $HOME variable")?.into())
}

/// Find the project descriptor (`*.uproject`) directly inside `dir`. If there are several,
/// the first one by file name is returned.
pub(crate) fn find_project_file(dir: &Path) -> Option<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .find(|path| {
            path.extension()
                .is_some_and(|extension| extension == PROJECT_FILE_EXTENSION)
        })
}

/// For each file argument, return the absolute path to the file.
pub(crate) fn get_absolutized_file_paths(files: &[PathBuf]) -> Result<Vec<PathBuf>> {
    files
        .iter()
        .map(|file| SystemFileSystem.absolutize(file))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs::{create_dir, File};

    use super::*;

    #[test]
    fn finds_project_file_in_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        File::create(dir.path().join("README.md")).expect("create file");
        File::create(dir.path().join("Shooter.uproject")).expect("create file");
        File::create(dir.path().join("Arena.uproject")).expect("create file");

        let found = find_project_file(dir.path());

        assert_eq!(found, Some(dir.path().join("Arena.uproject")));
    }

    #[test]
    fn ignores_nested_and_directory_matches() {
        let dir = tempfile::tempdir().expect("temp dir");
        create_dir(dir.path().join("Plugins.uproject")).expect("create dir");
        create_dir(dir.path().join("Nested")).expect("create dir");
        File::create(dir.path().join("Nested").join("Inner.uproject")).expect("create file");

        assert_eq!(find_project_file(dir.path()), None);
    }

    #[cfg(unix)]
    #[test]
    fn absolute_paths_stay_untouched() {
        let files = vec![PathBuf::from("/a/b.cpp"), PathBuf::from("/c/../d.h")];
        let absolute = get_absolutized_file_paths(&files).expect("absolutize");
        assert_eq!(absolute[0], PathBuf::from("/a/b.cpp"));
        assert_eq!(absolute[1], PathBuf::from("/d.h"));
    }
}
