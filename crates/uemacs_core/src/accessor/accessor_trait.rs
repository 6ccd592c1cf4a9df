use std::fmt::Debug;
use std::path::{Path, PathBuf};

use super::AccessorState;

/// Command line switches passed verbatim.
pub type Switches = &'static [&'static str];
/// Fixed text.
pub type Text = &'static str;

/// The capability a host uses to delegate "open this in an external editor".
///
/// Every operation reports its outcome as a `bool` and never panics. Launch operations return
/// `false` without starting anything while [`SourceCodeAccessor::can_access_source_code`] is
/// `false`, and `true` once the editor process was *started*, not once the editor has done
/// anything.
///
/// Implementations are not synchronized. A host calling into one accessor from several
/// threads must serialize those calls itself.
pub trait SourceCodeAccessor: Debug {
    /// Recompute the installation state from scratch. This is the only operation that probes
    /// the filesystem for the editor, so call it after the environment changed and before
    /// relying on [`SourceCodeAccessor::can_access_source_code`], not on every query.
    fn refresh_availability(&mut self);

    /// Whether the last refresh found a usable installation.
    fn can_access_source_code(&self) -> bool;

    /// Stable identifier of this accessor, under which hosts persist the user's choice.
    fn get_identifier(&self) -> Text;

    /// Human-readable name.
    fn get_display_name(&self) -> Text;

    /// Human-readable description.
    fn get_description(&self) -> Text;

    /// The installation found by the last refresh, if the accessor has such a concept.
    fn installation(&self) -> Option<&AccessorState> {
        None
    }

    /// Open the host's current project descriptor.
    fn open_solution(&self) -> bool;

    /// Open the project descriptor at `path`.
    fn open_solution_at_path(&self, path: &Path) -> bool;

    /// Whether the host's current project descriptor exists.
    fn does_solution_exist(&self) -> bool;

    /// Open `path` with point at `line` and `column`. A missing column means column 0.
    fn open_file_at_line(&self, path: &Path, line: u32, column: Option<u32>) -> bool;

    /// Open all `paths` in one invocation, in order.
    fn open_source_files(&self, paths: &[PathBuf]) -> bool;

    /// Add files to the current project. Editors without a project manifest accept this
    /// without doing anything.
    fn add_source_files(&self, _paths: &[PathBuf], _available_modules: &[String]) -> bool {
        true
    }

    /// Save all open documents that need saving.
    fn save_all_open_documents(&self) -> bool;

    /// Called periodically by hosts with a polling loop.
    fn tick(&mut self, _delta_seconds: f32) {}
}
