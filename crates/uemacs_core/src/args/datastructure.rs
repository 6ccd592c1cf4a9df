use std::path::PathBuf;

/// The parsed command line.
#[derive(Debug, PartialEq, Eq)]
pub struct Arguments {
    /// Identifier of the accessor to use instead of the configured one.
    pub accessor: Option<String>,
    /// Project descriptor to use instead of the configured or discovered one.
    pub project: Option<PathBuf>,
    /// What to do.
    pub subcommand: Subcommand,
}

/// One variant per subcommand.
#[derive(Debug, PartialEq, Eq)]
pub enum Subcommand {
    /// Open a file at a line and column.
    Goto(File, Line, Column),
    /// List all known accessors.
    List,
    /// Open files in one invocation.
    Open(Files),
    /// Save all open documents.
    Save,
    /// Open the current project, or the given project descriptor.
    Solution(Option<PathBuf>),
    /// Show what the accessor found.
    Status(Json),
    /// Show version info.
    Version,
}

/// A single file argument.
#[derive(Debug, PartialEq, Eq)]
pub struct File(pub PathBuf);

/// Several file arguments, in the order they were given.
#[derive(Debug, PartialEq, Eq)]
pub struct Files(pub Vec<PathBuf>);

/// 1-based line number.
#[derive(Debug, PartialEq, Eq)]
pub struct Line(pub u32);

/// Column number, 0 if not given.
#[derive(Debug, PartialEq, Eq)]
pub struct Column(pub Option<u32>);

/// Print machine-readable output.
#[derive(Debug, PartialEq, Eq)]
pub struct Json(pub bool);
