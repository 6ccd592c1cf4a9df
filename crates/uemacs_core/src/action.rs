use uemacs_macros::Action;

/// All main actions the program can perform. Variants of the enum relate to
/// the different subcommands.
#[derive(Debug, Action)]
pub enum Actions {
    Goto,
    List,
    Open,
    Save,
    Solution,
    Status,
    Version,
}
