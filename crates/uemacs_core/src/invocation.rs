use std::fmt::Display;
use std::path::Path;

use crate::accessor::Switches;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// A flag or other text that is passed as is.
    Literal(String),
    /// A single argument that is shell-quoted when rendered.
    Quoted(String),
    /// `+<line>:<column>`
    Position { line: u32, column: u32 },
}

impl Token {
    fn render(&self) -> String {
        match self {
            Self::Literal(text) => text.clone(),
            Self::Quoted(arg) => shell_quote(arg),
            Self::Position { line, column } => format!("+{line}:{column}"),
        }
    }

    fn to_arg(&self) -> Option<String> {
        match self {
            Self::Literal(text) => Some(text.trim())
                .filter(|text| !text.is_empty())
                .map(str::to_string),
            Self::Quoted(arg) => Some(arg.clone()),
            Self::Position { .. } => Some(self.render()),
        }
    }
}

/// Wrap `arg` in double quotes.
fn shell_quote(arg: &str) -> String {
    format!("\"{arg}\"")
}

/// An ordered list of argument tokens that together form one process invocation.
///
/// [`InvocationRequest::render`] gives the shell-level string (what a user would type), while
/// [`InvocationRequest::args`] gives the argument vector that is actually passed to the
/// process, with quoting left to the OS layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationRequest {
    tokens: Vec<Token>,
}

impl InvocationRequest {
    /// An empty invocation.
    #[must_use]
    pub const fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Append a flag that is passed as is.
    #[must_use]
    pub fn literal<S>(mut self, text: S) -> Self
    where
        S: Into<String>,
    {
        self.tokens.push(Token::Literal(text.into()));
        self
    }

    /// Append every switch as a literal.
    #[must_use]
    pub fn switches(self, switches: Switches) -> Self {
        switches.iter().fold(self, |request, s| request.literal(*s))
    }

    /// Append a single argument that is shell-quoted when rendered.
    #[must_use]
    pub fn quoted<S>(mut self, arg: S) -> Self
    where
        S: Into<String>,
    {
        self.tokens.push(Token::Quoted(arg.into()));
        self
    }

    /// Append a path as a single quoted argument.
    #[must_use]
    pub fn path(self, path: &Path) -> Self {
        self.quoted(path.to_string_lossy())
    }

    /// Append a `+<line>:<column>` directive.
    #[must_use]
    pub fn position(mut self, line: u32, column: u32) -> Self {
        self.tokens.push(Token::Position { line, column });
        self
    }

    /// Append all tokens of `other`.
    #[must_use]
    pub fn append(mut self, other: Self) -> Self {
        self.tokens.extend(other.tokens);
        self
    }

    /// Whether there are no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The shell-level string: all tokens separated by single spaces, trimmed.
    #[must_use]
    pub fn render(&self) -> String {
        self.tokens
            .iter()
            .map(Token::render)
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }

    /// The argument vector for the process. Quoted tokens lose their quotes, literals are
    /// trimmed and empty literals dropped.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        self.tokens.iter().filter_map(Token::to_arg).collect()
    }
}

impl Display for InvocationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn render_quotes_paths_and_formats_position() {
        let request = InvocationRequest::new()
            .position(42, 7)
            .path(&PathBuf::from("/a/b.cpp"));

        assert_eq!(request.render(), "+42:7 \"/a/b.cpp\"");
        assert_eq!(request.args(), vec!["+42:7", "/a/b.cpp"]);
    }

    #[test]
    fn paths_with_spaces_stay_one_argument() {
        let request = InvocationRequest::new()
            .switches(&["-q", "-n"])
            .path(Path::new("/home/me/My Game/My Game.uproject"));

        assert_eq!(
            request.render(),
            "-q -n \"/home/me/My Game/My Game.uproject\""
        );
        assert_eq!(
            request.args(),
            vec!["-q", "-n", "/home/me/My Game/My Game.uproject"]
        );
    }

    #[test]
    fn incidental_whitespace_is_trimmed() {
        let request = InvocationRequest::new().literal("  ").literal("--eval ");
        assert_eq!(request.render(), "--eval");
        assert_eq!(request.args(), vec!["--eval"]);
    }

    #[test]
    fn empty_request_renders_empty() {
        let request = InvocationRequest::new();
        assert!(request.is_empty());
        assert_eq!(request.render(), "");
        assert!(request.args().is_empty());
    }
}
