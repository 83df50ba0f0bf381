//! Source code representation and error management.

use console::style;
use std::{cell::RefCell, fmt};

/// Represents source code.
pub struct Source<'a> {
    /// Original source code.
    pub content: &'a str,
    /// Accumulated errors.
    pub errors: ErrorReporter,
}

impl<'a> Source<'a> {
    /// Create a new `Source` with the specified `content`.
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            errors: ErrorReporter::new(),
        }
    }

    /// Returns `true` if `Source` has no accumulated errors. Returns `false` otherwise.
    pub fn has_no_errors(&self) -> bool {
        self.errors.errors.borrow().len() == 0
    }
}

impl<'a> Into<Source<'a>> for &'a str {
    fn into(self) -> Source<'a> {
        Source::new(self)
    }
}

/// A position in source text.
/// `line` is 1-based; `col` is the 0-based byte offset from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// The category of a [`CompileError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An unrecognized character sequence.
    Lexical,
    /// An expected-token mismatch.
    Syntax,
    /// No command signature matches a call site.
    UnresolvedCall,
    /// A call name matched a signature but the argument shape did not.
    ArityOrTypeMismatch,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Lexical => "lexical error",
            ErrorKind::Syntax => "syntax error",
            ErrorKind::UnresolvedCall => "unresolved call",
            ErrorKind::ArityOrTypeMismatch => "arity or type mismatch",
        };
        write!(f, "{}", label)
    }
}

/// Represents a compile time error.
#[derive(Debug, Clone)]
pub struct CompileError {
    kind: ErrorKind,
    message: String,
    pos: Option<Position>,
}

impl CompileError {
    /// Create a new error with the specified `kind`, `message` and optional position.
    pub fn new(kind: ErrorKind, message: impl ToString, pos: Option<Position>) -> Self {
        Self {
            kind,
            message: message.to_string(),
            pos,
        }
    }

    pub fn lexical(message: impl ToString, pos: Position) -> Self {
        Self::new(ErrorKind::Lexical, message, Some(pos))
    }

    pub fn syntax(message: impl ToString, pos: Position) -> Self {
        Self::new(ErrorKind::Syntax, message, Some(pos))
    }

    pub fn unresolved_call(message: impl ToString) -> Self {
        Self::new(ErrorKind::UnresolvedCall, message, None)
    }

    pub fn mismatch(message: impl ToString) -> Self {
        Self::new(ErrorKind::ArityOrTypeMismatch, message, None)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn pos(&self) -> Option<Position> {
        self.pos
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(pos) = self.pos {
            write!(f, " at {}", pos)?;
        }
        Ok(())
    }
}

/// Manages all the errors.
pub struct ErrorReporter {
    errors: RefCell<Vec<CompileError>>,
}

impl ErrorReporter {
    /// Create an empty `ErrorReporter`.
    pub fn new() -> Self {
        Self {
            errors: RefCell::new(Vec::new()),
        }
    }

    /// Adds an error to the `ErrorReporter`.
    /// This method uses the interior mutability pattern. This does not require mutability for ergonomics.
    pub fn add_error(&self, error: CompileError) {
        // This should be the only place where self.errors is borrowed mutably.
        self.errors.borrow_mut().push(error);
    }

    /// Returns a clone of the accumulated errors.
    pub fn to_vec(&self) -> Vec<CompileError> {
        self.errors.borrow().clone()
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ErrorReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.errors.borrow();
        for error in errors.iter() {
            writeln!(f, "{} {}", style("error:").red().bold(), error)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_accumulate() {
        let source = Source::new("let x = 1;");
        assert!(source.has_no_errors());

        source.errors.add_error(CompileError::syntax(
            "expected `;`, found `}`",
            Position { line: 2, col: 4 },
        ));
        assert!(!source.has_no_errors());

        let errors = source.errors.to_vec();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind(), ErrorKind::Syntax);
        assert_eq!(errors[0].pos(), Some(Position { line: 2, col: 4 }));
    }

    #[test]
    fn display_includes_position() {
        let error = CompileError::syntax("expected `=`, found `5`", Position { line: 1, col: 6 });
        assert_eq!(
            error.to_string(),
            "syntax error: expected `=`, found `5` at 1:6"
        );
    }

    #[test]
    fn display_without_position() {
        let error = CompileError::unresolved_call("no global command matches `foo`");
        assert_eq!(
            error.to_string(),
            "unresolved call: no global command matches `foo`"
        );
    }
}
