//! Error taxonomy for the lexer, parser and evaluator.
//!
//! Every variant here is fatal once it reaches `main`: there is no recovery
//! path visible to a running program, only `break`, which is ordinary
//! control flow rather than an error. Internal code still returns
//! `Result` so unit tests can assert on a value instead of observing a
//! process exit; only `Interpreter::run` and `main` convert an `Err` into
//! the required print-to-stdout-and-exit behaviour.

use std::fmt::{self, Display};

/// Position of a token or error in the source file.
pub type Position = (usize, usize);

/// A parse-time syntax error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub position: Position,
    pub lexeme: String,
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SyntaxError:{}:{}: unexpected token value '{}'",
            self.position.0, self.position.1, self.lexeme
        )
    }
}

impl std::error::Error for SyntaxError {}

/// An empty-body error, raised for `block`/`for`/`if` bodies that must be
/// non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyBodyError {
    pub position: Position,
    pub what: &'static str,
}

impl Display for EmptyBodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SyntaxError:{}:{}: {} body is empty",
            self.position.0, self.position.1, self.what
        )
    }
}

impl std::error::Error for EmptyBodyError {}

/// Everything the parser can fail with: a specific message for empty
/// bodies alongside the generic unexpected-token form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Syntax(SyntaxError),
    EmptyBody(EmptyBodyError),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Syntax(e) => Display::fmt(e, f),
            ParseError::EmptyBody(e) => Display::fmt(e, f),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<SyntaxError> for ParseError {
    fn from(e: SyntaxError) -> Self {
        ParseError::Syntax(e)
    }
}

impl From<EmptyBodyError> for ParseError {
    fn from(e: EmptyBodyError) -> Self {
        ParseError::EmptyBody(e)
    }
}

/// Every runtime (evaluator) failure mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// `TypeError: <op> expected type <kind>`
    Type { op: &'static str, expected: &'static str },
    /// `Error: '<op>' expected more than <n> element(s) in stack.`
    Arity { op: &'static str, need: usize },
    UndefinedVariable(String),
    UndefinedBlock(String),
    IndexOutOfRange,
    BlockRedefined(String),
    DivisionByZero,
    Io(String),
    /// A syntax error surfacing from a file pulled in via `import` (spec
    /// §4.4); carries the already-formatted `SyntaxError` text.
    Syntax(String),
}

impl Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Type { op, expected } => {
                write!(f, "TypeError: '{op}' expected type {expected}")
            }
            EvalError::Arity { op, need } => write!(
                f,
                "Error: '{op}' expected more than {need} element(s) in stack."
            ),
            EvalError::UndefinedVariable(name) => {
                write!(f, "Error: undefined variable '{name}'")
            }
            EvalError::UndefinedBlock(name) => write!(f, "Error: undefined block '{name}'"),
            EvalError::IndexOutOfRange => write!(f, "Error: index out of range"),
            EvalError::BlockRedefined(name) => {
                write!(f, "Error: block '{name}' is already defined")
            }
            EvalError::DivisionByZero => write!(f, "Error: division by zero"),
            EvalError::Io(message) => write!(f, "Error: {message}"),
            EvalError::Syntax(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for EvalError {}
