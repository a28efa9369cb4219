//! `import` support: read a source file and parse it into an expression
//! sequence ready to be evaluated in the current runtime.
//!
//! Read, then parse, with host failures folded into the same error channel
//! the evaluator already reports through, rather than a bespoke one.

use std::fs;

use log::{debug, error};

use crate::error::EvalError;
use crate::parser::{Expr, Parser};

/// Relative paths resolve from the process working directory; this is
/// exactly what `std::fs::read_to_string` does with a relative `Path`, so
/// no explicit `canonicalize` call is needed here.
pub fn load(path: &str) -> Result<Vec<Expr>, EvalError> {
    debug!("importing '{path}'");
    let source = fs::read_to_string(path).map_err(|e| {
        error!("could not import '{path}': {e}");
        EvalError::Io(format!("could not import '{path}': {e}"))
    })?;
    Parser::new(&source)
        .parse_program()
        .map_err(|e| EvalError::Syntax(e.to_string()))
}
