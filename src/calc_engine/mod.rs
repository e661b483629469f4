//! Expression pipeline: tokenizer → shunting-yard parser → tree evaluator → formatter.
//!
//! Every stage runs to completion before the next one starts, and nothing is
//! carried over between lines.

pub mod ast;
pub mod error;
pub mod eval;
pub mod format;
pub mod parser;
pub mod symbols;
pub mod token;
pub mod trace;

pub use ast::Expr;
pub use error::{CalcError, EvalError, ParseError};
pub use eval::evaluate;
pub use format::{format_compact, format_complex, format_number, format_with_spaces};
pub use parser::{Parser, MAX_DEPTH};
pub use symbols::{Constant, Function};
pub use token::{tokenize, Token, TokenKind};
pub use trace::{EvaluationTrace, Step};

use num_complex::Complex64;
use tracing::debug;

/// Runs one line through the whole pipeline.
pub fn calculate(input: &str, trace: &mut EvaluationTrace) -> Result<Complex64, CalcError> {
    let tokens = tokenize(input);
    let tree = Parser::new(tokens).parse().map_err(|e| {
        debug!(input, error = %e, "parse failed");
        e
    })?;
    let value = evaluate(tree, trace).map_err(|e| {
        debug!(input, error = %e, "evaluation failed");
        e
    })?;
    debug!(input, result = %value, "evaluated");
    Ok(value)
}

pub fn evaluate_line(input: &str) -> Result<String, CalcError> {
    let mut trace = EvaluationTrace::new(false);
    calculate(input, &mut trace).map(format_complex)
}

/// Splits a `details` request off an input line, as in `details 2+2` or
/// `2+2 details`.
pub fn split_details(input: &str) -> (bool, &str) {
    let lower = input.to_ascii_lowercase();
    if lower.starts_with("details ") {
        (true, input[8..].trim())
    } else if lower.ends_with(" details") {
        (true, input[..input.len() - 8].trim())
    } else if lower == "details" {
        (true, "")
    } else {
        (false, input)
    }
}
