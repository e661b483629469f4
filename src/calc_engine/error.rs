use super::symbols::{Function, Operator};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("missing opening parenthesis")]
    UnmatchedRightParen,
    #[error("missing closing parenthesis")]
    UnmatchedLeftParen,
    #[error("comma outside of a function call")]
    MisplacedComma,
    #[error("missing operand for {0}")]
    MissingOperand(Operator),
    #[error("{function} expects {expected} argument(s), found {found}")]
    MissingArguments {
        function: Function,
        expected: usize,
        found: usize,
    },
    #[error("expected a single expression, found {0}")]
    RootCount(usize),
    #[error("expression nests deeper than {0} levels")]
    TooDeep(usize),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo is not supported")]
    UnsupportedModulo,
}

/// The two failure kinds a line can end in.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),
    #[error("evaluation failed: {0}")]
    Evaluation(#[from] EvalError),
}
