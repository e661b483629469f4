use super::symbols::{BinaryOp, Function, UnaryOp};
use num_complex::Complex64;

/// Expression tree produced by the parser. Each node owns its children, and
/// no branch is deeper than [`MAX_DEPTH`](super::parser::MAX_DEPTH).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Complex64),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Call {
        function: Function,
        args: Vec<Expr>,
    },
}

