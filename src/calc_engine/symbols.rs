use num_complex::Complex64;
use std::f64::consts::{E, PI};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl BinaryOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Sub),
            "*" => Some(BinaryOp::Mul),
            "/" => Some(BinaryOp::Div),
            "%" => Some(BinaryOp::Rem),
            "^" => Some(BinaryOp::Pow),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Pow => "^",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
        }
    }
}

/// Anything that can sit on the parser's operator stack and compete on
/// precedence. Unary forms never share a variant with the binary ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Binary(BinaryOp),
    Unary(UnaryOp),
}

impl Operator {
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Binary(BinaryOp::Add | BinaryOp::Sub) => 1,
            Operator::Binary(BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem) => 2,
            Operator::Binary(BinaryOp::Pow) => 3,
            Operator::Unary(_) => 4,
        }
    }

    pub fn associativity(self) -> Associativity {
        match self {
            Operator::Binary(BinaryOp::Pow) | Operator::Unary(_) => Associativity::Right,
            Operator::Binary(_) => Associativity::Left,
        }
    }

    /// Whether `top`, already on the stack, must be applied before `self` is pushed.
    pub fn yields_to(self, top: Operator) -> bool {
        match self.associativity() {
            Associativity::Left => self.precedence() <= top.precedence(),
            Associativity::Right => self.precedence() < top.precedence(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Binary(op) => write!(f, "{}", op.symbol()),
            Operator::Unary(op) => write!(f, "unary {}", op.symbol()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Csc,
    Log,
    Rt,
}

impl Function {
    pub const ALL: [Function; 8] = [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Cot,
        Function::Sec,
        Function::Csc,
        Function::Log,
        Function::Rt,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Function::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Cot => "cot",
            Function::Sec => "sec",
            Function::Csc => "csc",
            Function::Log => "log",
            Function::Rt => "rt",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Function::Log | Function::Rt => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub const ALL: [Constant; 2] = [Constant::Pi, Constant::E];

    pub fn from_name(name: &str) -> Option<Self> {
        Constant::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "e",
        }
    }

    pub fn value(self) -> Complex64 {
        match self {
            Constant::Pi => Complex64::new(PI, 0.0),
            Constant::E => Complex64::new(E, 0.0),
        }
    }
}
