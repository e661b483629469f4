use super::ast::Expr;
use super::error::ParseError;
use super::symbols::{BinaryOp, Constant, Function, Operator, UnaryOp};
use super::token::{Token, TokenKind};
use num_complex::Complex64;
use tracing::debug;

/// Deepest tree the parser will build. Evaluation recurses once per level.
pub const MAX_DEPTH: usize = 256;

/// Finished subtree on the output stack, with its height.
#[derive(Debug)]
struct Node {
    expr: Expr,
    depth: usize,
}

impl Node {
    fn leaf(expr: Expr) -> Self {
        Node { expr, depth: 1 }
    }

    fn over(expr: Expr, children: usize) -> Result<Self, ParseError> {
        let depth = children + 1;
        if depth > MAX_DEPTH {
            return Err(ParseError::TooDeep(MAX_DEPTH));
        }
        Ok(Node { expr, depth })
    }
}

/// Entry on the operator stack.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    Operator(Operator),
    Function(Function),
    LeftParen,
}

/// Shunting-yard parser: an output stack of finished subtrees and an
/// operator stack of pending operators, functions and open groups.
pub struct Parser {
    tokens: Vec<Token>,
    output: Vec<Node>,
    ops: Vec<Pending>,
    expect_operand: bool,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            output: Vec::new(),
            ops: Vec::new(),
            expect_operand: true,
        }
    }

    pub fn parse(mut self) -> Result<Expr, ParseError> {
        let tokens = std::mem::take(&mut self.tokens);
        debug!(tokens = tokens.len(), "parsing");

        for token in tokens {
            match token.kind {
                TokenKind::Number => {
                    let value = parse_number(&token)?;
                    self.output.push(Node::leaf(Expr::Literal(value)));
                    self.expect_operand = false;
                }
                TokenKind::Identifier => {
                    if let Some(constant) = Constant::from_name(&token.text) {
                        self.output.push(Node::leaf(Expr::Literal(constant.value())));
                        self.expect_operand = false;
                    } else if let Some(function) = Function::from_name(&token.text) {
                        self.ops.push(Pending::Function(function));
                        self.expect_operand = true;
                    } else {
                        return Err(ParseError::UnknownIdentifier(token.text));
                    }
                }
                TokenKind::Operator => {
                    let incoming = self.classify_operator(&token.text)?;
                    while let Some(Pending::Operator(top)) = self.ops.last().copied() {
                        if !incoming.yields_to(top) {
                            break;
                        }
                        self.ops.pop();
                        self.apply_operator(top)?;
                    }
                    self.ops.push(Pending::Operator(incoming));
                    self.expect_operand = true;
                }
                TokenKind::LeftParen => {
                    self.ops.push(Pending::LeftParen);
                    self.expect_operand = true;
                }
                TokenKind::RightParen => {
                    loop {
                        match self.ops.pop() {
                            None => return Err(ParseError::UnmatchedRightParen),
                            Some(Pending::LeftParen) => break,
                            Some(entry) => self.apply(entry)?,
                        }
                    }
                    if let Some(Pending::Function(function)) = self.ops.last().copied() {
                        self.ops.pop();
                        self.apply_function(function)?;
                    }
                    self.expect_operand = false;
                }
                TokenKind::Comma => {
                    loop {
                        match self.ops.last().copied() {
                            None => return Err(ParseError::MisplacedComma),
                            Some(Pending::LeftParen) => break,
                            Some(entry) => {
                                self.ops.pop();
                                self.apply(entry)?;
                            }
                        }
                    }
                    self.expect_operand = true;
                }
                TokenKind::End => break,
            }
        }

        while let Some(entry) = self.ops.pop() {
            self.apply(entry)?;
        }

        if self.output.len() != 1 {
            return Err(ParseError::RootCount(self.output.len()));
        }
        let root = self.output.pop().ok_or(ParseError::RootCount(0))?;
        debug!(depth = root.depth, "parsed expression tree");
        Ok(root.expr)
    }

    // `+`/`-` where an operand is expected become the unary forms.
    fn classify_operator(&self, symbol: &str) -> Result<Operator, ParseError> {
        let op = BinaryOp::from_symbol(symbol)
            .ok_or_else(|| ParseError::UnknownIdentifier(symbol.to_string()))?;
        Ok(match op {
            BinaryOp::Add if self.expect_operand => Operator::Unary(UnaryOp::Plus),
            BinaryOp::Sub if self.expect_operand => Operator::Unary(UnaryOp::Minus),
            _ => Operator::Binary(op),
        })
    }

    fn apply(&mut self, entry: Pending) -> Result<(), ParseError> {
        match entry {
            Pending::Operator(op) => self.apply_operator(op),
            Pending::Function(function) => self.apply_function(function),
            Pending::LeftParen => Err(ParseError::UnmatchedLeftParen),
        }
    }

    fn apply_operator(&mut self, op: Operator) -> Result<(), ParseError> {
        let node = match op {
            Operator::Binary(bin) => {
                if self.output.len() < 2 {
                    return Err(ParseError::MissingOperand(op));
                }
                let rhs = self.output.pop().ok_or(ParseError::MissingOperand(op))?;
                let lhs = self.output.pop().ok_or(ParseError::MissingOperand(op))?;
                let expr = Expr::Binary {
                    op: bin,
                    lhs: Box::new(lhs.expr),
                    rhs: Box::new(rhs.expr),
                };
                Node::over(expr, lhs.depth.max(rhs.depth))?
            }
            Operator::Unary(un) => {
                let operand = self.output.pop().ok_or(ParseError::MissingOperand(op))?;
                let expr = Expr::Unary {
                    op: un,
                    operand: Box::new(operand.expr),
                };
                Node::over(expr, operand.depth)?
            }
        };
        self.output.push(node);
        Ok(())
    }

    fn apply_function(&mut self, function: Function) -> Result<(), ParseError> {
        let expected = function.arity();
        let found = self.output.len();
        if found < expected {
            return Err(ParseError::MissingArguments {
                function,
                expected,
                found,
            });
        }
        let args = self.output.split_off(found - expected);
        let children = args.iter().map(|arg| arg.depth).max().unwrap_or(0);
        let args = args.into_iter().map(|arg| arg.expr).collect();
        let node = Node::over(Expr::Call { function, args }, children)?;
        self.output.push(node);
        Ok(())
    }
}

/// Reads the longest valid decimal prefix of a numeric run, so `1.2.3` is
/// `1.2`. A run with no digits before its second dot (`.`, `.i`) is rejected.
fn parse_number(token: &Token) -> Result<Complex64, ParseError> {
    let digits = token.text.strip_suffix('i').unwrap_or(&token.text);
    let digits = match digits.match_indices('.').nth(1) {
        Some((second_dot, _)) => &digits[..second_dot],
        None => digits,
    };
    let magnitude = digits
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber(token.text.clone()))?;
    Ok(if token.is_imaginary() {
        Complex64::new(0.0, magnitude)
    } else {
        Complex64::new(magnitude, 0.0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc_engine::token::tokenize;

    fn parse(input: &str) -> Result<Expr, ParseError> {
        Parser::new(tokenize(input)).parse()
    }

    fn lit(re: f64) -> Box<Expr> {
        Box::new(Expr::Literal(Complex64::new(re, 0.0)))
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expected = Expr::Binary {
            op: BinaryOp::Add,
            lhs: lit(2.0),
            rhs: Box::new(Expr::Binary {
                op: BinaryOp::Mul,
                lhs: lit(3.0),
                rhs: lit(4.0),
            }),
        };
        assert_eq!(parse("2+3*4"), Ok(expected));
    }

    #[test]
    fn subtraction_groups_left() {
        let expected = Expr::Binary {
            op: BinaryOp::Sub,
            lhs: Box::new(Expr::Binary {
                op: BinaryOp::Sub,
                lhs: lit(7.0),
                rhs: lit(3.0),
            }),
            rhs: lit(1.0),
        };
        assert_eq!(parse("7-3-1"), Ok(expected));
    }

    #[test]
    fn power_groups_right() {
        let expected = Expr::Binary {
            op: BinaryOp::Pow,
            lhs: lit(2.0),
            rhs: Box::new(Expr::Binary {
                op: BinaryOp::Pow,
                lhs: lit(3.0),
                rhs: lit(2.0),
            }),
        };
        assert_eq!(parse("2^3^2"), Ok(expected));
    }

    #[test]
    fn leading_sign_is_unary() {
        let expected = Expr::Binary {
            op: BinaryOp::Add,
            lhs: Box::new(Expr::Unary {
                op: UnaryOp::Minus,
                operand: lit(3.0),
            }),
            rhs: lit(4.0),
        };
        assert_eq!(parse("-3+4"), Ok(expected));
    }

    #[test]
    fn stacked_unary_signs_nest() {
        let expected = Expr::Unary {
            op: UnaryOp::Minus,
            operand: Box::new(Expr::Unary {
                op: UnaryOp::Plus,
                operand: lit(3.0),
            }),
        };
        assert_eq!(parse("-+3"), Ok(expected));
    }

    #[test]
    fn unary_minus_applies_before_power() {
        let expected = Expr::Binary {
            op: BinaryOp::Pow,
            lhs: Box::new(Expr::Unary {
                op: UnaryOp::Minus,
                operand: lit(2.0),
            }),
            rhs: lit(2.0),
        };
        assert_eq!(parse("-2^2"), Ok(expected));
    }

    #[test]
    fn call_arguments_keep_source_order() {
        let expected = Expr::Call {
            function: Function::Log,
            args: vec![*lit(2.0), *lit(8.0)],
        };
        assert_eq!(parse("log(2, 8)"), Ok(expected));
    }

    #[test]
    fn nested_calls_bind_to_their_own_parens() {
        let tree = parse("rt(2, sin(0) + 4)").unwrap();
        let Expr::Call { function, args } = tree else {
            panic!("expected a call, got {tree:?}");
        };
        assert_eq!(function, Function::Rt);
        assert_eq!(args.len(), 2);
        assert!(matches!(args[1], Expr::Binary { op: BinaryOp::Add, .. }));
    }

    #[test]
    fn function_without_parens_is_applied_on_drain() {
        let expected = Expr::Call {
            function: Function::Sin,
            args: vec![*lit(0.0)],
        };
        assert_eq!(parse("sin 0"), Ok(expected));
    }

    #[test]
    fn constants_and_imaginary_literals() {
        assert_eq!(parse("pi"), Ok(Expr::Literal(Constant::Pi.value())));
        assert_eq!(parse("4i"), Ok(Expr::Literal(Complex64::new(0.0, 4.0))));
    }

    #[test]
    fn unknown_identifier_fails() {
        assert_eq!(parse("foo(1)"), Err(ParseError::UnknownIdentifier("foo".into())));
        assert_eq!(parse("i"), Err(ParseError::UnknownIdentifier("i".into())));
    }

    #[test]
    fn unmatched_parentheses_fail() {
        assert_eq!(parse("(1+2"), Err(ParseError::UnmatchedLeftParen));
        assert_eq!(parse("1+2)"), Err(ParseError::UnmatchedRightParen));
        assert_eq!(parse("1, 2"), Err(ParseError::MisplacedComma));
    }

    #[test]
    fn arity_is_enforced() {
        assert_eq!(
            parse("log(8)"),
            Err(ParseError::MissingArguments {
                function: Function::Log,
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn missing_operands_fail() {
        assert_eq!(
            parse("2*"),
            Err(ParseError::MissingOperand(Operator::Binary(BinaryOp::Mul)))
        );
        assert_eq!(
            parse("-"),
            Err(ParseError::MissingOperand(Operator::Unary(UnaryOp::Minus)))
        );
    }

    #[test]
    fn root_count_must_be_one() {
        assert_eq!(parse(""), Err(ParseError::RootCount(0)));
        assert_eq!(parse("2 3"), Err(ParseError::RootCount(2)));
        assert_eq!(parse("(1, 2)"), Err(ParseError::RootCount(2)));
    }

    #[test]
    fn extra_dots_end_the_number() {
        assert_eq!(parse("1.2.3"), Ok(Expr::Literal(Complex64::new(1.2, 0.0))));
        assert_eq!(parse("1.2.3i"), Ok(Expr::Literal(Complex64::new(0.0, 1.2))));
        assert_eq!(parse("5..1"), Ok(Expr::Literal(Complex64::new(5.0, 0.0))));
        assert_eq!(parse(".5"), Ok(Expr::Literal(Complex64::new(0.5, 0.0))));
    }

    #[test]
    fn runs_without_digits_fail() {
        assert_eq!(parse("."), Err(ParseError::InvalidNumber(".".into())));
        assert_eq!(parse(".i"), Err(ParseError::InvalidNumber(".i".into())));
        assert_eq!(parse("..5"), Err(ParseError::InvalidNumber("..5".into())));
    }

    #[test]
    fn depth_is_capped() {
        let deep = format!("{}1", "-".repeat(5000));
        assert_eq!(parse(&deep), Err(ParseError::TooDeep(MAX_DEPTH)));

        let at_limit = format!("{}1", "-".repeat(MAX_DEPTH - 1));
        assert!(parse(&at_limit).is_ok());
        let over_limit = format!("{}1", "-".repeat(MAX_DEPTH));
        assert_eq!(parse(&over_limit), Err(ParseError::TooDeep(MAX_DEPTH)));
    }

    #[test]
    fn parentheses_add_no_depth() {
        let wrapped = format!("{}1{}", "(".repeat(1000), ")".repeat(1000));
        assert_eq!(parse(&wrapped), Ok(*lit(1.0)));

        let nested_calls = format!("{}0{}", "sin(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert_eq!(parse(&nested_calls), Err(ParseError::TooDeep(MAX_DEPTH)));
    }
}
