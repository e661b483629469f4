use super::ast::Expr;
use super::error::EvalError;
use super::format::format_compact;
use super::symbols::{BinaryOp, Function, UnaryOp};
use super::trace::EvaluationTrace;
use num_complex::Complex64;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Reduces a tree to a single value, children first. The first failing
/// subtree aborts the whole evaluation.
pub fn evaluate(expr: Expr, trace: &mut EvaluationTrace) -> Result<Complex64, EvalError> {
    match expr {
        Expr::Literal(value) => Ok(value),
        Expr::Binary { op, lhs, rhs } => {
            let l = evaluate(*lhs, trace)?;
            let r = evaluate(*rhs, trace)?;
            let result = binary(op, l, r)?;
            trace.add_step(
                || format!("{} {} {}", format_compact(l), op.symbol(), format_compact(r)),
                result,
            );
            Ok(result)
        }
        Expr::Unary { op, operand } => {
            let v = evaluate(*operand, trace)?;
            let result = match op {
                UnaryOp::Plus => v,
                UnaryOp::Minus => -v,
            };
            trace.add_step(|| format!("{}({})", op.symbol(), format_compact(v)), result);
            Ok(result)
        }
        Expr::Call { function, args } => {
            let values = args
                .into_iter()
                .map(|arg| evaluate(arg, trace))
                .collect::<Result<Vec<_>, _>>()?;
            let result = call(function, &values)?;
            trace.add_step(
                || {
                    let args_str = values
                        .iter()
                        .map(|v| format_compact(*v))
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("{}({})", function, args_str)
                },
                result,
            );
            Ok(result)
        }
    }
}

fn binary(op: BinaryOp, l: Complex64, r: Complex64) -> Result<Complex64, EvalError> {
    match op {
        BinaryOp::Add => Ok(l + r),
        BinaryOp::Sub => Ok(l - r),
        BinaryOp::Mul => Ok(l * r),
        BinaryOp::Div => divide(l, r),
        BinaryOp::Rem => Err(EvalError::UnsupportedModulo),
        BinaryOp::Pow => Ok(l.powc(r)),
    }
}

fn divide(l: Complex64, r: Complex64) -> Result<Complex64, EvalError> {
    if r == ZERO {
        return Err(EvalError::DivisionByZero);
    }
    Ok(quotient(l, r))
}

/// Smith's scaled complex division. `Complex64`'s `Div` squares the divisor's
/// norm first, which overflows for divisors around 1e154 and up (e.g. `cos(400i)`).
fn quotient(l: Complex64, r: Complex64) -> Complex64 {
    let (a, b, c, d) = (l.re, l.im, r.re, r.im);
    if c.abs() >= d.abs() {
        let ratio = d / c;
        let denom = c + d * ratio;
        Complex64::new((a + b * ratio) / denom, (b - a * ratio) / denom)
    } else {
        let ratio = c / d;
        let denom = c * ratio + d;
        Complex64::new((a * ratio + b) / denom, (b * ratio - a) / denom)
    }
}

fn call(function: Function, args: &[Complex64]) -> Result<Complex64, EvalError> {
    // Arity is checked by the parser, so the slice always has the right length.
    match (function, args) {
        (Function::Sin, [x]) => Ok(x.sin()),
        (Function::Cos, [x]) => Ok(x.cos()),
        // Taken as a ratio: the closed form num-complex uses for `tan` loses
        // the value at odd multiples of pi/2 and for large imaginary parts.
        (Function::Tan, [x]) => Ok(quotient(x.sin(), x.cos())),
        (Function::Cot, [x]) => divide(x.cos(), x.sin()),
        (Function::Sec, [x]) => divide(ONE, x.cos()),
        (Function::Csc, [x]) => divide(ONE, x.sin()),
        (Function::Log, [base, x]) => divide(x.ln(), base.ln()),
        (Function::Rt, [n, x]) => Ok(x.powc(divide(ONE, *n)?)),
        _ => unreachable!("{function} called with {} argument(s)", args.len()),
    }
}
