use num_complex::Complex64;

/// Canonical rendering of a result: six fractional digits per component.
///
/// The separator before the imaginary part is always `+`, so a negative
/// imaginary part shows up as `+-`.
pub fn format_complex(value: Complex64) -> String {
    if value.im == 0.0 {
        fixed(value.re)
    } else {
        format!("({}+{}i)", fixed(value.re), fixed(value.im))
    }
}

fn fixed(x: f64) -> String {
    non_finite(x).map_or_else(|| format!("{:.6}", x), str::to_string)
}

// `{:.6}` spells NaN as `NaN`; results use lowercase throughout.
fn non_finite(x: f64) -> Option<&'static str> {
    if x.is_nan() {
        Some("nan")
    } else if x == f64::INFINITY {
        Some("inf")
    } else if x == f64::NEG_INFINITY {
        Some("-inf")
    } else {
        None
    }
}

/// Same layout as [`format_complex`] with trailing zeros trimmed; used for
/// step-by-step output where brevity matters.
pub fn format_compact(value: Complex64) -> String {
    if value.im == 0.0 {
        format_number(value.re)
    } else {
        format!("({}+{}i)", format_number(value.re), format_number(value.im))
    }
}

pub fn format_number(x: f64) -> String {
    if let Some(text) = non_finite(x) {
        text.to_string()
    } else if x.abs() > 1e10 || (x.abs() < 1e-5 && x != 0.0) {
        format!("{:.6e}", x)
    } else {
        let s = format!("{:.6}", x);
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed == "-0" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// Normalizes spacing of an input line for echoing: binary operators get a
/// space on both sides, a sign in operand position sticks to its operand, and
/// function names stay glued to their opening parenthesis.
pub fn format_with_spaces(expr: &str) -> String {
    let mut result = String::new();
    let mut expect_operand = true;
    let mut after_word = false;

    for c in expr.chars() {
        match c {
            _ if c.is_whitespace() => continue,
            '+' | '-' if expect_operand => {
                if !result.is_empty() && !result.ends_with(&['(', ' '][..]) {
                    result.push(' ');
                }
                result.push(c);
                after_word = false;
            }
            '+' | '-' | '*' | '/' | '^' | '%' => {
                result.push(' ');
                result.push(c);
                result.push(' ');
                expect_operand = true;
                after_word = false;
            }
            '(' => {
                if !after_word && !result.is_empty() && !result.ends_with(&['(', ' ', '-', '+'][..]) {
                    result.push(' ');
                }
                result.push(c);
                expect_operand = true;
                after_word = false;
            }
            ')' => {
                result.push(c);
                expect_operand = false;
                after_word = false;
            }
            ',' => {
                result.push_str(", ");
                expect_operand = true;
                after_word = false;
            }
            _ => {
                let starts_word = c.is_ascii_alphabetic() && !after_word;
                let glued_suffix = c == 'i' && result.ends_with(|p: char| p.is_ascii_digit() || p == '.');
                if result.ends_with(')') || (starts_word && !glued_suffix && !expect_operand) {
                    result.push(' ');
                }
                result.push(c);
                after_word = c.is_ascii_alphabetic() && !glued_suffix;
                expect_operand = false;
            }
        }
    }

    result.split_whitespace().collect::<Vec<_>>().join(" ")
}
