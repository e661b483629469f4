use rustcalc::calc_engine::{
    calculate, evaluate_line, CalcError, EvalError, EvaluationTrace, ParseError, MAX_DEPTH,
};

fn parse_failure(input: &str) -> bool {
    matches!(evaluate_line(input), Err(CalcError::Parse(_)))
}

fn eval_failure(input: &str) -> bool {
    matches!(evaluate_line(input), Err(CalcError::Evaluation(_)))
}

mod precedence {
    use super::*;

    #[test]
    fn multiplication_before_addition() {
        assert_eq!(evaluate_line("2+3*4").unwrap(), "14.000000");
        assert_eq!(evaluate_line("(2+3)*4").unwrap(), "20.000000");
        assert_eq!(evaluate_line("2 * 3 + 4 * 5").unwrap(), "26.000000");
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(evaluate_line("2^3^2").unwrap(), "512.000000");
    }

    #[test]
    fn unary_signs() {
        assert_eq!(evaluate_line("-3+4").unwrap(), "1.000000");
        assert_eq!(evaluate_line("-(-3)").unwrap(), "3.000000");
        assert_eq!(evaluate_line("--3").unwrap(), "3.000000");
        assert_eq!(evaluate_line("2 - -1").unwrap(), "3.000000");
    }
}

mod functions {
    use super::*;

    #[test]
    fn two_argument_functions_take_base_first() {
        assert_eq!(evaluate_line("log(2,8)").unwrap(), "3.000000");
        assert_eq!(evaluate_line("rt(2,4)").unwrap(), "2.000000");
    }

    #[test]
    fn trigonometry_at_zero() {
        assert_eq!(evaluate_line("sin(0)").unwrap(), "0.000000");
        assert_eq!(evaluate_line("cos(0)").unwrap(), "1.000000");
    }

    #[test]
    fn arity_is_checked_while_parsing() {
        assert!(parse_failure("log(8)"));
        assert!(parse_failure("rt(4)"));
        assert!(parse_failure("sin()"));
    }

    #[test]
    fn square_root_of_negative_is_imaginary() {
        let mut trace = EvaluationTrace::new(false);
        let value = calculate("rt(2, -4)", &mut trace).unwrap();
        assert!(value.re.abs() < 1e-12);
        assert!((value.im - 2.0).abs() < 1e-12);
    }
}

mod complex_values {
    use super::*;

    #[test]
    fn imaginary_literal_formats_as_pair() {
        assert_eq!(evaluate_line("4i").unwrap(), "(0.000000+4.000000i)");
        assert_eq!(evaluate_line("3+4i").unwrap(), "(3.000000+4.000000i)");
    }

    // The `+` separator is kept even when the imaginary part is negative.
    #[test]
    fn negative_imaginary_renders_with_doubled_sign() {
        assert_eq!(evaluate_line("3-4i").unwrap(), "(3.000000+-4.000000i)");
    }

    #[test]
    fn imaginary_parts_cancel_to_real() {
        assert_eq!(evaluate_line("2i*2i").unwrap(), "-4.000000");
        assert_eq!(evaluate_line("(1+2i)-2i").unwrap(), "1.000000");
    }
}

mod failures {
    use super::*;

    #[test]
    fn division_by_exact_zero() {
        assert_eq!(
            evaluate_line("1/0"),
            Err(CalcError::Evaluation(EvalError::DivisionByZero))
        );
        assert!(eval_failure("1/(2-2)"));
    }

    #[test]
    fn modulo_is_never_computed() {
        assert_eq!(
            evaluate_line("5%2"),
            Err(CalcError::Evaluation(EvalError::UnsupportedModulo))
        );
    }

    #[test]
    fn parentheses_must_match() {
        assert!(parse_failure("(1+2"));
        assert!(parse_failure("1+2)"));
        assert!(parse_failure(")("));
    }

    #[test]
    fn unknown_names_and_stray_tokens() {
        assert_eq!(
            evaluate_line("sqrt(4)"),
            Err(CalcError::Parse(ParseError::UnknownIdentifier("sqrt".into())))
        );
        assert!(parse_failure("2 3"));
        assert!(parse_failure(""));
        assert!(parse_failure("*"));
    }

    #[test]
    fn a_failing_argument_fails_the_call() {
        assert!(eval_failure("sin(1/0)"));
        assert!(eval_failure("log(2, 5%3)"));
    }

    #[test]
    fn overly_deep_nesting_is_rejected() {
        let deep = format!("{}1", "-".repeat(5000));
        assert_eq!(
            evaluate_line(&deep),
            Err(CalcError::Parse(ParseError::TooDeep(MAX_DEPTH)))
        );
        let even = format!("{}1", "-".repeat(200));
        assert_eq!(evaluate_line(&even).unwrap(), "1.000000");
    }

    #[test]
    fn numeric_runs_without_digits() {
        assert!(parse_failure("."));
        assert!(parse_failure(".i + 1"));
    }

    #[test]
    fn unrecognized_characters_are_ignored() {
        assert_eq!(evaluate_line("2 $+ 2").unwrap(), "4.000000");
    }
}

#[test]
fn repeated_evaluation_is_identical() {
    for input in ["2+3*4", "e^(1i*pi)", "log(8)", "1/0"] {
        assert_eq!(evaluate_line(input), evaluate_line(input));
    }
}

mod numbers {
    use super::*;

    #[test]
    fn second_dot_ends_the_literal() {
        assert_eq!(evaluate_line("1.2.3").unwrap(), "1.200000");
        assert_eq!(evaluate_line("1.2.3i").unwrap(), "(0.000000+1.200000i)");
        assert_eq!(evaluate_line("2*1.5.9").unwrap(), "3.000000");
    }
}

mod trigonometry {
    use super::*;

    #[test]
    fn cotangent_at_half_pi_is_zero() {
        assert_eq!(evaluate_line("cot(pi/2)").unwrap(), "0.000000");
    }

    #[test]
    fn tangent_far_up_the_imaginary_axis() {
        assert_eq!(evaluate_line("tan(400i)").unwrap(), "(0.000000+1.000000i)");
        assert_eq!(evaluate_line("cot(400i)").unwrap(), "(0.000000+-1.000000i)");
    }
}
