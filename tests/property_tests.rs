//! Property-based checks over generated input lines.

use proptest::prelude::*;
use rustcalc::calc_engine::{evaluate_line, format_complex, tokenize, TokenKind};
use num_complex::Complex64;

/// Characters the calculator understands plus a few it drops.
fn expression_chars() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just('0'), Just('1'), Just('2'), Just('7'), Just('.'), Just('i'),
            Just('+'), Just('-'), Just('*'), Just('/'), Just('%'), Just('^'),
            Just('('), Just(')'), Just(','), Just(' '), Just('$'),
            Just('s'), Just('n'), Just('p'), Just('e'),
        ],
        0..24,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn tokenizer_always_ends_with_one_end(input in ".*") {
        let tokens = tokenize(&input);
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::End));
        prop_assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::End).count(), 1);
    }

    #[test]
    fn evaluation_is_repeatable(input in expression_chars()) {
        prop_assert_eq!(evaluate_line(&input), evaluate_line(&input));
    }

    #[test]
    fn real_only_values_never_print_parentheses(re in -1e6f64..1e6f64) {
        let text = format_complex(Complex64::new(re, 0.0));
        prop_assert!(!text.contains('('));
    }

    #[test]
    fn integers_evaluate_to_themselves(n in 0u32..100_000) {
        prop_assert_eq!(evaluate_line(&n.to_string()).unwrap(), format!("{}.000000", n));
    }
}
