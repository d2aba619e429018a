//! Property-based tests for amount-in-words formatting.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::amount_to_words;

/// Strategy to generate non-negative amounts with 2 decimal places
/// (0.00 to 99,999,999.99).
fn amount_2dp() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Formatting is deterministic: the same amount always yields the same
    /// phrase.
    #[test]
    fn prop_deterministic(amount in amount_2dp()) {
        prop_assert_eq!(amount_to_words(amount), amount_to_words(amount));
    }

    /// Every phrase names the major unit and carries the "only" suffix.
    #[test]
    fn prop_shape(amount in amount_2dp()) {
        let words = amount_to_words(amount);
        prop_assert!(words.contains(" taka"));
        prop_assert!(words.ends_with(" only"));
    }

    /// The paisa clause appears exactly when the minor part is non-zero.
    #[test]
    fn prop_paisa_clause(amount in amount_2dp()) {
        let words = amount_to_words(amount);
        let has_minor = amount.fract() != Decimal::ZERO;
        prop_assert_eq!(words.contains(" paisa"), has_minor);
    }

    /// The first character of the phrase is uppercase.
    #[test]
    fn prop_capitalized(amount in amount_2dp()) {
        let words = amount_to_words(amount);
        let first = words.chars().next().expect("phrase is never empty");
        prop_assert!(first.is_uppercase());
    }
}
