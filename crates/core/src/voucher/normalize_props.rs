//! Property-based tests for line normalization.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::normalize::{LineInput, normalize_lines};

/// Strategy for a content line with a 2-decimal amount and an explicit order.
fn content_line() -> impl Strategy<Value = LineInput> {
    (0i64..10_000_000i64, 0i32..1000).prop_map(|(cents, order)| LineInput {
        description: Some("line".to_string()),
        unit: None,
        amount: Some(Decimal::new(cents, 2)),
        line_order: Some(order),
        is_gap: false,
    })
}

/// Strategy for a gap line carrying an arbitrary submitted amount.
fn gap_line() -> impl Strategy<Value = LineInput> {
    (proptest::option::of(0i64..10_000_000i64), 0i32..1000).prop_map(|(cents, order)| LineInput {
        description: None,
        unit: None,
        amount: cents.map(|c| Decimal::new(c, 2)),
        line_order: Some(order),
        is_gap: true,
    })
}

/// Strategy for a mixed batch of 1 to 20 lines.
fn line_batch() -> impl Strategy<Value = Vec<LineInput>> {
    prop::collection::vec(prop_oneof![content_line(), gap_line()], 1..20)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The derived total equals the exact sum of non-gap amounts.
    #[test]
    fn prop_total_is_sum_of_non_gap_amounts(batch in line_batch()) {
        let normalized = normalize_lines(&batch).expect("generated batches are valid");
        let expected: Decimal = batch
            .iter()
            .filter(|line| !line.is_gap)
            .filter_map(|line| line.amount)
            .sum();
        prop_assert_eq!(normalized.total, expected.round_dp(2));
    }

    /// Reordering `line_order` values reorders lines but never changes the
    /// total.
    #[test]
    fn prop_total_independent_of_order(batch in line_batch(), seed in any::<u64>()) {
        let mut shuffled = batch.clone();
        // Deterministic permutation of the order indices.
        let orders: Vec<Option<i32>> = shuffled.iter().map(|l| l.line_order).collect();
        let len = shuffled.len();
        for (i, line) in shuffled.iter_mut().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let j = ((seed as usize).wrapping_add(i * 7)) % len;
            line.line_order = orders[j];
        }

        let original = normalize_lines(&batch).expect("valid batch");
        let permuted = normalize_lines(&shuffled).expect("valid batch");
        prop_assert_eq!(original.total, permuted.total);
    }

    /// A gap line's normalized amount is always zero, whatever was submitted.
    #[test]
    fn prop_gap_amount_is_zero(batch in line_batch()) {
        let normalized = normalize_lines(&batch).expect("valid batch");
        for line in normalized.lines.iter().filter(|line| line.is_gap) {
            prop_assert_eq!(line.amount, Decimal::ZERO);
        }
    }

    /// Normalized lines are sorted ascending by order index.
    #[test]
    fn prop_lines_sorted_by_order(batch in line_batch()) {
        let normalized = normalize_lines(&batch).expect("valid batch");
        let sorted = normalized
            .lines
            .windows(2)
            .all(|pair| pair[0].line_order <= pair[1].line_order);
        prop_assert!(sorted);
    }
}
