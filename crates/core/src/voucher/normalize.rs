//! Line-batch validation, normalization, and total derivation.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Longest accepted unit label.
const MAX_UNIT_LEN: usize = 100;

/// A raw line entry as submitted by a client.
#[derive(Debug, Clone, Default)]
pub struct LineInput {
    /// Free-text description. Required (non-empty after trimming) unless the
    /// line is a gap.
    pub description: Option<String>,
    /// Optional short unit label ("pcs", "km").
    pub unit: Option<String>,
    /// Non-negative amount. Required unless the line is a gap.
    pub amount: Option<Decimal>,
    /// Explicit zero-based position. Defaults to the entry's position in the
    /// submitted sequence.
    pub line_order: Option<i32>,
    /// Spacer line on the printed form; carries no amount.
    pub is_gap: bool,
}

/// A single failed field within a submitted batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineFieldError {
    /// Zero-based index of the entry in the submitted sequence.
    pub index: usize,
    /// Wire name of the offending field.
    pub field: &'static str,
    /// Human-readable message.
    pub message: &'static str,
}

/// Rejection of a whole line batch. There is no partial acceptance: one bad
/// entry fails the batch, and every failing field is reported.
#[derive(Debug, Clone, Error)]
pub enum LineBatchError {
    /// The batch was empty.
    #[error("voucher must contain at least one line")]
    Empty,
    /// One or more entries failed validation.
    #[error("{} invalid line field(s)", .0.len())]
    Invalid(Vec<LineFieldError>),
}

/// A line entry after validation and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLine {
    /// Trimmed description; empty only for gap lines.
    pub description: String,
    /// Trimmed unit label; an empty label collapses to `None`.
    pub unit: Option<String>,
    /// Amount at 2 decimal places; always zero for gap lines.
    pub amount: Decimal,
    /// Authoritative zero-based position for display and summation.
    pub line_order: i32,
    /// Spacer flag.
    pub is_gap: bool,
}

/// The result of normalizing a batch: canonical lines plus the derived total.
#[derive(Debug, Clone)]
pub struct NormalizedBatch {
    /// Lines in ascending `line_order`, ties kept in submission order.
    pub lines: Vec<NormalizedLine>,
    /// Sum of non-gap amounts at 2 decimal places.
    pub total: Decimal,
}

/// Validates and normalizes a submitted line batch.
///
/// Validation runs over every entry before any normalization, so the error
/// enumerates all failing fields across the whole batch. Normalization trims
/// text fields, forces gap amounts to zero, defaults missing order indices
/// to submission position, and sorts stably by order index.
///
/// # Errors
///
/// Returns [`LineBatchError::Empty`] for an empty batch and
/// [`LineBatchError::Invalid`] when any entry fails a per-entry rule.
pub fn normalize_lines(lines: &[LineInput]) -> Result<NormalizedBatch, LineBatchError> {
    if lines.is_empty() {
        return Err(LineBatchError::Empty);
    }

    let errors = validate(lines);
    if !errors.is_empty() {
        return Err(LineBatchError::Invalid(errors));
    }

    let mut normalized: Vec<NormalizedLine> = lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let amount = if line.is_gap {
                Decimal::ZERO
            } else {
                line.amount.unwrap_or_default().round_dp(2)
            };
            NormalizedLine {
                description: line
                    .description
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or_default()
                    .to_string(),
                unit: line
                    .unit
                    .as_deref()
                    .map(str::trim)
                    .filter(|unit| !unit.is_empty())
                    .map(ToString::to_string),
                amount,
                line_order: line
                    .line_order
                    .unwrap_or_else(|| i32::try_from(index).unwrap_or(i32::MAX)),
                is_gap: line.is_gap,
            }
        })
        .collect();

    // sort_by_key is stable: ties keep submission order.
    normalized.sort_by_key(|line| line.line_order);

    let total: Decimal = normalized
        .iter()
        .filter(|line| !line.is_gap)
        .map(|line| line.amount)
        .sum();

    Ok(NormalizedBatch {
        lines: normalized,
        total: total.round_dp(2),
    })
}

/// Applies the per-entry rules, collecting every violation.
fn validate(lines: &[LineInput]) -> Vec<LineFieldError> {
    let mut errors = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if !line.is_gap {
            let blank = line
                .description
                .as_deref()
                .is_none_or(|d| d.trim().is_empty());
            if blank {
                errors.push(LineFieldError {
                    index,
                    field: "description",
                    message: "Description is required for non-gap lines",
                });
            }

            if line.amount.is_none() {
                errors.push(LineFieldError {
                    index,
                    field: "amount",
                    message: "Amount is required for non-gap lines",
                });
            }
        }

        if line.amount.is_some_and(|amount| amount < Decimal::ZERO) {
            errors.push(LineFieldError {
                index,
                field: "amount",
                message: "Amount must be non-negative",
            });
        }

        if line
            .unit
            .as_deref()
            .is_some_and(|unit| unit.trim().chars().count() > MAX_UNIT_LEN)
        {
            errors.push(LineFieldError {
                index,
                field: "unit",
                message: "Unit must be at most 100 characters",
            });
        }

        if line.line_order.is_some_and(|order| order < 0) {
            errors.push(LineFieldError {
                index,
                field: "lineOrder",
                message: "Line order must be non-negative",
            });
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn content(description: &str, amount: Decimal) -> LineInput {
        LineInput {
            description: Some(description.to_string()),
            amount: Some(amount),
            ..LineInput::default()
        }
    }

    fn gap() -> LineInput {
        LineInput {
            is_gap: true,
            ..LineInput::default()
        }
    }

    #[test]
    fn test_empty_batch_rejected() {
        assert!(matches!(normalize_lines(&[]), Err(LineBatchError::Empty)));
    }

    #[test]
    fn test_total_sums_non_gap_amounts() {
        let batch = normalize_lines(&[
            content("Taxi fare", dec!(120.00)),
            gap(),
            content("Lunch", dec!(30.50)),
        ])
        .unwrap();

        assert_eq!(batch.total, dec!(150.50));
        assert_eq!(batch.lines.len(), 3);
    }

    #[test]
    fn test_gap_amount_forced_to_zero() {
        let mut line = gap();
        line.amount = Some(dec!(999.99));

        let batch = normalize_lines(&[content("Stationery", dec!(10)), line]).unwrap();
        assert_eq!(batch.lines[1].amount, Decimal::ZERO);
        assert_eq!(batch.total, dec!(10.00));
    }

    #[test]
    fn test_descriptions_and_units_are_trimmed() {
        let line = LineInput {
            description: Some("  Courier charge  ".to_string()),
            unit: Some("  pcs ".to_string()),
            amount: Some(dec!(55)),
            ..LineInput::default()
        };

        let batch = normalize_lines(&[line]).unwrap();
        assert_eq!(batch.lines[0].description, "Courier charge");
        assert_eq!(batch.lines[0].unit.as_deref(), Some("pcs"));
    }

    #[test]
    fn test_blank_unit_collapses_to_none() {
        let line = LineInput {
            description: Some("Printing".to_string()),
            unit: Some("   ".to_string()),
            amount: Some(dec!(5)),
            ..LineInput::default()
        };

        let batch = normalize_lines(&[line]).unwrap();
        assert_eq!(batch.lines[0].unit, None);
    }

    #[test]
    fn test_order_defaults_to_position() {
        let batch =
            normalize_lines(&[content("First", dec!(1)), content("Second", dec!(2))]).unwrap();
        assert_eq!(batch.lines[0].line_order, 0);
        assert_eq!(batch.lines[1].line_order, 1);
    }

    #[test]
    fn test_explicit_order_reorders_lines() {
        let mut first = content("Shown second", dec!(1));
        first.line_order = Some(5);
        let mut second = content("Shown first", dec!(2));
        second.line_order = Some(2);

        let batch = normalize_lines(&[first, second]).unwrap();
        assert_eq!(batch.lines[0].description, "Shown first");
        assert_eq!(batch.lines[1].description, "Shown second");
    }

    #[test]
    fn test_equal_orders_keep_submission_order() {
        let mut a = content("A", dec!(1));
        a.line_order = Some(0);
        let mut b = content("B", dec!(2));
        b.line_order = Some(0);

        let batch = normalize_lines(&[a, b]).unwrap();
        assert_eq!(batch.lines[0].description, "A");
        assert_eq!(batch.lines[1].description, "B");
    }

    #[test]
    fn test_all_failing_fields_reported() {
        let bad_description = LineInput {
            description: Some("   ".to_string()),
            amount: Some(dec!(1)),
            ..LineInput::default()
        };
        let bad_amount = LineInput {
            description: Some("Missing amount".to_string()),
            ..LineInput::default()
        };

        let Err(LineBatchError::Invalid(errors)) = normalize_lines(&[bad_description, bad_amount])
        else {
            panic!("expected Invalid");
        };

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].index, 0);
        assert_eq!(errors[0].field, "description");
        assert_eq!(errors[1].index, 1);
        assert_eq!(errors[1].field, "amount");
    }

    #[test]
    fn test_gap_exempt_from_content_rules() {
        let batch = normalize_lines(&[gap()]).unwrap();
        assert!(batch.lines[0].is_gap);
        assert_eq!(batch.lines[0].description, "");
        assert_eq!(batch.total, Decimal::ZERO);
    }

    #[test]
    fn test_negative_amount_rejected_even_for_gap() {
        let mut line = gap();
        line.amount = Some(dec!(-1));

        let Err(LineBatchError::Invalid(errors)) = normalize_lines(&[line]) else {
            panic!("expected Invalid");
        };
        assert_eq!(errors[0].field, "amount");
    }

    #[test]
    fn test_oversized_unit_rejected() {
        let line = LineInput {
            description: Some("Cable".to_string()),
            unit: Some("x".repeat(101)),
            amount: Some(dec!(3)),
            ..LineInput::default()
        };

        let Err(LineBatchError::Invalid(errors)) = normalize_lines(&[line]) else {
            panic!("expected Invalid");
        };
        assert_eq!(errors[0].field, "unit");
    }

    #[test]
    fn test_negative_order_rejected() {
        let mut line = content("Back-dated", dec!(9));
        line.line_order = Some(-1);

        let Err(LineBatchError::Invalid(errors)) = normalize_lines(&[line]) else {
            panic!("expected Invalid");
        };
        assert_eq!(errors[0].field, "lineOrder");
    }

    #[test]
    fn test_amounts_rescaled_to_two_places() {
        let batch = normalize_lines(&[content("Fuel", dec!(10.005))]).unwrap();
        assert_eq!(batch.lines[0].amount, dec!(10.00));
        assert_eq!(batch.total, dec!(10.00));
    }
}
