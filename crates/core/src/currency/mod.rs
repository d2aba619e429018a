//! Amount-in-words formatting for the taka/paisa currency.
//!
//! The printed voucher form carries the grand total spelled out in words.
//! Formatting is a pure function of the amount; the same input always
//! produces the same phrase.

mod words;

#[cfg(test)]
mod props;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use words::number_to_words;

/// Converts a non-negative amount with up to 2 decimal places into its
/// natural-language form.
///
/// The output has the shape `"<Major words> taka[ and <minor words> paisa]
/// only"`. A zero major part renders as `"Zero taka"`; the paisa clause is
/// omitted entirely when the minor part is zero.
///
/// ```
/// use kharcha_core::currency::amount_to_words;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(amount_to_words(dec!(0)), "Zero taka only");
/// assert_eq!(
///     amount_to_words(dec!(150.50)),
///     "One hundred and fifty taka and fifty paisa only"
/// );
/// ```
#[must_use]
pub fn amount_to_words(amount: Decimal) -> String {
    let fixed = amount.round_dp(2);
    let taka_part = fixed.trunc();
    let paisa = ((fixed - taka_part) * Decimal::ONE_HUNDRED)
        .to_u64()
        .unwrap_or_default();
    let taka = taka_part.to_u64().unwrap_or_default();

    let taka_text = if taka == 0 {
        "Zero taka".to_string()
    } else {
        format!("{} taka", capitalize(&number_to_words(taka)))
    };

    if paisa > 0 {
        format!("{taka_text} and {} paisa only", number_to_words(paisa))
    } else {
        format!("{taka_text} only")
    }
}

/// Uppercases the first character of a word phrase.
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        format!("{}{}", first.to_uppercase(), chars.as_str())
    })
}
