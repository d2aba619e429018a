//! Voucher line-item rules.
//!
//! A voucher is an ordered list of line entries. Content lines carry a
//! description and an amount; gap lines are spacers on the printed form and
//! contribute nothing to the total. This module owns the batch validation,
//! normalization, and total-derivation rules.

mod normalize;

#[cfg(test)]
mod normalize_props;

pub use normalize::{
    LineBatchError, LineFieldError, LineInput, NormalizedBatch, NormalizedLine, normalize_lines,
};
