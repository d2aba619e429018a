//! Database enum mappings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User role stored in the `user_role` Postgres enum.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Administrator account.
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    /// Ordinary user account.
    #[sea_orm(string_value = "USER")]
    User,
}

/// Voucher type stored in the `voucher_type` Postgres enum.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "voucher_type")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoucherType {
    /// Expense voucher.
    #[sea_orm(string_value = "EXPENSE")]
    Expense,
    /// Adjustment voucher.
    #[sea_orm(string_value = "ADJUSTMENT")]
    Adjustment,
}
