//! `SeaORM` Entity for the vouchers table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::VoucherType;

/// A voucher header. Line items live in `voucher_lines`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "vouchers")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning user. All reads and writes are scoped to the owner.
    pub user_id: Uuid,
    /// Caller-supplied serial, unique across all vouchers of all users.
    #[sea_orm(unique)]
    pub serial_number: String,
    /// Issue date, defaulting to creation time.
    pub issue_date: DateTimeWithTimeZone,
    /// Optional free-text remarks.
    pub remarks: Option<String>,
    /// Voucher type.
    pub voucher_type: VoucherType,
    /// Derived sum of non-gap line amounts, fixed at 2 decimal places.
    pub total_amount: Decimal,
    /// Derived amount-in-words phrase for the total.
    pub total_amount_words: String,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owning user.
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    /// Contained line items.
    #[sea_orm(has_many = "super::voucher_lines::Entity")]
    VoucherLines,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::voucher_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VoucherLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
