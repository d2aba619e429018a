//! `SeaORM` Entity for the voucher_lines table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A single line on a voucher, either content or a gap spacer.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "voucher_lines")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning voucher; rows are cascade-deleted with it.
    pub voucher_id: Uuid,
    /// Trimmed description; empty only for gap lines.
    pub description: String,
    /// Optional short unit label.
    pub unit: Option<String>,
    /// Amount at 2 decimal places; zero for gap lines.
    pub amount: Decimal,
    /// Zero-based position, authoritative for display and summation.
    pub line_order: i32,
    /// Spacer flag.
    pub is_gap: bool,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owning voucher.
    #[sea_orm(
        belongs_to = "super::vouchers::Entity",
        from = "Column::VoucherId",
        to = "super::vouchers::Column::Id"
    )]
    Vouchers,
}

impl Related<super::vouchers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vouchers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
