//! `SeaORM` Entity for the users table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::UserRole;

/// A registered employee account.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Employee ID, unique across all users; the login identifier.
    #[sea_orm(unique)]
    pub emp_id: String,
    /// Display name.
    pub name: String,
    /// Job designation.
    pub designation: String,
    /// Department.
    pub department: String,
    /// Contact number, consulted by the password-reset flow.
    pub cell_no: String,
    /// Optional email address, unique when present.
    pub email: Option<String>,
    /// Argon2id PHC password hash.
    pub password_hash: String,
    /// Stored role; normalized on read.
    pub role: UserRole,
    /// Whether an administrator has approved this account.
    pub is_approved: bool,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Vouchers owned by this user.
    #[sea_orm(has_many = "super::vouchers::Entity")]
    Vouchers,
}

impl Related<super::vouchers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vouchers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
