//! `SeaORM` entity definitions.

pub mod sea_orm_active_enums;
pub mod users;
pub mod voucher_lines;
pub mod vouchers;
