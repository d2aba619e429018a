//! Repository abstractions for data access.

pub mod user;
pub mod voucher;

pub use user::{NewUser, UserRepository};
pub use voucher::{
    CreateVoucherInput, LineReplacement, UpdateVoucherInput, VoucherError, VoucherRepository,
    VoucherWithLines,
};
