//! Voucher repository for database operations.
//!
//! Every read and write is scoped to the owning user. A voucher belonging to
//! someone else is reported as not found, never as forbidden, so existence
//! does not leak across ownership boundaries.

use std::collections::HashMap;

use chrono::Utc;
use kharcha_core::voucher::NormalizedLine;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::VoucherType, voucher_lines, vouchers};

/// Error types for voucher operations.
#[derive(Debug, thiserror::Error)]
pub enum VoucherError {
    /// No voucher with the given ID inside the caller's ownership scope.
    #[error("Voucher not found: {0}")]
    NotFound(Uuid),

    /// The serial number is already taken, by any user.
    #[error("Serial number already exists")]
    DuplicateSerial,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a voucher with its lines.
#[derive(Debug, Clone)]
pub struct CreateVoucherInput {
    /// Caller-supplied serial number, unique across all vouchers.
    pub serial_number: String,
    /// Issue date; defaults to now when absent.
    pub issue_date: Option<sea_orm::prelude::DateTimeWithTimeZone>,
    /// Optional free-text remarks.
    pub remarks: Option<String>,
    /// Voucher type.
    pub voucher_type: VoucherType,
    /// Normalized lines in final order.
    pub lines: Vec<NormalizedLine>,
    /// Derived total over non-gap lines.
    pub total_amount: Decimal,
    /// Derived amount-in-words phrase.
    pub total_amount_words: String,
}

/// Replacement line set for an update that touches lines.
#[derive(Debug, Clone)]
pub struct LineReplacement {
    /// Normalized lines in final order.
    pub lines: Vec<NormalizedLine>,
    /// Recomputed total.
    pub total_amount: Decimal,
    /// Recomputed amount-in-words phrase.
    pub total_amount_words: String,
}

/// Sparse input for updating a voucher. Every field is independently present
/// or absent; absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateVoucherInput {
    /// New serial number.
    pub serial_number: Option<String>,
    /// New issue date.
    pub issue_date: Option<sea_orm::prelude::DateTimeWithTimeZone>,
    /// New remarks.
    pub remarks: Option<String>,
    /// New voucher type.
    pub voucher_type: Option<VoucherType>,
    /// Full replacement of the line set, with recomputed totals.
    pub lines: Option<LineReplacement>,
}

/// A voucher with its lines in ascending line order.
#[derive(Debug, Clone)]
pub struct VoucherWithLines {
    /// Voucher header.
    pub voucher: vouchers::Model,
    /// Line items.
    pub lines: Vec<voucher_lines::Model>,
}

/// Voucher repository for owner-scoped CRUD operations.
#[derive(Debug, Clone)]
pub struct VoucherRepository {
    db: DatabaseConnection,
}

impl VoucherRepository {
    /// Creates a new voucher repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the caller's vouchers, newest created first, each with lines in
    /// ascending line order.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<VoucherWithLines>, VoucherError> {
        let vouchers = vouchers::Entity::find()
            .filter(vouchers::Column::UserId.eq(user_id))
            .order_by_desc(vouchers::Column::CreatedAt)
            .all(&self.db)
            .await?;

        if vouchers.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = vouchers.iter().map(|v| v.id).collect();
        let lines = voucher_lines::Entity::find()
            .filter(voucher_lines::Column::VoucherId.is_in(ids))
            .order_by_asc(voucher_lines::Column::LineOrder)
            .all(&self.db)
            .await?;

        let mut lines_by_voucher: HashMap<Uuid, Vec<voucher_lines::Model>> = HashMap::new();
        for line in lines {
            lines_by_voucher.entry(line.voucher_id).or_default().push(line);
        }

        Ok(vouchers
            .into_iter()
            .map(|voucher| {
                let lines = lines_by_voucher.remove(&voucher.id).unwrap_or_default();
                VoucherWithLines { voucher, lines }
            })
            .collect())
    }

    /// Gets one of the caller's vouchers by ID.
    ///
    /// # Errors
    ///
    /// Returns `VoucherError::NotFound` if the ID does not resolve inside
    /// the caller's ownership scope.
    pub async fn find_for_user(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<VoucherWithLines, VoucherError> {
        let voucher = self.find_owned(user_id, id).await?;
        let lines = self.load_lines(voucher.id).await?;
        Ok(VoucherWithLines { voucher, lines })
    }

    /// Creates a voucher with its lines as one atomic unit.
    ///
    /// # Errors
    ///
    /// Returns `VoucherError::DuplicateSerial` on a serial-number collision
    /// with any existing voucher.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateVoucherInput,
    ) -> Result<VoucherWithLines, VoucherError> {
        let txn = self.db.begin().await?;
        let now = Utc::now().into();

        let voucher = vouchers::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            serial_number: Set(input.serial_number),
            issue_date: Set(input.issue_date.unwrap_or(now)),
            remarks: Set(input.remarks),
            voucher_type: Set(input.voucher_type),
            total_amount: Set(input.total_amount),
            total_amount_words: Set(input.total_amount_words),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let voucher = voucher.insert(&txn).await.map_err(classify)?;
        let lines = insert_lines(&txn, voucher.id, input.lines).await?;

        txn.commit().await?;

        Ok(VoucherWithLines { voucher, lines })
    }

    /// Updates one of the caller's vouchers. Supplied fields replace the
    /// stored values; a supplied line set replaces the previous lines
    /// entirely. The whole change is one transaction.
    ///
    /// # Errors
    ///
    /// Returns `VoucherError::NotFound` outside the caller's ownership scope
    /// and `VoucherError::DuplicateSerial` on a serial-number collision.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateVoucherInput,
    ) -> Result<VoucherWithLines, VoucherError> {
        let existing = self.find_owned(user_id, id).await?;

        let txn = self.db.begin().await?;

        let mut voucher: vouchers::ActiveModel = existing.into();
        if let Some(serial_number) = input.serial_number {
            voucher.serial_number = Set(serial_number);
        }
        if let Some(issue_date) = input.issue_date {
            voucher.issue_date = Set(issue_date);
        }
        if let Some(remarks) = input.remarks {
            voucher.remarks = Set(Some(remarks));
        }
        if let Some(voucher_type) = input.voucher_type {
            voucher.voucher_type = Set(voucher_type);
        }
        if let Some(replacement) = &input.lines {
            voucher.total_amount = Set(replacement.total_amount);
            voucher.total_amount_words = Set(replacement.total_amount_words.clone());
        }
        voucher.updated_at = Set(Utc::now().into());

        let voucher = voucher.update(&txn).await.map_err(classify)?;

        let replaced = if let Some(replacement) = input.lines {
            voucher_lines::Entity::delete_many()
                .filter(voucher_lines::Column::VoucherId.eq(id))
                .exec(&txn)
                .await?;
            Some(insert_lines(&txn, id, replacement.lines).await?)
        } else {
            None
        };

        txn.commit().await?;

        let lines = match replaced {
            Some(lines) => lines,
            None => self.load_lines(id).await?,
        };

        Ok(VoucherWithLines { voucher, lines })
    }

    /// Deletes one of the caller's vouchers and all of its lines as one
    /// atomic unit.
    ///
    /// # Errors
    ///
    /// Returns `VoucherError::NotFound` outside the caller's ownership
    /// scope.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), VoucherError> {
        self.find_owned(user_id, id).await?;

        let txn = self.db.begin().await?;

        voucher_lines::Entity::delete_many()
            .filter(voucher_lines::Column::VoucherId.eq(id))
            .exec(&txn)
            .await?;
        vouchers::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Fetches a voucher header inside the caller's ownership scope.
    async fn find_owned(&self, user_id: Uuid, id: Uuid) -> Result<vouchers::Model, VoucherError> {
        vouchers::Entity::find()
            .filter(vouchers::Column::Id.eq(id))
            .filter(vouchers::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(VoucherError::NotFound(id))
    }

    /// Loads a voucher's lines in ascending line order.
    async fn load_lines(&self, voucher_id: Uuid) -> Result<Vec<voucher_lines::Model>, VoucherError> {
        Ok(voucher_lines::Entity::find()
            .filter(voucher_lines::Column::VoucherId.eq(voucher_id))
            .order_by_asc(voucher_lines::Column::LineOrder)
            .all(&self.db)
            .await?)
    }
}

/// Inserts normalized lines for a voucher inside an open transaction.
async fn insert_lines(
    txn: &DatabaseTransaction,
    voucher_id: Uuid,
    lines: Vec<NormalizedLine>,
) -> Result<Vec<voucher_lines::Model>, VoucherError> {
    let mut inserted = Vec::with_capacity(lines.len());

    for line in lines {
        let model = voucher_lines::ActiveModel {
            id: Set(Uuid::new_v4()),
            voucher_id: Set(voucher_id),
            description: Set(line.description),
            unit: Set(line.unit),
            amount: Set(line.amount),
            line_order: Set(line.line_order),
            is_gap: Set(line.is_gap),
        };
        inserted.push(model.insert(txn).await?);
    }

    Ok(inserted)
}

/// Maps unique-constraint violations to the duplicate-serial error; the
/// serial number is the only unique column a caller can collide on.
fn classify(err: DbErr) -> VoucherError {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        VoucherError::DuplicateSerial
    } else {
        VoucherError::Database(err)
    }
}
