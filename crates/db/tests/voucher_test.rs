//! Integration tests for the Voucher repository.
//!
//! These tests run against a live database and are skipped silently when
//! `DATABASE_URL` is not set.

use kharcha_core::voucher::NormalizedLine;
use kharcha_db::entities::sea_orm_active_enums::{UserRole, VoucherType};
use kharcha_db::repositories::{CreateVoucherInput, NewUser, VoucherError};
use kharcha_db::{UserRepository, VoucherRepository};
use rust_decimal_macros::dec;
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

async fn connect() -> Option<DatabaseConnection> {
    let url = std::env::var("DATABASE_URL").ok()?;
    Some(
        Database::connect(&url)
            .await
            .expect("Failed to connect to database"),
    )
}

async fn create_owner(db: &DatabaseConnection) -> Uuid {
    let repo = UserRepository::new(db.clone());
    let user = repo
        .create(NewUser {
            emp_id: format!("test-{}", Uuid::new_v4()),
            name: "Voucher Owner".to_string(),
            designation: "Engineer".to_string(),
            department: "Platform".to_string(),
            cell_no: "01700000000".to_string(),
            email: None,
            password_hash: "$argon2id$test_hash".to_string(),
            role: UserRole::User,
            is_approved: true,
        })
        .await
        .expect("Failed to create owner");
    user.id
}

fn sample_input(serial: &str) -> CreateVoucherInput {
    CreateVoucherInput {
        serial_number: serial.to_string(),
        issue_date: None,
        remarks: None,
        voucher_type: VoucherType::Expense,
        lines: vec![
            NormalizedLine {
                description: "Taxi fare".to_string(),
                unit: None,
                amount: dec!(120.00),
                line_order: 0,
                is_gap: false,
            },
            NormalizedLine {
                description: String::new(),
                unit: None,
                amount: dec!(0.00),
                line_order: 1,
                is_gap: true,
            },
        ],
        total_amount: dec!(120.00),
        total_amount_words: "One hundred and twenty taka only".to_string(),
    }
}

#[tokio::test]
async fn test_create_and_get_with_ordered_lines() {
    let Some(db) = connect().await else { return };
    let owner = create_owner(&db).await;
    let repo = VoucherRepository::new(db);
    let serial = format!("VCH-{}", Uuid::new_v4());

    let created = repo.create(owner, sample_input(&serial)).await.unwrap();
    assert_eq!(created.voucher.serial_number, serial);
    assert_eq!(created.lines.len(), 2);

    let fetched = repo.find_for_user(owner, created.voucher.id).await.unwrap();
    assert_eq!(fetched.lines[0].line_order, 0);
    assert_eq!(fetched.lines[1].line_order, 1);
    assert!(fetched.lines[1].is_gap);
}

#[tokio::test]
async fn test_ownership_is_opaque() {
    let Some(db) = connect().await else { return };
    let owner = create_owner(&db).await;
    let stranger = create_owner(&db).await;
    let repo = VoucherRepository::new(db);
    let serial = format!("VCH-{}", Uuid::new_v4());

    let created = repo.create(owner, sample_input(&serial)).await.unwrap();

    let result = repo.find_for_user(stranger, created.voucher.id).await;
    assert!(matches!(result, Err(VoucherError::NotFound(_))));
}

#[tokio::test]
async fn test_duplicate_serial_rejected_across_owners() {
    let Some(db) = connect().await else { return };
    let first = create_owner(&db).await;
    let second = create_owner(&db).await;
    let repo = VoucherRepository::new(db);
    let serial = format!("VCH-{}", Uuid::new_v4());

    repo.create(first, sample_input(&serial)).await.unwrap();

    let result = repo.create(second, sample_input(&serial)).await;
    assert!(matches!(result, Err(VoucherError::DuplicateSerial)));
}

#[tokio::test]
async fn test_delete_removes_lines() {
    let Some(db) = connect().await else { return };
    let owner = create_owner(&db).await;
    let repo = VoucherRepository::new(db);
    let serial = format!("VCH-{}", Uuid::new_v4());

    let created = repo.create(owner, sample_input(&serial)).await.unwrap();
    repo.delete(owner, created.voucher.id).await.unwrap();

    let result = repo.find_for_user(owner, created.voucher.id).await;
    assert!(matches!(result, Err(VoucherError::NotFound(_))));
}
