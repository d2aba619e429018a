//! Administrative reset for Kharcha.
//!
//! Clears all vouchers and users, then seeds a single pre-approved
//! administrator account. This is the only way an administrator comes into
//! existence; the exposed workflow never promotes users.
//!
//! Usage: cargo run --bin admin-reset

use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use uuid::Uuid;

use kharcha_core::auth::hash_password;
use kharcha_db::entities::{sea_orm_active_enums::UserRole, users, voucher_lines, vouchers};

/// Seeded administrator login.
const ADMIN_EMP_ID: &str = "admin";
/// Seeded administrator password. Rotate after first login.
const ADMIN_PASSWORD: &str = "admin@456";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = sea_orm::Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Clearing existing vouchers and users...");
    voucher_lines::Entity::delete_many()
        .exec(&db)
        .await
        .expect("Failed to clear voucher lines");
    vouchers::Entity::delete_many()
        .exec(&db)
        .await
        .expect("Failed to clear vouchers");
    users::Entity::delete_many()
        .exec(&db)
        .await
        .expect("Failed to clear users");

    println!("Creating administrator account...");
    let password_hash = hash_password(ADMIN_PASSWORD).expect("Failed to hash admin password");

    let now = chrono::Utc::now().into();
    let admin = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        emp_id: Set(ADMIN_EMP_ID.to_string()),
        name: Set("Admin User".to_string()),
        designation: Set("System Administrator".to_string()),
        department: Set("Administration".to_string()),
        cell_no: Set("N/A".to_string()),
        email: Set(Some("admin@example.com".to_string())),
        password_hash: Set(password_hash),
        role: Set(UserRole::Admin),
        is_approved: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };

    admin
        .insert(&db)
        .await
        .expect("Failed to create administrator account");

    println!("Administrator account created successfully.");
}
