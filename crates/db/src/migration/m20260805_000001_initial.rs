//! Initial database migration.
//!
//! Creates the role/type enums and the users, vouchers, and voucher_lines
//! tables with their uniqueness constraints and indexes.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(VOUCHERS_SQL).await?;
        db.execute_unprepared(VOUCHER_LINES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared("DROP TABLE IF EXISTS voucher_lines;")
            .await?;
        db.execute_unprepared("DROP TABLE IF EXISTS vouchers;")
            .await?;
        db.execute_unprepared("DROP TABLE IF EXISTS users;").await?;
        db.execute_unprepared("DROP TYPE IF EXISTS voucher_type;")
            .await?;
        db.execute_unprepared("DROP TYPE IF EXISTS user_role;")
            .await?;

        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE user_role AS ENUM ('ADMIN', 'USER');
CREATE TYPE voucher_type AS ENUM ('EXPENSE', 'ADJUSTMENT');
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    emp_id TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    designation TEXT NOT NULL,
    department TEXT NOT NULL,
    cell_no TEXT NOT NULL,
    email TEXT UNIQUE,
    password_hash TEXT NOT NULL,
    role user_role NOT NULL DEFAULT 'USER',
    is_approved BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- The approval queue is always read oldest-first over unapproved rows.
CREATE INDEX idx_users_pending ON users (created_at) WHERE is_approved = FALSE;
";

const VOUCHERS_SQL: &str = r"
CREATE TABLE vouchers (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users (id),
    serial_number TEXT NOT NULL UNIQUE,
    issue_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    remarks TEXT,
    voucher_type voucher_type NOT NULL DEFAULT 'EXPENSE',
    total_amount NUMERIC(14, 2) NOT NULL CHECK (total_amount >= 0),
    total_amount_words TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_vouchers_owner_created ON vouchers (user_id, created_at DESC);
";

const VOUCHER_LINES_SQL: &str = r"
CREATE TABLE voucher_lines (
    id UUID PRIMARY KEY,
    voucher_id UUID NOT NULL REFERENCES vouchers (id) ON DELETE CASCADE,
    description TEXT NOT NULL DEFAULT '',
    unit TEXT,
    amount NUMERIC(14, 2) NOT NULL DEFAULT 0 CHECK (amount >= 0),
    line_order INTEGER NOT NULL CHECK (line_order >= 0),
    is_gap BOOLEAN NOT NULL DEFAULT FALSE
);

CREATE INDEX idx_voucher_lines_voucher_order ON voucher_lines (voucher_id, line_order);
";
