//! Initial database migration.
//!
//! Creates the ledger core tables: projects (interface boundary),
//! project ledgers, payments, income/expense accounts, and entries.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: PROJECTS (interface boundary)
        // ============================================================
        db.execute_unprepared(PROJECTS_SQL).await?;

        // ============================================================
        // PART 3: PROJECT LEDGER
        // ============================================================
        db.execute_unprepared(PROJECT_LEDGERS_SQL).await?;
        db.execute_unprepared(PAYMENTS_SQL).await?;

        // ============================================================
        // PART 4: INCOME/EXPENSE ACCOUNTS
        // ============================================================
        db.execute_unprepared(LEDGER_ACCOUNTS_SQL).await?;
        db.execute_unprepared(ACCOUNT_ENTRIES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared("DROP TABLE IF EXISTS account_entries CASCADE;")
            .await?;
        db.execute_unprepared("DROP TABLE IF EXISTS ledger_accounts CASCADE;")
            .await?;
        db.execute_unprepared("DROP TABLE IF EXISTS payments CASCADE;")
            .await?;
        db.execute_unprepared("DROP TABLE IF EXISTS project_ledgers CASCADE;")
            .await?;
        db.execute_unprepared("DROP TABLE IF EXISTS projects CASCADE;")
            .await?;
        db.execute_unprepared("DROP TYPE IF EXISTS payment_mode;")
            .await?;
        db.execute_unprepared("DROP TYPE IF EXISTS account_kind;")
            .await?;

        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE payment_mode AS ENUM ('cash', 'bank_transfer', 'cheque', 'upi', 'card', 'other');
CREATE TYPE account_kind AS ENUM ('income', 'expense');
";

const PROJECTS_SQL: &str = r"
CREATE TABLE projects (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    client_name TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const PROJECT_LEDGERS_SQL: &str = r"
CREATE TABLE project_ledgers (
    id UUID PRIMARY KEY,
    project_id UUID NOT NULL UNIQUE REFERENCES projects(id),
    total_fee NUMERIC(14, 2) NOT NULL DEFAULT 0 CHECK (total_fee >= 0),
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const PAYMENTS_SQL: &str = r"
CREATE TABLE payments (
    id UUID PRIMARY KEY,
    project_id UUID NOT NULL REFERENCES projects(id),
    amount NUMERIC(14, 2) NOT NULL CHECK (amount > 0),
    payment_date DATE NOT NULL,
    payment_mode payment_mode NOT NULL,
    bank_account TEXT,
    reference_number TEXT,
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_payments_project_date ON payments(project_id, payment_date DESC);
";

const LEDGER_ACCOUNTS_SQL: &str = r"
CREATE TABLE ledger_accounts (
    id UUID PRIMARY KEY,
    kind account_kind NOT NULL,
    name TEXT NOT NULL,
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (kind, name)
);
";

const ACCOUNT_ENTRIES_SQL: &str = r"
CREATE TABLE account_entries (
    id UUID PRIMARY KEY,
    account_id UUID NOT NULL REFERENCES ledger_accounts(id),
    amount NUMERIC(14, 2) NOT NULL CHECK (amount > 0),
    entry_date DATE NOT NULL,
    description TEXT NOT NULL CHECK (description <> ''),
    payment_mode payment_mode NOT NULL,
    bank_account TEXT,
    reference_number TEXT,
    counterpart_name TEXT,
    project_id UUID REFERENCES projects(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_account_entries_account_date ON account_entries(account_id, entry_date DESC);
CREATE INDEX idx_account_entries_project ON account_entries(project_id) WHERE project_id IS NOT NULL;
";
