//! Database seeder for Studio Ledger development and testing.
//!
//! Seeds two projects with fees and payments, plus an income and an
//! expense account with a few entries, so every dashboard widget has
//! data to show after a fresh migration.
//!
//! Usage: cargo run --bin seeder

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::str::FromStr;
use uuid::Uuid;

use studio_db::entities::{
    account_entries, ledger_accounts, payments, project_ledgers, projects,
    sea_orm_active_enums::{AccountKind, PaymentMode},
};

/// First seed project ID (consistent for all seeds)
const VILLA_PROJECT_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Second seed project ID (consistent for all seeds)
const OFFICE_PROJECT_ID: &str = "00000000-0000-0000-0000-000000000002";
/// Seed income account ID
const CONSULTING_ACCOUNT_ID: &str = "00000000-0000-0000-0000-000000000011";
/// Seed expense account ID
const SOFTWARE_ACCOUNT_ID: &str = "00000000-0000-0000-0000-000000000012";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = studio_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding projects...");
    seed_projects(&db).await;

    println!("Seeding project ledgers...");
    seed_ledgers(&db).await;

    println!("Seeding payments...");
    seed_payments(&db).await;

    println!("Seeding accounts...");
    seed_accounts(&db).await;

    println!("Seeding account entries...");
    seed_entries(&db).await;

    println!("Seeding complete!");
}

fn fixed_id(s: &str) -> Uuid {
    Uuid::parse_str(s).unwrap()
}

fn money(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Seeds two projects for development.
async fn seed_projects(db: &DatabaseConnection) {
    let seeds = [
        (VILLA_PROJECT_ID, "Lakeside Villa", "Mehta Family"),
        (OFFICE_PROJECT_ID, "Harbor Office Fitout", "Northline Co"),
    ];

    for (id, name, client) in seeds {
        if projects::Entity::find_by_id(fixed_id(id))
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  Project {name} already exists, skipping...");
            continue;
        }

        let now = Utc::now().into();
        let project = projects::ActiveModel {
            id: Set(fixed_id(id)),
            name: Set(name.to_string()),
            client_name: Set(Some(client.to_string())),
            created_at: Set(now),
            updated_at: Set(now),
        };
        project.insert(db).await.expect("Failed to seed project");
    }
}

/// Seeds one ledger row per project.
async fn seed_ledgers(db: &DatabaseConnection) {
    let seeds = [
        (VILLA_PROJECT_ID, "100000.00", Some("Phase 1 only")),
        (OFFICE_PROJECT_ID, "50000.00", None),
    ];

    for (project_id, fee, notes) in seeds {
        if project_ledgers::Entity::find()
            .filter(project_ledgers::Column::ProjectId.eq(fixed_id(project_id)))
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  Ledger for {project_id} already exists, skipping...");
            continue;
        }

        let now = Utc::now().into();
        let ledger = project_ledgers::ActiveModel {
            id: Set(Uuid::new_v4()),
            project_id: Set(fixed_id(project_id)),
            total_fee: Set(money(fee)),
            notes: Set(notes.map(String::from)),
            created_at: Set(now),
            updated_at: Set(now),
        };
        ledger.insert(db).await.expect("Failed to seed ledger");
    }
}

/// Seeds a few payments across both projects.
async fn seed_payments(db: &DatabaseConnection) {
    if payments::Entity::find().one(db).await.ok().flatten().is_some() {
        println!("  Payments already exist, skipping...");
        return;
    }

    let today = Utc::now().date_naive();
    let seeds = [
        (
            VILLA_PROJECT_ID,
            "25000.00",
            60,
            PaymentMode::BankTransfer,
            Some("UTR-8841"),
        ),
        (
            VILLA_PROJECT_ID,
            "15000.00",
            14,
            PaymentMode::Cheque,
            Some("CHQ-004512"),
        ),
        (OFFICE_PROJECT_ID, "50000.00", 7, PaymentMode::Upi, None),
    ];

    for (project_id, amount, days_ago, mode, reference) in seeds {
        let now = Utc::now().into();
        let payment = payments::ActiveModel {
            id: Set(Uuid::new_v4()),
            project_id: Set(fixed_id(project_id)),
            amount: Set(money(amount)),
            payment_date: Set(today - Duration::days(days_ago)),
            payment_mode: Set(mode),
            bank_account: Set(Some("Operating Account".to_string())),
            reference_number: Set(reference.map(String::from)),
            notes: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        payment.insert(db).await.expect("Failed to seed payment");
    }
}

/// Seeds one income and one expense account.
async fn seed_accounts(db: &DatabaseConnection) {
    let seeds = [
        (
            CONSULTING_ACCOUNT_ID,
            AccountKind::Income,
            "Consulting",
            "Hourly advisory work outside project contracts",
        ),
        (
            SOFTWARE_ACCOUNT_ID,
            AccountKind::Expense,
            "Software",
            "CAD and rendering subscriptions",
        ),
    ];

    for (id, kind, name, description) in seeds {
        if ledger_accounts::Entity::find_by_id(fixed_id(id))
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  Account {name} already exists, skipping...");
            continue;
        }

        let now = Utc::now().into();
        let account = ledger_accounts::ActiveModel {
            id: Set(fixed_id(id)),
            kind: Set(kind),
            name: Set(name.to_string()),
            description: Set(Some(description.to_string())),
            created_at: Set(now),
            updated_at: Set(now),
        };
        account.insert(db).await.expect("Failed to seed account");
    }
}

/// Seeds a few entries across both accounts.
async fn seed_entries(db: &DatabaseConnection) {
    if account_entries::Entity::find()
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Entries already exist, skipping...");
        return;
    }

    let today = Utc::now().date_naive();
    let seeds = [
        (
            CONSULTING_ACCOUNT_ID,
            "8000.00",
            30,
            "Site feasibility review",
            PaymentMode::BankTransfer,
            Some("Greenway Builders"),
            None,
        ),
        (
            SOFTWARE_ACCOUNT_ID,
            "1200.00",
            20,
            "Rendering suite annual license",
            PaymentMode::Card,
            Some("PixelWorks"),
            None,
        ),
        (
            SOFTWARE_ACCOUNT_ID,
            "450.00",
            5,
            "Plotter ink and media",
            PaymentMode::Cash,
            Some("PrintDepot"),
            Some(VILLA_PROJECT_ID),
        ),
    ];

    for (account_id, amount, days_ago, description, mode, counterpart, project) in seeds {
        let now = Utc::now().into();
        let entry = account_entries::ActiveModel {
            id: Set(Uuid::new_v4()),
            account_id: Set(fixed_id(account_id)),
            amount: Set(money(amount)),
            entry_date: Set(today - Duration::days(days_ago)),
            description: Set(description.to_string()),
            payment_mode: Set(mode),
            bank_account: Set(None),
            reference_number: Set(None),
            counterpart_name: Set(counterpart.map(String::from)),
            project_id: Set(project.map(fixed_id)),
            created_at: Set(now),
            updated_at: Set(now),
        };
        entry.insert(db).await.expect("Failed to seed entry");
    }
}
