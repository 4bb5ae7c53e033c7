//! Fee ledger repository: per-project fees and payments.
//!
//! Every mutation executes as read-set -> mutate -> recompute -> commit
//! inside one serializable transaction. `received_amount` is recomputed
//! from the full payment set on every call; it is never stored, so it
//! can never drift.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    IsolationLevel, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use studio_core::ledger::{
    LedgerError, LedgerService, LedgerSnapshot, LedgerTotals, Payment, PaymentInput, PaymentPatch,
};

use super::conflict::{is_serialization_failure, is_unique_violation};
use crate::entities::{payments, project_ledgers, projects};

/// Fee ledger repository for per-project payment tracking.
#[derive(Debug, Clone)]
pub struct FeeLedgerRepository {
    db: DatabaseConnection,
}

impl FeeLedgerRepository {
    /// Creates a new fee ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sets (or creates) a project's total fee, returning the full
    /// ledger snapshot.
    ///
    /// `notes`, when `Some`, replaces the ledger notes.
    ///
    /// # Errors
    ///
    /// Returns `NegativeFee`/`InvalidScale` for a bad amount,
    /// `ProjectNotFound` if the project does not exist, or `Conflict`
    /// on a serialization failure.
    pub async fn set_total_fee(
        &self,
        project_id: Uuid,
        amount: Decimal,
        notes: Option<String>,
    ) -> Result<LedgerSnapshot, LedgerError> {
        LedgerService::validate_fee(amount)?;

        let txn = self.begin().await?;
        ensure_project(&txn, project_id).await?;

        let now = Utc::now().into();
        let existing = find_ledger(&txn, project_id).await?;

        let ledger = match existing {
            Some(row) => {
                let mut active: project_ledgers::ActiveModel = row.into();
                active.total_fee = Set(amount);
                if let Some(notes) = notes {
                    active.notes = Set(Some(notes));
                }
                active.updated_at = Set(now);
                active.update(&txn).await.map_err(map_err)?
            }
            None => {
                let active = project_ledgers::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    project_id: Set(project_id),
                    total_fee: Set(amount),
                    notes: Set(notes),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                active.insert(&txn).await.map_err(map_insert_err)?
            }
        };

        let payments = load_payments(&txn, project_id).await?;
        txn.commit().await.map_err(map_err)?;

        Ok(snapshot(project_id, ledger.total_fee, ledger.notes, payments))
    }

    /// Records a payment against a project, creating the ledger record
    /// lazily if this is the project's first activity.
    ///
    /// Returns the new payment ID and the recomputed totals.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount`/`InvalidScale` for a bad amount,
    /// `ProjectNotFound` if the project does not exist, or `Conflict`
    /// on a serialization failure.
    pub async fn add_payment(
        &self,
        project_id: Uuid,
        input: PaymentInput,
    ) -> Result<(Uuid, LedgerTotals), LedgerError> {
        LedgerService::validate_payment(&input)?;

        let txn = self.begin().await?;
        ensure_project(&txn, project_id).await?;
        let ledger = ensure_ledger(&txn, project_id).await?;

        let now = Utc::now().into();
        let payment_id = Uuid::new_v4();

        let payment = payments::ActiveModel {
            id: Set(payment_id),
            project_id: Set(project_id),
            amount: Set(input.amount),
            payment_date: Set(input.payment_date),
            payment_mode: Set(input.payment_mode.into()),
            bank_account: Set(input.bank_account),
            reference_number: Set(input.reference_number),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };
        payment.insert(&txn).await.map_err(map_err)?;

        let totals = recompute_totals(&txn, project_id, ledger.total_fee).await?;
        txn.commit().await.map_err(map_err)?;

        Ok((payment_id, totals))
    }

    /// Updates fields of an existing payment and recomputes the totals.
    ///
    /// # Errors
    ///
    /// Returns `PaymentNotFound` if the payment does not exist or
    /// belongs to a different project.
    pub async fn update_payment(
        &self,
        project_id: Uuid,
        payment_id: Uuid,
        patch: PaymentPatch,
    ) -> Result<LedgerTotals, LedgerError> {
        let txn = self.begin().await?;

        let model = find_payment(&txn, project_id, payment_id).await?;
        let mut payment = payment_to_domain(model);
        LedgerService::apply_patch(&mut payment, &patch)?;

        let active = payments::ActiveModel {
            id: Set(payment.id),
            project_id: Set(payment.project_id),
            amount: Set(payment.amount),
            payment_date: Set(payment.payment_date),
            payment_mode: Set(payment.payment_mode.into()),
            bank_account: Set(payment.bank_account),
            reference_number: Set(payment.reference_number),
            notes: Set(payment.notes),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };
        active.update(&txn).await.map_err(map_err)?;

        let total_fee = ledger_fee(&txn, project_id).await?;
        let totals = recompute_totals(&txn, project_id, total_fee).await?;
        txn.commit().await.map_err(map_err)?;

        Ok(totals)
    }

    /// Deletes a payment and recomputes the totals.
    ///
    /// # Errors
    ///
    /// Returns `PaymentNotFound` if the payment does not exist or
    /// belongs to a different project.
    pub async fn delete_payment(
        &self,
        project_id: Uuid,
        payment_id: Uuid,
    ) -> Result<LedgerTotals, LedgerError> {
        let txn = self.begin().await?;

        let model = find_payment(&txn, project_id, payment_id).await?;
        payments::Entity::delete_by_id(model.id)
            .exec(&txn)
            .await
            .map_err(map_err)?;

        let total_fee = ledger_fee(&txn, project_id).await?;
        let totals = recompute_totals(&txn, project_id, total_fee).await?;
        txn.commit().await.map_err(map_err)?;

        Ok(totals)
    }

    /// Returns the full ledger view for a project: fee, recomputed
    /// totals, and payments sorted by payment date descending.
    ///
    /// A project with no ledger record yet reads as all zeros.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` if the project does not exist.
    pub async fn get_ledger(&self, project_id: Uuid) -> Result<LedgerSnapshot, LedgerError> {
        // Read scope: one transaction so fee and payments are a
        // consistent snapshot
        let txn = self.db.begin().await.map_err(map_err)?;
        ensure_project(&txn, project_id).await?;

        let ledger = find_ledger(&txn, project_id).await?;
        let payments = load_payments(&txn, project_id).await?;
        txn.commit().await.map_err(map_err)?;

        let (total_fee, notes) = match ledger {
            Some(row) => (row.total_fee, row.notes),
            None => (Decimal::ZERO, None),
        };
        Ok(snapshot(project_id, total_fee, notes, payments))
    }

    async fn begin(&self) -> Result<DatabaseTransaction, LedgerError> {
        self.db
            .begin_with_config(Some(IsolationLevel::Serializable), None)
            .await
            .map_err(map_err)
    }
}

fn map_err(e: DbErr) -> LedgerError {
    if is_serialization_failure(&e) {
        LedgerError::Conflict
    } else {
        LedgerError::Database(e.to_string())
    }
}

/// Maps errors from inserting the ledger row.
///
/// The unique `project_id` index means a violation here is always two
/// first mutations racing for the same project; the loser gets the
/// retryable `Conflict`, not a 500.
fn map_insert_err(e: DbErr) -> LedgerError {
    if is_unique_violation(&e) {
        LedgerError::Conflict
    } else {
        map_err(e)
    }
}

/// Converts a payment row into the domain type.
pub(crate) fn payment_to_domain(model: payments::Model) -> Payment {
    Payment {
        id: model.id,
        project_id: model.project_id,
        amount: model.amount,
        payment_date: model.payment_date,
        payment_mode: model.payment_mode.into(),
        bank_account: model.bank_account,
        reference_number: model.reference_number,
        notes: model.notes,
    }
}

fn snapshot(
    project_id: Uuid,
    total_fee: Decimal,
    notes: Option<String>,
    rows: Vec<payments::Model>,
) -> LedgerSnapshot {
    let payments: Vec<Payment> = rows.into_iter().map(payment_to_domain).collect();
    LedgerSnapshot {
        project_id,
        totals: LedgerService::totals(total_fee, &payments),
        notes,
        payments,
    }
}

async fn ensure_project(
    txn: &DatabaseTransaction,
    project_id: Uuid,
) -> Result<(), LedgerError> {
    projects::Entity::find_by_id(project_id)
        .one(txn)
        .await
        .map_err(map_err)?
        .ok_or(LedgerError::ProjectNotFound(project_id))?;
    Ok(())
}

async fn find_ledger(
    txn: &DatabaseTransaction,
    project_id: Uuid,
) -> Result<Option<project_ledgers::Model>, LedgerError> {
    project_ledgers::Entity::find()
        .filter(project_ledgers::Column::ProjectId.eq(project_id))
        .one(txn)
        .await
        .map_err(map_err)
}

/// Finds the ledger row, creating it with a zero fee on first activity.
async fn ensure_ledger(
    txn: &DatabaseTransaction,
    project_id: Uuid,
) -> Result<project_ledgers::Model, LedgerError> {
    if let Some(row) = find_ledger(txn, project_id).await? {
        return Ok(row);
    }

    let now = Utc::now().into();
    let active = project_ledgers::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project_id),
        total_fee: Set(Decimal::ZERO),
        notes: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    active.insert(txn).await.map_err(map_insert_err)
}

async fn ledger_fee(txn: &DatabaseTransaction, project_id: Uuid) -> Result<Decimal, LedgerError> {
    Ok(find_ledger(txn, project_id)
        .await?
        .map_or(Decimal::ZERO, |row| row.total_fee))
}

async fn find_payment(
    txn: &DatabaseTransaction,
    project_id: Uuid,
    payment_id: Uuid,
) -> Result<payments::Model, LedgerError> {
    payments::Entity::find_by_id(payment_id)
        .filter(payments::Column::ProjectId.eq(project_id))
        .one(txn)
        .await
        .map_err(map_err)?
        .ok_or(LedgerError::PaymentNotFound(payment_id))
}

async fn load_payments(
    txn: &DatabaseTransaction,
    project_id: Uuid,
) -> Result<Vec<payments::Model>, LedgerError> {
    payments::Entity::find()
        .filter(payments::Column::ProjectId.eq(project_id))
        .order_by_desc(payments::Column::PaymentDate)
        .order_by_desc(payments::Column::CreatedAt)
        .all(txn)
        .await
        .map_err(map_err)
}

/// Recomputes totals from the full payment set inside the transaction.
async fn recompute_totals(
    txn: &DatabaseTransaction,
    project_id: Uuid,
    total_fee: Decimal,
) -> Result<LedgerTotals, LedgerError> {
    let rows = load_payments(txn, project_id).await?;
    let payments: Vec<Payment> = rows.into_iter().map(payment_to_domain).collect();
    Ok(LedgerService::totals(total_fee, &payments))
}

#[cfg(test)]
#[path = "fee_ledger_tests.rs"]
mod fee_ledger_tests;
