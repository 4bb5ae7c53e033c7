//! Account repository: categorized income/expense accounts and entries.
//!
//! One repository serves both kinds; every operation is scoped by
//! [`AccountKind`] so an income entry can never land in an expense
//! account. Account totals follow the same recompute-from-set rule as
//! project payments.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    IsolationLevel, PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use studio_core::accounts::{
    Account, AccountError, AccountKind, AccountService, AccountTotal, Entry, EntryInput,
    EntryPatch,
};

use super::conflict::is_serialization_failure;
use crate::entities::{account_entries, ledger_accounts, projects};

/// Account repository for income/expense category CRUD.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a named account of the given kind.
    ///
    /// # Errors
    ///
    /// Returns `EmptyName` for a blank name or `DuplicateName` if an
    /// account of the same kind and name exists.
    pub async fn create_account(
        &self,
        kind: AccountKind,
        name: String,
        description: Option<String>,
    ) -> Result<Account, AccountError> {
        AccountService::validate_name(&name)?;

        let txn = self.begin().await?;
        ensure_name_free(&txn, kind, &name, None).await?;

        let now = Utc::now().into();
        let active = ledger_accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            kind: Set(kind.into()),
            name: Set(name.clone()),
            description: Set(description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // The unique (kind, name) index backstops the pre-check under
        // concurrent creates
        let model = active.insert(&txn).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AccountError::DuplicateName {
                    kind,
                    name: name.clone(),
                }
            } else {
                map_err(e)
            }
        })?;
        txn.commit().await.map_err(map_err)?;

        Ok(account_to_domain(model))
    }

    /// Renames an account and/or replaces its description.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`, `EmptyName`, or `DuplicateName`.
    pub async fn update_account(
        &self,
        kind: AccountKind,
        account_id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Account, AccountError> {
        let txn = self.begin().await?;
        let model = find_account(&txn, kind, account_id).await?;

        if let Some(name) = &name {
            AccountService::validate_name(name)?;
            if *name != model.name {
                ensure_name_free(&txn, kind, name, Some(account_id)).await?;
            }
        }

        let mut active: ledger_accounts::ActiveModel = model.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(description) = description {
            active.description = Set(Some(description));
        }
        active.updated_at = Set(Utc::now().into());

        let model = active.update(&txn).await.map_err(map_err)?;
        txn.commit().await.map_err(map_err)?;

        Ok(account_to_domain(model))
    }

    /// Deletes an account. Blocked while the account still has entries.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` or `NotEmpty`.
    pub async fn delete_account(
        &self,
        kind: AccountKind,
        account_id: Uuid,
    ) -> Result<(), AccountError> {
        let txn = self.begin().await?;
        let model = find_account(&txn, kind, account_id).await?;

        let entries = account_entries::Entity::find()
            .filter(account_entries::Column::AccountId.eq(account_id))
            .count(&txn)
            .await
            .map_err(map_err)?;
        if entries > 0 {
            return Err(AccountError::NotEmpty {
                id: account_id,
                entries,
            });
        }

        ledger_accounts::Entity::delete_by_id(model.id)
            .exec(&txn)
            .await
            .map_err(map_err)?;
        txn.commit().await.map_err(map_err)?;

        Ok(())
    }

    /// Records an entry against an account and recomputes its total.
    ///
    /// Returns the new entry ID and the recomputed account total.
    ///
    /// # Errors
    ///
    /// Returns validation errors from the core rules, `AccountNotFound`,
    /// or `ProjectNotFound` for a dangling expense attribution.
    pub async fn add_entry(
        &self,
        kind: AccountKind,
        account_id: Uuid,
        input: EntryInput,
    ) -> Result<(Uuid, Decimal), AccountError> {
        AccountService::validate_entry(kind, &input)?;

        let txn = self.begin().await?;
        find_account(&txn, kind, account_id).await?;

        if let Some(project_id) = input.project_id {
            ensure_project(&txn, project_id).await?;
        }

        let now = Utc::now().into();
        let entry_id = Uuid::new_v4();
        let active = account_entries::ActiveModel {
            id: Set(entry_id),
            account_id: Set(account_id),
            amount: Set(input.amount),
            entry_date: Set(input.entry_date),
            description: Set(input.description),
            payment_mode: Set(input.payment_mode.into()),
            bank_account: Set(input.bank_account),
            reference_number: Set(input.reference_number),
            counterpart_name: Set(input.counterpart_name),
            project_id: Set(input.project_id),
            created_at: Set(now),
            updated_at: Set(now),
        };
        active.insert(&txn).await.map_err(map_err)?;

        let total = recompute_total(&txn, account_id).await?;
        txn.commit().await.map_err(map_err)?;

        Ok((entry_id, total))
    }

    /// Updates fields of an entry and recomputes its account total.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` if the entry does not exist or its
    /// account is not of the stated kind.
    pub async fn update_entry(
        &self,
        kind: AccountKind,
        entry_id: Uuid,
        patch: EntryPatch,
    ) -> Result<Decimal, AccountError> {
        let txn = self.begin().await?;

        let model = find_entry(&txn, kind, entry_id).await?;
        let mut entry = entry_to_domain(model);
        AccountService::apply_patch(&mut entry, &patch)?;

        let active = account_entries::ActiveModel {
            id: Set(entry.id),
            account_id: Set(entry.account_id),
            amount: Set(entry.amount),
            entry_date: Set(entry.entry_date),
            description: Set(entry.description),
            payment_mode: Set(entry.payment_mode.into()),
            bank_account: Set(entry.bank_account),
            reference_number: Set(entry.reference_number),
            counterpart_name: Set(entry.counterpart_name),
            project_id: Set(entry.project_id),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };
        active.update(&txn).await.map_err(map_err)?;

        let total = recompute_total(&txn, entry.account_id).await?;
        txn.commit().await.map_err(map_err)?;

        Ok(total)
    }

    /// Deletes an entry and recomputes its account total.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` if the entry does not exist or its
    /// account is not of the stated kind.
    pub async fn delete_entry(
        &self,
        kind: AccountKind,
        entry_id: Uuid,
    ) -> Result<Decimal, AccountError> {
        let txn = self.begin().await?;

        let model = find_entry(&txn, kind, entry_id).await?;
        let account_id = model.account_id;
        account_entries::Entity::delete_by_id(model.id)
            .exec(&txn)
            .await
            .map_err(map_err)?;

        let total = recompute_total(&txn, account_id).await?;
        txn.commit().await.map_err(map_err)?;

        Ok(total)
    }

    /// Lists entries of a kind, optionally for one account, sorted by
    /// entry date descending.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if a filter account does not exist.
    pub async fn list_entries(
        &self,
        kind: AccountKind,
        account_id: Option<Uuid>,
    ) -> Result<Vec<Entry>, AccountError> {
        let txn = self.db.begin().await.map_err(map_err)?;

        let account_ids: Vec<Uuid> = match account_id {
            Some(id) => {
                find_account(&txn, kind, id).await?;
                vec![id]
            }
            None => load_accounts(&txn, kind)
                .await?
                .into_iter()
                .map(|a| a.id)
                .collect(),
        };

        let rows = account_entries::Entity::find()
            .filter(account_entries::Column::AccountId.is_in(account_ids))
            .order_by_desc(account_entries::Column::EntryDate)
            .order_by_desc(account_entries::Column::CreatedAt)
            .all(&txn)
            .await
            .map_err(map_err)?;
        txn.commit().await.map_err(map_err)?;

        Ok(rows.into_iter().map(entry_to_domain).collect())
    }

    /// Returns every account of a kind with its recomputed total.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_account_totals(
        &self,
        kind: AccountKind,
    ) -> Result<Vec<AccountTotal>, AccountError> {
        // Single transaction so accounts and entries are a consistent
        // snapshot
        let txn = self.db.begin().await.map_err(map_err)?;

        let accounts = load_accounts(&txn, kind).await?;
        let rows = account_entries::Entity::find()
            .filter(
                account_entries::Column::AccountId
                    .is_in(accounts.iter().map(|a| a.id).collect::<Vec<_>>()),
            )
            .all(&txn)
            .await
            .map_err(map_err)?;
        txn.commit().await.map_err(map_err)?;

        let mut sums: HashMap<Uuid, Decimal> = HashMap::new();
        for row in rows {
            *sums.entry(row.account_id).or_default() += row.amount;
        }

        Ok(accounts
            .into_iter()
            .map(|model| {
                let total = sums.get(&model.id).copied().unwrap_or_default();
                AccountTotal {
                    account: account_to_domain(model),
                    total,
                }
            })
            .collect())
    }

    async fn begin(&self) -> Result<DatabaseTransaction, AccountError> {
        self.db
            .begin_with_config(Some(IsolationLevel::Serializable), None)
            .await
            .map_err(map_err)
    }
}

fn map_err(e: DbErr) -> AccountError {
    if is_serialization_failure(&e) {
        AccountError::Conflict
    } else {
        AccountError::Database(e.to_string())
    }
}

/// Converts an account row into the domain type.
pub(crate) fn account_to_domain(model: ledger_accounts::Model) -> Account {
    Account {
        id: model.id,
        kind: model.kind.into(),
        name: model.name,
        description: model.description,
    }
}

/// Converts an entry row into the domain type.
pub(crate) fn entry_to_domain(model: account_entries::Model) -> Entry {
    Entry {
        id: model.id,
        account_id: model.account_id,
        amount: model.amount,
        entry_date: model.entry_date,
        description: model.description,
        payment_mode: model.payment_mode.into(),
        bank_account: model.bank_account,
        reference_number: model.reference_number,
        counterpart_name: model.counterpart_name,
        project_id: model.project_id,
    }
}

async fn find_account(
    txn: &DatabaseTransaction,
    kind: AccountKind,
    account_id: Uuid,
) -> Result<ledger_accounts::Model, AccountError> {
    ledger_accounts::Entity::find_by_id(account_id)
        .filter(ledger_accounts::Column::Kind.eq(crate::entities::sea_orm_active_enums::AccountKind::from(kind)))
        .one(txn)
        .await
        .map_err(map_err)?
        .ok_or(AccountError::AccountNotFound {
            kind,
            id: account_id,
        })
}

/// Finds an entry whose account is of the stated kind.
async fn find_entry(
    txn: &DatabaseTransaction,
    kind: AccountKind,
    entry_id: Uuid,
) -> Result<account_entries::Model, AccountError> {
    let model = account_entries::Entity::find_by_id(entry_id)
        .one(txn)
        .await
        .map_err(map_err)?
        .ok_or(AccountError::EntryNotFound(entry_id))?;

    // Wrong-kind lookups read as missing, same as a wrong-project
    // payment lookup
    find_account(txn, kind, model.account_id)
        .await
        .map_err(|_| AccountError::EntryNotFound(entry_id))?;

    Ok(model)
}

async fn load_accounts(
    txn: &DatabaseTransaction,
    kind: AccountKind,
) -> Result<Vec<ledger_accounts::Model>, AccountError> {
    ledger_accounts::Entity::find()
        .filter(ledger_accounts::Column::Kind.eq(crate::entities::sea_orm_active_enums::AccountKind::from(kind)))
        .order_by_asc(ledger_accounts::Column::Name)
        .all(txn)
        .await
        .map_err(map_err)
}

async fn ensure_name_free(
    txn: &DatabaseTransaction,
    kind: AccountKind,
    name: &str,
    exclude: Option<Uuid>,
) -> Result<(), AccountError> {
    let mut query = ledger_accounts::Entity::find()
        .filter(ledger_accounts::Column::Kind.eq(crate::entities::sea_orm_active_enums::AccountKind::from(kind)))
        .filter(ledger_accounts::Column::Name.eq(name));
    if let Some(id) = exclude {
        query = query.filter(ledger_accounts::Column::Id.ne(id));
    }

    if query.one(txn).await.map_err(map_err)?.is_some() {
        return Err(AccountError::DuplicateName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

async fn ensure_project(
    txn: &DatabaseTransaction,
    project_id: Uuid,
) -> Result<(), AccountError> {
    projects::Entity::find_by_id(project_id)
        .one(txn)
        .await
        .map_err(map_err)?
        .ok_or(AccountError::ProjectNotFound(project_id))?;
    Ok(())
}

/// Recomputes an account total from the full entry set inside the
/// transaction.
async fn recompute_total(
    txn: &DatabaseTransaction,
    account_id: Uuid,
) -> Result<Decimal, AccountError> {
    let rows = account_entries::Entity::find()
        .filter(account_entries::Column::AccountId.eq(account_id))
        .all(txn)
        .await
        .map_err(map_err)?;
    let entries: Vec<Entry> = rows.into_iter().map(entry_to_domain).collect();
    Ok(AccountService::account_total(&entries))
}

#[cfg(test)]
#[path = "account_tests.rs"]
mod account_tests;
