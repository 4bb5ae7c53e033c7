//! `SeaORM` Entity for the ledger_accounts table.
//!
//! Named income/expense categories. Names are unique within a kind.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::AccountKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ledger_accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: AccountKind,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::account_entries::Entity")]
    AccountEntries,
}

impl Related<super::account_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
