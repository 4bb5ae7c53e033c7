//! `SeaORM` Entity for the projects table.
//!
//! Projects are owned elsewhere in the application; this table is the
//! interface boundary the ledger hangs its records on.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub client_name: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
    #[sea_orm(has_one = "super::project_ledgers::Entity")]
    ProjectLedgers,
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::project_ledgers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectLedgers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
