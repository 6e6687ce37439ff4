//! `SeaORM` Entity for loan_applications table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One stored loan application row.
///
/// A record without a document stores empty strings in both document columns.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "loan_applications")]
pub struct Model {
    /// Store-assigned UUID v7.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Applicant full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact telephone.
    pub telephone: String,
    /// Occupation.
    pub occupation: String,
    /// Monthly salary as entered.
    pub salary: String,
    /// Permanent object-store URL.
    pub document_url: String,
    /// Original file name of the document.
    pub document_name: String,
    /// Creation time.
    pub created_at: DateTimeWithTimeZone,
    /// Last update time, never before `created_at`.
    pub updated_at: DateTimeWithTimeZone,
}

/// The table has no relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
