//! Settings entity - Stores the single global configuration row.
//!
//! At most one row exists. When no row exists, callers fall back to built-in
//! defaults; the first settings update creates the row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Settings database model - the global configuration singleton
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Return percentage applied to new investments unless overridden
    pub default_return_percentage: Decimal,
    /// Administrator contact email
    pub admin_email: Option<String>,
    /// Administrator contact details shown to operators
    pub admin_contact_info: Option<String>,
    /// When the row was created
    pub created_at: DateTimeUtc,
    /// When the configuration was last modified
    pub updated_at: DateTimeUtc,
}

/// Settings has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
