//! Settings business logic - the global configuration singleton.
//!
//! At most one settings row exists. Reads go through [`get_settings`] and
//! fall back to built-in defaults when no row has been written yet; the first
//! update creates the row (upsert-on-first-write). Callers never assume the
//! row exists.

use crate::{
    entities::{Settings, settings},
    errors::{Error, Result},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{Set, prelude::*};
use tracing::info;

/// Returns the built-in default return percentage (2.00) applied when no
/// settings row exists.
#[must_use]
pub fn builtin_default_return_percentage() -> Decimal {
    Decimal::new(200, 2)
}

/// Partial update of the settings singleton. `None` fields are left unchanged
/// (or take their defaults when the row is first created).
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    /// Return percentage applied to new investments unless overridden
    pub default_return_percentage: Option<Decimal>,
    /// Administrator contact email
    pub admin_email: Option<String>,
    /// Administrator contact details
    pub admin_contact_info: Option<String>,
}

/// Retrieves the settings row, if one has been created.
pub async fn get_settings(db: &DatabaseConnection) -> Result<Option<settings::Model>> {
    Settings::find().one(db).await.map_err(Into::into)
}

/// Applies a partial update to the settings singleton, creating the row on
/// first write.
///
/// # Errors
/// Returns [`Error::InvalidPercentage`] if the supplied percentage falls
/// outside [0, 100].
pub async fn update_settings(
    db: &DatabaseConnection,
    update: SettingsUpdate,
) -> Result<settings::Model> {
    if let Some(value) = update.default_return_percentage {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(Error::InvalidPercentage { value });
        }
    }

    let now = Utc::now();
    let existing = get_settings(db).await?;

    let result = if let Some(current) = existing {
        let mut active_model: settings::ActiveModel = current.into();
        if let Some(value) = update.default_return_percentage {
            active_model.default_return_percentage = Set(value);
        }
        if let Some(email) = update.admin_email {
            active_model.admin_email = Set(Some(email));
        }
        if let Some(contact) = update.admin_contact_info {
            active_model.admin_contact_info = Set(Some(contact));
        }
        active_model.updated_at = Set(now);
        active_model.update(db).await?
    } else {
        let new_row = settings::ActiveModel {
            default_return_percentage: Set(update
                .default_return_percentage
                .unwrap_or_else(builtin_default_return_percentage)),
            admin_email: Set(update.admin_email),
            admin_contact_info: Set(update.admin_contact_info),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        new_row.insert(db).await?
    };

    info!(
        "Settings updated: default return percentage = {}",
        result.default_return_percentage
    );
    Ok(result)
}

/// Returns the configured default return percentage, or the built-in 2.00
/// when no settings row exists.
pub async fn default_return_percentage(db: &DatabaseConnection) -> Result<Decimal> {
    Ok(get_settings(db)
        .await?
        .map_or_else(builtin_default_return_percentage, |row| {
            row.default_return_percentage
        }))
}
