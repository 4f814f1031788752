//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod investment;
pub mod payout;
pub mod settings;

// Re-export specific types to avoid conflicts
pub use investment::{Column as InvestmentColumn, Entity as Investment, Model as InvestmentModel};
pub use payout::{Column as PayoutColumn, Entity as Payout, Model as PayoutModel};
pub use settings::{Column as SettingsColumn, Entity as Settings, Model as SettingsModel};
