//! Operator command-line interface.
//!
//! Thin surface over the core: every subcommand parses its arguments, calls
//! one core operation, and prints the result. No business rules live here.

use crate::{
    core::{investment, month, payout, report, settings},
    errors::Result,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Administrative tracker for investors and their monthly payouts
#[derive(Parser)]
#[command(name = "payout-tracker")]
#[command(about = "Track investors, monthly payout obligations, and settings")]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All operator commands
#[derive(Subcommand)]
pub enum Commands {
    /// Register a new investor
    AddInvestor {
        /// Investor's full name
        #[arg(long)]
        name: String,
        /// Investor's email address
        #[arg(long)]
        email: String,
        /// Investor's phone number
        #[arg(long)]
        phone: String,
        /// Invested amount
        #[arg(long)]
        amount: Decimal,
        /// Investment date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Investment type: Daily, Monthly, or One-time
        #[arg(long, default_value = "Monthly")]
        investment_type: investment::InvestmentType,
        /// Return percentage; omit to use the settings default
        #[arg(long)]
        return_percentage: Option<Decimal>,
        /// UPI transaction id of the original transfer
        #[arg(long, default_value = "")]
        upi: String,
        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List all investors, newest first
    ListInvestors,
    /// Update fields of an existing investor
    UpdateInvestor {
        /// Investment id
        id: i64,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New email
        #[arg(long)]
        email: Option<String>,
        /// New phone number
        #[arg(long)]
        phone: Option<String>,
        /// New invested amount (re-derives the monthly payout)
        #[arg(long)]
        amount: Option<Decimal>,
        /// New investment date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// New investment type
        #[arg(long)]
        investment_type: Option<investment::InvestmentType>,
        /// New return percentage (re-derives the monthly payout)
        #[arg(long)]
        return_percentage: Option<Decimal>,
        /// New UPI transaction id
        #[arg(long)]
        upi: Option<String>,
        /// New running total paid out
        #[arg(long)]
        total_paid_out: Option<Decimal>,
        /// New notes
        #[arg(long)]
        notes: Option<String>,
        /// New status: Active or Inactive
        #[arg(long)]
        status: Option<investment::InvestmentStatus>,
    },
    /// Delete an investor and their payout history
    DeleteInvestor {
        /// Investment id
        id: i64,
    },
    /// Materialize missing payout rows for a month
    Generate {
        /// Month key (YYYY-MM); defaults to the current month
        month: Option<String>,
    },
    /// Show a month's payouts with investor details
    Payouts {
        /// Month key (YYYY-MM); defaults to the current month
        month: Option<String>,
    },
    /// Mark a payout as paid
    MarkPaid {
        /// Payout id
        id: i64,
        /// Date paid (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Notes to store on the payout
        #[arg(long)]
        notes: Option<String>,
    },
    /// Undo a paid payout back to Not Paid
    MarkUnpaid {
        /// Payout id
        id: i64,
        /// Notes to store on the payout
        #[arg(long)]
        notes: Option<String>,
    },
    /// Show a month's payout summary
    Summary {
        /// Month key (YYYY-MM); defaults to the current month
        month: Option<String>,
    },
    /// Show overall dashboard figures
    Dashboard,
    /// List the selectable month window
    Months,
    /// Export a report as CSV on stdout
    #[command(subcommand)]
    Export(ExportCommands),
    /// Show or change global settings
    #[command(subcommand)]
    Settings(SettingsCommands),
}

/// CSV export targets
#[derive(Subcommand)]
pub enum ExportCommands {
    /// All investors
    Investors,
    /// One month's payouts
    Payouts {
        /// Month key (YYYY-MM); defaults to the current month
        month: Option<String>,
    },
}

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Print the current settings (or the defaults when unset)
    Show,
    /// Update one or more settings fields
    Set {
        /// Default return percentage for new investors
        #[arg(long)]
        default_return_percentage: Option<Decimal>,
        /// Administrator email
        #[arg(long)]
        admin_email: Option<String>,
        /// Administrator contact details
        #[arg(long)]
        admin_contact_info: Option<String>,
    },
}

/// Dispatches a parsed command against the database.
pub async fn run(db: &DatabaseConnection, cli: Cli) -> Result<()> {
    match cli.command {
        Commands::AddInvestor {
            name,
            email,
            phone,
            amount,
            date,
            investment_type,
            return_percentage,
            upi,
            notes,
        } => {
            let created = investment::create_investment(
                db,
                investment::CreateInvestmentArgs {
                    name,
                    email,
                    phone_number: phone,
                    invested_amount: amount,
                    investment_date: date,
                    investment_type,
                    return_percentage,
                    upi_transaction_id: upi,
                    notes,
                },
            )
            .await?;
            println!(
                "Added investor #{}: {} ({} @ {}% -> {}/month)",
                created.id,
                created.name,
                created.invested_amount,
                created.return_percentage,
                created.monthly_payout
            );
        }
        Commands::ListInvestors => {
            let investments = investment::get_all_investments(db).await?;
            if investments.is_empty() {
                println!("No investors registered.");
            }
            for inv in investments {
                println!(
                    "#{} {} | {} | invested {} | payout {}/month | {}",
                    inv.id, inv.name, inv.email, inv.invested_amount, inv.monthly_payout, inv.status
                );
            }
        }
        Commands::UpdateInvestor {
            id,
            name,
            email,
            phone,
            amount,
            date,
            investment_type,
            return_percentage,
            upi,
            total_paid_out,
            notes,
            status,
        } => {
            let updated = investment::update_investment(
                db,
                id,
                investment::UpdateInvestmentArgs {
                    name,
                    email,
                    phone_number: phone,
                    invested_amount: amount,
                    investment_date: date,
                    investment_type,
                    return_percentage,
                    upi_transaction_id: upi,
                    total_paid_out,
                    notes,
                    status,
                },
            )
            .await?;
            println!(
                "Updated investor #{}: payout {}/month, status {}",
                updated.id, updated.monthly_payout, updated.status
            );
        }
        Commands::DeleteInvestor { id } => {
            investment::delete_investment(db, id).await?;
            println!("Deleted investor #{id} and their payout history.");
        }
        Commands::Generate { month: month_key } => {
            let month_key = month_key.unwrap_or_else(month::current_month_key);
            let result = payout::ensure_payouts_for_month(db, &month_key).await?;
            println!(
                "Generated {} new payout rows for {} ({} active investments).",
                result.newly_created, result.month_key, result.active_investments
            );
        }
        Commands::Payouts { month: month_key } => {
            let month_key = month_key.unwrap_or_else(month::current_month_key);
            let payouts = payout::get_payouts_for_month(db, &month_key).await?;
            if payouts.is_empty() {
                println!("No payouts for {month_key}. Run `generate` first?");
            }
            for row in payouts {
                let status: payout::PayoutStatus = row.payout.status.parse()?;
                let overdue = if month::is_overdue(status, &month_key) {
                    " [OVERDUE]"
                } else {
                    ""
                };
                let date_paid = row
                    .payout
                    .date_paid
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "#{} {} | {} | {} | paid: {}{}",
                    row.payout.id, row.investor.name, row.payout.payout_amount, status, date_paid,
                    overdue
                );
            }
        }
        Commands::MarkPaid { id, date, notes } => {
            let updated =
                payout::set_payout_status(db, id, payout::PayoutStatus::Paid, date, notes).await?;
            let date_paid = updated
                .date_paid
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!("Payout #{} marked Paid on {}.", updated.id, date_paid);
        }
        Commands::MarkUnpaid { id, notes } => {
            let updated =
                payout::set_payout_status(db, id, payout::PayoutStatus::NotPaid, None, notes)
                    .await?;
            println!("Payout #{} reverted to Not Paid.", updated.id);
        }
        Commands::Summary { month: month_key } => {
            let month_key = month_key.unwrap_or_else(month::current_month_key);
            let summary = payout::summarize(db, &month_key).await?;
            println!("{}", payout::format_payout_summary(&month_key, &summary));
        }
        Commands::Dashboard => {
            let stats = report::dashboard_stats(db).await?;
            println!(
                "{} investors | total invested {} | monthly obligation {}",
                stats.total_investors, stats.total_invested, stats.total_monthly_payout
            );
        }
        Commands::Months => {
            for option in month::month_options() {
                println!("{}  {}", option.key, option.label);
            }
        }
        Commands::Export(ExportCommands::Investors) => {
            let investments = investment::get_all_investments(db).await?;
            println!("{}", report::investments_to_csv(&investments));
        }
        Commands::Export(ExportCommands::Payouts { month: month_key }) => {
            let month_key = month_key.unwrap_or_else(month::current_month_key);
            let payouts = payout::get_payouts_for_month(db, &month_key).await?;
            println!("{}", report::payouts_to_csv(&month_key, &payouts));
        }
        Commands::Settings(SettingsCommands::Show) => match settings::get_settings(db).await? {
            Some(row) => {
                println!(
                    "Default return percentage: {}\nAdmin email: {}\nAdmin contact: {}",
                    row.default_return_percentage,
                    row.admin_email.unwrap_or_else(|| "-".to_string()),
                    row.admin_contact_info.unwrap_or_else(|| "-".to_string())
                );
            }
            None => {
                println!(
                    "No settings saved; defaults apply (return percentage {}).",
                    settings::builtin_default_return_percentage()
                );
            }
        },
        Commands::Settings(SettingsCommands::Set {
            default_return_percentage,
            admin_email,
            admin_contact_info,
        }) => {
            let updated = settings::update_settings(
                db,
                settings::SettingsUpdate {
                    default_return_percentage,
                    admin_email,
                    admin_contact_info,
                },
            )
            .await?;
            println!(
                "Settings saved. Default return percentage: {}",
                updated.default_return_percentage
            );
        }
    }

    Ok(())
}
