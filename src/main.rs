use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chairside::cli::{
    handle_consultation_command, handle_expense_command, handle_ledger_command,
    handle_transaction_command, ConsultationCommands, ExpenseCommands, LedgerCommands,
    TransactionCommands,
};
use chairside::config::{ChairsidePaths, Settings};
use chairside::storage::Storage;

#[derive(Parser)]
#[command(
    name = "chairside",
    version,
    about = "Dental clinic back-office",
    long_about = "chairside keeps a dental clinic's visit records, expenses and \
                  consultations, and maintains the daily cash register (시재) \
                  derived from them."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Patient visit commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Expense commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Consultation commands
    #[command(subcommand, alias = "con")]
    Consultation(ConsultationCommands),

    /// Cash register commands
    #[command(subcommand)]
    Ledger(LedgerCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = ChairsidePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let mut storage = Storage::new(paths)?;
    storage.load_all()?;

    match cli.command {
        Commands::Transaction(cmd) => handle_transaction_command(&storage, cmd)?,
        Commands::Expense(cmd) => handle_expense_command(&storage, cmd)?,
        Commands::Consultation(cmd) => handle_consultation_command(&storage, cmd)?,
        Commands::Ledger(cmd) => handle_ledger_command(&storage, cmd)?,
        Commands::Config => {
            println!("chairside configuration");
            println!("  Base directory: {}", storage.paths().base_dir().display());
            println!("  Data directory: {}", storage.paths().data_dir().display());
            println!("  Audit log:      {}", storage.paths().audit_log().display());
            if !settings.clinic_name.is_empty() {
                println!("  Clinic:         {}", settings.clinic_name);
            }
            println!("  Currency:       {}", settings.currency_symbol);
        }
    }

    Ok(())
}
