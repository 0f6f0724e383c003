use clap::Parser;
use miette::{IntoDiagnostic, Result};
use rollcall::application::engine::RegistryEngine;
use rollcall::domain::ports::{PaymentStoreBox, RosterStoreBox};
use rollcall::domain::student::AccountId;
use rollcall::infrastructure::in_memory::{
    InMemoryPaymentStore, InMemoryRosterStore, LogEventSink, Treasury,
};
#[cfg(feature = "storage-rocksdb")]
use rollcall::infrastructure::rocksdb::RocksStore;
use rollcall::interfaces::csv::operation_reader::OperationReader;
use rollcall::interfaces::csv::roster_writer::RosterWriter;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input operations CSV file
    input: PathBuf,

    /// Administrator identity
    #[arg(long, default_value_t = 0)]
    admin: u64,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[cfg(feature = "storage-rocksdb")]
    #[arg(long)]
    db_path: Option<PathBuf>,
}

fn init_tracing() {
    // Logs go to stderr; stdout carries the roster CSV
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn build_engine(cli: &Cli) -> Result<RegistryEngine> {
    let admin = AccountId(cli.admin);

    #[cfg(feature = "storage-rocksdb")]
    if let Some(db_path) = &cli.db_path {
        let store = RocksStore::open(db_path).into_diagnostic()?;

        let payments: PaymentStoreBox = Box::new(store.clone());
        let roster: RosterStoreBox = Box::new(store);

        return Ok(RegistryEngine::new(
            admin,
            payments,
            roster,
            Box::new(Treasury::new()),
            Box::new(LogEventSink::new()),
        ));
    }

    let payments: PaymentStoreBox = Box::new(InMemoryPaymentStore::new());
    let roster: RosterStoreBox = Box::new(InMemoryRosterStore::new());

    Ok(RegistryEngine::new(
        admin,
        payments,
        roster,
        Box::new(Treasury::new()),
        Box::new(LogEventSink::new()),
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let engine = build_engine(&cli)?;

    // Apply the batch; each row is its own atomic operation, so a
    // rejected row is reported and the rest keep going.
    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = OperationReader::new(file);
    for (row, op_result) in reader.operations().enumerate() {
        match op_result {
            Ok(op) => {
                if let Err(e) = engine.apply(op).await {
                    tracing::warn!(row = row + 1, error = %e, "operation rejected");
                }
            }
            Err(e) => {
                tracing::warn!(row = row + 1, error = %e, "unreadable operation row");
            }
        }
    }

    // Final authorized roster, ordered by sequence-id
    let roster = engine.into_roster().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = RosterWriter::new(stdout.lock());
    writer.write_roster(roster).into_diagnostic()?;

    Ok(())
}
