use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;

use bank_ledger::config::Settings;
use bank_ledger::{output, run};

/// Apply a CSV of deposits and withdrawals to the bank's accounts, from
/// several threads at once, and print one statement per account.
#[derive(Parser)]
#[command(name = "bank-ledger")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Operations to apply: `type,customer,credential,amount`
    input: PathBuf,

    /// Path to config file
    #[arg(short, long, default_value = "bank.toml", env = "BANK_CONFIG")]
    config: PathBuf,

    /// Number of worker threads (overrides the config file)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Where to write statements (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write every account's transaction history to this file
    #[arg(long)]
    history: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Logs go to stderr: stdout is for statements.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bank_ledger=info")),
        )
        .with_writer(std::io::stderr)
        .with_thread_ids(true)
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::load(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    if let Some(workers) = cli.workers {
        settings.workers = workers.max(1);
    }

    let input = File::open(&cli.input)
        .with_context(|| format!("failed to open {}", cli.input.display()))?;

    let (summary, registry) = match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            run::run(&settings, input, file)?
        }
        None => run::run(&settings, input, std::io::stdout())?,
    };

    if let Some(path) = &cli.history {
        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        output::write_history(file, &registry.accounts())?;
    }

    tracing::info!(
        operations = summary.operations,
        rejected = summary.rejected,
        "done"
    );

    Ok(())
}
