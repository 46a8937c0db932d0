use crate::config::Settings;
use crate::directory::InMemoryDirectory;
use crate::error::Result;
use crate::registry::AccountRegistry;
use crate::{error_handler, input, output, process};

use std::sync::atomic::Ordering;
use std::sync::Arc;

/// What a run did, for whoever started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Operations read and handed to the ledger.
    pub operations: usize,

    /// Rows that couldn't be read, plus operations that were refused.
    pub rejected: usize,
}

/// Open every configured account.
pub fn provision(settings: &Settings, directory: &InMemoryDirectory) -> Result<AccountRegistry> {
    let registry = AccountRegistry::new();

    for customer in &settings.customers {
        let Some((kind, opening_balance)) = customer.account()? else {
            continue;
        };
        let Some(known) = directory.customer(customer.id) else {
            continue;
        };

        registry.get_or_create_account(known, kind, opening_balance)?;
    }

    Ok(registry)
}

/// Read operations from `input_stream`, apply them concurrently, then write
/// one statement per account to `output_stream`.
///
/// The pipeline is made of threads connected with channels:
/// reader -> workers -> error sink. Statements are only written once every
/// worker is done, so they reflect every operation of the input.
pub fn run(
    settings: &Settings,
    input_stream: (impl std::io::Read + Send + 'static),
    output_stream: impl std::io::Write,
) -> Result<(Summary, Arc<AccountRegistry>)> {
    let directory = settings.directory();
    let registry = Arc::new(provision(settings, &directory)?);
    tracing::info!(
        customers = directory.len(),
        accounts = registry.len(),
        workers = settings.workers,
        "bank ready"
    );

    let (operations, input_errors) = input::parse(input_stream, settings.workers * 64);
    let (workers, operation_errors) = process::process(
        operations,
        settings.workers,
        Arc::new(directory),
        Arc::clone(&registry),
    );
    let (sinks, rejected) = error_handler::sink(input_errors, operation_errors);

    let mut handled = 0;
    for worker in workers {
        match worker.join() {
            Ok(count) => handled += count,
            Err(_) => tracing::error!("a ledger worker panicked"),
        }
    }
    for sink in sinks {
        if sink.join().is_err() {
            tracing::error!("an error sink panicked");
        }
    }

    output::write_statements(output_stream, &registry.accounts())?;

    let summary = Summary {
        operations: handled,
        rejected: rejected.load(Ordering::Relaxed),
    };
    tracing::info!(
        operations = summary.operations,
        rejected = summary.rejected,
        "run complete"
    );

    Ok((summary, registry))
}
