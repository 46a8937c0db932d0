use crate::directory::Directory;
use crate::error::Error;
use crate::input::{Operation, OperationKind};
use crate::ledger::Money;
use crate::registry::AccountRegistry;

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;

/// Apply a stream of operations with a pool of `workers` threads.
///
/// Every worker pulls from the same channel, so operations on one account may
/// be applied by several threads at once: the account's guard is what keeps
/// them from stepping on each other. Errors are streamed as we go; once the
/// input is exhausted the workers stop, and the error channel closes.
pub fn process(
    operations: async_channel::Receiver<Operation>,
    workers: usize,
    directory: Arc<dyn Directory>,
    registry: Arc<AccountRegistry>,
) -> (Vec<JoinHandle<usize>>, Receiver<Error>) {
    let (error_tx, error_rx) = mpsc::channel();

    let handles = (0..workers.max(1))
        .map(|worker| {
            let operations = operations.clone();
            let directory = Arc::clone(&directory);
            let registry = Arc::clone(&registry);
            let errors = error_tx.clone();

            std::thread::Builder::new()
                .name(format!("ledger-worker-{}", worker))
                .spawn(move || work(&operations, directory.as_ref(), &registry, &errors))
                .map_err(|e| tracing::error!(worker, "failed to spawn worker: {}", e))
                .ok()
        })
        .flatten()
        .collect();

    (handles, error_rx)
}

// Returns how many operations this worker handled.
fn work(
    operations: &async_channel::Receiver<Operation>,
    directory: &dyn Directory,
    registry: &AccountRegistry,
    errors: &Sender<Error>,
) -> usize {
    let mut handled = 0;

    while let Ok(operation) = operations.recv_blocking() {
        handled += 1;
        if let Err(err) = apply(&operation, directory, registry) {
            // Would only fail if the error sink is gone; keep going regardless.
            let _ = errors.send(err);
        }
    }

    handled
}

/// Authenticate the caller, find their account, and run the operation on it.
pub fn apply(
    operation: &Operation,
    directory: &dyn Directory,
    registry: &AccountRegistry,
) -> Result<Money, Error> {
    let customer = directory.authenticate(operation.customer, &operation.credential)?;
    let account = registry.account(customer.id)?;

    let result = match operation.kind {
        OperationKind::Deposit(amount) => account.deposit(amount),
        OperationKind::Withdrawal(amount) => account.withdraw(amount),
    };

    result.map_err(|source| Error::Transaction {
        customer: customer.id,
        source,
    })
}
