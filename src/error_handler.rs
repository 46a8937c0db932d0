use crate::error::Error;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Arc;

// Nothing here is fatal: a bad row or a refused withdrawal is logged, and the
// rest of the input keeps going. The ledger has already recorded refusals in
// the account history; this is only about telling whoever runs the batch.
//
// Each channel is drained on its own thread so that a burst of errors on one
// side never blocks the other.
pub fn sink(
    input_errors: Receiver<Error>,
    operation_errors: Receiver<Error>,
) -> (Vec<std::thread::JoinHandle<()>>, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));

    let handles = vec![
        drain("input", input_errors, Arc::clone(&count)),
        drain("operation", operation_errors, Arc::clone(&count)),
    ];

    (handles, count)
}

fn drain(
    source: &'static str,
    errors: Receiver<Error>,
    count: Arc<AtomicUsize>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        for err in errors {
            count.fetch_add(1, Ordering::Relaxed);
            if err.is_rejection() {
                tracing::warn!(source, "operation refused: {}", err);
            } else {
                tracing::warn!(source, "operation skipped: {}", err);
            }
        }
    })
}

#[cfg(test)]
mod sink_tests {
    use super::sink;
    use crate::error::Error;
    use std::sync::atomic::Ordering;
    use std::sync::mpsc;

    #[test]
    fn test_sink_counts_every_error() {
        let (input_tx, input_rx) = mpsc::channel();
        let (operation_tx, operation_rx) = mpsc::channel();

        input_tx.send(Error::Input("missing amount".to_string())).unwrap();
        operation_tx.send(Error::AccountNotFound(1)).unwrap();
        operation_tx.send(Error::AuthenticationFailure(2)).unwrap();
        drop(input_tx);
        drop(operation_tx);

        let (handles, count) = sink(input_rx, operation_rx);
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(3, count.load(Ordering::Relaxed));
    }
}
