use super::transaction::{Kind, TransactionRecord};
use super::{Money, SequenceNumber};

/// Append-only, ordered history of everything attempted against one account.
///
/// There is no way to remove or edit an entry once it is in. The log itself
/// isn't synchronised: it lives next to the balance, behind the account guard,
/// and is only ever touched while holding it.
#[derive(Debug, Default)]
pub struct TransactionLog {
    records: Vec<TransactionRecord>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a new record, and return it.
    pub fn append(&mut self, kind: Kind, amount: Money) -> &TransactionRecord {
        let record = TransactionRecord::new(self.next_sequence(), kind, amount);
        self.records.push(record);

        &self.records[self.records.len() - 1]
    }

    // Sequence numbers start at 1.
    fn next_sequence(&self) -> SequenceNumber {
        self.records.len() as SequenceNumber + 1
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TransactionRecord> {
        self.records.iter()
    }

    /// Random access by sequence number.
    pub fn get(&self, sequence: SequenceNumber) -> Option<&TransactionRecord> {
        let index = usize::try_from(sequence.checked_sub(1)?).ok()?;
        self.records.get(index)
    }

    pub fn count(&self, kind: Kind) -> usize {
        self.records.iter().filter(|r| r.kind() == kind).count()
    }

    pub(super) fn to_vec(&self) -> Vec<TransactionRecord> {
        self.records.clone()
    }
}
