use crate::ledger::Money;

use super::account::Account;

impl Account {
    /// Quote the interest on the current balance. Nothing is credited: the
    /// balance and the log are left as they are.
    pub fn calculate_interest(&self) -> Money {
        self.kind().calculate_interest(self.balance())
    }
}
