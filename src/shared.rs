// src/shared.rs
use crate::entry::LogEntry;
use crate::ledger::{DaySummary, LedgerError, LedgerSnapshot, RewardsLedger};
use parking_lot::Mutex;
use std::sync::Arc;

/// A ledger handle that can be cloned across threads.
///
/// Each `process_day` holds the lock for the whole batch, so days submitted
/// concurrently are applied one after another and never interleave.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<Mutex<RewardsLedger>>,
}

impl SharedLedger {
    pub fn new(ledger: RewardsLedger) -> Self {
        SharedLedger {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    pub fn process_day(&self, entries: &[LogEntry]) -> Result<DaySummary, LedgerError> {
        self.inner.lock().process_day(entries)
    }

    pub fn balance(&self, customer_id: &str) -> i64 {
        self.inner.lock().get_balance(customer_id)
    }

    pub fn item_count(&self, item_id: &str) -> u64 {
        self.inner.lock().get_item_count(item_id)
    }

    pub fn errors(&self) -> Vec<LogEntry> {
        self.inner.lock().get_errors().to_vec()
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.inner.lock().snapshot()
    }
}

impl From<RewardsLedger> for SharedLedger {
    fn from(ledger: RewardsLedger) -> Self {
        Self::new(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulate;
    use std::thread;

    #[test]
    fn concurrent_days_match_sequential() {
        let days = simulate::generate_days(9, 8, 40);

        let mut sequential = RewardsLedger::new();
        for day in &days {
            sequential.process_day(day).unwrap();
        }

        let shared = SharedLedger::default();
        let handles: Vec<_> = days
            .into_iter()
            .map(|day| {
                let l = shared.clone();
                thread::spawn(move || l.process_day(&day).map(|s| s.entries))
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap().unwrap(), 40);
        }

        // errors are appended in whatever order the days ran
        let mut got = shared.snapshot();
        let mut want = sequential.snapshot();
        assert_eq!(got.balances, want.balances);
        assert_eq!(got.item_counts, want.item_counts);
        got.errors.sort_by(|a, b| format!("{:?}", a).cmp(&format!("{:?}", b)));
        want.errors.sort_by(|a, b| format!("{:?}", a).cmp(&format!("{:?}", b)));
        assert_eq!(got.errors, want.errors);
    }
}
