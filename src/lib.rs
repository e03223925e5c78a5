#![forbid(unsafe_code)]
// Public library root

pub mod entry;
pub mod io;
pub mod ledger;
pub mod policy;
pub mod shared;
pub mod simulate;

pub use entry::{Item, LineItem, LogEntry};
pub use io::LoadError;
pub use ledger::{Award, DaySummary, LedgerError, LedgerSnapshot, RewardsLedger};
pub use policy::RewardsPolicy;
pub use shared::SharedLedger;
