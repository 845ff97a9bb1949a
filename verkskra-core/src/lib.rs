pub mod aggregate;
pub mod domain;
pub mod format;
pub mod hours;
pub mod import;
pub mod storage;
pub mod store;
pub mod sync;

pub use store::{Ledger, LedgerError, MaterialUpdate, WorkEntryUpdate};
