//! Storage concerns: the allotment ledger and engine persistence
//!
//! Record storage economics are modeled as a simple balance book: creating a
//! proposal charges its proposer a fixed allotment, and dropping the record
//! pays that allotment to the designated successor. Persistence saves the
//! whole engine as pretty-printed JSON with atomic writes and rotating
//! backups.

pub mod ledger;
pub mod persistence;

pub use ledger::{StorageLedger, PROPOSAL_ALLOTMENT};
pub use persistence::{Storage, StorageConfig, StorageError};
