//! Persistence port for the two ledger documents.

use crate::domain::alert::AlertBook;
use crate::domain::error::SharebookError;
use crate::domain::ledger::LedgerBook;

/// Durable load/save of the ledger and alert documents.
///
/// Loading a location that has never been written yields an empty document.
/// Saves must be atomic: a reader never observes a partially written
/// document, only the prior version or the fully updated one.
pub trait StorePort {
    fn load_ledger(&self) -> Result<LedgerBook, SharebookError>;

    fn save_ledger(&self, book: &LedgerBook) -> Result<(), SharebookError>;

    fn load_alerts(&self) -> Result<AlertBook, SharebookError>;

    fn save_alerts(&self, book: &AlertBook) -> Result<(), SharebookError>;
}
