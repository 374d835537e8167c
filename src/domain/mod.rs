//! Core domain types and logic.

pub mod holding;
pub mod transaction;
pub mod ledger;
pub mod alert;
pub mod alert_store;
pub mod evaluator;
pub mod validate;
pub mod error;
