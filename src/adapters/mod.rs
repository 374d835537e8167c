//! Concrete adapter implementations for ports.

pub mod json_store_adapter;
pub mod file_config_adapter;
