//! Port traits decoupling the domain from storage, market data, and configuration.

pub mod store_port;
pub mod market_port;
pub mod config_port;
