//! Dispatcher domain: configuration, rejection classes, block statistics.

pub mod config;
pub mod errors;
pub mod stats;

pub use config::DispatcherConfig;
pub use errors::DispatchError;
pub use stats::BlockStats;
