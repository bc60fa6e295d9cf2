//! System orchestration, configuration, startup and shutdown.

pub mod config;
pub mod marketplace_system;
pub mod tracing;

pub use config::*;
pub use marketplace_system::*;
pub use self::tracing::*;
