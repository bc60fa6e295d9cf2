#[macro_use]
mod macros;
mod ledger_client;

pub use ledger_client::*;
