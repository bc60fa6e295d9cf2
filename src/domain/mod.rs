pub mod account;
pub mod event;
pub mod product;

pub use account::*;
pub use event::*;
pub use product::*;
