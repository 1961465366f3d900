//! CLI commands module.

mod collection;
mod concurrency;
mod standard;
mod util;

pub use collection::CollectionCommand;
pub use concurrency::ConcurrencyCommand;
pub use standard::StandardCommand;

pub(crate) use util::*;
