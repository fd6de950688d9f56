//! The admission gate's queue-facing surface: pending items and the
//! dispatcher that decides whether they may run.

mod dispatcher;
mod item;

pub use dispatcher::Dispatcher;
pub use item::QueuedItem;
