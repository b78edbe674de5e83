//! Wire types exchanged between the scheduling display and its peers.

pub mod frames;
pub mod item;

pub use frames::{CallFrame, SyncCall};
pub use item::{ScheduledItem, FALLBACK_DURATION, FALLBACK_ITEM_IDX};
