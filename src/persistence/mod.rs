//! Save/load persistence
//!
//! Features:
//! - Line-oriented save record (see `save_record`)
//! - One file per player, written tmp-then-rename
//! - Truncated or malformed records fail the load without touching a live session

pub mod save_record;
pub mod store;

pub use save_record::SaveRecord;
pub use store::SaveStore;
