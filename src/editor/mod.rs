//! Inline editing buffer.
//!
//! A rope-backed working copy with a cursor, used by the edit session
//! manager while an item is edited in the preview pane.

mod buffer;

pub use buffer::{Cursor, Direction, EditBuffer};
