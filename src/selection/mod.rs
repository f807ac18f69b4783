//! Selection controller: the active row of the projected tree.
//!
//! # Example
//!
//! ```
//! use pagetree::selection::Selection;
//!
//! let mut sel = Selection::new();
//! sel.move_down(3);
//! sel.move_down(3);
//! sel.move_down(3);
//! assert_eq!(sel.index(), 2);
//! ```

use crate::error::NavError;
use crate::store::{ItemRef, Store};
use crate::tree::{Row, project};

/// What [`Selection::activate`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// A collection was collapsed or expanded.
    Toggled { collection: usize, collapsed: bool },
    /// An item row was selected; nothing changes.
    Item(ItemRef),
    /// There was no row to act on.
    Nothing,
}

/// Cursor into the projected rows.
///
/// The index always satisfies `index < rows.len()` while rows exist. With
/// no rows it stays at 0 and [`Selection::selected_row`] returns `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    index: usize,
}

impl Selection {
    pub const fn new() -> Self {
        Self { index: 0 }
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    pub fn selected_row(&self, rows: &[Row]) -> Option<Row> {
        rows.get(self.index).copied()
    }

    /// Move one row down; no-op on the last row.
    pub const fn move_down(&mut self, rows_len: usize) {
        if self.index + 1 < rows_len {
            self.index += 1;
        }
    }

    /// Move one row up; no-op on the first row.
    pub const fn move_up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub const fn first(&mut self) {
        self.index = 0;
    }

    pub const fn last(&mut self, rows_len: usize) {
        self.index = rows_len.saturating_sub(1);
    }

    /// Jump to an index, clamped to the row count.
    pub const fn select(&mut self, index: usize, rows_len: usize) {
        self.index = index;
        self.clamp(rows_len);
    }

    /// Pull the index back inside `[0, rows_len - 1]`.
    pub const fn clamp(&mut self, rows_len: usize) {
        if self.index >= rows_len {
            self.index = rows_len.saturating_sub(1);
        }
    }

    /// Act on the selected row.
    ///
    /// On a collection row the collapsed flag flips, `rows` is re-projected
    /// and the index re-clamped against the new length.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::OutOfRange`] if the row refers to a collection
    /// the store does not have; the store and rows are unchanged then.
    pub fn activate(&mut self, store: &mut Store, rows: &mut Vec<Row>) -> Result<Activation, NavError> {
        let Some(row) = self.selected_row(rows) else {
            return Ok(Activation::Nothing);
        };
        match row {
            Row::Collection { collection } => {
                let collapsed = store.toggle_collapsed(collection)?;
                *rows = project(store);
                self.clamp(rows.len());
                tracing::debug!(collection, collapsed, index = self.index, "toggled collection");
                Ok(Activation::Toggled {
                    collection,
                    collapsed,
                })
            }
            Row::Item { collection, item } => Ok(Activation::Item(ItemRef::new(collection, item))),
        }
    }
}
