//! Terminal UI components.
//!
//! Rendering is a pure function of the [`Model`](crate::app::Model):
//! a "Databases" tree pane on the left, a "Preview" pane on the right
//! (the inline editor while editing), then toast and status bars.

mod overlays;
mod render;
mod status;

pub use render::{line_number_width, render, split_main_columns};
pub use status::truncate_to_width;

pub const TREE_WIDTH_PERCENT: u16 = 33;
pub const PREVIEW_WIDTH_PERCENT: u16 = 67;

/// Rows available inside a bordered pane for a terminal `height`, after
/// the status bar.
pub fn pane_inner_height(height: u16) -> usize {
    usize::from(height.saturating_sub(1 + 2))
}

/// Scroll offset that keeps `target` inside a window of `visible` rows,
/// moving as little as possible from `offset`.
pub const fn follow(offset: usize, target: usize, visible: usize) -> usize {
    if visible == 0 || target < offset {
        target
    } else if target >= offset + visible {
        target + 1 - visible
    } else {
        offset
    }
}
