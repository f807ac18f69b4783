// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. session::SessionManager)
    clippy::module_name_repetitions
)]

//! # Pagetree
//!
//! A terminal browser and editor for databases of text pages.
//!
//! Pagetree shows collections ("databases") of pages as a collapsible tree
//! with a live preview, and lets you edit a page either inline or in your
//! own `$EDITOR`.
//!
//! ## Architecture
//!
//! Pagetree uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`store`]: Collections, items and the single content write path
//! - [`source`]: Listing loaders (JSON, JSON5, built-in sample)
//! - [`tree`]: Projection of the store into visible rows
//! - [`selection`]: Selection cursor and activation
//! - [`editor`]: Inline edit buffer
//! - [`session`]: Edit mode state machine and external editor handoff
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`config`]: Persisted default flags
//! - [`logging`]: Tracing subscriber setup

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod logging;
pub mod selection;
pub mod session;
pub mod source;
pub mod store;
pub mod tree;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::error::NavError;
    pub use crate::session::{EditMode, SessionManager};
    pub use crate::source::{ContentSource, FileSource, SampleSource};
    pub use crate::store::{Collection, Item, ItemRef, Store};
    pub use crate::tree::Row;
}
