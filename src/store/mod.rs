//! Content store: collections of items and their text.
//!
//! The store has no knowledge of the UI. Item content changes through a
//! single path, [`Store::set_item_content`], which the edit session manager
//! calls from its commit steps.

use serde::Deserialize;

use crate::error::NavError;

/// A single page of text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub content: String,
}

impl Item {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// An ordered group of items that can be collapsed in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Collection {
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub collapsed: bool,
}

impl Collection {
    pub fn new(name: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            name: name.into(),
            items,
            collapsed: false,
        }
    }

    /// Builder-style collapsed flag, handy for fixtures.
    #[must_use]
    pub const fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }
}

/// Stable address of an item inside the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemRef {
    pub collection: usize,
    pub item: usize,
}

impl ItemRef {
    pub const fn new(collection: usize, item: usize) -> Self {
        Self { collection, item }
    }
}

/// All collections, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    collections: Vec<Collection>,
}

impl Store {
    pub const fn new(collections: Vec<Collection>) -> Self {
        Self { collections }
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn collection(&self, index: usize) -> Option<&Collection> {
        self.collections.get(index)
    }

    pub fn item(&self, at: ItemRef) -> Option<&Item> {
        self.collections.get(at.collection)?.items.get(at.item)
    }

    /// Number of collections.
    pub const fn len(&self) -> usize {
        self.collections.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Total number of items across all collections.
    pub fn item_count(&self) -> usize {
        self.collections.iter().map(|c| c.items.len()).sum()
    }

    /// Resolve an item reference or report it as out of range.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::OutOfRange`] if either index is invalid.
    pub fn validate(&self, at: ItemRef) -> Result<&Item, NavError> {
        self.item(at)
            .ok_or(NavError::out_of_range(at.collection, Some(at.item)))
    }

    /// Replace an item's content.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::OutOfRange`] if either index is invalid; the
    /// store is left untouched in that case.
    pub fn set_item_content(&mut self, at: ItemRef, content: String) -> Result<(), NavError> {
        let item = self
            .collections
            .get_mut(at.collection)
            .and_then(|c| c.items.get_mut(at.item))
            .ok_or(NavError::out_of_range(at.collection, Some(at.item)))?;
        item.content = content;
        Ok(())
    }

    /// Flip a collection's collapsed flag and return the new value.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::OutOfRange`] if the collection does not exist.
    pub fn toggle_collapsed(&mut self, collection: usize) -> Result<bool, NavError> {
        let target = self
            .collections
            .get_mut(collection)
            .ok_or(NavError::out_of_range(collection, None))?;
        target.collapsed = !target.collapsed;
        Ok(target.collapsed)
    }

    /// Collapse or expand every collection at once.
    pub fn set_all_collapsed(&mut self, collapsed: bool) {
        for collection in &mut self.collections {
            collection.collapsed = collapsed;
        }
    }
}
