//! Content sources that seed the store at startup.
//!
//! The navigator only needs a read-once hierarchical listing, so a source
//! is anything that can produce a [`Store`]. Listings on disk look like:
//!
//! ```json
//! {
//!   "collections": [
//!     {
//!       "name": "Reading list",
//!       "collapsed": false,
//!       "items": [{ "name": "Dune", "content": "Spice." }]
//!     }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::store::{Collection, Item, Store};

/// Something that can produce the initial store contents.
pub trait ContentSource {
    /// Load the full listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be read or parsed.
    fn load(&self) -> Result<Store>;

    /// Short human-readable label used in the status bar.
    fn label(&self) -> String;
}

#[derive(Debug, Deserialize)]
struct Listing {
    #[serde(default)]
    collections: Vec<Collection>,
}

/// Reads a listing document from disk.
///
/// Files ending in `.json5` are parsed leniently (comments, trailing
/// commas); anything else is treated as strict JSON.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentSource for FileSource {
    fn load(&self) -> Result<Store> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read listing {}", self.path.display()))?;
        let listing = parse_listing(&text, is_json5(&self.path))
            .with_context(|| format!("Failed to parse listing {}", self.path.display()))?;
        tracing::debug!(
            path = %self.path.display(),
            collections = listing.collections.len(),
            "loaded listing"
        );
        Ok(Store::new(listing.collections))
    }

    fn label(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.display().to_string(),
            |n| n.to_string_lossy().to_string(),
        )
    }
}

fn is_json5(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json5"))
}

fn parse_listing(text: &str, lenient: bool) -> Result<Listing> {
    if lenient {
        Ok(json5::from_str(text)?)
    } else {
        Ok(serde_json::from_str(text)?)
    }
}

/// Built-in demo data, used when no listing is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleSource;

impl ContentSource for SampleSource {
    fn load(&self) -> Result<Store> {
        let intro = Item::new("Introduction", "Welcome to the mock page.");
        let details = Item::new("Details", "Here are some detailed contents.");
        let conclusion = Item::new("Conclusion", "Summary and closing remarks.");
        Ok(Store::new(vec![
            Collection::new("Sample DB One", vec![intro, details.clone()]),
            Collection::new("Sample DB Two", vec![details, conclusion]).collapsed(true),
            Collection::new(
                "Sample DB Three",
                vec![Item::new("Only Page", "Single page content.")],
            )
            .collapsed(true),
        ]))
    }

    fn label(&self) -> String {
        "sample data".to_string()
    }
}
