//! Tree projection: the flat list of visible rows.
//!
//! Rows hold indices into the [`Store`], never copies, so content edits are
//! visible without resynchronising. The projection is recomputed from
//! scratch after every structural change instead of being patched.

use crate::store::{ItemRef, Store};

/// Preview text shown when a collection row is selected.
pub const COLLECTION_PLACEHOLDER: &str = "<Database>: select a page and press Enter";

/// One visible line of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Row {
    Collection { collection: usize },
    Item { collection: usize, item: usize },
}

impl Row {
    /// Index of the collection this row belongs to.
    pub const fn collection(self) -> usize {
        match self {
            Self::Collection { collection } | Self::Item { collection, .. } => collection,
        }
    }

    pub const fn item_ref(self) -> Option<ItemRef> {
        match self {
            Self::Collection { .. } => None,
            Self::Item { collection, item } => Some(ItemRef::new(collection, item)),
        }
    }

    pub const fn is_collection(self) -> bool {
        matches!(self, Self::Collection { .. })
    }
}

/// Project the store into visible rows.
///
/// Collections appear in store order, each immediately followed by its
/// items when expanded.
pub fn project(store: &Store) -> Vec<Row> {
    let mut rows = Vec::with_capacity(store.len() + store.item_count());
    for (collection, c) in store.collections().iter().enumerate() {
        rows.push(Row::Collection { collection });
        if !c.collapsed {
            rows.extend((0..c.items.len()).map(|item| Row::Item { collection, item }));
        }
    }
    rows
}

/// Display label for a row: `+`/`-` marks collapsed/expanded collections,
/// items are indented.
pub fn row_label(store: &Store, row: Row) -> String {
    match row {
        Row::Collection { collection } => store.collection(collection).map_or_else(
            String::new,
            |c| {
                let marker = if c.collapsed { '+' } else { '-' };
                format!("{marker} {}", c.name)
            },
        ),
        Row::Item { .. } => row
            .item_ref()
            .and_then(|at| store.item(at))
            .map_or_else(String::new, |item| format!("  {}", item.name)),
    }
}

/// Text for the preview pane.
pub fn preview_text(store: &Store, row: Option<Row>) -> &str {
    row.and_then(Row::item_ref)
        .and_then(|at| store.item(at))
        .map_or(COLLECTION_PLACEHOLDER, |item| item.content.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Collection, Item};

    fn scenario_store() -> Store {
        Store::new(vec![Collection::new(
            "Sample DB One",
            vec![
                Item::new("Introduction", "Welcome..."),
                Item::new("Details", "Here are..."),
            ],
        )])
    }

    #[test]
    fn test_project_expanded_collection() {
        let rows = project(&scenario_store());
        assert_eq!(
            rows,
            vec![
                Row::Collection { collection: 0 },
                Row::Item {
                    collection: 0,
                    item: 0
                },
                Row::Item {
                    collection: 0,
                    item: 1
                },
            ]
        );
    }

    #[test]
    fn test_project_collapsed_collection_hides_items() {
        let mut store = scenario_store();
        store.toggle_collapsed(0).unwrap();
        assert_eq!(project(&store), vec![Row::Collection { collection: 0 }]);
    }

    #[test]
    fn test_project_empty_store() {
        assert!(project(&Store::default()).is_empty());
    }

    #[test]
    fn test_row_labels() {
        let mut store = scenario_store();
        assert_eq!(
            row_label(&store, Row::Collection { collection: 0 }),
            "- Sample DB One"
        );
        assert_eq!(
            row_label(
                &store,
                Row::Item {
                    collection: 0,
                    item: 1
                }
            ),
            "  Details"
        );
        store.toggle_collapsed(0).unwrap();
        assert_eq!(
            row_label(&store, Row::Collection { collection: 0 }),
            "+ Sample DB One"
        );
    }

    #[test]
    fn test_preview_text() {
        let store = scenario_store();
        assert_eq!(
            preview_text(
                &store,
                Some(Row::Item {
                    collection: 0,
                    item: 0
                })
            ),
            "Welcome..."
        );
        assert_eq!(
            preview_text(&store, Some(Row::Collection { collection: 0 })),
            COLLECTION_PLACEHOLDER
        );
        assert_eq!(preview_text(&store, None), COLLECTION_PLACEHOLDER);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_store() -> impl Strategy<Value = Store> {
            prop::collection::vec((0..6usize, any::<bool>()), 0..8).prop_map(|specs| {
                Store::new(
                    specs
                        .into_iter()
                        .enumerate()
                        .map(|(ci, (n, collapsed))| {
                            let items = (0..n)
                                .map(|ii| Item::new(format!("p{ii}"), format!("{ci}/{ii}")))
                                .collect();
                            Collection::new(format!("c{ci}"), items).collapsed(collapsed)
                        })
                        .collect(),
                )
            })
        }

        proptest! {
            #[test]
            fn row_counts_follow_collapsed_flags(store in arb_store()) {
                let rows = project(&store);
                let collection_rows = rows.iter().filter(|r| r.is_collection()).count();
                prop_assert_eq!(collection_rows, store.len());

                for (ci, c) in store.collections().iter().enumerate() {
                    let item_rows = rows
                        .iter()
                        .filter(|r| !r.is_collection() && r.collection() == ci)
                        .count();
                    let expected = if c.collapsed { 0 } else { c.items.len() };
                    prop_assert_eq!(item_rows, expected);
                }
            }

            #[test]
            fn items_follow_their_collection(store in arb_store()) {
                let rows = project(&store);
                let mut current = None;
                for row in rows {
                    match row {
                        Row::Collection { collection } => current = Some(collection),
                        Row::Item { collection, .. } => prop_assert_eq!(Some(collection), current),
                    }
                }
            }

            #[test]
            fn double_toggle_restores_projection(store in arb_store(), pick in 0..8usize) {
                prop_assume!(!store.is_empty());
                let target = pick % store.len();
                let original = project(&store);
                let mut toggled = store;
                toggled.toggle_collapsed(target).unwrap();
                toggled.toggle_collapsed(target).unwrap();
                prop_assert_eq!(project(&toggled), original);
            }
        }
    }
}
