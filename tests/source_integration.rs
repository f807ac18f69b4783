use pagetree::source::{ContentSource, FileSource, SampleSource};
use pagetree::store::ItemRef;
use pagetree::tree::{Row, preview_text, project};

#[test]
fn test_json_listing_loads_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pages.json");
    std::fs::write(
        &path,
        r#"{
            "collections": [
                { "name": "Recipes", "items": [
                    { "name": "Bread", "content": "Flour, water, salt." },
                    { "name": "Soup" }
                ]},
                { "name": "Empty", "collapsed": true }
            ]
        }"#,
    )
    .unwrap();

    let source = FileSource::new(&path);
    let store = source.load().unwrap();

    assert_eq!(source.label(), "pages.json");
    assert_eq!(store.len(), 2);
    assert_eq!(store.collections()[0].items[1].name, "Soup");
    assert_eq!(store.item(ItemRef::new(0, 1)).unwrap().content, "");
    assert!(store.collections()[1].items.is_empty());
    assert_eq!(project(&store).len(), 4);
}

#[test]
fn test_json5_listing_accepts_comments_and_trailing_commas() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pages.json5");
    std::fs::write(
        &path,
        r#"{
            // reading list
            collections: [
                { name: "Books", items: [{ name: "Dune", content: "Spice.", },], },
            ],
        }"#,
    )
    .unwrap();

    let store = FileSource::new(&path).load().unwrap();
    let row = Row::Item {
        collection: 0,
        item: 0,
    };
    assert_eq!(preview_text(&store, Some(row)), "Spice.");
}

#[test]
fn test_malformed_listing_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = FileSource::new(&path).load().unwrap_err();
    assert!(format!("{err:#}").contains("broken.json"));
}

#[test]
fn test_missing_listing_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(FileSource::new(dir.path().join("absent.json")).load().is_err());
}

#[test]
fn test_sample_source_projects_three_collections_and_two_pages() {
    let store = SampleSource.load().unwrap();
    let rows = project(&store);
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0], Row::Collection { collection: 0 });
    assert_eq!(rows[3], Row::Collection { collection: 1 });
    assert_eq!(rows[4], Row::Collection { collection: 2 });
}
