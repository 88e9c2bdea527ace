//! Loading page store snapshots.

use chrono::{TimeZone, Utc};
use pagesearch_fts::{MemoryStore, PageStore, candidate_set};

#[test]
fn test_empty_snapshot() {
    let store = MemoryStore::from_json("{}").unwrap();
    assert_eq!(store.page_count(), 0);
    assert!(store.sites().unwrap().is_empty());
}

#[test]
fn test_omitted_flags_default_to_unpublished() {
    let store = MemoryStore::from_json(
        r#"{
          "sites": [ { "id": 1, "domain": "a.test" } ],
          "pages": [
            { "id": 1, "site_id": 1, "titles": [ { "language": "en", "url": "/en/a/" } ] },
            { "id": 2, "site_id": 1, "published": true,
              "titles": [ { "language": "en", "url": "/en/b/" } ] }
          ]
        }"#,
    )
    .unwrap();

    let now = Utc.with_ymd_and_hms(2025, 5, 5, 0, 0, 0).unwrap();
    let pages = candidate_set(&store, "en", "homepage", now).unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].id.0, 2);
    // A record without a title yields no title, not an error.
    assert_eq!(pages[0].title("en"), None);
}

#[test]
fn test_publication_window_from_snapshot() {
    let store = MemoryStore::from_json(
        r#"{
          "sites": [ { "id": 1, "domain": "a.test" } ],
          "pages": [
            { "id": 1, "site_id": 1, "published": true,
              "publication_date": "2025-01-01T00:00:00Z",
              "publication_end_date": "2025-02-01T00:00:00Z",
              "titles": [ { "language": "en", "title": "Sale", "url": "/en/sale/" } ] }
          ]
        }"#,
    )
    .unwrap();

    let inside = Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap();
    let after = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
    assert_eq!(candidate_set(&store, "en", "homepage", inside).unwrap().len(), 1);
    assert!(candidate_set(&store, "en", "homepage", after).unwrap().is_empty());
}
