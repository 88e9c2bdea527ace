//! Error classification as seen from the indexing pipeline.

use std::error::Error as _;

use pagesearch_core::{Error, IndexSettings, LanguageEntry};
use pagesearch_fts::{
    Block, ContentResolver, MemoryContent, MemoryStore, PageTypeResolver, ProxyPageTypes,
};

#[test]
fn test_unknown_content_type_is_block_recoverable() {
    let err = MemoryContent::new()
        .resolve(&Block::new(9, "carousel", "en"))
        .unwrap_err();

    assert!(err.is_block_recoverable());
    assert!(!err.is_config());
    assert_eq!(
        err.to_string(),
        "Cannot resolve block 9: unknown content type 'carousel'"
    );
}

#[test]
fn test_unresolvable_page_type_is_config() {
    let err = ProxyPageTypes
        .resolve(&LanguageEntry::new("sr@latin", "Serbian (Latin)"))
        .unwrap_err();

    assert!(err.is_config());
    assert!(!err.is_block_recoverable());
    assert!(err.to_string().contains("sr@latin"));
}

#[test]
fn test_bad_snapshot_keeps_source() {
    let err = MemoryStore::from_json("{ \"pages\": [ { \"id\": \"one\" } ] }").unwrap_err();

    match &err {
        Error::Store { message, .. } => assert_eq!(message, "invalid page store snapshot"),
        other => unreachable!("expected Store error, got {other:?}"),
    }
    assert!(err.source().is_some());
    assert!(!err.is_block_recoverable());
}

#[test]
fn test_invalid_settings_file() {
    let err = IndexSettings::from_toml_str("languages = \"en\"").unwrap_err();
    assert!(matches!(err, Error::Toml(_)));
    assert!(err.is_config());
}

#[test]
fn test_missing_settings_file_reports_path() {
    let err = IndexSettings::load("/nonexistent/pagesearch.toml").unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/pagesearch.toml"));
}
