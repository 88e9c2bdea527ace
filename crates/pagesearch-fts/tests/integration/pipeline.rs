//! Integration tests for registry initialization and document building.

use chrono::{TimeZone, Utc};
use pagesearch_fts::{
    IndexRegistry, PageDocument, ProxyPageTypes, SearchIndex, initialize_search_indexes,
};

use crate::common::TestHarness;

fn registry(harness: &TestHarness) -> IndexRegistry {
    initialize_search_indexes(&harness.settings, &harness.sources, &ProxyPageTypes, None)
        .expect("registry should build")
}

fn candidate_ids(index: &dyn SearchIndex) -> Vec<u64> {
    index
        .candidate_set()
        .unwrap()
        .iter()
        .map(|p| p.id.0)
        .collect()
}

fn document(registry: &IndexRegistry, language: &str, page: u64) -> PageDocument {
    let index = registry.for_language(language).unwrap();
    let page = index
        .candidate_set()
        .unwrap()
        .into_iter()
        .find(|p| p.id.0 == page)
        .expect("page should be a candidate");
    index.build_document(&page).unwrap()
}

#[test]
fn test_registry_has_one_index_per_language() {
    let harness = TestHarness::new();
    let registry = registry(&harness);

    assert_eq!(registry.names().collect::<Vec<_>>(), ["page_en", "page_de"]);
    assert_eq!(registry.get("page_de").unwrap().language(), Some("de"));
}

#[test]
fn test_candidate_sets_follow_eligibility_rules() {
    let harness = TestHarness::new();
    let registry = registry(&harness);

    // 1 is the entry page, 5 a draft, 6 unpublished.
    assert_eq!(candidate_ids(registry.get("page_en").unwrap().as_ref()), vec![2, 3, 4]);
    // 4 redirects in German.
    assert_eq!(candidate_ids(registry.get("page_de").unwrap().as_ref()), vec![2]);
}

#[test]
fn test_document_text_combines_blocks_meta_and_title() {
    let harness = TestHarness::new();
    let doc = document(&registry(&harness), "en", 2);

    assert_eq!(
        doc.text,
        "We open at nine Bring your ticket Visit us Opening hours "
    );
    assert_eq!(doc.id, "page_en.2");
    assert_eq!(doc.url, "/en/hours/");
    assert_eq!(doc.site_id.0, 1);
}

#[test]
fn test_documents_never_mix_languages() {
    let harness = TestHarness::new();
    let registry = registry(&harness);

    let en = document(&registry, "en", 2);
    let de = document(&registry, "de", 2);

    assert!(!en.text.contains("öffnen"));
    assert!(!de.text.contains("nine"));
    assert!(!de.text.contains("ticket"));
    assert_eq!(de.text, "Wir öffnen um neun  Öffnungszeiten ");
}

#[test]
fn test_page_without_blocks_keeps_attributes() {
    let harness = TestHarness::new();
    let doc = document(&registry(&harness), "en", 3);

    assert_eq!(doc.text, " Members ");
    assert!(doc.login_required);
    assert_eq!(
        doc.pub_date,
        Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
    );
}

#[test]
fn test_initialization_is_idempotent() {
    let harness = TestHarness::new();
    let first = registry(&harness);
    let second = registry(&harness);

    assert_eq!(
        first.names().collect::<Vec<_>>(),
        second.names().collect::<Vec<_>>()
    );
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.fields(), b.fields());
        assert_eq!(candidate_ids(a.as_ref()), candidate_ids(b.as_ref()));
    }
}

#[test]
fn test_builds_leave_active_language_untouched() {
    let harness = TestHarness::new();
    let registry = registry(&harness);

    for index in registry.iter() {
        for page in index.candidate_set().unwrap() {
            index.build_document(&page).unwrap();
        }
    }

    assert_eq!(harness.active_language.current(), "en");
    assert!(harness.renderer.mismatches().is_empty());
    assert_eq!(harness.renderer.calls(), 1);
}
