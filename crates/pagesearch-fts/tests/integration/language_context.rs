//! Integration tests for the active-language section around document builds.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::thread;

use pagesearch_core::{ActiveLanguage, Result};
use pagesearch_fts::{
    ContentInstance, ContentSources, MemoryStore, ProxyPageTypes, RenderContext, Renderer,
    initialize_search_indexes,
};

use crate::common::{STORE_JSON, TestHarness, fixture_content};

#[test]
fn test_parallel_builds_share_one_language_setting() {
    let harness = TestHarness::new();
    let registry = Arc::new(
        initialize_search_indexes(&harness.settings, &harness.sources, &ProxyPageTypes, None)
            .unwrap(),
    );

    let workers: Vec<_> = ["en", "de", "en", "de"]
        .into_iter()
        .map(|language| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let index = registry.for_language(language).unwrap();
                for _ in 0..25 {
                    for page in index.candidate_set().unwrap() {
                        index.build_document(&page).unwrap();
                    }
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    assert!(harness.renderer.mismatches().is_empty());
    assert_eq!(harness.renderer.calls(), 50);
    assert_eq!(harness.active_language.current(), "en");
}

#[test]
fn test_language_restored_when_renderer_panics() {
    struct Exploding;
    impl Renderer for Exploding {
        #[allow(clippy::panic)]
        fn render(&self, _: &ContentInstance, _: &RenderContext) -> Result<String> {
            panic!("template engine crashed");
        }
    }

    let harness = TestHarness::new();
    let active = ActiveLanguage::new("de");
    let sources = ContentSources::new(
        Arc::new(MemoryStore::from_json(STORE_JSON).unwrap()),
        Arc::new(fixture_content()),
        Arc::new(Exploding),
        active.clone(),
    );
    let registry =
        initialize_search_indexes(&harness.settings, &sources, &ProxyPageTypes, None).unwrap();
    let en = registry.for_language("en").unwrap();
    let page = en
        .candidate_set()
        .unwrap()
        .into_iter()
        .find(|p| p.id.0 == 2)
        .unwrap();

    let outcome = catch_unwind(AssertUnwindSafe(|| en.build_document(&page)));

    assert!(outcome.is_err());
    assert_eq!(active.current(), "de");

    // The section is released; later builds still run.
    let de = registry.for_language("de").unwrap();
    let page = de.candidate_set().unwrap().remove(0);
    assert!(de.build_document(&page).is_ok());
    assert_eq!(active.current(), "de");
}

#[test]
fn test_independent_settings_do_not_interfere() {
    let first = TestHarness::new();
    let second = TestHarness::new();
    let _held = second.active_language.enter("de");

    let registry =
        initialize_search_indexes(&first.settings, &first.sources, &ProxyPageTypes, None).unwrap();
    let de = registry.for_language("de").unwrap();
    for page in de.candidate_set().unwrap() {
        de.build_document(&page).unwrap();
    }

    assert_eq!(first.active_language.current(), "en");
    assert_eq!(second.active_language.current(), "de");
}
