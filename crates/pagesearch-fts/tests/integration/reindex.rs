//! Integration tests for rebuilding the registry's indexes with Tantivy.

use pagesearch_fts::{Indexer, ProxyPageTypes, Reindexer, RegistryHandle, SearchSchema, page_fields};
use tantivy::collector::Count;
use tantivy::query::{BooleanQuery, Occur, Query, QueryParser, TermQuery};
use tantivy::schema::IndexRecordOption;
use tantivy::{Index, Term};
use tempfile::TempDir;

use crate::common::TestHarness;

/// Open a rebuilt index for reading, with its language tokenizer registered.
fn open(root: &TempDir, name: &str) -> (Index, SearchSchema) {
    let index = Index::open_in_dir(root.path().join(name)).unwrap();
    let language = name.trim_start_matches("page_");
    let schema = SearchSchema::from_fields(Some(language), page_fields()).unwrap();
    schema.register_tokenizers(&index);
    (index, schema)
}

fn count(index: &Index, query: &dyn Query) -> usize {
    index.reader().unwrap().searcher().search(query, &Count).unwrap()
}

fn text_query(index: &Index, schema: &SearchSchema, text: &str) -> Box<dyn Query> {
    QueryParser::for_index(index, vec![schema.text])
        .parse_query(text)
        .unwrap()
}

#[test]
fn test_rebuild_configured_writes_every_language() {
    let root = TempDir::new().unwrap();
    let mut harness = TestHarness::new();
    harness.settings.index_root = Some(root.path().to_path_buf());

    let handle = RegistryHandle::empty();
    let registry = handle
        .rebuild(&harness.settings, &harness.sources, &ProxyPageTypes)
        .unwrap();
    let totals = Reindexer::from_settings(&harness.settings)
        .rebuild_configured(&registry, &harness.settings)
        .unwrap();

    assert_eq!(totals["page_en"].documents_indexed, 3);
    assert_eq!(totals["page_en"].pages_considered, 3);
    assert_eq!(totals["page_de"].documents_indexed, 1);
    assert!(totals.values().all(|stats| stats.errors == 0));
}

#[test]
fn test_indexed_text_is_searchable_per_language() {
    let root = TempDir::new().unwrap();
    let harness = TestHarness::new();
    let handle = RegistryHandle::empty();
    let registry = handle
        .rebuild(&harness.settings, &harness.sources, &ProxyPageTypes)
        .unwrap();
    Reindexer::new().rebuild_all(&registry, root.path()).unwrap();

    let (en, en_schema) = open(&root, "page_en");
    assert_eq!(count(&en, text_query(&en, &en_schema, "ticket").as_ref()), 1);
    assert_eq!(count(&en, text_query(&en, &en_schema, "workshop").as_ref()), 1);
    assert_eq!(count(&en, text_query(&en, &en_schema, "members").as_ref()), 1);
    assert_eq!(count(&en, text_query(&en, &en_schema, "neun").as_ref()), 0);
    // Entry page title is never indexed.
    assert_eq!(count(&en, text_query(&en, &en_schema, "home").as_ref()), 0);

    let (de, de_schema) = open(&root, "page_de");
    assert_eq!(count(&de, text_query(&de, &de_schema, "neun").as_ref()), 1);
    assert_eq!(count(&de, text_query(&de, &de_schema, "ticket").as_ref()), 0);
}

#[test]
fn test_site_and_login_filters() {
    let root = TempDir::new().unwrap();
    let harness = TestHarness::new();
    let handle = RegistryHandle::empty();
    let registry = handle
        .rebuild(&harness.settings, &harness.sources, &ProxyPageTypes)
        .unwrap();
    Reindexer::new().rebuild_all(&registry, root.path()).unwrap();

    let (en, schema) = open(&root, "page_en");
    let site = |id: u64| -> Box<dyn Query> {
        Box::new(TermQuery::new(
            Term::from_field_u64(schema.site_id, id),
            IndexRecordOption::Basic,
        ))
    };
    let public = || -> Box<dyn Query> {
        Box::new(TermQuery::new(
            Term::from_field_bool(schema.login_required, false),
            IndexRecordOption::Basic,
        ))
    };

    assert_eq!(count(&en, site(1).as_ref()), 2);
    assert_eq!(count(&en, site(2).as_ref()), 1);

    let public_on_site_one = BooleanQuery::new(vec![(Occur::Must, site(1)), (Occur::Must, public())]);
    assert_eq!(count(&en, &public_on_site_one), 1);
}

#[test]
fn test_rebuild_is_repeatable() {
    let root = TempDir::new().unwrap();
    let harness = TestHarness::new();
    let handle = RegistryHandle::empty();
    let reindexer = Reindexer::new().with_batch_size(1);

    let first = reindexer
        .rebuild_all(
            &handle
                .rebuild(&harness.settings, &harness.sources, &ProxyPageTypes)
                .unwrap(),
            root.path(),
        )
        .unwrap();
    let second = reindexer
        .rebuild_all(
            &handle
                .rebuild(&harness.settings, &harness.sources, &ProxyPageTypes)
                .unwrap(),
            root.path(),
        )
        .unwrap();

    assert_eq!(first, second);

    let schema = SearchSchema::for_index(handle.snapshot().get("page_en").unwrap().as_ref()).unwrap();
    let indexer = Indexer::new(&root.path().join("page_en"), &schema).unwrap();
    assert_eq!(indexer.num_docs().unwrap(), 3);
}
