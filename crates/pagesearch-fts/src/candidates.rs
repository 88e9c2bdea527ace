//! Page candidate selection.
//!
//! A page is indexed for a language when, on its own site:
//!
//! - it has a title record in that language that does not redirect,
//! - it is published (flag set, inside its publication window),
//! - it is the public copy, not the draft,
//! - it is not the site's entry page.
//!
//! Selection runs once per site; the per-site results are unioned and
//! deduplicated by page id. The result is ordered by page id.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use pagesearch_core::Result;

use crate::model::{Page, PageId, Site};
use crate::source::{PageQuery, PageStore};

/// The query selecting indexable pages of `site` in `language`.
pub fn eligibility_query(
    site: &Site,
    language: &str,
    entry_page_marker: &str,
    now: DateTime<Utc>,
) -> PageQuery {
    PageQuery {
        site: Some(site.id),
        published_at: Some(now),
        is_draft: Some(false),
        title_language: Some(language.to_string()),
        without_redirect: true,
        exclude_reverse_id: Some(entry_page_marker.to_string()),
    }
}

/// Pages of `site` eligible for the `language` index at `now`.
pub fn eligible_pages(
    store: &dyn PageStore,
    site: &Site,
    language: &str,
    entry_page_marker: &str,
    now: DateTime<Utc>,
) -> Result<Vec<Page>> {
    let query = eligibility_query(site, language, entry_page_marker, now);
    let mut unique = BTreeMap::new();
    collect_into(&mut unique, store.pages(&query)?, &query);
    Ok(unique.into_values().collect())
}

/// Union of [`eligible_pages`] over every site in the store.
pub fn candidate_set(
    store: &dyn PageStore,
    language: &str,
    entry_page_marker: &str,
    now: DateTime<Utc>,
) -> Result<Vec<Page>> {
    let mut unique = BTreeMap::new();

    for site in store.sites()? {
        let query = eligibility_query(&site, language, entry_page_marker, now);
        let pages = store.pages(&query)?;
        let before = unique.len();
        collect_into(&mut unique, pages, &query);
        log::debug!(
            "Site {} ({}) contributes {} pages to the '{language}' candidate set",
            site.id,
            site.domain,
            unique.len() - before
        );
    }

    Ok(unique.into_values().collect())
}

fn collect_into(unique: &mut BTreeMap<PageId, Page>, pages: Vec<Page>, query: &PageQuery) {
    for page in pages {
        if query.matches(&page) {
            unique.entry(page.id).or_insert(page);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
