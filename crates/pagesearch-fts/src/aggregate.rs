//! Block text aggregation.
//!
//! Collects the searchable text of every block a page carries in one
//! language. Each block is resolved to its content-type instance, then:
//!
//! 1. the search fields (the instance's, else its content type's) are
//!    stripped and joined;
//! 2. if the instance or its content type asks for full-text capture, the
//!    instance is rendered with a synthetic [`RenderContext`] pinned to the
//!    language and the stripped output is added.
//!
//! Segments join with single spaces in placeholder/block order. Empty
//! blocks contribute nothing. Resolve and render failures are logged and
//! skipped so one broken block never hides the rest of the page; store
//! failures propagate.

use pagesearch_core::Result;

use crate::extract::{extract_text, normalize_whitespace};
use crate::model::{Block, Page};
use crate::source::{ContentSources, RenderContext};

/// Searchable text of every `language` block on `page`.
pub fn aggregate_text(sources: &ContentSources, page: &Page, language: &str) -> Result<String> {
    let blocks = sources.store.blocks(page, language)?;
    let context = RenderContext::for_language(language);
    let mut segments = Vec::new();

    for block in blocks.iter().filter(|b| b.language == language) {
        match block_segments(sources, block, &context) {
            Ok(parts) => segments.extend(parts),
            Err(e) if e.is_block_recoverable() => {
                log::warn!("Skipping block {} on page {}: {e}", block.id, page.id);
            }
            Err(e) => return Err(e),
        }
    }

    log::trace!(
        "Aggregated {} segments from {} blocks on page {} ({language})",
        segments.len(),
        blocks.len(),
        page.id
    );

    Ok(segments.join(" "))
}

fn block_segments(
    sources: &ContentSources,
    block: &Block,
    context: &RenderContext,
) -> Result<Vec<String>> {
    let resolved = sources.resolver.resolve(block)?;
    let Some(instance) = resolved.instance else {
        log::trace!("Block {} has no payload", block.id);
        return Ok(Vec::new());
    };

    let mut parts = Vec::new();

    let fields = instance
        .search_fields(&resolved.content_type)
        .iter()
        .map(|field| extract_text(instance.attribute(field)))
        .collect::<Vec<_>>()
        .join(" ");
    let fields = normalize_whitespace(&fields);
    if !fields.is_empty() {
        parts.push(fields);
    }

    if instance.captures_full_text(&resolved.content_type) {
        match sources.renderer.render(&instance, context) {
            Ok(markup) => {
                let text = extract_text(&markup);
                if !text.is_empty() {
                    parts.push(text);
                }
            }
            // Keep the field text already collected for this block.
            Err(e) if e.is_block_recoverable() => {
                log::warn!("Skipping rendered text of block {}: {e}", block.id);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(parts)
}

// ============================================================================
// Tests
// ============================================================================
