//! Citation extraction from streamed fragments.
//!
//! Pure and infallible: missing or malformed grounding metadata yields an
//! empty list, never an error.

use launchdeck_core::types::Citation;

use crate::fragment::ResponseFragment;

/// Pull the web-source citations out of one streamed fragment.
///
/// Reads the grounding metadata of the first candidate only. Entries
/// without a URI are skipped; entries without a title get the default
/// label. Order is preserved and duplicates are NOT removed; merging
/// across fragments is the caller's concern and is append-only.
pub fn extract_citations(fragment: &ResponseFragment) -> Vec<Citation> {
    let Some(candidate) = fragment.candidates.first() else {
        return Vec::new();
    };
    let Some(metadata) = &candidate.grounding_metadata else {
        return Vec::new();
    };
    metadata
        .grounding_chunks
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .filter_map(|web| {
            let uri = web.uri.as_deref()?;
            if uri.is_empty() {
                return None;
            }
            Some(Citation::new(uri, web.title.clone()))
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
