//! Segment index calculation
//!
//! Maps character offsets in a request path onto `/`-delimited segment
//! indexes. All functions are **pure** and scan the string directly; there is
//! no precomputed offset table.

pub mod segment;
pub use segment::PathSegment;

/// Returns the index of the segment that `offset` falls in
///
/// Counts the `/` characters in `start..offset`. When scanning from the very
/// beginning of the path, a single leading `/` is skipped so that `"/a/b"`
/// and `"a/b"` index their segments the same way.
///
/// # Examples
///
/// ```
/// use pathway_router::path::segment_index_of;
///
/// assert_eq!(segment_index_of("abc", 0, 0), 0);
/// assert_eq!(segment_index_of("/a/b/c", 0, 5), 2);
/// assert_eq!(segment_index_of("a/b/c", 0, 4), 2);
/// ```
///
/// # Performance
///
/// - O(offset - start)
pub fn segment_index_of(path: &str, start: usize, offset: usize) -> usize {
    let begin = if start == 0 && path.starts_with('/') {
        1
    } else {
        start
    };

    if begin >= path.len() {
        return 0;
    }

    let stop = offset.min(path.len());
    if stop <= begin {
        return 0;
    }

    path.as_bytes()[begin..stop]
        .iter()
        .filter(|&&b| b == b'/')
        .count()
}

/// Number of segments a raw parameter value spans (`/` count plus one)
///
/// # Examples
///
/// ```
/// use pathway_router::path::segment_span;
///
/// assert_eq!(segment_span("abc"), 1);
/// assert_eq!(segment_span("a/b/c"), 3);
/// ```
pub fn segment_span(value: &str) -> usize {
    value.bytes().filter(|&b| b == b'/').count() + 1
}
