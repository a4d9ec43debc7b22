//! URI-info accumulator
//!
//! Collects what a dispatch learns about the request path: the trail of
//! matched URIs, path parameter values, and the path segments each parameter
//! was taken from. Every entry is kept in both encoded and decoded form.

use crate::path::segment::decode_text;
use crate::PathSegment;

/// Insertion-ordered multi-valued map
///
/// Names keep the position of their first insertion; values for a name keep
/// the order they were added in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiMap<V> {
    entries: Vec<(String, Vec<V>)>,
}

impl<V> Default for MultiMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> MultiMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` under `name`
    pub fn add(&mut self, name: impl Into<String>, value: V) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Vec<V>> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values)
    }

    pub fn get_first(&self, name: &str) -> Option<&V> {
        self.get(name).and_then(|values| values.first())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[V])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-request accumulator written by the parameter binder
#[derive(Debug, Clone, Default)]
pub struct UriInfo {
    path: String,
    encoded_segments: Vec<PathSegment>,
    decoded_segments: Vec<PathSegment>,
    encoded_matched_uris: Vec<String>,
    matched_uris: Vec<String>,
    encoded_path_params: MultiMap<String>,
    path_params: MultiMap<String>,
    encoded_param_segments: MultiMap<Vec<PathSegment>>,
    param_segments: MultiMap<Vec<PathSegment>>,
}

impl UriInfo {
    /// Creates the accumulator for `path`, pre-splitting its segments
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            encoded_segments: PathSegment::parse_segments(&path, false),
            decoded_segments: PathSegment::parse_segments(&path, true),
            path,
            ..Default::default()
        }
    }

    /// The raw request path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Request path segments, encoded (`decode == false`) or decoded
    pub fn path_segments(&self, decode: bool) -> &[PathSegment] {
        if decode {
            &self.decoded_segments
        } else {
            &self.encoded_segments
        }
    }

    /// Records a matched URI; the most recent entry comes first
    pub fn push_matched_uri(&mut self, encoded: impl Into<String>, decoded: impl Into<String>) {
        self.encoded_matched_uris.insert(0, encoded.into());
        self.matched_uris.insert(0, decoded.into());
    }

    pub fn matched_uris(&self, decode: bool) -> &[String] {
        if decode {
            &self.matched_uris
        } else {
            &self.encoded_matched_uris
        }
    }

    /// Records a raw parameter value along with its decoded form
    pub fn add_encoded_path_parameter(&mut self, name: &str, value: &str) {
        self.encoded_path_params.add(name, value.to_string());
        self.path_params.add(name, decode_text(value).into_owned());
    }

    pub fn path_parameters(&self, decode: bool) -> &MultiMap<String> {
        if decode {
            &self.path_params
        } else {
            &self.encoded_path_params
        }
    }

    /// Records the segments a parameter value was taken from
    pub fn add_path_parameter_segments(
        &mut self,
        name: &str,
        encoded: Vec<PathSegment>,
        decoded: Vec<PathSegment>,
    ) {
        self.encoded_param_segments.add(name, encoded);
        self.param_segments.add(name, decoded);
    }

    pub fn path_parameter_segments(&self, decode: bool) -> &MultiMap<Vec<PathSegment>> {
        if decode {
            &self.param_segments
        } else {
            &self.encoded_param_segments
        }
    }
}
