//! Path segments with matrix parameters
//!
//! A segment such as `cars;color=red;year=2011` carries the path text `cars`
//! and the matrix parameters `color` and `year`.

use std::borrow::Cow;
use std::fmt;

use crate::uri_info::MultiMap;

/// One `/`-delimited component of a request path
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathSegment {
    path: String,
    matrix: MultiMap<String>,
}

impl PathSegment {
    /// Parses a single raw segment, optionally percent-decoding it
    ///
    /// # Examples
    ///
    /// ```
    /// use pathway_router::PathSegment;
    ///
    /// let seg = PathSegment::parse("cars;color=red%20ish", true);
    /// assert_eq!(seg.path(), "cars");
    /// assert_eq!(seg.matrix_parameters().get_first("color").map(String::as_str), Some("red ish"));
    /// ```
    pub fn parse(raw: &str, decode: bool) -> Self {
        let mut parts = raw.split(';');
        let path = parts.next().unwrap_or_default();

        let mut matrix = MultiMap::new();
        for param in parts.filter(|p| !p.is_empty()) {
            let (name, value) = param.split_once('=').unwrap_or((param, ""));
            if decode {
                matrix.add(decode_text(name).into_owned(), decode_text(value).into_owned());
            } else {
                matrix.add(name.to_string(), value.to_string());
            }
        }

        let path = if decode {
            decode_text(path).into_owned()
        } else {
            path.to_string()
        };

        Self { path, matrix }
    }

    /// Splits a request path into segments
    ///
    /// One leading `/` is stripped. Every remaining `/` separates two
    /// segments, so a trailing `/` yields a trailing empty segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathway_router::PathSegment;
    ///
    /// let segs = PathSegment::parse_segments("/a/b%2Fc/", true);
    /// let paths: Vec<&str> = segs.iter().map(|s| s.path()).collect();
    /// assert_eq!(paths, vec!["a", "b/c", ""]);
    /// ```
    pub fn parse_segments(path: &str, decode: bool) -> Vec<PathSegment> {
        let trimmed = path.strip_prefix('/').unwrap_or(path);

        trimmed
            .split('/')
            .map(|s| PathSegment::parse(s, decode))
            .collect()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn matrix_parameters(&self) -> &MultiMap<String> {
        &self.matrix
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        for (name, values) in self.matrix.iter() {
            for value in values {
                write!(f, ";{}={}", name, value)?;
            }
        }
        Ok(())
    }
}

/// Percent-decodes `text`, keeping the raw form when it is not valid UTF-8
pub fn decode_text(text: &str) -> Cow<'_, str> {
    urlencoding::decode(text).unwrap_or(Cow::Borrowed(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_segment() {
        let seg = PathSegment::parse("users", false);
        assert_eq!(seg.path(), "users");
        assert!(seg.matrix_parameters().is_empty());
    }

    #[test]
    fn test_parse_matrix_parameters() {
        let seg = PathSegment::parse("cars;color=red;year=2011;color=blue;flag", false);
        assert_eq!(seg.path(), "cars");
        let colors = seg.matrix_parameters().get("color").unwrap();
        assert_eq!(colors, &vec!["red".to_string(), "blue".to_string()]);
        assert_eq!(
            seg.matrix_parameters().get_first("flag").map(String::as_str),
            Some("")
        );
    }

    #[test]
    fn test_encoded_form_is_kept_raw() {
        let seg = PathSegment::parse("a%20b", false);
        assert_eq!(seg.path(), "a%20b");
        let seg = PathSegment::parse("a%20b", true);
        assert_eq!(seg.path(), "a b");
    }

    #[test]
    fn test_invalid_utf8_falls_back_to_raw() {
        let seg = PathSegment::parse("%FF", true);
        assert_eq!(seg.path(), "%FF");
    }

    #[test]
    fn test_parse_segments() {
        let paths = |p: &str| -> Vec<String> {
            PathSegment::parse_segments(p, false)
                .into_iter()
                .map(|s| s.path().to_string())
                .collect()
        };

        assert_eq!(paths("a/b/c"), vec!["a", "b", "c"]);
        assert_eq!(paths("/a/b/c"), vec!["a", "b", "c"]);
        assert_eq!(paths("/a//c"), vec!["a", "", "c"]);
        assert_eq!(paths("/a/b/"), vec!["a", "b", ""]);
        assert_eq!(paths("/a/b//"), vec!["a", "b", "", ""]);
        assert_eq!(paths(""), vec![""]);
        assert_eq!(paths("/"), vec![""]);
    }

    #[test]
    fn test_segment_count_follows_separators() {
        for path in ["/files/a/", "/files/", "/x//y/", "a/b"] {
            let rest = path.strip_prefix('/').unwrap_or(path);
            assert_eq!(
                PathSegment::parse_segments(path, false).len(),
                rest.matches('/').count() + 1,
                "segments of '{}'",
                path
            );
        }
    }

    #[test]
    fn test_display_round_trips_matrix() {
        let seg = PathSegment::parse("cars;color=red", false);
        assert_eq!(seg.to_string(), "cars;color=red");
    }
}
