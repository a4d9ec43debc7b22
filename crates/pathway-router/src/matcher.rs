//! Path Matcher
//!
//! Applies a [`CompiledTemplate`] to the remainder of a request path and
//! decides between a full match (terminal resource) and a segment-aligned
//! prefix match (locator fallback).
//!
//! # Data Flow
//! ```text
//! path[start..]
//!     → full regex  ^(?:P)$   → Full { end = len }
//!     → prefix regex ^(?:P)   → Locator { end }   (only if path[end] == '/')
//!     → NoMatch
//! ```

use regex::Captures;

use crate::CompiledTemplate;

/// Result of applying a template to a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The template consumed the whole remainder of the path
    Full { end: usize },
    /// The template consumed a prefix ending right before a `/`
    Locator { end: usize },
    NoMatch,
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        !matches!(self, MatchOutcome::NoMatch)
    }

    /// Offset one past the consumed region
    pub fn end(&self) -> Option<usize> {
        match *self {
            MatchOutcome::Full { end } | MatchOutcome::Locator { end } => Some(end),
            MatchOutcome::NoMatch => None,
        }
    }
}

/// One match attempt, owning its capture state
///
/// Created fresh by every [`CompiledTemplate::match_at`] call and dropped once
/// the parameters have been bound.
#[derive(Debug)]
pub struct MatchAttempt<'p> {
    input_path: &'p str,
    search_start: usize,
    outcome: MatchOutcome,
    captures: Option<Captures<'p>>,
}

impl<'p> MatchAttempt<'p> {
    fn no_match(input_path: &'p str, search_start: usize) -> Self {
        Self {
            input_path,
            search_start,
            outcome: MatchOutcome::NoMatch,
            captures: None,
        }
    }

    pub fn input_path(&self) -> &'p str {
        self.input_path
    }

    pub fn search_start(&self) -> usize {
        self.search_start
    }

    pub fn outcome(&self) -> MatchOutcome {
        self.outcome
    }

    /// The substring consumed by the match, if any
    pub fn matched_region(&self) -> Option<&'p str> {
        self.outcome
            .end()
            .map(|end| &self.input_path[self.search_start..end])
    }

    /// Captures of the match; offsets are relative to `search_start`
    pub(crate) fn captures(&self) -> Option<&Captures<'p>> {
        self.captures.as_ref()
    }
}

impl CompiledTemplate {
    /// Matches `path[start..]` against this template
    ///
    /// With `allow_locator == false` only a full match is attempted.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathway_router::{CompiledTemplate, MatchOutcome};
    ///
    /// let t = CompiledTemplate::new("users/{id}").unwrap();
    ///
    /// let attempt = t.match_at("/users/42", 1, false);
    /// assert_eq!(attempt.outcome(), MatchOutcome::Full { end: 9 });
    ///
    /// let attempt = t.match_at("/users/42/orders", 1, true);
    /// assert_eq!(attempt.outcome(), MatchOutcome::Locator { end: 9 });
    /// assert_eq!(attempt.matched_region(), Some("users/42"));
    /// ```
    pub fn match_at<'p>(&self, path: &'p str, start: usize, allow_locator: bool) -> MatchAttempt<'p> {
        let remainder = match path.get(start..) {
            Some(remainder) => remainder,
            None => return MatchAttempt::no_match(path, start),
        };

        if let Some(captures) = self.full.captures(remainder) {
            tracing::trace!(template = %self.source(), path, start, "full match");
            return MatchAttempt {
                input_path: path,
                search_start: start,
                outcome: MatchOutcome::Full { end: path.len() },
                captures: Some(captures),
            };
        }

        // A locator needs at least one character left for the boundary check.
        if !allow_locator || remainder.is_empty() {
            return MatchAttempt::no_match(path, start);
        }

        let captures = match self.prefix.captures(remainder) {
            Some(captures) => captures,
            None => return MatchAttempt::no_match(path, start),
        };

        let consumed = captures.get(0).map_or(0, |m| m.end());
        let end = start + consumed;

        // A locator can never consume a partial segment.
        if path.as_bytes().get(end) != Some(&b'/') {
            tracing::trace!(template = %self.source(), path, end, "prefix match is not segment aligned");
            return MatchAttempt::no_match(path, start);
        }

        tracing::trace!(template = %self.source(), path, start, end, "locator match");
        MatchAttempt {
            input_path: path,
            search_start: start,
            outcome: MatchOutcome::Locator { end },
            captures: Some(captures),
        }
    }
}
