//! Dispatch node for one compiled template
//!
//! A [`PathParamSegment`] pairs a [`CompiledTemplate`] with what it dispatches
//! to: a resource resolver, a locator, or both. Matching a request against it
//! yields either a concrete invoker or a locator plus the consumed prefix, from
//! which the caller continues with the locator's own candidates.

use crate::binder;
use crate::path::segment::decode_text;
use crate::{CompiledTemplate, MatchOutcome, RouteError, RoutingRequest, TemplateError};

/// Picks the concrete invoker once the path has fully matched
///
/// This is the seam to method and media-type selection, which lives outside
/// this crate.
pub trait ResourceResolver: Send + Sync {
    type Invoker;

    fn resolve(
        &self,
        method: &str,
        content_type: Option<&str>,
        accept: &[String],
    ) -> Option<Self::Invoker>;
}

/// What a segment dispatches to
#[derive(Debug, Clone)]
pub enum SegmentTargets<R, L> {
    /// Terminal only
    Resource(R),
    /// Sub-resource locator only
    Locator(L),
    /// Terminal on a full match, locator on a prefix match
    Both { resolver: R, locator: L },
}

impl<R, L> SegmentTargets<R, L> {
    pub fn resolver(&self) -> Option<&R> {
        match self {
            SegmentTargets::Resource(resolver) | SegmentTargets::Both { resolver, .. } => {
                Some(resolver)
            }
            SegmentTargets::Locator(_) => None,
        }
    }

    pub fn locator(&self) -> Option<&L> {
        match self {
            SegmentTargets::Locator(locator) | SegmentTargets::Both { locator, .. } => {
                Some(locator)
            }
            SegmentTargets::Resource(_) => None,
        }
    }
}

/// Successful dispatch through one segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'s, I, L> {
    /// The path was fully consumed and an invoker was selected
    Resource(I),
    /// A prefix was consumed; continue at `end` against the locator
    Locator {
        locator: &'s L,
        /// Offset right after the consumed prefix (points at a `/`)
        end: usize,
        /// `path[..end]`, as pushed onto the matched-URI trail
        matched: String,
    },
}

/// A compiled template together with its dispatch targets
#[derive(Debug, Clone)]
pub struct PathParamSegment<R, L> {
    template: CompiledTemplate,
    targets: SegmentTargets<R, L>,
}

impl<R, L> PathParamSegment<R, L>
where
    R: ResourceResolver,
{
    pub fn new(template: CompiledTemplate, targets: SegmentTargets<R, L>) -> Self {
        Self { template, targets }
    }

    /// Terminal segment
    pub fn resource(template: &str, resolver: R) -> Result<Self, TemplateError> {
        Ok(Self::new(
            CompiledTemplate::new(template)?,
            SegmentTargets::Resource(resolver),
        ))
    }

    /// Locator-only segment
    pub fn locator(template: &str, locator: L) -> Result<Self, TemplateError> {
        Ok(Self::new(
            CompiledTemplate::new(template)?,
            SegmentTargets::Locator(locator),
        ))
    }

    pub fn both(template: &str, resolver: R, locator: L) -> Result<Self, TemplateError> {
        Ok(Self::new(
            CompiledTemplate::new(template)?,
            SegmentTargets::Both { resolver, locator },
        ))
    }

    pub fn template(&self) -> &CompiledTemplate {
        &self.template
    }

    pub fn targets(&self) -> &SegmentTargets<R, L> {
        &self.targets
    }

    /// Resolves a dispatch target for `path[start..]`
    ///
    /// On success the matched URI and every path parameter have been recorded
    /// in `request.uri`. On `ResourceNotFound` nothing has been recorded, so
    /// the caller can move on to a sibling segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathway_router::{MethodResolver, PathParamSegment, Resolution, RoutingRequest};
    ///
    /// let segment: PathParamSegment<_, ()> =
    ///     PathParamSegment::resource("users/{id}", MethodResolver::new().on("GET", "show_user"))
    ///         .unwrap();
    ///
    /// let mut request = RoutingRequest::new("GET", "/users/42");
    /// let path = request.path().to_string();
    ///
    /// let resolution = segment.match_pattern(&mut request, &path, 1).unwrap();
    /// assert_eq!(resolution, Resolution::Resource("show_user"));
    /// assert_eq!(
    ///     request.uri.path_parameters(true).get_first("id").map(String::as_str),
    ///     Some("42")
    /// );
    /// ```
    pub fn match_pattern(
        &self,
        request: &mut RoutingRequest,
        path: &str,
        start: usize,
    ) -> Result<Resolution<'_, R::Invoker, L>, RouteError> {
        let locator = self.targets.locator();
        let attempt = self.template.match_at(path, start, locator.is_some());

        match attempt.outcome() {
            MatchOutcome::Full { .. } => {
                let invoker = self
                    .targets
                    .resolver()
                    .and_then(|resolver| {
                        resolver.resolve(
                            &request.method,
                            request.content_type.as_deref(),
                            &request.accept,
                        )
                    })
                    .ok_or_else(|| RouteError::not_found(path))?;

                let params = binder::extract(self.template.groups(), &attempt)?;
                binder::validate(&params, &request.uri)?;

                request
                    .uri
                    .push_matched_uri(path, decode_text(path).into_owned());
                binder::bind(&params, &mut request.uri)?;

                Ok(Resolution::Resource(invoker))
            }
            MatchOutcome::Locator { end } => {
                let locator = locator.ok_or_else(|| RouteError::not_found(path))?;
                let matched = &path[..end];

                let params = binder::extract(self.template.groups(), &attempt)?;
                binder::validate(&params, &request.uri)?;

                request
                    .uri
                    .push_matched_uri(matched, decode_text(matched).into_owned());
                binder::bind(&params, &mut request.uri)?;

                tracing::debug!(template = %self.template, matched, "dispatching to locator");

                Ok(Resolution::Locator {
                    locator,
                    end,
                    matched: matched.to_string(),
                })
            }
            MatchOutcome::NoMatch => Err(RouteError::not_found(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MethodResolver;

    type Segment = PathParamSegment<MethodResolver<&'static str>, &'static str>;

    #[test]
    fn test_full_match_without_invoker_is_not_found() {
        let segment: Segment =
            PathParamSegment::resource("{id}", MethodResolver::new().on("GET", "get")).unwrap();
        let mut request = RoutingRequest::new("DELETE", "abc");

        let err = segment.match_pattern(&mut request, "abc", 0).unwrap_err();
        assert_eq!(err.status(), 404);
        assert!(request.uri.matched_uris(false).is_empty());
    }

    #[test]
    fn test_locator_only_segment_full_match_is_not_found() {
        let segment: Segment = PathParamSegment::locator("{id}", "sub").unwrap();
        let mut request = RoutingRequest::new("GET", "abc");

        let err = segment.match_pattern(&mut request, "abc", 0).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_prefix_without_locator_is_not_found() {
        let segment: Segment =
            PathParamSegment::resource("{id}", MethodResolver::new().on("GET", "get")).unwrap();
        let mut request = RoutingRequest::new("GET", "abc/def");

        let err = segment.match_pattern(&mut request, "abc/def", 0).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_locator_match_records_prefix() {
        let segment: Segment =
            PathParamSegment::both("{id}", MethodResolver::new().on("GET", "get"), "sub").unwrap();
        let mut request = RoutingRequest::new("GET", "abc/def");

        let resolution = segment.match_pattern(&mut request, "abc/def", 0).unwrap();
        assert_eq!(
            resolution,
            Resolution::Locator {
                locator: &"sub",
                end: 3,
                matched: "abc".to_string(),
            }
        );
        assert_eq!(request.uri.matched_uris(false), &["abc".to_string()]);
        assert_eq!(
            request.uri.path_parameters(false).get_first("id").map(String::as_str),
            Some("abc")
        );
    }

    #[test]
    fn test_targets_accessors() {
        let targets: SegmentTargets<u8, char> = SegmentTargets::Both {
            resolver: 1,
            locator: 'l',
        };
        assert_eq!(targets.resolver(), Some(&1));
        assert_eq!(targets.locator(), Some(&'l'));
        assert_eq!(SegmentTargets::<u8, char>::Locator('x').resolver(), None);
    }
}
