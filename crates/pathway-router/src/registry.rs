//! Ordered candidate registry
//!
//! Holds the [`PathParamSegment`]s of one dispatch point and tries them in
//! registration order. The first candidate that resolves wins; a not-found
//! moves on to the next one, an internal inconsistency stops the search.

use std::collections::HashMap;

use crate::config::RoutingConfig;
use crate::{
    PathParamSegment, Resolution, ResourceResolver, RouteError, RoutingRequest, SegmentTargets,
    TemplateError,
};

/// Wildcard media type
const ANY_MEDIA_TYPE: &str = "*/*";

/// Method-keyed resolver with an optional list of produced media types
///
/// When `produces` is non-empty, a request must accept one of the produced
/// types (or `*/*`). A request with no `Accept` entries accepts anything.
#[derive(Debug, Clone)]
pub struct MethodResolver<I> {
    methods: HashMap<String, I>,
    produces: Vec<String>,
}

impl<I> Default for MethodResolver<I> {
    fn default() -> Self {
        Self {
            methods: HashMap::new(),
            produces: Vec::new(),
        }
    }
}

impl<I> MethodResolver<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `invoker` for `method` (case-insensitive)
    pub fn on(mut self, method: &str, invoker: I) -> Self {
        self.methods.insert(method.to_ascii_uppercase(), invoker);
        self
    }

    pub fn produces(mut self, media_type: impl Into<String>) -> Self {
        self.produces.push(media_type.into());
        self
    }

    fn is_acceptable(&self, accept: &[String]) -> bool {
        self.produces.is_empty()
            || accept.is_empty()
            || accept.iter().any(|a| {
                a == ANY_MEDIA_TYPE || self.produces.iter().any(|p| p.eq_ignore_ascii_case(a))
            })
    }
}

impl<I> ResourceResolver for MethodResolver<I>
where
    I: Clone + Send + Sync,
{
    type Invoker = I;

    fn resolve(&self, method: &str, _content_type: Option<&str>, accept: &[String]) -> Option<I> {
        if !self.is_acceptable(accept) {
            return None;
        }
        self.methods.get(&method.to_ascii_uppercase()).cloned()
    }
}

/// Candidates for one dispatch point, in registration order
#[derive(Debug, Clone)]
pub struct Registry<R, L> {
    segments: Vec<PathParamSegment<R, L>>,
}

impl<R, L> Default for Registry<R, L> {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
        }
    }
}

impl<R, L> Registry<R, L>
where
    R: ResourceResolver,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, segment: PathParamSegment<R, L>) {
        self.segments.push(segment);
    }

    /// Builder form of [`add`](Self::add)
    pub fn with_segment(mut self, segment: PathParamSegment<R, L>) -> Self {
        self.add(segment);
        self
    }

    pub fn segments(&self) -> &[PathParamSegment<R, L>] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Tries every candidate against `path[start..]`
    pub fn dispatch(
        &self,
        request: &mut RoutingRequest,
        path: &str,
        start: usize,
    ) -> Result<Resolution<'_, R::Invoker, L>, RouteError> {
        for segment in &self.segments {
            match segment.match_pattern(request, path, start) {
                Err(RouteError::ResourceNotFound { .. }) => continue,
                other => return other,
            }
        }

        tracing::trace!(path, start, candidates = self.segments.len(), "no candidate matched");
        Err(RouteError::not_found(path))
    }

    /// Dispatches the request's own path, skipping a leading `/`
    pub fn dispatch_request(
        &self,
        request: &mut RoutingRequest,
    ) -> Result<Resolution<'_, R::Invoker, L>, RouteError> {
        let path = request.path().to_string();
        let start = usize::from(path.starts_with('/'));
        self.dispatch(request, &path, start)
    }
}

impl Registry<MethodResolver<String>, String> {
    /// Builds a registry from configuration
    ///
    /// Invokers and locators are both identified by the route name.
    pub fn from_config(config: &RoutingConfig) -> Result<Self, TemplateError> {
        let mut registry = Registry::new();

        for route in &config.routes {
            let resolver = route
                .methods
                .iter()
                .fold(MethodResolver::new(), |resolver, method| {
                    resolver.on(method, route.name.clone())
                });
            let resolver = route
                .produces
                .iter()
                .fold(resolver, |resolver, media_type| resolver.produces(media_type.clone()));

            let targets = match (route.methods.is_empty(), route.locator) {
                (false, true) => SegmentTargets::Both {
                    resolver,
                    locator: route.name.clone(),
                },
                (true, true) => SegmentTargets::Locator(route.name.clone()),
                (_, false) => SegmentTargets::Resource(resolver),
            };

            let template = route.template.parse()?;
            registry.add(PathParamSegment::new(template, targets));
        }

        tracing::debug!(routes = registry.len(), "built registry from config");
        Ok(registry)
    }
}
