//! Request model consumed by the dispatcher
//!
//! Only what routing needs: the method, the content-negotiation headers, and
//! the [`UriInfo`] accumulator that holds the pre-split path.

use crate::UriInfo;

/// Request seen by [`PathParamSegment::match_pattern`](crate::PathParamSegment::match_pattern)
#[derive(Debug, Clone)]
pub struct RoutingRequest {
    /// HTTP method (GET, POST, PUT, DELETE, etc.)
    pub method: String,

    /// `Content-Type` of the request body, if any
    pub content_type: Option<String>,

    /// Acceptable response media types, in preference order
    pub accept: Vec<String>,

    /// Path, segments, and everything matched so far
    pub uri: UriInfo,
}

impl RoutingRequest {
    /// Creates a request for `method` and `path`
    ///
    /// # Examples
    ///
    /// ```
    /// use pathway_router::RoutingRequest;
    ///
    /// let request = RoutingRequest::new("GET", "/users/42").with_accept("application/json");
    /// assert_eq!(request.path(), "/users/42");
    /// assert_eq!(request.uri.path_segments(false).len(), 2);
    /// ```
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            content_type: None,
            accept: Vec::new(),
            uri: UriInfo::new(path),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Appends an acceptable response type
    pub fn with_accept(mut self, media_type: impl Into<String>) -> Self {
        self.accept.push(media_type.into());
        self
    }

    pub fn path(&self) -> &str {
        self.uri.path()
    }
}
