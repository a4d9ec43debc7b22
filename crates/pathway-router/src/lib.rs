//! # Pathway Router
//!
//! A URI-template routing engine with support for:
//! - Literal templates (`customers/all`)
//! - Path parameters (`customers/{id}`)
//! - Regex-constrained parameters (`orders/{n:\d+}`)
//! - Parameters spanning several segments (`files/{path:.+}`)
//! - Sub-resource locators reached through a segment-aligned prefix match
//!
//! ## How matching works
//!
//! A template is compiled once into a single regular expression plus the
//! ordered list of capture groups holding parameter values. At request time:
//!
//! 1. The expression must consume the whole remainder of the path → the
//!    resource resolver picks an invoker
//! 2. Failing that, if a locator is registered, a prefix match ending right
//!    before a `/` dispatches to the locator
//! 3. Otherwise the result is `ResourceNotFound` (404)
//!
//! On success every parameter is bound into the request's [`UriInfo`],
//! together with the path segments its value was taken from.
//!
//! ## Example
//!
//! ```
//! use pathway_router::{MethodResolver, PathParamSegment, Registry, Resolution, RoutingRequest};
//!
//! let registry: Registry<_, ()> = Registry::new().with_segment(
//!     PathParamSegment::resource("files/{path:.+}", MethodResolver::new().on("GET", "download"))
//!         .unwrap(),
//! );
//!
//! let mut request = RoutingRequest::new("GET", "/files/docs/guide.pdf");
//! let resolution = registry.dispatch_request(&mut request).unwrap();
//! assert_eq!(resolution, Resolution::Resource("download"));
//!
//! let segments = &request.uri.path_parameter_segments(false).get("path").unwrap()[0];
//! assert_eq!(segments.len(), 2);
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod binder;
pub mod config;
mod error;
pub mod matcher;
pub mod path;
pub mod registry;
mod request;
pub mod segment;
pub mod template;
pub mod uri_info;

// ============================================================================
// Re-exports
// ============================================================================

pub use binder::ExtractedParameter;
pub use config::{RouteConfig, RoutingConfig};
pub use error::{RouteError, TemplateError, SC_INTERNAL_SERVER_ERROR, SC_NOT_FOUND};
pub use matcher::{MatchAttempt, MatchOutcome};
pub use path::{segment_index_of, segment_span, PathSegment};
pub use registry::{MethodResolver, Registry};
pub use request::RoutingRequest;
pub use segment::{PathParamSegment, Resolution, ResourceResolver, SegmentTargets};
pub use template::{compile, CompiledTemplate, ParamGroup, TemplateToken};
pub use uri_info::{MultiMap, UriInfo};
