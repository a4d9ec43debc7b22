//! Error types for template compilation and request dispatch
//!
//! Two families:
//! - [`TemplateError`]: raised once, at registration time, when a template
//!   cannot be turned into a matcher
//! - [`RouteError`]: raised per request, carrying an HTTP-equivalent status

/// HTTP status used for [`RouteError::ResourceNotFound`]
pub const SC_NOT_FOUND: u16 = 404;

/// HTTP status used for [`RouteError::InternalInconsistency`]
pub const SC_INTERNAL_SERVER_ERROR: u16 = 500;

/// A template that could not be compiled (or expanded)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// A `{` without a matching `}` (or the reverse)
    #[error("unbalanced brace at offset {offset} in template '{template}'")]
    UnbalancedBrace { template: String, offset: usize },

    /// Placeholder names must look like `\w[\w.-]*`
    #[error("invalid parameter name '{name}' in template '{template}'")]
    InvalidName { template: String, name: String },

    /// `{name:}` with nothing after the colon
    #[error("empty constraint for parameter '{name}' in template '{template}'")]
    EmptyConstraint { template: String, name: String },

    /// The generated expression was rejected by the regex engine
    #[error("template '{template}' produced an invalid regex: {message}")]
    InvalidRegex { template: String, message: String },

    /// Expansion was asked for a template parameter with no value
    #[error("no value supplied for parameter '{name}'")]
    MissingParameter { name: String },
}

/// Failure of a single dispatch attempt
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// Nothing matched. Callers may try a sibling template.
    #[error("Could not find resource for: {path}")]
    ResourceNotFound { path: String },

    /// Segment bookkeeping went out of range. Never retried.
    #[error("internal routing inconsistency: {message}")]
    InternalInconsistency { message: String },
}

impl RouteError {
    pub fn not_found(path: impl Into<String>) -> Self {
        RouteError::ResourceNotFound { path: path.into() }
    }

    pub fn inconsistency(message: impl Into<String>) -> Self {
        RouteError::InternalInconsistency {
            message: message.into(),
        }
    }

    /// HTTP-equivalent status code
    pub fn status(&self) -> u16 {
        match self {
            RouteError::ResourceNotFound { .. } => SC_NOT_FOUND,
            RouteError::InternalInconsistency { .. } => SC_INTERNAL_SERVER_ERROR,
        }
    }

    /// True when a higher-level dispatcher may try another candidate
    pub fn is_not_found(&self) -> bool {
        matches!(self, RouteError::ResourceNotFound { .. })
    }
}
