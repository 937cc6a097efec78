//! Error taxonomy for route construction and assembly.
//!
//! Matching never fails: a request that no route accepts yields `None`.
//! Everything here is raised either while building routes (template syntax,
//! bad definitions) or while turning a route name back into a path.

use thiserror::Error;

/// Errors raised by template compilation, route construction and assembly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// Unbalanced brackets or an invalid `:segment` token in a path template.
    #[error("malformed path template '{template}': {reason}")]
    MalformedTemplate { template: String, reason: String },

    /// A definition that no build strategy can turn into a route.
    #[error("invalid route definition '{name}': {reason}")]
    InvalidRouteDefinition { name: String, reason: String },

    /// `assemble` could not resolve a segment outside any optional group.
    #[error("missing '{name}' in params")]
    MissingParameter { name: String },

    /// No route with this name exists in the collection(s) consulted.
    #[error("no route named '{name}' can be found")]
    RouteNotFound { name: String },

    /// The operation is not available on this router or route.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl RoutingError {
    pub(crate) fn malformed(template: &str, reason: impl Into<String>) -> Self {
        Self::MalformedTemplate {
            template: template.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRouteDefinition {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RoutingError>;
