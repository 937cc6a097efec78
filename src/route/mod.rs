//! # Route Module
//!
//! A [`Route`] binds a name and a path template (or a raw regex) to the
//! constraints a request must satisfy: accepted methods, subdomain, negotiated
//! format and query parameter patterns.
//!
//! Two kinds exist:
//!
//! - **Literal** routes have no dynamic segments and compare the request path
//!   byte for byte.
//! - **Pattern** routes compile their template once into an anchored regex
//!   with named captures, and render paths back from the parsed template.
//!
//! Matching checks, in order: method, subdomain, format, query parameters
//! (GET only), then the path itself. The first failed check ends the attempt.
//! Parameters start from the route defaults and are overlaid by whatever the
//! checks extract.

mod definition;
mod requirement;

use http::Method;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

use crate::error::{Result, RoutingError};
use crate::formats::{FormatTable, DEFAULT_FORMATS};
use crate::request::Request;
use crate::segment::{compile_matcher, parse, render_path, Node};
use crate::Params;

pub use definition::{RouteDefinition, RouteTable};
pub use requirement::{Requirement, FORMAT, SUBDOMAIN};

pub(crate) use requirement::Constraint;

/// Methods a route accepts when its definition does not say otherwise.
pub const KNOWN_METHODS: [Method; 9] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::HEAD,
    Method::OPTIONS,
    Method::TRACE,
    Method::CONNECT,
];

/// How a route compares the request path.
#[derive(Debug, Clone)]
pub enum RouteKind {
    /// Exact string equality with the route path.
    Literal,
    /// Regex match with named captures.
    Pattern {
        /// Parsed template, absent for routes defined by a raw regex only
        segments: Option<Vec<Node>>,
        regex: Regex,
    },
}

/// A compiled, immutable route.
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    path: Option<String>,
    accepts: Vec<Method>,
    requires: HashMap<String, Requirement>,
    constraints: HashMap<String, Constraint>,
    defaults: Params,
    options: serde_json::Map<String, Value>,
    priority: u32,
    kind: RouteKind,
}

/// Result of successfully matching a request to a route
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route
    pub route: Arc<Route>,
    /// Defaults overlaid with values extracted from the path, query and format
    pub params: Params,
}

impl RouteMatch {
    /// Name of the matched route.
    pub fn name(&self) -> &str {
        self.route.name()
    }

    /// Get a matched parameter by name
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

impl Route {
    /// Build a literal route. The definition must carry a path.
    ///
    /// # Errors
    ///
    /// [`RoutingError::InvalidRouteDefinition`] for a missing name or path,
    /// unknown methods or broken requirement patterns.
    pub fn literal(definition: RouteDefinition) -> Result<Self> {
        let name = definition_name(&definition)?;
        if definition.path.is_none() {
            return Err(RoutingError::invalid(&name, "a literal route needs a path"));
        }
        Self::from_definition(name, definition, |_, _, _| Ok(RouteKind::Literal))
    }

    /// Build a pattern route from a path template, a raw regex, or both.
    ///
    /// When both are given the regex is used for matching and the template
    /// for assembling.
    ///
    /// # Errors
    ///
    /// [`RoutingError::InvalidRouteDefinition`] when neither path nor regex is
    /// given, [`RoutingError::MalformedTemplate`] for template syntax errors.
    pub fn pattern(definition: RouteDefinition) -> Result<Self> {
        let name = definition_name(&definition)?;
        Self::from_definition(name, definition, compile_kind)
    }

    fn from_definition(
        name: String,
        definition: RouteDefinition,
        kind: impl FnOnce(&str, &RouteDefinition, &HashMap<String, Constraint>) -> Result<RouteKind>,
    ) -> Result<Self> {
        let accepts = match &definition.accepts {
            Some(methods) => parse_methods(&name, methods)?,
            None => KNOWN_METHODS.to_vec(),
        };

        let constraints = definition
            .requires
            .iter()
            .filter(|(key, _)| key.as_str() != SUBDOMAIN)
            .map(|(key, requirement)| {
                Constraint::compile(&name, key, requirement).map(|c| (key.clone(), c))
            })
            .collect::<Result<HashMap<_, _>>>()?;

        let kind = kind(&name, &definition, &constraints)?;

        Ok(Self {
            name,
            path: definition.path,
            accepts,
            requires: definition.requires,
            constraints,
            defaults: definition.defaults,
            options: definition.options,
            priority: definition.priority.unwrap_or(1).max(1),
            kind,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path template, absent for routes defined by a raw regex.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn accepts(&self) -> &[Method] {
        &self.accepts
    }

    pub fn requires(&self) -> &HashMap<String, Requirement> {
        &self.requires
    }

    pub fn defaults(&self) -> &Params {
        &self.defaults
    }

    pub fn options(&self) -> &serde_json::Map<String, Value> {
        &self.options
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn kind(&self) -> &RouteKind {
        &self.kind
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, RouteKind::Literal)
    }

    /// Parsed template segments of a pattern route.
    pub fn segments(&self) -> Option<&[Node]> {
        match &self.kind {
            RouteKind::Pattern { segments, .. } => segments.as_deref(),
            RouteKind::Literal => None,
        }
    }

    /// Compiled matcher of a pattern route.
    pub fn regex(&self) -> Option<&Regex> {
        match &self.kind {
            RouteKind::Pattern { regex, .. } => Some(regex),
            RouteKind::Literal => None,
        }
    }

    /// Key used to order routes inside a collection.
    pub(crate) fn sort_key(&self) -> (u32, &str) {
        let path = match (&self.path, &self.kind) {
            (Some(path), _) => path.as_str(),
            (None, RouteKind::Pattern { regex, .. }) => regex.as_str(),
            (None, RouteKind::Literal) => "",
        };
        (self.priority, path)
    }

    /// Match a request using the default format table.
    pub fn match_request(self: &Arc<Self>, request: &Request) -> Option<RouteMatch> {
        self.match_with(request, &DEFAULT_FORMATS)
    }

    /// Match a request, negotiating formats against `formats`.
    pub fn match_with(self: &Arc<Self>, request: &Request, formats: &FormatTable) -> Option<RouteMatch> {
        self.params_for(request, formats).map(|params| RouteMatch {
            route: Arc::clone(self),
            params,
        })
    }

    /// Parameters this route extracts from `request`, or `None` if it does not match.
    pub fn params_for(&self, request: &Request, formats: &FormatTable) -> Option<Params> {
        if !self.accepts.contains(&request.method) {
            trace!(route = %self.name, method = %request.method, "Method not accepted");
            return None;
        }

        let mut params = self.defaults.clone();

        if let Some(subdomain) = self.requires.get(SUBDOMAIN) {
            if !subdomain.accepts_literal(&request.subdomain) {
                trace!(route = %self.name, subdomain = %request.subdomain, "Subdomain mismatch");
                return None;
            }
        }

        if let Some(format) = self.constraints.get(FORMAT) {
            let accept = request.accept.as_deref().unwrap_or_default();
            let chosen = formats
                .formats_for(accept)
                .into_iter()
                .find(|candidate| format.is_satisfied_by(candidate));
            match chosen {
                Some(chosen) => {
                    params.insert(FORMAT.to_string(), chosen.to_string());
                }
                None => {
                    trace!(route = %self.name, accept = %accept, "No acceptable format");
                    return None;
                }
            }
        }

        if request.method == Method::GET && self.has_query_constraints() {
            for (key, value) in &request.query_params {
                if let Some(constraint) = self.query_constraint(key) {
                    if !constraint.is_satisfied_by(value) {
                        trace!(route = %self.name, param = %key, "Query parameter rejected");
                        return None;
                    }
                    params.insert(key.clone(), value.clone());
                }
            }
        }

        match &self.kind {
            RouteKind::Literal => {
                if self.path.as_deref() != Some(request.path.as_str()) {
                    return None;
                }
            }
            RouteKind::Pattern { regex, .. } => {
                let captures = regex.captures(&request.path)?;
                for name in regex.capture_names().flatten() {
                    match captures.name(name) {
                        Some(value) => {
                            params.insert(name.to_string(), value.as_str().to_string());
                        }
                        // A group that did not participate falls back to the
                        // default, never to a query value of the same name.
                        None => match self.defaults.get(name) {
                            Some(default) => {
                                params.insert(name.to_string(), default.clone());
                            }
                            None => {
                                params.remove(name);
                            }
                        },
                    }
                }
            }
        }

        Some(params)
    }

    fn has_query_constraints(&self) -> bool {
        self.constraints
            .keys()
            .any(|key| key != SUBDOMAIN && key != FORMAT)
    }

    fn query_constraint(&self, key: &str) -> Option<&Constraint> {
        if key == SUBDOMAIN || key == FORMAT {
            return None;
        }
        self.constraints.get(key)
    }

    /// Render a path for this route, optionally prefixed (e.g. with scheme and host).
    ///
    /// ```rust
    /// use segrouter::{Params, Route, RouteDefinition};
    ///
    /// let route = Route::pattern(RouteDefinition::new("search", "/search/:keyword")).unwrap();
    /// let params = Params::from([("keyword".to_string(), "test".to_string())]);
    /// assert_eq!(route.assemble(None, &params).unwrap(), "/search/test");
    /// assert_eq!(
    ///     route.assemble(Some("http://127.0.0.1"), &params).unwrap(),
    ///     "http://127.0.0.1/search/test"
    /// );
    /// ```
    ///
    /// # Errors
    ///
    /// [`RoutingError::MissingParameter`] for an unresolved required segment,
    /// [`RoutingError::UnsupportedOperation`] for a route defined only by a
    /// raw regex.
    pub fn assemble(&self, prefix: Option<&str>, params: &Params) -> Result<String> {
        let path = match &self.kind {
            RouteKind::Literal => self.path.clone().unwrap_or_default(),
            RouteKind::Pattern {
                segments: Some(segments),
                ..
            } => render_path(segments, params, &self.defaults)?,
            RouteKind::Pattern { segments: None, .. } => {
                return Err(RoutingError::UnsupportedOperation(format!(
                    "route '{}' is defined by a raw regex and cannot be assembled",
                    self.name
                )))
            }
        };
        Ok(match prefix {
            Some(prefix) => format!("{prefix}{path}"),
            None => path,
        })
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_literal() { "Literal" } else { "Pattern" };
        write!(f, "<{kind} name:{}", self.name)?;
        if let Some(path) = &self.path {
            write!(f, " path:{path}")?;
        }
        if let Some(regex) = self.regex() {
            write!(f, " match:{}", regex.as_str())?;
        }
        f.write_str(">")
    }
}

fn definition_name(definition: &RouteDefinition) -> Result<String> {
    definition
        .name
        .clone()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| RoutingError::invalid("<unnamed>", "route definitions need a name"))
}

fn parse_methods(route: &str, methods: &[String]) -> Result<Vec<Method>> {
    methods
        .iter()
        .map(|m| {
            let upper = m.to_ascii_uppercase();
            KNOWN_METHODS
                .iter()
                .find(|known| known.as_str() == upper)
                .cloned()
                .ok_or_else(|| RoutingError::invalid(route, format!("unknown method '{m}'")))
        })
        .collect()
}

fn compile_kind(
    name: &str,
    definition: &RouteDefinition,
    constraints: &HashMap<String, Constraint>,
) -> Result<RouteKind> {
    let segments = definition.path.as_deref().map(parse).transpose()?;

    let regex = match (&definition.regex, &segments) {
        (Some(raw), _) => Regex::new(&format!("^(?:{raw})$"))
            .map_err(|err| RoutingError::invalid(name, format!("regex: {err}")))?,
        (None, Some(segments)) => {
            let segment_patterns: HashMap<String, String> = constraints
                .iter()
                .map(|(key, constraint)| (key.clone(), constraint.segment_pattern()))
                .collect();
            compile_matcher(segments, &segment_patterns)?
        }
        (None, None) => {
            return Err(RoutingError::invalid(
                name,
                "you must specify either path or regex",
            ))
        }
    };

    Ok(RouteKind::Pattern { segments, regex })
}
