//! # Router Module
//!
//! Collections of named routes and the matching policy over them.
//!
//! ## Overview
//!
//! - [`RouteCollection`] owns routes, keeps them ordered by descending
//!   priority and builds them from definitions through an ordered list of
//!   [`BuildStrategy`] entries (custom strategies first, then pattern, then
//!   literal). Child definitions are expanded into independent routes named
//!   `parent/child` at construction time.
//! - [`CompositeRouter`] chains several collections; members are consulted in
//!   the order they were added.
//!
//! Both implement [`Router`]. Matching yields lazily: taking the first match
//! evaluates no route after it.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use segrouter::{Params, Request, RouteCollection, RouteDefinition, Router};
//!
//! let mut router = RouteCollection::from_list([
//!     RouteDefinition::new("home", "/"),
//!     RouteDefinition::new("post", "/posts/:id").with_requirement("id", r"\d+"),
//! ])
//! .unwrap();
//!
//! let route_match = router
//!     .match_request(&Request::new(Method::GET, "/posts/42"))
//!     .unwrap();
//! assert_eq!(route_match.name(), "post");
//! assert_eq!(route_match.get_param("id"), Some("42"));
//!
//! let params = Params::from([("id".to_string(), "7".to_string())]);
//! assert_eq!(router.assemble("post", &params).unwrap(), "/posts/7");
//! ```

mod collection;
mod composite;
mod strategy;

use std::sync::Arc;
use tracing::debug;

use crate::error::Result;
use crate::request::Request;
use crate::route::{Route, RouteDefinition, RouteMatch};
use crate::Params;

pub use collection::{CollectionKind, RouteCollection};
pub use composite::CompositeRouter;
pub use strategy::{BuildStrategy, LiteralStrategy, PatternStrategy};

/// Operations shared by route collections and composites.
pub trait Router {
    /// Build a route (and its children) from a definition and register it.
    fn add_definition(&mut self, definition: RouteDefinition) -> Result<Arc<Route>>;

    /// Register an already built route, replacing any route with the same name.
    fn add_route(&mut self, route: Route) -> Result<Arc<Route>>;

    /// Every route matching `request`, best first.
    fn matches<'a>(&'a mut self, request: &'a Request) -> Box<dyn Iterator<Item = RouteMatch> + 'a>;

    /// The best match for `request`.
    fn match_request(&mut self, request: &Request) -> Option<RouteMatch> {
        let route_match = self.matches(request).next();
        match &route_match {
            Some(m) => debug!(
                method = %request.method,
                path = %request.path,
                route = %m.name(),
                params = ?m.params,
                "Route matched"
            ),
            None => debug!(
                method = %request.method,
                path = %request.path,
                "No route matched"
            ),
        }
        route_match
    }

    fn contains(&self, name: &str) -> bool;

    /// Render the path of the route called `name`.
    fn assemble(&self, name: &str, params: &Params) -> Result<String>;

    /// Render a path and append `query` as a form-urlencoded query string.
    fn assemble_with_query(
        &self,
        name: &str,
        params: &Params,
        query: &[(&str, &str)],
    ) -> Result<String> {
        let mut path = self.assemble(name, params)?;
        if !query.is_empty() {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query)
                .finish();
            path.push('?');
            path.push_str(&encoded);
        }
        Ok(path)
    }

    /// Number of routes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
