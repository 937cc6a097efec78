use std::fmt;
use std::sync::Arc;

use super::{CollectionKind, RouteCollection, Router};
use crate::error::{Result, RoutingError};
use crate::request::Request;
use crate::route::{Route, RouteDefinition, RouteMatch};
use crate::Params;

/// Tries several collections in registration order.
///
/// Priority only orders routes inside one member: every match of the first
/// collection comes before any match of the second.
#[derive(Debug, Default)]
pub struct CompositeRouter {
    routers: Vec<RouteCollection>,
}

impl CompositeRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_router(&mut self, router: RouteCollection) {
        self.routers.push(router);
    }

    pub fn with_router(mut self, router: RouteCollection) -> Self {
        self.add_router(router);
        self
    }

    pub fn routers(&self) -> &[RouteCollection] {
        &self.routers
    }

    /// First member of the given kind.
    pub fn collection(&self, kind: CollectionKind) -> Option<&RouteCollection> {
        self.routers.iter().find(|r| r.kind() == kind)
    }

    pub fn collection_mut(&mut self, kind: CollectionKind) -> Option<&mut RouteCollection> {
        self.routers.iter_mut().find(|r| r.kind() == kind)
    }

    /// Every route, member by member, each member in priority order.
    pub fn iter(&mut self) -> impl Iterator<Item = &Arc<Route>> {
        self.routers.iter_mut().flat_map(|router| router.iter())
    }
}

impl FromIterator<RouteCollection> for CompositeRouter {
    fn from_iter<T: IntoIterator<Item = RouteCollection>>(routers: T) -> Self {
        Self {
            routers: routers.into_iter().collect(),
        }
    }
}

impl fmt::Display for CompositeRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<CompositeRouter routers:{} routes:{}>",
            self.routers.len(),
            self.len()
        )
    }
}

impl Router for CompositeRouter {
    fn add_definition(&mut self, _definition: RouteDefinition) -> Result<Arc<Route>> {
        Err(RoutingError::UnsupportedOperation(
            "add_definition is not used on a composite router".to_string(),
        ))
    }

    fn add_route(&mut self, _route: Route) -> Result<Arc<Route>> {
        Err(RoutingError::UnsupportedOperation(
            "add_route is not used on a composite router".to_string(),
        ))
    }

    fn matches<'a>(&'a mut self, request: &'a Request) -> Box<dyn Iterator<Item = RouteMatch> + 'a> {
        Box::new(
            self.routers
                .iter_mut()
                .flat_map(move |router| router.matches(request)),
        )
    }

    fn contains(&self, name: &str) -> bool {
        self.routers.iter().any(|r| r.contains(name))
    }

    fn assemble(&self, name: &str, params: &Params) -> Result<String> {
        match self.routers.iter().find(|r| r.contains(name)) {
            Some(router) => router.assemble(name, params),
            None => Err(RoutingError::RouteNotFound {
                name: name.to_string(),
            }),
        }
    }

    fn len(&self) -> usize {
        self.routers.iter().map(Router::len).sum()
    }
}
