use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::strategy::{BuildStrategy, DEFAULT_STRATEGIES};
use super::Router;
use crate::error::{Result, RoutingError};
use crate::formats::FormatTable;
use crate::request::Request;
use crate::route::{Route, RouteDefinition, RouteMatch};
use crate::Params;

/// How a collection was populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// Built from an ordered list; position doubles as default priority.
    List,
    /// Built from a name-keyed mapping.
    Map,
    /// Populated route by route.
    Manual,
}

/// Named routes kept in priority order.
///
/// Route names are unique: registering a route under an existing name
/// replaces the earlier one. Ordering is resolved lazily, the first time an
/// order-dependent operation runs after a route was added.
pub struct RouteCollection {
    kind: CollectionKind,
    routes: Vec<Arc<Route>>,
    strategies: Vec<Box<dyn BuildStrategy>>,
    formats: FormatTable,
    requires_sort: bool,
}

impl RouteCollection {
    pub fn new() -> Self {
        Self::with_kind(CollectionKind::Manual)
    }

    pub fn with_kind(kind: CollectionKind) -> Self {
        Self {
            kind,
            routes: Vec::new(),
            strategies: Vec::new(),
            formats: FormatTable::default(),
            requires_sort: false,
        }
    }

    /// Build a collection from an ordered list of definitions.
    ///
    /// Definitions without a priority get their list position, so later
    /// entries outrank earlier ones unless they say otherwise.
    ///
    /// # Errors
    ///
    /// The first definition that fails to build aborts construction.
    pub fn from_list<I>(definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = RouteDefinition>,
    {
        let mut collection = Self::with_kind(CollectionKind::List);
        collection.extend_list(definitions)?;
        Ok(collection)
    }

    /// Build a collection from `(name, definition)` pairs.
    ///
    /// # Errors
    ///
    /// The first definition that fails to build aborts construction.
    pub fn from_map<I>(definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, RouteDefinition)>,
    {
        let mut collection = Self::with_kind(CollectionKind::Map);
        collection.extend_map(definitions)?;
        Ok(collection)
    }

    /// Put a strategy ahead of the built-in pattern and literal strategies.
    ///
    /// Strategies added earlier are consulted first.
    pub fn with_strategy<S>(mut self, strategy: S) -> Self
    where
        S: BuildStrategy + 'static,
    {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Replace the table used for `format` negotiation.
    pub fn with_formats(mut self, formats: FormatTable) -> Self {
        self.formats = formats;
        self
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    pub fn formats(&self) -> &FormatTable {
        &self.formats
    }

    /// Add definitions in list order, assigning positional priorities.
    ///
    /// # Errors
    ///
    /// See [`RouteCollection::from_list`].
    pub fn extend_list<I>(&mut self, definitions: I) -> Result<()>
    where
        I: IntoIterator<Item = RouteDefinition>,
    {
        for (position, mut definition) in definitions.into_iter().enumerate() {
            if definition.priority.is_none() {
                definition.priority = Some(u32::try_from(position).unwrap_or(u32::MAX));
            }
            self.add_definition(definition)?;
        }
        self.sort();
        info!(
            routes_count = self.routes.len(),
            kind = ?self.kind,
            "Routing table loaded"
        );
        Ok(())
    }

    /// Add named definitions. A definition with neither path nor regex is
    /// served at `/{name}`.
    ///
    /// # Errors
    ///
    /// See [`RouteCollection::from_map`].
    pub fn extend_map<I>(&mut self, definitions: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, RouteDefinition)>,
    {
        for (name, mut definition) in definitions {
            if definition.path.is_none() && definition.regex.is_none() {
                definition.path = Some(format!("/{name}"));
            }
            definition.name = Some(name);
            self.add_definition(definition)?;
        }
        self.sort();
        info!(
            routes_count = self.routes.len(),
            kind = ?self.kind,
            "Routing table loaded"
        );
        Ok(())
    }

    /// Build a route with the first applicable strategy.
    ///
    /// # Errors
    ///
    /// [`RoutingError::InvalidRouteDefinition`] when no strategy applies,
    /// otherwise whatever the chosen strategy reports.
    pub fn build_route(&self, definition: RouteDefinition) -> Result<Route> {
        if let Some(strategy) = self.strategies.iter().find(|s| s.applies_to(&definition)) {
            return strategy.build(definition);
        }
        match DEFAULT_STRATEGIES.iter().find(|s| s.applies_to(&definition)) {
            Some(strategy) => strategy.build(definition),
            None => Err(RoutingError::invalid(
                definition.name.as_deref().unwrap_or("<unnamed>"),
                "no strategy is capable of building this route",
            )),
        }
    }

    fn insert(&mut self, route: Route) -> Arc<Route> {
        let route = Arc::new(route);
        debug!(
            route = %route.name(),
            path = ?route.path(),
            priority = route.priority(),
            literal = route.is_literal(),
            "Route registered"
        );
        match self.routes.iter_mut().find(|r| r.name() == route.name()) {
            Some(existing) => {
                warn!(route = %route.name(), "Duplicate route name, replacing earlier route");
                *existing = Arc::clone(&route);
            }
            None => self.routes.push(Arc::clone(&route)),
        }
        self.requires_sort = true;
        route
    }

    /// Order routes by descending `(priority, path)` if anything changed.
    pub fn sort(&mut self) {
        if self.requires_sort {
            self.routes.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
            self.requires_sort = false;
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Route>> {
        self.routes.iter().find(|r| r.name() == name)
    }

    /// Routes in priority order.
    pub fn iter(&mut self) -> impl Iterator<Item = &Arc<Route>> {
        self.sort();
        self.routes.iter()
    }

    /// Route names in priority order.
    pub fn names(&mut self) -> Vec<&str> {
        self.iter().map(|r| r.name()).collect()
    }
}

impl Default for RouteCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RouteCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteCollection")
            .field("kind", &self.kind)
            .field("routes", &self.routes.iter().map(|r| r.name()).collect::<Vec<_>>())
            .field("strategies", &self.strategies.len())
            .field("requires_sort", &self.requires_sort)
            .finish()
    }
}

impl fmt::Display for RouteCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<RouteCollection {:?} routes:{}>", self.kind, self.routes.len())
    }
}

impl Router for RouteCollection {
    fn add_definition(&mut self, mut definition: RouteDefinition) -> Result<Arc<Route>> {
        let children = std::mem::take(&mut definition.children);
        let route = self.build_route(definition)?;
        let route = self.insert(route);
        for child in children {
            self.add_definition(child.inherit_from(&route)?)?;
        }
        Ok(route)
    }

    fn add_route(&mut self, route: Route) -> Result<Arc<Route>> {
        Ok(self.insert(route))
    }

    fn matches<'a>(&'a mut self, request: &'a Request) -> Box<dyn Iterator<Item = RouteMatch> + 'a> {
        self.sort();
        debug!(
            method = %request.method,
            path = %request.path,
            routes_count = self.routes.len(),
            "Route match attempt"
        );
        let formats = &self.formats;
        Box::new(
            self.routes
                .iter()
                .filter_map(move |route| route.match_with(request, formats)),
        )
    }

    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    fn assemble(&self, name: &str, params: &Params) -> Result<String> {
        match self.get(name) {
            Some(route) => route.assemble(None, params),
            None => Err(RoutingError::RouteNotFound {
                name: name.to_string(),
            }),
        }
    }

    fn len(&self) -> usize {
        self.routes.len()
    }
}
