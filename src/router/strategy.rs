use crate::error::Result;
use crate::route::{Route, RouteDefinition};

/// One entry of the ordered list a collection consults to build routes.
///
/// The first strategy whose [`applies_to`](BuildStrategy::applies_to)
/// returns `true` builds the route; its errors are not retried elsewhere.
///
/// Any `(predicate, constructor)` pair of closures is a strategy:
///
/// ```rust
/// use segrouter::{Route, RouteCollection, RouteDefinition, Router};
///
/// let api_only_get = (
///     |d: &RouteDefinition| d.path.as_deref().is_some_and(|p| p.starts_with("/api")),
///     |d: RouteDefinition| Route::pattern(d.with_accepts(["GET"])),
/// );
/// let mut router = RouteCollection::new().with_strategy(api_only_get);
/// let route = router.add_definition(RouteDefinition::new("status", "/api/status")).unwrap();
/// assert_eq!(route.accepts(), &[http::Method::GET]);
/// ```
pub trait BuildStrategy: Send + Sync {
    fn applies_to(&self, definition: &RouteDefinition) -> bool;

    fn build(&self, definition: RouteDefinition) -> Result<Route>;
}

/// Builds pattern routes for templates with `:`, `[` or `]`, or a raw regex.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternStrategy;

impl BuildStrategy for PatternStrategy {
    fn applies_to(&self, definition: &RouteDefinition) -> bool {
        definition.is_pattern()
    }

    fn build(&self, definition: RouteDefinition) -> Result<Route> {
        Route::pattern(definition)
    }
}

/// Builds literal routes for any remaining definition with a path.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralStrategy;

impl BuildStrategy for LiteralStrategy {
    fn applies_to(&self, definition: &RouteDefinition) -> bool {
        definition.path.is_some()
    }

    fn build(&self, definition: RouteDefinition) -> Result<Route> {
        Route::literal(definition)
    }
}

impl<P, B> BuildStrategy for (P, B)
where
    P: Fn(&RouteDefinition) -> bool + Send + Sync,
    B: Fn(RouteDefinition) -> Result<Route> + Send + Sync,
{
    fn applies_to(&self, definition: &RouteDefinition) -> bool {
        (self.0)(definition)
    }

    fn build(&self, definition: RouteDefinition) -> Result<Route> {
        (self.1)(definition)
    }
}

/// Strategies every collection falls back to, in order.
pub(crate) static DEFAULT_STRATEGIES: [&dyn BuildStrategy; 2] = [&PatternStrategy, &LiteralStrategy];
