//! # segrouter
//!
//! **segrouter** compiles human-readable path templates such as
//! `/search/:keyword[/:page]` into anchored regular expressions, matches
//! incoming requests against prioritized collections of named routes, and
//! assembles URLs back from route names and parameters.
//!
//! ## Architecture
//!
//! - **[`segment`]** - Template parsing, regex compilation and path rendering
//! - **[`route`]** - Literal and pattern routes, definitions and constraints
//! - **[`router`]** - Route collections, build strategies and composites
//! - **[`request`]** - The request view matching operates on
//! - **[`formats`]** - Accept header to format name negotiation
//! - **[`loader`]** - Route tables from YAML or JSON files
//! - **[`logging`]** - `tracing-subscriber` setup driven by the environment
//!
//! ## Template syntax
//!
//! | Syntax | Meaning |
//! |--------|---------|
//! | `/posts` | literal text |
//! | `:id` | named segment, `[^/]+` unless constrained |
//! | `[...]` | optional group, nestable |
//!
//! ## Quick Start
//!
//! ```rust
//! use http::Method;
//! use segrouter::{Params, Request, RouteCollection, RouteDefinition, Router};
//!
//! let mut router = RouteCollection::from_list([
//!     RouteDefinition::new("search", "/search/:keyword[/:page]")
//!         .with_requirement("page", r"\d+")
//!         .with_default("page", "1"),
//! ])
//! .unwrap();
//!
//! let found = router
//!     .match_request(&Request::new(Method::GET, "/search/rust/3"))
//!     .unwrap();
//! assert_eq!(found.get_param("page"), Some("3"));
//!
//! let params = Params::from([("keyword".to_string(), "rust".to_string())]);
//! assert_eq!(router.assemble("search", &params).unwrap(), "/search/rust/1");
//! ```

use std::collections::HashMap;

pub mod error;
pub mod formats;
pub mod loader;
pub mod logging;
pub mod request;
pub mod route;
pub mod router;
pub mod segment;

/// Parameter values keyed by name.
pub type Params = HashMap<String, String>;

pub use error::{Result, RoutingError};
pub use formats::FormatTable;
pub use request::Request;
pub use route::{Requirement, Route, RouteDefinition, RouteMatch, RouteTable};
pub use router::{BuildStrategy, CollectionKind, CompositeRouter, RouteCollection, Router};
