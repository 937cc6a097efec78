//! Route tables from YAML or JSON documents.
//!
//! A document whose top level is a sequence becomes a
//! [`CollectionKind::List`](crate::CollectionKind::List) collection, so list
//! position supplies default priorities. A mapping becomes a
//! [`CollectionKind::Map`](crate::CollectionKind::Map) collection keyed by
//! route name, in document order.
//!
//! ```yaml
//! home:
//!   path: /
//! post:
//!   path: /posts/:id[/:slug]
//!   accepts: [GET]
//!   requires:
//!     id: '\d+'
//!   children:
//!     comments: { path: /comments }
//! ```

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::route::RouteTable;
use crate::router::{RouteCollection, Router};

/// Load a route table from a `.yaml`, `.yml` or `.json` file.
///
/// # Errors
///
/// I/O failures, parse errors and invalid route definitions, each with the
/// file path attached as context.
pub fn load_routes(path: impl AsRef<Path>) -> Result<RouteCollection> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read route table {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    );
    let collection = if is_yaml {
        routes_from_yaml_str(&content)
    } else {
        routes_from_json_str(&content)
    }
    .with_context(|| format!("Failed to load route table {}", path.display()))?;

    info!(
        path = %path.display(),
        routes_count = collection.len(),
        "Route table file loaded"
    );
    Ok(collection)
}

/// Build a collection from a YAML document.
///
/// # Errors
///
/// YAML syntax errors, malformed definitions, or routes that fail to build.
pub fn routes_from_yaml_str(content: &str) -> Result<RouteCollection> {
    let table: RouteTable = serde_yaml::from_str(content).context("Invalid YAML route table")?;
    collection_from_table(table)
}

/// Build a collection from a JSON document.
///
/// # Errors
///
/// JSON syntax errors, malformed definitions, or routes that fail to build.
pub fn routes_from_json_str(content: &str) -> Result<RouteCollection> {
    let table: RouteTable = serde_json::from_str(content).context("Invalid JSON route table")?;
    collection_from_table(table)
}

fn collection_from_table(table: RouteTable) -> Result<RouteCollection> {
    let collection = match table {
        RouteTable::List(definitions) => RouteCollection::from_list(definitions),
        RouteTable::Map(entries) => RouteCollection::from_map(entries),
    };
    collection.context("Invalid route definition")
}
