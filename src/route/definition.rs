//! Typed route definitions.
//!
//! Definitions are the boundary between loosely structured configuration
//! (YAML, JSON, or code) and the strongly typed [`Route`](super::Route). They
//! carry no compiled state; build strategies turn them into routes.

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use super::{Requirement, Route};
use crate::error::{self, RoutingError};
use crate::segment::is_dynamic;
use crate::Params;

/// Declarative description of a route and its children.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RouteDefinition {
    #[serde(default)]
    pub name: Option<String>,
    /// Path template such as `/users/:id[/:tab]`
    #[serde(default)]
    pub path: Option<String>,
    /// Raw regex matched against the whole path, used instead of `path` for matching
    #[serde(default)]
    pub regex: Option<String>,
    /// Allowed HTTP methods, all known methods when absent
    #[serde(default)]
    pub accepts: Option<Vec<String>>,
    #[serde(default)]
    pub requires: HashMap<String, Requirement>,
    #[serde(default, deserialize_with = "deserialize_defaults")]
    pub defaults: Params,
    /// Opaque metadata carried along with the route
    #[serde(default)]
    pub options: serde_json::Map<String, Value>,
    #[serde(default)]
    pub priority: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_children")]
    pub children: Vec<RouteDefinition>,
}

impl RouteDefinition {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// A definition with a name only; path or regex must be added before building.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_regex(mut self, regex: impl Into<String>) -> Self {
        self.regex = Some(regex.into());
        self
    }

    pub fn with_accepts<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepts = Some(methods.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_requirement(
        mut self,
        key: impl Into<String>,
        requirement: impl Into<Requirement>,
    ) -> Self {
        self.requires.insert(key.into(), requirement.into());
        self
    }

    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_child(mut self, child: RouteDefinition) -> Self {
        self.children.push(child);
        self
    }

    /// Whether this definition needs a compiled matcher.
    pub fn is_pattern(&self) -> bool {
        self.regex.is_some() || self.path.as_deref().is_some_and(is_dynamic)
    }

    /// Turn a child definition into a standalone one under `parent`.
    ///
    /// The child is renamed `parent/child` and its path is prefixed with the
    /// parent's (a child without a path gets `/{child}`). A slash shared by
    /// both sides of the join is kept once. `requires` and `defaults` are
    /// merged the same way: parent entries override the child's for the same
    /// key, keys only the child sets are kept.
    ///
    /// # Errors
    ///
    /// [`RoutingError::InvalidRouteDefinition`] for a child without a name.
    pub(crate) fn inherit_from(mut self, parent: &Route) -> error::Result<Self> {
        let child_name = self
            .name
            .take()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                RoutingError::invalid(parent.name(), "child route definitions need a name")
            })?;
        let child_path = self
            .path
            .take()
            .unwrap_or_else(|| format!("/{child_name}"));

        self.name = Some(format!("{}/{}", parent.name(), child_name));
        self.path = Some(join_paths(parent.path().unwrap_or_default(), &child_path));

        for (key, requirement) in parent.requires() {
            self.requires.insert(key.clone(), requirement.clone());
        }
        for (key, value) in parent.defaults() {
            self.defaults.insert(key.clone(), value.clone());
        }
        Ok(self)
    }
}

fn join_paths(parent: &str, child: &str) -> String {
    match (parent.strip_suffix('/'), child.starts_with('/')) {
        (Some(trimmed), true) => format!("{trimmed}{child}"),
        _ => format!("{parent}{child}"),
    }
}

/// Top-level route table document: a list of named definitions or a mapping
/// from name to definition. Mapping order is preserved.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteTable {
    List(Vec<RouteDefinition>),
    Map(Vec<(String, RouteDefinition)>),
}

impl RouteTable {
    /// Definitions with names resolved from mapping keys.
    pub fn into_definitions(self) -> Vec<RouteDefinition> {
        match self {
            RouteTable::List(definitions) => definitions,
            RouteTable::Map(entries) => entries
                .into_iter()
                .map(|(name, mut definition)| {
                    definition.name = Some(name);
                    definition
                })
                .collect(),
        }
    }
}

impl<'de> Deserialize<'de> for RouteTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RouteTableVisitor;

        impl<'de> Visitor<'de> for RouteTableVisitor {
            type Value = RouteTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list or a mapping of route definitions")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(RouteTable::List(Vec::new()))
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(RouteTable::List(Vec::new()))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut definitions = Vec::new();
                while let Some(definition) = seq.next_element::<RouteDefinition>()? {
                    definitions.push(definition);
                }
                Ok(RouteTable::List(definitions))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some(entry) = map.next_entry::<String, RouteDefinition>()? {
                    entries.push(entry);
                }
                Ok(RouteTable::Map(entries))
            }
        }

        deserializer.deserialize_any(RouteTableVisitor)
    }
}

fn deserialize_children<'de, D>(deserializer: D) -> Result<Vec<RouteDefinition>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RouteTable::deserialize(deserializer)?.into_definitions())
}

/// Default values may be written as any scalar; they are kept as strings.
fn deserialize_defaults<'de, D>(deserializer: D) -> Result<Params, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<HashMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    let mut defaults = Params::with_capacity(raw.len());
    for (key, value) in raw {
        let value = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => continue,
            other => {
                return Err(de::Error::custom(format!(
                    "default '{key}' must be a scalar, got {other}"
                )))
            }
        };
        defaults.insert(key, value);
    }
    Ok(defaults)
}
