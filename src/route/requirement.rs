use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, RoutingError};

/// Key in `requires` restricting the request subdomain.
pub const SUBDOMAIN: &str = "subdomain";
/// Key in `requires` restricting the negotiated format.
pub const FORMAT: &str = "format";

/// A declared requirement on a parameter, subdomain or format.
///
/// A single string is a regex (or, for `subdomain`, a literal value). A list
/// is a set of allowed literal values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Requirement {
    Value(String),
    OneOf(Vec<String>),
}

impl Requirement {
    /// Literal comparison, used for the subdomain check.
    pub fn accepts_literal(&self, value: &str) -> bool {
        match self {
            Requirement::Value(expected) => expected == value,
            Requirement::OneOf(allowed) => allowed.iter().any(|a| a == value),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Value(value) => f.write_str(value),
            Requirement::OneOf(values) => write!(f, "[{}]", values.join(", ")),
        }
    }
}

impl From<&str> for Requirement {
    fn from(value: &str) -> Self {
        Requirement::Value(value.to_string())
    }
}

impl From<String> for Requirement {
    fn from(value: String) -> Self {
        Requirement::Value(value)
    }
}

impl From<Vec<String>> for Requirement {
    fn from(values: Vec<String>) -> Self {
        Requirement::OneOf(values)
    }
}

impl From<&[&str]> for Requirement {
    fn from(values: &[&str]) -> Self {
        Requirement::OneOf(values.iter().map(|v| v.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Requirement {
    fn from(values: [&str; N]) -> Self {
        Requirement::OneOf(values.iter().map(|v| v.to_string()).collect())
    }
}

/// A requirement compiled for matching.
#[derive(Debug, Clone)]
pub(crate) enum Constraint {
    Pattern {
        source: String,
        /// `source` anchored at the start of the value
        regex: Regex,
    },
    OneOf(Vec<String>),
}

impl Constraint {
    pub(crate) fn compile(route: &str, key: &str, requirement: &Requirement) -> Result<Self> {
        match requirement {
            Requirement::Value(source) => {
                let regex = Regex::new(&format!("^(?:{source})")).map_err(|err| {
                    RoutingError::invalid(route, format!("requirement '{key}': {err}"))
                })?;
                Ok(Constraint::Pattern {
                    source: source.clone(),
                    regex,
                })
            }
            Requirement::OneOf(values) => Ok(Constraint::OneOf(values.clone())),
        }
    }

    pub(crate) fn is_satisfied_by(&self, value: &str) -> bool {
        match self {
            Constraint::Pattern { regex, .. } => regex.is_match(value),
            Constraint::OneOf(values) => values.iter().any(|v| v == value),
        }
    }

    /// Regex source to embed in a segment's capture group.
    pub(crate) fn segment_pattern(&self) -> String {
        match self {
            Constraint::Pattern { source, .. } => source.clone(),
            Constraint::OneOf(values) => values
                .iter()
                .map(|v| regex::escape(v))
                .collect::<Vec<_>>()
                .join("|"),
        }
    }
}
