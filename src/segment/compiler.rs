use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

use crate::error::{Result, RoutingError};
use crate::Params;

use super::Node;

/// Pattern used for a segment without a registered constraint.
pub const DEFAULT_SEGMENT_PATTERN: &str = "[^/]+";

/// Compile a segment tree into an anchored regex with one named group per segment.
///
/// `constraints` maps segment names to regex sources that replace
/// [`DEFAULT_SEGMENT_PATTERN`] for that segment.
///
/// # Errors
///
/// A regex that fails to build (duplicate segment names, a broken constraint)
/// is reported as [`RoutingError::MalformedTemplate`].
pub fn compile_matcher(nodes: &[Node], constraints: &HashMap<String, String>) -> Result<Regex> {
    let mut pattern = String::with_capacity(32);
    pattern.push('^');
    write_pattern(nodes, constraints, &mut pattern);
    pattern.push('$');

    debug!(pattern = %pattern, "Compiled segment pattern");

    Regex::new(&pattern).map_err(|err| {
        let template: String = nodes.iter().map(Node::to_string).collect();
        RoutingError::malformed(&template, err.to_string())
    })
}

fn write_pattern(nodes: &[Node], constraints: &HashMap<String, String>, pattern: &mut String) {
    for node in nodes {
        match node {
            Node::Static(text) => pattern.push_str(&regex::escape(text)),
            Node::Segment(name) => {
                let end = constraints
                    .get(name)
                    .map(String::as_str)
                    .unwrap_or(DEFAULT_SEGMENT_PATTERN);
                pattern.push_str("(?P<");
                pattern.push_str(name);
                pattern.push_str(">");
                pattern.push_str(end);
                pattern.push(')');
            }
            Node::Optional(children) => {
                pattern.push_str("(?:");
                write_pattern(children, constraints, pattern);
                pattern.push_str(")?");
            }
        }
    }
}

/// Render a concrete path from a segment tree.
///
/// Each segment takes its value from `params`, then `defaults`; empty values
/// count as absent. An optional group is dropped entirely, decoration
/// included, when one of its own segments has no value or when no segment
/// inside it (nested groups included) renders at all, so a group of plain
/// text such as `/a[/b]` renders as `/a`. Nested groups are decided
/// independently.
///
/// # Errors
///
/// [`RoutingError::MissingParameter`] when a segment outside every optional
/// group has no value.
pub fn render_path(nodes: &[Node], params: &Params, defaults: &Params) -> Result<String> {
    Ok(render_level(nodes, params, defaults, false)?
        .map(|level| level.path)
        .unwrap_or_default())
}

struct Rendered {
    path: String,
    segments: usize,
}

fn render_level(
    nodes: &[Node],
    params: &Params,
    defaults: &Params,
    optional: bool,
) -> Result<Option<Rendered>> {
    let mut path = String::new();
    let mut segments = 0;
    for node in nodes {
        match node {
            Node::Static(text) => path.push_str(text),
            Node::Segment(name) => match resolve(name, params, defaults) {
                Some(value) => {
                    path.push_str(value);
                    segments += 1;
                }
                None if optional => return Ok(None),
                None => return Err(RoutingError::MissingParameter { name: name.clone() }),
            },
            Node::Optional(children) => {
                if let Some(group) = render_level(children, params, defaults, true)? {
                    if group.segments > 0 {
                        path.push_str(&group.path);
                        segments += group.segments;
                    }
                }
            }
        }
    }
    Ok(Some(Rendered { path, segments }))
}

fn resolve<'a>(name: &str, params: &'a Params, defaults: &'a Params) -> Option<&'a str> {
    params
        .get(name)
        .filter(|value| !value.is_empty())
        .or_else(|| defaults.get(name).filter(|value| !value.is_empty()))
        .map(String::as_str)
}
