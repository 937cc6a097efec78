use crate::error::{Result, RoutingError};

use super::Node;

/// Parse a path template into a tree of segment nodes.
///
/// The parser keeps an explicit stack of open levels. Literal text and
/// segments are appended to the innermost open level; `[` pushes a new level
/// and `]` pops it into its parent as an [`Node::Optional`].
///
/// # Errors
///
/// Returns [`RoutingError::MalformedTemplate`] for a `]` without a matching
/// `[`, an unterminated `[`, or a `:` that is not followed by a name.
pub fn parse(template: &str) -> Result<Vec<Node>> {
    let mut levels: Vec<Vec<Node>> = vec![Vec::new()];
    let mut literal = String::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ':' => {
                flush_literal(&mut levels, &mut literal);
                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if !is_name_char(next) {
                        break;
                    }
                    name.push(next);
                    chars.next();
                }
                if name.is_empty() {
                    return Err(RoutingError::malformed(
                        template,
                        "expected a segment name after ':'",
                    ));
                }
                push_node(&mut levels, Node::Segment(name));
            }
            '[' => {
                flush_literal(&mut levels, &mut literal);
                levels.push(Vec::new());
            }
            ']' => {
                flush_literal(&mut levels, &mut literal);
                if levels.len() < 2 {
                    return Err(RoutingError::malformed(
                        template,
                        "bracket mismatch: ']' without an open '['",
                    ));
                }
                let group = levels.pop().unwrap_or_default();
                push_node(&mut levels, Node::Optional(group));
            }
            _ => literal.push(c),
        }
    }

    flush_literal(&mut levels, &mut literal);
    if levels.len() > 1 {
        return Err(RoutingError::malformed(
            template,
            format!("bracket mismatch: {} unterminated '['", levels.len() - 1),
        ));
    }
    Ok(levels.pop().unwrap_or_default())
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn push_node(levels: &mut [Vec<Node>], node: Node) {
    if let Some(level) = levels.last_mut() {
        level.push(node);
    }
}

fn flush_literal(levels: &mut [Vec<Node>], literal: &mut String) {
    if !literal.is_empty() {
        push_node(levels, Node::Static(std::mem::take(literal)));
    }
}
