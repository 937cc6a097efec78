//! # Segment Module
//!
//! Path templates are written as literal text mixed with named segments and
//! bracketed optional groups:
//!
//! - `/search/:keyword` - `keyword` is a required parameter
//! - `/about[/:company]` - `company` may be omitted together with its `/`
//! - `/about[/:company[/:branch]]` - optional groups nest
//!
//! A template is parsed once into a tree of [`Node`]s. The same tree feeds two
//! independent operations: [`compile_matcher`] builds an anchored regex with a
//! named capture group per segment, and [`render_path`] substitutes parameter
//! values back into the template.
//!
//! ```rust
//! use segrouter::segment::{compile_matcher, parse, render_path};
//! use std::collections::HashMap;
//!
//! let tree = parse("/about[/:company]").unwrap();
//! let regex = compile_matcher(&tree, &HashMap::new()).unwrap();
//! assert!(regex.is_match("/about"));
//! assert!(regex.is_match("/about/acme"));
//!
//! let params = HashMap::from([("company".to_string(), "acme".to_string())]);
//! assert_eq!(render_path(&tree, &params, &HashMap::new()).unwrap(), "/about/acme");
//! ```

mod compiler;
mod parser;

use std::fmt;

pub use compiler::{compile_matcher, render_path, DEFAULT_SEGMENT_PATTERN};
pub use parser::parse;

/// One node of a parsed path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text, matched and rendered verbatim.
    Static(String),
    /// Named placeholder for one non-separator run of characters.
    Segment(String),
    /// A group that may be absent as a whole.
    Optional(Vec<Node>),
}

impl Node {
    /// Names of every segment in this node, including nested optional groups.
    pub fn segment_names(&self) -> Vec<&str> {
        match self {
            Node::Static(_) => Vec::new(),
            Node::Segment(name) => vec![name.as_str()],
            Node::Optional(children) => children.iter().flat_map(Node::segment_names).collect(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Static(text) => f.write_str(text),
            Node::Segment(name) => write!(f, ":{name}"),
            Node::Optional(children) => {
                f.write_str("[")?;
                for child in children {
                    child.fmt(f)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Whether a template needs the pattern compiler.
///
/// Templates without `:`, `[` or `]` are plain literal paths.
pub fn is_dynamic(template: &str) -> bool {
    template.contains([':', '[', ']'])
}
