//! Format table used for `Accept` header negotiation.
//!
//! Routes with a `format` requirement look the request's `Accept` header up
//! here to find candidate format names (`json`, `xml`, ...), then test those
//! names against their constraint.

use once_cell::sync::Lazy;

/// Table used when a collection is not given one explicitly.
pub(crate) static DEFAULT_FORMATS: Lazy<FormatTable> = Lazy::new(FormatTable::default);

/// Ordered mapping from format name to the media types it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatTable {
    formats: Vec<(String, Vec<String>)>,
}

impl FormatTable {
    /// An empty table. Every `format` requirement fails against it.
    pub fn empty() -> Self {
        Self {
            formats: Vec::new(),
        }
    }

    /// Register a format, replacing any previous media types for that name.
    pub fn insert<I, S>(&mut self, format: impl Into<String>, media_types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let format = format.into();
        let media_types: Vec<String> = media_types
            .into_iter()
            .map(|m| m.into().to_ascii_lowercase())
            .collect();
        match self.formats.iter_mut().find(|(name, _)| *name == format) {
            Some((_, existing)) => *existing = media_types,
            None => self.formats.push((format, media_types)),
        }
    }

    pub fn with(mut self, format: &str, media_types: &[&str]) -> Self {
        self.insert(format, media_types.iter().copied());
        self
    }

    /// Media types registered for `format`.
    pub fn media_types(&self, format: &str) -> Option<&[String]> {
        self.formats
            .iter()
            .find(|(name, _)| name == format)
            .map(|(_, types)| types.as_slice())
    }

    /// Format names whose media types appear in an `Accept` header, in table order.
    ///
    /// The header is split on `,` and media type parameters (`;q=0.8`) are ignored.
    pub fn formats_for(&self, accept: &str) -> Vec<&str> {
        let requested: Vec<String> = accept
            .split(',')
            .filter_map(|part| part.split(';').next())
            .map(|media| media.trim().to_ascii_lowercase())
            .filter(|media| !media.is_empty())
            .collect();

        self.formats
            .iter()
            .filter(|(_, types)| types.iter().any(|t| requested.contains(t)))
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

impl Default for FormatTable {
    fn default() -> Self {
        FormatTable::empty()
            .with("json", &["application/json", "text/json"])
            .with("xml", &["application/xml", "text/xml"])
            .with("html", &["text/html", "application/xhtml+xml"])
            .with("text", &["text/plain"])
            .with("csv", &["text/csv"])
            .with(
                "yaml",
                &["application/yaml", "application/x-yaml", "text/yaml"],
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_for_single_type() {
        let table = FormatTable::default();
        assert_eq!(table.formats_for("text/xml"), vec!["xml"]);
        assert_eq!(table.formats_for("text/json"), vec!["json"]);
        assert!(table.formats_for("image/png").is_empty());
    }

    #[test]
    fn test_formats_for_ignores_parameters_and_case() {
        let table = FormatTable::default();
        let formats = table.formats_for("Text/HTML;q=0.9, application/json");
        assert_eq!(formats, vec!["json", "html"]);
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut table = FormatTable::empty().with("json", &["application/json"]);
        table.insert("json", ["application/vnd.api+json"]);
        assert_eq!(
            table.media_types("json"),
            Some(&["application/vnd.api+json".to_string()][..])
        );
        assert!(table.formats_for("application/json").is_empty());
    }
}
