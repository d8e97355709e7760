//! Curly-brace field templates.
//!
//! A [`Template`] is built by scanning a string once for `{name}` fields. The
//! field names can be inspected before rendering so callers know which
//! values to collect, and [`Template::replace`] substitutes every field with
//! a caller-supplied value.
//!
//! # Syntax
//!
//! - `{name}` - A field named `name`
//! - `{{` - A literal `{`; it never opens a field
//! - `}}` inside a field - A literal `}` that becomes part of the name
//! - A `}` outside a field is plain text
//!
//! Text outside fields, escaped pairs included, is copied to the output
//! verbatim.
//!
//! # Error Handling
//!
//! Scanning never fails: an unterminated field is simply not a field.
//! Rendering fails with [`TemplateError::MissingField`] when a field has no
//! value, rather than substituting an empty string.

mod scanner;

#[cfg(test)]
mod tests;

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Write as _};
use std::hash::{BuildHasher, Hash};
use thiserror::Error;

/// Error type for template rendering failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A field was found in the template but no value was supplied for it.
    #[error("field '{name}' not set")]
    MissingField {
        /// The name of the field without a value.
        name: String,
    },
}

/// Location of one field inside the original string.
///
/// `start` is the byte offset of the opening brace and `end` is one past the
/// closing brace, so `&source[start..end]` is the whole `{...}` text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldSpan {
    pub name: String,
    pub start: usize,
    pub end: usize,
}

/// Lookup of rendered values by field name.
///
/// Implemented for `HashMap` and `BTreeMap` keyed by anything that borrows as
/// `str`, so `HashMap<&str, &str>` and `BTreeMap<String, u64>` both work.
pub trait FieldValues {
    type Value: fmt::Display + ?Sized;

    fn lookup(&self, name: &str) -> Option<&Self::Value>;
}

impl<K, V, S> FieldValues for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: fmt::Display,
    S: BuildHasher,
{
    type Value = V;

    fn lookup(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

impl<K, V> FieldValues for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: fmt::Display,
{
    type Value = V;

    fn lookup(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

/// A scanned string together with the fields found in it.
///
/// Immutable once parsed, so a single `Template` can be rendered from several
/// threads at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    fields: HashMap<String, FieldSpan>,
}

impl Template {
    /// Scan `source` for fields.
    ///
    /// When a name occurs more than once, only the span of its last
    /// occurrence is kept.
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let fields = scanner::scan(&source);
        tracing::debug!(fields = fields.len(), "parsed template");
        Self { source, fields }
    }

    /// The string the template was parsed from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Distinct field names, ordered by position in the string.
    pub fn fields(&self) -> Vec<&str> {
        self.spans().map(|span| span.name.as_str()).collect()
    }

    /// Whether the string contains no fields at all.
    pub fn is_static(&self) -> bool {
        self.fields.is_empty()
    }

    /// The span recorded for `name`, if any.
    pub fn span(&self, name: &str) -> Option<&FieldSpan> {
        self.fields.get(name)
    }

    /// The raw `{...}` text of the field called `name`.
    pub fn field_text(&self, name: &str) -> Option<&str> {
        self.span(name).map(|span| &self.source[span.start..span.end])
    }

    /// Recorded spans in ascending position order.
    pub fn spans(&self) -> impl Iterator<Item = &FieldSpan> {
        let mut spans: Vec<&FieldSpan> = self.fields.values().collect();
        spans.sort_by_key(|span| span.start);
        spans.into_iter()
    }

    /// Render the template, replacing every field with its value.
    ///
    /// Values are rendered with their `Display` implementation. The first
    /// field (by position) without a value aborts rendering with
    /// [`TemplateError::MissingField`].
    pub fn replace<M>(&self, values: &M) -> Result<String, TemplateError>
    where
        M: FieldValues + ?Sized,
    {
        let mut result = String::with_capacity(self.source.len());
        let mut cursor = 0;

        for span in self.spans() {
            result.push_str(&self.source[cursor..span.start]);

            let value = values
                .lookup(&span.name)
                .ok_or_else(|| TemplateError::MissingField {
                    name: span.name.clone(),
                })?;
            // Writing into a String cannot fail.
            let _ = write!(result, "{}", value);

            cursor = span.end;
        }
        result.push_str(&self.source[cursor..]);

        Ok(result)
    }
}

/// Parse `source` and render it with `values` in one step.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use fieldcopy::template::replace;
///
/// let values = HashMap::from([("tenant", "666"), ("nonna", "888")]);
/// let result = replace("test {tenant} sample {nonna}", &values).unwrap();
/// assert_eq!(result, "test 666 sample 888");
/// ```
pub fn replace<M>(source: &str, values: &M) -> Result<String, TemplateError>
where
    M: FieldValues + ?Sized,
{
    Template::parse(source).replace(values)
}

/// Helper to build a value map from key-value pairs.
pub fn values<I, K, V>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
