//! Field templates whose fields are host filter expressions.

use super::FileData;
use crate::error::{FieldcopyError, Result};
use crate::template::Template;
use std::collections::HashMap;

/// Resolution context supplied by the host while a row is being resolved.
///
/// Field names found in copyfile templates are treated as filter
/// expressions (for example `value:tag_id`) and handed to the context, which
/// turns each into a rendered value.
pub trait ValueResolveContext {
    /// Resolve a single filter expression against the current row.
    fn resolve_expression(&self, expression: &str) -> Result<String>;

    /// Resolve several expressions, keyed by the expression text.
    fn extract_values(&self, expressions: &[&str]) -> Result<HashMap<String, String>> {
        expressions
            .iter()
            .map(|expression| {
                let value = self.resolve_expression(expression)?;
                Ok::<_, FieldcopyError>((expression.to_string(), value))
            })
            .collect()
    }
}

/// Replace every `{expression}` field of `source` with its resolved value.
///
/// Strings without fields are returned unchanged without consulting the
/// context.
pub fn replace_fields_with_filter(source: &str, ctx: &dyn ValueResolveContext) -> Result<String> {
    let template = Template::parse(source);
    if template.is_static() {
        return Ok(source.to_string());
    }

    let values = ctx.extract_values(&template.fields())?;
    Ok(template.replace(&values)?)
}

/// Render both the source and the destination templates of `file_data`.
pub fn default_get_paths(
    ctx: &dyn ValueResolveContext,
    _field: &str,
    file_data: &FileData,
) -> Result<(String, String)> {
    let source = replace_fields_with_filter(&file_data.source, ctx)?;
    let destination = replace_fields_with_filter(&file_data.destination, ctx)?;
    Ok((source, destination))
}

/// Render `file_data.value`, or leave the field out when it is unset.
pub fn default_get_value(
    ctx: &dyn ValueResolveContext,
    file_data: &FileData,
) -> Result<Option<String>> {
    file_data
        .value
        .as_deref()
        .map(|value| replace_fields_with_filter(value, ctx))
        .transpose()
}
