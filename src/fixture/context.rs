//! Filter expression resolution against a fixture row.
//!
//! Supported expressions:
//!
//! - `value:<field>` - A field of the current row
//! - `valueref:<field>:<table>:<ref_field>:<return_field>` - `<return_field>`
//!   of the first resolved `<table>` row whose `<ref_field>` equals the
//!   current row's `<field>`
//! - `metadata:<key>[:<default>]` - A metadata entry of the current row, or
//!   the default when the key is absent

use super::{ResolvedData, ResolvedRow};
use crate::copyfile::ValueResolveContext;
use crate::error::{FieldcopyError, Result};
use serde_yaml::Value;

/// Resolution context for one row.
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    row: &'a ResolvedRow,
    resolved: &'a ResolvedData,
}

impl<'a> RowContext<'a> {
    pub fn new(row: &'a ResolvedRow, resolved: &'a ResolvedData) -> Self {
        Self { row, resolved }
    }

    fn field(&self, expression: &str, name: &str) -> Result<&'a Value> {
        self.row.fields.get(name).ok_or_else(|| {
            FieldcopyError::resolve(expression, format!("field '{}' not found in row", name))
        })
    }

    fn value_ref(&self, expression: &str, parts: &[&str]) -> Result<String> {
        let [field, table, ref_field, return_field] = parts else {
            return Err(FieldcopyError::resolve(
                expression,
                "expected valueref:<field>:<table>:<ref_field>:<return_field>",
            ));
        };

        let local = self.field(expression, field)?;
        let rows = self.resolved.rows(table).ok_or_else(|| {
            FieldcopyError::resolve(expression, format!("table '{}' is not resolved", table))
        })?;

        let target = rows
            .iter()
            .find(|row| row.fields.get(*ref_field) == Some(local))
            .ok_or_else(|| {
                FieldcopyError::resolve(
                    expression,
                    format!("no row in '{}' with {} = {}", table, ref_field, describe(local)),
                )
            })?;

        let value = target.fields.get(*return_field).ok_or_else(|| {
            FieldcopyError::resolve(
                expression,
                format!("field '{}' not found in table '{}'", return_field, table),
            )
        })?;
        render(expression, value)
    }

    fn metadata(&self, expression: &str, rest: &str) -> Result<String> {
        let (key, default) = match rest.split_once(':') {
            Some((key, default)) => (key, Some(default)),
            None => (rest, None),
        };

        match (self.row.metadata.get(key), default) {
            (Some(value), _) => render(expression, value),
            (None, Some(default)) => Ok(default.to_string()),
            (None, None) => Err(FieldcopyError::resolve(
                expression,
                format!("metadata '{}' not set", key),
            )),
        }
    }
}

impl ValueResolveContext for RowContext<'_> {
    fn resolve_expression(&self, expression: &str) -> Result<String> {
        let Some((kind, rest)) = expression.split_once(':') else {
            return Err(FieldcopyError::resolve(expression, "unknown filter expression"));
        };

        match kind {
            "value" => render(expression, self.field(expression, rest)?),
            "valueref" => {
                let parts: Vec<&str> = rest.split(':').collect();
                self.value_ref(expression, &parts)
            }
            "metadata" => self.metadata(expression, rest),
            _ => Err(FieldcopyError::resolve(
                expression,
                "unknown filter expression",
            )),
        }
    }
}

/// Render a YAML value as substitution text.
///
/// Strings are used as-is, other scalars in their YAML form, and sequences
/// or mappings as compact JSON.
pub fn render_value(value: &Value) -> std::result::Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Tagged(tagged) => render_value(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => {
            serde_json::to_string(value).map_err(|e| e.to_string())
        }
    }
}

fn render(expression: &str, value: &Value) -> Result<String> {
    render_value(value).map_err(|reason| FieldcopyError::resolve(expression, reason))
}

fn describe(value: &Value) -> String {
    render_value(value).unwrap_or_else(|_| format!("{:?}", value))
}
