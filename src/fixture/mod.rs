//! Minimal fixture host for the copyfile plugin.
//!
//! Loads a YAML fixture document, resolves its tables row by row, and drives
//! [`CopyFile`] the way a data-loading framework would:
//!
//! ```yaml
//! tables:
//!   tenants:
//!     rows:
//!       - tenant_id: 987
//!         name: "Joomla"
//!   tags:
//!     config:
//!       depends: ["tenants"]
//!       default_values:
//!         tagfilename: !copyfile
//!           value: "{value:tag_id}.png"
//!           source: "images/tags/{metadata:sourceTag:javascript}.png"
//!           destination: "tenant/{valueref:tenant_id:tenants:tenant_id:name}/{value:tag_id}.png"
//!     rows:
//!       - tag_id: 559
//!         tenant_id: 987
//!         _metadata: !metadata
//!           sourceTag: "javascript_lang"
//! ```
//!
//! Tables are resolved in document order, so a table can only reference
//! tables declared before it.

mod context;


pub use context::{RowContext, render_value};

use crate::copyfile::{CopiedFile, CopyFile, FileData};
use crate::error::{FieldcopyError, Result};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Row key holding per-row metadata instead of a field.
pub const METADATA_KEY: &str = "_metadata";

/// Optional tag on the metadata mapping.
pub const METADATA_TAG: &str = "metadata";

/// A parsed, unresolved fixture document.
#[derive(Debug, Clone, Default)]
pub struct Fixture {
    tables: Vec<TableData>,
}

#[derive(Debug, Clone)]
struct TableData {
    name: String,
    depends: Vec<String>,
    default_values: Mapping,
    rows: Vec<Mapping>,
}

/// A row after resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedRow {
    pub fields: BTreeMap<String, Value>,
    pub metadata: BTreeMap<String, Value>,
}

/// Result of resolving a fixture.
#[derive(Debug, Clone, Default)]
pub struct ResolvedData {
    tables: BTreeMap<String, Vec<ResolvedRow>>,
    copied: Vec<CopiedFile>,
}

impl ResolvedData {
    /// Resolved rows of `table`, or `None` if the table has not been resolved.
    pub fn rows(&self, table: &str) -> Option<&[ResolvedRow]> {
        self.tables.get(table).map(Vec::as_slice)
    }

    /// Every file copied, in resolution order.
    pub fn copied(&self) -> &[CopiedFile] {
        &self.copied
    }
}

impl Fixture {
    /// Load a fixture from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FieldcopyError::UserError(format!(
                "failed to read fixture file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a fixture from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let document: Value = serde_yaml::from_str(yaml)
            .map_err(|e| FieldcopyError::UserError(format!("failed to parse fixture YAML: {}", e)))?;

        let document = match document {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(document) => document,
            _ => return Err(invalid("document must be a mapping")),
        };
        if let Some(key) = document.keys().find(|key| key.as_str() != Some("tables")) {
            return Err(invalid(&format!("unknown top-level key {:?}", key)));
        }

        let tables = match document.get("tables") {
            None | Some(Value::Null) => return Ok(Self::default()),
            Some(Value::Mapping(tables)) => tables,
            Some(_) => return Err(invalid("'tables' must be a mapping")),
        };

        let mut parsed = Vec::with_capacity(tables.len());
        for (name, table) in tables {
            let name = key_to_string(name, "table name")?;
            parsed.push(parse_table(name, table)?);
        }

        Ok(Self { tables: parsed })
    }

    /// Names of the tables, in resolution order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|table| table.name.as_str())
    }

    /// Resolve every row, calling `plugin` for `!copyfile` fields.
    pub fn resolve(&self, plugin: &CopyFile) -> Result<ResolvedData> {
        let mut resolved = ResolvedData::default();

        for table in &self.tables {
            for dependency in &table.depends {
                if !resolved.tables.contains_key(dependency) {
                    return Err(invalid(&format!(
                        "table '{}' depends on '{}', which must be declared before it",
                        table.name, dependency
                    )));
                }
            }

            let mut rows = Vec::with_capacity(table.rows.len());
            for (index, row) in table.rows.iter().enumerate() {
                let (row, copied) = resolve_row(table, row, &resolved, plugin).map_err(|e| {
                    tracing::warn!(table = %table.name, row = index, error = %e, "row failed");
                    e
                })?;
                rows.push(row);
                resolved.copied.extend(copied);
            }

            tracing::debug!(table = %table.name, rows = rows.len(), "resolved table");
            resolved.tables.insert(table.name.clone(), rows);
        }

        Ok(resolved)
    }
}

fn resolve_row(
    table: &TableData,
    row: &Mapping,
    resolved: &ResolvedData,
    plugin: &CopyFile,
) -> Result<(ResolvedRow, Vec<CopiedFile>)> {
    let mut merged = table.default_values.clone();
    for (key, value) in row {
        merged.insert(key.clone(), value.clone());
    }

    let mut result = ResolvedRow::default();
    let mut pending: BTreeMap<String, FileData> = BTreeMap::new();

    for (key, value) in merged {
        let key = key_to_string(&key, "field name")?;
        if key == METADATA_KEY {
            result.metadata = parse_metadata(value)?;
        } else if let Some(file_data) = CopyFile::parse_value(&value)? {
            pending.insert(key, file_data);
        } else {
            result.fields.insert(key, value);
        }
    }

    let mut file_values = Vec::new();
    {
        let ctx = RowContext::new(&result, resolved);
        for (field, file_data) in &pending {
            if let Some(value) = plugin.get_value(&ctx, file_data)? {
                file_values.push((field.clone(), value));
            }
        }
    }
    for (field, value) in file_values {
        result.fields.insert(field, Value::String(value));
    }

    let ctx = RowContext::new(&result, resolved);
    let copied = plugin.row_resolved(&ctx, &pending)?;

    Ok((result, copied))
}

fn parse_table(name: String, table: &Value) -> Result<TableData> {
    let config = table.get("config");

    let depends = match config.and_then(|c| c.get("depends")) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Sequence(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(String::from)
                    .ok_or_else(|| invalid(&format!("table '{}': depends entries must be strings", name)))
            })
            .collect::<Result<_>>()?,
        Some(_) => return Err(invalid(&format!("table '{}': depends must be a list", name))),
    };

    let default_values = match config.and_then(|c| c.get("default_values")) {
        None | Some(Value::Null) => Mapping::new(),
        Some(Value::Mapping(values)) => values.clone(),
        Some(_) => {
            return Err(invalid(&format!(
                "table '{}': default_values must be a mapping",
                name
            )));
        }
    };

    let rows = match table.get("rows") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Sequence(rows)) => rows
            .iter()
            .map(|row| match row {
                Value::Mapping(row) => Ok(row.clone()),
                _ => Err(invalid(&format!("table '{}': rows must be mappings", name))),
            })
            .collect::<Result<_>>()?,
        Some(_) => return Err(invalid(&format!("table '{}': rows must be a list", name))),
    };

    Ok(TableData {
        name,
        depends,
        default_values,
        rows,
    })
}

fn parse_metadata(value: Value) -> Result<BTreeMap<String, Value>> {
    let value = match value {
        Value::Tagged(tagged) if tagged.tag == METADATA_TAG => tagged.value,
        other => other,
    };

    match value {
        Value::Null => Ok(BTreeMap::new()),
        Value::Mapping(entries) => entries
            .into_iter()
            .map(|(key, value)| Ok::<_, FieldcopyError>((key_to_string(&key, "metadata key")?, value)))
            .collect(),
        _ => Err(invalid(&format!("{} must be a mapping", METADATA_KEY))),
    }
}

fn key_to_string(key: &Value, what: &str) -> Result<String> {
    key.as_str()
        .map(String::from)
        .ok_or_else(|| invalid(&format!("{} must be a string, got {:?}", what, key)))
}

fn invalid(message: &str) -> FieldcopyError {
    FieldcopyError::UserError(format!("invalid fixture: {}", message))
}
