//! The `!copyfile` fixture plugin.
//!
//! A fixture field tagged `!copyfile` describes a file that should be copied
//! when its row is resolved:
//!
//! ```yaml
//! tagfilename: !copyfile
//!   value: "{value:tag_id}.png"
//!   source: "images/tags/javascript.png"
//!   destination: "tenant/{valueref:tenant_id:tenants:tenant_id:name}/images/tags/{value:tag_id}.png"
//! ```
//!
//! Every string is a field template whose fields are filter expressions
//! resolved by the host's [`ValueResolveContext`]. The plugin participates in
//! resolution in two places:
//!
//! 1. [`CopyFile::get_value`] while the row's fields are resolved, deciding
//!    whether the tagged field gets a value at all.
//! 2. [`CopyFile::row_resolved`] once the row is complete, rendering the
//!    source and destination names and copying the file.
//!
//! Each step goes through a replaceable callback, defaulting to
//! [`default_get_value`], [`default_get_paths`] and [`default_copy_file`].

mod copy;
mod resolve;


pub use copy::{default_copy_file, rooted};
pub use resolve::{
    ValueResolveContext, default_get_paths, default_get_value, replace_fields_with_filter,
};

use crate::error::{FieldcopyError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// YAML tag that marks a copyfile field.
pub const TAG: &str = "copyfile";

/// Contents of a `!copyfile` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileData {
    #[serde(default)]
    pub id: Option<String>,

    /// Template for the field value. When unset the field is not added to
    /// the row, only the file is copied.
    #[serde(default)]
    pub value: Option<String>,

    /// Template for the source file name, relative to the source root.
    pub source: String,

    /// Template for the destination file name, relative to the destination root.
    pub destination: String,
}

/// Renders the source and destination file names for one field.
pub type GetPathsCallback = Box<
    dyn Fn(&dyn ValueResolveContext, &str, &FileData) -> Result<(String, String)> + Send + Sync,
>;

/// Produces the field value, or `None` to leave the field out of the row.
pub type GetValueCallback =
    Box<dyn Fn(&dyn ValueResolveContext, &FileData) -> Result<Option<String>> + Send + Sync>;

/// Copies `source_path/source_name` to `destination_path/destination_name`.
///
/// Names are rendered templates and may look absolute; see [`rooted`].
pub type CopyFileCallback = Box<dyn Fn(&Path, &str, &Path, &str) -> Result<()> + Send + Sync>;

/// A file copied while resolving a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopiedFile {
    pub field: String,
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// The copyfile plugin.
pub struct CopyFile {
    source_path: PathBuf,
    destination_path: PathBuf,
    get_paths: GetPathsCallback,
    get_value: GetValueCallback,
    copy_file: CopyFileCallback,
}

impl Default for CopyFile {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CopyFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyFile")
            .field("source_path", &self.source_path)
            .field("destination_path", &self.destination_path)
            .finish_non_exhaustive()
    }
}

impl CopyFile {
    /// A plugin with empty roots and the default callbacks.
    pub fn new() -> Self {
        Self {
            source_path: PathBuf::new(),
            destination_path: PathBuf::new(),
            get_paths: Box::new(default_get_paths),
            get_value: Box::new(default_get_value),
            copy_file: Box::new(default_copy_file),
        }
    }

    /// Set the root of all source file names.
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = path.into();
        self
    }

    /// Set the root of all destination file names.
    pub fn with_destination_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.destination_path = path.into();
        self
    }

    pub fn with_get_paths<F>(mut self, callback: F) -> Self
    where
        F: Fn(&dyn ValueResolveContext, &str, &FileData) -> Result<(String, String)>
            + Send
            + Sync
            + 'static,
    {
        self.get_paths = Box::new(callback);
        self
    }

    pub fn with_get_value<F>(mut self, callback: F) -> Self
    where
        F: Fn(&dyn ValueResolveContext, &FileData) -> Result<Option<String>> + Send + Sync + 'static,
    {
        self.get_value = Box::new(callback);
        self
    }

    pub fn with_copy_file<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Path, &str, &Path, &str) -> Result<()> + Send + Sync + 'static,
    {
        self.copy_file = Box::new(callback);
        self
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn destination_path(&self) -> &Path {
        &self.destination_path
    }

    /// Recognize a `!copyfile` value.
    ///
    /// Returns `Ok(None)` for anything not tagged `!copyfile`. Tagged values
    /// are parsed strictly: unknown keys and missing `source`/`destination`
    /// are errors.
    pub fn parse_value(value: &serde_yaml::Value) -> Result<Option<FileData>> {
        let serde_yaml::Value::Tagged(tagged) = value else {
            return Ok(None);
        };
        if tagged.tag != TAG {
            return Ok(None);
        }

        let file_data = serde_yaml::from_value(tagged.value.clone()).map_err(|e| {
            FieldcopyError::UserError(format!("invalid !{} value: {}", TAG, e))
        })?;
        Ok(Some(file_data))
    }

    /// Value of a copyfile field, or `None` when the field should not be set.
    pub fn get_value(
        &self,
        ctx: &dyn ValueResolveContext,
        file_data: &FileData,
    ) -> Result<Option<String>> {
        (self.get_value)(ctx, file_data)
    }

    /// Copy every pending file of a fully resolved row.
    ///
    /// `files` maps field name to the copyfile data recorded for that field.
    /// Files are processed in field-name order and the first failure aborts
    /// the row.
    pub fn row_resolved(
        &self,
        ctx: &dyn ValueResolveContext,
        files: &BTreeMap<String, FileData>,
    ) -> Result<Vec<CopiedFile>> {
        let mut copied = Vec::with_capacity(files.len());

        for (field, file_data) in files {
            let (source, destination) = (self.get_paths)(ctx, field, file_data)?;
            tracing::debug!(field = %field, %source, %destination, "copying file");

            (self.copy_file)(
                &self.source_path,
                &source,
                &self.destination_path,
                &destination,
            )?;

            copied.push(CopiedFile {
                field: field.clone(),
                source: rooted(&self.source_path, &source),
                destination: rooted(&self.destination_path, &destination),
            });
        }

        Ok(copied)
    }
}
