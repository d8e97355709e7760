//! Config struct definition and default implementation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for copy runs.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory that `!copyfile` source names are relative to.
    #[serde(default = "default_root")]
    pub source_path: PathBuf,

    /// Root directory that `!copyfile` destination names are relative to.
    #[serde(default = "default_root")]
    pub destination_path: PathBuf,

    /// Report the copies that would happen without touching any file.
    #[serde(default)]
    pub dry_run: bool,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_path: default_root(),
            destination_path: default_root(),
            dry_run: false,
        }
    }
}
