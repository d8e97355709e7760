//! Configuration for the fieldcopy CLI.
//!
//! Settings live in an optional YAML file passed with `--config`. Parsing is
//! forward-compatible (unknown fields are ignored) and every field has a
//! default, so an empty file is a valid config.

mod model;
mod operations;


pub use model::Config;
