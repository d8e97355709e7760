//! fieldcopy: curly-brace field templates and a fixture file-copy plugin.
//!
//! The core is [`template`]: a single-pass scanner that finds `{name}`
//! fields in a string and a renderer that substitutes them with values.
//! [`copyfile`] builds on it to render source and destination file names
//! from fixture rows, and [`fixture`] is a small host that resolves YAML
//! fixtures and drives the plugin.

pub mod config;
pub mod copyfile;
pub mod error;
pub mod exit_codes;
pub mod fixture;
pub mod fs;
pub mod template;

pub use template::{Template, TemplateError, replace};
