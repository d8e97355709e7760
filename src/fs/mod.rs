//! Filesystem utilities for fieldcopy.

pub mod atomic;

pub use atomic::{atomic_copy, atomic_write};
