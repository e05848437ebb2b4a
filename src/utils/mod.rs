//! Shared helpers.
//!
//! - [`path`]: Path normalization and ancestry (`normalize_path`, `is_same_or_ancestor`)

pub mod path;

pub use path::{expand_tilde, is_same_or_ancestor, normalize_path};
