//! Configuration utility types.
//!
//! | Module   | Purpose                                         |
//! |----------|-------------------------------------------------|
//! | `error`  | `ConfigError`, `ValidationError`, the report     |
//! | `field`  | Dotted field paths                               |

mod error;
mod field;

pub use error::{ConfigDiagnostic, ConfigError, ValidationError, ValidationReport};
pub use field::FieldPath;
