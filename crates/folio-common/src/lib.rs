//! folio-common — Shared entities, errors, validation, and field parsing
//! used across all folio crates.

pub mod error;
pub mod entities;
pub mod fields;
pub mod validate;

pub use error::{ApiFailure, FolioError, Result};
pub use entities::Entity;
