//! Core mapping types for the dynamap project.
//!
//! Backend-neutral building blocks shared by every store-facing crate: the
//! runtime [`Value`] union, declarative record schemas and the [`Record`]
//! trait, surrogate key generation, the fixed wire timestamp formats, and
//! the error type.

pub mod datetime;
pub mod error;
pub mod keygen;
pub mod schema;
pub mod value;

pub use error::{Error, Result};
pub use schema::{
    to_document, FieldDescriptor, FieldRole, FieldType, KeyStrategy, Record, RecordSchema,
};
pub use value::{Document, Value};
