//! Typed record mapping and CRUD operations over DynamoDB.
//!
//! Records implement [`Record`] by registering a static field descriptor
//! table; this crate turns those descriptors into item payloads, primary
//! keys and store calls:
//!
//! - [`codec`] converts runtime values to and from `AttributeValue` trees.
//! - [`resolve`](resolve()) walks a record's descriptors into a per-call
//!   [`TableMeta`], generating surrogate keys in write mode.
//! - [`batch`] partitions batch requests into store-legal chunk sizes.
//! - [`DynamoRepository`] composes the above over an SDK client.

pub mod batch;
pub mod codec;
pub mod config;
mod error;
pub mod repository;
mod resolver;

pub use config::StoreConfig;
pub use repository::DynamoRepository;
pub use resolver::{resolve, KeyAttribute, ResolveMode, TableMeta};

pub use dynamap_core::{
    to_document, Document, Error, FieldDescriptor, FieldRole, FieldType, KeyStrategy, Record,
    RecordSchema, Result, Value,
};

#[cfg(test)]
mod testutil;
