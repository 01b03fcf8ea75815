//! Declarative record schemas.
//!
//! Each record type registers a static table of [`FieldDescriptor`]s ahead
//! of time; the resolver and codec walk these descriptors instead of
//! inspecting the record at runtime. List and map element types are carried
//! in the descriptor, fixed at schema-build time.

use crate::error::{Error, Result};
use crate::value::{Document, Value};

/// How a key value is synthesized when the field is empty at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStrategy {
    /// Never generate; the caller must supply the value.
    None,
    /// Random UUID, rendered as a string.
    Uuid,
    /// Current UTC month, `yyyyMM`.
    MonthStamp,
    /// Current UTC day, `yyyyMMdd`.
    DayStamp,
    /// 64-bit time-ordered id; approximately increasing, not unique.
    TimeOrderedId,
    /// The same id, stringified.
    TimeOrderedIdString,
}

/// Declared type of a record field.
#[derive(Debug, Clone, Copy)]
pub enum FieldType {
    I32,
    I64,
    F32,
    F64,
    Bool,
    String,
    Timestamp,
    /// List with the element type fixed at schema-build time.
    List(&'static FieldType),
    /// String-keyed map with the value type fixed at schema-build time.
    Map(&'static FieldType),
    /// Nested document, decoded through the referenced schema.
    Record(fn() -> &'static RecordSchema),
}

/// Role a field plays in the record's table layout.
#[derive(Debug, Clone, Copy)]
pub enum FieldRole {
    /// Ordinary attribute.
    Attribute { updateable: bool },
    /// The table's partition key.
    HashKey {
        strategy: KeyStrategy,
        prefix: Option<&'static str>,
    },
    /// The table's optional sort key.
    RangeKey {
        strategy: KeyStrategy,
        prefix: Option<&'static str>,
        required: bool,
    },
    /// Excluded from every payload.
    Ignored,
}

/// Immutable description of one record field, shared read-only across all
/// instances of the record type.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Field name on the source record.
    pub name: &'static str,
    /// Attribute name in the store.
    pub wire_name: &'static str,
    pub ty: FieldType,
    pub role: FieldRole,
}

/// Ahead-of-time-built schema for one record type.
#[derive(Debug)]
pub struct RecordSchema {
    /// Record type name, used in diagnostics.
    pub record: &'static str,
    /// Table the records live in; `None` for nested document types.
    pub table: Option<&'static str>,
    /// Field descriptors in declaration order.
    pub fields: &'static [FieldDescriptor],
}

impl RecordSchema {
    /// Checks the structural invariants: a table schema declares exactly one
    /// hash key, at most one range key, and unique wire names.
    pub fn validate(&self) -> Result<()> {
        let mut hash_keys = 0usize;
        let mut range_keys = 0usize;
        for field in self.fields {
            match field.role {
                FieldRole::HashKey { .. } => hash_keys += 1,
                FieldRole::RangeKey { .. } => range_keys += 1,
                _ => {}
            }
        }
        if self.table.is_some() && hash_keys != 1 {
            return Err(Error::schema(
                self.record,
                format!("expected exactly one hash key, found {hash_keys}"),
            ));
        }
        if range_keys > 1 {
            return Err(Error::schema(self.record, "more than one range key declared"));
        }
        for (i, field) in self.fields.iter().enumerate() {
            if matches!(field.role, FieldRole::Ignored) {
                continue;
            }
            let duplicate = self.fields[..i].iter().any(|other| {
                !matches!(other.role, FieldRole::Ignored) && other.wire_name == field.wire_name
            });
            if duplicate {
                return Err(Error::schema(
                    self.record,
                    format!("duplicate wire name {:?}", field.wire_name),
                ));
            }
        }
        Ok(())
    }
}

/// A record type mappable to a store item.
///
/// Implementations are the ahead-of-time registration for a type: the static
/// schema plus field-level access by name. `from_document` builds an
/// instance from an already-decoded document keyed by wire name; absent
/// entries leave the corresponding field at its default.
pub trait Record: Sized + Send {
    /// The type's static schema.
    fn schema() -> &'static RecordSchema;

    /// Current value of the named field; [`Value::Null`] when unset.
    fn get(&self, field: &str) -> Value;

    /// Writes a generated or decoded value onto the named field.
    fn set(&mut self, field: &str, value: Value) -> Result<()>;

    /// Builds an instance from a document keyed by wire name.
    fn from_document(doc: &Document) -> Result<Self>;
}

/// Reduces a record to a string-keyed document in wire-name space.
///
/// Walks the schema in declaration order, skipping ignored fields and unset
/// values. Nested records pass through this same transform, which is what
/// lets documents nest to arbitrary depth without per-type registration.
pub fn to_document<R: Record>(record: &R) -> Document {
    let mut doc = Document::new();
    for field in R::schema().fields {
        if matches!(field.role, FieldRole::Ignored) {
            continue;
        }
        let value = record.get(field.name);
        if !value.is_null() {
            doc.insert(field.wire_name.to_string(), value);
        }
    }
    doc
}
