//! Schema resolution: one record instance to per-call table metadata.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::{AttributeAction, AttributeValue, AttributeValueUpdate};

use dynamap_core::keygen;
use dynamap_core::schema::{FieldDescriptor, FieldRole, KeyStrategy};
use dynamap_core::{Error, Record, Result, Value};

use crate::codec::encode_value;

/// What the caller intends to do with the resolved metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    Read,
    Write,
    Update,
}

/// A resolved key attribute: wire name plus encoded value.
#[derive(Debug, Clone)]
pub struct KeyAttribute {
    pub name: &'static str,
    pub value: AttributeValue,
}

/// Per-call resolution result for one record instance.
///
/// Constructed fresh on every call and discarded after the store call it
/// serves; nothing here is cached.
#[derive(Debug)]
pub struct TableMeta {
    pub table_name: &'static str,
    pub hash_key: KeyAttribute,
    pub range_key: Option<KeyAttribute>,
    /// Full attribute payload, keys included (read and write mode).
    pub attributes: HashMap<String, AttributeValue>,
    /// Partial-update payload (update mode only).
    pub updates: HashMap<String, AttributeValueUpdate>,
}

impl TableMeta {
    /// Primary-key map for item-level store calls.
    pub fn key(&self) -> HashMap<String, AttributeValue> {
        let mut key = HashMap::new();
        key.insert(self.hash_key.name.to_string(), self.hash_key.value.clone());
        if let Some(range) = &self.range_key {
            key.insert(range.name.to_string(), range.value.clone());
        }
        key
    }
}

/// Resolves a record instance into table metadata for the given mode.
///
/// Walks the record's field descriptors in declaration order, encoding the
/// current field values. In write mode, empty key fields with a generation
/// strategy are assigned a surrogate value which is written back onto the
/// record before encoding, so the caller observes the generated key. The
/// record is never mutated in any other mode.
pub fn resolve<R: Record>(record: &mut R, mode: ResolveMode) -> Result<TableMeta> {
    let schema = R::schema();
    schema.validate()?;
    let table_name = schema
        .table
        .ok_or_else(|| Error::schema(schema.record, "not bound to a table"))?;

    let mut hash_key = None;
    let mut range_key = None;
    let mut attributes = HashMap::new();
    let mut updates = HashMap::new();

    for field in schema.fields {
        match field.role {
            FieldRole::Ignored => {}
            FieldRole::HashKey { strategy, prefix } => {
                let value = key_value(record, field, strategy, prefix, mode)?;
                if value.is_empty() {
                    return Err(Error::MissingKey {
                        record: schema.record,
                        field: field.name,
                    });
                }
                let av = encode_value(&value).ok_or(Error::MissingKey {
                    record: schema.record,
                    field: field.name,
                })?;
                attributes.insert(field.wire_name.to_string(), av.clone());
                hash_key = Some(KeyAttribute {
                    name: field.wire_name,
                    value: av,
                });
            }
            FieldRole::RangeKey {
                strategy,
                prefix,
                required,
            } => {
                let value = key_value(record, field, strategy, prefix, mode)?;
                if value.is_empty() {
                    if required {
                        return Err(Error::MissingKey {
                            record: schema.record,
                            field: field.name,
                        });
                    }
                    // Not required: the key is simply absent from the
                    // metadata and lookups go by hash key alone.
                } else if let Some(av) = encode_value(&value) {
                    attributes.insert(field.wire_name.to_string(), av.clone());
                    range_key = Some(KeyAttribute {
                        name: field.wire_name,
                        value: av,
                    });
                }
            }
            FieldRole::Attribute { updateable } => {
                let encoded = encode_value(&record.get(field.name));
                if matches!(mode, ResolveMode::Read | ResolveMode::Write) {
                    // An absent value is omitted; a full put replaces the
                    // stored item, which clears the attribute.
                    if let Some(av) = encoded {
                        attributes.insert(field.wire_name.to_string(), av);
                    }
                } else if mode == ResolveMode::Update {
                    if updateable {
                        let update = match encoded {
                            Some(av) => AttributeValueUpdate::builder()
                                .value(av)
                                .action(AttributeAction::Put)
                                .build(),
                            None => AttributeValueUpdate::builder()
                                .action(AttributeAction::Delete)
                                .build(),
                        };
                        updates.insert(field.wire_name.to_string(), update);
                    }
                } else {
                    // Unreachable under the three defined modes; guards
                    // modes added later.
                    return Err(Error::schema(
                        schema.record,
                        format!("unsupported resolve mode {mode:?}"),
                    ));
                }
            }
        }
    }

    let hash_key = hash_key.ok_or_else(|| Error::schema(schema.record, "no hash key declared"))?;

    Ok(TableMeta {
        table_name,
        hash_key,
        range_key,
        attributes,
        updates,
    })
}

/// Reads a key field, generating and writing back a surrogate value when the
/// field is empty in write mode.
fn key_value<R: Record>(
    record: &mut R,
    field: &FieldDescriptor,
    strategy: KeyStrategy,
    prefix: Option<&'static str>,
    mode: ResolveMode,
) -> Result<Value> {
    let current = record.get(field.name);
    if mode == ResolveMode::Write && current.is_empty() {
        if let Some(generated) = keygen::generate(strategy) {
            // The prefix applies only to freshly generated values; a
            // caller-supplied key is used verbatim.
            let value = apply_prefix(prefix, generated);
            record.set(field.name, value.clone())?;
            return Ok(value);
        }
    }
    Ok(current)
}

fn apply_prefix(prefix: Option<&str>, generated: Value) -> Value {
    match prefix {
        None | Some("") => generated,
        Some(p) => match generated {
            Value::String(s) => Value::String(format!("{p}{s}")),
            Value::I64(n) => Value::String(format!("{p}{n}")),
            other => other,
        },
    }
}
