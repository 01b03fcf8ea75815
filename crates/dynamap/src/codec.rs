//! Attribute value conversion functions.
//!
//! Pure functions converting between DynamoDB `AttributeValue` maps and the
//! runtime [`Value`] union. Encoding dispatches on the runtime variant of
//! the value; decoding dispatches on the declared [`FieldType`] of the
//! destination field. These are testable in isolation without DynamoDB
//! access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use dynamap_core::datetime::{format_timestamp, parse_timestamp};
use dynamap_core::schema::{FieldRole, FieldType, RecordSchema};
use dynamap_core::{Document, Error, Record, Result, Value};

/// A wire item: attribute name to tagged wire value.
pub type Item = HashMap<String, AttributeValue>;

// ============================================================================
// Encoding
// ============================================================================

/// Encodes a runtime value as a tagged wire value.
///
/// Returns `None` for [`Value::Null`]; an absent attribute is the wire form
/// of an unset field. Numbers use their decimal string form, timestamps the
/// fixed ISO-8601 pattern. List elements and map entries are encoded by
/// their own runtime variant, with null entries dropped.
pub fn encode_value(value: &Value) -> Option<AttributeValue> {
    match value {
        Value::Null => None,
        Value::I32(v) => Some(AttributeValue::N(v.to_string())),
        Value::I64(v) => Some(AttributeValue::N(v.to_string())),
        Value::F32(v) => Some(AttributeValue::N(v.to_string())),
        Value::F64(v) => Some(AttributeValue::N(v.to_string())),
        Value::Bool(v) => Some(AttributeValue::Bool(*v)),
        Value::String(v) => Some(AttributeValue::S(v.clone())),
        Value::Timestamp(ts) => Some(AttributeValue::S(format_timestamp(ts))),
        Value::List(items) => Some(AttributeValue::L(
            items.iter().filter_map(encode_value).collect(),
        )),
        Value::Map(doc) => Some(AttributeValue::M(encode_document(doc))),
    }
}

/// Encodes a document as a wire map, dropping null-valued entries.
pub fn encode_document(doc: &Document) -> Item {
    doc.iter()
        .filter_map(|(name, value)| encode_value(value).map(|av| (name.clone(), av)))
        .collect()
}

// ============================================================================
// Decoding
// ============================================================================

/// Decodes a wire value into the declared field type.
///
/// A wire value of a different tag than the declared type reads as `None`
/// and the field stays at its default; a malformed number or timestamp
/// string is a mapping error naming the offending field.
pub fn decode_value(
    ty: &FieldType,
    av: &AttributeValue,
    record: &'static str,
    field: &str,
) -> Result<Option<Value>> {
    match ty {
        FieldType::I32 => decode_number(av, record, field, |s| {
            s.parse().map(Value::I32).map_err(|e| e.to_string())
        }),
        FieldType::I64 => decode_number(av, record, field, |s| {
            s.parse().map(Value::I64).map_err(|e| e.to_string())
        }),
        FieldType::F32 => decode_number(av, record, field, |s| {
            s.parse().map(Value::F32).map_err(|e| e.to_string())
        }),
        FieldType::F64 => decode_number(av, record, field, |s| {
            s.parse().map(Value::F64).map_err(|e| e.to_string())
        }),
        FieldType::Bool => Ok(av.as_bool().ok().map(|b| Value::Bool(*b))),
        FieldType::String => Ok(av.as_s().ok().map(|s| Value::String(s.clone()))),
        FieldType::Timestamp => {
            let Ok(s) = av.as_s() else { return Ok(None) };
            if s.is_empty() {
                return Ok(None);
            }
            match parse_timestamp(s) {
                Ok(ts) => Ok(Some(Value::Timestamp(ts))),
                Err(e) => Err(Error::mapping(
                    record,
                    field,
                    format!("invalid timestamp {s:?}: {e}"),
                )),
            }
        }
        FieldType::List(elem) => {
            let Ok(items) = av.as_l() else { return Ok(None) };
            let mut list = Vec::with_capacity(items.len());
            for item in items {
                if let Some(value) = decode_value(elem, item, record, field)? {
                    list.push(value);
                }
            }
            Ok(Some(Value::List(list)))
        }
        FieldType::Map(elem) => {
            let Ok(entries) = av.as_m() else { return Ok(None) };
            let mut doc = Document::new();
            for (name, entry) in entries {
                if let Some(value) = decode_value(elem, entry, record, field)? {
                    doc.insert(name.clone(), value);
                }
            }
            Ok(Some(Value::Map(doc)))
        }
        FieldType::Record(schema) => {
            let Ok(entries) = av.as_m() else { return Ok(None) };
            let doc = decode_document(schema(), entries)?;
            Ok(Some(Value::Map(doc)))
        }
    }
}

fn decode_number<F>(
    av: &AttributeValue,
    record: &'static str,
    field: &str,
    parse: F,
) -> Result<Option<Value>>
where
    F: FnOnce(&str) -> std::result::Result<Value, String>,
{
    match av.as_n() {
        Ok(s) => parse(s)
            .map(Some)
            .map_err(|e| Error::mapping(record, field, format!("invalid number {s:?}: {e}"))),
        Err(_) => Ok(None),
    }
}

/// Decodes a wire item through a schema's descriptor table into a document
/// keyed by wire name.
///
/// Absent attributes are skipped, not errors; ignored fields are excluded.
pub fn decode_document(schema: &RecordSchema, item: &Item) -> Result<Document> {
    let mut doc = Document::new();
    for field in schema.fields {
        if matches!(field.role, FieldRole::Ignored) {
            continue;
        }
        if let Some(av) = item.get(field.wire_name) {
            if let Some(value) = decode_value(&field.ty, av, schema.record, field.name)? {
                doc.insert(field.wire_name.to_string(), value);
            }
        }
    }
    Ok(doc)
}

/// Decodes a wire item into a new record instance.
pub fn decode_item<R: Record>(item: &Item) -> Result<R> {
    let doc = decode_document(R::schema(), item)?;
    R::from_document(&doc)
}
