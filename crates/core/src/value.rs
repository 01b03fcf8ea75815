//! Runtime values exchanged with the store.
//!
//! [`Value`] mirrors the five wire kinds (number, string, boolean, list,
//! string-keyed map), keeping the numeric widths and timestamps distinct so
//! encoding can preserve the precision of the source field. Nested records
//! reduce to [`Value::Map`] through [`crate::schema::to_document`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::schema::Record;

/// A string-keyed map of runtime values; the shape nested documents take.
pub type Document = HashMap<String, Value>;

/// Runtime value of a single record field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Unset; never encoded onto the wire.
    Null,
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Bool(bool),
    String(String),
    Timestamp(DateTime<Utc>),
    List(Vec<Value>),
    Map(Document),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Emptiness rule used for key fields: unset, or a blank string.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::I32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::F32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Document> {
        match self {
            Value::Map(doc) => Some(doc),
            _ => None,
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::I32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::I64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::F32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Document> for Value {
    fn from(v: Document) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

// ============================================================================
// Document accessors
// ============================================================================
//
// Helpers for `Record::from_document` implementations. An absent or
// differently-typed entry reads as `None`; the caller decides the default.

pub fn get_str<'a>(doc: &'a Document, name: &str) -> Option<&'a str> {
    doc.get(name).and_then(Value::as_str)
}

pub fn get_string(doc: &Document, name: &str) -> Option<String> {
    get_str(doc, name).map(str::to_string)
}

pub fn get_i32(doc: &Document, name: &str) -> Option<i32> {
    doc.get(name).and_then(Value::as_i32)
}

pub fn get_i64(doc: &Document, name: &str) -> Option<i64> {
    doc.get(name).and_then(Value::as_i64)
}

pub fn get_f32(doc: &Document, name: &str) -> Option<f32> {
    doc.get(name).and_then(Value::as_f32)
}

pub fn get_f64(doc: &Document, name: &str) -> Option<f64> {
    doc.get(name).and_then(Value::as_f64)
}

pub fn get_bool(doc: &Document, name: &str) -> Option<bool> {
    doc.get(name).and_then(Value::as_bool)
}

pub fn get_timestamp(doc: &Document, name: &str) -> Option<DateTime<Utc>> {
    doc.get(name).and_then(Value::as_timestamp)
}

pub fn get_list<'a>(doc: &'a Document, name: &str) -> Option<&'a [Value]> {
    doc.get(name).and_then(Value::as_list)
}

pub fn get_map<'a>(doc: &'a Document, name: &str) -> Option<&'a Document> {
    doc.get(name).and_then(Value::as_map)
}

/// Reads a nested record out of the named map entry.
pub fn get_record<R: Record>(doc: &Document, name: &str) -> Result<Option<R>> {
    match doc.get(name) {
        Some(Value::Map(inner)) => R::from_document(inner).map(Some),
        _ => Ok(None),
    }
}
