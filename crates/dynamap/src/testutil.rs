//! Record fixtures shared by the unit tests.
//!
//! These are hand-registered the way application code registers its record
//! types: a static descriptor table plus a `Record` impl per type.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use dynamap_core::schema::{FieldDescriptor, FieldRole, FieldType, KeyStrategy};
use dynamap_core::{to_document, value, Document, Error, Record, RecordSchema, Result, Value};

// ============================================================================
// Customer — nested document type, not bound to a table
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Customer {
    pub name: String,
    pub email: Option<String>,
    pub loyalty_points: Option<i64>,
}

static CUSTOMER_SCHEMA: RecordSchema = RecordSchema {
    record: "Customer",
    table: None,
    fields: &[
        FieldDescriptor {
            name: "name",
            wire_name: "name",
            ty: FieldType::String,
            role: FieldRole::Attribute { updateable: true },
        },
        FieldDescriptor {
            name: "email",
            wire_name: "email",
            ty: FieldType::String,
            role: FieldRole::Attribute { updateable: true },
        },
        FieldDescriptor {
            name: "loyalty_points",
            wire_name: "loyaltyPoints",
            ty: FieldType::I64,
            role: FieldRole::Attribute { updateable: true },
        },
    ],
};

fn customer_schema() -> &'static RecordSchema {
    &CUSTOMER_SCHEMA
}

impl Record for Customer {
    fn schema() -> &'static RecordSchema {
        &CUSTOMER_SCHEMA
    }

    fn get(&self, field: &str) -> Value {
        match field {
            "name" => Value::from(self.name.clone()),
            "email" => Value::from(self.email.clone()),
            "loyalty_points" => Value::from(self.loyalty_points),
            _ => Value::Null,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<()> {
        match field {
            "name" => self.name = value.as_str().unwrap_or_default().to_string(),
            "email" => self.email = value.as_str().map(str::to_string),
            "loyalty_points" => self.loyalty_points = value.as_i64(),
            _ => return Err(Error::schema("Customer", format!("unknown field {field:?}"))),
        }
        Ok(())
    }

    fn from_document(doc: &Document) -> Result<Self> {
        Ok(Customer {
            name: value::get_string(doc, "name").unwrap_or_default(),
            email: value::get_string(doc, "email"),
            loyalty_points: value::get_i64(doc, "loyaltyPoints"),
        })
    }
}

// ============================================================================
// Order — one field of every kind, generated string hash key
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Order {
    pub id: String,
    pub sort: String,
    pub name: String,
    pub secret: String,
    pub quantity: Option<i32>,
    pub total: Option<f64>,
    pub active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub metadata: HashMap<String, String>,
    pub customer: Option<Customer>,
    pub revision: Option<i64>,
}

static ORDER_SCHEMA: RecordSchema = RecordSchema {
    record: "Order",
    table: Some("orders"),
    fields: &[
        FieldDescriptor {
            name: "id",
            wire_name: "id",
            ty: FieldType::String,
            role: FieldRole::HashKey {
                strategy: KeyStrategy::Uuid,
                prefix: None,
            },
        },
        FieldDescriptor {
            name: "sort",
            wire_name: "sort",
            ty: FieldType::String,
            role: FieldRole::RangeKey {
                strategy: KeyStrategy::None,
                prefix: None,
                required: false,
            },
        },
        FieldDescriptor {
            name: "name",
            wire_name: "name",
            ty: FieldType::String,
            role: FieldRole::Attribute { updateable: true },
        },
        FieldDescriptor {
            name: "secret",
            wire_name: "secret",
            ty: FieldType::String,
            role: FieldRole::Attribute { updateable: false },
        },
        FieldDescriptor {
            name: "quantity",
            wire_name: "qty",
            ty: FieldType::I32,
            role: FieldRole::Attribute { updateable: true },
        },
        FieldDescriptor {
            name: "total",
            wire_name: "total",
            ty: FieldType::F64,
            role: FieldRole::Attribute { updateable: true },
        },
        FieldDescriptor {
            name: "active",
            wire_name: "active",
            ty: FieldType::Bool,
            role: FieldRole::Attribute { updateable: true },
        },
        FieldDescriptor {
            name: "created_at",
            wire_name: "createdAt",
            ty: FieldType::Timestamp,
            role: FieldRole::Attribute { updateable: true },
        },
        FieldDescriptor {
            name: "tags",
            wire_name: "tags",
            ty: FieldType::List(&FieldType::String),
            role: FieldRole::Attribute { updateable: true },
        },
        FieldDescriptor {
            name: "metadata",
            wire_name: "metadata",
            ty: FieldType::Map(&FieldType::String),
            role: FieldRole::Attribute { updateable: true },
        },
        FieldDescriptor {
            name: "customer",
            wire_name: "customer",
            ty: FieldType::Record(customer_schema),
            role: FieldRole::Attribute { updateable: true },
        },
        FieldDescriptor {
            name: "revision",
            wire_name: "revision",
            ty: FieldType::I64,
            role: FieldRole::Ignored,
        },
    ],
};

impl Record for Order {
    fn schema() -> &'static RecordSchema {
        &ORDER_SCHEMA
    }

    fn get(&self, field: &str) -> Value {
        match field {
            "id" => Value::from(self.id.clone()),
            "sort" => Value::from(self.sort.clone()),
            "name" => Value::from(self.name.clone()),
            "secret" => Value::from(self.secret.clone()),
            "quantity" => Value::from(self.quantity),
            "total" => Value::from(self.total),
            "active" => Value::from(self.active),
            "created_at" => Value::from(self.created_at),
            "tags" => Value::List(self.tags.iter().map(|t| Value::from(t.clone())).collect()),
            "metadata" => Value::Map(
                self.metadata
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from(v.clone())))
                    .collect(),
            ),
            "customer" => match &self.customer {
                Some(customer) => Value::Map(to_document(customer)),
                None => Value::Null,
            },
            "revision" => Value::from(self.revision),
            _ => Value::Null,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<()> {
        match field {
            "id" => self.id = value.as_str().unwrap_or_default().to_string(),
            "sort" => self.sort = value.as_str().unwrap_or_default().to_string(),
            "name" => self.name = value.as_str().unwrap_or_default().to_string(),
            "secret" => self.secret = value.as_str().unwrap_or_default().to_string(),
            "quantity" => self.quantity = value.as_i32(),
            "total" => self.total = value.as_f64(),
            "active" => self.active = value.as_bool(),
            "created_at" => self.created_at = value.as_timestamp(),
            "tags" => {
                self.tags = value
                    .as_list()
                    .map(|items| {
                        items
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();
            }
            "metadata" => {
                self.metadata = value
                    .as_map()
                    .map(|doc| {
                        doc.iter()
                            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                            .collect()
                    })
                    .unwrap_or_default();
            }
            "customer" => {
                self.customer = match value.as_map() {
                    Some(doc) => Some(Customer::from_document(doc)?),
                    None => None,
                };
            }
            "revision" => self.revision = value.as_i64(),
            _ => return Err(Error::schema("Order", format!("unknown field {field:?}"))),
        }
        Ok(())
    }

    fn from_document(doc: &Document) -> Result<Self> {
        Ok(Order {
            id: value::get_string(doc, "id").unwrap_or_default(),
            sort: value::get_string(doc, "sort").unwrap_or_default(),
            name: value::get_string(doc, "name").unwrap_or_default(),
            secret: value::get_string(doc, "secret").unwrap_or_default(),
            quantity: value::get_i32(doc, "qty"),
            total: value::get_f64(doc, "total"),
            active: value::get_bool(doc, "active"),
            created_at: value::get_timestamp(doc, "createdAt"),
            tags: value::get_list(doc, "tags")
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            metadata: value::get_map(doc, "metadata")
                .map(|inner| {
                    inner
                        .iter()
                        .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                        .collect()
                })
                .unwrap_or_default(),
            customer: value::get_record(doc, "customer")?,
            revision: None,
        })
    }
}

// ============================================================================
// Event — stamped hash key, generated prefixed range key
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    pub month: String,
    pub id: String,
    pub payload: Option<String>,
}

static EVENT_SCHEMA: RecordSchema = RecordSchema {
    record: "Event",
    table: Some("events"),
    fields: &[
        FieldDescriptor {
            name: "month",
            wire_name: "month",
            ty: FieldType::String,
            role: FieldRole::HashKey {
                strategy: KeyStrategy::MonthStamp,
                prefix: None,
            },
        },
        FieldDescriptor {
            name: "id",
            wire_name: "id",
            ty: FieldType::String,
            role: FieldRole::RangeKey {
                strategy: KeyStrategy::TimeOrderedIdString,
                prefix: Some("EVT#"),
                required: true,
            },
        },
        FieldDescriptor {
            name: "payload",
            wire_name: "payload",
            ty: FieldType::String,
            role: FieldRole::Attribute { updateable: true },
        },
    ],
};

impl Record for Event {
    fn schema() -> &'static RecordSchema {
        &EVENT_SCHEMA
    }

    fn get(&self, field: &str) -> Value {
        match field {
            "month" => Value::from(self.month.clone()),
            "id" => Value::from(self.id.clone()),
            "payload" => Value::from(self.payload.clone()),
            _ => Value::Null,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<()> {
        match field {
            "month" => self.month = value.as_str().unwrap_or_default().to_string(),
            "id" => self.id = value.as_str().unwrap_or_default().to_string(),
            "payload" => self.payload = value.as_str().map(str::to_string),
            _ => return Err(Error::schema("Event", format!("unknown field {field:?}"))),
        }
        Ok(())
    }

    fn from_document(doc: &Document) -> Result<Self> {
        Ok(Event {
            month: value::get_string(doc, "month").unwrap_or_default(),
            id: value::get_string(doc, "id").unwrap_or_default(),
            payload: value::get_string(doc, "payload"),
        })
    }
}

// ============================================================================
// Ledger — required range key with no generation strategy
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    pub day: String,
    pub entry: String,
    pub amount: Option<f64>,
}

static LEDGER_SCHEMA: RecordSchema = RecordSchema {
    record: "Ledger",
    table: Some("ledger"),
    fields: &[
        FieldDescriptor {
            name: "day",
            wire_name: "day",
            ty: FieldType::String,
            role: FieldRole::HashKey {
                strategy: KeyStrategy::DayStamp,
                prefix: None,
            },
        },
        FieldDescriptor {
            name: "entry",
            wire_name: "entry",
            ty: FieldType::String,
            role: FieldRole::RangeKey {
                strategy: KeyStrategy::None,
                prefix: None,
                required: true,
            },
        },
        FieldDescriptor {
            name: "amount",
            wire_name: "amount",
            ty: FieldType::F64,
            role: FieldRole::Attribute { updateable: true },
        },
    ],
};

impl Record for Ledger {
    fn schema() -> &'static RecordSchema {
        &LEDGER_SCHEMA
    }

    fn get(&self, field: &str) -> Value {
        match field {
            "day" => Value::from(self.day.clone()),
            "entry" => Value::from(self.entry.clone()),
            "amount" => Value::from(self.amount),
            _ => Value::Null,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<()> {
        match field {
            "day" => self.day = value.as_str().unwrap_or_default().to_string(),
            "entry" => self.entry = value.as_str().unwrap_or_default().to_string(),
            "amount" => self.amount = value.as_f64(),
            _ => return Err(Error::schema("Ledger", format!("unknown field {field:?}"))),
        }
        Ok(())
    }

    fn from_document(doc: &Document) -> Result<Self> {
        Ok(Ledger {
            day: value::get_string(doc, "day").unwrap_or_default(),
            entry: value::get_string(doc, "entry").unwrap_or_default(),
            amount: value::get_f64(doc, "amount"),
        })
    }
}

// ============================================================================
// Counter — numeric generated hash key
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Counter {
    pub id: Option<i64>,
    pub count: Option<i64>,
}

static COUNTER_SCHEMA: RecordSchema = RecordSchema {
    record: "Counter",
    table: Some("counters"),
    fields: &[
        FieldDescriptor {
            name: "id",
            wire_name: "id",
            ty: FieldType::I64,
            role: FieldRole::HashKey {
                strategy: KeyStrategy::TimeOrderedId,
                prefix: None,
            },
        },
        FieldDescriptor {
            name: "count",
            wire_name: "count",
            ty: FieldType::I64,
            role: FieldRole::Attribute { updateable: true },
        },
    ],
};

impl Record for Counter {
    fn schema() -> &'static RecordSchema {
        &COUNTER_SCHEMA
    }

    fn get(&self, field: &str) -> Value {
        match field {
            "id" => Value::from(self.id),
            "count" => Value::from(self.count),
            _ => Value::Null,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<()> {
        match field {
            "id" => self.id = value.as_i64(),
            "count" => self.count = value.as_i64(),
            _ => return Err(Error::schema("Counter", format!("unknown field {field:?}"))),
        }
        Ok(())
    }

    fn from_document(doc: &Document) -> Result<Self> {
        Ok(Counter {
            id: value::get_i64(doc, "id"),
            count: value::get_i64(doc, "count"),
        })
    }
}
