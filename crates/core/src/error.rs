use thiserror::Error;

/// Errors that can occur while mapping records to and from the store.
#[derive(Debug, Error)]
pub enum Error {
    /// The record type's schema is unusable for the requested operation.
    #[error("{record}: schema error: {reason}")]
    Schema {
        record: &'static str,
        reason: String,
    },
    /// A key field had no value where one was required.
    #[error("{record}.{field}: key value is required")]
    MissingKey {
        record: &'static str,
        field: &'static str,
    },
    /// A wire value could not be converted to or from the declared field type.
    #[error("{record}.{field}: cannot map value: {reason}")]
    Mapping {
        record: &'static str,
        field: String,
        reason: String,
    },
    /// The store client failed. The underlying error is carried untranslated.
    #[error("store operation {operation} failed")]
    Store {
        operation: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Creates a schema error for the given record type.
    pub fn schema(record: &'static str, reason: impl Into<String>) -> Self {
        Error::Schema {
            record,
            reason: reason.into(),
        }
    }

    /// Creates a mapping error for the given record field.
    pub fn mapping(
        record: &'static str,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::Mapping {
            record,
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Wraps a store client failure without translating it.
    pub fn store<E>(operation: &'static str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Store {
            operation,
            source: Box::new(source),
        }
    }
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, Error>;
