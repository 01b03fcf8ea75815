//! Store error passthrough.
//!
//! SDK failures are not translated or retried here: the typed operation
//! error is preserved as the source of [`Error::Store`] and propagates to
//! the caller unchanged.

use aws_sdk_dynamodb::error::SdkError;
use dynamap_core::Error;

/// Wraps an SDK failure, keeping it as the untranslated error source.
pub(crate) fn map_store_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> Error
where
    SdkError<E, R>: std::error::Error + Send + Sync + 'static,
{
    Error::store(operation, err)
}
