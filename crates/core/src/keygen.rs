//! Surrogate key generation.
//!
//! Invoked by the resolver in write mode when a key field is empty and its
//! strategy is not [`KeyStrategy::None`]. Every function here is pure apart
//! from the clock and the random source.

use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::datetime::{DAY_FORMAT, MONTH_FORMAT};
use crate::schema::KeyStrategy;
use crate::value::Value;

/// Epoch the time-ordered id counts from (2011-03-13T07:06:40Z).
pub const CUSTOM_EPOCH_MS: i64 = 1_300_000_000_000;

/// Generates a key value under the given strategy.
///
/// Returns `None` for [`KeyStrategy::None`]; the caller decides whether an
/// absent key is an error.
pub fn generate(strategy: KeyStrategy) -> Option<Value> {
    match strategy {
        KeyStrategy::None => None,
        KeyStrategy::Uuid => Some(Value::String(Uuid::new_v4().to_string())),
        KeyStrategy::MonthStamp => {
            Some(Value::String(Utc::now().format(MONTH_FORMAT).to_string()))
        }
        KeyStrategy::DayStamp => Some(Value::String(Utc::now().format(DAY_FORMAT).to_string())),
        KeyStrategy::TimeOrderedId => Some(Value::I64(time_ordered_id())),
        KeyStrategy::TimeOrderedIdString => Some(Value::String(time_ordered_id().to_string())),
    }
}

/// 64-bit id composed as `((elapsed_ms << 6) | shard) << 9 | seq`, with the
/// shard and sequence slots drawn independently from a uniform random source.
///
/// Approximately time-ordered: ids from later milliseconds always sort after
/// earlier ones, but two draws within the same millisecond are randomly
/// ordered and can collide.
pub fn time_ordered_id() -> i64 {
    let mut rng = rand::rng();
    let elapsed = Utc::now().timestamp_millis() - CUSTOM_EPOCH_MS;
    let shard: i64 = rng.random_range(0..64);
    let seq: i64 = rng.random_range(0..512);
    ((elapsed << 6) | shard) << 9 | seq
}
