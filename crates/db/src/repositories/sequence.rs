//! Atomic sequence allocation.
//!
//! Counters live in the `sequences` table, one row per (bucket, period).
//! Allocation is a conditional `UPDATE ... RETURNING` (find-and-increment),
//! never read-then-write; first use of a bucket races through an
//! `ON CONFLICT DO NOTHING` insert and falls back to the increment path.

use std::time::Duration;

use sea_orm::{ConnectionTrait, DbBackend, DbErr, Statement};
use tradewind_core::numbering::SequenceSpec;
use tradewind_shared::config::SequenceConfig;
use tradewind_shared::AppError;
use uuid::Uuid;

/// Error types for sequence allocation.
#[derive(Debug, thiserror::Error)]
pub enum SequenceError {
    /// All retry attempts were spent on creation races.
    #[error("Failed to allocate next number for bucket '{bucket}' after {attempts} attempts")]
    Exhausted {
        /// The contended bucket name.
        bucket: String,
        /// Attempts made before giving up.
        attempts: u32,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<SequenceError> for AppError {
    fn from(err: SequenceError) -> Self {
        match err {
            SequenceError::Exhausted { .. } => Self::AllocationExhausted(err.to_string()),
            SequenceError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

const INCREMENT_SQL: &str = r"
UPDATE sequences
SET current = current + 1
WHERE sequence_type = $1::sequence_type AND period IS NOT DISTINCT FROM $2
RETURNING current, prefix, padding
";

const CREATE_SQL: &str = r"
INSERT INTO sequences (id, sequence_type, period, prefix, padding, current)
VALUES ($1, $2::sequence_type, $3, $4, $5, 1)
ON CONFLICT (sequence_type, COALESCE(period, '')) DO NOTHING
RETURNING current
";

const READ_SQL: &str = r"
SELECT current, prefix, padding
FROM sequences
WHERE sequence_type = $1::sequence_type AND period IS NOT DISTINCT FROM $2
";

/// Stateless allocator over any connection or open transaction.
///
/// Run `get_next` on the orchestrator's transaction so a failed
/// operation rolls the increment back along with everything else.
pub struct SequenceAllocator;

impl SequenceAllocator {
    /// Atomically allocates the next number for a bucket.
    ///
    /// Every caller receives a distinct, strictly increasing counter for
    /// the (bucket, period) pair; the formatted result is
    /// `prefix + zero-padded counter`.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::Exhausted` when creation races persist
    /// past the retry budget, or `SequenceError::Database` for any
    /// other failure.
    pub async fn get_next<C: ConnectionTrait>(
        conn: &C,
        spec: &SequenceSpec,
    ) -> Result<String, SequenceError> {
        Self::get_next_with(conn, spec, &SequenceConfig::default()).await
    }

    /// `get_next` with explicit retry/backoff tuning.
    ///
    /// # Errors
    ///
    /// See [`Self::get_next`].
    pub async fn get_next_with<C: ConnectionTrait>(
        conn: &C,
        spec: &SequenceSpec,
        config: &SequenceConfig,
    ) -> Result<String, SequenceError> {
        for attempt in 0..config.max_retries {
            // Fast path: the bucket row exists, increment it in place.
            let increment = Statement::from_sql_and_values(
                DbBackend::Postgres,
                INCREMENT_SQL,
                [
                    spec.sequence_type.as_str().into(),
                    spec.period.clone().into(),
                ],
            );
            if let Some(row) = conn.query_one(increment).await? {
                let current: i64 = row.try_get("", "current")?;
                let prefix: String = row.try_get("", "prefix")?;
                let padding: i32 = row.try_get("", "padding")?;
                tracing::debug!(
                    bucket = spec.sequence_type.as_str(),
                    period = spec.period.as_deref(),
                    current,
                    "allocated sequence number"
                );
                return Ok(format_allocated(spec, &prefix, padding, current));
            }

            // No row yet: try to create it with counter = 1. A concurrent
            // creator makes the insert a no-op and we retry the increment.
            let create = Statement::from_sql_and_values(
                DbBackend::Postgres,
                CREATE_SQL,
                [
                    Uuid::new_v4().into(),
                    spec.sequence_type.as_str().into(),
                    spec.period.clone().into(),
                    spec.prefix.clone().into(),
                    i32::try_from(spec.padding).unwrap_or(4).into(),
                ],
            );
            if conn.query_one(create).await?.is_some() {
                return Ok(spec.format(1));
            }

            tracing::warn!(
                bucket = spec.sequence_type.as_str(),
                period = spec.period.as_deref(),
                attempt,
                "sequence creation raced, retrying"
            );
            tokio::time::sleep(backoff_delay(config, attempt)).await;
        }

        Err(SequenceError::Exhausted {
            bucket: spec.sequence_type.as_str().to_string(),
            attempts: config.max_retries,
        })
    }

    /// Reads what the next number would be, without incrementing.
    ///
    /// Safe to call any number of times; an absent bucket previews as
    /// its first value.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::Database` on query failure.
    pub async fn preview<C: ConnectionTrait>(
        conn: &C,
        spec: &SequenceSpec,
    ) -> Result<String, SequenceError> {
        let read = Statement::from_sql_and_values(
            DbBackend::Postgres,
            READ_SQL,
            [
                spec.sequence_type.as_str().into(),
                spec.period.clone().into(),
            ],
        );

        match conn.query_one(read).await? {
            Some(row) => {
                let current: i64 = row.try_get("", "current")?;
                let prefix: String = row.try_get("", "prefix")?;
                let padding: i32 = row.try_get("", "padding")?;
                Ok(format_allocated(spec, &prefix, padding, current + 1))
            }
            None => Ok(spec.format(1)),
        }
    }
}

/// Formats with the stored row's prefix/padding, falling back to the spec.
fn format_allocated(spec: &SequenceSpec, prefix: &str, padding: i32, counter: i64) -> String {
    let prefix = if prefix.is_empty() {
        &spec.prefix
    } else {
        prefix
    };
    let width = u32::try_from(padding).ok().filter(|p| *p > 0).unwrap_or(spec.padding);
    tradewind_core::numbering::types::format_number(prefix, counter, width)
}

/// Exponential backoff capped by configuration.
fn backoff_delay(config: &SequenceConfig, attempt: u32) -> Duration {
    let factor = 2u64.saturating_pow(attempt);
    let millis = config
        .backoff_base_ms
        .saturating_mul(factor)
        .min(config.backoff_cap_ms);
    Duration::from_millis(millis)
}
