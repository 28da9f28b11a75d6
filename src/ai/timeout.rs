//! Timeout helpers
//!
//! Bounds async operations with `tokio::time::timeout` and turns expiry into
//! `JournalError::Timeout`.

use std::future::Future;
use std::time::Duration;

use crate::types::{JournalError, Result};

/// Execute an async operation with a timeout
///
/// Returns a timeout error if the operation doesn't complete within the
/// specified duration. The inner future is dropped on expiry.
///
/// ```ignore
/// let response = with_timeout(
///     Duration::from_secs(10),
///     provider.complete(&prompt),
///     "mood analysis",
/// ).await?;
/// ```
pub async fn with_timeout<T, F>(timeout: Duration, future: F, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(JournalError::timeout(operation_name, timeout)),
    }
}
