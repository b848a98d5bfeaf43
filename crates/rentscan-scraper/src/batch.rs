//! Unordered task group for concurrent page and detail fetches.
//!
//! A batch is a fixed set of futures driven together through
//! `buffer_unordered`. Results come back in completion order, not submission
//! order. The futures are never spawned onto the runtime, so dropping the
//! batch (which is what the deadline does) cancels every request still in
//! flight.

use std::future::Future;
use std::time::Duration;

use futures::stream::{self, StreamExt};

use crate::error::ScraperError;

/// Concurrency and deadline settings applied to each batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchLimits {
    /// Maximum futures polled at once. `None` runs the whole batch at once.
    pub max_concurrency: Option<usize>,
    /// Deadline for the whole batch. `None` waits for every future.
    pub timeout: Option<Duration>,
}

impl BatchLimits {
    fn width(&self, batch_len: usize) -> usize {
        self.max_concurrency.unwrap_or(batch_len).max(1)
    }
}

/// Drives `tasks` to completion and returns their outputs in completion order.
///
/// Every task runs to completion even if others fail; failure handling is
/// the caller's job since outputs are returned as-is.
///
/// # Errors
///
/// Returns [`ScraperError::BatchTimeout`] if `limits.timeout` elapses first.
/// All unfinished tasks are dropped (cancelled) in that case.
pub(crate) async fn run_unordered<Fut>(
    limits: &BatchLimits,
    what: &str,
    tasks: Vec<Fut>,
) -> Result<Vec<Fut::Output>, ScraperError>
where
    Fut: Future,
{
    if tasks.is_empty() {
        return Ok(Vec::new());
    }

    let width = limits.width(tasks.len());
    tracing::debug!(what, tasks = tasks.len(), width, "starting batch");

    let gather = stream::iter(tasks)
        .buffer_unordered(width)
        .collect::<Vec<_>>();

    let Some(deadline) = limits.timeout else {
        return Ok(gather.await);
    };
    if let Ok(outputs) = tokio::time::timeout(deadline, gather).await {
        return Ok(outputs);
    }

    tracing::warn!(
        what,
        after_ms = deadline.as_millis(),
        "batch deadline elapsed"
    );
    Err(ScraperError::BatchTimeout {
        what: what.to_owned(),
        after: deadline,
    })
}
