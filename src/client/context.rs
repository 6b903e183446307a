//! Per-call deadline and cancellation

use crate::error::ApiError;
use std::future::{pending, Future};
use std::time::Duration;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

/// Deadline and cancellation token carried into every client operation
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancel: Option<CancellationToken>,
}

impl CallContext {
    /// No deadline, no cancellation
    pub fn background() -> Self {
        Self::default()
    }

    /// Deadline `timeout` from now; a timeout past the clock's range means no deadline
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now().checked_add(timeout),
            cancel: None,
        }
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancel: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    /// Drive `call` to completion unless the deadline passes or the token fires first.
    ///
    /// Nothing is started when the context is already expired or cancelled. A
    /// call that has completed is always returned, even if the deadline fires in
    /// the same instant.
    pub async fn run<T, F>(&self, operation: &str, call: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        if self.is_cancelled() {
            return Err(ApiError::Cancelled {
                operation: operation.to_string(),
            });
        }
        if self.is_expired() {
            return Err(ApiError::Timeout {
                operation: operation.to_string(),
            });
        }

        let expired = async {
            match self.deadline {
                Some(deadline) => sleep_until(deadline).await,
                None => pending::<()>().await,
            }
        };
        let cancelled = async {
            match &self.cancel {
                Some(token) => token.cancelled().await,
                None => pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            result = call => result,
            _ = expired => Err(ApiError::Timeout {
                operation: operation.to_string(),
            }),
            _ = cancelled => Err(ApiError::Cancelled {
                operation: operation.to_string(),
            }),
        }
    }
}
