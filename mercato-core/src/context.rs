//! Per-call command context: credentials, deadline, cancellation.
//!
//! A `CommandContext` is constructed fresh per call and shared with the
//! fetcher during `extract_data`. It carries no mutable state; concurrent
//! calls with different credentials simply use different contexts.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Notify;

use crate::fetcher::Credentials;

/// Cooperative cancellation token honoured by the executor.
///
/// Cancelling mid-`extract_data` stops the in-flight I/O best-effort; the
/// fetcher's `transform_data` phase is never entered afterwards.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

#[derive(Debug, Default)]
struct CancelInner {
    notify: Notify,
    cancelled: AtomicBool,
}

impl CancelToken {
    /// A fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent; wakes every pending waiter.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolve once cancellation is requested. Registers interest before
    /// re-checking the flag so a concurrent `cancel` is never missed.
    pub async fn cancelled(&self) {
        if self.is_cancelled() {
            return;
        }
        loop {
            let notified = self.inner.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// Per-call context threaded from the route invocation down to the fetcher.
#[derive(Clone, Debug, Default)]
pub struct CommandContext {
    credentials: BTreeMap<String, Credentials>,
    timeout: Option<Duration>,
    cancel: CancelToken,
}

impl CommandContext {
    /// An empty context: no credentials, configured default timeout applies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach credentials for a provider.
    #[must_use]
    pub fn with_credentials(mut self, provider: impl Into<String>, creds: Credentials) -> Self {
        self.credentials.insert(provider.into(), creds);
        self
    }

    /// Bound this call with an explicit deadline, overriding the configured
    /// default timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use an externally-owned cancellation token for this call.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Credentials for a provider, if the caller supplied any.
    #[must_use]
    pub fn credentials_for(&self, provider: &str) -> Option<&Credentials> {
        self.credentials.get(provider)
    }

    /// Whether non-empty credentials exist for a provider.
    #[must_use]
    pub fn has_credentials(&self, provider: &str) -> bool {
        self.credentials_for(provider).is_some_and(|c| !c.is_empty())
    }

    /// The caller-supplied deadline, when one was set.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The cancellation token for this call.
    #[must_use]
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }
}
