//! Cancellation and deadline context for API calls.
//!
//! A [`Context`] travels with every request from the resource accessor
//! through the API client into the transport client. The transport races
//! the in-flight request against [`Context::done`] and drops the request
//! if the context finishes first.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::ZendeskError;

/// Cancellation token plus optional deadline.
///
/// Cloning is cheap and clones share the same token. Every `with_*` method
/// returns a new value and leaves the receiver unchanged.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context driven by an existing cancellation token.
    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            cancel: token,
            deadline: None,
        }
    }

    /// Derives a context whose deadline is `timeout` from now, or the
    /// current deadline if that is earlier.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Derives a context with the given deadline, keeping any earlier one.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(current) if current <= deadline => current,
            _ => deadline,
        };
        Self {
            cancel: self.cancel.clone(),
            deadline: Some(deadline),
        }
    }

    /// Derives a context that is cancelled with this one but can also be
    /// cancelled on its own through [`Context::cancellation_token`].
    pub fn child(&self) -> Self {
        Self {
            cancel: self.cancel.child_token(),
            deadline: self.deadline,
        }
    }

    /// The token that cancels this context.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// The deadline, if one is set.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancels this context and every context derived from it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns the error describing why this context is finished, or
    /// `None` while it is still live.
    pub fn err(&self) -> Option<ZendeskError> {
        if self.cancel.is_cancelled() {
            return Some(ZendeskError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(ZendeskError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Resolves once the context is cancelled or its deadline passes.
    ///
    /// Never resolves for a background context.
    pub async fn done(&self) -> ZendeskError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                _ = self.cancel.cancelled() => ZendeskError::Cancelled,
                _ = tokio::time::sleep_until(deadline) => ZendeskError::DeadlineExceeded,
            },
            None => {
                self.cancel.cancelled().await;
                ZendeskError::Cancelled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_is_live() {
        let ctx = Context::background();
        assert!(ctx.err().is_none());
        assert!(ctx.deadline().is_none());
    }

    #[test]
    fn test_derivation_does_not_mutate_receiver() {
        let ctx = Context::background();
        let derived = ctx.with_timeout(Duration::from_secs(5));
        assert!(ctx.deadline().is_none());
        assert!(derived.deadline().is_some());
    }

    #[test]
    fn test_earlier_deadline_wins() {
        let near = Instant::now() + Duration::from_secs(1);
        let far = near + Duration::from_secs(60);
        let ctx = Context::background().with_deadline(near).with_deadline(far);
        assert_eq!(ctx.deadline(), Some(near));
    }

    #[test]
    fn test_child_cancelled_with_parent() {
        let parent = Context::background();
        let child = parent.child();
        parent.cancel();
        assert!(matches!(child.err(), Some(ZendeskError::Cancelled)));
    }

    #[test]
    fn test_child_cancel_leaves_parent_live() {
        let parent = Context::background();
        let child = parent.child();
        child.cancel();
        assert!(parent.err().is_none());
        assert!(child.err().is_some());
    }

    #[tokio::test]
    async fn test_done_reports_cancellation() {
        let token = CancellationToken::new();
        let ctx = Context::with_cancellation(token.clone());
        token.cancel();
        assert!(matches!(ctx.done().await, ZendeskError::Cancelled));
    }

    #[tokio::test]
    async fn test_done_reports_deadline() {
        let ctx = Context::background().with_timeout(Duration::from_millis(10));
        assert!(matches!(ctx.done().await, ZendeskError::DeadlineExceeded));
        assert!(matches!(ctx.err(), Some(ZendeskError::DeadlineExceeded)));
    }
}
