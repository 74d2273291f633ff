//! The verdict a transition-start guard returns.
//!
//! A guard either lets a transition proceed or rejects it, optionally
//! explaining why. The three cases are explicit variants rather than a
//! `bool`/`String`/`()` union inspected at runtime.

use futures::future::BoxFuture;
use futures::{FutureExt, Stream, StreamExt};

/// Result of evaluating a transition-start guard.
///
/// # Example
///
/// ```rust
/// use lifecycle_fsm::core::TransitionOutcome;
///
/// assert!(TransitionOutcome::from(true).is_proceed());
/// assert_eq!(TransitionOutcome::from(false), TransitionOutcome::Reject { message: None });
/// assert_eq!(
///     TransitionOutcome::from("error.not-ready").message(),
///     Some("error.not-ready")
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// No objection, the transition may continue.
    #[default]
    Proceed,

    /// The transition is vetoed. `message` becomes the reported reason.
    Reject { message: Option<String> },
}

impl TransitionOutcome {
    /// Reject without a reason.
    pub fn reject() -> Self {
        Self::Reject { message: None }
    }

    /// Reject with a reason.
    pub fn reject_with(message: impl Into<String>) -> Self {
        Self::Reject {
            message: Some(message.into()),
        }
    }

    pub fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed)
    }

    pub fn is_reject(&self) -> bool {
        !self.is_proceed()
    }

    /// The rejection reason, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Proceed => None,
            Self::Reject { message } => message.as_deref(),
        }
    }
}

impl From<()> for TransitionOutcome {
    fn from(_: ()) -> Self {
        Self::Proceed
    }
}

impl From<bool> for TransitionOutcome {
    fn from(allowed: bool) -> Self {
        if allowed {
            Self::Proceed
        } else {
            Self::reject()
        }
    }
}

impl From<String> for TransitionOutcome {
    fn from(message: String) -> Self {
        Self::reject_with(message)
    }
}

impl From<&str> for TransitionOutcome {
    fn from(message: &str) -> Self {
        Self::reject_with(message)
    }
}

impl From<Option<String>> for TransitionOutcome {
    /// `None` means no opinion, `Some` rejects with that message.
    fn from(message: Option<String>) -> Self {
        match message {
            None => Self::Proceed,
            Some(message) => Self::reject_with(message),
        }
    }
}

/// Resolve a stream of guard outcomes to its first settled value.
///
/// Only the first item is consumed; anything the stream would produce
/// afterwards is dropped with it. An empty stream counts as no opinion.
///
/// # Example
///
/// ```rust
/// use futures::stream;
/// use lifecycle_fsm::core::{first_settled, TransitionOutcome};
///
/// # futures::executor::block_on(async {
/// let outcomes = stream::iter(vec![
///     TransitionOutcome::reject_with("first"),
///     TransitionOutcome::Proceed,
/// ]);
/// assert_eq!(first_settled(outcomes).await.message(), Some("first"));
/// # });
/// ```
pub fn first_settled<'a, St>(stream: St) -> BoxFuture<'a, TransitionOutcome>
where
    St: Stream<Item = TransitionOutcome> + Send + 'a,
{
    async move {
        let mut stream = Box::pin(stream);
        stream.next().await.unwrap_or_default()
    }
    .boxed()
}
