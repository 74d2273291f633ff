//! Records of committed transitions.
//!
//! A `StateTransition` is what the order adapter hands to the history
//! service after every successful commit. `StateHistory` is an immutable,
//! ordered log of such records.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use lifecycle_fsm::core::StateTransition;
/// use lifecycle_fsm::order::OrderState;
///
/// let transition = StateTransition::now(OrderState::AddingItems, OrderState::ArrangingPayment);
/// assert_eq!(transition.from, OrderState::AddingItems);
/// assert_eq!(transition.to, OrderState::ArrangingPayment);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

impl<S: State> StateTransition<S> {
    /// Record a transition committed at the current instant.
    pub fn now(from: S, to: S) -> Self {
        Self {
            from,
            to,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered history of committed transitions.
///
/// `record` returns a new history and leaves the receiver untouched. A
/// [`HistoryService`](crate::order::HistoryService) implementation can fold
/// the transition of each entry it receives into one of these to keep a
/// per-order audit trail.
///
/// # Example
///
/// ```rust
/// use lifecycle_fsm::core::{StateHistory, StateTransition};
/// use lifecycle_fsm::order::OrderState;
///
/// let history = StateHistory::new()
///     .record(StateTransition::now(OrderState::AddingItems, OrderState::ArrangingPayment))
///     .record(StateTransition::now(OrderState::ArrangingPayment, OrderState::PaymentSettled));
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path[2], &OrderState::PaymentSettled);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// States traversed: the first `from`, then the `to` of each record.
    ///
    /// Records that do not chain (a jump happened in between) are not
    /// repaired; the path simply follows the `to` states.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
