//! Configuration consumed when building an order state machine.

use super::entity::OrderTransitionData;
use super::error::OrderStateError;
use super::state::OrderState;
use crate::core::TransitionGraph;
use crate::fsm::TransitionHooks;

/// Hook set over order transitions.
pub type OrderHooks = TransitionHooks<OrderState, OrderTransitionData, OrderStateError>;

/// Order process configuration.
///
/// - `transitions` is merged into the built-in graph (destinations are
///   appended, new states added).
/// - `hooks` are the configuration-level lifecycle hooks.
/// - `process` is a pluggable strategy offering the same hooks; any hook it
///   defines takes the place of the configuration-level one.
///
/// # Example
///
/// ```rust
/// use lifecycle_fsm::order::{OrderOptions, OrderState};
///
/// let options = OrderOptions::default()
///     .with_transitions_json(r#"{
///         "Fulfilled": { "to": ["Returned"] },
///         "Returned": { "to": [] }
///     }"#)
///     .unwrap();
///
/// let transitions = options.transitions.unwrap();
/// assert_eq!(
///     transitions.next_states(&OrderState::Fulfilled),
///     &[OrderState::custom("Returned")]
/// );
/// ```
#[derive(Clone, Default)]
pub struct OrderOptions {
    pub transitions: Option<TransitionGraph<OrderState>>,
    pub hooks: OrderHooks,
    pub process: Option<OrderHooks>,
}

impl OrderOptions {
    pub fn with_transitions(mut self, transitions: TransitionGraph<OrderState>) -> Self {
        self.transitions = Some(transitions);
        self
    }

    /// Parse the transition override from JSON.
    pub fn with_transitions_json(self, json: &str) -> Result<Self, serde_json::Error> {
        let transitions = serde_json::from_str(json)?;
        Ok(self.with_transitions(transitions))
    }

    pub fn with_hooks(mut self, hooks: OrderHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_process(mut self, process: OrderHooks) -> Self {
        self.process = Some(process);
        self
    }
}
