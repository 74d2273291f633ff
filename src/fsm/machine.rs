//! The transition engine.

use crate::core::{State, TransitionOutcome};
use crate::fsm::config::StateMachineConfig;
use tracing::{debug, warn};

/// A short-lived engine positioned at one state of a configured graph.
///
/// Engines are cheap: they borrow their configuration and hold only the
/// initial and current state. Build one from the entity's stored state for
/// each transition attempt and drop it afterwards.
///
/// # Example
///
/// ```rust
/// use lifecycle_fsm::core::TransitionGraph;
/// use lifecycle_fsm::fsm::{Fsm, StateMachineConfig};
/// use lifecycle_fsm::order::OrderState::*;
///
/// # futures::executor::block_on(async {
/// let config: StateMachineConfig<_, (), ()> = StateMachineConfig::new(
///     TransitionGraph::new()
///         .with(AddingItems, [ArrangingPayment])
///         .with(ArrangingPayment, []),
/// );
///
/// let mut fsm = Fsm::new(&config, AddingItems);
/// assert!(fsm.can_transition_to(&ArrangingPayment));
///
/// fsm.transition_to(ArrangingPayment, &mut ()).await.unwrap();
/// assert_eq!(fsm.current_state(), &ArrangingPayment);
/// assert_eq!(fsm.initial_state(), &AddingItems);
/// # });
/// ```
pub struct Fsm<'c, S: State, D, E> {
    config: &'c StateMachineConfig<S, D, E>,
    initial: S,
    current: S,
}

impl<'c, S: State, D, E> Fsm<'c, S, D, E> {
    /// Position an engine at `initial`. The state is not checked against
    /// the graph.
    pub fn new(config: &'c StateMachineConfig<S, D, E>, initial: S) -> Self {
        Self {
            config,
            current: initial.clone(),
            initial,
        }
    }

    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    pub fn current_state(&self) -> &S {
        &self.current
    }

    /// Whether `state` is a declared destination of the current state (pure).
    pub fn can_transition_to(&self, state: &S) -> bool {
        self.config.transitions.can_transition(&self.current, state)
    }

    /// Destinations of the current state, in declaration order (pure).
    pub fn next_states(&self) -> &[S] {
        self.config.transitions.next_states(&self.current)
    }

    /// Attempt to move to `state`.
    ///
    /// An unreachable target or a rejecting start hook is reported to the
    /// error hook and leaves the state unchanged; the result is whatever
    /// the error hook returns (`Ok(())` when none is configured). On
    /// success the state is committed before the end hook runs, so an
    /// end hook failure is returned with the state already advanced.
    pub async fn transition_to(&mut self, state: S, data: &mut D) -> Result<(), E> {
        if !self.can_transition_to(&state) {
            warn!(
                from = self.current.name(),
                to = state.name(),
                "transition not allowed by graph"
            );
            return self.report(&state, None);
        }

        if let Some(start) = &self.config.hooks.on_transition_start {
            let outcome = start(&self.current, &state, &*data).await;
            if let TransitionOutcome::Reject { message } = outcome {
                warn!(
                    from = self.current.name(),
                    to = state.name(),
                    reason = message.as_deref().unwrap_or("none"),
                    "transition rejected by guard"
                );
                return self.report(&state, message.as_deref());
            }
        }

        let from = std::mem::replace(&mut self.current, state.clone());
        debug!(from = from.name(), to = state.name(), "transition committed");

        if let Some(end) = &self.config.hooks.on_transition_end {
            end(&from, &state, data).await?;
        }
        Ok(())
    }

    /// Set the current state unconditionally.
    ///
    /// Skips the graph check and every hook.
    pub fn jump_to(&mut self, state: S) {
        debug!(from = self.current.name(), to = state.name(), "state jumped");
        self.current = state;
    }

    fn report(&self, to: &S, message: Option<&str>) -> Result<(), E> {
        match &self.config.hooks.on_error {
            Some(on_error) => on_error(&self.current, to, message),
            None => Ok(()),
        }
    }
}
