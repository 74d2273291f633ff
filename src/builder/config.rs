//! Builder for constructing engine configurations.

use crate::builder::error::BuildError;
use crate::core::{validate_transition_graph, State, TransitionGraph, TransitionOutcome};
use crate::fsm::{StateMachineConfig, TransitionHooks};
use futures::future::BoxFuture;
use stillwater::validation::Validation;

/// Fluent builder for a [`StateMachineConfig`].
///
/// Unlike [`StateMachineConfig::new`], `build` validates the graph: every
/// destination must be declared, and so must the initial state if one was
/// given.
///
/// # Example
///
/// ```rust
/// use futures::FutureExt;
/// use lifecycle_fsm::builder::StateMachineConfigBuilder;
/// use lifecycle_fsm::core::{TransitionGraph, TransitionOutcome};
/// use lifecycle_fsm::order::OrderState::{self, *};
///
/// let config = StateMachineConfigBuilder::<OrderState, u32, String>::new()
///     .transitions(
///         TransitionGraph::new()
///             .with(AddingItems, [ArrangingPayment])
///             .with(ArrangingPayment, []),
///     )
///     .initial(AddingItems)
///     .on_transition_start(|_, _, items: &u32| {
///         let outcome = TransitionOutcome::from(*items > 0);
///         async move { outcome }.boxed()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.transitions.len(), 2);
/// ```
pub struct StateMachineConfigBuilder<S: State, D, E> {
    transitions: Option<TransitionGraph<S>>,
    initial: Option<S>,
    hooks: TransitionHooks<S, D, E>,
}

impl<S: State, D, E> StateMachineConfigBuilder<S, D, E> {
    pub fn new() -> Self {
        Self {
            transitions: None,
            initial: None,
            hooks: TransitionHooks::new(),
        }
    }

    /// Set the transition graph (required).
    pub fn transitions(mut self, graph: TransitionGraph<S>) -> Self {
        self.transitions = Some(graph);
        self
    }

    /// Declare the state engines will usually start from, so `build` can
    /// check it exists in the graph (optional).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Replace all hooks at once.
    pub fn hooks(mut self, hooks: TransitionHooks<S, D, E>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn on_transition_start<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(&'a S, &'a S, &'a D) -> BoxFuture<'a, TransitionOutcome>
            + Send
            + Sync
            + 'static,
    {
        self.hooks = self.hooks.on_transition_start(hook);
        self
    }

    pub fn on_transition_end<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(&'a S, &'a S, &'a mut D) -> BoxFuture<'a, Result<(), E>>
            + Send
            + Sync
            + 'static,
    {
        self.hooks = self.hooks.on_transition_end(hook);
        self
    }

    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&S, &S, Option<&str>) -> Result<(), E> + Send + Sync + 'static,
    {
        self.hooks = self.hooks.on_error(hook);
        self
    }

    /// Build the configuration.
    /// Returns an error if the graph is missing or structurally invalid.
    pub fn build(self) -> Result<StateMachineConfig<S, D, E>, BuildError> {
        let transitions = self.transitions.ok_or(BuildError::MissingTransitions)?;

        match validate_transition_graph(&transitions, self.initial.as_ref()) {
            Validation::Success(_) => Ok(StateMachineConfig::with_hooks(transitions, self.hooks)),
            Validation::Failure(violations) => Err(BuildError::InvalidGraph(
                violations.iter().cloned().collect(),
            )),
        }
    }
}

impl<S: State, D, E> Default for StateMachineConfigBuilder<S, D, E> {
    fn default() -> Self {
        Self::new()
    }
}
