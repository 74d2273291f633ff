//! Lifecycle hooks and the configuration an engine runs against.

use crate::core::{State, TransitionGraph, TransitionOutcome};
use futures::future::BoxFuture;
use std::sync::Arc;

/// Called before a reachable transition commits. Rejecting aborts it.
pub type StartHook<S, D> = Arc<
    dyn for<'a> Fn(&'a S, &'a S, &'a D) -> BoxFuture<'a, TransitionOutcome> + Send + Sync,
>;

/// Called after a transition committed, with `(from, to, data)`.
pub type EndHook<S, D, E> = Arc<
    dyn for<'a> Fn(&'a S, &'a S, &'a mut D) -> BoxFuture<'a, Result<(), E>> + Send + Sync,
>;

/// Called when a transition is unreachable or vetoed, with the guard's
/// message if it gave one. Returning `Err` is how a rejection is raised.
pub type ErrorHook<S, E> = Arc<dyn Fn(&S, &S, Option<&str>) -> Result<(), E> + Send + Sync>;

/// Wrap a closure as a [`StartHook`].
///
/// Going through this function lets closures infer the higher-ranked
/// signature; `Arc::new` alone does not.
pub fn start_hook<S, D, F>(hook: F) -> StartHook<S, D>
where
    F: for<'a> Fn(&'a S, &'a S, &'a D) -> BoxFuture<'a, TransitionOutcome>
        + Send
        + Sync
        + 'static,
{
    Arc::new(hook)
}

/// Wrap a closure as an [`EndHook`].
pub fn end_hook<S, D, E, F>(hook: F) -> EndHook<S, D, E>
where
    F: for<'a> Fn(&'a S, &'a S, &'a mut D) -> BoxFuture<'a, Result<(), E>>
        + Send
        + Sync
        + 'static,
{
    Arc::new(hook)
}

/// Wrap a closure as an [`ErrorHook`].
pub fn error_hook<S, E, F>(hook: F) -> ErrorHook<S, E>
where
    F: Fn(&S, &S, Option<&str>) -> Result<(), E> + Send + Sync + 'static,
{
    Arc::new(hook)
}

/// The three optional lifecycle hooks.
///
/// Used both by the engine configuration and by the layered hook sets of
/// the order adapter (configuration hooks and process strategy hooks).
pub struct TransitionHooks<S, D, E> {
    pub on_transition_start: Option<StartHook<S, D>>,
    pub on_transition_end: Option<EndHook<S, D, E>>,
    pub on_error: Option<ErrorHook<S, E>>,
}

impl<S, D, E> TransitionHooks<S, D, E> {
    pub fn new() -> Self {
        Self {
            on_transition_start: None,
            on_transition_end: None,
            on_error: None,
        }
    }

    pub fn on_transition_start<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(&'a S, &'a S, &'a D) -> BoxFuture<'a, TransitionOutcome>
            + Send
            + Sync
            + 'static,
    {
        self.on_transition_start = Some(start_hook(hook));
        self
    }

    pub fn on_transition_end<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(&'a S, &'a S, &'a mut D) -> BoxFuture<'a, Result<(), E>>
            + Send
            + Sync
            + 'static,
    {
        self.on_transition_end = Some(end_hook(hook));
        self
    }

    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&S, &S, Option<&str>) -> Result<(), E> + Send + Sync + 'static,
    {
        self.on_error = Some(error_hook(hook));
        self
    }
}

impl<S, D, E> Default for TransitionHooks<S, D, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, D, E> Clone for TransitionHooks<S, D, E> {
    fn clone(&self) -> Self {
        Self {
            on_transition_start: self.on_transition_start.clone(),
            on_transition_end: self.on_transition_end.clone(),
            on_error: self.on_error.clone(),
        }
    }
}

/// A transition graph plus the hooks fired around each transition.
///
/// `D` is the payload threaded through one transition attempt and `E` the
/// error type hooks may return.
pub struct StateMachineConfig<S: State, D, E> {
    pub transitions: TransitionGraph<S>,
    pub hooks: TransitionHooks<S, D, E>,
}

impl<S: State, D, E> StateMachineConfig<S, D, E> {
    /// A configuration with no hooks.
    pub fn new(transitions: TransitionGraph<S>) -> Self {
        Self {
            transitions,
            hooks: TransitionHooks::new(),
        }
    }

    pub fn with_hooks(transitions: TransitionGraph<S>, hooks: TransitionHooks<S, D, E>) -> Self {
        Self { transitions, hooks }
    }
}

impl<S: State, D, E> Clone for StateMachineConfig<S, D, E> {
    fn clone(&self) -> Self {
        Self {
            transitions: self.transitions.clone(),
            hooks: self.hooks.clone(),
        }
    }
}
