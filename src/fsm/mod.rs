//! The asynchronous transition engine.
//!
//! This module is the "imperative shell" around the pure core: it runs
//! guard hooks, commits state changes and fires end hooks.
//!
//! # Key Concepts
//!
//! - **Hooks**: optional start, end and error callbacks returning boxed futures
//! - **Config**: a transition graph plus its hooks, shared by reference
//! - **Engine**: an ephemeral [`Fsm`] positioned at one state per attempt
//!
//! # Transition algorithm
//!
//! 1. Target not in the current state's destinations: error hook, no change.
//! 2. Start hook rejects: error hook with the guard's message, no change.
//! 3. Commit the new state.
//! 4. End hook with `(from, to, data)`.

mod config;
mod machine;

pub use config::{
    end_hook, error_hook, start_hook, EndHook, ErrorHook, StartHook, StateMachineConfig,
    TransitionHooks,
};
pub use machine::Fsm;
