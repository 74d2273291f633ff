//! Lifecycle FSM: a generic asynchronous finite state machine.
//!
//! A state machine is a transition graph plus optional lifecycle hooks.
//! The engine checks every requested transition against the graph, lets a
//! start hook veto it, commits, and then runs an end hook. Rejections are
//! reported through an error hook rather than raised by the engine itself.
//!
//! # Core Concepts
//!
//! - **State**: type-safe state representation via the `State` trait
//! - **TransitionGraph**: ordered map of state to reachable states, mergeable
//! - **TransitionOutcome**: explicit proceed / reject verdict of a guard
//! - **Fsm**: an ephemeral engine positioned at one state
//! - **OrderStateMachine**: the engine applied to an order lifecycle
//!
//! # Example
//!
//! ```rust
//! use futures::FutureExt;
//! use lifecycle_fsm::core::{TransitionGraph, TransitionOutcome};
//! use lifecycle_fsm::fsm::{Fsm, StateMachineConfig, TransitionHooks};
//! use lifecycle_fsm::state_enum;
//!
//! state_enum! {
//!     enum Door {
//!         Closed,
//!         Open,
//!         Locked,
//!     }
//! }
//!
//! # futures::executor::block_on(async {
//! let hooks = TransitionHooks::new()
//!     .on_transition_start(|_, to: &Door, has_key: &bool| {
//!         let outcome = if *to == Door::Locked && !*has_key {
//!             TransitionOutcome::reject_with("no key")
//!         } else {
//!             TransitionOutcome::Proceed
//!         };
//!         async move { outcome }.boxed()
//!     })
//!     .on_error(|_, _, message| Err(message.unwrap_or("not allowed").to_string()));
//!
//! let config = StateMachineConfig::with_hooks(
//!     TransitionGraph::new()
//!         .with(Door::Closed, [Door::Open, Door::Locked])
//!         .with(Door::Open, [Door::Closed])
//!         .with(Door::Locked, [Door::Closed]),
//!     hooks,
//! );
//!
//! let mut fsm = Fsm::new(&config, Door::Closed);
//! assert_eq!(fsm.transition_to(Door::Locked, &mut false).await, Err("no key".to_string()));
//! assert_eq!(fsm.current_state(), &Door::Closed);
//!
//! fsm.transition_to(Door::Locked, &mut true).await.unwrap();
//! assert_eq!(fsm.current_state(), &Door::Locked);
//! # });
//! ```

pub mod builder;
pub mod core;
pub mod fsm;
pub mod order;

// Re-export commonly used types
pub use crate::core::{
    merge_transitions, State, StateHistory, StateTransition, TransitionGraph, TransitionOutcome,
};
pub use crate::fsm::{Fsm, StateMachineConfig, TransitionHooks};
pub use crate::order::{OrderState, OrderStateMachine};
