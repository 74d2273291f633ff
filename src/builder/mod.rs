//! Builder API for engine configurations.
//!
//! Provides a fluent, validating builder for [`StateMachineConfig`](crate::fsm::StateMachineConfig)
//! and the `state_enum!` macro for declaring state types with little
//! boilerplate.

pub mod config;
pub mod error;
pub mod macros;

pub use config::StateMachineConfigBuilder;
pub use error::BuildError;
