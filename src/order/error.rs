//! Order state machine errors.

use super::state::OrderState;
use crate::builder::BuildError;
use thiserror::Error;

/// Message used when a transition is unreachable or a guard gave no reason.
pub const CANNOT_TRANSITION: &str = "error.cannot-transition-order-from-to";

/// Guard message for a transition into payment with no order lines.
pub const EMPTY_ORDER_PAYMENT: &str = "error.cannot-transition-to-payment-when-order-is-empty";

/// Guard message for a transition into payment with no customer.
pub const NO_CUSTOMER_PAYMENT: &str = "error.cannot-transition-to-payment-without-customer";

/// A failure reported by a downstream service.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{service} failed: {message}")]
pub struct ServiceError {
    pub service: &'static str,
    pub message: String,
}

impl ServiceError {
    pub fn new(service: &'static str, message: impl Into<String>) -> Self {
        Self {
            service,
            message: message.into(),
        }
    }
}

/// Errors returned by [`OrderStateMachine`](super::OrderStateMachine).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderStateError {
    /// The transition was unreachable or rejected by a guard.
    #[error("{message} ({from} -> {to})")]
    IllegalOperation {
        message: String,
        from: OrderState,
        to: OrderState,
    },

    /// A downstream service failed after the transition committed.
    #[error(transparent)]
    Downstream(#[from] ServiceError),

    #[error("Invalid order process configuration: {0}")]
    InvalidConfig(#[from] BuildError),
}

impl OrderStateError {
    /// An illegal operation carrying the guard's message, or the default one.
    pub fn illegal_transition(from: &OrderState, to: &OrderState, message: Option<&str>) -> Self {
        Self::IllegalOperation {
            message: message.unwrap_or(CANNOT_TRANSITION).to_string(),
            from: from.clone(),
            to: to.clone(),
        }
    }

    /// The i18n message key of an illegal operation.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::IllegalOperation { message, .. } => Some(message),
            _ => None,
        }
    }
}
