//! Order lifecycle states and the default order transition graph.

use crate::core::{State, TransitionGraph};
use serde::{Deserialize, Serialize};
use std::fmt;

/// States of an order.
///
/// `Custom` carries states contributed through configuration; it
/// serializes as its bare name like every built-in state. Build it with
/// [`OrderState::custom`] or `From<String>`: a `Custom` holding a built-in
/// name would compare unequal to that built-in state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderState {
    AddingItems,
    ArrangingPayment,
    PaymentAuthorized,
    PaymentSettled,
    PartiallyFulfilled,
    Fulfilled,
    Cancelled,
    Custom(String),
}

impl OrderState {
    /// The state called `name`, resolving built-in names to their variant.
    pub fn custom(name: impl Into<String>) -> Self {
        Self::from(name.into())
    }

    /// States in which payment for the order is complete and the order is
    /// considered placed.
    pub fn is_payment_complete(&self) -> bool {
        matches!(self, Self::PaymentAuthorized | Self::PaymentSettled)
    }
}

impl State for OrderState {
    fn name(&self) -> &str {
        match self {
            Self::AddingItems => "AddingItems",
            Self::ArrangingPayment => "ArrangingPayment",
            Self::PaymentAuthorized => "PaymentAuthorized",
            Self::PaymentSettled => "PaymentSettled",
            Self::PartiallyFulfilled => "PartiallyFulfilled",
            Self::Fulfilled => "Fulfilled",
            Self::Cancelled => "Cancelled",
            Self::Custom(name) => name,
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Fulfilled | Self::Cancelled)
    }
}

impl From<String> for OrderState {
    fn from(name: String) -> Self {
        match name.as_str() {
            "AddingItems" => Self::AddingItems,
            "ArrangingPayment" => Self::ArrangingPayment,
            "PaymentAuthorized" => Self::PaymentAuthorized,
            "PaymentSettled" => Self::PaymentSettled,
            "PartiallyFulfilled" => Self::PartiallyFulfilled,
            "Fulfilled" => Self::Fulfilled,
            "Cancelled" => Self::Cancelled,
            _ => Self::Custom(name),
        }
    }
}

impl From<&str> for OrderState {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<OrderState> for String {
    fn from(state: OrderState) -> Self {
        match state {
            OrderState::Custom(name) => name,
            other => other.name().to_string(),
        }
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The built-in order transition graph.
///
/// A fresh value on every call, so merging configuration into it never
/// leaks between state machines.
pub fn order_transitions() -> TransitionGraph<OrderState> {
    use OrderState::*;

    TransitionGraph::new()
        .with(AddingItems, [ArrangingPayment, Cancelled])
        .with(
            ArrangingPayment,
            [PaymentAuthorized, PaymentSettled, AddingItems, Cancelled],
        )
        .with(PaymentAuthorized, [PaymentSettled, Cancelled])
        .with(PaymentSettled, [PartiallyFulfilled, Fulfilled, Cancelled])
        .with(PartiallyFulfilled, [Fulfilled, PartiallyFulfilled, Cancelled])
        .with(Fulfilled, [])
        .with(Cancelled, [])
}
