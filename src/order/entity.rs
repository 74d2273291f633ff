//! The order entity and the request context threaded through transitions.

use super::state::OrderState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ambient information about the request driving a transition.
///
/// Opaque to the engine; downstream services use it for tenancy and
/// attribution.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    pub channel_id: Option<Uuid>,
    pub active_user_id: Option<Uuid>,
    pub language_code: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub email_address: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: Uuid,
    pub product_variant_id: Uuid,
    pub quantity: u32,
}

/// An order as seen by the state machine.
///
/// The state machine reads `state`, `lines` and `customer`, and writes
/// `state`, `active` and `order_placed_at`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub code: String,
    pub state: OrderState,
    pub active: bool,
    pub lines: Vec<OrderLine>,
    pub customer: Option<Customer>,
    pub order_placed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// A new, active order in the `AddingItems` state.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            state: OrderState::AddingItems,
            active: true,
            lines: Vec::new(),
            customer: None,
            order_placed_at: None,
        }
    }

    pub fn with_line(mut self, product_variant_id: Uuid, quantity: u32) -> Self {
        self.lines.push(OrderLine {
            id: Uuid::new_v4(),
            product_variant_id,
            quantity,
        });
        self
    }

    pub fn with_customer(mut self, email_address: impl Into<String>) -> Self {
        self.customer = Some(Customer {
            id: Uuid::new_v4(),
            email_address: email_address.into(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// The payload carried through one order transition attempt.
#[derive(Clone, Debug)]
pub struct OrderTransitionData {
    pub ctx: RequestContext,
    pub order: Order,
}
