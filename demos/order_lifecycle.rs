//! Order Lifecycle
//!
//! This example drives an order from an empty basket to fulfilment.
//!
//! Key concepts:
//! - The built-in order graph extended with a configured `Shipped` state
//! - A process strategy guard layered over the built-in payment rules
//! - Downstream services invoked after each committed transition
//!
//! Run with: cargo run --example order_lifecycle

use async_trait::async_trait;
use futures::FutureExt;
use lifecycle_fsm::core::TransitionOutcome;
use lifecycle_fsm::order::*;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// In-memory services
#[derive(Default)]
struct Warehouse {
    reserved: Mutex<Vec<String>>,
}

#[async_trait]
impl StockMovementService for Warehouse {
    async fn create_sales_for_order(
        &self,
        _ctx: &RequestContext,
        order: &Order,
    ) -> Result<(), ServiceError> {
        let units: u32 = order.lines.iter().map(|line| line.quantity).sum();
        println!("  [Stock] Allocating {} unit(s) for {}", units, order.code);
        self.reserved
            .lock()
            .map_err(|_| ServiceError::new("stock", "ledger poisoned"))?
            .push(order.code.clone());
        Ok(())
    }
}

struct Promotions;

#[async_trait]
impl PromotionService for Promotions {
    async fn add_promotions_to_order(
        &self,
        _ctx: &RequestContext,
        order: &Order,
    ) -> Result<(), ServiceError> {
        println!("  [Promotions] Applying promotions to {}", order.code);
        Ok(())
    }
}

struct AuditLog;

#[async_trait]
impl HistoryService for AuditLog {
    async fn create_history_entry_for_order(
        &self,
        _ctx: &RequestContext,
        entry: OrderHistoryEntry,
    ) -> Result<(), ServiceError> {
        println!(
            "  [History] {} -> {}",
            entry.transition.from, entry.transition.to
        );
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Order Lifecycle ===\n");

    let warehouse = Arc::new(Warehouse::default());
    let services = OrderServices {
        stock_movements: warehouse.clone(),
        promotions: Arc::new(Promotions),
        history: Arc::new(AuditLog),
    };

    // Shipping needs a settled payment; a strategy guard keeps large
    // orders from shipping until they are fully fulfilled.
    let process = OrderHooks::new().on_transition_start(|_, to, data| {
        let units: u32 = data.order.lines.iter().map(|line| line.quantity).sum();
        let outcome = if *to == OrderState::custom("Shipped") && units > 10 {
            TransitionOutcome::reject_with("error.large-orders-ship-when-fulfilled")
        } else {
            TransitionOutcome::Proceed
        };
        async move { outcome }.boxed()
    });

    let options = OrderOptions::default()
        .with_transitions_json(
            r#"{
                "PaymentSettled": { "to": ["Shipped"] },
                "Fulfilled": { "to": ["Shipped"] },
                "Shipped": { "to": [] }
            }"#,
        )?
        .with_process(process);
    let machine = OrderStateMachine::new(options, services)?;
    let ctx = RequestContext::default();

    println!("Rejected: paying for an empty basket");
    let mut empty = Order::new("ORD-1");
    if let Err(err) = machine
        .transition(&ctx, &mut empty, OrderState::ArrangingPayment)
        .await
    {
        println!("  {}", err);
    }
    println!("  still in {}\n", empty.state);

    println!("Happy path");
    let mut order = Order::new("ORD-2")
        .with_line(Uuid::new_v4(), 2)
        .with_customer("sam@example.com");
    for state in [
        OrderState::ArrangingPayment,
        OrderState::PaymentSettled,
        OrderState::custom("Shipped"),
    ] {
        machine.transition(&ctx, &mut order, state).await?;
    }
    println!(
        "  {} is {} (active: {}, placed: {})\n",
        order.code,
        order.state,
        order.active,
        order.order_placed_at.is_some()
    );

    println!("Strategy guard: large order");
    let mut bulk = Order::new("ORD-3")
        .with_line(Uuid::new_v4(), 40)
        .with_customer("kim@example.com");
    machine
        .transition(&ctx, &mut bulk, OrderState::ArrangingPayment)
        .await?;
    machine
        .transition(&ctx, &mut bulk, OrderState::PaymentSettled)
        .await?;
    if let Err(err) = machine
        .transition(&ctx, &mut bulk, OrderState::custom("Shipped"))
        .await
    {
        println!("  {}", err);
    }
    println!("  next: {:?}", machine.next_states(&bulk));

    println!("\n=== Done ===");
    Ok(())
}
