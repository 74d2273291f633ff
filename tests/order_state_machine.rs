//! End-to-end tests for the order state machine against in-memory services.

use async_trait::async_trait;
use futures::FutureExt;
use lifecycle_fsm::core::{State, StateHistory, TransitionGraph, TransitionOutcome};
use lifecycle_fsm::order::*;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Default)]
struct Recorder {
    stock_sales: Mutex<Vec<Uuid>>,
    promotions: Mutex<Vec<Uuid>>,
    history: Mutex<StateHistory<OrderState>>,
    entries: Mutex<Vec<OrderHistoryEntry>>,
    fail_stock: bool,
}

#[async_trait]
impl StockMovementService for Recorder {
    async fn create_sales_for_order(
        &self,
        _ctx: &RequestContext,
        order: &Order,
    ) -> Result<(), ServiceError> {
        if self.fail_stock {
            return Err(ServiceError::new("stock", "warehouse offline"));
        }
        self.stock_sales.lock().unwrap().push(order.id);
        Ok(())
    }
}

#[async_trait]
impl PromotionService for Recorder {
    async fn add_promotions_to_order(
        &self,
        _ctx: &RequestContext,
        order: &Order,
    ) -> Result<(), ServiceError> {
        self.promotions.lock().unwrap().push(order.id);
        Ok(())
    }
}

#[async_trait]
impl HistoryService for Recorder {
    async fn create_history_entry_for_order(
        &self,
        _ctx: &RequestContext,
        entry: OrderHistoryEntry,
    ) -> Result<(), ServiceError> {
        let mut history = self.history.lock().unwrap();
        *history = history.record(entry.transition.clone());
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }
}

fn services(recorder: &Arc<Recorder>) -> OrderServices {
    OrderServices {
        stock_movements: recorder.clone(),
        promotions: recorder.clone(),
        history: recorder.clone(),
    }
}

fn machine(options: OrderOptions) -> (OrderStateMachine, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let machine = OrderStateMachine::new(options, services(&recorder)).unwrap();
    (machine, recorder)
}

fn ready_order() -> Order {
    Order::new("T_1")
        .with_line(Uuid::new_v4(), 2)
        .with_customer("hayden@example.com")
}

fn ctx() -> RequestContext {
    RequestContext::default()
}

#[tokio::test]
async fn empty_order_cannot_arrange_payment() {
    let (machine, recorder) = machine(OrderOptions::default());
    let mut order = Order::new("T_1").with_customer("hayden@example.com");
    let before = order.clone();

    for _ in 0..2 {
        let err = machine
            .transition(&ctx(), &mut order, OrderState::ArrangingPayment)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            OrderStateError::IllegalOperation {
                message: "error.cannot-transition-to-payment-when-order-is-empty".to_string(),
                from: OrderState::AddingItems,
                to: OrderState::ArrangingPayment,
            }
        );
    }

    assert_eq!(order, before);
    assert!(recorder.entries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn order_without_customer_cannot_arrange_payment() {
    let (machine, _) = machine(OrderOptions::default());
    let mut order = Order::new("T_1").with_line(Uuid::new_v4(), 1);

    let err = machine
        .transition(&ctx(), &mut order, OrderState::ArrangingPayment)
        .await
        .unwrap_err();

    assert_eq!(err.message(), Some(NO_CUSTOMER_PAYMENT));
    assert_eq!(order.state, OrderState::AddingItems);
}

#[tokio::test]
async fn unreachable_state_uses_default_message() {
    let (machine, _) = machine(OrderOptions::default());
    let mut order = ready_order();

    let err = machine
        .transition(&ctx(), &mut order, OrderState::Fulfilled)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        OrderStateError::illegal_transition(
            &OrderState::AddingItems,
            &OrderState::Fulfilled,
            None
        )
    );
    assert_eq!(err.message(), Some(CANNOT_TRANSITION));
    assert_eq!(order.state, OrderState::AddingItems);
}

#[tokio::test]
async fn payment_authorized_places_the_order() {
    let (machine, recorder) = machine(OrderOptions::default());
    let mut order = ready_order();

    machine
        .transition(&ctx(), &mut order, OrderState::ArrangingPayment)
        .await
        .unwrap();
    assert!(order.active);
    assert!(order.order_placed_at.is_none());

    machine
        .transition(&ctx(), &mut order, OrderState::PaymentAuthorized)
        .await
        .unwrap();

    assert_eq!(order.state, OrderState::PaymentAuthorized);
    assert!(!order.active);
    assert!(order.order_placed_at.is_some());
    assert_eq!(*recorder.stock_sales.lock().unwrap(), vec![order.id]);
    assert_eq!(*recorder.promotions.lock().unwrap(), vec![order.id]);

    let entries = recorder.entries.lock().unwrap();
    assert_eq!(entries.len(), 2);
    let last = &entries[1];
    assert_eq!(last.order_id, order.id);
    assert_eq!(last.entry_type, HistoryEntryType::OrderStateTransition);
    assert_eq!(last.transition.from, OrderState::ArrangingPayment);
    assert_eq!(last.transition.to, OrderState::PaymentAuthorized);
}

#[tokio::test]
async fn every_transition_is_recorded_in_order() {
    let (machine, recorder) = machine(OrderOptions::default());
    let mut order = ready_order();

    for state in [
        OrderState::ArrangingPayment,
        OrderState::AddingItems,
        OrderState::ArrangingPayment,
        OrderState::PaymentSettled,
        OrderState::PartiallyFulfilled,
        OrderState::Fulfilled,
    ] {
        machine.transition(&ctx(), &mut order, state).await.unwrap();
    }

    let history = recorder.history.lock().unwrap();
    let path: Vec<&str> = history.get_path().iter().map(|s| s.name()).collect();
    assert_eq!(
        path,
        vec![
            "AddingItems",
            "ArrangingPayment",
            "AddingItems",
            "ArrangingPayment",
            "PaymentSettled",
            "PartiallyFulfilled",
            "Fulfilled",
        ]
    );
    assert_eq!(recorder.stock_sales.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn cancelling_deactivates_without_placing() {
    let (machine, recorder) = machine(OrderOptions::default());
    let mut order = ready_order();

    machine
        .transition(&ctx(), &mut order, OrderState::Cancelled)
        .await
        .unwrap();

    assert_eq!(order.state, OrderState::Cancelled);
    assert!(!order.active);
    assert!(order.order_placed_at.is_none());
    assert!(recorder.stock_sales.lock().unwrap().is_empty());
    assert_eq!(recorder.entries.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn downstream_failure_leaves_order_untouched() {
    let recorder = Arc::new(Recorder {
        fail_stock: true,
        ..Recorder::default()
    });
    let machine = OrderStateMachine::new(OrderOptions::default(), services(&recorder)).unwrap();
    let mut order = ready_order();
    order.state = OrderState::ArrangingPayment;
    let before = order.clone();

    let err = machine
        .transition(&ctx(), &mut order, OrderState::PaymentSettled)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        OrderStateError::Downstream(ServiceError::new("stock", "warehouse offline"))
    );
    assert_eq!(order, before);
    assert!(recorder.entries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn configured_guard_runs_before_built_in_rule() {
    let hooks = OrderHooks::new().on_transition_start(|_, to, _| {
        let outcome = if *to == OrderState::ArrangingPayment {
            TransitionOutcome::reject_with("error.payment-disabled")
        } else {
            TransitionOutcome::Proceed
        };
        async move { outcome }.boxed()
    });
    let (machine, _) = machine(OrderOptions::default().with_hooks(hooks));

    // An empty order would also fail the built-in rule; the configured guard wins.
    let mut order = Order::new("T_1");
    let err = machine
        .transition(&ctx(), &mut order, OrderState::ArrangingPayment)
        .await
        .unwrap_err();

    assert_eq!(err.message(), Some("error.payment-disabled"));
}

#[tokio::test]
async fn built_in_rule_still_applies_after_configured_guard_proceeds() {
    let hooks = OrderHooks::new()
        .on_transition_start(|_, _, _| async { TransitionOutcome::Proceed }.boxed());
    let (machine, _) = machine(OrderOptions::default().with_hooks(hooks));

    let mut order = Order::new("T_1");
    let err = machine
        .transition(&ctx(), &mut order, OrderState::ArrangingPayment)
        .await
        .unwrap_err();

    assert_eq!(err.message(), Some(EMPTY_ORDER_PAYMENT));
}

#[tokio::test]
async fn process_strategy_takes_priority_over_configuration() {
    let calls = Arc::new(Mutex::new(Vec::<&'static str>::new()));

    let config_calls = calls.clone();
    let config_end_calls = calls.clone();
    let hooks = OrderHooks::new()
        .on_transition_start(move |_, _, _| {
            config_calls.lock().unwrap().push("config-start");
            async { TransitionOutcome::Proceed }.boxed()
        })
        .on_transition_end(move |_, _, _| {
            config_end_calls.lock().unwrap().push("config-end");
            async { Ok(()) }.boxed()
        });

    let process_calls = calls.clone();
    let process_end_calls = calls.clone();
    let process = OrderHooks::new()
        .on_transition_start(move |_, _, _| {
            process_calls.lock().unwrap().push("process-start");
            async { TransitionOutcome::Proceed }.boxed()
        })
        .on_transition_end(move |_, _, _| {
            process_end_calls.lock().unwrap().push("process-end");
            async { Ok(()) }.boxed()
        });

    let (machine, _) = machine(
        OrderOptions::default()
            .with_hooks(hooks)
            .with_process(process),
    );
    let mut order = ready_order();
    machine
        .transition(&ctx(), &mut order, OrderState::ArrangingPayment)
        .await
        .unwrap();

    assert_eq!(*calls.lock().unwrap(), vec!["process-start", "process-end"]);
}

#[tokio::test]
async fn process_error_hook_replaces_configured_one() {
    let calls = Arc::new(Mutex::new(Vec::<&'static str>::new()));

    let config_calls = calls.clone();
    let hooks = OrderHooks::new().on_error(move |_, _, _| {
        config_calls.lock().unwrap().push("config");
        Ok(())
    });
    let process_calls = calls.clone();
    let process = OrderHooks::new().on_error(move |_, _, _| {
        process_calls.lock().unwrap().push("process");
        Ok(())
    });

    let (machine, _) = machine(
        OrderOptions::default()
            .with_hooks(hooks)
            .with_process(process),
    );
    let mut order = ready_order();
    let err = machine
        .transition(&ctx(), &mut order, OrderState::Fulfilled)
        .await
        .unwrap_err();

    assert_eq!(*calls.lock().unwrap(), vec!["process"]);
    assert_eq!(
        err,
        OrderStateError::IllegalOperation {
            message: CANNOT_TRANSITION.to_string(),
            from: OrderState::AddingItems,
            to: OrderState::Fulfilled,
        }
    );
    assert_eq!(order.state, OrderState::AddingItems);
}

#[tokio::test]
async fn end_hook_sees_committed_transition_and_can_edit_order() {
    let hooks = OrderHooks::new().on_transition_end(|from, to, data| {
        data.order.code = format!("{}:{}->{}", data.order.code, from, to);
        async { Ok(()) }.boxed()
    });
    let (machine, recorder) = machine(OrderOptions::default().with_hooks(hooks));
    let mut order = ready_order();

    machine
        .transition(&ctx(), &mut order, OrderState::ArrangingPayment)
        .await
        .unwrap();

    assert_eq!(order.code, "T_1:AddingItems->ArrangingPayment");
    assert_eq!(recorder.entries.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn error_hook_is_notified_before_failure_is_raised() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let hooks = OrderHooks::new().on_error(move |from, to, message| {
        sink.lock().unwrap().push((
            from.clone(),
            to.clone(),
            message.map(str::to_string),
        ));
        Ok(())
    });
    let (machine, _) = machine(OrderOptions::default().with_hooks(hooks));
    let mut order = Order::new("T_1");

    let result = machine
        .transition(&ctx(), &mut order, OrderState::ArrangingPayment)
        .await;

    assert!(result.is_err());
    assert_eq!(
        *seen.lock().unwrap(),
        vec![(
            OrderState::AddingItems,
            OrderState::ArrangingPayment,
            Some(EMPTY_ORDER_PAYMENT.to_string())
        )]
    );
}

#[tokio::test]
async fn custom_states_extend_the_graph() {
    let shipped = OrderState::custom("Shipped");
    let options = OrderOptions::default().with_transitions(
        TransitionGraph::new()
            .with(OrderState::PaymentSettled, [shipped.clone()])
            .with(shipped.clone(), [OrderState::Fulfilled]),
    );
    let (machine, _) = machine(options);

    assert_eq!(
        machine.transitions().next_states(&OrderState::PaymentSettled),
        &[
            OrderState::PartiallyFulfilled,
            OrderState::Fulfilled,
            OrderState::Cancelled,
            shipped.clone(),
        ]
    );

    let mut order = ready_order();
    order.state = OrderState::PaymentSettled;
    machine
        .transition(&ctx(), &mut order, shipped.clone())
        .await
        .unwrap();
    assert_eq!(order.state, shipped);
    assert_eq!(machine.next_states(&order), vec![OrderState::Fulfilled]);
}

#[test]
fn dangling_custom_state_is_a_configuration_error() {
    let recorder = Arc::new(Recorder::default());
    let options = OrderOptions::default()
        .with_transitions_json(r#"{ "PaymentSettled": { "to": ["Shipped"] } }"#)
        .unwrap();

    let result = OrderStateMachine::new(options, services(&recorder));

    assert!(matches!(result, Err(OrderStateError::InvalidConfig(_))));
}

#[test]
fn queries_follow_the_merged_graph() {
    let (machine, _) = machine(OrderOptions::default());

    assert_eq!(OrderStateMachine::initial_state(), OrderState::AddingItems);
    assert!(machine.can_transition(&OrderState::AddingItems, &OrderState::ArrangingPayment));
    assert!(!machine.can_transition(&OrderState::Cancelled, &OrderState::AddingItems));
    assert_eq!(
        machine.next_states(&Order::new("T_1")),
        vec![OrderState::ArrangingPayment, OrderState::Cancelled]
    );
}
