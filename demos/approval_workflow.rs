//! Purchase Approval Workflow
//!
//! This example drives a requester/approver workflow through the engine.
//!
//! Key concepts:
//! - Typed states and roles via `dimension_enum!`
//! - Strict transitions (`move_next`) vs. callback transitions (`move_next_with`)
//! - Pre-validating actions with `can_move_next`
//! - One shared table backing several workflow instances
//!
//! Run with: RUST_LOG=debug cargo run --example approval_workflow

use std::sync::Arc;
use waypoint::core::Dimension;
use waypoint::{dimension_enum, transition_table, Callbacks, StateMachine, TransitionTable};

dimension_enum! {
    enum Status {
        Unknown,
        Draft,
        Pending,
        Approved,
        Rejected,
    }
}

dimension_enum! {
    enum Role {
        Requester,
        Approver,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Purchase Approval Workflow ===\n");

    let table: TransitionTable<Status, Role, String> = transition_table! {
        (Status::Unknown, Role::Requester, "SAVE_DRAFT") => Status::Draft,
        (Status::Unknown, Role::Requester, "SUBMIT") => Status::Pending,
        (Status::Draft, Role::Requester, "SUBMIT") => Status::Pending,
        (Status::Pending, Role::Approver, "APPROVE") => Status::Approved,
        (Status::Pending, Role::Approver, "REJECT") => Status::Rejected,
        (Status::Rejected, Role::Requester, "SUBMIT") => Status::Pending,
    }
    .expect("approval table is valid");
    let table = Arc::new(table);

    // Example 1: strict API
    println!("Example 1: Strict transitions");
    let mut order = StateMachine::new(Arc::clone(&table), Status::Unknown).expect("valid initial state");

    for (actor, action) in [
        (Role::Requester, "SUBMIT"),
        (Role::Approver, "REJECT"),
        (Role::Requester, "SUBMIT"),
        (Role::Approver, "APPROVE"),
        (Role::Approver, "SAVE_DRAFT"),
    ] {
        match order.move_next(actor, action) {
            Ok(state) => println!("  {} {} -> {}", actor.name(), action, state.name()),
            Err(err) => println!("  rejected: {err}"),
        }
    }
    println!("  final state: {}\n", order.current_state().name());

    // Example 2: callback API
    println!("Example 2: Callback transitions");
    let mut invoice = StateMachine::new(Arc::clone(&table), Status::Unknown).expect("valid initial state");

    for (actor, action) in [(Role::Approver, "APPROVE"), (Role::Requester, "SAVE_DRAFT")] {
        invoice.move_next_with(
            actor,
            action,
            Callbacks::new()
                .on_success(|state: &Status| println!("  {} {} -> {}", actor.name(), action, state.name()))
                .on_failure(|| println!("  {} may not {} here", actor.name(), action)),
        );
    }
    println!();

    // Example 3: enabling controls
    println!("Example 3: Available actions from {}", invoice.current_state().name());
    for (actor, action, next) in invoice.available_transitions() {
        println!("  {} can {} (-> {})", actor.name(), action, next.name());
    }
    println!(
        "  approver may approve: {}",
        invoice.can_move_next(Role::Approver, "APPROVE")
    );

    println!("\n=== Summary ===");
    println!(
        "order visited: {}",
        order
            .history()
            .path()
            .iter()
            .map(|state| state.name())
            .collect::<Vec<_>>()
            .join(" -> ")
    );
}
