//! End-to-end approval workflow tests across every construction path and
//! both failure-reporting styles.

use std::sync::Arc;
use waypoint::builder::MachineBuilder;
use waypoint::core::Dimension;
use waypoint::{
    dimension_enum, transition_table, Callbacks, EngineError, StateMachine, TableDefinition,
    TransitionTable,
};

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

fn text_table() -> TransitionTable<String> {
    transition_table! {
        ("UNKNOWN", "REQUESTER", "SAVE_DRAFT") => "DRAFT",
        ("UNKNOWN", "REQUESTER", "SUBMIT") => "PENDING",
        ("DRAFT", "REQUESTER", "SUBMIT") => "PENDING",
        ("PENDING", "APPROVER", "APPROVE") => "APPROVED",
        ("PENDING", "APPROVER", "REJECT") => "REJECTED",
        ("REJECTED", "REQUESTER", "SUBMIT") => "PENDING",
    }
    .unwrap()
}

fn typed_table() -> TransitionTable<Status, Role, String> {
    transition_table! {
        (Status::Unknown, Role::Requester, "SAVE_DRAFT") => Status::Draft,
        (Status::Unknown, Role::Requester, "SUBMIT") => Status::Pending,
        (Status::Draft, Role::Requester, "SUBMIT") => Status::Pending,
        (Status::Pending, Role::Approver, "APPROVE") => Status::Approved,
        (Status::Pending, Role::Approver, "REJECT") => Status::Rejected,
        (Status::Rejected, Role::Requester, "SUBMIT") => Status::Pending,
    }
    .unwrap()
}

#[test]
fn approval_scenario_with_strict_api() {
    let mut machine = StateMachine::new(text_table(), "UNKNOWN".to_string()).unwrap();

    assert_eq!(machine.move_next("REQUESTER", "SUBMIT").unwrap(), "PENDING");
    assert_eq!(machine.move_next("APPROVER", "REJECT").unwrap(), "REJECTED");
    assert_eq!(machine.move_next("REQUESTER", "SUBMIT").unwrap(), "PENDING");
    assert_eq!(machine.move_next("APPROVER", "APPROVE").unwrap(), "APPROVED");

    let err = machine.move_next("APPROVER", "SAVE_DRAFT").unwrap_err();
    assert!(matches!(err, EngineError::UndefinedTransition { .. }));
    assert_eq!(err.to_string(), "Undefined transition: APPROVER>APPROVED>SAVE_DRAFT");
    assert_eq!(machine.current_state(), "APPROVED");
    assert!(machine.is_terminal());

    assert_eq!(
        machine.history().path(),
        vec!["UNKNOWN", "PENDING", "REJECTED", "PENDING", "APPROVED"]
    );
}

#[test]
fn approval_scenario_with_callback_api() {
    let mut machine = StateMachine::new(typed_table(), Status::Unknown).unwrap();
    let mut visited = Vec::new();
    let mut failures = 0;

    for (actor, action) in [
        (Role::Requester, "SUBMIT"),
        (Role::Approver, "REJECT"),
        (Role::Requester, "SUBMIT"),
        (Role::Approver, "APPROVE"),
        (Role::Approver, "SAVE_DRAFT"),
    ] {
        machine.move_next_with(
            actor,
            action,
            Callbacks::new()
                .on_success(|state: &Status| visited.push(*state))
                .on_failure(|| failures += 1),
        );
    }

    assert_eq!(
        visited,
        vec![
            Status::Pending,
            Status::Rejected,
            Status::Pending,
            Status::Approved
        ]
    );
    assert_eq!(failures, 1);
    assert_eq!(*machine.current_state(), Status::Approved);
}

#[test]
fn can_move_next_tracks_permitted_actions() {
    let mut machine = StateMachine::new(typed_table(), Status::Unknown).unwrap();

    assert!(machine.can_move_next(Role::Requester, "SAVE_DRAFT"));
    assert!(!machine.can_move_next(Role::Approver, "APPROVE"));

    machine.move_next(Role::Requester, "SUBMIT").unwrap();

    assert!(machine.can_move_next(Role::Approver, "APPROVE"));
    assert!(!machine.can_move_next(Role::Requester, "SUBMIT"));
    assert_eq!(*machine.current_state(), Status::Pending);
}

#[test]
fn default_enum_member_is_a_legitimate_state() {
    // Unknown is the first variant, yet it is a real state here.
    assert!(!Status::Unknown.is_unset());

    let machine = StateMachine::new(typed_table(), Status::Unknown).unwrap();
    assert_eq!(*machine.current_state(), Status::Unknown);
}

#[test]
fn json_definition_drives_same_scenario() {
    let json = r#"{
        "initial": "Unknown",
        "transitions": [
            {"from": "Unknown", "actor": "Requester", "action": "SUBMIT", "to": "Pending"},
            {"from": "Pending", "actor": "Approver", "action": "REJECT", "to": "Rejected"},
            {"from": "Rejected", "actor": "Requester", "action": "SUBMIT", "to": "Pending"},
            {"from": "Pending", "actor": "Approver", "action": "APPROVE", "to": "Approved"}
        ]
    }"#;

    let definition: TableDefinition<Status, Role, String> = TableDefinition::from_json(json).unwrap();
    let mut machine = StateMachine::from_definition(&definition).unwrap();

    machine.move_next(Role::Requester, "SUBMIT").unwrap();
    machine.move_next(Role::Approver, "REJECT").unwrap();
    machine.move_next(Role::Requester, "SUBMIT").unwrap();
    machine.move_next(Role::Approver, "APPROVE").unwrap();

    assert_eq!(*machine.current_state(), Status::Approved);
}

#[test]
fn builder_drives_same_scenario() {
    let mut machine = MachineBuilder::<String>::new()
        .initial("UNKNOWN")
        .transition("UNKNOWN", "REQUESTER", "SUBMIT", "PENDING")
        .transition("PENDING", "APPROVER", "APPROVE", "APPROVED")
        .build()
        .unwrap();

    machine.move_next("REQUESTER", "SUBMIT").unwrap();
    machine.move_next("APPROVER", "APPROVE").unwrap();

    assert_eq!(machine.current_state(), "APPROVED");
}

#[tokio::test]
async fn shared_table_serves_concurrent_machines() {
    let table = Arc::new(text_table());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let table = Arc::clone(&table);
            tokio::spawn(async move {
                let mut machine = StateMachine::new(table, "UNKNOWN".to_string()).unwrap();
                machine.move_next("REQUESTER", "SUBMIT").unwrap();
                if i % 2 == 0 {
                    machine.move_next("APPROVER", "APPROVE").unwrap();
                } else {
                    machine.move_next("APPROVER", "REJECT").unwrap();
                }
                machine.current_state().clone()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let state = handle.await.unwrap();
        let expected = if i % 2 == 0 { "APPROVED" } else { "REJECTED" };
        assert_eq!(state, expected);
    }
    assert_eq!(Arc::strong_count(&table), 1);
}
