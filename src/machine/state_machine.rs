//! State machine that resolves transitions against a shared table.

use super::callbacks::Callbacks;
use crate::core::{Dimension, StateHistory, TransitionKey, TransitionRecord};
use crate::definition::WorkflowDefinition;
use crate::error::{ConstructionError, EngineError};
use crate::table::TransitionTable;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// One workflow instance: a current state plus a read-only table.
///
/// The current state is only ever the initial state or a value resolved by
/// a successful transition. Mutation goes through `&mut self`, so one
/// machine has a single owner; the table itself is shared through an `Arc`
/// and may back any number of machines.
///
/// # Example
///
/// ```rust
/// use waypoint::{StateMachine, TransitionTable};
///
/// let table: TransitionTable<String> = TransitionTable::from_triples(vec![
///     ("DRAFT".into(), "REQUESTER".into(), "SUBMIT".into(), "PENDING".into()),
///     ("PENDING".into(), "APPROVER".into(), "APPROVE".into(), "APPROVED".into()),
/// ])
/// .unwrap();
///
/// let mut machine = StateMachine::new(table, "DRAFT".to_string()).unwrap();
///
/// assert!(machine.can_move_next("REQUESTER", "SUBMIT"));
/// assert_eq!(machine.move_next("REQUESTER", "SUBMIT").unwrap(), "PENDING");
///
/// let err = machine.move_next("REQUESTER", "APPROVE").unwrap_err();
/// assert!(err.is_undefined_transition());
/// assert_eq!(machine.current_state(), "PENDING");
/// ```
#[derive(Debug)]
pub struct StateMachine<S, A = String, K = String> {
    id: Uuid,
    current: S,
    table: Arc<TransitionTable<S, A, K>>,
    history: StateHistory<S, A, K>,
}

impl<S: Dimension, A: Dimension, K: Dimension> StateMachine<S, A, K> {
    /// Create a machine in `initial` over an owned or shared table.
    ///
    /// Fails with `MissingInitialState` if `initial` is unset.
    pub fn new(
        table: impl Into<Arc<TransitionTable<S, A, K>>>,
        initial: S,
    ) -> Result<Self, EngineError> {
        if initial.is_unset() {
            return Err(ConstructionError::MissingInitialState {
                value: initial.name().into_owned(),
            }
            .into());
        }

        let table = table.into();
        let id = Uuid::new_v4();
        tracing::debug!(
            machine = %id,
            initial = %initial.name(),
            transitions = table.len(),
            "state machine created"
        );

        Ok(Self {
            id,
            current: initial,
            table,
            history: StateHistory::new(),
        })
    }

    /// Create a machine from a key map, validating the map first.
    pub fn from_entries(
        entries: HashMap<TransitionKey<S, A, K>, S>,
        initial: S,
    ) -> Result<Self, EngineError> {
        Self::new(TransitionTable::new(entries)?, initial)
    }

    /// Create a machine from a workflow definition, starting in its
    /// default state.
    pub fn from_definition<D>(definition: &D) -> Result<Self, EngineError>
    where
        D: WorkflowDefinition<State = S, Actor = A, Action = K>,
    {
        let table = TransitionTable::from_definitions(definition.transitions())?;
        Self::new(table, definition.default_state())
    }

    /// Replace the generated instance id, e.g. with the id of the entity
    /// this machine tracks.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn current_state(&self) -> &S {
        &self.current
    }

    pub fn table(&self) -> &Arc<TransitionTable<S, A, K>> {
        &self.table
    }

    /// Every transition applied so far, oldest first.
    ///
    /// The history is unbounded: one record is kept per applied transition
    /// for the lifetime of the machine.
    pub fn history(&self) -> &StateHistory<S, A, K> {
        &self.history
    }

    /// Check if the table defines no transition out of the current state.
    pub fn is_terminal(&self) -> bool {
        self.table.is_terminal(&self.current)
    }

    /// Transitions available from the current state, as
    /// `(actor, action, next)`. Unordered.
    pub fn available_transitions(&self) -> impl Iterator<Item = (&A, &K, &S)> {
        self.table.transitions_from(&self.current)
    }

    /// Check whether `actor` may perform `action` from the current state.
    ///
    /// Never mutates and never fails: unset inputs simply yield `false`.
    pub fn can_move_next(&self, actor: impl Into<A>, action: impl Into<K>) -> bool {
        let (actor, action) = (actor.into(), action.into());
        let allowed = self.resolve(&actor, &action).is_ok();
        tracing::trace!(
            machine = %self.id,
            state = %self.current.name(),
            actor = %actor.name(),
            action = %action.name(),
            allowed,
            "transition probe"
        );
        allowed
    }

    /// Apply the transition for `(current, actor, action)`.
    ///
    /// On a hit the current state becomes the mapped value, which is
    /// returned. On a miss this fails with `UndefinedTransition`; unset
    /// inputs fail with `InvalidKeyComponent`. Either way the current state
    /// is left unchanged.
    pub fn move_next(
        &mut self,
        actor: impl Into<A>,
        action: impl Into<K>,
    ) -> Result<&S, EngineError> {
        let (actor, action) = (actor.into(), action.into());
        let next = match self.resolve(&actor, &action) {
            Ok(next) => next.clone(),
            Err(err) => {
                tracing::debug!(machine = %self.id, error = %err, "transition rejected");
                return Err(err);
            }
        };
        Ok(self.apply(actor, action, next))
    }

    /// Apply the transition, reporting the outcome through callbacks
    /// instead of an error.
    ///
    /// On a hit the state is updated and the success callback receives the
    /// new state. On a miss, or with unset inputs, the failure callback runs
    /// and the state is unchanged. Returns the current state afterwards.
    pub fn move_next_with(
        &mut self,
        actor: impl Into<A>,
        action: impl Into<K>,
        callbacks: Callbacks<'_, S>,
    ) -> &S {
        match self.move_next(actor, action) {
            Ok(state) => callbacks.succeed(state),
            Err(err) => {
                if !err.is_undefined_transition() {
                    tracing::warn!(
                        machine = %self.id,
                        error = %err,
                        "invalid transition request routed to failure callback"
                    );
                }
                callbacks.fail();
            }
        }
        &self.current
    }

    fn resolve(&self, actor: &A, action: &K) -> Result<&S, EngineError> {
        self.table
            .lookup(&self.current, actor, action)?
            .ok_or_else(|| EngineError::UndefinedTransition {
                actor: actor.name().into_owned(),
                state: self.current.name().into_owned(),
                action: action.name().into_owned(),
            })
    }

    fn apply(&mut self, actor: A, action: K, next: S) -> &S {
        let from = std::mem::replace(&mut self.current, next.clone());
        tracing::debug!(
            machine = %self.id,
            from = %from.name(),
            to = %next.name(),
            actor = %actor.name(),
            action = %action.name(),
            "transition applied"
        );

        self.history = std::mem::take(&mut self.history).record(TransitionRecord {
            from,
            to: next,
            actor,
            action,
            timestamp: Utc::now(),
        });
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::KeyComponent;

    fn s(value: &str) -> String {
        value.to_string()
    }

    fn approval_table() -> TransitionTable<String> {
        TransitionTable::from_triples(vec![
            (s("UNKNOWN"), s("REQUESTER"), s("SAVE_DRAFT"), s("DRAFT")),
            (s("UNKNOWN"), s("REQUESTER"), s("SUBMIT"), s("PENDING")),
            (s("DRAFT"), s("REQUESTER"), s("SUBMIT"), s("PENDING")),
            (s("PENDING"), s("APPROVER"), s("APPROVE"), s("APPROVED")),
            (s("PENDING"), s("APPROVER"), s("REJECT"), s("REJECTED")),
            (s("REJECTED"), s("REQUESTER"), s("SUBMIT"), s("PENDING")),
        ])
        .unwrap()
    }

    fn machine() -> StateMachine<String> {
        StateMachine::new(approval_table(), s("UNKNOWN")).unwrap()
    }

    #[test]
    fn starts_in_initial_state() {
        let machine = machine();

        assert_eq!(machine.current_state(), "UNKNOWN");
        assert!(machine.history().is_empty());
        assert!(!machine.is_terminal());
    }

    #[test]
    fn cannot_create_machine_without_definitions() {
        let result = StateMachine::<String>::from_entries(HashMap::new(), s("DRAFT"));

        assert!(matches!(
            result,
            Err(EngineError::InvalidConstruction(
                ConstructionError::MissingDefinitions
            ))
        ));
    }

    #[test]
    fn cannot_create_machine_without_initial_state() {
        let result = StateMachine::new(approval_table(), String::new());

        assert!(matches!(
            result,
            Err(EngineError::InvalidConstruction(
                ConstructionError::MissingInitialState { .. }
            ))
        ));
    }

    #[test]
    fn move_next_advances_and_returns_new_state() {
        let mut machine = machine();

        assert_eq!(machine.move_next("REQUESTER", "SAVE_DRAFT").unwrap(), "DRAFT");
        assert_eq!(machine.move_next("REQUESTER", "SUBMIT").unwrap(), "PENDING");
        assert_eq!(machine.current_state(), "PENDING");
    }

    #[test]
    fn move_next_miss_leaves_state_unchanged() {
        let mut machine = machine();

        let err = machine.move_next("APPROVER", "APPROVE").unwrap_err();
        match err {
            EngineError::UndefinedTransition {
                actor,
                state,
                action,
            } => {
                assert_eq!(actor, "APPROVER");
                assert_eq!(state, "UNKNOWN");
                assert_eq!(action, "APPROVE");
            }
            other => panic!("Expected UndefinedTransition, got {other:?}"),
        }
        assert_eq!(machine.current_state(), "UNKNOWN");
        assert!(machine.history().is_empty());
    }

    #[test]
    fn move_next_rejects_unset_actor() {
        let mut machine = machine();

        let err = machine.move_next("", "SUBMIT").unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidKeyComponent {
                component: KeyComponent::Actor,
                ..
            }
        ));
        assert_eq!(machine.current_state(), "UNKNOWN");
    }

    #[test]
    fn can_move_next_never_mutates() {
        let machine = machine();

        assert!(machine.can_move_next("REQUESTER", "SUBMIT"));
        assert!(machine.can_move_next("REQUESTER", "SAVE_DRAFT"));
        assert!(!machine.can_move_next("APPROVER", "APPROVE"));
        assert!(!machine.can_move_next("", "SUBMIT"));
        assert_eq!(machine.current_state(), "UNKNOWN");
    }

    #[test]
    fn callback_variant_reports_success() {
        let mut machine = machine();
        let mut reached = None;
        let mut failed = false;

        let state = machine
            .move_next_with(
                "REQUESTER",
                "SUBMIT",
                Callbacks::new()
                    .on_success(|state: &String| reached = Some(state.clone()))
                    .on_failure(|| failed = true),
            )
            .clone();

        assert_eq!(state, "PENDING");
        assert_eq!(reached.as_deref(), Some("PENDING"));
        assert!(!failed);
    }

    #[test]
    fn callback_variant_reports_miss_without_mutation() {
        let mut machine = machine();
        let mut reached: Option<String> = None;
        let mut failed = false;

        let state = machine
            .move_next_with(
                "APPROVER",
                "APPROVE",
                Callbacks::new()
                    .on_success(|state: &String| reached = Some(state.clone()))
                    .on_failure(|| failed = true),
            )
            .clone();

        assert_eq!(state, "UNKNOWN");
        assert!(reached.is_none());
        assert!(failed);
    }

    #[test]
    fn callback_variant_routes_invalid_key_to_failure() {
        let mut machine = machine();
        let mut failed = false;

        machine.move_next_with("REQUESTER", "", Callbacks::new().on_failure(|| failed = true));

        assert!(failed);
        assert_eq!(machine.current_state(), "UNKNOWN");
    }

    #[test]
    fn callbacks_are_optional() {
        let mut machine = machine();

        assert_eq!(
            machine.move_next_with("REQUESTER", "SUBMIT", Callbacks::new()),
            "PENDING"
        );
        assert_eq!(
            machine.move_next_with("REQUESTER", "SUBMIT", Callbacks::default()),
            "PENDING"
        );
    }

    #[test]
    fn history_records_each_applied_transition() {
        let mut machine = machine();
        machine.move_next("REQUESTER", "SUBMIT").unwrap();
        machine.move_next("APPROVER", "REJECT").unwrap();
        let _ = machine.move_next("APPROVER", "APPROVE");

        let history = machine.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history.path(), vec!["UNKNOWN", "PENDING", "REJECTED"]);

        let last = history.last().unwrap();
        assert_eq!(last.actor, "APPROVER");
        assert_eq!(last.action, "REJECT");
    }

    #[test]
    fn available_transitions_follow_current_state() {
        let mut machine = machine();
        machine.move_next("REQUESTER", "SUBMIT").unwrap();

        let mut actions: Vec<_> = machine
            .available_transitions()
            .map(|(actor, action, _)| (actor.clone(), action.clone()))
            .collect();
        actions.sort();

        assert_eq!(
            actions,
            vec![(s("APPROVER"), s("APPROVE")), (s("APPROVER"), s("REJECT"))]
        );
    }

    #[test]
    fn terminal_state_has_no_available_transitions() {
        let mut machine = machine();
        machine.move_next("REQUESTER", "SUBMIT").unwrap();
        machine.move_next("APPROVER", "APPROVE").unwrap();

        assert!(machine.is_terminal());
        assert_eq!(machine.available_transitions().count(), 0);
    }

    #[test]
    fn machines_share_one_table() {
        let table = Arc::new(approval_table());
        let mut first = StateMachine::new(Arc::clone(&table), s("UNKNOWN")).unwrap();
        let second = StateMachine::new(Arc::clone(&table), s("DRAFT")).unwrap();

        first.move_next("REQUESTER", "SUBMIT").unwrap();

        assert_eq!(first.current_state(), "PENDING");
        assert_eq!(second.current_state(), "DRAFT");
        assert!(Arc::ptr_eq(first.table(), second.table()));
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn with_id_overrides_generated_id() {
        let id = Uuid::new_v4();
        let machine = machine().with_id(id);
        assert_eq!(machine.id(), id);
    }

    #[test]
    fn integer_state_zero_is_a_valid_initial_state() {
        let table: TransitionTable<u32, u8, u8> =
            TransitionTable::from_triples(vec![(0, 1, 1, 1), (1, 1, 2, 0)]).unwrap();
        let mut machine = StateMachine::new(table, 0).unwrap();

        assert_eq!(*machine.move_next(1u8, 1u8).unwrap(), 1);
        assert_eq!(*machine.move_next(1u8, 2u8).unwrap(), 0);
    }

    #[test]
    fn optional_initial_state_none_is_rejected() {
        let table: TransitionTable<Option<u32>> =
            TransitionTable::from_triples(vec![(Some(0), s("clerk"), s("open"), Some(1))]).unwrap();

        let result = StateMachine::new(table, None);
        assert!(matches!(
            result,
            Err(EngineError::InvalidConstruction(
                ConstructionError::MissingInitialState { .. }
            ))
        ));
    }
}
