//! Entry validation for table construction.
//!
//! Raw triples are checked with `Validation` so that every bad entry is
//! reported at once instead of stopping at the first one.

use crate::core::{Dimension, KeyComponent};
use crate::error::{ConstructionError, EntryError};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type EntryCheck = Validation<(), NonEmptyVec<EntryError>>;

fn check_component<D: Dimension>(index: usize, component: KeyComponent, value: &D) -> EntryCheck {
    if value.is_unset() {
        Validation::fail(EntryError::UnsetComponent {
            index,
            component,
            value: value.name().into_owned(),
        })
    } else {
        Validation::success(())
    }
}

fn check_target<S: Dimension>(index: usize, next: &S) -> EntryCheck {
    if next.is_unset() {
        Validation::fail(EntryError::UnsetTarget {
            index,
            value: next.name().into_owned(),
        })
    } else {
        Validation::success(())
    }
}

/// Check every `(state, actor, action, next)` entry, accumulating ALL
/// failures into a single `InvalidEntries` error.
pub(crate) fn validate_triples<S, A, K>(triples: &[(S, A, K, S)]) -> Result<(), ConstructionError>
where
    S: Dimension,
    A: Dimension,
    K: Dimension,
{
    let checks: Vec<EntryCheck> = triples
        .iter()
        .enumerate()
        .flat_map(|(index, (state, actor, action, next))| {
            [
                check_component(index, KeyComponent::State, state),
                check_component(index, KeyComponent::Actor, actor),
                check_component(index, KeyComponent::Action, action),
                check_target(index, next),
            ]
        })
        .collect();

    match Validation::all_vec(checks) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(ConstructionError::InvalidEntries(
            errors.iter().cloned().collect(),
        )),
    }
}
