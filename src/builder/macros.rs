//! Macros for ergonomic table construction.

/// Generate a `Dimension` implementation for simple enums.
///
/// The enum also derives `Clone, Copy, PartialEq, Eq, Hash, Debug` and
/// serde's `Serialize`/`Deserialize`. Variants listed under `unset` are
/// treated as "absent" and rejected as key components and states.
///
/// # Example
///
/// ```
/// use waypoint::dimension_enum;
/// use waypoint::core::Dimension;
///
/// dimension_enum! {
///     pub enum Role {
///         Nobody,
///         Requester,
///         Approver,
///     }
///     unset: [Nobody]
/// }
///
/// assert!(Role::Nobody.is_unset());
/// assert_eq!(Role::Approver.name(), "Approver");
/// ```
#[macro_export]
macro_rules! dimension_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(unset: [$($unset:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Dimension for $name {
            fn name(&self) -> ::std::borrow::Cow<'_, str> {
                match self {
                    $(Self::$variant => ::std::borrow::Cow::Borrowed(stringify!($variant))),*
                }
            }

            #[allow(unreachable_patterns)]
            fn is_unset(&self) -> bool {
                match self {
                    $($(Self::$unset => true,)*)?
                    _ => false,
                }
            }
        }
    };
}

/// Build a `TransitionTable` from `(state, actor, action) => next` entries.
///
/// Each component goes through `Into`, so text tables can be written with
/// string literals. Expands to `TransitionTable::from_triples`, returning
/// `Result<TransitionTable<..>, EngineError>`; annotate the binding so the
/// component types can be inferred.
///
/// # Example
///
/// ```
/// use waypoint::{transition_table, TransitionTable};
///
/// let table: TransitionTable<String> = transition_table! {
///     ("DRAFT", "REQUESTER", "SUBMIT") => "PENDING",
///     ("PENDING", "APPROVER", "APPROVE") => "APPROVED",
/// }
/// .unwrap();
///
/// assert_eq!(table.len(), 2);
/// ```
#[macro_export]
macro_rules! transition_table {
    (
        $( ($state:expr, $actor:expr, $action:expr) => $next:expr ),+ $(,)?
    ) => {
        $crate::table::TransitionTable::from_triples(::std::vec![
            $( (
                ::std::convert::Into::into($state),
                ::std::convert::Into::into($actor),
                ::std::convert::Into::into($action),
                ::std::convert::Into::into($next),
            ) ),+
        ])
    };
}
