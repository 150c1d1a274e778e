//! The `Dimension` trait for transition key components.
//!
//! Every state, actor and action type used with the engine implements this
//! trait. It supplies a display name for diagnostics and an explicit
//! "unset" predicate, so that no type's ordinary values (such as integer 0)
//! are ever treated as missing by accident.

use std::borrow::Cow;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for values usable as one dimension of a transition key.
///
/// # Required Traits
///
/// - `Clone`: components are copied into keys and history records
/// - `Eq` + `Hash`: keys are hash map keys
/// - `Debug`: components are debuggable for diagnostics
/// - `Send` + `Sync`: tables are shared across threads
///
/// # Example
///
/// ```rust
/// use std::borrow::Cow;
/// use waypoint::core::Dimension;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Role {
///     Unassigned,
///     Requester,
///     Approver,
/// }
///
/// impl Dimension for Role {
///     fn name(&self) -> Cow<'_, str> {
///         match self {
///             Self::Unassigned => "Unassigned".into(),
///             Self::Requester => "Requester".into(),
///             Self::Approver => "Approver".into(),
///         }
///     }
///
///     fn is_unset(&self) -> bool {
///         matches!(self, Self::Unassigned)
///     }
/// }
///
/// assert!(Role::Unassigned.is_unset());
/// assert!(!Role::Approver.is_unset());
/// ```
pub trait Dimension: Clone + Eq + Hash + Debug + Send + Sync {
    /// Get the component's name for display/logging.
    fn name(&self) -> Cow<'_, str>;

    /// Check if this value stands for "absent".
    ///
    /// Unset values are rejected as key components and as states.
    ///
    /// Default implementation returns `false`.
    fn is_unset(&self) -> bool {
        false
    }
}

impl Dimension for String {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }

    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl Dimension for &str {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(*self)
    }

    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Dimension> Dimension for Option<T> {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Some(value) => value.name(),
            None => Cow::Borrowed("<unset>"),
        }
    }

    fn is_unset(&self) -> bool {
        self.as_ref().map_or(true, |value| value.is_unset())
    }
}

macro_rules! impl_dimension_for_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Dimension for $ty {
                fn name(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

impl_dimension_for_scalar!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, char, bool);
