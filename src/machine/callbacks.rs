//! Callbacks for the non-failing transition protocol.

/// Optional success/failure callbacks for `StateMachine::move_next_with`.
///
/// Either side may be omitted; a missing callback is simply skipped.
///
/// # Example
///
/// ```rust
/// use waypoint::machine::Callbacks;
///
/// let mut reached = None;
/// let callbacks = Callbacks::new().on_success(|state: &String| reached = Some(state.clone()));
/// # drop(callbacks);
/// ```
pub struct Callbacks<'a, S> {
    on_success: Option<Box<dyn FnOnce(&S) + 'a>>,
    on_failure: Option<Box<dyn FnOnce() + 'a>>,
}

impl<'a, S> Callbacks<'a, S> {
    /// No callbacks.
    pub fn new() -> Self {
        Self {
            on_success: None,
            on_failure: None,
        }
    }

    /// Called with the new state after a transition is applied.
    pub fn on_success<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&S) + 'a,
    {
        self.on_success = Some(Box::new(callback));
        self
    }

    /// Called when no transition is applied.
    pub fn on_failure<F>(mut self, callback: F) -> Self
    where
        F: FnOnce() + 'a,
    {
        self.on_failure = Some(Box::new(callback));
        self
    }

    pub(crate) fn succeed(self, state: &S) {
        if let Some(callback) = self.on_success {
            callback(state);
        }
    }

    pub(crate) fn fail(self) {
        if let Some(callback) = self.on_failure {
            callback();
        }
    }
}

impl<S> Default for Callbacks<'_, S> {
    fn default() -> Self {
        Self::new()
    }
}
