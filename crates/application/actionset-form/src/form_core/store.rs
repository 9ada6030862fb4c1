use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::FormState;

use super::{events::FormEvent, reducer::reduce};

#[derive(Clone)]
pub struct FormStore {
    inner: Arc<Mutex<FormState>>,
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new(FormState::default())
    }
}

impl FormStore {
    pub fn new(state: FormState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    pub fn state(&self) -> FormState {
        self.lock().clone()
    }

    pub fn apply(&self, ev: FormEvent) {
        let mut guard = self.lock();
        let next = reduce(guard.clone(), ev);
        *guard = next;
    }

    /// Runs `f` against the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&FormState) -> R) -> R {
        f(&*self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        // A panic mid-reduce leaves the previous state in place, which is
        // still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
