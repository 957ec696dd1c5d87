use std::sync::{Arc, Mutex, PoisonError};

use crate::controller::FormStore;
use crate::form::LoginForm;

/// In-memory FormStore for tests and headless use.
#[derive(Clone, Debug, Default)]
pub struct MemoryForm {
    form: Arc<Mutex<LoginForm>>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the current form state.
    pub fn snapshot(&self) -> LoginForm {
        self.with(LoginForm::clone)
    }
}

impl FormStore for MemoryForm {
    fn with<R>(&self, f: impl FnOnce(&LoginForm) -> R) -> R {
        f(&*self.form.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn update<R>(&self, f: impl FnOnce(&mut LoginForm) -> R) -> R {
        f(&mut *self.form.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let store = MemoryForm::new();
        let other = store.clone();

        store.update(|f| f.set_email("a@b.c"));
        assert_eq!(other.with(|f| f.email().to_string()), "a@b.c");
        assert_eq!(other.snapshot().email(), "a@b.c");
    }
}
