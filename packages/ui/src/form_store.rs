use dioxus::prelude::*;
use flow::{FormStore, LoginForm};

/// FormStore over a Dioxus signal, so every update re-renders the login card.
#[derive(Clone, Copy, PartialEq)]
pub struct SignalForm(pub Signal<LoginForm>);

impl FormStore for SignalForm {
    fn with<R>(&self, f: impl FnOnce(&LoginForm) -> R) -> R {
        f(&*self.0.read())
    }

    fn update<R>(&self, f: impl FnOnce(&mut LoginForm) -> R) -> R {
        let mut signal = self.0;
        let result = f(&mut *signal.write());
        result
    }
}
