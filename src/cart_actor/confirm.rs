//! User confirmation for destructive cart operations.

/// Asks the user a yes/no question.
///
/// Any `Fn(&str) -> bool` is a confirmer, so tests and callers can pass a closure.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Proof that the user agreed to clear the cart.
///
/// Only [`ClearConfirmation::ask`] produces one, so a clear request cannot reach the cart
/// actor without the prompt having been answered.
#[derive(Debug)]
pub struct ClearConfirmation {
    _private: (),
}

impl ClearConfirmation {
    pub fn ask(confirmer: &dyn Confirm, prompt: &str) -> Option<Self> {
        confirmer
            .confirm(prompt)
            .then_some(ClearConfirmation { _private: () })
    }
}
