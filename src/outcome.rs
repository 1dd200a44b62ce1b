//! Results reported back to callers of the view-model handles.
//!
//! A handle returns `Err` only when the request never reached the service: the view-model
//! is gone ([`StoreError::Closed`]) or the input was rejected locally
//! ([`StoreError::Validation`]). Everything that happened after the request was issued is
//! described by one of these outcomes, and a failed call has also been shown to the user as
//! an error notice by the time the caller sees it.

use crate::remote::StoreError;

/// Result of a catalog fetch/search or a cart load.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The response was the latest one issued and replaced the displayed data.
    Applied { count: usize },
    /// A newer request was issued before this one completed; its data was discarded.
    Superseded,
    /// The call failed; previous data is still displayed.
    Failed(StoreError),
}

impl RefreshOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, RefreshOutcome::Applied { .. })
    }
}

/// Result of an add/update/remove call.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome<T> {
    Confirmed(T),
    /// The service rejected or never received the change. Optimistic state is kept.
    Failed(StoreError),
}

impl<T> MutationOutcome<T> {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, MutationOutcome::Confirmed(_))
    }

    pub fn into_result(self) -> Result<T, StoreError> {
        match self {
            MutationOutcome::Confirmed(value) => Ok(value),
            MutationOutcome::Failed(e) => Err(e),
        }
    }
}

impl<T> From<Result<T, StoreError>> for MutationOutcome<T> {
    fn from(result: Result<T, StoreError>) -> Self {
        match result {
            Ok(value) => MutationOutcome::Confirmed(value),
            Err(e) => MutationOutcome::Failed(e),
        }
    }
}

/// Result of a clear-cart request.
#[derive(Debug, Clone, PartialEq)]
pub enum ClearOutcome {
    /// The user declined the confirmation prompt; nothing changed.
    Declined,
    /// The service confirmed, with its confirmation text.
    Confirmed(String),
    /// The cart was emptied locally but the service call failed.
    Failed(StoreError),
}
