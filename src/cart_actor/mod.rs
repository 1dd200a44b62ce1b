//! Cart view-model: cart lines, derived totals and optimistic mutations.

pub mod actor;
pub mod confirm;
pub mod message;
pub mod state;

pub use actor::CartActor;
pub use confirm::{ClearConfirmation, Confirm};
pub use message::CartCommand;
pub use state::{CartState, CartStatus, CartView, CLEAR_PROMPT};

use crate::clients::CartClient;
use crate::notice::NoticeBoard;
use crate::remote::StoreApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Creates a new Cart actor and its client.
pub fn new(api: Arc<dyn StoreApi>, notice_ttl: Duration) -> (CartActor, CartClient) {
    let (sender, receiver) = mpsc::channel(32);
    let actor = CartActor::new(receiver, api, NoticeBoard::new(notice_ttl));
    (actor, CartClient::new(sender))
}
