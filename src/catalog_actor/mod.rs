//! Catalog view-model: the medicine list, the active search and per-row selectors.

pub mod actor;
pub mod message;
pub mod state;

pub use actor::CatalogActor;
pub use message::CatalogCommand;
pub use state::*;

use crate::clients::CatalogClient;
use crate::notice::NoticeBoard;
use crate::remote::StoreApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Creates a new Catalog actor and its client.
pub fn new(api: Arc<dyn StoreApi>, notice_ttl: Duration) -> (CatalogActor, CatalogClient) {
    let (sender, receiver) = mpsc::channel(32);
    let actor = CatalogActor::new(receiver, api, NoticeBoard::new(notice_ttl));
    (actor, CatalogClient::new(sender))
}
