//! Cart badge: an item count polled from the service, independent of the cart page.

pub mod poller;

pub use poller::{BadgePoller, DEFAULT_POLL_INTERVAL};
