//! # Remote Boundary
//!
//! Everything that talks to the inventory service lives here:
//!
//! - [`StoreApi`]: the async trait the view-models depend on.
//! - [`HttpStore`]: the reqwest implementation used by the binary.
//! - [`ChannelStore`] and [`mock`]: a channel-backed implementation whose responses tests
//!   answer one request at a time, in any order.

pub mod api;
pub mod channel;
pub mod error;
pub mod http;
pub mod message;
pub mod mock;

pub use api::StoreApi;
pub use channel::ChannelStore;
pub use error::StoreError;
pub use http::HttpStore;
pub use message::{Response, StoreRequest};
