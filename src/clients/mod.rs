//! Typed handles for the view-model actors.

pub mod cart_client;
pub mod catalog_client;
pub mod view_model_client;

pub use cart_client::*;
pub use catalog_client::*;
pub use view_model_client::*;
