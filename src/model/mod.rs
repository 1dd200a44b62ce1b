//! Pure data structures mirrored from the inventory service.
//!
//! Everything here is a read-only copy of server state except [`CartLine`], whose quantity
//! (and therefore line total) may be patched locally before the server confirms it.

pub mod cart;
pub mod medicine;

pub use cart::*;
pub use medicine::*;
