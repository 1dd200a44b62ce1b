//! # MediZap Client
//!
//! > **Client-side catalog and cart state for the MediZap pharmacy storefront.**
//!
//! The remote inventory service owns medicines and cart lines. This crate keeps what the user
//! sees (the medicine list, per-row quantity selectors, the cart and the cart badge) correct
//! relative to that service while requests are concurrent, may complete out of order and may
//! fail.
//!
//! ## Architecture Notes
//!
//! ### 1. View-models are actors
//! The catalog and the cart each run as a Tokio task that owns its state outright and handles
//! one message at a time, so no locks guard the state. Callers talk to them through cloneable
//! handles ([`CatalogClient`](clients::CatalogClient), [`CartClient`](clients::CartClient)).
//!
//! ### 2. Remote calls never block the loop
//! Each remote call runs in its own task and posts its completion back into the actor's
//! mailbox. Catalog refreshes and cart loads are tagged with a generation number; a completion
//! whose generation is no longer the latest is discarded, so the last search issued always
//! wins.
//!
//! ### 3. Optimistic cart mutations
//! Quantity changes, removals and clears are applied locally before the service answers. A
//! failure is reported through a transient notice and the local change is kept.
//!
//! ### 4. Observability
//! `tracing` everywhere, configured by [`lifecycle::tracing`].
//!
//! ## Module Tour
//!
//! - [`model`]: medicines, cart lines and derived totals.
//! - [`remote`]: the [`StoreApi`](remote::StoreApi) boundary, its HTTP implementation and
//!   the test doubles in [`remote::mock`].
//! - [`quantity`]: the bounded per-row selector.
//! - [`catalog_actor`] / [`cart_actor`]: the view-model actors.
//! - [`clients`]: handles for talking to them.
//! - [`badge`]: the cart badge poller.
//! - [`notice`] / [`outcome`]: what the user and the caller are told.
//! - [`lifecycle`]: configuration, tracing and the [`Storefront`](lifecycle::Storefront)
//!   composition root.
//!
//! ### Running the Demo
//!
//! ```bash
//! # List the catalog, then search for "para"
//! RUST_LOG=info cargo run -- para
//! ```

pub mod badge;
pub mod cart_actor;
pub mod catalog_actor;
pub mod clients;
pub mod lifecycle;
pub mod model;
pub mod notice;
pub mod outcome;
pub mod quantity;
pub mod remote;
