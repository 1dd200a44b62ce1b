//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by `RUST_LOG`
//! (default `info`). Module paths are hidden (`with_target(false)`); spans from the client
//! handles are shown inline instead, e.g. `add_to_cart{medicine_id=MedicineId(1)}`.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: start and shutdown of the catalog and cart actors and the badge
//!   poller.
//! - **Requests**: each handle method opens a span and logs `Sending request` at debug level.
//! - **Completions**: applied refreshes and confirmed mutations at info level, superseded
//!   refreshes at debug level, and failures at warn level with an `error` field.
//!
//! ```bash
//! # Default
//! RUST_LOG=info cargo run
//!
//! # Include superseded refreshes and every badge poll
//! RUST_LOG=debug cargo run -- aspirin
//! ```
//!
//! With `RUST_LOG=debug`, racing searches look like:
//!
//! ```text
//! DEBUG search{term="a"}: Sending request
//! DEBUG Refresh issued generation=2 kind=Search("a")
//! DEBUG search{term="as"}: Sending request
//! DEBUG Refresh issued generation=3 kind=Search("as")
//!  INFO Catalog refreshed generation=3 count=1
//! DEBUG Discarded superseded refresh generation=2 latest=3
//! ```
use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();
}
