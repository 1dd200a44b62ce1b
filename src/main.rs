//! Demo client: loads the catalog and cart from a running inventory service and logs them.
//!
//! ```bash
//! MEDIZAP_API_URL=http://localhost:8080/api RUST_LOG=info cargo run -- aspirin
//! ```
//!
//! An optional first argument is used as a search term. `MEDIZAP_CONFIG` may point at a TOML
//! config file (see [`medizap_client::lifecycle::config`]).

use medizap_client::clients::ViewModelClient;
use medizap_client::lifecycle::{setup_tracing, StoreConfig, Storefront};
use medizap_client::outcome::RefreshOutcome;
use std::path::PathBuf;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Env vars can also be set externally
    dotenvy::dotenv().ok();
    setup_tracing();

    let config_path = std::env::var("MEDIZAP_CONFIG").ok().map(PathBuf::from);
    let config = StoreConfig::load(config_path.as_deref()).map_err(|e| e.to_string())?;
    info!(base_url = %config.base_url, "Starting storefront");

    let storefront = Storefront::from_config(&config).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("catalog");
    async {
        report(storefront.catalog.fetch_all().await.map_err(|e| e.to_string())?);
        if let Some(term) = std::env::args().nth(1) {
            info!(%term, "Searching");
            report(storefront.catalog.search(&term).await.map_err(|e| e.to_string())?);
        }

        let view = storefront.catalog.snapshot().await.map_err(|e| e.to_string())?;
        for row in &view.rows {
            info!(
                id = %row.medicine.id,
                name = %row.medicine.name,
                price = %row.medicine.price,
                stock = row.medicine.stock,
                "Medicine"
            );
        }
        if let Some(empty) = view.empty_state() {
            info!(?empty, "Catalog is empty");
        }
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("cart");
    async {
        report(storefront.cart.load().await.map_err(|e| e.to_string())?);
        let view = storefront.cart.snapshot().await.map_err(|e| e.to_string())?;
        for line in &view.lines {
            info!(
                id = %line.id,
                name = %line.medicine.name,
                quantity = line.quantity,
                total = %line.line_total,
                "Cart line"
            );
        }
        info!(
            lines = view.line_count(),
            items = view.item_count(),
            grand_total = %view.grand_total(),
            "Cart"
        );
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    // Wait for the poller's first result
    let mut badge = storefront.subscribe_badge();
    let _ = tokio::time::timeout(config.poll_interval(), badge.changed()).await;
    info!(badge = %storefront.badge(), "Cart badge");

    storefront.shutdown().await?;
    Ok(())
}

fn report(outcome: RefreshOutcome) {
    match outcome {
        RefreshOutcome::Applied { count } => info!(count, "Loaded"),
        RefreshOutcome::Superseded => info!("Superseded by a newer request"),
        RefreshOutcome::Failed(e) => warn!(error = %e, "Load failed"),
    }
}
