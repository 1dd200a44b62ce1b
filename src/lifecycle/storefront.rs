use crate::badge::BadgePoller;
use crate::clients::{CartClient, CatalogClient};
use crate::lifecycle::StoreConfig;
use crate::model::{BadgeCount, Medicine, NewMedicine};
use crate::remote::{HttpStore, StoreApi, StoreError};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, instrument};

/// Page the user is looking at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Medicines,
    Cart,
    Other(String),
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" | "/medicines" => Route::Medicines,
            "/cart" => Route::Cart,
            other => Route::Other(other.to_string()),
        }
    }
}

/// Composition root for the client.
///
/// `Storefront` is responsible for:
/// - **Lifecycle Management**: starting the catalog and cart actors and the badge poller,
///   and stopping them again
/// - **Dependency Wiring**: the catalog actor gets a [`CartClient`] so a confirmed add
///   reloads the cart
/// - **Navigation**: re-arming the badge poller and refreshing the page being entered
///
/// # Example
///
/// ```ignore
/// let storefront = Storefront::from_config(&StoreConfig::default())?;
///
/// storefront.catalog.fetch_all().await?;
/// storefront.catalog.add_to_cart(MedicineId(1)).await?;
/// println!("badge: {}", storefront.badge());
///
/// storefront.shutdown().await?;
/// ```
pub struct Storefront {
    pub catalog: CatalogClient,
    pub cart: CartClient,
    api: Arc<dyn StoreApi>,
    badge: BadgePoller,
    route: Route,
    /// Task handles for the view-model actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Storefront {
    /// Starts every component against `api`. Must be called inside a Tokio runtime.
    pub fn new(api: Arc<dyn StoreApi>, config: &StoreConfig) -> Self {
        // 1. Create actors
        let (catalog_actor, catalog) = crate::catalog_actor::new(api.clone(), config.notice_ttl());
        let (cart_actor, cart) = crate::cart_actor::new(api.clone(), config.notice_ttl());

        // 2. Start actors; the catalog needs the cart to invalidate it after adds
        let cart_handle = tokio::spawn(cart_actor.run());
        let catalog_handle = tokio::spawn(catalog_actor.run(Some(cart.clone())));

        // 3. Start the badge poller (polls once immediately)
        let badge = BadgePoller::start(api.clone(), config.poll_interval());

        info!(poll_interval = ?config.poll_interval(), "Storefront started");
        Self {
            catalog,
            cart,
            api,
            badge,
            route: Route::default(),
            handles: vec![catalog_handle, cart_handle],
        }
    }

    /// Builds a storefront backed by [`HttpStore`].
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        let api = HttpStore::from_config(config)?;
        info!(base_url = api.base_url(), "Using inventory service");
        Ok(Self::new(Arc::new(api), config))
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Enters `route`: the badge poller restarts with an immediate poll and the page's data
    /// is reloaded in the background.
    #[instrument(skip(self))]
    pub fn navigate(&mut self, route: Route) {
        self.badge.restart();
        match &route {
            Route::Medicines => self.catalog.request_refresh(),
            Route::Cart => self.cart.invalidate(),
            Route::Other(_) => {}
        }
        self.route = route;
    }

    pub fn badge(&self) -> BadgeCount {
        self.badge.count()
    }

    pub fn subscribe_badge(&self) -> watch::Receiver<BadgeCount> {
        self.badge.subscribe()
    }

    /// Registers a medicine with the service and refreshes the catalog.
    #[instrument(skip(self))]
    pub async fn create_medicine(&self, medicine: NewMedicine) -> Result<Medicine, StoreError> {
        let created = self.api.create_medicine(medicine).await?;
        info!(medicine_id = %created.id, "Medicine created");
        self.catalog.request_refresh();
        Ok(created)
    }

    /// Gracefully shuts everything down.
    ///
    /// The poller is cancelled first, then the clients are dropped so each actor sees its
    /// mailbox close and leaves its loop. Clones of the clients held elsewhere keep their
    /// actor alive, so drop them before calling this.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront...");

        self.badge.shutdown().await?;

        drop(self.catalog);
        drop(self.cart);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
