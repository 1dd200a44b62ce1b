use crate::catalog_actor::{CatalogCommand, CatalogView};
use crate::clients::ViewModelClient;
use crate::model::{CartLine, MedicineId};
use crate::outcome::{MutationOutcome, RefreshOutcome};
use crate::remote::{Response, StoreError};
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

/// Client for interacting with the Catalog actor.
#[derive(Clone)]
pub struct CatalogClient {
    sender: mpsc::Sender<CatalogCommand>,
}

impl CatalogClient {
    pub fn new(sender: mpsc::Sender<CatalogCommand>) -> Self {
        Self { sender }
    }

    /// Reloads the full listing and waits until its response has been handled.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<RefreshOutcome, StoreError> {
        debug!("Sending request");
        self.call(|respond_to| CatalogCommand::FetchAll {
            respond_to: Some(respond_to),
        })
        .await
    }

    /// Searches by name; a blank term reloads the full listing.
    #[instrument(skip(self))]
    pub async fn search(&self, term: &str) -> Result<RefreshOutcome, StoreError> {
        debug!("Sending request");
        let term = term.to_string();
        self.call(|respond_to| CatalogCommand::Search {
            term,
            respond_to: Some(respond_to),
        })
        .await
    }

    /// Starts a full reload without waiting for it.
    pub fn request_refresh(&self) {
        if let Err(e) = self
            .sender
            .try_send(CatalogCommand::FetchAll { respond_to: None })
        {
            warn!(error = %e, "Catalog refresh not queued");
        }
    }

    #[instrument(skip(self))]
    pub async fn increment(&self, medicine_id: MedicineId) -> Result<u32, StoreError> {
        self.call(move |respond_to| CatalogCommand::Increment {
            medicine_id,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn decrement(&self, medicine_id: MedicineId) -> Result<u32, StoreError> {
        self.call(move |respond_to| CatalogCommand::Decrement {
            medicine_id,
            respond_to,
        })
        .await
    }

    /// Applies raw user input to a selector; returns the value it settled on.
    #[instrument(skip(self))]
    pub async fn set_quantity(
        &self,
        medicine_id: MedicineId,
        input: &str,
    ) -> Result<u32, StoreError> {
        let input = input.to_string();
        self.call(move |respond_to| CatalogCommand::SetQuantity {
            medicine_id,
            input,
            respond_to,
        })
        .await
    }

    /// Adds the selector's current quantity of a medicine to the cart.
    #[instrument(skip(self))]
    pub async fn add_to_cart(
        &self,
        medicine_id: MedicineId,
    ) -> Result<MutationOutcome<CartLine>, StoreError> {
        debug!("Sending request");
        self.call(move |respond_to| CatalogCommand::AddToCart {
            medicine_id,
            respond_to,
        })
        .await
    }
}

impl ViewModelClient for CatalogClient {
    type Command = CatalogCommand;
    type View = CatalogView;

    fn sender(&self) -> &mpsc::Sender<CatalogCommand> {
        &self.sender
    }

    fn snapshot_request(respond_to: Response<CatalogView>) -> CatalogCommand {
        CatalogCommand::Snapshot { respond_to }
    }
}
