use crate::cart_actor::{CartCommand, CartView, ClearConfirmation, Confirm, CLEAR_PROMPT};
use crate::clients::ViewModelClient;
use crate::model::{CartLine, CartLineId};
use crate::outcome::{ClearOutcome, MutationOutcome, RefreshOutcome};
use crate::remote::{Response, StoreError};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartCommand>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartCommand>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<RefreshOutcome, StoreError> {
        debug!("Sending request");
        self.call(|respond_to| CartCommand::Load {
            respond_to: Some(respond_to),
        })
        .await
    }

    /// Marks the cart stale so it reloads, without waiting for the result.
    pub fn invalidate(&self) {
        match self.sender.try_send(CartCommand::Load { respond_to: None }) {
            Ok(()) => debug!("Cart invalidated"),
            Err(e) => warn!(error = %e, "Cart reload not queued"),
        }
    }

    /// Changes a line's quantity. Quantities below 1 are rejected without a call.
    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        line_id: CartLineId,
        quantity: u32,
    ) -> Result<MutationOutcome<CartLine>, StoreError> {
        debug!("Sending request");
        self.call(move |respond_to| CartCommand::UpdateQuantity {
            line_id,
            quantity,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn remove_line(
        &self,
        line_id: CartLineId,
    ) -> Result<MutationOutcome<()>, StoreError> {
        debug!("Sending request");
        self.call(move |respond_to| CartCommand::Remove {
            line_id,
            respond_to,
        })
        .await
    }

    /// Empties the cart once `confirmer` agrees. Declining leaves everything untouched.
    #[instrument(skip(self, confirmer))]
    pub async fn clear_cart(
        &self,
        confirmer: &(dyn Confirm + Sync),
    ) -> Result<ClearOutcome, StoreError> {
        let Some(confirmation) = ClearConfirmation::ask(confirmer, CLEAR_PROMPT) else {
            info!("Clear declined");
            return Ok(ClearOutcome::Declined);
        };
        debug!("Sending request");
        self.call(move |respond_to| CartCommand::Clear {
            confirmation,
            respond_to,
        })
        .await
    }
}

impl ViewModelClient for CartClient {
    type Command = CartCommand;
    type View = CartView;

    fn sender(&self) -> &mpsc::Sender<CartCommand> {
        &self.sender
    }

    fn snapshot_request(respond_to: Response<CartView>) -> CartCommand {
        CartCommand::Snapshot { respond_to }
    }
}
