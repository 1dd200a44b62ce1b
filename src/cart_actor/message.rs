use crate::cart_actor::confirm::ClearConfirmation;
use crate::cart_actor::state::CartView;
use crate::model::{CartLine, CartLineId};
use crate::notice::NoticeId;
use crate::outcome::{ClearOutcome, MutationOutcome, RefreshOutcome};
use crate::remote::{Response, StoreError};

/// Requests accepted by the cart actor.
#[derive(Debug)]
pub enum CartCommand {
    /// `respond_to` is `None` when the load is only an invalidation.
    Load {
        respond_to: Option<Response<RefreshOutcome>>,
    },
    UpdateQuantity {
        line_id: CartLineId,
        quantity: u32,
        respond_to: Response<MutationOutcome<CartLine>>,
    },
    Remove {
        line_id: CartLineId,
        respond_to: Response<MutationOutcome<()>>,
    },
    Clear {
        confirmation: ClearConfirmation,
        respond_to: Response<ClearOutcome>,
    },
    Snapshot {
        respond_to: Response<CartView>,
    },
}

#[derive(Debug)]
pub(crate) enum CartEvent {
    Loaded {
        generation: u64,
        result: Result<Vec<CartLine>, StoreError>,
        respond_to: Option<Response<RefreshOutcome>>,
    },
    Updated {
        line_id: CartLineId,
        quantity: u32,
        result: Result<CartLine, StoreError>,
        respond_to: Response<MutationOutcome<CartLine>>,
    },
    Removed {
        line_id: CartLineId,
        result: Result<(), StoreError>,
        respond_to: Response<MutationOutcome<()>>,
    },
    Cleared {
        result: Result<String, StoreError>,
        respond_to: Response<ClearOutcome>,
    },
    DismissNotice(NoticeId),
}
