use crate::catalog_actor::state::{CatalogView, FetchKind};
use crate::model::{CartLine, Medicine, MedicineId};
use crate::notice::NoticeId;
use crate::outcome::{MutationOutcome, RefreshOutcome};
use crate::remote::{Response, StoreError};

/// Requests accepted by the catalog actor.
#[derive(Debug)]
pub enum CatalogCommand {
    /// `respond_to` is `None` for fire-and-forget refreshes (e.g. on navigation).
    FetchAll {
        respond_to: Option<Response<RefreshOutcome>>,
    },
    Search {
        term: String,
        respond_to: Option<Response<RefreshOutcome>>,
    },
    Increment {
        medicine_id: MedicineId,
        respond_to: Response<u32>,
    },
    Decrement {
        medicine_id: MedicineId,
        respond_to: Response<u32>,
    },
    SetQuantity {
        medicine_id: MedicineId,
        input: String,
        respond_to: Response<u32>,
    },
    AddToCart {
        medicine_id: MedicineId,
        respond_to: Response<MutationOutcome<CartLine>>,
    },
    Snapshot {
        respond_to: Response<CatalogView>,
    },
}

/// Completions posted back into the actor by the tasks it spawned.
#[derive(Debug)]
pub(crate) enum CatalogEvent {
    Fetched {
        generation: u64,
        kind: FetchKind,
        result: Result<Vec<Medicine>, StoreError>,
        respond_to: Option<Response<RefreshOutcome>>,
    },
    Added {
        medicine_id: MedicineId,
        quantity: u32,
        result: Result<CartLine, StoreError>,
        respond_to: Response<MutationOutcome<CartLine>>,
    },
    DismissNotice(NoticeId),
}
