use crate::model::{CartLine, CartLineId, Medicine, MedicineId, NewMedicine};
use crate::remote::StoreError;
use tokio::sync::oneshot;

/// One-shot channel a [`StoreRequest`] is answered on.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// A single call against the store, carried over a channel to whoever plays the service.
///
/// There is one variant per [`StoreApi`](crate::remote::StoreApi) operation; the payload
/// mirrors the operation's arguments and `respond_to` receives its result.
#[derive(Debug)]
pub enum StoreRequest {
    ListMedicines {
        respond_to: Response<Vec<Medicine>>,
    },
    SearchMedicines {
        term: String,
        respond_to: Response<Vec<Medicine>>,
    },
    CreateMedicine {
        medicine: NewMedicine,
        respond_to: Response<Medicine>,
    },
    AddToCart {
        medicine_id: MedicineId,
        quantity: u32,
        respond_to: Response<CartLine>,
    },
    ListCartItems {
        respond_to: Response<Vec<CartLine>>,
    },
    UpdateCartItem {
        line_id: CartLineId,
        quantity: u32,
        respond_to: Response<CartLine>,
    },
    RemoveCartItem {
        line_id: CartLineId,
        respond_to: Response<()>,
    },
    ClearCart {
        respond_to: Response<String>,
    },
}

impl StoreRequest {
    /// Short operation name, used in logs and mismatch panics.
    pub fn operation(&self) -> &'static str {
        match self {
            StoreRequest::ListMedicines { .. } => "list_medicines",
            StoreRequest::SearchMedicines { .. } => "search_medicines",
            StoreRequest::CreateMedicine { .. } => "create_medicine",
            StoreRequest::AddToCart { .. } => "add_to_cart",
            StoreRequest::ListCartItems { .. } => "list_cart_items",
            StoreRequest::UpdateCartItem { .. } => "update_cart_item",
            StoreRequest::RemoveCartItem { .. } => "remove_cart_item",
            StoreRequest::ClearCart { .. } => "clear_cart",
        }
    }
}
