//! A [`StoreApi`] that forwards every call over an mpsc channel.
//!
//! The receiving side decides when and how each call is answered, which makes it the
//! natural double for exercising out-of-order completions.

use crate::model::{CartLine, CartLineId, Medicine, MedicineId, NewMedicine};
use crate::remote::{StoreApi, StoreError, StoreRequest};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

#[derive(Debug, Clone)]
pub struct ChannelStore {
    sender: mpsc::Sender<StoreRequest>,
}

impl ChannelStore {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<T, StoreError>>) -> StoreRequest,
    ) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| StoreError::Network("store channel closed".to_string()))?;
        response
            .await
            .map_err(|_| StoreError::Network("store dropped the request".to_string()))?
    }
}

#[async_trait]
impl StoreApi for ChannelStore {
    async fn list_medicines(&self) -> Result<Vec<Medicine>, StoreError> {
        self.request(|respond_to| StoreRequest::ListMedicines { respond_to })
            .await
    }

    async fn search_medicines(&self, term: &str) -> Result<Vec<Medicine>, StoreError> {
        let term = term.to_string();
        self.request(|respond_to| StoreRequest::SearchMedicines { term, respond_to })
            .await
    }

    async fn create_medicine(&self, medicine: NewMedicine) -> Result<Medicine, StoreError> {
        self.request(|respond_to| StoreRequest::CreateMedicine {
            medicine,
            respond_to,
        })
        .await
    }

    async fn add_to_cart(
        &self,
        medicine_id: MedicineId,
        quantity: u32,
    ) -> Result<CartLine, StoreError> {
        self.request(|respond_to| StoreRequest::AddToCart {
            medicine_id,
            quantity,
            respond_to,
        })
        .await
    }

    async fn list_cart_items(&self) -> Result<Vec<CartLine>, StoreError> {
        self.request(|respond_to| StoreRequest::ListCartItems { respond_to })
            .await
    }

    async fn update_cart_item(
        &self,
        line_id: CartLineId,
        quantity: u32,
    ) -> Result<CartLine, StoreError> {
        self.request(|respond_to| StoreRequest::UpdateCartItem {
            line_id,
            quantity,
            respond_to,
        })
        .await
    }

    async fn remove_cart_item(&self, line_id: CartLineId) -> Result<(), StoreError> {
        self.request(|respond_to| StoreRequest::RemoveCartItem {
            line_id,
            respond_to,
        })
        .await
    }

    async fn clear_cart(&self) -> Result<String, StoreError> {
        self.request(|respond_to| StoreRequest::ClearCart { respond_to })
            .await
    }
}
