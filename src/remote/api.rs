//! # StoreApi Trait
//!
//! The typed request/response boundary to the inventory service. Implementations perform
//! exactly one round trip per call: no retries, no caching, no business rules.
use crate::model::{CartLine, CartLineId, Medicine, MedicineId, NewMedicine};
use crate::remote::StoreError;
use async_trait::async_trait;

/// Operations offered by the inventory/cart service.
///
/// View-models hold an `Arc<dyn StoreApi>` and call it from spawned tasks, so several calls
/// may be in flight at once and may complete in any order.
#[async_trait]
pub trait StoreApi: Send + Sync + 'static {
    async fn list_medicines(&self) -> Result<Vec<Medicine>, StoreError>;

    async fn search_medicines(&self, term: &str) -> Result<Vec<Medicine>, StoreError>;

    async fn create_medicine(&self, medicine: NewMedicine) -> Result<Medicine, StoreError>;

    async fn add_to_cart(
        &self,
        medicine_id: MedicineId,
        quantity: u32,
    ) -> Result<CartLine, StoreError>;

    async fn list_cart_items(&self) -> Result<Vec<CartLine>, StoreError>;

    async fn update_cart_item(
        &self,
        line_id: CartLineId,
        quantity: u32,
    ) -> Result<CartLine, StoreError>;

    async fn remove_cart_item(&self, line_id: CartLineId) -> Result<(), StoreError>;

    /// Empties the cart; returns the service's confirmation text.
    async fn clear_cart(&self) -> Result<String, StoreError>;
}
