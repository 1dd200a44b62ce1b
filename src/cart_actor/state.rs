//! Cart contents as last confirmed by the service, plus any optimistic patches on top.

use crate::model::{grand_total, item_count, CartLine, CartLineId};
use crate::notice::Notice;
use crate::outcome::RefreshOutcome;
use crate::remote::StoreError;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

pub const LOAD_FAILED: &str = "Failed to load cart items. Please check if the server is running.";
pub const UPDATE_FAILED: &str = "Failed to update cart item. Please try again.";
pub const REMOVE_FAILED: &str = "Failed to remove item. Please try again.";
pub const CLEAR_FAILED: &str = "Failed to clear cart. Please try again.";
pub const UPDATED: &str = "Cart updated successfully!";
pub const REMOVED: &str = "Item removed from cart!";
pub const CLEARED: &str = "Cart cleared successfully!";
pub const CLEAR_PROMPT: &str = "Are you sure you want to clear your entire cart?";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CartStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}

/// Immutable snapshot of the cart view-model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub status: CartStatus,
    pub notice: Option<Notice>,
    /// Lines with an update or remove call still outstanding.
    pub pending: HashSet<CartLineId>,
    pub clearing: bool,
}

impl CartView {
    /// Recomputed on every call.
    pub fn grand_total(&self) -> Decimal {
        grand_total(&self.lines)
    }

    pub fn item_count(&self) -> u32 {
        item_count(&self.lines)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, id: CartLineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    pub fn is_pending(&self, id: CartLineId) -> bool {
        self.pending.contains(&id)
    }
}

#[derive(Debug, Default)]
pub struct CartState {
    lines: Vec<CartLine>,
    status: CartStatus,
    generation: u64,
    /// Loads issued at or before this generation predate a local mutation.
    mutated_at: u64,
    pending: HashMap<CartLineId, usize>,
    clears_in_flight: usize,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn status(&self) -> &CartStatus {
        &self.status
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.status = CartStatus::Loading;
        self.generation
    }

    /// Replaces the lines with the service's listing.
    ///
    /// The listing is discarded when a newer load was issued, when a local mutation happened
    /// after this load was sent, or while a mutation is still waiting for the service.
    pub fn complete_load(
        &mut self,
        generation: u64,
        result: Result<Vec<CartLine>, StoreError>,
    ) -> RefreshOutcome {
        if generation != self.generation {
            return RefreshOutcome::Superseded;
        }
        if generation <= self.mutated_at || self.has_mutations_in_flight() {
            if self.status == CartStatus::Loading {
                self.status = CartStatus::Loaded;
            }
            return RefreshOutcome::Superseded;
        }
        match result {
            Ok(lines) => {
                self.lines = lines.into_iter().map(CartLine::normalized).collect();
                self.status = CartStatus::Loaded;
                RefreshOutcome::Applied {
                    count: self.lines.len(),
                }
            }
            Err(e) => {
                self.status = CartStatus::Error(LOAD_FAILED.to_string());
                RefreshOutcome::Failed(e)
            }
        }
    }

    /// Applies a quantity change locally and returns the patched line.
    pub fn apply_quantity(
        &mut self,
        id: CartLineId,
        quantity: u32,
    ) -> Result<CartLine, StoreError> {
        if quantity < 1 {
            return Err(StoreError::validation("Quantity must be at least 1"));
        }
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.id == id)
            .ok_or_else(|| StoreError::validation(format!("{id} is not in the cart")))?;
        line.set_quantity(quantity);
        let line = line.clone();
        self.begin_line_call(id);
        Ok(line)
    }

    pub fn remove(&mut self, id: CartLineId) -> Result<CartLine, StoreError> {
        let index = self
            .lines
            .iter()
            .position(|line| line.id == id)
            .ok_or_else(|| StoreError::validation(format!("{id} is not in the cart")))?;
        self.begin_line_call(id);
        Ok(self.lines.remove(index))
    }

    /// Empties the cart locally; returns how many lines were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.lines.len();
        self.lines.clear();
        self.mutated_at = self.generation;
        self.clears_in_flight += 1;
        count
    }

    fn begin_line_call(&mut self, id: CartLineId) {
        self.mutated_at = self.generation;
        *self.pending.entry(id).or_default() += 1;
    }

    /// Records that the service answered an update or remove for `id`.
    pub fn settle_line(&mut self, id: CartLineId) {
        if let Some(count) = self.pending.get_mut(&id) {
            *count -= 1;
            if *count == 0 {
                self.pending.remove(&id);
            }
        }
    }

    pub fn settle_clear(&mut self) {
        self.clears_in_flight = self.clears_in_flight.saturating_sub(1);
    }

    pub fn has_mutations_in_flight(&self) -> bool {
        !self.pending.is_empty() || self.clears_in_flight > 0
    }

    pub fn view(&self, notice: Option<Notice>) -> CartView {
        CartView {
            lines: self.lines.clone(),
            status: self.status.clone(),
            notice,
            pending: self.pending.keys().copied().collect(),
            clearing: self.clears_in_flight > 0,
        }
    }
}
