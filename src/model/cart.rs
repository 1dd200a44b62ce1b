//! Cart lines and the totals derived from them.
//!
//! A [`CartLine`] keeps `line_total == medicine.price * quantity` at all times: every
//! constructor and every quantity change recomputes it, and lines decoded from the wire are
//! normalized the same way before they are displayed.
use crate::model::Medicine;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for cart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartLineId(pub u32);

impl From<u32> for CartLineId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CartLineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: CartLineId,
    /// Snapshot of the medicine taken when the server built the line.
    #[serde(rename = "med")]
    pub medicine: Medicine,
    pub quantity: u32,
    #[serde(rename = "totalPrice", with = "rust_decimal::serde::float")]
    pub line_total: Decimal,
}

impl CartLine {
    pub fn new(id: u32, medicine: Medicine, quantity: u32) -> Self {
        let line_total = medicine.price * Decimal::from(quantity);
        Self {
            id: CartLineId(id),
            medicine,
            quantity,
            line_total,
        }
    }

    /// Sets the quantity and recomputes the line total from the snapshot price.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.line_total = self.medicine.price * Decimal::from(quantity);
    }

    /// Recomputes the line total, discarding whatever the server sent.
    pub fn normalized(mut self) -> Self {
        self.set_quantity(self.quantity);
        self
    }
}

/// Sum of all line totals. Always derived, never stored.
pub fn grand_total(lines: &[CartLine]) -> Decimal {
    lines.iter().map(|line| line.line_total).sum()
}

/// Number of units across all lines.
pub fn item_count(lines: &[CartLine]) -> u32 {
    lines
        .iter()
        .fold(0u32, |count, line| count.saturating_add(line.quantity))
}

/// Item count shown on the cart badge outside the cart page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BadgeCount(pub u32);

impl BadgeCount {
    pub fn from_lines(lines: &[CartLine]) -> Self {
        Self(item_count(lines))
    }

    pub fn is_visible(&self) -> bool {
        self.0 > 0
    }
}

impl Display for BadgeCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
