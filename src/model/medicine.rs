//! Represents a medicine in the catalog.
//!
//! Medicines are created and destroyed only by the inventory service. The client holds
//! read-only mirrors that stay valid until the next fetch; `stock` is authoritative only
//! at the server.
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Type-safe identifier for Medicines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MedicineId(pub u32);

impl From<u32> for MedicineId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for MedicineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "medicine_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: MedicineId,
    pub name: String,
    /// Free-form grouping carried by the service; no client rules depend on it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: u32,
}

impl Medicine {
    /// Creates a new Medicine instance.
    ///
    /// # Arguments
    /// * `id` - Server-assigned identifier
    /// * `name` - Display name
    /// * `price` - Unit price in the display currency
    /// * `stock` - Units the server last reported as available
    pub fn new(id: u32, name: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            id: MedicineId(id),
            name: name.into(),
            category: None,
            price,
            stock,
        }
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }
}

/// Body of the create-medicine call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMedicine {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: u32,
}
