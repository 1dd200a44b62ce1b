//! State owned by the catalog actor and the snapshot it hands out.

use crate::model::{Medicine, MedicineId};
use crate::notice::Notice;
use crate::outcome::RefreshOutcome;
use crate::quantity::QuantitySelector;
use crate::remote::StoreError;
use std::collections::HashMap;

pub const LOAD_FAILED: &str = "Failed to load medicines. Please check if the server is running.";
pub const SEARCH_FAILED: &str = "Search failed. Please try again.";
pub const ADD_FAILED: &str = "Failed to add item to cart. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogStatus {
    #[default]
    Idle,
    Loading,
    Searching,
    Loaded,
    /// The last refresh failed; the message is the one shown to the user.
    Error(String),
}

impl CatalogStatus {
    pub fn is_busy(&self) -> bool {
        matches!(self, CatalogStatus::Loading | CatalogStatus::Searching)
    }
}

/// Which request a refresh issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchKind {
    All,
    Search(String),
}

impl FetchKind {
    pub fn failure_message(&self) -> &'static str {
        match self {
            FetchKind::All => LOAD_FAILED,
            FetchKind::Search(_) => SEARCH_FAILED,
        }
    }
}

/// Why the catalog shows no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// A search term is active and nothing matched it.
    NoMatches,
    /// The full listing is empty.
    NoneAvailable,
}

/// One medicine as displayed, with its selector.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRow {
    pub medicine: Medicine,
    /// `None` when the medicine is out of stock.
    pub selector: Option<QuantitySelector>,
    /// An add-to-cart call for this medicine is outstanding.
    pub adding: bool,
}

impl CatalogRow {
    pub fn quantity(&self) -> Option<u32> {
        self.selector.map(|s| s.value())
    }

    pub fn can_add(&self) -> bool {
        self.selector.is_some() && !self.adding
    }
}

/// Immutable snapshot of the catalog view-model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogView {
    pub rows: Vec<CatalogRow>,
    pub status: CatalogStatus,
    pub term: String,
    pub notice: Option<Notice>,
}

impl CatalogView {
    pub fn row(&self, id: MedicineId) -> Option<&CatalogRow> {
        self.rows.iter().find(|row| row.medicine.id == id)
    }

    pub fn medicines(&self) -> impl Iterator<Item = &Medicine> {
        self.rows.iter().map(|row| &row.medicine)
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.status != CatalogStatus::Loaded || !self.rows.is_empty() {
            return None;
        }
        if self.term.is_empty() {
            Some(EmptyState::NoneAvailable)
        } else {
            Some(EmptyState::NoMatches)
        }
    }
}

#[derive(Debug, Default)]
pub struct CatalogState {
    medicines: Vec<Medicine>,
    selectors: HashMap<MedicineId, QuantitySelector>,
    adds_in_flight: HashMap<MedicineId, u32>,
    status: CatalogStatus,
    term: String,
    generation: u64,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &CatalogStatus {
        &self.status
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a refresh. A blank term means the full listing.
    ///
    /// Returns the generation the completion must carry to be applied.
    pub fn begin_refresh(&mut self, term: &str) -> (u64, FetchKind) {
        self.generation += 1;
        let term = term.trim();
        let kind = if term.is_empty() {
            self.status = CatalogStatus::Loading;
            FetchKind::All
        } else {
            self.status = CatalogStatus::Searching;
            FetchKind::Search(term.to_string())
        };
        self.term = term.to_string();
        (self.generation, kind)
    }

    /// Applies a completed refresh if it is still the latest one issued.
    pub fn complete_refresh(
        &mut self,
        generation: u64,
        kind: &FetchKind,
        result: Result<Vec<Medicine>, StoreError>,
    ) -> RefreshOutcome {
        if generation != self.generation {
            return RefreshOutcome::Superseded;
        }
        match result {
            Ok(medicines) => {
                let count = medicines.len();
                self.replace(medicines);
                self.status = CatalogStatus::Loaded;
                RefreshOutcome::Applied { count }
            }
            Err(e) => {
                self.status = CatalogStatus::Error(kind.failure_message().to_string());
                RefreshOutcome::Failed(e)
            }
        }
    }

    fn replace(&mut self, medicines: Vec<Medicine>) {
        let mut previous = std::mem::take(&mut self.selectors);
        self.selectors = medicines
            .iter()
            .filter_map(|m| {
                let selector = match previous.remove(&m.id) {
                    Some(selector) => selector.with_stock(m.stock),
                    None => QuantitySelector::new(m.stock),
                };
                selector.map(|s| (m.id, s))
            })
            .collect();
        self.medicines = medicines;
    }

    pub fn len(&self) -> usize {
        self.medicines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.medicines.is_empty()
    }

    pub fn medicine(&self, id: MedicineId) -> Option<&Medicine> {
        self.medicines.iter().find(|m| m.id == id)
    }

    /// The selector of a listed, in-stock medicine.
    pub fn selector_mut(&mut self, id: MedicineId) -> Result<&mut QuantitySelector, StoreError> {
        let medicine = self
            .medicine(id)
            .ok_or_else(|| StoreError::validation(format!("{id} is not in the catalog")))?;
        if medicine.is_out_of_stock() {
            return Err(StoreError::validation(format!("{} is out of stock", medicine.name)));
        }
        self.selectors
            .get_mut(&id)
            .ok_or_else(|| StoreError::validation(format!("{id} has no quantity selector")))
    }

    /// Marks an add as outstanding and returns the quantity to send.
    pub fn begin_add(&mut self, id: MedicineId) -> Result<u32, StoreError> {
        let quantity = self.selector_mut(id)?.value();
        *self.adds_in_flight.entry(id).or_insert(0) += 1;
        Ok(quantity)
    }

    pub fn finish_add(&mut self, id: MedicineId, succeeded: bool) {
        if let Some(count) = self.adds_in_flight.get_mut(&id) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.adds_in_flight.remove(&id);
            }
        }
        if succeeded {
            if let Some(selector) = self.selectors.get_mut(&id) {
                selector.reset();
            }
        }
    }

    pub fn is_adding(&self, id: MedicineId) -> bool {
        self.adds_in_flight.contains_key(&id)
    }

    pub fn view(&self, notice: Option<Notice>) -> CatalogView {
        let rows = self
            .medicines
            .iter()
            .map(|m| CatalogRow {
                medicine: m.clone(),
                selector: self.selectors.get(&m.id).copied(),
                adding: self.is_adding(m.id),
            })
            .collect();
        CatalogView {
            rows,
            status: self.status.clone(),
            term: self.term.clone(),
            notice,
        }
    }
}
