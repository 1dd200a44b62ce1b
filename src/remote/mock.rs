//! # Mock Store
//!
//! Utilities for testing view-models without a running service.
//!
//! Two styles are offered:
//!
//! - [`create_mock_store`] returns a [`ChannelStore`] plus the receiver its requests arrive
//!   on. Tests pull requests with helpers such as [`expect_search`] and answer them whenever
//!   they like, which is how out-of-order completions are staged.
//! - [`MockStore`] answers from a queue of scripted expectations and checks at the end that
//!   every expectation was consumed.

use crate::model::{CartLine, CartLineId, Medicine, MedicineId, NewMedicine};
use crate::remote::{ChannelStore, Response, StoreError, StoreRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted answer for one request, matched in FIFO order.
#[derive(Debug)]
enum Expectation {
    ListMedicines(Result<Vec<Medicine>, StoreError>),
    SearchMedicines(Result<Vec<Medicine>, StoreError>),
    CreateMedicine(Result<Medicine, StoreError>),
    AddToCart(Result<CartLine, StoreError>),
    ListCartItems(Result<Vec<CartLine>, StoreError>),
    UpdateCartItem(Result<CartLine, StoreError>),
    RemoveCartItem(Result<(), StoreError>),
    ClearCart(Result<String, StoreError>),
}

impl Expectation {
    fn operation(&self) -> &'static str {
        match self {
            Expectation::ListMedicines(_) => "list_medicines",
            Expectation::SearchMedicines(_) => "search_medicines",
            Expectation::CreateMedicine(_) => "create_medicine",
            Expectation::AddToCart(_) => "add_to_cart",
            Expectation::ListCartItems(_) => "list_cart_items",
            Expectation::UpdateCartItem(_) => "update_cart_item",
            Expectation::RemoveCartItem(_) => "remove_cart_item",
            Expectation::ClearCart(_) => "clear_cart",
        }
    }
}

type Queue = Arc<Mutex<VecDeque<Expectation>>>;

fn lock(queue: &Queue) -> MutexGuard<'_, VecDeque<Expectation>> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A store double with expectation tracking.
///
/// # Example
/// ```ignore
/// let mut mock = MockStore::new();
/// mock.expect_list_medicines().return_ok(vec![aspirin]);
/// mock.expect_add_to_cart().return_err(StoreError::Network("refused".into()));
///
/// let api = Arc::new(mock.store());
/// // Drive a view-model with `api`...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockStore {
    store: ChannelStore,
    expectations: Queue,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockStore {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest>(100);
        let expectations: Queue = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&queue).pop_front();
                answer(request, expectation);
            }
        });

        Self {
            store: ChannelStore::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a store that can be handed to the code under test.
    pub fn store(&self) -> ChannelStore {
        self.store.clone()
    }

    pub fn expect_list_medicines(&mut self) -> ExpectationBuilder<Vec<Medicine>> {
        self.builder(Expectation::ListMedicines)
    }

    pub fn expect_search(&mut self) -> ExpectationBuilder<Vec<Medicine>> {
        self.builder(Expectation::SearchMedicines)
    }

    pub fn expect_create_medicine(&mut self) -> ExpectationBuilder<Medicine> {
        self.builder(Expectation::CreateMedicine)
    }

    pub fn expect_add_to_cart(&mut self) -> ExpectationBuilder<CartLine> {
        self.builder(Expectation::AddToCart)
    }

    pub fn expect_list_cart_items(&mut self) -> ExpectationBuilder<Vec<CartLine>> {
        self.builder(Expectation::ListCartItems)
    }

    pub fn expect_update_cart_item(&mut self) -> ExpectationBuilder<CartLine> {
        self.builder(Expectation::UpdateCartItem)
    }

    pub fn expect_remove_cart_item(&mut self) -> ExpectationBuilder<()> {
        self.builder(Expectation::RemoveCartItem)
    }

    pub fn expect_clear_cart(&mut self) -> ExpectationBuilder<String> {
        self.builder(Expectation::ClearCart)
    }

    /// Number of expectations not yet consumed.
    pub fn remaining(&self) -> usize {
        lock(&self.expectations).len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.remaining();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn builder<T>(
        &mut self,
        wrap: fn(Result<T, StoreError>) -> Expectation,
    ) -> ExpectationBuilder<T> {
        ExpectationBuilder {
            wrap,
            expectations: self.expectations.clone(),
        }
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder that queues the answer for one expected request.
pub struct ExpectationBuilder<T> {
    wrap: fn(Result<T, StoreError>) -> Expectation,
    expectations: Queue,
}

impl<T> ExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        lock(&self.expectations).push_back((self.wrap)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        lock(&self.expectations).push_back((self.wrap)(Err(error)));
    }
}

fn answer(request: StoreRequest, expectation: Option<Expectation>) {
    match (request, expectation) {
        (StoreRequest::ListMedicines { respond_to }, Some(Expectation::ListMedicines(r))) => {
            let _ = respond_to.send(r);
        }
        (StoreRequest::SearchMedicines { respond_to, .. }, Some(Expectation::SearchMedicines(r))) => {
            let _ = respond_to.send(r);
        }
        (StoreRequest::CreateMedicine { respond_to, .. }, Some(Expectation::CreateMedicine(r))) => {
            let _ = respond_to.send(r);
        }
        (StoreRequest::AddToCart { respond_to, .. }, Some(Expectation::AddToCart(r))) => {
            let _ = respond_to.send(r);
        }
        (StoreRequest::ListCartItems { respond_to }, Some(Expectation::ListCartItems(r))) => {
            let _ = respond_to.send(r);
        }
        (StoreRequest::UpdateCartItem { respond_to, .. }, Some(Expectation::UpdateCartItem(r))) => {
            let _ = respond_to.send(r);
        }
        (StoreRequest::RemoveCartItem { respond_to, .. }, Some(Expectation::RemoveCartItem(r))) => {
            let _ = respond_to.send(r);
        }
        (StoreRequest::ClearCart { respond_to }, Some(Expectation::ClearCart(r))) => {
            let _ = respond_to.send(r);
        }
        (request, Some(expectation)) => {
            panic!(
                "Unexpected request: got {}, expected {}",
                request.operation(),
                expectation.operation()
            );
        }
        (request, None) => {
            panic!("Unexpected request: {} with no expectation left", request.operation());
        }
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a store and the receiver its requests arrive on.
///
/// Nothing answers automatically: each request waits until the test sends on its
/// `respond_to`. Holding several responders and answering them in a chosen order is how
/// racing fetches are reproduced deterministically.
pub fn create_mock_store(buffer_size: usize) -> (ChannelStore, mpsc::Receiver<StoreRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ChannelStore::new(sender), receiver)
}

/// Helper to verify that the next message is a ListMedicines request
pub async fn expect_list_medicines(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<Response<Vec<Medicine>>> {
    match receiver.recv().await {
        Some(StoreRequest::ListMedicines { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a SearchMedicines request
pub async fn expect_search(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(String, Response<Vec<Medicine>>)> {
    match receiver.recv().await {
        Some(StoreRequest::SearchMedicines { term, respond_to }) => Some((term, respond_to)),
        _ => None,
    }
}

pub async fn expect_create_medicine(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(NewMedicine, Response<Medicine>)> {
    match receiver.recv().await {
        Some(StoreRequest::CreateMedicine {
            medicine,
            respond_to,
        }) => Some((medicine, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an AddToCart request
pub async fn expect_add_to_cart(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(MedicineId, u32, Response<CartLine>)> {
    match receiver.recv().await {
        Some(StoreRequest::AddToCart {
            medicine_id,
            quantity,
            respond_to,
        }) => Some((medicine_id, quantity, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a ListCartItems request
pub async fn expect_list_cart_items(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<Response<Vec<CartLine>>> {
    match receiver.recv().await {
        Some(StoreRequest::ListCartItems { respond_to }) => Some(respond_to),
        _ => None,
    }
}

pub async fn expect_update_cart_item(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(CartLineId, u32, Response<CartLine>)> {
    match receiver.recv().await {
        Some(StoreRequest::UpdateCartItem {
            line_id,
            quantity,
            respond_to,
        }) => Some((line_id, quantity, respond_to)),
        _ => None,
    }
}

pub async fn expect_remove_cart_item(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(CartLineId, Response<()>)> {
    match receiver.recv().await {
        Some(StoreRequest::RemoveCartItem {
            line_id,
            respond_to,
        }) => Some((line_id, respond_to)),
        _ => None,
    }
}

pub async fn expect_clear_cart(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<Response<String>> {
    match receiver.recv().await {
        Some(StoreRequest::ClearCart { respond_to }) => Some(respond_to),
        _ => None,
    }
}
