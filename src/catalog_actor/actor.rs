use crate::catalog_actor::message::{CatalogCommand, CatalogEvent};
use crate::catalog_actor::state::{CatalogState, FetchKind, ADD_FAILED};
use crate::clients::CartClient;
use crate::model::{CartLine, MedicineId};
use crate::notice::{schedule_dismissal, NoticeBoard, NoticeKind};
use crate::outcome::{MutationOutcome, RefreshOutcome};
use crate::remote::{Response, StoreApi};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Owns the catalog state and processes commands one at a time.
///
/// Remote calls run in spawned tasks and report back through `events`, so the loop never
/// waits on the network and a slow search cannot block a newer one.
pub struct CatalogActor {
    receiver: mpsc::Receiver<CatalogCommand>,
    events_tx: mpsc::UnboundedSender<CatalogEvent>,
    events: mpsc::UnboundedReceiver<CatalogEvent>,
    api: Arc<dyn StoreApi>,
    state: CatalogState,
    notices: NoticeBoard,
}

impl CatalogActor {
    pub(crate) fn new(
        receiver: mpsc::Receiver<CatalogCommand>,
        api: Arc<dyn StoreApi>,
        notices: NoticeBoard,
    ) -> Self {
        let (events_tx, events) = mpsc::unbounded_channel();
        Self {
            receiver,
            events_tx,
            events,
            api,
            state: CatalogState::new(),
            notices,
        }
    }

    /// Runs until every [`CatalogClient`](crate::clients::CatalogClient) is dropped.
    ///
    /// `cart` is told to reload after each confirmed add.
    pub async fn run(mut self, cart: Option<CartClient>) {
        info!("Catalog actor started");
        loop {
            tokio::select! {
                command = self.receiver.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(event) = self.events.recv() => self.handle_event(event, cart.as_ref()),
            }
        }
        info!(medicines = self.state.len(), "Catalog actor shutdown");
    }

    fn handle_command(&mut self, command: CatalogCommand) {
        match command {
            CatalogCommand::FetchAll { respond_to } => self.refresh("", respond_to),
            CatalogCommand::Search { term, respond_to } => self.refresh(&term, respond_to),
            CatalogCommand::Increment {
                medicine_id,
                respond_to,
            } => {
                let result = self.state.selector_mut(medicine_id).map(|selector| {
                    selector.increment();
                    selector.value()
                });
                let _ = respond_to.send(result);
            }
            CatalogCommand::Decrement {
                medicine_id,
                respond_to,
            } => {
                let result = self.state.selector_mut(medicine_id).map(|selector| {
                    selector.decrement();
                    selector.value()
                });
                let _ = respond_to.send(result);
            }
            CatalogCommand::SetQuantity {
                medicine_id,
                input,
                respond_to,
            } => {
                let result = self
                    .state
                    .selector_mut(medicine_id)
                    .map(|selector| selector.set_input(&input));
                let _ = respond_to.send(result);
            }
            CatalogCommand::AddToCart {
                medicine_id,
                respond_to,
            } => self.add_to_cart(medicine_id, respond_to),
            CatalogCommand::Snapshot { respond_to } => {
                let view = self.state.view(self.notices.current().cloned());
                let _ = respond_to.send(Ok(view));
            }
        }
    }

    fn refresh(&mut self, term: &str, respond_to: Option<Response<RefreshOutcome>>) {
        let (generation, kind) = self.state.begin_refresh(term);
        debug!(generation, ?kind, "Refresh issued");

        let api = self.api.clone();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = match &kind {
                FetchKind::All => api.list_medicines().await,
                FetchKind::Search(term) => api.search_medicines(term).await,
            };
            let _ = events.send(CatalogEvent::Fetched {
                generation,
                kind,
                result,
                respond_to,
            });
        });
    }

    fn add_to_cart(
        &mut self,
        medicine_id: MedicineId,
        respond_to: Response<MutationOutcome<CartLine>>,
    ) {
        let quantity = match self.state.begin_add(medicine_id) {
            Ok(quantity) => quantity,
            Err(e) => {
                warn!(%medicine_id, error = %e, "Add rejected");
                let _ = respond_to.send(Err(e));
                return;
            }
        };
        debug!(%medicine_id, quantity, "Add issued");

        let api = self.api.clone();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.add_to_cart(medicine_id, quantity).await;
            let _ = events.send(CatalogEvent::Added {
                medicine_id,
                quantity,
                result,
                respond_to,
            });
        });
    }

    fn handle_event(&mut self, event: CatalogEvent, cart: Option<&CartClient>) {
        match event {
            CatalogEvent::Fetched {
                generation,
                kind,
                result,
                respond_to,
            } => {
                let outcome = self.state.complete_refresh(generation, &kind, result);
                match &outcome {
                    RefreshOutcome::Applied { count } => {
                        info!(generation, count, "Catalog refreshed")
                    }
                    RefreshOutcome::Superseded => debug!(
                        generation,
                        latest = self.state.generation(),
                        "Discarded superseded refresh"
                    ),
                    RefreshOutcome::Failed(e) => {
                        warn!(generation, error = %e, "Refresh failed");
                        self.notify(NoticeKind::Error, kind.failure_message());
                    }
                }
                if let Some(respond_to) = respond_to {
                    let _ = respond_to.send(Ok(outcome));
                }
            }
            CatalogEvent::Added {
                medicine_id,
                quantity,
                result,
                respond_to,
            } => {
                self.state.finish_add(medicine_id, result.is_ok());
                match &result {
                    Ok(line) => {
                        info!(%medicine_id, quantity, line_id = %line.id, "Added to cart");
                        self.notify(
                            NoticeKind::Success,
                            format!("Added {quantity} item(s) to cart successfully!"),
                        );
                        if let Some(cart) = cart {
                            cart.invalidate();
                        }
                    }
                    Err(e) => {
                        warn!(%medicine_id, quantity, error = %e, "Add failed");
                        self.notify(NoticeKind::Error, ADD_FAILED);
                    }
                }
                let _ = respond_to.send(Ok(result.into()));
            }
            CatalogEvent::DismissNotice(id) => {
                self.notices.dismiss(id);
            }
        }
    }

    fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        let id = self.notices.post(kind, message);
        schedule_dismissal(
            self.events_tx.clone(),
            self.notices.ttl(),
            CatalogEvent::DismissNotice(id),
        );
    }
}
