use crate::cart_actor::message::{CartCommand, CartEvent};
use crate::cart_actor::state::{
    CartState, CLEARED, CLEAR_FAILED, LOAD_FAILED, REMOVED, REMOVE_FAILED, UPDATED, UPDATE_FAILED,
};
use crate::notice::{schedule_dismissal, NoticeBoard, NoticeKind};
use crate::outcome::{ClearOutcome, MutationOutcome, RefreshOutcome};
use crate::remote::{Response, StoreApi};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Owns the cart lines.
///
/// Mutations are applied locally first and then sent to the service. A failed call leaves
/// the optimistic state in place and posts an error notice; only a later load brings the
/// view back to what the service holds. Loads sent before a mutation, or answered while one
/// is outstanding, are discarded.
pub struct CartActor {
    receiver: mpsc::Receiver<CartCommand>,
    events_tx: mpsc::UnboundedSender<CartEvent>,
    events: mpsc::UnboundedReceiver<CartEvent>,
    api: Arc<dyn StoreApi>,
    state: CartState,
    notices: NoticeBoard,
}

impl CartActor {
    pub(crate) fn new(
        receiver: mpsc::Receiver<CartCommand>,
        api: Arc<dyn StoreApi>,
        notices: NoticeBoard,
    ) -> Self {
        let (events_tx, events) = mpsc::unbounded_channel();
        Self {
            receiver,
            events_tx,
            events,
            api,
            state: CartState::new(),
            notices,
        }
    }

    pub async fn run(mut self) {
        info!("Cart actor started");
        loop {
            tokio::select! {
                command = self.receiver.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(event) = self.events.recv() => self.handle_event(event),
            }
        }
        info!(lines = self.state.lines().len(), "Cart actor shutdown");
    }

    fn handle_command(&mut self, command: CartCommand) {
        match command {
            CartCommand::Load { respond_to } => self.load(respond_to),
            CartCommand::UpdateQuantity {
                line_id,
                quantity,
                respond_to,
            } => {
                if let Err(e) = self.state.apply_quantity(line_id, quantity) {
                    warn!(%line_id, quantity, error = %e, "Update rejected");
                    let _ = respond_to.send(Err(e));
                    return;
                }
                debug!(%line_id, quantity, "Update applied locally");
                self.spawn_call(
                    move |api| async move { api.update_cart_item(line_id, quantity).await },
                    move |result| CartEvent::Updated {
                        line_id,
                        quantity,
                        result,
                        respond_to,
                    },
                );
            }
            CartCommand::Remove {
                line_id,
                respond_to,
            } => {
                if let Err(e) = self.state.remove(line_id) {
                    warn!(%line_id, error = %e, "Remove rejected");
                    let _ = respond_to.send(Err(e));
                    return;
                }
                debug!(%line_id, "Line removed locally");
                self.spawn_call(
                    move |api| async move { api.remove_cart_item(line_id).await },
                    move |result| CartEvent::Removed {
                        line_id,
                        result,
                        respond_to,
                    },
                );
            }
            CartCommand::Clear {
                confirmation: _,
                respond_to,
            } => {
                let dropped = self.state.clear();
                debug!(dropped, "Cart cleared locally");
                self.spawn_call(
                    |api| async move { api.clear_cart().await },
                    move |result| CartEvent::Cleared { result, respond_to },
                );
            }
            CartCommand::Snapshot { respond_to } => {
                let view = self.state.view(self.notices.current().cloned());
                let _ = respond_to.send(Ok(view));
            }
        }
    }

    fn load(&mut self, respond_to: Option<Response<RefreshOutcome>>) {
        let generation = self.state.begin_load();
        debug!(generation, "Load issued");
        self.spawn_call(
            |api| async move { api.list_cart_items().await },
            move |result| CartEvent::Loaded {
                generation,
                result,
                respond_to,
            },
        );
    }

    /// Runs one remote call off the actor loop and posts its completion back.
    fn spawn_call<T, C, Fut, E>(&self, call: C, into_event: E)
    where
        C: FnOnce(Arc<dyn StoreApi>) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = T> + Send + 'static,
        E: FnOnce(T) -> CartEvent + Send + 'static,
        T: Send + 'static,
    {
        let api = self.api.clone();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = call(api).await;
            let _ = events.send(into_event(result));
        });
    }

    fn handle_event(&mut self, event: CartEvent) {
        match event {
            CartEvent::Loaded {
                generation,
                result,
                respond_to,
            } => {
                let outcome = self.state.complete_load(generation, result);
                match &outcome {
                    RefreshOutcome::Applied { count } => info!(generation, count, "Cart loaded"),
                    RefreshOutcome::Superseded => debug!(
                        generation,
                        latest = self.state.generation(),
                        "Discarded superseded load"
                    ),
                    RefreshOutcome::Failed(e) => {
                        warn!(generation, error = %e, "Load failed");
                        self.notify(NoticeKind::Error, LOAD_FAILED);
                    }
                }
                if let Some(respond_to) = respond_to {
                    let _ = respond_to.send(Ok(outcome));
                }
            }
            CartEvent::Updated {
                line_id,
                quantity,
                result,
                respond_to,
            } => {
                self.state.settle_line(line_id);
                match &result {
                    Ok(_) => {
                        info!(%line_id, quantity, "Cart line updated");
                        self.notify(NoticeKind::Success, UPDATED);
                    }
                    Err(e) => {
                        warn!(%line_id, quantity, error = %e, "Update failed");
                        self.notify(NoticeKind::Error, UPDATE_FAILED);
                    }
                }
                let _ = respond_to.send(Ok(MutationOutcome::from(result)));
            }
            CartEvent::Removed {
                line_id,
                result,
                respond_to,
            } => {
                self.state.settle_line(line_id);
                match &result {
                    Ok(()) => {
                        info!(%line_id, "Cart line removed");
                        self.notify(NoticeKind::Success, REMOVED);
                    }
                    Err(e) => {
                        warn!(%line_id, error = %e, "Remove failed");
                        self.notify(NoticeKind::Error, REMOVE_FAILED);
                    }
                }
                let _ = respond_to.send(Ok(MutationOutcome::from(result)));
            }
            CartEvent::Cleared { result, respond_to } => {
                self.state.settle_clear();
                let outcome = match result {
                    Ok(confirmation) => {
                        info!(%confirmation, "Cart cleared");
                        self.notify(NoticeKind::Success, CLEARED);
                        ClearOutcome::Confirmed(confirmation)
                    }
                    Err(e) => {
                        warn!(error = %e, "Clear failed");
                        self.notify(NoticeKind::Error, CLEAR_FAILED);
                        ClearOutcome::Failed(e)
                    }
                };
                let _ = respond_to.send(Ok(outcome));
            }
            CartEvent::DismissNotice(id) => {
                self.notices.dismiss(id);
            }
        }
    }

    fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        let id = self.notices.post(kind, message);
        schedule_dismissal(
            self.events_tx.clone(),
            self.notices.ttl(),
            CartEvent::DismissNotice(id),
        );
    }
}
