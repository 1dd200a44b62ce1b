use crate::remote::{Response, StoreError};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

/// Shared plumbing for the view-model handles.
///
/// A handle only needs to expose its command sender and say how a snapshot request is
/// built; request/response round trips and the snapshot call come for free.
#[async_trait]
pub trait ViewModelClient: Send + Sync {
    type Command: Send + 'static;
    type View: Send + 'static;

    /// Access the sender half of the actor's mailbox.
    fn sender(&self) -> &mpsc::Sender<Self::Command>;

    fn snapshot_request(respond_to: Response<Self::View>) -> Self::Command;

    /// Sends a command and waits for the actor's answer.
    ///
    /// Both a closed mailbox and a dropped responder mean the actor is gone.
    async fn call<R, F>(&self, make: F) -> Result<R, StoreError>
    where
        R: Send + 'static,
        F: FnOnce(Response<R>) -> Self::Command + Send + 'static,
    {
        let (respond_to, response) = oneshot::channel();
        self.sender()
            .send(make(respond_to))
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Closed)?
    }

    /// Current state of the view-model.
    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> Result<Self::View, StoreError>
    where
        Self: 'static,
    {
        tracing::debug!("Sending request");
        self.call(Self::snapshot_request).await
    }
}
