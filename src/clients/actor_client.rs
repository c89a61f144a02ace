use crate::framework::{FrameworkError, Mailbox};
use async_trait::async_trait;

/// Trait for context-specific clients to inherit the shared mailbox operations.
///
/// This trait reduces boilerplate by providing a default `stop`.
#[async_trait]
pub trait ActorClient<M: Send + 'static>: Send + Sync {
    /// The context-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic Mailbox.
    fn inner(&self) -> &Mailbox<M>;

    /// Map framework errors to the specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Ask the actor behind this client to finish once its queue is drained.
    #[tracing::instrument(skip(self))]
    async fn stop(&self) -> Result<(), Self::Error> {
        tracing::debug!("Sending stop");
        self.inner().stop().await.map_err(Self::map_error)
    }
}
