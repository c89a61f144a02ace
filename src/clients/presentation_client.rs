use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, Mailbox};
use crate::model::ContentMessage;
use crate::tracker_actor::{PresentationEvent, TrackerError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client used to reach the presentation context: by the page observer for
/// change notifications and by the lookup service for results.
#[derive(Clone)]
pub struct PresentationClient {
    inner: Mailbox<PresentationEvent>,
}

impl PresentationClient {
    pub fn new(inner: Mailbox<PresentationEvent>) -> Self {
        Self { inner }
    }

    /// The page changed somewhere. Carries no payload: the tracker re-reads the page.
    pub async fn dom_changed(&self) -> Result<(), TrackerError> {
        self.inner
            .send(PresentationEvent::DomChanged)
            .await
            .map_err(Self::map_error)
    }

    /// Deliver a message from the background context.
    #[instrument(skip(self, message))]
    pub async fn deliver(&self, message: ContentMessage) -> Result<(), TrackerError> {
        debug!(subject = ?message.subject(), "Delivering message");
        self.inner
            .send(PresentationEvent::Channel(message))
            .await
            .map_err(Self::map_error)
    }

    /// Has the tracker stop the background context after the lookups it
    /// already dispatched.
    pub async fn stop_lookups(&self) -> Result<(), TrackerError> {
        self.inner
            .send(PresentationEvent::StopLookups)
            .await
            .map_err(Self::map_error)
    }

    /// Best-effort diagnostic mirror. Never waits; a full or closed mailbox drops the line.
    pub fn relay_debug(&self, message: impl Into<String>) -> Result<(), TrackerError> {
        self.inner
            .try_send(PresentationEvent::Channel(ContentMessage::DebugLog {
                message: message.into(),
                args: Vec::new(),
            }))
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<PresentationEvent> for PresentationClient {
    type Error = TrackerError;

    fn inner(&self) -> &Mailbox<PresentationEvent> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        TrackerError::ActorCommunicationError(e.to_string())
    }
}
