use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, Mailbox};
use crate::lookup_actor::LookupError;
use crate::model::{BackgroundRequest, LookupRequest};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client used by the presentation context to reach the lookup service.
#[derive(Clone)]
pub struct BackgroundClient {
    inner: Mailbox<BackgroundRequest>,
}

impl BackgroundClient {
    pub fn new(inner: Mailbox<BackgroundRequest>) -> Self {
        Self { inner }
    }

    /// Fire-and-forget: the answer comes back later as a `TABELOG_DATA` or
    /// `TABELOG_ERROR` message on the presentation side.
    #[instrument(skip(self), fields(name = %request.name))]
    pub async fn fetch_tabelog(&self, request: LookupRequest) -> Result<(), LookupError> {
        debug!(?request, "Sending request");
        self.inner
            .send(BackgroundRequest::FetchTabelog(request))
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<BackgroundRequest> for BackgroundClient {
    type Error = LookupError;

    fn inner(&self) -> &Mailbox<BackgroundRequest> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        LookupError::ActorCommunicationError(e.to_string())
    }
}
