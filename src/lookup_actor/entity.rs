//! [`ActorEntity`] implementation for the background context.
//!
//! The lookup service itself is stateless: every `FETCH_TABELOG` is resolved in
//! its own task so a slow cascade never holds up the next request. The only
//! thing the actor keeps is the set of lookups still in flight, so shutdown can
//! let them finish.

use crate::clients::{Fetcher, PresentationClient};
use crate::framework::ActorEntity;
use crate::lookup_actor::{LookupError, Resolver, SearchEndpoints};
use crate::model::BackgroundRequest;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

pub struct LookupService {
    fetcher: Arc<dyn Fetcher>,
    endpoints: SearchEndpoints,
    relay_diagnostics: bool,
    in_flight: JoinSet<()>,
}

impl LookupService {
    pub fn new(fetcher: Arc<dyn Fetcher>, endpoints: SearchEndpoints, relay_diagnostics: bool) -> Self {
        Self {
            fetcher,
            endpoints,
            relay_diagnostics,
            in_flight: JoinSet::new(),
        }
    }

    fn resolver(&self, reply: &PresentationClient) -> Resolver {
        let resolver = Resolver::new(self.fetcher.clone(), self.endpoints.clone());
        if self.relay_diagnostics {
            resolver.with_relay(reply.clone())
        } else {
            resolver
        }
    }

    fn reap_finished(&mut self) {
        while let Some(result) = self.in_flight.try_join_next() {
            if let Err(e) = result {
                warn!(error = %e, "Lookup task failed");
            }
        }
    }
}

#[async_trait]
impl ActorEntity for LookupService {
    type Message = BackgroundRequest;
    /// Replies travel back through the presentation context's mailbox.
    type Context = PresentationClient;
    type Error = LookupError;

    async fn handle_message(
        &mut self,
        msg: BackgroundRequest,
        reply: &PresentationClient,
    ) -> Result<(), LookupError> {
        self.reap_finished();

        match msg {
            BackgroundRequest::FetchTabelog(request) => {
                let resolver = self.resolver(reply);
                let reply = reply.clone();
                self.in_flight.spawn(async move {
                    let name = request.name.clone();
                    let message = resolver.respond(request).await;
                    if let Err(e) = reply.deliver(message).await {
                        debug!(%name, error = %e, "Presentation context gone; result dropped");
                    }
                });
                debug!(in_flight = self.in_flight.len(), "Lookup spawned");
            }
        }
        Ok(())
    }

    async fn on_stop(&mut self, _reply: &PresentationClient) {
        if !self.in_flight.is_empty() {
            info!(in_flight = self.in_flight.len(), "Waiting for lookups in flight");
        }
        while let Some(result) = self.in_flight.join_next().await {
            if let Err(e) = result {
                warn!(error = %e, "Lookup task failed");
            }
        }
    }
}
