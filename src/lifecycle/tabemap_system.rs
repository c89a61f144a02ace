use crate::clients::{ActorClient, Fetcher, PresentationClient};
use crate::lifecycle::config::TabemapConfig;
use crate::tracker_actor::Page;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Both execution contexts, started and wired together.
///
/// - **Presentation** ([`PlaceTracker`](crate::tracker_actor::PlaceTracker)):
///   reads the page, sends lookups, renders the badge.
/// - **Background** ([`LookupService`](crate::lookup_actor::LookupService)):
///   runs lookups against the ratings site and sends results back.
///
/// Each actor receives the *other* context's client when it starts, so the
/// pair forms a cycle. Closing it takes explicit stop requests; see
/// [`TabemapSystem::shutdown`].
///
/// # Example
///
/// ```ignore
/// let system = TabemapSystem::new(&config, fetcher, page);
/// system.presentation.dom_changed().await?;
/// system.shutdown().await?;
/// ```
pub struct TabemapSystem {
    /// Entry point for page observers.
    pub presentation: PresentationClient,

    tracker_handle: JoinHandle<()>,
    lookup_handle: JoinHandle<()>,
}

impl TabemapSystem {
    /// Creates both actors and spawns each with the other's client as context.
    pub fn new(config: &TabemapConfig, fetcher: Arc<dyn Fetcher>, page: Arc<dyn Page>) -> Self {
        let (tracker, presentation) = crate::tracker_actor::new(page, config);
        let (lookup, background) = crate::lookup_actor::new(fetcher, config);

        // Only the tracker talks to the lookup service.
        let tracker_handle = tokio::spawn(tracker.run(background));
        let lookup_handle = tokio::spawn(lookup.run(presentation.clone()));

        Self {
            presentation,
            tracker_handle,
            lookup_handle,
        }
    }

    /// Stops the system without losing answers already on their way.
    ///
    /// 1. The tracker is asked to stop the background context. The request
    ///    goes through the tracker's own queue, so every change notification
    ///    sent before `shutdown` is handled and its lookup dispatched first.
    /// 2. The background context finishes its lookups in flight, which still
    ///    deliver their results, and exits.
    /// 3. The presentation context renders those results and stops.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        self.presentation
            .stop_lookups()
            .await
            .map_err(|e| e.to_string())?;
        if let Err(e) = self.lookup_handle.await {
            error!("Lookup task failed: {:?}", e);
            return Err(format!("Lookup task failed: {:?}", e));
        }

        self.presentation.stop().await.map_err(|e| e.to_string())?;
        if let Err(e) = self.tracker_handle.await {
            error!("Tracker task failed: {:?}", e);
            return Err(format!("Tracker task failed: {:?}", e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
