//! [`ActorEntity`] implementation for the presentation context.
//!
//! Each `DomChanged` re-reads the page. The tracker only sends a lookup when
//! the identity actually changes, and drops any result whose name no longer
//! matches the place on screen.

use crate::clients::{ActorClient, BackgroundClient};
use crate::framework::ActorEntity;
use crate::lifecycle::config::TrackerConfig;
use crate::model::{ContentMessage, LookupRequest, PlaceIdentity};
use crate::tracker_actor::{
    detect_place, extract_phone, Badge, DetectedPlace, NodeId, Page, PresentationEvent,
    TrackerError, TrackerState,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct PlaceTracker {
    state: TrackerState,
    page: Arc<dyn Page>,
    config: TrackerConfig,
    /// Element the current identity's badge is attached after.
    anchor: Option<NodeId>,
    /// Last badge rendered for the current identity.
    shown: Badge,
}

impl PlaceTracker {
    pub fn new(page: Arc<dyn Page>, config: TrackerConfig) -> Self {
        Self {
            state: TrackerState::Idle,
            page,
            config,
            anchor: None,
            shown: Badge::Loading,
        }
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    async fn reconcile(&mut self, background: &BackgroundClient) -> Result<(), TrackerError> {
        let snapshot = self.page.snapshot();
        let Some(DetectedPlace { name, anchor }) =
            detect_place(&snapshot, &self.config.ignored_titles)
        else {
            return Ok(());
        };

        // Follows host re-renders that move the title to a new element.
        self.anchor = Some(anchor);

        if !self.state.track(PlaceIdentity::new(name.clone())) {
            // Host re-renders can drop the badge while the place stays the same.
            if !self.page.has_badge_after(anchor) {
                debug!(%name, badge = ?self.shown, "Re-attaching badge");
                self.page.insert_badge_after(anchor, self.shown.clone());
            }
            return Ok(());
        }

        let phone = extract_phone(&snapshot, &self.config.phone_label_prefixes);
        info!(%name, ?phone, "New place");

        self.shown = Badge::Loading;
        if !self.page.has_badge_after(anchor) {
            self.page.insert_badge_after(anchor, Badge::Loading);
        } else {
            self.page.update_badge(anchor, Badge::Loading);
        }

        if let Err(e) = background
            .fetch_tabelog(LookupRequest::new(name, phone))
            .await
        {
            self.shown = Badge::NotFound;
            self.page.update_badge(anchor, Badge::NotFound);
            return Err(TrackerError::DispatchFailed(e.to_string()));
        }
        Ok(())
    }

    fn receive(&mut self, message: ContentMessage) {
        let badge = match message {
            ContentMessage::DebugLog { message, args } => {
                info!(source = "background", ?args, "{}", message);
                return;
            }
            ContentMessage::TabelogData { ref name, .. } | ContentMessage::TabelogError { ref name, .. }
                if !self.state.is_tracking(name) =>
            {
                debug!(
                    result_for = %name,
                    current = ?self.state.current().map(PlaceIdentity::as_str),
                    "Stale result discarded"
                );
                return;
            }
            ContentMessage::TabelogData { rating, url, .. } => Badge::from_lookup(rating, url),
            ContentMessage::TabelogError { error, .. } => {
                debug!(%error, "Lookup failed");
                Badge::NotFound
            }
        };

        info!(
            name = ?self.state.current().map(PlaceIdentity::as_str),
            ?badge,
            "Rendered badge"
        );
        self.shown = badge.clone();
        let updated = self
            .anchor
            .is_some_and(|anchor| self.page.update_badge(anchor, badge));
        if !updated {
            warn!("No badge on the page to update");
        }
    }
}

#[async_trait]
impl ActorEntity for PlaceTracker {
    type Message = PresentationEvent;
    /// Lookups are sent through the background context's mailbox.
    type Context = BackgroundClient;
    type Error = TrackerError;

    async fn handle_message(
        &mut self,
        msg: PresentationEvent,
        background: &BackgroundClient,
    ) -> Result<(), TrackerError> {
        match msg {
            PresentationEvent::DomChanged => self.reconcile(background).await,
            PresentationEvent::Channel(message) => {
                self.receive(message);
                Ok(())
            }
            PresentationEvent::StopLookups => {
                // Queued behind our own FETCH_TABELOG messages, so none are lost.
                background.stop().await.map_err(|e| TrackerError::DispatchFailed(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockMailbox;
    use crate::model::BackgroundRequest;
    use crate::tracker_actor::{MemoryPage, SnapshotBuilder};

    fn tracker(page: &MemoryPage) -> PlaceTracker {
        PlaceTracker::new(Arc::new(page.clone()), TrackerConfig::default())
    }

    #[tokio::test]
    async fn test_new_place_dispatches_once_with_loading_badge() {
        let page = MemoryPage::new();
        page.navigate(
            SnapshotBuilder::new()
                .heading("Sushi Dai")
                .control("Phone: 03-3547-6797")
                .build(),
        );
        let mut mock = MockMailbox::<BackgroundRequest>::new();
        let background = BackgroundClient::new(mock.mailbox());
        let mut tracker = tracker(&page);

        tracker.handle_message(PresentationEvent::DomChanged, &background).await.unwrap();
        tracker.handle_message(PresentationEvent::DomChanged, &background).await.unwrap();

        assert_eq!(
            mock.received(),
            vec![BackgroundRequest::FetchTabelog(LookupRequest::new(
                "Sushi Dai",
                Some("03-3547-6797".to_string())
            ))]
        );
        assert_eq!(page.badges().len(), 1);
        assert_eq!(page.badge(), Some(Badge::Loading));
        assert!(tracker.state().is_tracking("Sushi Dai"));
    }

    #[tokio::test]
    async fn test_placeholder_page_leaves_tracker_idle() {
        let page = MemoryPage::new();
        page.navigate(SnapshotBuilder::new().heading("Results").build());
        let mut mock = MockMailbox::<BackgroundRequest>::new();
        let background = BackgroundClient::new(mock.mailbox());
        let mut tracker = tracker(&page);

        tracker.handle_message(PresentationEvent::DomChanged, &background).await.unwrap();

        mock.assert_no_messages();
        assert_eq!(tracker.state(), &TrackerState::Idle);
        assert_eq!(page.mutations(), 0);
    }

    #[tokio::test]
    async fn test_stale_result_is_not_rendered() {
        let page = MemoryPage::new();
        page.navigate(SnapshotBuilder::new().heading("Sushi Dai").build());
        let mock = MockMailbox::<BackgroundRequest>::new();
        let background = BackgroundClient::new(mock.mailbox());
        let mut tracker = tracker(&page);
        tracker.handle_message(PresentationEvent::DomChanged, &background).await.unwrap();
        let before = page.mutations();

        let stale = ContentMessage::TabelogData {
            name: "Daiwa Sushi".to_string(),
            rating: Some(3.8),
            url: Some("https://tabelog.com/tokyo/A1313/A131301/13000002/".to_string()),
        };
        tracker.handle_message(stale.into(), &background).await.unwrap();

        assert_eq!(page.mutations(), before);
        assert_eq!(page.badge(), Some(Badge::Loading));
    }

    #[tokio::test]
    async fn test_dispatch_failure_shows_not_found() {
        let page = MemoryPage::new();
        page.navigate(SnapshotBuilder::new().heading("Sushi Dai").build());
        let mock = MockMailbox::<BackgroundRequest>::new();
        let background = BackgroundClient::new(mock.mailbox());
        drop(mock);
        let mut tracker = tracker(&page);

        let result = tracker.handle_message(PresentationEvent::DomChanged, &background).await;

        assert!(matches!(result, Err(TrackerError::DispatchFailed(_))));
        assert_eq!(page.badge(), Some(Badge::NotFound));
    }

    #[tokio::test]
    async fn test_debug_log_does_not_touch_page() {
        let page = MemoryPage::new();
        let mock = MockMailbox::<BackgroundRequest>::new();
        let background = BackgroundClient::new(mock.mailbox());
        let mut tracker = tracker(&page);

        let log = ContentMessage::DebugLog {
            message: "phone search url: https://tabelog.com/rstLst/?sw=03".to_string(),
            args: Vec::new(),
        };
        tracker.handle_message(log.into(), &background).await.unwrap();

        assert_eq!(page.mutations(), 0);
    }

    #[tokio::test]
    async fn test_same_place_reattaches_rendered_badge() {
        let page = MemoryPage::new();
        page.navigate(SnapshotBuilder::new().heading("Sushi Dai").build());
        let mut mock = MockMailbox::<BackgroundRequest>::new();
        let background = BackgroundClient::new(mock.mailbox());
        let mut tracker = tracker(&page);
        tracker.handle_message(PresentationEvent::DomChanged, &background).await.unwrap();

        let data = ContentMessage::TabelogData {
            name: "Sushi Dai".to_string(),
            rating: Some(3.58),
            url: None,
        };
        tracker.handle_message(data.into(), &background).await.unwrap();

        page.clear_badges();
        tracker.handle_message(PresentationEvent::DomChanged, &background).await.unwrap();

        assert_eq!(mock.received().len(), 1);
        assert_eq!(
            page.badges(),
            vec![(
                page.snapshot().headings[0].node,
                Badge::Rated {
                    rating: 3.58,
                    url: None
                }
            )]
        );
    }

    #[tokio::test]
    async fn test_error_renders_not_found() {
        let page = MemoryPage::new();
        page.navigate(SnapshotBuilder::new().heading("Sushi Dai").build());
        let mock = MockMailbox::<BackgroundRequest>::new();
        let background = BackgroundClient::new(mock.mailbox());
        let mut tracker = tracker(&page);
        tracker.handle_message(PresentationEvent::DomChanged, &background).await.unwrap();

        let error = ContentMessage::TabelogError {
            name: "Sushi Dai".to_string(),
            error: "No results found".to_string(),
        };
        tracker.handle_message(error.into(), &background).await.unwrap();

        assert_eq!(page.badge(), Some(Badge::NotFound));
    }

    #[tokio::test]
    async fn test_result_lands_after_current_anchor_with_old_badge_present() {
        let page = MemoryPage::new();
        page.navigate(SnapshotBuilder::new().heading("Sushi Dai").build());
        let mock = MockMailbox::<BackgroundRequest>::new();
        let background = BackgroundClient::new(mock.mailbox());
        let mut tracker = tracker(&page);
        tracker.handle_message(PresentationEvent::DomChanged, &background).await.unwrap();
        let dai = ContentMessage::TabelogData {
            name: "Sushi Dai".to_string(),
            rating: Some(3.58),
            url: None,
        };
        tracker.handle_message(dai.into(), &background).await.unwrap();

        page.set_snapshot(
            SnapshotBuilder::new()
                .hidden_heading("Sushi Dai")
                .heading("Sushi Sho")
                .build(),
        );
        tracker.handle_message(PresentationEvent::DomChanged, &background).await.unwrap();
        let sho = ContentMessage::TabelogData {
            name: "Sushi Sho".to_string(),
            rating: Some(3.1),
            url: None,
        };
        tracker.handle_message(sho.into(), &background).await.unwrap();

        assert_eq!(
            page.badge_after(NodeId(1)),
            Some(Badge::Rated { rating: 3.58, url: None })
        );
        assert_eq!(
            page.badge_after(NodeId(2)),
            Some(Badge::Rated { rating: 3.1, url: None })
        );
    }
}
