//! # Tracker Actor
//!
//! The presentation context: watches the page, decides which place is on
//! screen, asks the background context for its rating and renders the badge.
//!
//! ## Structure
//!
//! - [`scan`] - Title, Japanese name and phone number detection
//! - [`identity`] - [`TrackerState`], the one-slot "current place"
//! - [`badge`] - [`Badge`] and rating tiers
//! - [`page`] - The [`Page`] seam and the in-memory [`MemoryPage`]
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation ([`PlaceTracker`])
//! - [`events`] - [`PresentationEvent`], the actor's inbox
//! - [`error`] - [`TrackerError`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, presentation) = tracker_actor::new(page, &config);
//! tokio::spawn(actor.run(background_client));
//! presentation.dom_changed().await?;
//! ```

pub mod badge;
pub mod entity;
pub mod error;
pub mod events;
pub mod identity;
pub mod page;
pub mod scan;

pub use badge::*;
pub use entity::*;
pub use error::*;
pub use events::*;
pub use identity::*;
pub use page::*;
pub use scan::*;

use crate::clients::PresentationClient;
use crate::framework::MessageActor;
use crate::lifecycle::config::TabemapConfig;
use std::sync::Arc;

/// Creates the place tracker actor and the client used to reach it.
pub fn new(
    page: Arc<dyn Page>,
    config: &TabemapConfig,
) -> (MessageActor<PlaceTracker>, PresentationClient) {
    let tracker = PlaceTracker::new(page, config.tracker.clone());
    let (actor, mailbox) = MessageActor::new(tracker, config.channel.buffer_size);
    (actor, PresentationClient::new(mailbox))
}
