//! # Lookup Actor
//!
//! The background context: receives `FETCH_TABELOG` requests, runs the
//! phone → name → detail cascade against the ratings site and answers with
//! `TABELOG_DATA` or `TABELOG_ERROR`.
//!
//! ## Structure
//!
//! - [`resolver`] - The cascade itself ([`Resolver`])
//! - [`query`] - Search URL construction ([`SearchEndpoints`])
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation ([`LookupService`])
//! - [`error`] - [`LookupError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, background) = lookup_actor::new(fetcher, &config);
//! // Late binding: the reply channel is injected when the actor starts.
//! tokio::spawn(actor.run(presentation_client));
//! background.fetch_tabelog(LookupRequest::new("すし匠", None)).await?;
//! ```

pub mod entity;
pub mod error;
pub mod query;
pub mod resolver;

pub use entity::*;
pub use error::*;
pub use query::*;
pub use resolver::*;

use crate::clients::{BackgroundClient, Fetcher};
use crate::framework::MessageActor;
use crate::lifecycle::config::TabemapConfig;
use std::sync::Arc;

/// Creates the lookup actor and the client used to reach it.
pub fn new(
    fetcher: Arc<dyn Fetcher>,
    config: &TabemapConfig,
) -> (MessageActor<LookupService>, BackgroundClient) {
    let service = LookupService::new(
        fetcher,
        SearchEndpoints::from_config(&config.search),
        config.diagnostics.relay,
    );
    let (actor, mailbox) = MessageActor::new(service, config.channel.buffer_size);
    (actor, BackgroundClient::new(mailbox))
}
