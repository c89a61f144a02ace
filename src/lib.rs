//! # Tabemap
//!
//! > **Tabelog ratings next to the place you are looking at on the map.**
//!
//! A page shows one place at a time. This crate works out which place that is,
//! looks it up on the Tabelog ratings site and keeps a small badge with the
//! score next to the place title, even while the user clicks quickly from one
//! place to the next.
//!
//! ## 🏗️ Two Contexts, Two Actors
//!
//! The work is split the way a browser extension splits it:
//!
//! - **Presentation** ([`tracker_actor`]): sees the page, owns the badge, knows
//!   which place is current. Never touches the network.
//! - **Background** ([`lookup_actor`]): does the cross-site fetching. Knows
//!   nothing about the page.
//!
//! They talk only through messages (`FETCH_TABELOG` one way; `TABELOG_DATA`,
//! `TABELOG_ERROR` and `DEBUG_LOG` the other). Each side is an actor with one
//! inbox, so its state needs no locks.
//!
//! ### Stale results
//! Lookups are fire-and-forget and several can be in flight at once, so
//! answers can arrive out of order. The presentation side checks every answer
//! against the place on screen *when it arrives* and silently drops the ones
//! that no longer match. That check is the only ordering guarantee.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic [`MessageActor`](framework::MessageActor) loop and the
//! [`ActorEntity`](framework::ActorEntity) trait both contexts implement.
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! [`TabemapSystem`](lifecycle::TabemapSystem) spawns and wires the two actors;
//! configuration and tracing setup live here too.
//!
//! ### 3. The Interface ([`clients`])
//! Typed clients over the raw mailboxes, plus the [`Fetcher`](clients::Fetcher) seam.
//!
//! ### 4. The Implementation ([`tracker_actor`], [`lookup_actor`], [`extractor`])
//! Place detection and badge rendering; the phone → name → detail lookup
//! cascade; the pure HTML extraction it relies on.
//!
//! ### 5. The Vocabulary ([`model`])
//! Identities, listing records and the wire messages.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run -- --name "すきやばし次郎" --phone 03-3535-3600
//! cargo test
//! ```

pub mod clients;
pub mod extractor;
pub mod framework;
pub mod lifecycle;
pub mod lookup_actor;
pub mod model;
pub mod tracker_actor;
