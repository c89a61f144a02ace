//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! Compact format, module prefix hidden (`with_target(false)`): actors identify
//! themselves through the `entity_type` field instead. Verbosity comes from `RUST_LOG`.
//!
//! ```bash
//! RUST_LOG=info cargo run -- --name "すきやばし次郎"
//! RUST_LOG=debug cargo run -- --name "Sushi Dai" --phone 03-3547-6797
//! RUST_LOG=tabemap::lookup_actor=debug cargo run -- --name "Sushi Dai"
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: `Actor started` / `Shutdown` with `entity_type` and the number of messages handled
//! - **Lookup cascade**: one event per step (`phone search`, `name search`, `detail fetch`) with the URL
//! - **Place tracking**: new identities, dispatched lookups, rendered badges
//! - **Stale results**: logged at `debug` only; a discarded result is expected, not a failure
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=debug`**:
//!
//! ```text
//! INFO Actor started entity_type="PlaceTracker"
//! INFO Actor started entity_type="LookupService"
//! INFO New place name="すし匠" phone=Some("03-1234-5678")
//! DEBUG Message entity_type="LookupService" msg=FetchTabelog(LookupRequest { name: "すし匠", .. })
//! INFO resolve:phone search url="https://tabelog.com/rstLst/?sw=03-1234-5678"
//! INFO resolve:phone match url="https://tabelog.com/tokyo/A1301/A130101/13000001/"
//! INFO resolve:detail fetch url="https://tabelog.com/tokyo/A1301/A130101/13000001/"
//! INFO Rendered badge name="すし匠" badge=Rated { rating: 3.45, .. }
//! ```
//!
//! The `background` lines mirrored through `DEBUG_LOG` show up in the presentation
//! context with `source="background"`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Actors carry entity_type instead
        .compact()
        .init();
}
