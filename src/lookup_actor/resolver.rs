//! # Lookup cascade
//!
//! Resolves a place to one listing:
//!
//! 1. **Phone search** when a phone number is known. Phone numbers are far less
//!    ambiguous than names, so a hit here is trusted first.
//! 2. **Name search** when there is no phone or the phone search found nothing.
//! 3. **Detail fetch** of the candidate's own page when the search result
//!    carried no score.
//!
//! One attempt per call: no retries, no caching, no coordination with other
//! lookups in flight. A failing fetch ends the cascade with
//! [`LookupError::FetchFailed`].

use crate::clients::{Fetcher, PresentationClient};
use crate::extractor::{extract_detail_rating, extract_search_result};
use crate::lookup_actor::{LookupError, SearchEndpoints};
use crate::model::{ContentMessage, ListingRecord, LookupRequest};
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchLeg {
    Phone,
    Name,
}

impl fmt::Display for SearchLeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchLeg::Phone => f.write_str("phone"),
            SearchLeg::Name => f.write_str("name"),
        }
    }
}

pub struct Resolver {
    fetcher: Arc<dyn Fetcher>,
    endpoints: SearchEndpoints,
    relay: Option<PresentationClient>,
}

impl Resolver {
    pub fn new(fetcher: Arc<dyn Fetcher>, endpoints: SearchEndpoints) -> Self {
        Self {
            fetcher,
            endpoints,
            relay: None,
        }
    }

    /// Mirror each step's log line to the presentation context as `DEBUG_LOG`.
    pub fn with_relay(mut self, relay: PresentationClient) -> Self {
        self.relay = Some(relay);
        self
    }

    /// Runs the cascade and returns the final record.
    ///
    /// On success the record always has a URL; its rating may still be absent
    /// when neither the search result nor the listing page showed a score.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn resolve(&self, request: &LookupRequest) -> Result<ListingRecord, LookupError> {
        // An empty phone is no phone.
        let phone = request.phone.as_deref().filter(|p| !p.is_empty());
        self.note(format!(
            "Searching Tabelog for: {} (Phone: {})",
            request.name,
            phone.unwrap_or("none")
        ));

        let mut candidate = None;
        if let Some(phone) = phone {
            let url = self.endpoints.phone_search(phone);
            candidate = self.search(SearchLeg::Phone, &url).await?;
            if candidate.is_none() {
                self.note("Phone search failed, trying name...".to_string());
            }
        }

        if candidate.is_none() {
            let url = self.endpoints.name_search(&request.name);
            candidate = self.search(SearchLeg::Name, &url).await?;
        }

        let Some(candidate) = candidate else {
            return Err(LookupError::NotFound);
        };
        if candidate.attributed_rating().is_some() {
            return Ok(candidate);
        }

        let Some(url) = candidate.url else {
            return Err(LookupError::NotFound);
        };
        self.note(format!("detail url: {}", url));
        let html = self.fetch(&url).await?;
        let rating = extract_detail_rating(&html);
        Ok(ListingRecord::new(Some(url), rating))
    }

    /// Runs [`Resolver::resolve`] and shapes the outcome into the message sent
    /// back to the presentation context. Never fails: errors become `TABELOG_ERROR`.
    pub async fn respond(&self, request: LookupRequest) -> ContentMessage {
        match self.resolve(&request).await {
            Ok(record) => {
                self.note(format!(
                    "Sending data: rating={:?} url={}",
                    record.rating,
                    record.url.as_deref().unwrap_or("-")
                ));
                ContentMessage::TabelogData {
                    name: request.name,
                    rating: record.rating,
                    url: record.url,
                }
            }
            Err(e) => {
                warn!(name = %request.name, kind = ?e.kind(), error = %e, "Tabelog fetch error");
                ContentMessage::TabelogError {
                    name: request.name,
                    error: e.to_string(),
                }
            }
        }
    }

    async fn search(&self, leg: SearchLeg, url: &str) -> Result<Option<ListingRecord>, LookupError> {
        self.note(format!("{} search url: {}", leg, url));
        let html = self.fetch(url).await?;
        let found = extract_search_result(&html).filter(ListingRecord::has_listing);
        if let Some(record) = &found {
            self.note(format!(
                "{} match found: {}",
                leg,
                record.url.as_deref().unwrap_or("-")
            ));
        }
        Ok(found)
    }

    async fn fetch(&self, url: &str) -> Result<String, LookupError> {
        self.fetcher
            .fetch(url)
            .await
            .map_err(|e| LookupError::FetchFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }

    fn note(&self, message: String) {
        info!("{}", message);
        if let Some(relay) = &self.relay {
            // Diagnostics only; the presentation side may be busy or gone.
            let _ = relay.relay_debug(message);
        }
    }
}
