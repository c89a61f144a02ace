use serde::{Deserialize, Serialize};

/// A listing found on the ratings site: where it lives and what it scores.
///
/// A rating without a URL cannot be attributed to any listing; use
/// [`ListingRecord::attributed_rating`] when that distinction matters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub url: Option<String>,
    pub rating: Option<f64>,
}

impl ListingRecord {
    pub fn new(url: Option<String>, rating: Option<f64>) -> Self {
        Self { url, rating }
    }

    /// A record is usable as a lookup candidate once it points at a listing.
    pub fn has_listing(&self) -> bool {
        self.url.is_some()
    }

    pub fn attributed_rating(&self) -> Option<f64> {
        self.url.as_ref().and(self.rating)
    }
}
