//! # Record Extractor
//!
//! Pure functions that read the ratings site's HTML. No network, no state: the
//! same input always produces the same output, so everything here is tested
//! offline against fixture markup.
//!
//! Extraction is regex based and deliberately tolerant. Each field is guarded by
//! its own [`Marker`](marker::Marker); a marker that cannot be found makes only
//! that field absent.
//!
//! ## Markers
//!
//! | Marker | Where | Meaning |
//! |---|---|---|
//! | `list-rst__rst-name-target` | search results | link to the top listing |
//! | `list-rst` | search results | start of the first listing container |
//! | `list-rst__rating-val` / `c-rating__val` | search results | listing score (both spellings are live) |
//! | `rdheader-rating__score-val` | listing page | the listing's own score |

pub mod marker;

use crate::model::ListingRecord;
use marker::Marker;
use std::sync::LazyLock;

static LISTING_LINK: LazyLock<Marker> = LazyLock::new(|| {
    Marker::compile(
        "listing link",
        r#"(?i)class="[^"]*list-rst__rst-name-target[^"]*"[^>]*href="([^"]*)""#,
    )
});

static LISTING_CONTAINER: LazyLock<Marker> =
    LazyLock::new(|| Marker::compile("listing container", r#"(?i)class="[^"]*list-rst[^"]*""#));

static SEARCH_RATING: LazyLock<Marker> = LazyLock::new(|| {
    Marker::compile(
        "search rating",
        r#"(?i)class="[^"]*(?:list-rst__rating-val|c-rating__val)[^"]*"[^>]*>([0-9.]+)</span>"#,
    )
});

static DETAIL_RATING: LazyLock<Marker> = LazyLock::new(|| {
    Marker::compile(
        "detail rating",
        r#"(?i)class="rdheader-rating__score-val"[^>]*>([0-9.]+)</span>"#,
    )
});

/// Reads the top entry of a search results page.
///
/// Returns `None` when the page has no listing link at all. A listing whose
/// score cannot be found comes back with `rating: None`; the caller is expected
/// to fetch the listing page in that case.
///
/// The score is only looked for from the first listing container onward, so
/// scores printed before the result list (ads, header widgets) are never used.
pub fn extract_search_result(html: &str) -> Option<ListingRecord> {
    let url = LISTING_LINK.capture(html)?.to_string();

    let Some(start) = LISTING_CONTAINER.locate(html) else {
        return Some(ListingRecord::new(Some(url), None));
    };

    let rating = SEARCH_RATING.capture_decimal(&html[start..]);
    Some(ListingRecord::new(Some(url), rating))
}

/// Reads the score from a listing's own page.
pub fn extract_detail_rating(html: &str) -> Option<f64> {
    DETAIL_RATING.capture_decimal(html)
}
