//! # Scripted Fetcher
//!
//! A [`Fetcher`] that answers from a script instead of the network, and records
//! every URL it was asked for. Use it to drive the lookup cascade offline.
//!
//! ```ignore
//! let fetcher = ScriptedFetcher::new();
//! fetcher.expect_fetch("https://tabelog.com/rstLst/?sw=03-1234-5678").return_ok(SEARCH_HTML);
//! fetcher.expect_fetch("https://x/r/1").with_delay(Duration::from_millis(50)).return_ok(DETAIL_HTML);
//!
//! // ... run the code under test ...
//! assert_eq!(fetcher.calls().len(), 2);
//! fetcher.verify(); // every scripted URL was fetched at least once
//! ```

use crate::clients::{FetchError, Fetcher};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
enum Reply {
    Body(String),
    Failure(String),
}

#[derive(Clone)]
struct Route {
    reply: Reply,
    delay: Option<Duration>,
    hits: usize,
}

/// Offline [`Fetcher`] driven by expectations.
///
/// Routes are not consumed: fetching the same URL twice returns the same reply.
/// Unscripted URLs fail with [`FetchError::Unavailable`].
#[derive(Clone, Default)]
pub struct ScriptedFetcher {
    routes: Arc<Mutex<HashMap<String, Route>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the reply for one URL.
    pub fn expect_fetch(&self, url: impl Into<String>) -> FetchExpectationBuilder {
        FetchExpectationBuilder {
            url: url.into(),
            delay: None,
            routes: self.routes.clone(),
        }
    }

    /// Every URL fetched so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Verifies that every scripted URL was fetched at least once.
    pub fn verify(&self) {
        let routes = self.routes.lock().unwrap();
        let mut unused: Vec<&String> = routes
            .iter()
            .filter(|(_, route)| route.hits == 0)
            .map(|(url, _)| url)
            .collect();
        if !unused.is_empty() {
            unused.sort();
            panic!("Scripted URLs never fetched: {:?}", unused);
        }
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());

        let route = {
            let mut routes = self.routes.lock().unwrap();
            routes.get_mut(url).map(|route| {
                route.hits += 1;
                route.clone()
            })
        }; // Release lock before sleeping

        let Some(route) = route else {
            return Err(FetchError::Unavailable {
                url: url.to_string(),
                reason: "not scripted".to_string(),
            });
        };

        if let Some(delay) = route.delay {
            tokio::time::sleep(delay).await;
        }

        match route.reply {
            Reply::Body(body) => Ok(body),
            Reply::Failure(reason) => Err(FetchError::Unavailable {
                url: url.to_string(),
                reason,
            }),
        }
    }
}

/// Builder for one scripted URL.
pub struct FetchExpectationBuilder {
    url: String,
    delay: Option<Duration>,
    routes: Arc<Mutex<HashMap<String, Route>>>,
}

impl FetchExpectationBuilder {
    /// Holds the reply back for `delay`, to stage out-of-order arrivals.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answer with a document.
    pub fn return_ok(self, body: impl Into<String>) {
        self.insert(Reply::Body(body.into()));
    }

    /// Fail the request.
    pub fn return_err(self, reason: impl Into<String>) {
        self.insert(Reply::Failure(reason.into()));
    }

    fn insert(self, reply: Reply) {
        let mut routes = self.routes.lock().unwrap();
        routes.insert(
            self.url,
            Route {
                reply,
                delay: self.delay,
                hits: 0,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_fetcher_replies_and_records() {
        let fetcher = ScriptedFetcher::new();
        fetcher.expect_fetch("https://a").return_ok("<p>a</p>");
        fetcher.expect_fetch("https://b").return_err("connection reset");

        assert_eq!(fetcher.fetch("https://a").await.unwrap(), "<p>a</p>");
        assert!(matches!(
            fetcher.fetch("https://b").await,
            Err(FetchError::Unavailable { .. })
        ));
        assert!(fetcher.fetch("https://c").await.is_err());

        assert_eq!(fetcher.calls(), vec!["https://a", "https://b", "https://c"]);
        fetcher.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "never fetched")]
    async fn test_verify_reports_unused_routes() {
        let fetcher = ScriptedFetcher::new();
        fetcher.expect_fetch("https://unused").return_ok("");
        fetcher.verify();
    }
}
