use std::sync::Arc;
use tabemap::clients::mock::ScriptedFetcher;
use tabemap::clients::PresentationClient;
use tabemap::framework::mock::MockMailbox;
use tabemap::framework::MessageActor;
use tabemap::lookup_actor::{LookupError, LookupService, Resolver, SearchEndpoints};
use tabemap::model::{BackgroundRequest, ContentMessage, ListingRecord, LookupRequest};
use tabemap::tracker_actor::PresentationEvent;

const PHONE_URL: &str = "https://tabelog.com/rstLst/?sw=03-3547-6797";
const NAME_URL: &str = "https://tabelog.com/rstLst/?sw==Sushi%20Dai";
const LISTING_URL: &str = "https://tabelog.com/tokyo/A1313/A131301/13000001/";

fn search_page(url: &str, rating: Option<&str>) -> String {
    let score = rating
        .map(|r| format!(r#"<span class="list-rst__rating-val">{}</span>"#, r))
        .unwrap_or_default();
    format!(
        r#"<div class="list-rst js-rst-cassette-wrap"><h3><a class="list-rst__rst-name-target cpy-rst-name" href="{}">Sushi Dai</a></h3>{}</div>"#,
        url, score
    )
}

const EMPTY_SEARCH: &str = "<div>No results</div>";

fn resolver(fetcher: &ScriptedFetcher) -> Resolver {
    Resolver::new(Arc::new(fetcher.clone()), SearchEndpoints::default())
}

fn request(phone: Option<&str>) -> LookupRequest {
    LookupRequest::new("Sushi Dai", phone.map(str::to_string))
}

#[tokio::test]
async fn test_phone_hit_with_rating_skips_other_steps() {
    let fetcher = ScriptedFetcher::new();
    fetcher
        .expect_fetch(PHONE_URL)
        .return_ok(search_page(LISTING_URL, Some("3.58")));

    let record = resolver(&fetcher)
        .resolve(&request(Some("03-3547-6797")))
        .await
        .unwrap();

    assert_eq!(record, ListingRecord::new(Some(LISTING_URL.to_string()), Some(3.58)));
    assert_eq!(fetcher.calls(), vec![PHONE_URL.to_string()]);
    fetcher.verify();
}

#[tokio::test]
async fn test_phone_miss_falls_through_to_name() {
    let fetcher = ScriptedFetcher::new();
    fetcher.expect_fetch(PHONE_URL).return_ok(EMPTY_SEARCH);
    fetcher
        .expect_fetch(NAME_URL)
        .return_ok(search_page(LISTING_URL, Some("3.41")));

    let record = resolver(&fetcher)
        .resolve(&request(Some("03-3547-6797")))
        .await
        .unwrap();

    assert_eq!(record.rating, Some(3.41));
    assert_eq!(fetcher.calls(), vec![PHONE_URL.to_string(), NAME_URL.to_string()]);
}

#[tokio::test]
async fn test_no_phone_goes_straight_to_name() {
    let fetcher = ScriptedFetcher::new();
    fetcher
        .expect_fetch(NAME_URL)
        .return_ok(search_page(LISTING_URL, Some("3.20")));

    let record = resolver(&fetcher).resolve(&request(None)).await.unwrap();

    assert_eq!(record.rating, Some(3.20));
    assert_eq!(fetcher.calls(), vec![NAME_URL.to_string()]);
}

#[tokio::test]
async fn test_empty_phone_goes_straight_to_name() {
    let fetcher = ScriptedFetcher::new();
    fetcher
        .expect_fetch(NAME_URL)
        .return_ok(search_page(LISTING_URL, Some("3.20")));

    let record = resolver(&fetcher).resolve(&request(Some(""))).await.unwrap();

    assert_eq!(record.rating, Some(3.20));
    assert_eq!(fetcher.calls(), vec![NAME_URL.to_string()]);
}

#[tokio::test]
async fn test_candidate_without_rating_reads_listing_page() {
    let fetcher = ScriptedFetcher::new();
    fetcher
        .expect_fetch(PHONE_URL)
        .return_ok(search_page(LISTING_URL, None));
    fetcher.expect_fetch(LISTING_URL).return_ok(
        r#"<div class="rdheader-rating"><span class="rdheader-rating__score-val" itemprop="ratingValue">3.45</span></div>"#,
    );

    let message = resolver(&fetcher)
        .respond(request(Some("03-3547-6797")))
        .await;

    assert_eq!(
        message,
        ContentMessage::TabelogData {
            name: "Sushi Dai".to_string(),
            rating: Some(3.45),
            url: Some(LISTING_URL.to_string()),
        }
    );
    fetcher.verify();
}

#[tokio::test]
async fn test_listing_page_without_score_keeps_url() {
    let fetcher = ScriptedFetcher::new();
    fetcher
        .expect_fetch(NAME_URL)
        .return_ok(search_page(LISTING_URL, None));
    fetcher.expect_fetch(LISTING_URL).return_ok("<html><body>closed</body></html>");

    let record = resolver(&fetcher).resolve(&request(None)).await.unwrap();

    assert_eq!(record, ListingRecord::new(Some(LISTING_URL.to_string()), None));
}

#[tokio::test]
async fn test_both_searches_empty_is_not_found() {
    let fetcher = ScriptedFetcher::new();
    fetcher.expect_fetch(PHONE_URL).return_ok(EMPTY_SEARCH);
    fetcher.expect_fetch(NAME_URL).return_ok(EMPTY_SEARCH);

    let message = resolver(&fetcher)
        .respond(request(Some("03-3547-6797")))
        .await;

    assert_eq!(
        message,
        ContentMessage::TabelogError {
            name: "Sushi Dai".to_string(),
            error: "No results found".to_string(),
        }
    );
}

#[tokio::test]
async fn test_failed_fetch_ends_cascade() {
    let fetcher = ScriptedFetcher::new();
    fetcher.expect_fetch(PHONE_URL).return_err("connection reset");

    let result = resolver(&fetcher)
        .resolve(&request(Some("03-3547-6797")))
        .await;

    assert!(matches!(result, Err(LookupError::FetchFailed { ref url, .. }) if url == PHONE_URL));
    // The name search is not attempted after a network failure.
    assert_eq!(fetcher.calls(), vec![PHONE_URL.to_string()]);
}

#[tokio::test]
async fn test_failed_detail_fetch_is_reported() {
    let fetcher = ScriptedFetcher::new();
    fetcher
        .expect_fetch(NAME_URL)
        .return_ok(search_page(LISTING_URL, None));
    fetcher.expect_fetch(LISTING_URL).return_err("HTTP 503");

    let message = resolver(&fetcher).respond(request(None)).await;

    assert!(matches!(
        message,
        ContentMessage::TabelogError { ref error, .. } if error.contains(LISTING_URL)
    ));
}

#[tokio::test]
async fn test_relay_mirrors_steps_as_debug_log() {
    let fetcher = ScriptedFetcher::new();
    fetcher
        .expect_fetch(NAME_URL)
        .return_ok(search_page(LISTING_URL, Some("3.58")));
    let mut presentation = MockMailbox::<PresentationEvent>::new();
    let relay = PresentationClient::new(presentation.mailbox());

    resolver(&fetcher)
        .with_relay(relay)
        .resolve(&request(None))
        .await
        .unwrap();

    let lines: Vec<String> = presentation
        .received()
        .into_iter()
        .filter_map(|event| match event {
            PresentationEvent::Channel(ContentMessage::DebugLog { message, .. }) => Some(message),
            _ => None,
        })
        .collect();
    assert!(lines.iter().any(|l| l.starts_with("Searching Tabelog for: Sushi Dai")));
    assert!(lines.iter().any(|l| l.contains(NAME_URL)));
}

#[tokio::test]
async fn test_service_answers_every_request() {
    let fetcher = ScriptedFetcher::new();
    fetcher
        .expect_fetch(NAME_URL)
        .return_ok(search_page(LISTING_URL, Some("3.58")));
    let mut presentation = MockMailbox::<PresentationEvent>::new();

    let service = LookupService::new(Arc::new(fetcher.clone()), SearchEndpoints::default(), false);
    let (actor, mailbox) = MessageActor::new(service, 8);
    let handle = tokio::spawn(actor.run(PresentationClient::new(presentation.mailbox())));

    mailbox
        .send(BackgroundRequest::FetchTabelog(request(None)))
        .await
        .unwrap();
    // Unscripted URL: the fetch fails and comes back as an error message.
    mailbox
        .send(BackgroundRequest::FetchTabelog(LookupRequest::new("Nowhere", None)))
        .await
        .unwrap();
    mailbox.stop().await.unwrap();
    handle.await.unwrap();

    // Lookups run concurrently and may finish in any order.
    let mut received = presentation.received();
    received.sort_by_key(|event| {
        matches!(event, PresentationEvent::Channel(ContentMessage::TabelogError { .. }))
    });
    assert_eq!(
        received,
        vec![
            PresentationEvent::Channel(ContentMessage::TabelogData {
                name: "Sushi Dai".to_string(),
                rating: Some(3.58),
                url: Some(LISTING_URL.to_string()),
            }),
            PresentationEvent::Channel(ContentMessage::TabelogError {
                name: "Nowhere".to_string(),
                error: "Fetch failed for https://tabelog.com/rstLst/?sw==Nowhere: https://tabelog.com/rstLst/?sw==Nowhere unavailable: not scripted".to_string(),
            }),
        ]
    );
}
