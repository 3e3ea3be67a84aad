//! Published feed integration tests

mod helpers;

use futures::StreamExt;
use serde_json::json;

use varta_client::models::NewsFilters;

use helpers::test_context::TestContext;
use helpers::test_data;

#[tokio::test]
async fn feed_page_decodes_articles() {
    let ctx = TestContext::new().await;
    ctx.backend
        .mock_feed(
            None,
            json!([
                test_data::article_json("n1", "First"),
                test_data::article_json("n2", "Second")
            ]),
        )
        .await;

    let app = ctx.app().await;
    let feed = app
        .services
        .news_service
        .published_feed(1, 10, &NewsFilters::default())
        .await;

    assert!(feed.is_success());
    let page = feed.data.unwrap();
    assert_eq!(page.articles.len(), 2);
    assert_eq!(page.articles[0].headline, "First");
}

#[tokio::test]
async fn feed_stream_stops_after_a_short_page() {
    let ctx = TestContext::new().await;
    ctx.backend
        .mock_feed(None, json!([test_data::article_json("n1", "Only one")]))
        .await;

    let app = ctx.app().await;
    let pages: Vec<_> = app
        .services
        .news_service
        .feed_pages(NewsFilters::default(), 10)
        .collect()
        .await;

    // One short page ends the stream
    assert_eq!(pages.len(), 1);
    assert!(pages[0].is_success());
}

#[tokio::test]
async fn feed_stream_yields_the_failure_envelope_and_stops() {
    let ctx = TestContext::new().await;
    ctx.backend
        .mock_error("GET", "public/news", 503, "Down for maintenance")
        .await;

    let app = ctx.app().await;
    let pages: Vec<_> = app
        .services
        .news_service
        .feed_pages(NewsFilters::default(), 10)
        .collect()
        .await;

    assert_eq!(pages.len(), 1);
    assert!(pages[0].error);
    assert_eq!(pages[0].status, Some(503));
}

#[tokio::test]
async fn empty_search_query_is_rejected_locally() {
    let ctx = TestContext::new().await;
    let app = ctx.app().await;

    let envelope = app.services.news_service.search("  ", 1, 10).await;
    assert!(envelope.error);
    assert_eq!(ctx.backend.request_count("public/news/search").await, 0);
}
