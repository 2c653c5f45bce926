/*!
 * Page fetching tests against a stub HTTP server
 */

use std::time::Duration;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use medreviews_batch::errors::FetchError;
use medreviews_batch::extractor::extract_first_heading;
use medreviews_batch::fetcher::{build_http_client, PageFetcher, USER_AGENT};

fn test_fetcher(max_body_bytes: usize) -> PageFetcher {
    let client = build_http_client(Duration::from_secs(2), Duration::from_secs(2));
    PageFetcher::new(client, max_body_bytes)
}

/// Test a plain successful fetch returns status and decoded text
#[tokio::test]
async fn test_fetch_withOkPage_shouldReturnStatusAndBody() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><h1>Welcome</h1></html>", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let fetcher = test_fetcher(400_000);
    let (status, text) = fetcher.fetch(&format!("{}/page", server.uri())).await.unwrap();

    assert_eq!(status, 200);
    assert_eq!(extract_first_heading(&text), "Welcome");
}

/// Test that the fixed client identifier is sent with every request
#[tokio::test]
async fn test_fetch_shouldSendDescriptiveUserAgent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ua"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = test_fetcher(400_000);
    fetcher.fetch(&format!("{}/ua", server.uri())).await.unwrap();
}

/// Test that a non-2xx status is a per-item error
#[tokio::test]
async fn test_fetch_withServerError_shouldReturnBadStatus() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = test_fetcher(400_000);
    let error = fetcher
        .fetch(&format!("{}/missing", server.uri()))
        .await
        .unwrap_err();

    match error {
        FetchError::BadStatus(status) => assert_eq!(status, 404),
        other => panic!("expected BadStatus, got {other}"),
    }
}

/// Test that redirects are followed to the final page
#[tokio::test]
async fn test_fetch_withRedirect_shouldFollowToTarget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}/new", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<h1>Moved</h1>"))
        .mount(&server)
        .await;

    let fetcher = test_fetcher(400_000);
    let (status, text) = fetcher.fetch(&format!("{}/old", server.uri())).await.unwrap();

    assert_eq!(status, 200);
    assert_eq!(extract_first_heading(&text), "Moved");
}

/// Test that reading stops once the byte cap has been accumulated
#[tokio::test]
async fn test_fetch_withOversizedBody_shouldStopAtByteCap() {
    let server = MockServer::start().await;
    let mut body = String::from("<h1>Head</h1>");
    body.push_str(&"x".repeat(100_000));
    Mock::given(method("GET"))
        .and(path("/big"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8"))
        .mount(&server)
        .await;

    let fetcher = test_fetcher(1_000);
    let (_, text) = fetcher.fetch(&format!("{}/big", server.uri())).await.unwrap();

    // Truncation may land past the cap at a chunk boundary, but never reads
    // the whole body, and the head of the page is intact.
    assert!(text.len() < 100_000);
    assert_eq!(extract_first_heading(&text), "Head");
}

/// Test decoding of a response with a declared non-UTF-8 charset
#[tokio::test]
async fn test_fetch_withLatin1Charset_shouldDecodeDeclaredEncoding() {
    let server = MockServer::start().await;
    // "café" with 0xE9, valid ISO-8859-1 but invalid UTF-8
    let body: Vec<u8> = b"<h1>caf\xe9</h1>".to_vec();
    Mock::given(method("GET"))
        .and(path("/latin1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=iso-8859-1"))
        .mount(&server)
        .await;

    let fetcher = test_fetcher(400_000);
    let (_, text) = fetcher
        .fetch(&format!("{}/latin1", server.uri()))
        .await
        .unwrap();

    assert_eq!(extract_first_heading(&text), "café");
}

/// Test that invalid bytes under the fallback decoder never fail the fetch
#[tokio::test]
async fn test_fetch_withInvalidUtf8AndNoCharset_shouldDecodeLossily() {
    let server = MockServer::start().await;
    let body: Vec<u8> = b"<h1>ok\xff\xfe</h1>".to_vec();
    Mock::given(method("GET"))
        .and(path("/binary"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .mount(&server)
        .await;

    let fetcher = test_fetcher(400_000);
    let (status, text) = fetcher
        .fetch(&format!("{}/binary", server.uri()))
        .await
        .unwrap();

    assert_eq!(status, 200);
    assert!(text.contains("ok"));
}

/// Test that a connection failure surfaces as a transport error
#[tokio::test]
async fn test_fetch_withUnreachableHost_shouldReturnTransportError() {
    let fetcher = test_fetcher(400_000);

    let error = fetcher.fetch("http://127.0.0.1:1/unreachable").await.unwrap_err();

    match error {
        FetchError::Transport(message) => assert!(!message.is_empty()),
        other => panic!("expected Transport, got {other}"),
    }
}
