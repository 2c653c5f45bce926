/*!
 * Bounded single-page fetching.
 *
 * This module performs one HTTP GET per URL with connect/read timeouts,
 * redirect following and a hard cap on how many body bytes are read. The body
 * is decoded using the response's declared charset, falling back to lossy
 * UTF-8, so decoding itself never fails a fetch.
 */

use std::time::Duration;

use bytes::BytesMut;
use encoding_rs::{Encoding, UTF_8};
use futures::StreamExt;
use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::errors::FetchError;

/// Descriptive client identifier sent with every page request
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; MedReviewsBot/1.0)";

/// Build the pooled HTTP client used for page fetching
///
/// One client per process; it is passed into [`PageFetcher`] rather than held
/// as global state so tests can construct their own.
pub fn build_http_client(connect_timeout: Duration, read_timeout: Duration) -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(connect_timeout)
        .timeout(read_timeout)
        .build()
        .unwrap_or_default()
}

/// Fetcher for a single bounded page download
#[derive(Debug, Clone)]
pub struct PageFetcher {
    /// HTTP client (pool-scoped, shared across a batch)
    client: Client,
    /// Maximum number of body bytes accumulated before reading stops
    max_body_bytes: usize,
}

impl PageFetcher {
    /// Create a fetcher reading at most `max_body_bytes` per page
    pub fn new(client: Client, max_body_bytes: usize) -> Self {
        Self { client, max_body_bytes }
    }

    /// Fetch one URL and return `(status_code, decoded_text)`
    ///
    /// Follows redirects, fails on non-2xx statuses, and stops reading as soon
    /// as the byte cap has been accumulated (truncation lands on a chunk
    /// boundary). Network-layer errors carry the transport error's text.
    pub async fn fetch(&self, url: &str) -> Result<(u16, String), FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        let declared_charset = charset_from_content_type(
            response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
        );

        // Read only the head of the page to bound memory per item.
        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            body.extend_from_slice(&chunk);
            if body.len() >= self.max_body_bytes {
                debug!("Byte cap reached for {} at {} bytes", url, body.len());
                break;
            }
        }

        let text = decode_body(&body, declared_charset.as_deref());
        Ok((status.as_u16(), text))
    }
}

/// Pull the `charset` parameter out of a Content-Type header value
fn charset_from_content_type(content_type: Option<&str>) -> Option<String> {
    let content_type = content_type?;
    content_type.split(';').map(str::trim).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.eq_ignore_ascii_case("charset") {
            Some(value.trim_matches('"').to_string())
        } else {
            None
        }
    })
}

/// Decode raw body bytes using the declared charset, lossy UTF-8 otherwise
///
/// Unknown charset labels and invalid byte sequences both degrade to
/// replacement characters; decoding never returns an error.
fn decode_body(bytes: &[u8], declared_charset: Option<&str>) -> String {
    let encoding = declared_charset
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}
