/*!
 * Batch job orchestration.
 *
 * This module drives each job end to end: request-shape validation, input
 * cleaning and truncation, the per-item pipeline under the batch budget, and
 * assembly of the final result list. Per-item failures become failed result
 * rows; only shape validation and genuine defects escape as job errors.
 */

use std::sync::Arc;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::app_config::Config;
use crate::batch::{BatchBudget, BoundedBatchIter};
use crate::errors::JobError;
use crate::extractor::extract_first_heading;
use crate::fetcher::PageFetcher;
use crate::providers::TextProvider;
use crate::translation::reconcile::reconcile;
use crate::translation::request::TranslationRequestBuilder;
use crate::translation::{TranslationItem, TranslationOutcome};

/// Per-URL fetch result row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchOutcome {
    /// The URL as accepted into the batch
    pub url: String,

    /// Whether the page was fetched and decoded
    pub ok: bool,

    /// HTTP status code, present when `ok` is true
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    /// Flattened first-heading text, present when `ok` is true
    ///
    /// Empty when the page has no heading; absence of a heading is a success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h1_raw: Option<String>,

    /// Error description, present when `ok` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Orchestrator for the extract and translate batch jobs
pub struct BatchOrchestrator {
    /// Resource caps shared by both jobs
    budget: BatchBudget,

    /// Bounded page fetcher for the extract job
    fetcher: PageFetcher,

    /// Generation provider for the translate job
    provider: Arc<dyn TextProvider>,

    /// Builder for the single translation call per batch
    request_builder: TranslationRequestBuilder,
}

impl BatchOrchestrator {
    /// Create an orchestrator from configuration and its collaborators
    pub fn new(config: &Config, fetcher: PageFetcher, provider: Arc<dyn TextProvider>) -> Self {
        Self {
            budget: config.batch.budget(),
            fetcher,
            provider,
            request_builder: TranslationRequestBuilder::new(config.provider.max_output_tokens),
        }
    }

    /// Run the fetch/extract job over the request's `urls` field
    ///
    /// A missing or null field is an empty batch; a present non-list field is
    /// a validation error raised before any per-item work. Blank entries are
    /// skipped without emitting a row. Each URL's failure is captured as an
    /// `ok: false` row and the batch continues.
    pub async fn run_extract(&self, urls: Option<&Value>) -> Result<Vec<FetchOutcome>, JobError> {
        let raw_urls = match urls {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => entries.clone(),
            Some(_) => return Err(JobError::Validation("urls must be a list".to_string())),
        };

        let mut results = Vec::new();
        // Truncation happens before blank-skipping: the count cap applies to
        // the raw input, matching the contract for oversized batches.
        for entry in BoundedBatchIter::new(raw_urls, &self.budget) {
            let url = coerce_to_string(&entry);
            let url = url.trim();
            if url.is_empty() {
                continue;
            }
            results.push(self.fetch_one(url).await);
        }

        info!("extract_h1 batch finished with {} result rows", results.len());
        Ok(results)
    }

    /// Fetch and extract a single page, converting failure into a result row
    async fn fetch_one(&self, url: &str) -> FetchOutcome {
        match self.fetcher.fetch(url).await {
            Ok((status_code, text)) => {
                let h1 = extract_first_heading(&text);
                debug!("Fetched {} ({}): h1 {:?}", url, status_code, h1);
                FetchOutcome {
                    url: url.to_string(),
                    ok: true,
                    status_code: Some(status_code),
                    h1_raw: Some(h1),
                    error: None,
                }
            }
            Err(e) => {
                warn!("Fetch failed for {}: {}", url, e);
                FetchOutcome {
                    url: url.to_string(),
                    ok: false,
                    status_code: None,
                    h1_raw: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Run the translate job over the request's `items` field
    ///
    /// Items failing cheap validation (missing/null id, blank text) are
    /// dropped silently during cleaning. An empty cleaned list short-circuits
    /// to an empty result without calling the provider. The provider is
    /// called exactly once; a transport failure degrades to an empty raw
    /// response so every row carries the missing-translation sentinel rather
    /// than failing the job.
    pub async fn run_translate(
        &self,
        items: Option<&Value>,
    ) -> Result<Vec<TranslationOutcome>, JobError> {
        let raw_items = match items {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => entries.clone(),
            Some(_) => return Err(JobError::Validation("items must be a list".to_string())),
        };

        let cleaned: Vec<TranslationItem> =
            BoundedBatchIter::new(raw_items, &self.budget)
                .filter_map(|entry| clean_item(&entry))
                .collect();

        if cleaned.is_empty() {
            return Ok(Vec::new());
        }

        let request = self.request_builder.build(&cleaned)?;
        let raw_output = match self.provider.generate(request).await {
            Ok(output) => output,
            Err(e) => {
                warn!("Translation provider call failed: {}", e);
                String::new()
            }
        };

        let results = reconcile(&cleaned, &raw_output);
        info!(
            "translate_batch finished: {} of {} items translated",
            results.iter().filter(|r| r.ok).count(),
            results.len()
        );
        Ok(results)
    }
}

/// Coerce a JSON value to the string form a URL entry is processed as
fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Validate one raw item, dropping it unless id and text pass cheap checks
///
/// Dropped items never existed as far as the batch is concerned: they are not
/// reported as errors and emit no result row.
fn clean_item(entry: &Value) -> Option<TranslationItem> {
    let obj = entry.as_object()?;
    let id = obj.get("id")?;
    if id.is_null() {
        return None;
    }
    let text = obj.get("text").and_then(Value::as_str)?;
    if text.trim().is_empty() {
        return None;
    }
    let lang = obj
        .get("lang")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Some(TranslationItem {
        id: id.clone(),
        text: text.to_string(),
        lang,
    })
}
