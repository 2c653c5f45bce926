/*!
 * # medreviews-batch
 *
 * HTTP service for two bounded batch jobs:
 *
 * - `POST /extract_h1`: fetch a list of web pages and return each page's
 *   first-heading text, under a global time budget and a per-page byte cap
 * - `POST /translate_batch`: translate a list of short snippets into Hebrew
 *   via a generative-text provider, reconciling the structured response back
 *   onto the original item identifiers
 *
 * Both jobs process many independent items per request: no single item's
 * failure aborts the batch, and total resource consumption (time, bytes,
 * output tokens) is bounded regardless of the input.
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `batch`: Deadline clock and bounded batch iteration
 * - `fetcher`: Bounded single-page fetching
 * - `extractor`: First-heading extraction from page text
 * - `translation`: Translation request building and response reconciliation
 * - `providers`: Client implementations for generation backends:
 *   - `providers::openai`: OpenAI-compatible chat-completions client
 *   - `providers::mock`: Scripted provider for tests
 * - `orchestrator`: End-to-end batch job driving
 * - `server`: axum routing and HTTP error mapping
 * - `errors`: Custom error types for the service
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod batch;
pub mod errors;
pub mod extractor;
pub mod fetcher;
pub mod orchestrator;
pub mod providers;
pub mod server;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use batch::{BatchBudget, BoundedBatchIter, Deadline};
pub use errors::{FetchError, JobError, ProviderError};
pub use orchestrator::{BatchOrchestrator, FetchOutcome};
pub use translation::{TranslationItem, TranslationOutcome};
