/*!
 * Batch translation engine.
 *
 * This module turns a cleaned list of snippets into one generation-service
 * call and reconciles the service's semi-structured answer back onto the
 * original item identifiers:
 * - `translation::request`: builds the instruction block and items payload
 * - `translation::reconcile`: tolerant parsing and id-keyed reconciliation
 */

pub mod reconcile;
pub mod request;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One cleaned translation input item
///
/// Invariant: `id` is a non-null JSON scalar and `text` is non-empty after
/// trimming. Items violating either are dropped during cleaning and never
/// reach the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationItem {
    /// Opaque identifier, echoed back verbatim in the result row
    pub id: Value,

    /// The snippet to translate
    pub text: String,

    /// Source language code
    #[serde(default)]
    pub lang: String,
}

/// Per-item translation result row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationOutcome {
    /// The original item identifier
    pub id: Value,

    /// Whether a non-empty translation was reconciled for this id
    pub ok: bool,

    /// The Hebrew translation, present when `ok` is true
    #[serde(skip_serializing_if = "Option::is_none")]
    pub he: Option<String>,

    /// Error sentinel, present when `ok` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
