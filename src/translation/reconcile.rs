/*!
 * Reconciliation of service output onto the original batch.
 *
 * The generation service returns raw text that is supposed to be a JSON
 * object but may arrive wrapped in prose, truncated or entirely malformed.
 * Parsing is a three-step pipeline where each step produces a value, never an
 * exception: direct parse, outermost-brace-span recovery, then an empty
 * result set. Reconciliation then emits exactly one row per cleaned input
 * item, matched by id, in input order.
 */

use std::collections::HashMap;

use log::warn;
use serde_json::Value;

use super::{TranslationItem, TranslationOutcome};

/// Sentinel error for items with no usable translation in the service output
pub const MISSING_TRANSLATION: &str = "missing_or_unparsed_translation";

/// Parse the service's raw output into a JSON value, tolerating prose
///
/// Returns `None` for empty or unrecoverable output. A failed direct parse
/// falls back to the span between the first `{` and the last `}`, which
/// recovers objects wrapped in commentary.
fn parse_raw_output(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if start >= end {
        return None;
    }
    match serde_json::from_str::<Value>(&trimmed[start..=end]) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Could not parse translation output as JSON: {}", e);
            None
        }
    }
}

/// Canonical map key for an item id
///
/// Ids are compared by exact JSON value equality, so `1` and `"1"` are
/// distinct keys.
fn id_key(id: &Value) -> String {
    id.to_string()
}

/// Build the id → translation mapping from a parsed service response
///
/// Reads `results` as an array of objects; rows missing an `id` or not shaped
/// as objects are skipped, a missing `he` defaults to the empty string, and
/// duplicate ids resolve last-write-wins.
fn build_translation_map(parsed: &Value) -> HashMap<String, String> {
    let mut map = HashMap::new();
    let Some(rows) = parsed.get("results").and_then(Value::as_array) else {
        return map;
    };

    for row in rows {
        let Some(obj) = row.as_object() else {
            continue;
        };
        let Some(id) = obj.get("id") else {
            continue;
        };
        let he = obj
            .get("he")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        map.insert(id_key(id), he);
    }
    map
}

/// Reconcile raw service output against the cleaned input batch
///
/// Guarantee: the output has exactly one row per cleaned input item, in input
/// order, regardless of how many, few or malformed rows the service returned.
/// An item gets `ok: true` only when a non-empty (post-trim) translation was
/// found for its id; every other item carries the missing-translation
/// sentinel.
pub fn reconcile(cleaned: &[TranslationItem], raw_output: &str) -> Vec<TranslationOutcome> {
    let translations = match parse_raw_output(raw_output) {
        Some(parsed) => build_translation_map(&parsed),
        None => HashMap::new(),
    };

    cleaned
        .iter()
        .map(|item| {
            let translated = translations
                .get(&id_key(&item.id))
                .map(|he| he.trim())
                .filter(|he| !he.is_empty());

            match translated {
                Some(he) => TranslationOutcome {
                    id: item.id.clone(),
                    ok: true,
                    he: Some(he.to_string()),
                    error: None,
                },
                None => TranslationOutcome {
                    id: item.id.clone(),
                    ok: false,
                    he: None,
                    error: Some(MISSING_TRANSLATION.to_string()),
                },
            }
        })
        .collect()
}
