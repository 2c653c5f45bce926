/*!
 * Translation request construction.
 *
 * Builds the single generation-service call for one batch: a fixed
 * instruction block declaring the target language and required JSON output
 * schema, plus a lossless serialization of the cleaned items.
 */

use anyhow::{Context, Result};
use serde_json::json;

use super::TranslationItem;
use crate::providers::GenerationRequest;

/// The fixed instruction block sent with every translation batch.
const TRANSLATOR_INSTRUCTIONS: &str = r#"You are a professional translator. Translate each item's "text" into Hebrew.

## Output Requirements
- Return ONLY a JSON object matching this exact schema:
  {"results": [{"id": <the item's id, unchanged>, "he": "<Hebrew translation>"}]}
- Return one result per input item, echoing each item's "id" verbatim
- Do not include any text outside the JSON object

## Quality Standards
- Preserve proper nouns, numbers and punctuation exactly
- Natural, idiomatic Hebrew
- Translate only the "text" field; ignore all other fields"#;

/// Builder for the batch translation call
#[derive(Debug, Clone)]
pub struct TranslationRequestBuilder {
    /// Cap on the tokens the service may generate for one batch
    max_output_tokens: u32,
}

impl TranslationRequestBuilder {
    /// Create a builder with the given output-token cap
    pub fn new(max_output_tokens: u32) -> Self {
        Self { max_output_tokens }
    }

    /// Build the generation request for one cleaned, non-empty batch
    ///
    /// The payload is `{"items": [...]}` serialized losslessly, non-ASCII
    /// text included uncoerced. Callers must not invoke this with an empty
    /// list; the orchestrator short-circuits that case to an empty result.
    pub fn build(&self, cleaned: &[TranslationItem]) -> Result<GenerationRequest> {
        let input = serde_json::to_string(&json!({ "items": cleaned }))
            .context("Failed to serialize translation items")?;

        Ok(GenerationRequest {
            instructions: TRANSLATOR_INSTRUCTIONS.to_string(),
            input,
            max_output_tokens: self.max_output_tokens,
            json_object_mode: true,
        })
    }
}
