/*!
 * Provider implementations for the text-generation service.
 *
 * This module defines the seam between the batch engine and whichever
 * generative-text backend produces translations:
 * - OpenAI: OpenAI-compatible chat-completions API
 * - Mock: scripted provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// One opaque text-in/text-out call to the generation service
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Fixed instruction block guiding the model
    pub instructions: String,

    /// The payload the model operates on
    pub input: String,

    /// Hard cap on the number of tokens the service may generate
    pub max_output_tokens: u32,

    /// Whether to request the service's strict JSON-object output mode
    pub json_object_mode: bool,
}

/// Common trait for text-generation providers
///
/// The engine treats the provider as an opaque function from a request to raw
/// output text. A single attempt is made per batch; retries are the caller's
/// decision and the engine never makes one.
#[async_trait]
pub trait TextProvider: Send + Sync + Debug {
    /// Run one generation call and return the raw output text
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError>;
}

pub mod mock;
pub mod openai;
