/*!
 * Mock provider implementation for testing.
 *
 * This module provides a scripted provider that simulates the generation
 * service without network access:
 * - `MockProvider::returning(text)` - Always succeeds with a fixed response
 * - `MockProvider::failing()` - Always fails with a request error
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::{GenerationRequest, TextProvider};

/// Behavior mode for the mock provider
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always succeeds with the given raw output text
    Returning(String),
    /// Always fails with a request error
    Failing,
}

/// Mock provider for testing batch translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of generate calls made
    call_count: Arc<AtomicUsize>,
    /// The most recent request, captured for assertions
    last_request: Arc<Mutex<Option<GenerationRequest>>>,
}

impl MockProvider {
    /// Create a mock provider that always returns `text`
    pub fn returning(text: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Returning(text.into()),
            call_count: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a mock provider that always fails
    pub fn failing() -> Self {
        Self {
            behavior: MockBehavior::Failing,
            call_count: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Number of generate calls made so far
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Handle to the captured last request
    pub fn last_request(&self) -> Arc<Mutex<Option<GenerationRequest>>> {
        self.last_request.clone()
    }
}

#[async_trait]
impl TextProvider for MockProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request);
        }

        match &self.behavior {
            MockBehavior::Returning(text) => Ok(text.clone()),
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "mock provider configured to fail".to_string(),
            )),
        }
    }
}
