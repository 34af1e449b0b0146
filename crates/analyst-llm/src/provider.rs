//! Text-generation provider trait definition

use crate::{GenerationRequest, GenerationResponse, Result};
use async_trait::async_trait;

/// Trait for text-generation providers
///
/// Implementations of this trait provide access to different text-generation
/// services (e.g., Google Gemini). The call is single-shot and blocking from
/// the caller's perspective; implementations must enforce a transport-level
/// timeout on the underlying network request.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text from the given prompt
    ///
    /// # Arguments
    ///
    /// * `request` - The generation request with model, prompt, and parameters
    ///
    /// # Returns
    ///
    /// The generation response with the produced text and metadata
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse>;

    /// Get the provider name (e.g., "gemini")
    fn name(&self) -> &str;
}
