//! Text-generation provider abstraction layer for analyst-rs
//!
//! This crate provides provider-agnostic abstractions for single-shot text
//! generation against Large Language Model services. It includes:
//!
//! - Generation request/response types
//! - Provider trait for text-generation implementations
//! - Concrete provider implementations (behind feature flags)
//!
//! The contract is deliberately narrow: one prompt in, one opaque block of
//! markdown-flavored prose out. No streaming, no tool calling, no
//! conversation history.

pub mod error;
pub mod generation;
pub mod provider;

// Re-export main types
pub use error::{GenerationError, Result};
pub use generation::{FinishReason, GenerationRequest, GenerationResponse, TokenUsage};
pub use provider::TextGenerator;

// Provider implementations (feature-gated)
#[cfg(feature = "gemini")]
pub mod providers;
