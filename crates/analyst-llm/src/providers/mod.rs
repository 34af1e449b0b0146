//! Concrete text-generation provider implementations
//!
//! This module contains implementations of the TextGenerator trait for
//! various generation services.

#[cfg(feature = "gemini")]
pub mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::{GeminiConfig, GeminiProvider};
