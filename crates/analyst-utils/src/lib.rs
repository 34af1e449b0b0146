//! Shared utilities for analyst-rs
//!
//! This crate provides common functionality used across the analyst-rs
//! workspace, currently limited to logging setup.

pub mod logging;

pub use logging::init_tracing;
