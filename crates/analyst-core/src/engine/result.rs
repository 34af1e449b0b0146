//! Report request and result types

use crate::language::ReportLanguage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User-facing input bundle for one report
///
/// Immutable once built. The ticker is carried as entered; the pipeline
/// performs normalization and validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Ticker symbol, as entered by the user
    pub ticker: String,
    /// Generation model identifier
    pub model: String,
    /// Output language
    pub language: ReportLanguage,
}

impl ReportRequest {
    pub fn new(
        ticker: impl Into<String>,
        model: impl Into<String>,
        language: ReportLanguage,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            model: model.into(),
            language,
        }
    }
}

/// Classified failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// Empty/malformed ticker; detected before any network call
    InvalidInput,
    /// Data provider failure; downgrades the request to degraded-data mode
    /// and never terminates it
    DataProvider,
    /// Generation service failure; terminal for the request
    Generation,
    /// Missing credential; fatal at process start, never per-request
    Configuration,
}

/// Exactly one of report text or classified failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReportOutcome {
    /// Generated report text (non-empty)
    Report(String),
    /// Classified failure
    Failed {
        kind: FailureKind,
        message: String,
    },
}

/// Result of one report request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResult {
    /// Normalized ticker echo
    pub ticker: String,
    /// Requested output language echo
    pub language: ReportLanguage,
    /// Timestamp of completion
    pub generated_at: DateTime<Utc>,
    /// Report text or classified failure
    pub outcome: ReportOutcome,
}

impl ReportResult {
    /// Build a successful result
    pub fn success(
        ticker: impl Into<String>,
        language: ReportLanguage,
        report_text: impl Into<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            language,
            generated_at: Utc::now(),
            outcome: ReportOutcome::Report(report_text.into()),
        }
    }

    /// Build a failed result
    pub fn failure(
        ticker: impl Into<String>,
        language: ReportLanguage,
        kind: FailureKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            language,
            generated_at: Utc::now(),
            outcome: ReportOutcome::Failed {
                kind,
                message: message.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ReportOutcome::Report(_))
    }

    /// The report text, when generation succeeded
    pub fn report_text(&self) -> Option<&str> {
        match &self.outcome {
            ReportOutcome::Report(text) => Some(text),
            ReportOutcome::Failed { .. } => None,
        }
    }

    /// The failure category, when the request failed
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match &self.outcome {
            ReportOutcome::Report(_) => None,
            ReportOutcome::Failed { kind, .. } => Some(*kind),
        }
    }

    /// The failure message, when the request failed
    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            ReportOutcome::Report(_) => None,
            ReportOutcome::Failed { message, .. } => Some(message),
        }
    }

    /// Deterministic export filename: ticker, language suffix, generation date
    ///
    /// e.g. `NVDA_Report_EN_20251121.md`
    pub fn export_file_name(&self) -> String {
        format!(
            "{}_Report_{}_{}.md",
            self.ticker,
            self.language.file_suffix(),
            self.generated_at.format("%Y%m%d")
        )
    }
}
