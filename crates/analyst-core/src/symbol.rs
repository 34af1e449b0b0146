//! Ticker symbol type

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A case-normalized stock ticker symbol
///
/// Construction only trims whitespace, rejects the empty string, and
/// upper-cases. No syntactic validation beyond that is performed; an invalid
/// symbol surfaces as a data-provider failure downstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickerSymbol(String);

impl TickerSymbol {
    /// Create a ticker symbol from user input
    pub fn new(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ReportError::InvalidSymbol(
                "ticker symbol must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// Get the normalized symbol as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TickerSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TickerSymbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_cases() {
        let symbol = TickerSymbol::new("nvda").unwrap();
        assert_eq!(symbol.as_str(), "NVDA");
    }

    #[test]
    fn test_trims_whitespace() {
        let symbol = TickerSymbol::new("  aapl \n").unwrap();
        assert_eq!(symbol.as_str(), "AAPL");
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            TickerSymbol::new(""),
            Err(ReportError::InvalidSymbol(_))
        ));
        assert!(matches!(
            TickerSymbol::new("   "),
            Err(ReportError::InvalidSymbol(_))
        ));
    }

    #[test]
    fn test_no_further_validation() {
        // Syntactically odd symbols pass; only the provider can reject them.
        let symbol = TickerSymbol::new("zzzzinvalid").unwrap();
        assert_eq!(symbol.as_str(), "ZZZZINVALID");
    }

    #[test]
    fn test_display() {
        let symbol = TickerSymbol::new("msft").unwrap();
        assert_eq!(format!("{symbol}"), "MSFT");
    }
}
