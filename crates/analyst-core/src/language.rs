//! Report language support
//!
//! The pipeline produces reports in one of two fixed languages. The language
//! choice selects exactly one of two fixed directive strings inside the
//! prompt; the two variants are never blended.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output language for a generated report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReportLanguage {
    /// Chinese (Simplified) - the default report language
    #[default]
    Chinese,
    /// English
    English,
}

impl ReportLanguage {
    /// Get ISO 639-1 language code
    pub fn code(&self) -> &'static str {
        match self {
            ReportLanguage::Chinese => "zh",
            ReportLanguage::English => "en",
        }
    }

    /// Get language name for display
    pub fn name(&self) -> &'static str {
        match self {
            ReportLanguage::Chinese => "Chinese",
            ReportLanguage::English => "English",
        }
    }

    /// The hard language directive embedded in the prompt
    ///
    /// Worded as an absolute constraint so the generation service treats it
    /// as such.
    pub fn directive(&self) -> &'static str {
        match self {
            ReportLanguage::Chinese => "The final output MUST be in **CHINESE (简体中文)**.",
            ReportLanguage::English => "The final output MUST be in **ENGLISH**.",
        }
    }

    /// Suffix used in exported report filenames
    pub fn file_suffix(&self) -> &'static str {
        match self {
            ReportLanguage::Chinese => "CN",
            ReportLanguage::English => "EN",
        }
    }

    /// Parse from ISO 639-1 code or common name
    ///
    /// Returns `None` for anything that is not one of the two supported
    /// languages.
    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Some(ReportLanguage::English),
            "zh" | "chinese" | "中文" | "简体中文" | "zh-cn" | "zh-hans" => {
                Some(ReportLanguage::Chinese)
            },
            _ => None,
        }
    }
}

impl fmt::Display for ReportLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_code() {
        assert_eq!(ReportLanguage::English.code(), "en");
        assert_eq!(ReportLanguage::Chinese.code(), "zh");
    }

    #[test]
    fn test_from_code() {
        assert_eq!(
            ReportLanguage::from_code("en"),
            Some(ReportLanguage::English)
        );
        assert_eq!(
            ReportLanguage::from_code("English"),
            Some(ReportLanguage::English)
        );
        assert_eq!(
            ReportLanguage::from_code("zh"),
            Some(ReportLanguage::Chinese)
        );
        assert_eq!(
            ReportLanguage::from_code("简体中文"),
            Some(ReportLanguage::Chinese)
        );
        assert_eq!(ReportLanguage::from_code("ja"), None);
    }

    #[test]
    fn test_directives_are_distinct() {
        assert_ne!(
            ReportLanguage::English.directive(),
            ReportLanguage::Chinese.directive()
        );
    }

    #[test]
    fn test_file_suffix() {
        assert_eq!(ReportLanguage::English.file_suffix(), "EN");
        assert_eq!(ReportLanguage::Chinese.file_suffix(), "CN");
    }

    #[test]
    fn test_default_is_chinese() {
        assert_eq!(ReportLanguage::default(), ReportLanguage::Chinese);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ReportLanguage::English), "English");
        assert_eq!(format!("{}", ReportLanguage::Chinese), "Chinese");
    }

    #[test]
    fn test_serde() {
        let lang = ReportLanguage::Chinese;
        let json = serde_json::to_string(&lang).unwrap();
        let parsed: ReportLanguage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, lang);
    }
}
