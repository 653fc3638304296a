#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Collision severity code taxonomy.
//!
//! SDOT-style severity codes form an open vocabulary: five codes have been
//! observed in source data (`"3"`, `"2b"`, `"2"`, `"1"`, `"0"`) but new
//! ones may appear at any time, so the type preserves unrecognized codes
//! verbatim rather than rejecting them.

use serde::{Deserialize, Serialize};

/// A collision severity code as reported by the data source.
///
/// Codes are matched case-sensitively: `"2B"` is not the same code as
/// `"2b"` and is preserved as [`Self::Other`]. A missing or blank code
/// normalizes to [`Self::Unknown`], never to an absent value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum SeverityCode {
    /// Code `"3"`: at least one fatality.
    Fatality,
    /// Code `"2b"`: serious injury.
    SeriousInjury,
    /// Code `"2"`: injury.
    Injury,
    /// Code `"1"`: property damage only.
    PropertyDamage,
    /// Code `"0"`: severity unknown, or the source omitted the field.
    Unknown,
    /// Any other code, preserved exactly as reported (trimmed).
    Other(String),
}

impl SeverityCode {
    /// Parses a severity code from source text. Never fails: blank input
    /// maps to [`Self::Unknown`] and unrecognized codes are kept in
    /// [`Self::Other`].
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "3" => Self::Fatality,
            "2b" => Self::SeriousInjury,
            "2" => Self::Injury,
            "1" => Self::PropertyDamage,
            "0" | "" => Self::Unknown,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the wire code for this severity.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Fatality => "3",
            Self::SeriousInjury => "2b",
            Self::Injury => "2",
            Self::PropertyDamage => "1",
            Self::Unknown => "0",
            Self::Other(code) => code,
        }
    }

    /// Returns a human-readable label for this severity.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Fatality => "Fatality",
            Self::SeriousInjury => "Serious injury",
            Self::Injury => "Injury",
            Self::PropertyDamage => "Property damage",
            Self::Unknown => "Unknown",
            Self::Other(code) => code,
        }
    }

    /// Returns the map fill color for this severity. Unrecognized and
    /// unknown codes share a neutral fallback color.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        match self {
            Self::Fatality => "#7a0019",
            Self::SeriousInjury => "#b03060",
            Self::Injury => "#ff7f50",
            Self::PropertyDamage => "#1f77b4",
            Self::Unknown | Self::Other(_) => "#999999",
        }
    }
}

impl std::fmt::Display for SeverityCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl From<String> for SeverityCode {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<SeverityCode> for String {
    fn from(severity: SeverityCode) -> Self {
        severity.code().to_string()
    }
}

/// A severity selection from the dashboard's severity control: either the
/// `"ALL"` pass-through or one exact code to match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SeverityFilter {
    /// No severity constraint.
    #[default]
    All,
    /// Match records whose severity code equals this code exactly.
    Code(SeverityCode),
}

impl SeverityFilter {
    /// Parses a selector value: `"ALL"` means no constraint, anything
    /// else is an exact code.
    #[must_use]
    pub fn from_selection(selection: &str) -> Self {
        if selection.trim() == "ALL" {
            Self::All
        } else {
            Self::Code(SeverityCode::from_code(selection))
        }
    }

    /// Whether a record with the given severity passes this filter.
    #[must_use]
    pub fn matches(&self, severity: &SeverityCode) -> bool {
        match self {
            Self::All => true,
            Self::Code(code) => code == severity,
        }
    }
}

impl std::fmt::Display for SeverityFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
            Self::Code(code) => f.write_str(code.code()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_roundtrip() {
        for code in ["3", "2b", "2", "1", "0"] {
            let severity = SeverityCode::from_code(code);
            assert_eq!(severity.code(), code);
            assert!(!matches!(severity, SeverityCode::Other(_)));
        }
    }

    #[test]
    fn blank_code_is_unknown() {
        assert_eq!(SeverityCode::from_code(""), SeverityCode::Unknown);
        assert_eq!(SeverityCode::from_code("   "), SeverityCode::Unknown);
    }

    #[test]
    fn unrecognized_code_preserved_verbatim() {
        let severity = SeverityCode::from_code("  4x ");
        assert_eq!(severity, SeverityCode::Other("4x".to_string()));
        assert_eq!(severity.code(), "4x");
        assert_eq!(severity.color(), "#999999");
    }

    #[test]
    fn code_matching_is_case_sensitive() {
        assert_eq!(
            SeverityCode::from_code("2B"),
            SeverityCode::Other("2B".to_string())
        );
        assert_ne!(SeverityCode::from_code("2B"), SeverityCode::SeriousInjury);
    }

    #[test]
    fn all_filter_matches_everything() {
        let filter = SeverityFilter::All;
        assert!(filter.matches(&SeverityCode::Fatality));
        assert!(filter.matches(&SeverityCode::Other("weird".to_string())));
    }

    #[test]
    fn code_filter_matches_exactly() {
        let filter = SeverityFilter::from_selection("2b");
        assert!(filter.matches(&SeverityCode::SeriousInjury));
        assert!(!filter.matches(&SeverityCode::Injury));
        assert!(!filter.matches(&SeverityCode::Other("2B".to_string())));
    }

    #[test]
    fn selection_parsing() {
        assert_eq!(SeverityFilter::from_selection("ALL"), SeverityFilter::All);
        assert_eq!(
            SeverityFilter::from_selection("3"),
            SeverityFilter::Code(SeverityCode::Fatality)
        );
        assert_eq!(SeverityFilter::from_selection("ALL").to_string(), "ALL");
        assert_eq!(SeverityFilter::from_selection("2b").to_string(), "2b");
    }

    #[test]
    fn serde_uses_wire_code() {
        let json = serde_json::to_string(&SeverityCode::SeriousInjury).unwrap();
        assert_eq!(json, "\"2b\"");
        let back: SeverityCode = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(back, SeverityCode::Fatality);
    }
}
