//! Factor-related type definitions.

use serde::{Deserialize, Serialize};

/// Name of a factor.
///
/// Doubles as the column name for that factor in the combined pipeline
/// output, so names must be unique within one pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FactorName(pub String);

impl FactorName {
    /// Create a new factor name.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the factor name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FactorName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FactorName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for FactorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_name_roundtrip() {
        let name = FactorName::new("ten_day_momentum");
        assert_eq!(name.as_str(), "ten_day_momentum");
        assert_eq!(name.to_string(), "ten_day_momentum");
    }
}
