//! Input-field type definitions.

use serde::{Deserialize, Serialize};

/// Name of an input data field, e.g. `"close"` or `"open"`.
///
/// A factor declares the fields it needs at construction time; the engine
/// supplies one trailing window per declared field, in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field(pub String);

impl Field {
    /// Create a new field name.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the field name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Daily closing price.
    #[must_use]
    pub fn close() -> Self {
        Self::new("close")
    }

    /// Daily opening price.
    #[must_use]
    pub fn open() -> Self {
        Self::new("open")
    }

    /// Daily traded volume.
    #[must_use]
    pub fn volume() -> Self {
        Self::new("volume")
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Field {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_from_str() {
        let field: Field = "adj_close".into();
        assert_eq!(field.as_str(), "adj_close");
    }

    #[test]
    fn well_known_fields() {
        assert_eq!(Field::close().as_str(), "close");
        assert_eq!(Field::open().as_str(), "open");
        assert_eq!(Field::volume().as_str(), "volume");
    }
}
