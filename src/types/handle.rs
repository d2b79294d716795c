//! Handle type for drawing objects
//!
//! DXF writes handles as hexadecimal strings. They are kept as written, with
//! surrounding whitespace trimmed, and compare by that text: `00AF` and `AF`
//! are different handles. Writers emit references (`ownerHandle`, code 330)
//! in the same form as the handle they point to.

use serde::Serialize;
use std::fmt;

/// An opaque object identifier (group code 5, 105, 330..369, 390..399)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    /// Create a handle from its textual form
    pub fn new(value: impl Into<String>) -> Self {
        Handle(value.into().trim().to_string())
    }

    /// The handle text as it appeared in the file
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the handle, if the text is valid hexadecimal
    pub fn value(&self) -> Option<u64> {
        u64::from_str_radix(&self.0, 16).ok()
    }

    /// Handle "0" is used by writers to mean "no owner"
    pub fn is_null(&self) -> bool {
        self.0.is_empty() || self.value() == Some(0)
    }
}

impl From<&str> for Handle {
    fn from(value: &str) -> Self {
        Handle::new(value)
    }
}

impl From<String> for Handle {
    fn from(value: String) -> Self {
        Handle::new(value)
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_keeps_text() {
        let h = Handle::new("00Af");
        assert_eq!(h.as_str(), "00Af");
        assert_eq!(h.to_string(), "00Af");
    }

    #[test]
    fn test_handle_value() {
        assert_eq!(Handle::new("1F").value(), Some(0x1F));
        assert_eq!(Handle::new("zz").value(), None);
    }

    #[test]
    fn test_handle_trims_whitespace() {
        assert_eq!(Handle::new(" 2A "), Handle::new("2A"));
    }

    #[test]
    fn test_null_handle() {
        assert!(Handle::new("0").is_null());
        assert!(Handle::default().is_null());
        assert!(!Handle::new("1F").is_null());
    }
}
