//! Domain identifier types with validation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned record identifier (`sys_id`)
///
/// A record carries a `SysId` only once it has been persisted remotely.
///
/// # Examples
///
/// ```
/// use snowbridge::domain::ids::SysId;
/// use std::str::FromStr;
///
/// let id = SysId::from_str("62826bf03710200044e0bfc8bcbe5df1").unwrap();
/// assert_eq!(id.as_str(), "62826bf03710200044e0bfc8bcbe5df1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SysId(String);

impl SysId {
    /// Creates a new SysId, rejecting blank values and values that would
    /// not stay a single URL path segment
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("sys_id cannot be empty".to_string());
        }
        if id == "." || id == ".." {
            return Err(format!("sys_id '{id}' is a relative path segment"));
        }
        if let Some(c) = id
            .chars()
            .find(|&c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_control())
        {
            return Err(format!("sys_id '{id}' contains forbidden character {c:?}"));
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SysId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SysId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for SysId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SysId> for String {
    fn from(id: SysId) -> Self {
        id.0
    }
}

impl AsRef<str> for SysId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sys_id_valid() {
        let id = SysId::new("abc123").unwrap();
        assert_eq!(id.as_str(), "abc123");
        assert_eq!(id.to_string(), "abc123");
        assert_eq!(id.into_inner(), "abc123");
    }

    #[test]
    fn test_sys_id_blank_rejected() {
        assert!(SysId::new("").is_err());
        assert!(SysId::new("   ").is_err());
        assert!("".parse::<SysId>().is_err());
    }

    #[test]
    fn test_sys_id_path_delimiters_rejected() {
        for bad in [
            "../sys_user_group/g1",
            "a/b",
            "..",
            ".",
            "a?sysparm_limit=1",
            "a#b",
            "a%2Fb",
            "a\\b",
            "a\nb",
        ] {
            assert!(SysId::new(bad).is_err(), "accepted {bad:?}");
        }
        assert!(serde_json::from_str::<SysId>("\"../x\"").is_err());
        // dots inside an id are fine
        assert!(SysId::new("a..b").is_ok());
    }

    #[test]
    fn test_sys_id_serde_transparent() {
        let id = SysId::new("abc").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
        let back: SysId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<SysId>("\"\"").is_err());
    }
}
