//! Credential handling
//!
//! The Table API password is held in a [`SecretString`]: a `secrecy`
//! container around a zeroize-on-drop newtype. Debug output is redacted and
//! reading the value requires an explicit `expose_secret()`.
//!
//! ```rust
//! use snowbridge::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let password = secret_string("my-password".to_string());
//! assert_eq!(password.expose_secret().as_ref(), "my-password");
//! assert!(!format!("{password:?}").contains("my-password"));
//! ```

use base64::{engine::general_purpose, Engine as _};
use secrecy::{CloneableSecret, DebugSecret, ExposeSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// String newtype that is zeroed when dropped
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Whether the value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// A secret string, redacted in Debug output
pub type SecretString = Secret<SecretValue>;

/// Wraps a plain string in a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// Builds the `Authorization` header value for HTTP Basic authentication.
///
/// The encoded credentials are themselves secret, so they are returned
/// wrapped.
pub fn basic_auth_header(username: &str, password: &SecretString) -> SecretString {
    let mut credentials = format!("{username}:{}", password.expose_secret().as_ref());
    let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
    credentials.zeroize();
    secret_string(format!("Basic {encoded}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("sensitive-data".to_string());
        let debug_output = format!("{secret:?}");

        assert!(!debug_output.contains("sensitive-data"));
        assert!(debug_output.contains("REDACTED"));
    }

    #[test]
    fn test_secret_serde() {
        #[derive(Serialize, Deserialize)]
        struct Credentials {
            password: SecretString,
        }

        let decoded: Credentials = toml::from_str("password = \"test123\"").unwrap();
        assert_eq!(decoded.password.expose_secret().as_ref(), "test123");
        assert!(!decoded.password.expose_secret().is_empty());
    }

    #[test]
    fn test_basic_auth_header() {
        let header = basic_auth_header("admin", &secret_string("admin".to_string()));
        assert_eq!(header.expose_secret().as_ref(), "Basic YWRtaW46YWRtaW4=");
    }
}
