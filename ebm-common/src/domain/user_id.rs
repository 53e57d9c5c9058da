//! Email-shaped user identifier

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::{Error, Result};

/// Basic local@domain.tld shape; not a full RFC 5322 parser
static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// A validated, lowercase-normalized user email identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Validate the email shape and normalize to lowercase
    pub fn new(email: &str) -> Result<Self> {
        if !EMAIL_SHAPE.is_match(email) {
            return Err(Error::InvalidInput("Invalid email format".to_string()));
        }
        Ok(UserId(email.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_basic_addresses() {
        assert_eq!(UserId::new("a@b.co").unwrap().as_str(), "a@b.co");
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "nope", "a@b", "a b@c.com", "a@b c.com", "@b.com"] {
            assert!(UserId::new(bad).is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn equality_is_case_insensitive_via_normalization() {
        let a = UserId::new("User@Example.COM").unwrap();
        let b = UserId::new("user@example.com").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "user@example.com");
    }
}
