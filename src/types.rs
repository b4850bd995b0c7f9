use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// Longest username, in characters, that will be put into a token.
pub const MAX_USERNAME_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[repr(transparent)]
pub struct Username(String);

impl Username {
    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        if raw.trim().is_empty() {
            return Err(TokenError::InvalidUsername {
                reason: "username must not be empty",
            });
        }
        if raw.chars().count() > MAX_USERNAME_LEN {
            return Err(TokenError::InvalidUsername {
                reason: "username is too long",
            });
        }

        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The payload carried by every token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Claims {
    username: String,
    exp: u64,
}

impl Claims {
    pub(crate) fn new(username: Username, exp: u64) -> Self {
        Self {
            username: username.0,
            exp,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Expiry as seconds since the Unix epoch.
    pub fn expires_at(&self) -> u64 {
        self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_names() {
        assert_eq!(Username::parse("loremIpsum").unwrap().as_str(), "loremIpsum");
        assert_eq!(Username::parse("Sam I Am").unwrap().as_str(), "Sam I Am");
    }

    #[test]
    fn rejects_blank_names() {
        for raw in ["", "   ", "\t\n"] {
            assert!(matches!(
                Username::parse(raw),
                Err(TokenError::InvalidUsername { .. })
            ));
        }
    }

    #[test]
    fn length_limit_counts_characters() {
        let at_limit = "é".repeat(MAX_USERNAME_LEN);
        assert!(Username::parse(&at_limit).is_ok());

        let over_limit = "a".repeat(MAX_USERNAME_LEN + 1);
        assert!(matches!(
            Username::parse(&over_limit),
            Err(TokenError::InvalidUsername { .. })
        ));
    }

    #[test]
    fn claims_use_short_field_names() {
        let claims = Claims::new(Username::parse("loremIpsum").unwrap(), 42);
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json, serde_json::json!({ "username": "loremIpsum", "exp": 42 }));
    }
}
