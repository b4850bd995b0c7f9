use std::{fmt, time::Duration};

use crate::error::TokenError;

/// Token lifetime used when none is configured.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(5 * 60);

pub const SECRET_ENV: &str = "TOKEN_SECRET";
pub const TTL_ENV: &str = "TOKEN_TTL_SECS";

#[derive(Clone)]
pub struct TokenConfig {
    /// The key used to sign tokens. If it changes, every outstanding token stops validating.
    pub secret: Vec<u8>,
    /// How long a token remains valid after it is issued.
    pub ttl: Duration,
}

impl TokenConfig {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            ttl: DEFAULT_TOKEN_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Reads `TOKEN_SECRET` (required) and `TOKEN_TTL_SECS` (optional, in seconds).
    pub fn from_env() -> Result<Self, TokenError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TokenError> {
        let secret = lookup(SECRET_ENV)
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| TokenError::Config {
                message: format!("{} must be set to a non-empty value", SECRET_ENV),
            })?;

        let ttl = match lookup(TTL_ENV) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(TokenError::Config {
                        message: format!("{} must be a positive number of seconds, got {:?}", TTL_ENV, raw),
                    })
                }
            },
            None => DEFAULT_TOKEN_TTL,
        };

        Ok(Self::new(secret).with_ttl(ttl))
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn ttl_defaults_to_five_minutes() {
        let config = TokenConfig::from_lookup(lookup_in(&[(SECRET_ENV, "hunter2")])).unwrap();
        assert_eq!(config.secret, b"hunter2");
        assert_eq!(config.ttl, Duration::from_secs(300));
    }

    #[test]
    fn ttl_is_read_in_seconds() {
        let config =
            TokenConfig::from_lookup(lookup_in(&[(SECRET_ENV, "hunter2"), (TTL_ENV, "90")]))
                .unwrap();
        assert_eq!(config.ttl, Duration::from_secs(90));
    }

    #[test]
    fn secret_is_required() {
        assert!(matches!(
            TokenConfig::from_lookup(lookup_in(&[])),
            Err(TokenError::Config { .. })
        ));
        assert!(matches!(
            TokenConfig::from_lookup(lookup_in(&[(SECRET_ENV, "")])),
            Err(TokenError::Config { .. })
        ));
    }

    #[test]
    fn bad_ttl_is_rejected() {
        for ttl in ["0", "-5", "soon"] {
            assert!(matches!(
                TokenConfig::from_lookup(lookup_in(&[(SECRET_ENV, "hunter2"), (TTL_ENV, ttl)])),
                Err(TokenError::Config { .. })
            ));
        }
    }

    #[test]
    fn debug_hides_the_secret() {
        let printed = format!("{:?}", TokenConfig::new("hunter2"));
        assert!(!printed.contains("hunter2"));
    }
}
