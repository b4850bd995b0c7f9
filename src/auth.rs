use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, warn};

use crate::{
    config::TokenConfig,
    error::TokenError,
    types::{Claims, Username},
};

pub(crate) struct TokenServiceInternal {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenServiceInternal {
    fn new(config: TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // a token is still good in the exact second it expires, never after
        validation.leeway = 0;
        validation.validate_exp = true;

        Self {
            encoding_key: EncodingKey::from_secret(&config.secret),
            decoding_key: DecodingKey::from_secret(&config.secret),
            config,
            validation,
        }
    }

    pub fn issue_token(&self, username: &str) -> Result<String, TokenError> {
        let username = Username::parse(username)?;

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| TokenError::Signing {
                message: "system clock is set before the unix epoch".into(),
            })?;
        let exp = now.as_secs().saturating_add(self.config.ttl.as_secs());

        let claims = Claims::new(username, exp);
        let token = self.sign(&claims)?;

        debug!(username = claims.username(), exp, "issued token");

        Ok(token)
    }

    fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        if self.config.secret.is_empty() {
            return Err(TokenError::Signing {
                message: "secret key is empty".into(),
            });
        }

        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|err| {
            TokenError::Signing {
                message: err.to_string(),
            }
        })
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        // anyone can sign with an empty key, so nothing it "verifies" is trustworthy
        if self.config.secret.is_empty() {
            warn!("rejected token: secret key is empty");
            return Err(TokenError::InvalidSignature);
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                let err = TokenError::from(err);
                warn!(error = %err, "rejected token");
                err
            })?;

        debug!(username = claims.username(), "validated token");

        Ok(claims)
    }
}

/// Issues and validates signed, short-lived username tokens.
///
/// Cloning is cheap and every clone shares the same key.
#[derive(Clone)]
pub struct TokenService {
    pub(crate) internal: Arc<TokenServiceInternal>,
}

impl TokenService {
    pub fn new(config: TokenConfig) -> Self {
        Self {
            internal: Arc::new(TokenServiceInternal::new(config)),
        }
    }

    /// Builds a token for `username` that expires after the configured ttl.
    ///
    /// Empty, blank or over-long usernames are refused with
    /// [`TokenError::InvalidUsername`]; an unusable key gives [`TokenError::Signing`].
    pub fn issue_token(&self, username: &str) -> Result<String, TokenError> {
        self.internal.issue_token(username)
    }

    /// Checks structure, then signature, then expiry, and returns the claims
    /// only if all three pass.
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.internal.validate_token(token)
    }

    pub fn config(&self) -> &TokenConfig {
        &self.internal.config
    }
}
