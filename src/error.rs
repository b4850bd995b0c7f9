use jsonwebtoken::errors::ErrorKind;
use warp::reject::Reject;

#[derive(thiserror::Error, Debug)]
pub enum TokenError {
    #[error("failed to sign token: {message}")]
    Signing { message: String },
    #[error("token is malformed")]
    MalformedToken,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    ExpiredToken,
    #[error("invalid username: {reason}")]
    InvalidUsername { reason: &'static str },
    #[error("invalid token configuration: {message}")]
    Config { message: String },
}

impl TokenError {
    /// True for the errors that mean "this request is not authenticated".
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            TokenError::MalformedToken | TokenError::InvalidSignature | TokenError::ExpiredToken
        )
    }
}

// Only used on the validation path; issuance maps its own failures to `Signing`.
impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                TokenError::InvalidSignature
            }
            ErrorKind::ExpiredSignature => TokenError::ExpiredToken,
            _ => TokenError::MalformedToken,
        }
    }
}

impl Reject for TokenError {}
