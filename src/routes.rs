use std::{convert::Infallible, sync::Arc};

use warp::{hyper::StatusCode, Filter, Rejection, Reply};

use crate::{
    auth::{TokenService, TokenServiceInternal},
    error::TokenError,
    types::Claims,
};

const BEARER_PREFIX: &str = "bearer ";

/// Rejects the request unless it carries `Authorization: Bearer <token>` with a
/// valid token, and otherwise hands the token's claims to the next filter.
pub fn with_token_auth(
    tokens: &TokenService,
) -> impl Filter<Extract = (Claims,), Error = Rejection> + Clone {
    warp::header::optional::<String>("authorization")
        .and(with_token_state(tokens.internal.clone()))
        .and_then(token_auth_check)
}

pub async fn handle_token_errors(err: Rejection) -> Result<impl Reply, Rejection> {
    if let Some(token_error) = err.find::<TokenError>() {
        let (status, message) = match token_error {
            e if e.is_rejection() => (StatusCode::UNAUTHORIZED, "access denied"),
            TokenError::InvalidUsername { reason } => (StatusCode::BAD_REQUEST, *reason),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "an unknown error has occurred",
            ),
        };
        return Ok(warp::reply::with_status(message, status));
    }

    Err(err)
}

fn bearer_token(header: &str) -> Option<&str> {
    let prefix = header.get(..BEARER_PREFIX.len())?;

    if prefix.eq_ignore_ascii_case(BEARER_PREFIX) {
        Some(header[BEARER_PREFIX.len()..].trim())
    } else {
        None
    }
}

async fn token_auth_check(
    header: Option<String>,
    tokens: Arc<TokenServiceInternal>,
) -> Result<Claims, Rejection> {
    let token = header
        .as_deref()
        .and_then(bearer_token)
        .ok_or(TokenError::MalformedToken)?;

    let claims = tokens.validate_token(token)?;

    Ok(claims)
}

fn with_token_state(
    tokens: Arc<TokenServiceInternal>,
) -> impl Filter<Extract = (Arc<TokenServiceInternal>,), Error = Infallible> + Clone {
    warp::any().map(move || tokens.clone())
}
