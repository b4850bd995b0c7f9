use std::net::SocketAddr;

use serde_json::json;
use tokens_for_warp::{
    handle_token_errors, with_token_auth, Claims, TokenConfig, TokenError, TokenService,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use warp::{path, Filter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match TokenConfig::from_env() {
        Ok(config) => config,
        Err(TokenError::Config { message }) => {
            warn!(%message, "falling back to the demo secret");
            TokenConfig::new("this is a really bad secret")
        }
        Err(err) => return Err(err.into()),
    };

    let tokens = TokenService::new(config);

    let demo_token = tokens.issue_token("LoremIpsum")?;
    info!(token = %demo_token, "try: curl -H 'Authorization: Bearer <token>' http://127.0.0.1:4000/whoami");

    let unsecured_homepage =
        warp::path::end().then(|| async move { warp::reply::html("hello, world!") });

    let secure_page = path!("whoami")
        .and(with_token_auth(&tokens))
        .then(|claims: Claims| async move {
            warp::reply::json(&json!({
                "username": claims.username(),
                "expires_at": claims.expires_at(),
            }))
        });

    let all_routes = unsecured_homepage
        .or(secure_page)
        .recover(handle_token_errors);

    warp::serve(all_routes)
        .run("127.0.0.1:4000".parse::<SocketAddr>()?)
        .await;

    Ok(())
}
