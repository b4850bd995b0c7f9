mod auth;
mod config;
mod error;
mod routes;
mod types;

pub use auth::*;
pub use config::*;
pub use error::*;
pub use routes::*;
pub use types::*;
