//! All API endpoint setup

use axum::Router;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;

pub use request::BODY_LIMIT;
pub use request::Form;
pub use request::PathParameters;
pub use request::QueryParameters;
pub use request::optional_text;
pub use request::required_text;
pub use response::Error;
pub use response::Success;

use crate::storage::Storage;

mod notes;
mod request;
mod response;

/// Get the Axum router for all API routes
pub fn router<S: Storage>() -> Router {
    Router::new()
        .route("/get", get(notes::list::<S>))
        .route("/add", post(notes::create::<S>))
        .route("/edit/{note}", patch(notes::update::<S>))
        .route("/update-pin/{note}", patch(notes::update_pin::<S>))
        .route("/delete/{note}", delete(notes::delete::<S>))
}

/// Anything without a route
#[allow(clippy::unused_async)]
pub async fn fallback() -> Error {
    Error::not_found("Route not found")
}
