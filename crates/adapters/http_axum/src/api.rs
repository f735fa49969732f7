//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod actions;
#[allow(clippy::missing_errors_doc)]
pub mod lights;

use axum::Router;
use axum::routing::{get, post, put};

use signalhub_app::ports::LightStore;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S>() -> Router<AppState<S>>
where
    S: LightStore + Send + Sync + 'static,
{
    Router::new()
        .route("/lights", get(lights::list::<S>).post(lights::add::<S>))
        .route(
            "/lights/{address}",
            get(lights::get::<S>).delete(lights::remove::<S>),
        )
        .route("/lights/{address}/color", put(lights::set_color::<S>))
        .route(
            "/lights/{address}/sequence",
            post(lights::start_sequence::<S>),
        )
        .route("/actions", post(actions::apply::<S>))
}
