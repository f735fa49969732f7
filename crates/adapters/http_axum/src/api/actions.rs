//! JSON REST handler for group-wide actions.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use signalhub_app::ports::LightStore;
use signalhub_domain::action::GlobalAction;
use signalhub_domain::time;

use crate::api::lights::LightView;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for a global action.
#[derive(Deserialize)]
pub struct ActionRequest {
    pub action: String,
}

/// Possible responses from the action endpoint.
pub enum ActionResponse {
    Ok(Json<Vec<LightView>>),
}

impl IntoResponse for ActionResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/actions`
pub async fn apply<S>(
    State(state): State<AppState<S>>,
    Json(req): Json<ActionRequest>,
) -> Result<ActionResponse, ApiError>
where
    S: LightStore + Send + Sync + 'static,
{
    let action: GlobalAction = req.action.parse()?;
    let lights = state.control.global_action(action).await?;
    let now = time::now();
    Ok(ActionResponse::Ok(Json(
        lights
            .into_iter()
            .map(|light| LightView::at(light, now))
            .collect(),
    )))
}
