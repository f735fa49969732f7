//! JSON REST handlers for traffic lights.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use signalhub_app::ports::LightStore;
use signalhub_app::registry::Added;
use signalhub_domain::address::Address;
use signalhub_domain::color::Color;
use signalhub_domain::durations::{
    DEFAULT_GREEN_SECS, DEFAULT_RED_SECS, DEFAULT_YELLOW_SECS, Durations,
};
use signalhub_domain::light::{Mode, TrafficLight};
use signalhub_domain::time::{self, Timestamp};

use crate::error::ApiError;
use crate::state::AppState;

/// A light as rendered by the API, with its countdown resolved.
#[derive(Debug, Serialize, Deserialize)]
pub struct LightView {
    pub address: Address,
    pub active_color: Color,
    pub mode: Mode,
    pub durations: Durations,
    pub next_change_at: Option<Timestamp>,
    /// Seconds until the next automatic change; `None` in manual mode.
    pub remaining_secs: Option<f64>,
}

impl LightView {
    #[must_use]
    pub fn at(light: TrafficLight, now: Timestamp) -> Self {
        let remaining_secs = light.remaining(now).map(|left| left.as_secs_f64());
        Self {
            address: light.address,
            active_color: light.active_color,
            mode: light.mode,
            durations: light.durations,
            next_change_at: light.next_change_at,
            remaining_secs,
        }
    }
}

/// Request body for registering a light.
#[derive(Deserialize)]
pub struct AddLightRequest {
    pub address: String,
}

/// Request body for a manual override.
#[derive(Deserialize)]
pub struct SetColorRequest {
    pub color: String,
}

/// Request body for starting a sequence. Missing durations use the defaults.
#[derive(Deserialize, Default)]
pub struct StartSequenceRequest {
    pub red: Option<f64>,
    pub yellow: Option<f64>,
    pub green: Option<f64>,
}

impl StartSequenceRequest {
    fn durations(&self) -> Durations {
        Durations {
            red: self.red.unwrap_or(DEFAULT_RED_SECS),
            yellow: self.yellow.unwrap_or(DEFAULT_YELLOW_SECS),
            green: self.green.unwrap_or(DEFAULT_GREEN_SECS),
        }
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<LightView>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from endpoints returning a single light.
pub enum LightResponse {
    Ok(Json<LightView>),
}

impl IntoResponse for LightResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the add endpoint.
pub enum AddResponse {
    Created(Json<LightView>),
    Existing(Json<LightView>),
}

impl IntoResponse for AddResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
            Self::Existing(json) => json.into_response(),
        }
    }
}

/// Possible responses from the remove endpoint.
pub enum RemoveResponse {
    NoContent,
}

impl IntoResponse for RemoveResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn view(light: TrafficLight) -> Json<LightView> {
    Json(LightView::at(light, time::now()))
}

/// `GET /api/lights`
pub async fn list<S>(State(state): State<AppState<S>>) -> ListResponse
where
    S: LightStore + Send + Sync + 'static,
{
    let now = time::now();
    let lights = state
        .control
        .list_lights()
        .into_iter()
        .map(|light| LightView::at(light, now))
        .collect();
    ListResponse::Ok(Json(lights))
}

/// `POST /api/lights`
pub async fn add<S>(
    State(state): State<AppState<S>>,
    Json(req): Json<AddLightRequest>,
) -> Result<AddResponse, ApiError>
where
    S: LightStore + Send + Sync + 'static,
{
    let address = Address::parse(&req.address)?;
    match state.control.add_light(address).await? {
        Added::Created(light) => Ok(AddResponse::Created(view(light))),
        Added::Existing(light) => Ok(AddResponse::Existing(view(light))),
    }
}

/// `GET /api/lights/:address`
pub async fn get<S>(
    State(state): State<AppState<S>>,
    Path(address): Path<String>,
) -> Result<LightResponse, ApiError>
where
    S: LightStore + Send + Sync + 'static,
{
    let address = Address::parse(&address)?;
    let light = state.control.get_light(&address)?;
    Ok(LightResponse::Ok(view(light)))
}

/// `DELETE /api/lights/:address`
pub async fn remove<S>(
    State(state): State<AppState<S>>,
    Path(address): Path<String>,
) -> Result<RemoveResponse, ApiError>
where
    S: LightStore + Send + Sync + 'static,
{
    let address = Address::parse(&address)?;
    state.control.remove_light(&address).await?;
    Ok(RemoveResponse::NoContent)
}

/// `PUT /api/lights/:address/color`
pub async fn set_color<S>(
    State(state): State<AppState<S>>,
    Path(address): Path<String>,
    Json(req): Json<SetColorRequest>,
) -> Result<LightResponse, ApiError>
where
    S: LightStore + Send + Sync + 'static,
{
    let address = Address::parse(&address)?;
    let color: Color = req.color.parse()?;
    let light = state.control.manual_override(&address, color).await?;
    Ok(LightResponse::Ok(view(light)))
}

/// `POST /api/lights/:address/sequence`
pub async fn start_sequence<S>(
    State(state): State<AppState<S>>,
    Path(address): Path<String>,
    body: Option<Json<StartSequenceRequest>>,
) -> Result<LightResponse, ApiError>
where
    S: LightStore + Send + Sync + 'static,
{
    let address = Address::parse(&address)?;
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let light = state
        .control
        .start_sequence(&address, req.durations())
        .await?;
    Ok(LightResponse::Ok(view(light)))
}
