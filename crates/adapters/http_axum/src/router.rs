//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use signalhub_app::ports::LightStore;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api` and includes a [`TraceLayer`] that logs
/// each HTTP request/response at the `DEBUG` level using the `tracing`
/// ecosystem.
pub fn build<S>(state: AppState<S>) -> Router
where
    S: LightStore + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::lights::LightView;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use signalhub_app::dispatcher::{Dispatcher, DispatcherConfig};
    use signalhub_app::ports::CommandSender;
    use signalhub_app::registry::Registry;
    use signalhub_app::services::control_service::ControlService;
    use signalhub_domain::address::Address;
    use signalhub_domain::color::Color;
    use signalhub_domain::error::SignalHubError;
    use signalhub_domain::light::{Mode, TrafficLight};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct StubStore;
    struct NullSender;

    impl LightStore for StubStore {
        async fn load(&self) -> Result<Vec<TrafficLight>, SignalHubError> {
            Ok(vec![])
        }
        async fn save(&self, _lights: Vec<TrafficLight>) -> Result<(), SignalHubError> {
            Ok(())
        }
    }

    impl CommandSender for NullSender {
        async fn send(&self, _address: &Address, _color: Color) -> Result<(), SignalHubError> {
            Ok(())
        }
    }

    fn test_state() -> AppState<StubStore> {
        let dispatcher = Dispatcher::spawn(NullSender, &DispatcherConfig::default());
        AppState::new(ControlService::new(
            Arc::new(Registry::new()),
            dispatcher,
            StubStore,
        ))
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn add(app: &Router, address: &str) -> Response {
        send(
            app,
            json_request(
                "POST",
                "/api/lights",
                &format!(r#"{{"address":"{address}"}}"#),
            ),
        )
        .await
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_404_for_unknown_route() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_create_light_then_report_existing() {
        let app = build(test_state());

        let first = add(&app, "10.0.0.1").await;
        assert_eq!(first.status(), StatusCode::CREATED);
        let light: LightView = body_json(first).await;
        assert_eq!(light.active_color, Color::Off);
        assert_eq!(light.mode, Mode::Manual);

        let second = add(&app, "10.0.0.1").await;
        assert_eq!(second.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_reject_blank_address() {
        let app = build(test_state());

        let response = add(&app, "  ").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = body_json(response).await;
        assert_eq!(body["error"], "address must not be empty");
    }

    #[tokio::test]
    async fn should_list_lights_in_address_order() {
        let app = build(test_state());
        add(&app, "10.0.0.2").await;
        add(&app, "10.0.0.1").await;

        let response = send(
            &app,
            Request::builder()
                .uri("/api/lights")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let lights: Vec<LightView> = body_json(response).await;
        let order: Vec<&str> = lights.iter().map(|l| l.address.as_str()).collect();
        assert_eq!(order, ["10.0.0.1", "10.0.0.2"]);
    }

    #[tokio::test]
    async fn should_return_404_for_unknown_light() {
        let app = build(test_state());

        let response = send(
            &app,
            Request::builder()
                .uri("/api/lights/10.0.0.9")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = body_json(response).await;
        assert_eq!(body["error"], "TrafficLight 10.0.0.9 not found");
    }

    #[tokio::test]
    async fn should_set_color_manually() {
        let app = build(test_state());
        add(&app, "10.0.0.1").await;

        let response = send(
            &app,
            json_request("PUT", "/api/lights/10.0.0.1/color", r#"{"color":"red"}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let light: LightView = body_json(response).await;
        assert_eq!(light.active_color, Color::Red);
        assert!(light.remaining_secs.is_none());
    }

    #[tokio::test]
    async fn should_reject_unknown_color() {
        let app = build(test_state());
        add(&app, "10.0.0.1").await;

        let response = send(
            &app,
            json_request("PUT", "/api/lights/10.0.0.1/color", r#"{"color":"blue"}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_start_sequence_with_countdown() {
        let app = build(test_state());
        add(&app, "10.0.0.1").await;

        let response = send(
            &app,
            json_request(
                "POST",
                "/api/lights/10.0.0.1/sequence",
                r#"{"green":8}"#,
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let light: LightView = body_json(response).await;
        assert_eq!(light.mode, Mode::Sequence);
        assert_eq!(light.active_color, Color::Green);
        assert!((light.durations.green - 8.0).abs() < f64::EPSILON);
        assert!((light.durations.red - 5.0).abs() < f64::EPSILON);
        let remaining = light.remaining_secs.unwrap();
        assert!(remaining > 7.0 && remaining <= 8.0);
    }

    #[tokio::test]
    async fn should_start_sequence_with_defaults_without_body() {
        let app = build(test_state());
        add(&app, "10.0.0.1").await;

        let response = send(
            &app,
            Request::builder()
                .method("POST")
                .uri("/api/lights/10.0.0.1/sequence")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let light: LightView = body_json(response).await;
        assert!((light.durations.green - 5.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn should_reject_non_positive_duration() {
        let app = build(test_state());
        add(&app, "10.0.0.1").await;

        let response = send(
            &app,
            json_request(
                "POST",
                "/api/lights/10.0.0.1/sequence",
                r#"{"yellow":0}"#,
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_404_when_sequencing_unknown_light() {
        let app = build(test_state());

        let response = send(
            &app,
            json_request("POST", "/api/lights/10.0.0.9/sequence", "{}"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_delete_light() {
        let app = build(test_state());
        add(&app, "10.0.0.1").await;

        let response = send(
            &app,
            Request::builder()
                .method("DELETE")
                .uri("/api/lights/10.0.0.1")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(
            &app,
            Request::builder()
                .uri("/api/lights/10.0.0.1")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_apply_global_off() {
        let app = build(test_state());
        add(&app, "10.0.0.1").await;
        add(&app, "10.0.0.2").await;
        send(
            &app,
            json_request("POST", "/api/lights/10.0.0.1/sequence", "{}"),
        )
        .await;

        let response = send(
            &app,
            json_request("POST", "/api/actions", r#"{"action":"off"}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let lights: Vec<LightView> = body_json(response).await;
        assert_eq!(lights.len(), 2);
        assert!(
            lights
                .iter()
                .all(|l| l.mode == Mode::Manual && l.active_color == Color::Off)
        );
    }

    #[tokio::test]
    async fn should_reject_unknown_action() {
        let app = build(test_state());

        let response = send(
            &app,
            json_request("POST", "/api/actions", r#"{"action":"reboot"}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
