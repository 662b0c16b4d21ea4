use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use tracing::{info, warn};
use wheel_shared::LegacyWheelManagerState;

use crate::error::ApiError;
use crate::AppState;

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn get_wheels(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let record = state
        .store
        .get(&state.record_key)
        .await
        .ok_or(ApiError::NotFound)?;
    Ok(Json(json!({ "wheels": record })))
}

/// Validates the body as a wheel record and stores it in normalized form.
pub async fn put_wheels(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body?;
    let record = LegacyWheelManagerState::from_value(body).map_err(|e| {
        warn!("rejected wheel record: {}", e);
        ApiError::from(e)
    })?;

    let wheel_count = record.wheels.len();
    let normalized = serde_json::to_value(&record)?;
    state.store.put(&state.record_key, normalized).await;
    info!(wheels = wheel_count, "saved wheel record");

    Ok(Json(json!({ "message": "Saved" })))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::ServerConfig;
    use crate::{app, AppState};

    fn router() -> (Router, AppState) {
        let state = AppState::new(&ServerConfig::default());
        (app(state.clone(), &ServerConfig::default()), state)
    }

    async fn send(router: Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if body.is_some() {
            request = request.header(header::CONTENT_TYPE, "application/json");
        }
        let request = request
            .body(Body::from(body.unwrap_or_default().to_string()))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn record() -> Value {
        json!({
            "wheels": [
                {
                    "id": "w1",
                    "label": "Lunch",
                    "segments": [
                        {"id": "s1", "label": "Pho", "selected": true},
                        {"id": "s2", "label": "Tacos"}
                    ],
                    "isSpinning": false
                }
            ],
            "selectedWheelId": "w1"
        })
    }

    #[tokio::test]
    async fn test_health_check() {
        let (router, _) = router();
        let response = router
            .oneshot(Request::get("/api/health_check").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn test_get_before_save_is_not_found() {
        let (router, _) = router();
        let (status, body) = send(router, Method::GET, "/api/wheels", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let (router, _) = router();
        let payload = record().to_string();
        let (status, body) = send(router.clone(), Method::PUT, "/api/wheels", Some(&payload)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Saved"}));

        let (status, body) = send(router, Method::GET, "/api/wheels", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["wheels"]["selectedWheelId"], "w1");
        assert_eq!(body["wheels"]["wheels"][0]["segments"][1]["label"], "Tacos");
    }

    #[tokio::test]
    async fn test_saved_record_is_stored_under_configured_key() {
        let (router, state) = router();
        let payload = record().to_string();
        send(router, Method::PUT, "/api/wheels", Some(&payload)).await;
        assert!(state.store.get("wheels").await.is_some());
    }

    #[tokio::test]
    async fn test_rejects_invalid_records() {
        let duplicate_ids = json!({
            "wheels": [
                {"id": "a", "segments": []},
                {"id": "a", "segments": []}
            ]
        });
        for payload in [
            json!({"wheels": []}).to_string(),
            json!({"wheels": [{"id": "a"}]}).to_string(),
            duplicate_ids.to_string(),
            "{not json".to_string(),
        ] {
            let (router, state) = router();
            let (status, body) = send(router, Method::PUT, "/api/wheels", Some(&payload)).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "payload {}", payload);
            assert!(body["error"].is_string());
            assert!(state.store.get("wheels").await.is_none());
        }
    }
}
