pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::roast::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interactive session
        .route("/api/v1/session", get(handlers::handle_get_session))
        .route("/api/v1/session/text", put(handlers::handle_set_text))
        .route("/api/v1/session/roast", post(handlers::handle_session_roast))
        .route("/api/v1/session/clear", post(handlers::handle_clear))
        // One-shot
        .route("/api/v1/roast", post(handlers::handle_roast))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::roast::analyzer::test_support::{quota_error, ScriptedClient};

    const REPLY: &str = "Experience:\nTOO VAGUE!\n\nSkills:\nDECENT\n\nRATING: 2/5";

    fn app_with(client: Arc<ScriptedClient>) -> (Router, AppState) {
        let state = AppState::new(client);
        (build_router(state.clone()), state)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app_with(Arc::new(ScriptedClient::default()));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["session_phase"], "idle");
    }

    #[tokio::test]
    async fn test_session_roast_with_text_returns_results() {
        let client = Arc::new(ScriptedClient::replying(REPLY));
        let (app, _) = app_with(client.clone());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/session/roast",
                json!({"resume_text": "Jane Doe, Line Cook"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["phase"], "results");
        assert_eq!(body["rating"], 2);
        assert_eq!(body["feedback"][0]["section"], "Experience");
        assert_eq!(body["feedback"][0]["comment"], "TOO VAGUE!");
        assert_eq!(body["verdict"]["bucket"], "bad");
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_session_roast_empty_text_is_rejected_without_model_call() {
        let client = Arc::new(ScriptedClient::replying(REPLY));
        let (app, state) = app_with(client.clone());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/session/roast",
                json!({"resume_text": "   "}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(client.call_count(), 0);
        assert!(state.session.lock().await.feedback().is_empty());
    }

    #[tokio::test]
    async fn test_session_roast_without_body_uses_stored_text() {
        let client = Arc::new(ScriptedClient::replying(REPLY));
        let (app, state) = app_with(client.clone());
        state.session.lock().await.set_text("stored resume");

        let response = app
            .oneshot(
                Request::post("/api/v1/session/roast")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let calls = client.calls.lock().unwrap();
        assert!(calls[0][1].content.ends_with("stored resume"));
    }

    #[tokio::test]
    async fn test_session_roast_body_without_content_type_still_replaces_text() {
        let client = Arc::new(ScriptedClient::replying(REPLY));
        let (app, state) = app_with(client.clone());
        state.session.lock().await.set_text("OLD stored resume");

        let response = app
            .oneshot(
                Request::post("/api/v1/session/roast")
                    .body(Body::from(r#"{"resume_text":"NEW resume"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(client.calls.lock().unwrap()[0][1].content.ends_with("NEW resume"));
        assert_eq!(state.session.lock().await.resume_text(), "NEW resume");
    }

    #[tokio::test]
    async fn test_session_roast_malformed_body_is_rejected() {
        let client = Arc::new(ScriptedClient::replying(REPLY));
        let (app, state) = app_with(client.clone());
        state.session.lock().await.set_text("stored resume");

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/session/roast",
                json!({"resume_text": 42}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(client.call_count(), 0);
        assert_eq!(state.session.lock().await.resume_text(), "stored resume");
    }

    #[tokio::test]
    async fn test_session_roast_quota_error_is_an_error_item() {
        let client = Arc::new(ScriptedClient::failing(quota_error()));
        let (app, _) = app_with(client);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/session/roast",
                json!({"resume_text": "resume"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["phase"], "error");
        assert_eq!(body["rating"], 0);
        assert_eq!(body["feedback"].as_array().unwrap().len(), 1);
        assert_eq!(body["feedback"][0]["section"], "Error");
        assert!(body["feedback"][0]["comment"]
            .as_str()
            .unwrap()
            .contains("run out of gas"));
    }

    #[tokio::test]
    async fn test_clear_after_results_resets_session() {
        let client = Arc::new(ScriptedClient::replying(REPLY));
        let (app, _) = app_with(client);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/session/roast",
                json!({"resume_text": "resume"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::post("/api/v1/session/clear")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["resume_text"], "");
        assert_eq!(body["rating"], 0);
        assert!(body["feedback"].as_array().unwrap().is_empty());
        assert_eq!(body["phase"], "idle");
    }

    #[tokio::test]
    async fn test_set_text_then_get_session() {
        let (app, _) = app_with(Arc::new(ScriptedClient::default()));

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/v1/session/text",
                json!({"resume_text": "draft"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::get("/api/v1/session").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["resume_text"], "draft");
        assert_eq!(body["roast_button_enabled"], true);
    }

    #[tokio::test]
    async fn test_stateless_roast_leaves_session_alone() {
        let client = Arc::new(ScriptedClient::replying(REPLY));
        let (app, state) = app_with(client);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/roast",
                json!({"resume_text": "resume"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["rating"], 2);
        assert_eq!(body["verdict"]["caption"], "IT'S BLOODY RAW!");
        assert!(state.session.lock().await.feedback().is_empty());
    }
}
