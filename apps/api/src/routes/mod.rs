pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{chat, feedback, generation, render, templates};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Website API
        .route(
            "/api/v1/websites/generate",
            post(generation::handlers::handle_generate),
        )
        .route(
            "/api/v1/websites/:slug",
            get(generation::handlers::handle_get_website),
        )
        .route(
            "/api/v1/websites/:slug/page",
            get(render::handlers::handle_render_page),
        )
        // Template API
        .route(
            "/api/v1/templates",
            get(templates::handlers::handle_list_templates),
        )
        .route(
            "/api/v1/templates/stats",
            get(templates::handlers::handle_template_stats),
        )
        .route(
            "/api/v1/templates/:id/colors",
            get(templates::handlers::handle_color_variations),
        )
        .route(
            "/api/v1/templates/suggest",
            post(templates::handlers::handle_suggest),
        )
        .route(
            "/api/v1/templates/resolve",
            post(templates::handlers::handle_resolve),
        )
        // Chat API
        .route(
            "/api/v1/chat/sessions",
            post(chat::handlers::handle_create_session),
        )
        .route(
            "/api/v1/chat/sessions/:id",
            get(chat::handlers::handle_get_session),
        )
        .route(
            "/api/v1/chat/sessions/:id/messages",
            post(chat::handlers::handle_send_message).delete(chat::handlers::handle_clear_messages),
        )
        // Feedback API
        .route("/api/v1/feedback", post(feedback::handle_submit_feedback))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::state::test_support::lazy_state;

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(lazy_state(None))
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "pagesmith-api");
    }

    #[tokio::test]
    async fn test_list_templates_in_catalog_order() {
        let (status, body) = send(get_req("/api/v1/templates")).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, ["modern_business", "restaurant", "retail"]);
    }

    #[tokio::test]
    async fn test_list_templates_filtered_by_business_type() {
        let (status, body) = send(get_req("/api/v1/templates?businessType=pizza")).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, ["restaurant"]);
    }

    #[tokio::test]
    async fn test_template_stats() {
        let (status, body) = send(get_req("/api/v1/templates/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_templates"], 3);
    }

    #[tokio::test]
    async fn test_color_variations() {
        let (status, body) = send(get_req("/api/v1/templates/retail/colors")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["template_id"], "retail");
        assert_eq!(body["variations"].as_array().unwrap().len(), 3);

        let (status, body) = send(get_req("/api/v1/templates/bistro/colors")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_suggest_without_description() {
        let (status, body) = send(post_json("/api/v1/templates/suggest", json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["template_id"], "modern_business");
        assert_eq!(body["confidence"], 0.5);
    }

    #[tokio::test]
    async fn test_resolve_reports_override() {
        let (status, body) = send(post_json(
            "/api/v1/templates/resolve",
            json!({"industry": "bakery", "freeText": "A lovely vintage boutique"}),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["template_id"], "retail");
        assert_eq!(body["override_rule"], "retail_goods");
    }

    #[tokio::test]
    async fn test_generate_rejects_short_message() {
        let (status, body) = send(post_json(
            "/api/v1/websites/generate",
            json!({"userMessage": "pizza"}),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_generate_without_api_key_is_a_configuration_error() {
        let (status, body) = send(post_json(
            "/api/v1/websites/generate",
            json!({"userMessage": "A family pizza restaurant in Naples"}),
        ))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "CONFIGURATION_ERROR");
    }

    #[tokio::test]
    async fn test_feedback_rejects_out_of_range_rating() {
        let (status, body) = send(post_json("/api/v1/feedback", json!({"rating": 9}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_feedback_rejects_rating_beyond_small_int() {
        let (status, body) = send(post_json("/api/v1/feedback", json!({"rating": 70000}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_chat_message_requires_content() {
        let (status, _) = send(post_json(
            "/api/v1/chat/sessions/6f1c1f43-46a4-4b8e-a1a4-3c1f0c3f3b7e/messages",
            json!({"content": "   "}),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (status, _) = send(get_req("/api/v1/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
