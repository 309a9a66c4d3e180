//! HTTP router construction.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::api;
use crate::state::AppState;

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.server.max_upload_bytes();
    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/health", get(api::health))
        .route("/config", get(api::config))
        .route("/documents/extract", post(api::extract))
        .route("/documents/ingest", post(api::ingest))
        .route("/rag/query", post(api::query))
        .route("/rag/answer", get(api::answer))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::permissive();
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::permissive().allow_origin(value),
        Err(_) => {
            warn!("Invalid CORS_ORIGIN '{}', allowing any origin", origin);
            CorsLayer::permissive()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::RagService;
    use crate::test_support::{FakeEmbedder, FakeProvider, MemoryStore};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use ragbasic_core::Config;
    use ragbasic_llm::AnswerGenerator;
    use tower::ServiceExt;

    const BOUNDARY: &str = "ragbasic-test-boundary";
    const TEXT: &str = "One two. Three four. Five six. Seven eight. Nine ten.";

    fn app(rag: Option<RagService>) -> Router {
        let mut config = Config::for_profile("ROUTERTEST");
        config.server.cors_origin = "*".to_string();
        config.chunking.chunk_size = 300;
        config.chunking.overlap = 50;
        build_router(Arc::new(AppState { config, rag }))
    }

    fn rag(store: Arc<MemoryStore>, answer: Option<&str>) -> RagService {
        let answerer = answer.map(|a| AnswerGenerator::new(Box::new(FakeProvider::new(a)), 0.1, 128));
        RagService::new(Arc::new(FakeEmbedder::new(3)), store, answerer, 8, 10)
    }

    fn upload(uri: &str, filename: &str, content: &str) -> Request<Body> {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             {content}\r\n\
             --{BOUNDARY}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_collaborators() {
        let response = app(None)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["retrieval_ready"], false);
        assert_eq!(json["answer_ready"], false);
    }

    #[tokio::test]
    async fn config_endpoint_hides_secrets() {
        let response = app(None)
            .oneshot(Request::get("/config").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json = json_body(response).await;
        assert!(json["qdrant"].get("api_key").is_none());
        assert!(json["qdrant"]["api_key_set"].is_boolean());
    }

    #[tokio::test]
    async fn extract_returns_sentence_aligned_chunks() {
        let response = app(None)
            .oneshot(upload("/documents/extract?chunkSize=6&overlap=2&docId=d1", "doc.txt", TEXT))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        let chunks = json.as_array().unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0]["text"], "One two. Three four. Five six.");
        assert_eq!(chunks[1]["text"], "Seven eight. Nine ten.");
        assert_eq!(chunks[1]["startSentenceIndex"], 3);
        assert_eq!(chunks[1]["endSentenceIndex"], 4);
        assert!(chunks.iter().all(|c| c["docId"] == "d1"));
    }

    #[tokio::test]
    async fn extract_falls_back_to_configured_defaults() {
        let response = app(None)
            .oneshot(upload("/documents/extract", "doc.txt", TEXT))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["text"], TEXT);
    }

    #[tokio::test]
    async fn extract_rejects_non_positive_chunk_size() {
        let response = app(None)
            .oneshot(upload("/documents/extract?chunkSize=0", "doc.txt", TEXT))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn extract_rejects_unsupported_file_type() {
        let response = app(None)
            .oneshot(upload("/documents/extract", "photo.png", "not text"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn ingest_without_embedder_is_unavailable() {
        let response = app(None)
            .oneshot(upload("/documents/ingest", "doc.txt", TEXT))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn ingest_then_query() {
        let store = Arc::new(MemoryStore::default());
        let router = app(Some(rag(store.clone(), None)));

        let response = router
            .clone()
            .oneshot(upload("/documents/ingest?chunkSize=4&overlap=0&docId=d2", "doc.txt", TEXT))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let summary = json_body(response).await;
        assert_eq!(summary["docId"], "d2");
        assert_eq!(summary["chunkCount"], 3);
        assert_eq!(summary["stored"], 3);
        assert_eq!(store.len(), 3);

        let response = router
            .oneshot(
                Request::post("/rag/query")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"prompt":"three","topK":2}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let hits = json_body(response).await;
        assert_eq!(hits.as_array().unwrap().len(), 2);
        assert_eq!(hits[0]["payload"]["docId"], "d2");
    }

    #[tokio::test]
    async fn answer_requires_llm() {
        let response = app(Some(rag(Arc::new(MemoryStore::default()), None)))
            .oneshot(Request::get("/rag/answer?question=why").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn answer_from_stored_chunks() {
        let store = Arc::new(MemoryStore::default());
        let router = app(Some(rag(store, Some("Five six."))));

        let response = router
            .clone()
            .oneshot(upload("/documents/ingest", "doc.txt", TEXT))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(
                Request::get("/rag/answer?question=what%20comes%20after%20four")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["question"], "what comes after four");
        assert_eq!(json["answer"], "Five six.");
    }

    #[tokio::test]
    async fn blank_question_is_rejected() {
        let response = app(Some(rag(Arc::new(MemoryStore::default()), Some("x"))))
            .oneshot(Request::get("/rag/answer?question=%20").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
