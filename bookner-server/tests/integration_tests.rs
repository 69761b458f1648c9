use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum_test::TestServer;
use bookner::entity_extraction::{
    EntityMerger, ExtractionConfig, ExtractionPipeline, MergeConfig, OrphanPolicy, Span,
    SpanExtractor, SpanLabel,
};
use bookner::{BookNerError, Result};
use bookner_server::create_router;
use http::StatusCode;
use serde_json::{Value, json};

/// Stand-in model returning fixed (text, label) pairs located in the input.
#[derive(Debug)]
struct CannedExtractor {
    name: &'static str,
    spans: Vec<(&'static str, &'static str)>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl SpanExtractor for CannedExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<Span>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .spans
            .iter()
            .filter_map(|(needle, label)| {
                let byte = text.find(needle)?;
                let start = text[..byte].chars().count();
                Some(Span::new(
                    *needle,
                    SpanLabel::from(label.to_string()),
                    start,
                    start + needle.chars().count(),
                ))
            })
            .collect())
    }

    fn name(&self) -> &str {
        self.name
    }
}

#[derive(Debug)]
struct FailingExtractor;

#[async_trait]
impl SpanExtractor for FailingExtractor {
    async fn extract(&self, _text: &str) -> Result<Vec<Span>> {
        Err(BookNerError::extraction("general", "connection refused"))
    }

    fn name(&self) -> &str {
        "general"
    }
}

fn server_for(pipeline: ExtractionPipeline) -> TestServer {
    let state = Arc::new(bookner_server::AppState::new(
        pipeline,
        bookner_server::config::ServerConfig::default(),
    ));
    TestServer::new(create_router(state)).expect("Failed to create test server")
}

/// Server wired to the canned Scenario A models, plus a shared call counter.
fn scenario_server() -> (TestServer, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let domain = CannedExtractor {
        name: "book-model",
        spans: vec![
            ("John Smith", "Authors"),
            ("Data Structures", "Title"),
            ("3rd Edition", "Edition"),
            ("123-456", "ISBN"),
        ],
        calls: calls.clone(),
    };
    let general = CannedExtractor {
        name: "person-model",
        spans: vec![("John Smith", "PERSON"), ("Jane Doe", "PERSON")],
        calls: calls.clone(),
    };

    let pipeline = ExtractionPipeline::builder()
        .domain_extractor(Arc::new(domain))
        .general_extractor(Arc::new(general))
        .build()
        .unwrap();

    (server_for(pipeline), calls)
}

#[tokio::test]
async fn test_root_reports_model_running() {
    let (server, _) = scenario_server();

    let response = server.get("/").await;
    response.assert_status_ok();
    response.assert_json(&json!({"status": "Model is running"}));
}

#[tokio::test]
async fn test_health_check() {
    let (server, _) = scenario_server();

    let response = server.get("/api/health").await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["status"], "OK");
    assert_eq!(json["extractors"]["domain"], "book-model");
    assert_eq!(json["extractors"]["general"], "person-model");
    assert_eq!(json["merge"]["context_window"], 20);
    assert_eq!(json["merge"]["orphan_policy"], "drop");
    assert_eq!(json["merge"]["restricted_words"], json!(["copyright", "published"]));
}

#[tokio::test]
async fn test_openapi_spec_available() {
    let (server, _) = scenario_server();

    let response = server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["info"]["title"], "Bookner Entity Extraction API");
    assert!(json["paths"]["/api/predict"]["post"].is_object());
}

#[tokio::test]
async fn test_swagger_docs_available() {
    let (server, _) = scenario_server();

    server.get("/docs/").await.assert_status_ok();
}

mod predict {
    use super::*;

    const SCENARIO_A: &str =
        "  John Smith. Data Structures, 3rd Edition. Copyright Jane Doe 2020.  ISBN 123-456.";

    #[tokio::test]
    async fn test_copyright_person_is_filtered() {
        let (server, _) = scenario_server();

        let response = server
            .post("/api/predict")
            .json(&json!({"text": SCENARIO_A}))
            .await;
        response.assert_status_ok();

        response.assert_json(&json!({
            "entities": [
                {"text": "John Smith", "label": "Authors", "start": 0, "end": 10},
                {"text": "Data Structures", "label": "Title", "start": 12, "end": 27},
                {"text": "3rd Edition", "label": "Edition", "start": 29, "end": 40},
                {"text": "123-456", "label": "ISBN", "start": 72, "end": 79}
            ]
        }));
    }

    #[tokio::test]
    async fn test_unprefixed_alias() {
        let (server, _) = scenario_server();

        let response = server
            .post("/predict")
            .json(&json!({"text": SCENARIO_A}))
            .await;
        response.assert_status_ok();

        let json: Value = response.json();
        assert_eq!(json["entities"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected_without_running_models() {
        let (server, calls) = scenario_server();

        let response = server.post("/api/predict").json(&json!({"text": ""})).await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let json: Value = response.json();
        assert_eq!(json["error"], "bad_request");
        assert!(json["message"].as_str().unwrap().contains("No text provided"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_text_is_rejected() {
        let (server, calls) = scenario_server();

        let response = server.post("/api/predict").json(&json!({})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_whitespace_only_text_has_no_entities() {
        let (server, calls) = scenario_server();

        let response = server
            .post("/api/predict")
            .json(&json!({"text": " \n\t "}))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({"entities": []}));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_json_body_is_rejected() {
        let (server, _) = scenario_server();

        let response = server.post("/api/predict").text("just some text").await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let json: Value = response.json();
        assert_eq!(json["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_extractor_failure_is_bad_gateway() {
        let domain = CannedExtractor {
            name: "book-model",
            spans: vec![("Data Structures", "Title")],
            calls: Arc::new(AtomicUsize::new(0)),
        };
        let pipeline = ExtractionPipeline::builder()
            .domain_extractor(Arc::new(domain))
            .general_extractor(Arc::new(FailingExtractor))
            .build()
            .unwrap();
        let server = server_for(pipeline);

        let response = server
            .post("/api/predict")
            .json(&json!({"text": "Data Structures"}))
            .await;
        response.assert_status(StatusCode::BAD_GATEWAY);

        let json: Value = response.json();
        assert_eq!(json["error"], "extraction_error");
    }

    #[tokio::test]
    async fn test_append_policy_keeps_orphaned_authors() {
        let domain = CannedExtractor {
            name: "book-model",
            spans: vec![("Data Structures", "Title")],
            calls: Arc::new(AtomicUsize::new(0)),
        };
        let general = CannedExtractor {
            name: "person-model",
            spans: vec![("Alice Lee", "PERSON")],
            calls: Arc::new(AtomicUsize::new(0)),
        };
        let merger = EntityMerger::from_config(&MergeConfig {
            orphan_policy: OrphanPolicy::Append,
            ..MergeConfig::default()
        });
        let pipeline = ExtractionPipeline::builder()
            .domain_extractor(Arc::new(domain))
            .general_extractor(Arc::new(general))
            .merger(merger)
            .build()
            .unwrap();
        let server = server_for(pipeline);

        let response = server
            .post("/api/predict")
            .json(&json!({"text": "Data Structures by Alice Lee"}))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({
            "entities": [
                {"text": "Data Structures", "label": "Title", "start": 0, "end": 15},
                {"text": "Alice Lee", "label": "Authors", "start": 19, "end": 28}
            ]
        }));
    }

    #[tokio::test]
    async fn test_default_pattern_models() {
        let pipeline = ExtractionPipeline::from_config(&ExtractionConfig::default()).unwrap();
        let server = server_for(pipeline);

        let response = server
            .post("/api/predict")
            .json(&json!({"text": "  John Smith.\n Algorithms,  3rd Edition.\tISBN 978-0-13-110362-7 "}))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({
            "entities": [
                {"text": "John Smith", "label": "Authors", "start": 0, "end": 10},
                {"text": "3rd Edition", "label": "Edition", "start": 24, "end": 35},
                {"text": "978-0-13-110362-7", "label": "ISBN", "start": 42, "end": 59}
            ]
        }));
    }
}
