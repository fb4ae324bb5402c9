//! End-to-end tests for the brand-forge HTTP service.
//!
//! `wiremock` stands in for the chat-completion, image and domain registry
//! APIs; the router is driven in-process with `tower::ServiceExt::oneshot`.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use brand_forge::{build_state, server::build_app, AppConfig};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COFFEE_PROMPT: &str = "A sustainable coffee brand for remote workers";

/// Builds the app against mock upstreams; `extra` overrides defaults.
fn app_for(llm: &MockServer, registry: &MockServer, extra: &[(&str, &str)]) -> Router {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("OPENAI_API_KEY".to_string(), "test-key".to_string()),
        ("OPENAI_BASE_URL".to_string(), llm.uri()),
        ("DOMAINSDB_URL".to_string(), registry.uri()),
        ("AVAILABILITY_TIMEOUT_MS".to_string(), "300".to_string()),
        ("LLM_TIMEOUT_SECS".to_string(), "5".to_string()),
    ]);
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }
    let config = AppConfig::from_vars(vars).expect("config");
    build_app(build_state(&config).expect("state"))
}

fn chat_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-test",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    }))
}

async fn mount_chat(server: &MockServer, response: ResponseTemplate, times: u64) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

fn no_domains() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"domains": []}))
}

async fn mount_registry_default(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/domains/search"))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn post_json(app: Router, uri: &str, body: Body) -> (StatusCode, Value) {
    post_with_content_type(app, uri, body, Some("application/json")).await
}

async fn post_with_content_type(
    app: Router,
    uri: &str,
    body: Body,
    content_type: Option<&str>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        request = request.header("content-type", content_type);
    }
    let response = app
        .oneshot(request.body(body).expect("request"))
        .await
        .expect("response");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json: Value = serde_json::from_slice(&bytes).expect("json body");
    (status, json)
}

fn assert_three_booleans(record: &Value) {
    for field in ["comAvailable", "aiAvailable", "igAvailable"] {
        assert!(record[field].is_boolean(), "{field} missing in {record}");
    }
}

// ---------------------------------------------------------------------------
// generate-names
// ---------------------------------------------------------------------------

#[tokio::test]
async fn coffee_prompt_returns_five_annotated_names_in_order() {
    let llm = MockServer::start().await;
    let registry = MockServer::start().await;
    mount_chat(
        &llm,
        chat_reply(r#"Here you go: ["Nexoro","Velurn","Brewix","Camora","Solace"]"#),
        1,
    )
    .await;
    mount_registry_default(&registry, no_domains()).await;

    let app = app_for(&llm, &registry, &[]);
    let (status, body) = post_json(
        app,
        "/api/generate-names",
        Body::from(json!({ "prompt": COFFEE_PROMPT }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let names = body["names"].as_array().expect("names array");
    let got: Vec<&str> = names.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(got, vec!["Nexoro", "Velurn", "Brewix", "Camora", "Solace"]);
    for record in names {
        assert_three_booleans(record);
        assert_eq!(record["comAvailable"], true);
        assert_eq!(record["aiAvailable"], true);
        assert_eq!(record["igAvailable"], true);
    }
}

#[tokio::test]
async fn registered_name_is_reported_taken() {
    let llm = MockServer::start().await;
    let registry = MockServer::start().await;
    mount_chat(&llm, chat_reply(r#"["Velurn","Brewix"]"#), 1).await;

    Mock::given(method("GET"))
        .and(path("/domains/search"))
        .and(query_param("domain", "velurn"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "domains": [{"domain": "velurn.com"}]
        })))
        .mount(&registry)
        .await;
    mount_registry_default(&registry, no_domains()).await;

    let app = app_for(&llm, &registry, &[]);
    let (status, body) = post_json(
        app,
        "/api/generate-names",
        Body::from(json!({ "prompt": "fintech" }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["names"][0]["name"], "Velurn");
    assert_eq!(body["names"][0]["comAvailable"], false);
    assert_eq!(body["names"][0]["aiAvailable"], false);
    assert_eq!(body["names"][1]["comAvailable"], true);
}

#[tokio::test]
async fn empty_prompt_is_400_without_model_call() {
    let llm = MockServer::start().await;
    let registry = MockServer::start().await;
    mount_chat(&llm, chat_reply("[]"), 0).await;

    for payload in [json!({"prompt": ""}), json!({}), json!({"prompt": "   "})] {
        let app = app_for(&llm, &registry, &[]);
        let (status, body) =
            post_json(app, "/api/generate-names", Body::from(payload.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Prompt required"}));
    }
}

#[tokio::test]
async fn non_json_body_is_treated_as_missing_prompt() {
    let llm = MockServer::start().await;
    let registry = MockServer::start().await;
    mount_chat(&llm, chat_reply("[]"), 0).await;

    let app = app_for(&llm, &registry, &[]);
    let (status, body) = post_json(app, "/api/generate-names", Body::from("prompt=coffee")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Prompt required");
}

#[tokio::test]
async fn body_without_content_type_is_still_read() {
    let llm = MockServer::start().await;
    let registry = MockServer::start().await;
    mount_chat(&llm, chat_reply(r#"["Nexoro","Velurn"]"#), 1).await;
    mount_registry_default(&registry, no_domains()).await;

    let app = app_for(&llm, &registry, &[]);
    let (status, body) = post_with_content_type(
        app,
        "/api/generate-names",
        Body::from(r#"{"prompt":"coffee"}"#),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["names"][0]["name"], "Nexoro");
    assert_eq!(body["names"][1]["name"], "Velurn");
}

#[tokio::test]
async fn logo_body_as_plain_text_is_still_read() {
    let llm = MockServer::start().await;
    let registry = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"url": "https://img.example.com/velurn.png"}]
        })))
        .expect(1)
        .mount(&llm)
        .await;

    let app = app_for(&llm, &registry, &[("LOGO_COUNT", "1")]);
    let (status, body) = post_with_content_type(
        app,
        "/api/generate-logos",
        Body::from(r#"{"name":"Velurn","prompt":"tea"}"#),
        Some("text/plain"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["logos"][0]["id"], "velurn-1");
}

#[tokio::test]
async fn model_names_are_kept_verbatim_and_counted() {
    let llm = MockServer::start().await;
    let registry = MockServer::start().await;
    mount_chat(
        &llm,
        chat_reply(r#"["Nexoro", " Velurn ", "", "Brewix", "Camora"]"#),
        1,
    )
    .await;
    mount_registry_default(&registry, no_domains()).await;

    let app = app_for(&llm, &registry, &[]);
    let (status, body) = post_json(
        app,
        "/api/generate-names",
        Body::from(json!({ "prompt": COFFEE_PROMPT }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let names = body["names"].as_array().expect("names array");
    let got: Vec<&str> = names.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(got, vec!["Nexoro", " Velurn ", "", "Brewix", "Camora"]);
    names.iter().for_each(assert_three_booleans);
}

#[tokio::test]
async fn reply_without_array_is_empty_success() {
    let llm = MockServer::start().await;
    let registry = MockServer::start().await;
    mount_chat(&llm, chat_reply("I'm sorry, I can't help with that."), 1).await;

    let app = app_for(&llm, &registry, &[]);
    let (status, body) = post_json(
        app,
        "/api/generate-names",
        Body::from(json!({ "prompt": COFFEE_PROMPT }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"names": []}));
}

#[tokio::test]
async fn model_auth_failure_is_500_without_names() {
    let llm = MockServer::start().await;
    let registry = MockServer::start().await;
    mount_chat(&llm, ResponseTemplate::new(401).set_body_string("bad key"), 1).await;

    let app = app_for(&llm, &registry, &[]);
    let (status, body) = post_json(
        app,
        "/api/generate-names",
        Body::from(json!({ "prompt": COFFEE_PROMPT }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "upstream_error");
    assert!(body.get("names").is_none());
}

#[tokio::test]
async fn unreachable_model_is_500_without_names() {
    let llm = MockServer::start().await;
    let registry = MockServer::start().await;
    let app = app_for(&llm, &registry, &[("OPENAI_BASE_URL", "http://127.0.0.1:9")]);

    let (status, body) = post_json(
        app,
        "/api/generate-names",
        Body::from(json!({ "prompt": COFFEE_PROMPT }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    assert!(body.get("names").is_none());
}

#[tokio::test]
async fn hanging_registry_degrades_within_timeout() {
    let llm = MockServer::start().await;
    let registry = MockServer::start().await;
    mount_chat(
        &llm,
        chat_reply(r#"["Nexoro","Velurn","Brewix","Camora","Solace"]"#),
        1,
    )
    .await;
    mount_registry_default(
        &registry,
        no_domains().set_delay(Duration::from_secs(10)),
    )
    .await;

    let app = app_for(&llm, &registry, &[("AVAILABILITY_TIMEOUT_MS", "200")]);
    let start = Instant::now();
    let (status, body) = post_json(
        app,
        "/api/generate-names",
        Body::from(json!({ "prompt": COFFEE_PROMPT }).to_string()),
    )
    .await;

    assert!(start.elapsed() < Duration::from_secs(3), "took {:?}", start.elapsed());
    assert_eq!(status, StatusCode::OK);
    let names = body["names"].as_array().expect("names array");
    assert_eq!(names.len(), 5);
    names.iter().for_each(assert_three_booleans);
}

#[tokio::test]
async fn broken_registry_still_yields_booleans() {
    let llm = MockServer::start().await;
    let registry = MockServer::start().await;
    mount_chat(&llm, chat_reply(r#"["Nexoro"]"#), 1).await;
    mount_registry_default(
        &registry,
        ResponseTemplate::new(200).set_body_string("<html>oops</html>"),
    )
    .await;

    let app = app_for(&llm, &registry, &[]);
    let (status, body) = post_json(
        app,
        "/api/generate-names",
        Body::from(json!({ "prompt": COFFEE_PROMPT }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_three_booleans(&body["names"][0]);
}

// ---------------------------------------------------------------------------
// generate-logos and health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn logos_are_generated_for_chosen_name() {
    let llm = MockServer::start().await;
    let registry = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"url": "https://img.example.com/nexoro.png"}]
        })))
        .expect(2)
        .mount(&llm)
        .await;

    let app = app_for(&llm, &registry, &[("LOGO_COUNT", "2")]);
    let (status, body) = post_json(
        app,
        "/api/generate-logos",
        Body::from(json!({ "name": "Nexoro", "prompt": COFFEE_PROMPT }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"logos": [
            {"url": "https://img.example.com/nexoro.png", "id": "nexoro-1"},
            {"url": "https://img.example.com/nexoro.png", "id": "nexoro-2"}
        ]})
    );
}

#[tokio::test]
async fn logos_require_a_name() {
    let llm = MockServer::start().await;
    let registry = MockServer::start().await;

    let app = app_for(&llm, &registry, &[]);
    let (status, body) = post_json(
        app,
        "/api/generate-logos",
        Body::from(json!({ "prompt": COFFEE_PROMPT }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Name required"}));
}

#[tokio::test]
async fn health_reports_version_and_metrics() {
    let llm = MockServer::start().await;
    let registry = MockServer::start().await;

    let app = app_for(&llm, &registry, &[]);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let json: Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], brand_forge::VERSION);
    assert_eq!(json["registry"], "domainsdb");
    assert_eq!(json["live_ratio"], 0.0);
    assert_eq!(json["metrics"]["generations"], 0);
}
