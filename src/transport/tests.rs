use std::collections::BTreeMap;
use std::future::Future;

use tempfile::tempdir;

use super::http::{build_headers, prepare_url};
use super::{RequestSender, StubSender, load_requests};
use crate::error::{AppError, BatchError};
use crate::request::{HeaderValue, HttpMethod, SerializedRequest};

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

fn request_with_headers(headers: BTreeMap<String, HeaderValue>) -> SerializedRequest {
    SerializedRequest {
        protocol: "https".to_owned(),
        host: "petstore.swagger.io".to_owned(),
        path: "/v1/pets?limit=3".to_owned(),
        method: HttpMethod::Get,
        headers,
        body: None,
    }
}

#[test]
fn prepare_url_joins_protocol_host_and_path() -> Result<(), String> {
    let url = prepare_url(&request_with_headers(BTreeMap::new()));
    if url != "https://petstore.swagger.io/v1/pets?limit=3" {
        return Err(format!("Unexpected URL: {}", url));
    }
    Ok(())
}

#[test]
fn multi_valued_headers_join_with_commas() -> Result<(), String> {
    let mut headers = BTreeMap::new();
    headers.insert(
        "accept".to_owned(),
        HeaderValue::Multi(vec!["application/json".to_owned(), "text/plain".to_owned()]),
    );
    headers.insert(
        "x-request-id".to_owned(),
        HeaderValue::Single("abc123".to_owned()),
    );

    let map = build_headers(&request_with_headers(headers))
        .map_err(|err| format!("build_headers failed: {}", err))?;

    let accept = map
        .get("accept")
        .and_then(|value| value.to_str().ok())
        .ok_or("Missing accept header")?;
    if accept != "application/json,text/plain" {
        return Err(format!("Unexpected accept header: {}", accept));
    }
    let request_id = map
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .ok_or("Missing x-request-id header")?;
    if request_id != "abc123" {
        return Err(format!("Unexpected x-request-id header: {}", request_id));
    }
    Ok(())
}

#[test]
fn invalid_header_names_are_rejected() -> Result<(), String> {
    let mut headers = BTreeMap::new();
    headers.insert(
        "bad header".to_owned(),
        HeaderValue::Single("value".to_owned()),
    );

    match build_headers(&request_with_headers(headers)) {
        Err(err) => {
            if !err.to_string().contains("bad header") {
                return Err(format!("Error does not name the header: {}", err));
            }
            Ok(())
        }
        Ok(_) => Err("Expected invalid header name to fail".to_owned()),
    }
}

#[test]
fn stub_sender_always_answers_200() -> Result<(), String> {
    run_async_test(async {
        let sender = StubSender;
        let response = sender
            .send(&request_with_headers(BTreeMap::new()))
            .await
            .map_err(|err| format!("stub send failed: {}", err))?;
        if response.code != 200 {
            return Err(format!("Unexpected status: {}", response.code));
        }
        if response.body.as_deref() != Some("{ \"message\": \"ok\" }") {
            return Err(format!("Unexpected body: {:?}", response.body));
        }
        Ok(())
    })
}

#[test]
fn load_requests_missing_file_fails() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("absent.yaml");
    match load_requests(&path) {
        Err(AppError::Batch(BatchError::FileNotFound { .. })) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected FileNotFound".to_owned()),
    }
}

#[test]
fn load_requests_accepts_an_empty_sequence() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("empty.yaml");
    std::fs::write(&path, "[]\n").map_err(|err| format!("write failed: {}", err))?;

    let requests = load_requests(&path).map_err(|err| format!("load failed: {}", err))?;
    if !requests.is_empty() {
        return Err(format!("Expected no requests, got {}", requests.len()));
    }
    Ok(())
}

#[test]
fn load_requests_parses_yaml_sequences() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("requests.yaml");
    let content = r#"
- protocol: http
  host: localhost:8080
  path: /v1/pets
  method: get
  headers:
    accept:
      - application/json
      - text/plain
- protocol: https
  host: petstore.swagger.io
  path: /v1/pets
  method: post
  body: '{"name":"rex"}'
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let requests = load_requests(&path).map_err(|err| format!("load failed: {}", err))?;
    if requests.len() != 2 {
        return Err(format!("Expected 2 requests, got {}", requests.len()));
    }
    let first = requests.first().ok_or("Missing first request")?;
    if first.method != HttpMethod::Get || first.host != "localhost:8080" {
        return Err(format!("Unexpected first request: {:?}", first));
    }
    match first.headers.get("accept") {
        Some(HeaderValue::Multi(values)) if values.len() == 2 => {}
        other => return Err(format!("Unexpected accept header: {:?}", other)),
    }
    Ok(())
}

#[test]
fn load_requests_parses_json_sequences() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("requests.json");
    let content = r#"[
  { "protocol": "http", "host": "localhost", "path": "/ping", "method": "get" }
]"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let requests = load_requests(&path).map_err(|err| format!("load failed: {}", err))?;
    if requests.len() != 1 {
        return Err(format!("Expected 1 request, got {}", requests.len()));
    }
    Ok(())
}

#[test]
fn load_requests_rejects_unknown_extensions() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("requests.toml");
    std::fs::write(&path, "x = 1").map_err(|err| format!("write failed: {}", err))?;

    match load_requests(&path) {
        Err(AppError::Batch(BatchError::UnsupportedExtension { ext })) if ext == "toml" => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected UnsupportedExtension".to_owned()),
    }
}
