use std::collections::BTreeMap;

use tracing::debug;
use url::Url;

use crate::error::{AppError, AppResult, RequestError};
use crate::openapi::{ParameterLocation, RequestTemplate};
use crate::render;

use super::types::{HeaderValue, RequestBody, SerializedRequest};
use super::values::ValueSource;

type ResolvedParameters = BTreeMap<(ParameterLocation, String), String>;

/// Generates concrete requests for every template against one server URL.
///
/// # Errors
///
/// Returns an error when the server URL is invalid or any template has a
/// required parameter that can neither be supplied nor synthesized.
pub fn generate_all(
    templates: &[RequestTemplate],
    server: &str,
    values: &ValueSource,
) -> AppResult<Vec<SerializedRequest>> {
    templates
        .iter()
        .map(|template| generate(template, server, values))
        .collect()
}

/// Combines a request template, a server URL, and resolved values into a
/// fully concrete request.
///
/// # Errors
///
/// Returns an error when the server URL does not parse or lacks a host, or
/// when a required parameter has neither a supplied nor a synthesizable
/// value.
pub fn generate(
    template: &RequestTemplate,
    server: &str,
    values: &ValueSource,
) -> AppResult<SerializedRequest> {
    let server_url = Url::parse(server).map_err(|err| {
        AppError::request(RequestError::InvalidServerUrl {
            url: server.to_owned(),
            source: err,
        })
    })?;
    let host = server_url.host_str().ok_or_else(|| {
        AppError::request(RequestError::ServerUrlMissingHost {
            url: server.to_owned(),
        })
    })?;
    let authority = match server_url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_owned(),
    };

    let resolved = resolve_parameters(template, values)?;

    let mut path = String::new();
    path.push_str(server_url.path().trim_end_matches('/'));
    path.push_str(&render_path(&template.path, &resolved));
    if let Some(query) = build_query(&resolved) {
        path.push('?');
        path.push_str(&query);
    }

    let mut headers = build_headers(&resolved);
    if let Some(cookie) = build_cookie(&resolved) {
        headers.insert("cookie".to_owned(), HeaderValue::Single(cookie));
    }

    let body = template
        .body
        .as_ref()
        .and_then(|spec| values.body_value(spec))
        .map(|value| RequestBody::Json(render::render(&value, values.context())));

    debug!("Generated request {} {}", template.method, path);

    Ok(SerializedRequest {
        protocol: server_url.scheme().to_owned(),
        host: authority,
        path,
        method: template.method,
        headers,
        body,
    })
}

/// Resolves every declared parameter to a value, keyed by (location, name).
/// A name declared more than once at the same location resolves last-wins:
/// the later declaration replaces the earlier one wholesale.
fn resolve_parameters(
    template: &RequestTemplate,
    values: &ValueSource,
) -> AppResult<ResolvedParameters> {
    let mut entries: BTreeMap<(ParameterLocation, String), (bool, Option<String>)> =
        BTreeMap::new();
    for parameter in &template.parameters {
        let value = values.resolve(parameter);
        entries.insert(
            (parameter.location, parameter.name.clone()),
            (parameter.required, value),
        );
    }

    let mut resolved = ResolvedParameters::new();
    for ((location, name), (required, value)) in entries {
        match value {
            Some(value) => {
                resolved.insert((location, name), value);
            }
            None if required => {
                return Err(AppError::request(RequestError::MissingRequiredParameter {
                    name,
                }));
            }
            // Optional and unresolvable: leave it out of the request.
            None => {}
        }
    }
    Ok(resolved)
}

fn render_path(template_path: &str, resolved: &ResolvedParameters) -> String {
    let mut path = template_path.to_owned();
    for ((location, name), value) in resolved {
        if *location == ParameterLocation::Path {
            path = path.replace(&format!("{{{name}}}"), value);
        }
    }
    path
}

fn build_query(resolved: &ResolvedParameters) -> Option<String> {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for ((location, name), value) in resolved {
        if *location == ParameterLocation::Query {
            serializer.append_pair(name, value);
            any = true;
        }
    }
    any.then(|| serializer.finish())
}

fn build_headers(resolved: &ResolvedParameters) -> BTreeMap<String, HeaderValue> {
    let mut headers = BTreeMap::new();
    for ((location, name), value) in resolved {
        if *location == ParameterLocation::Header {
            headers.insert(name.clone(), HeaderValue::Single(value.clone()));
        }
    }
    headers
}

fn build_cookie(resolved: &ResolvedParameters) -> Option<String> {
    let pairs: Vec<String> = resolved
        .iter()
        .filter(|((location, _), _)| *location == ParameterLocation::Cookie)
        .map(|((_, name), value)| format!("{name}={value}"))
        .collect();
    (!pairs.is_empty()).then(|| pairs.join("; "))
}
