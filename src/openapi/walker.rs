use tracing::debug;

use crate::error::{AppError, AppResult, SpecError};

use super::types::{BodySpec, Document, Operation, PathItem, RequestTemplate};
use crate::request::HttpMethod;

/// Walks a parsed OpenAPI document and yields one request template per
/// (path, verb) pair that has an operation defined.
///
/// # Errors
///
/// Returns an error when the document declares no server URLs or no paths;
/// without either, no request can be built at all.
pub fn extract_ops(document: &Document) -> AppResult<Vec<RequestTemplate>> {
    if document.servers.is_empty() {
        return Err(AppError::spec(SpecError::NoServers));
    }
    if document.paths.is_empty() {
        return Err(AppError::spec(SpecError::NoPaths));
    }

    let path_names: Vec<&str> = document.paths.keys().map(String::as_str).collect();
    debug!("Found paths: {}", path_names.join(", "));

    Ok(document
        .paths
        .iter()
        .flat_map(|(path_name, path_item)| extract_ops_for_path(path_name, path_item))
        .collect())
}

fn extract_ops_for_path(path_name: &str, path_item: &PathItem) -> Vec<RequestTemplate> {
    path_item
        .operations()
        .map(|(method, operation)| parse_operation(method, operation, path_item, path_name))
        .collect()
}

fn parse_operation(
    method: HttpMethod,
    operation: &Operation,
    path_item: &PathItem,
    path_name: &str,
) -> RequestTemplate {
    // Path-level parameters first, operation-level appended. Duplicates by
    // name are kept; the generator resolves them last-wins.
    let mut parameters = path_item.parameters.clone();
    parameters.extend(operation.parameters.iter().cloned());

    RequestTemplate {
        method,
        path: path_name.to_owned(),
        body: resolve_body(operation),
        parameters,
    }
}

fn resolve_body(operation: &Operation) -> Option<BodySpec> {
    operation
        .request_body
        .as_ref()
        .and_then(|body| body.content.get("application/json"))
        .map(|media| BodySpec {
            schema: media.schema.clone(),
            example: media.example.clone(),
        })
}
