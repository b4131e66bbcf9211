//! OpenAPI document loading and traversal.
mod loader;
mod types;
mod walker;


pub use loader::read_openapi;
pub use types::{
    BodySpec, Document, MediaObject, Operation, Parameter, ParameterLocation, PathItem,
    RequestBodySpec, RequestTemplate, Schema, SchemaType, Server,
};
pub use walker::extract_ops;
