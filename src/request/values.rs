use std::collections::BTreeMap;

use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use serde_json::{Map, Value};

use crate::openapi::{BodySpec, Parameter, Schema, SchemaType};

const TOKEN_LEN: usize = 8;
const MAX_BODY_DEPTH: u8 = 4;
const NUMBER_RANGE: std::ops::Range<i64> = 0..1000;

/// Resolves parameter and body values during request generation: supplied
/// values win, then schema examples, then a value synthesized from the
/// declared type. A parameter with none of the three stays unresolved.
#[derive(Debug, Default, Clone)]
pub struct ValueSource {
    supplied: BTreeMap<String, String>,
}

impl ValueSource {
    #[must_use]
    pub const fn new(supplied: BTreeMap<String, String>) -> Self {
        Self { supplied }
    }

    /// The flat context handed to the value renderer for body templates.
    #[must_use]
    pub const fn context(&self) -> &BTreeMap<String, String> {
        &self.supplied
    }

    pub(super) fn resolve(&self, parameter: &Parameter) -> Option<String> {
        if let Some(value) = self.supplied.get(&parameter.name) {
            return Some(value.clone());
        }
        parameter.schema.as_ref().and_then(synthesize_scalar)
    }

    pub(super) fn body_value(&self, body: &BodySpec) -> Option<Value> {
        if let Some(example) = &body.example {
            return Some(example.clone());
        }
        body.schema
            .as_ref()
            .and_then(|schema| synthesize_value(schema, MAX_BODY_DEPTH))
    }
}

fn synthesize_scalar(schema: &Schema) -> Option<String> {
    if let Some(example) = &schema.example {
        return Some(scalar_text(example));
    }
    match schema.schema_type? {
        SchemaType::String => Some(random_token(TOKEN_LEN)),
        SchemaType::Integer | SchemaType::Number => {
            Some(thread_rng().gen_range(NUMBER_RANGE).to_string())
        }
        SchemaType::Boolean => Some(thread_rng().gen_bool(0.5).to_string()),
        SchemaType::Array | SchemaType::Object | SchemaType::Unknown => None,
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null
        | Value::Bool(_)
        | Value::Number(_)
        | Value::Array(_)
        | Value::Object(_) => value.to_string(),
    }
}

fn synthesize_value(schema: &Schema, depth: u8) -> Option<Value> {
    if let Some(example) = &schema.example {
        return Some(example.clone());
    }
    match schema.schema_type? {
        SchemaType::String => Some(Value::String(random_token(TOKEN_LEN))),
        SchemaType::Integer | SchemaType::Number => {
            Some(Value::from(thread_rng().gen_range(NUMBER_RANGE)))
        }
        SchemaType::Boolean => Some(Value::Bool(thread_rng().gen_bool(0.5))),
        SchemaType::Object => {
            let next_depth = depth.checked_sub(1)?;
            let mut fields = Map::new();
            for (name, property) in &schema.properties {
                if let Some(value) = synthesize_value(property, next_depth) {
                    fields.insert(name.clone(), value);
                }
            }
            Some(Value::Object(fields))
        }
        SchemaType::Array => {
            let next_depth = depth.checked_sub(1)?;
            let items = schema.items.as_deref()?;
            synthesize_value(items, next_depth).map(|value| Value::Array(vec![value]))
        }
        SchemaType::Unknown => None,
    }
}

fn random_token(len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
