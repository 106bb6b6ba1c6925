//! Job arguments and their translation into entry-point tokens
//!
//! Arguments arrive as a JSON object whose values are strings, numbers,
//! booleans or (for one reserved key) a flat map. They are translated into
//! the command-line tokens the Spark driver receives, in document order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, ValidationError};

/// Argument key whose map value expands into repeated configuration pairs
pub const HOODIE_CONF_KEY: &str = "hoodie-conf";

/// Flag emitted in front of every nested configuration pair
pub const HOODIE_CONF_FLAG: &str = "--hoodie-conf";

/// A single argument value, classified by shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentValue {
    /// Emitted as `--key value`
    Text(String),
    /// Emitted as `--key` when set, omitted otherwise
    Flag(bool),
    /// Ordered `key=value` pairs, only valid under [`HOODIE_CONF_KEY`]
    Nested(Vec<(String, String)>),
}

impl ArgumentValue {
    /// Classify a raw JSON value found under `key`
    ///
    /// Numbers are kept in their JSON rendering. Arrays and nulls are
    /// rejected rather than guessing a string form for them.
    pub fn from_json(key: &str, value: &Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(Self::Text(text.clone())),
            Value::Number(number) => Ok(Self::Text(number.to_string())),
            Value::Bool(flag) => Ok(Self::Flag(*flag)),
            Value::Object(entries) => entries
                .iter()
                .map(|(inner_key, inner_value)| {
                    scalar_text(inner_value)
                        .map(|text| (inner_key.clone(), text))
                        .ok_or_else(|| ValidationError::UnsupportedValue {
                            key: key.to_string(),
                        })
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::Nested),
            Value::Array(_) | Value::Null => Err(ValidationError::UnsupportedValue {
                key: key.to_string(),
            }),
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Array(_) | Value::Object(_) | Value::Null => None,
    }
}

impl From<ArgumentValue> for Value {
    fn from(value: ArgumentValue) -> Self {
        match value {
            ArgumentValue::Text(text) => Value::String(text),
            ArgumentValue::Flag(flag) => Value::Bool(flag),
            ArgumentValue::Nested(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::String(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for ArgumentValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ArgumentValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<bool> for ArgumentValue {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

/// Named job parameters in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arguments(Map<String, Value>);

impl Arguments {
    /// Creates an empty argument set
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an argument, replacing any previous value under the same key
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ArgumentValue>) -> Self {
        let value: ArgumentValue = value.into();
        self.0.insert(key.into(), Value::from(value));
        self
    }

    /// Number of named arguments, flags and nested maps counted once
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no argument is set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Translates the arguments into entry-point tokens
    ///
    /// Per entry, in order:
    /// - `hoodie-conf` expands to `--hoodie-conf k=v` for each inner pair
    /// - `true` becomes `--key`, `false` is dropped
    /// - anything else becomes `--key value`
    pub fn entry_point_arguments(&self) -> Result<Vec<String>> {
        let mut tokens = Vec::with_capacity(self.0.len() * 2);

        for (key, raw) in &self.0 {
            let value = ArgumentValue::from_json(key, raw);

            if key == HOODIE_CONF_KEY {
                let Ok(ArgumentValue::Nested(entries)) = value else {
                    return Err(ValidationError::InvalidNestedConf { key: key.clone() });
                };
                for (inner_key, inner_value) in entries {
                    tokens.push(HOODIE_CONF_FLAG.to_string());
                    tokens.push(format!("{inner_key}={inner_value}"));
                }
                continue;
            }

            match value? {
                ArgumentValue::Flag(true) => tokens.push(format!("--{key}")),
                ArgumentValue::Flag(false) => {}
                ArgumentValue::Text(text) => {
                    tokens.push(format!("--{key}"));
                    tokens.push(text);
                }
                ArgumentValue::Nested(_) => {
                    return Err(ValidationError::UnsupportedValue { key: key.clone() });
                }
            }
        }

        Ok(tokens)
    }
}

impl TryFrom<Value> for Arguments {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ValidationError::malformed(format!(
                "arguments must be an object, got {other}"
            ))),
        }
    }
}
