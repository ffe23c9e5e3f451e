//! Variable Value Object
//!
//! Input variables handed to the provisioning tool. Values mirror the shapes
//! Terraform accepts from a `.tfvars.json` file.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{VerifyError, VerifyResult};

/// Variables the verifier always sets itself and never takes from overrides
pub const RESERVED_VARIABLES: [&str; 2] = ["name_prefix", "project_id"];

/// A single input variable value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VarValue {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    List(Vec<VarValue>),
    Map(BTreeMap<String, VarValue>),
}

impl VarValue {
    /// Build a map value from string pairs (e.g. `ai_api_keys`)
    pub fn string_map<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        VarValue::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), VarValue::Str(v.into())))
                .collect(),
        )
    }

    /// Interpret a command-line value.
    ///
    /// `true`/`false` become booleans, integers in canonical form become
    /// numbers, JSON objects and arrays are decoded, anything else stays a
    /// string. `007` and `+7` stay strings.
    pub fn infer(raw: &str) -> Self {
        match raw {
            "true" => return VarValue::Bool(true),
            "false" => return VarValue::Bool(false),
            _ => {}
        }
        if let Ok(n) = raw.parse::<i64>() {
            if n.to_string() == raw {
                return VarValue::Int(n);
            }
        }
        if raw.starts_with('{') || raw.starts_with('[') {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(raw) {
                if let Some(value) = Self::from_json(json) {
                    return value;
                }
            }
        }
        VarValue::Str(raw.to_string())
    }

    fn from_json(json: serde_json::Value) -> Option<Self> {
        use serde_json::Value;
        match json {
            Value::Null => None,
            Value::Bool(b) => Some(VarValue::Bool(b)),
            Value::Number(n) => n
                .as_i64()
                .map(VarValue::Int)
                .or_else(|| n.as_f64().map(VarValue::Float)),
            Value::String(s) => Some(VarValue::Str(s)),
            Value::Array(items) => items
                .into_iter()
                .map(Self::from_json)
                .collect::<Option<Vec<_>>>()
                .map(VarValue::List),
            Value::Object(fields) => fields
                .into_iter()
                .map(|(k, v)| Self::from_json(v).map(|v| (k, v)))
                .collect::<Option<BTreeMap<_, _>>>()
                .map(VarValue::Map),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            VarValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            VarValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for VarValue {
    fn from(value: &str) -> Self {
        VarValue::Str(value.to_string())
    }
}

impl From<String> for VarValue {
    fn from(value: String) -> Self {
        VarValue::Str(value)
    }
}

impl From<bool> for VarValue {
    fn from(value: bool) -> Self {
        VarValue::Bool(value)
    }
}

impl From<i64> for VarValue {
    fn from(value: i64) -> Self {
        VarValue::Int(value)
    }
}

impl From<toml::Value> for VarValue {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => VarValue::Str(s),
            toml::Value::Integer(n) => VarValue::Int(n),
            toml::Value::Float(f) => VarValue::Float(f),
            toml::Value::Boolean(b) => VarValue::Bool(b),
            toml::Value::Datetime(dt) => VarValue::Str(dt.to_string()),
            toml::Value::Array(items) => {
                VarValue::List(items.into_iter().map(VarValue::from).collect())
            }
            toml::Value::Table(table) => VarValue::Map(
                table
                    .into_iter()
                    .map(|(k, v)| (k, VarValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Ordered mapping from variable name to value
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Variables(BTreeMap<String, VarValue>);

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<VarValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<VarValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&VarValue> {
        self.0.get(name)
    }

    /// Layer `overrides` on top of these variables; overriding keys win.
    pub fn layer(mut self, overrides: &Variables) -> Self {
        for (name, value) in &overrides.0 {
            self.0.insert(name.clone(), value.clone());
        }
        self
    }

    /// Reject overrides of variables in `RESERVED_VARIABLES`
    pub fn ensure_overridable(&self) -> VerifyResult<()> {
        match RESERVED_VARIABLES.iter().find(|name| self.0.contains_key(**name)) {
            Some(name) => Err(VerifyError::ReservedVariable {
                name: (*name).to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &VarValue)> {
        self.0.iter()
    }

    /// Parse a `name=value` override from the command line
    pub fn parse_assignment(raw: &str) -> Result<(String, VarValue), String> {
        let (name, value) = raw
            .split_once('=')
            .ok_or_else(|| "expected NAME=VALUE".to_string())?;
        let name = name.trim();
        if name.is_empty() {
            return Err("variable name is empty".to_string());
        }
        Ok((name.to_string(), VarValue::infer(value)))
    }
}

impl FromIterator<(String, VarValue)> for Variables {
    fn from_iter<I: IntoIterator<Item = (String, VarValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
