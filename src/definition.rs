//! Opaque resource definitions: arbitrary JSON documents whose only
//! validated structure is a non-empty `name` string used as the identity
//! key. The remote service validates everything else.

#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde_json::{Value, json};

use crate::client::CliError;

#[derive(Debug, Clone)]
pub struct Definition {
    value: Value,
    name: String,
}

impl FromStr for Definition {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s)
            .map_err(|e| CliError::InvalidDefinition(format!("not valid JSON: {e}")))?;
        if !value.is_object() {
            return Err(CliError::InvalidDefinition(
                "expected a JSON object".to_string(),
            ));
        }
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                CliError::InvalidDefinition("missing a non-empty `name` field".to_string())
            })?
            .to_string();
        Ok(Self { value, name })
    }
}

impl Definition {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let data = fs::read_to_string(path).map_err(|source| CliError::DefinitionFile {
            path: path.display().to_string(),
            source,
        })?;
        data.parse()
    }

    /// Identity key, validated once at load time.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Replace the `credentials` field with the supplied connection string;
    /// datasource credentials never live in definition files.
    pub fn set_connection_string(&mut self, connection_string: &str) {
        if let Some(object) = self.value.as_object_mut() {
            object.insert(
                "credentials".to_string(),
                json!({ "connectionString": connection_string }),
            );
        }
    }
}
