//! Purpose: Model the execution result handed to the translator.
//! Exports: `ExecutionResult`, `ExecutionError`, `ResponsePath`, `PathSegment`, `Location`, `RawJson`.
//! Role: Wire-compatible GraphQL response shapes; serialized verbatim in GraphQL mode.
//! Invariants: `RawJson` bytes are re-emitted untouched; empty bytes serialize as `null`.
//! Invariants: Field order on the wire is `errors`, `data`, `extensions`.
use std::fmt;
use std::io::Read;

use serde::de::Deserializer;
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::{Map, Value};

use crate::core::error::{Error, ErrorKind};
use crate::json::parse;

/// Raw bytes of a single JSON value, kept unparsed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawJson(Vec<u8>);

impl RawJson {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn from_value(value: &Value) -> Self {
        Self(value.to_string().into_bytes())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for RawJson {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for RawJson {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<Box<RawValue>> for RawJson {
    fn from(raw: Box<RawValue>) -> Self {
        Self::new(raw.get())
    }
}

impl Serialize for RawJson {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.is_empty() {
            return serializer.serialize_none();
        }
        let text = std::str::from_utf8(&self.0).map_err(ser::Error::custom)?;
        let raw: &RawValue = serde_json::from_str(text).map_err(ser::Error::custom)?;
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RawJson {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(Self::from(raw))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Field(String),
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for PathSegment {
    fn from(field: &str) -> Self {
        Self::Field(field.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(field: String) -> Self {
        Self::Field(field)
    }
}

/// Location of a response field, e.g. `users[0].name`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponsePath(Vec<PathSegment>);

impl ResponsePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.0.push(segment.into());
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for ResponsePath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for ResponsePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Field(name) => {
                    if i != 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionError {
    pub message: String,
    #[serde(default, skip_serializing_if = "ResponsePath::is_empty")]
    pub path: ResponsePath,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extensions: Map<String, Value>,
}

impl ExecutionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: ResponsePath) -> Self {
        self.path = path;
        self
    }

    pub fn with_location(mut self, line: u32, column: u32) -> Self {
        self.locations.push(Location { line, column });
        self
    }

    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }

    pub fn with_code(self, code: impl Into<Value>) -> Self {
        self.with_extension("code", code)
    }

    pub fn code(&self) -> Option<&Value> {
        self.extensions.get("code")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ExecutionError>,
    #[serde(default)]
    pub data: RawJson,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extensions: Map<String, Value>,
}

impl ExecutionResult {
    pub fn from_data(data: impl Into<RawJson>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }

    pub fn from_errors(errors: Vec<ExecutionError>) -> Self {
        Self {
            errors,
            ..Self::default()
        }
    }

    /// Decodes a GraphQL response document (`{"data": ..., "errors": [...]}`).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        parse::from_reader(reader).map_err(|err| {
            Error::new(ErrorKind::Decode)
                .with_message("invalid execution result")
                .with_hint(parse::hint_for_error(&err, "execution result"))
                .with_source(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ExecutionError, ExecutionResult, PathSegment, RawJson, ResponsePath};
    use serde_json::{Value, json};

    #[test]
    fn path_renders_fields_and_indices() {
        let path: ResponsePath = vec![
            PathSegment::from("users"),
            PathSegment::Index(0),
            PathSegment::from("name"),
        ]
        .into_iter()
        .collect();
        assert_eq!(path.to_string(), "users[0].name");

        let leading_index: ResponsePath = [PathSegment::Index(2)].into_iter().collect();
        assert_eq!(leading_index.to_string(), "[2]");
        assert_eq!(ResponsePath::new().to_string(), "");
    }

    #[test]
    fn path_deserializes_mixed_segments() {
        let path: ResponsePath = serde_json::from_value(json!(["orders", 3, "total"])).unwrap();
        assert_eq!(path.to_string(), "orders[3].total");
    }

    #[test]
    fn empty_data_serializes_as_null() {
        let result = ExecutionResult::from_errors(vec![ExecutionError::new("boom")]);
        let text = serde_json::to_string(&result).unwrap();
        assert_eq!(text, r#"{"errors":[{"message":"boom"}],"data":null}"#);
    }

    #[test]
    fn raw_data_is_reemitted_verbatim() {
        let result = ExecutionResult::from_data(r#"{"user":{"id":"7","score":1.50}}"#);
        let text = serde_json::to_string(&result).unwrap();
        assert_eq!(text, r#"{"data":{"user":{"id":"7","score":1.50}}}"#);
    }

    #[test]
    fn invalid_raw_data_fails_to_serialize() {
        let result = ExecutionResult::from_data("{not json");
        assert!(serde_json::to_vec(&result).is_err());
    }

    #[test]
    fn deserializes_wire_shape() {
        let input = r#"{
            "data": {"viewer": null},
            "errors": [{
                "message": "denied",
                "path": ["viewer"],
                "locations": [{"line": 1, "column": 3}],
                "extensions": {"code": "403"}
            }]
        }"#;
        let result: ExecutionResult = serde_json::from_str(input).unwrap();
        assert_eq!(result.data, RawJson::from(r#"{"viewer": null}"#));
        assert_eq!(result.errors.len(), 1);
        let err = &result.errors[0];
        assert_eq!(err.path.to_string(), "viewer");
        assert_eq!(err.locations[0].column, 3);
        assert_eq!(err.code(), Some(&Value::from("403")));
    }

    #[test]
    fn from_reader_reports_decode_errors() {
        let err = ExecutionResult::from_reader(&b"{\"errors\": 3}"[..]).unwrap_err();
        assert_eq!(err.kind(), crate::core::error::ErrorKind::Decode);
        assert!(err.hint().unwrap().contains("parse category: data"));
    }

    #[test]
    fn missing_data_stays_empty_and_null_data_stays_raw() {
        let missing: ExecutionResult = serde_json::from_str(r#"{"errors":[]}"#).unwrap();
        assert!(missing.data.is_empty());

        let null: ExecutionResult = serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert_eq!(null.data.as_bytes(), b"null");
    }
}
