//! Purpose: Derive numeric response codes and messages from execution errors.
//! Exports: `ErrorCodeResolution`, `ProtocolCode`, `resolve_code`, `status_for`, constants.
//! Role: Code policy shared by the REST envelope and the HTTP status of GraphQL responses.
//! Invariants: The last error carrying `extensions.code` decides the code (iteration order).
//! Invariants: Unknown non-numeric codes resolve to 500; uncoded error lists resolve to 422.
use serde_json::Value;

use crate::core::result::ExecutionError;

pub const STATUS_UNPROCESSABLE: i64 = 422;
pub const STATUS_INTERNAL: i64 = 500;

const MESSAGE_SEPARATOR: &str = "; ";

/// Symbolic error codes that mean the request itself was malformed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProtocolCode {
    ValidationFailed,
    ParseFailed,
}

impl ProtocolCode {
    pub fn from_symbol(code: &str) -> Option<Self> {
        match code {
            "ValidationFailed" | "GRAPHQL_VALIDATION_FAILED" => Some(Self::ValidationFailed),
            "ParseFailed" | "GRAPHQL_PARSE_FAILED" => Some(Self::ParseFailed),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ErrorCodeResolution {
    pub code: i64,
    pub message: String,
}

impl ErrorCodeResolution {
    /// Returns `None` for an empty error list.
    pub fn from_errors(errors: &[ExecutionError]) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }

        let mut code = STATUS_UNPROCESSABLE.to_string();
        let mut messages = Vec::with_capacity(errors.len());
        for err in errors {
            if let Some(value) = err.code() {
                code = code_text(value);
            }
            if err.path.is_empty() {
                messages.push(err.message.clone());
            } else {
                messages.push(format!("{} {}", err.message, err.path));
            }
        }

        Some(Self {
            code: resolve_code(&code),
            message: messages.join(MESSAGE_SEPARATOR),
        })
    }
}

/// Textual form of an `extensions.code` value; non-string, non-number values become empty.
fn code_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => String::new(),
    }
}

pub fn resolve_code(code: &str) -> i64 {
    if !code.is_empty() && code.bytes().all(|b| b.is_ascii_digit()) {
        return code.parse().unwrap_or(STATUS_INTERNAL);
    }
    match ProtocolCode::from_symbol(code) {
        Some(_) => STATUS_UNPROCESSABLE,
        None => STATUS_INTERNAL,
    }
}

/// HTTP status for a GraphQL-mode response: 422 when any error is a protocol failure.
pub fn status_for(errors: &[ExecutionError]) -> u16 {
    let protocol = errors.iter().any(|err| {
        err.code()
            .and_then(Value::as_str)
            .and_then(ProtocolCode::from_symbol)
            .is_some()
    });
    if protocol { 422 } else { 200 }
}
