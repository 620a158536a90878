use serde::{Deserialize, Serialize};

use crate::core::code::STATUS_INTERNAL;
use crate::core::result::RawJson;

pub const FALLBACK_MESSAGE: &str = "unexpected error: unmarshal or write response error";

/// Flattened response body for REST clients.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestEnvelope {
    pub code: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(default)]
    pub data: RawJson,
}

impl RestEnvelope {
    pub fn fallback() -> Self {
        Self {
            code: STATUS_INTERNAL,
            message: FALLBACK_MESSAGE.to_string(),
            data: RawJson::empty(),
        }
    }
}
