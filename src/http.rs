//! Purpose: Serve translated execution results as axum responses.
//! Exports: `TranslatedResponse`, `respond`.
//! Role: Thin HTTP adapter over `Translator`; route registration stays with the embedding server.
//! Invariants: REST responses are always HTTP 200 with the outcome carried in the envelope `code`.
//! Invariants: GraphQL responses use `status_for`; a translation fault yields an empty 500.

use axum::body::Body;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::core::code::status_for;
use crate::core::error::error_chain;
use crate::core::result::ExecutionResult;
use crate::core::translate::{ResponseMode, Translator};

#[derive(Clone, Debug)]
pub struct TranslatedResponse {
    pub translator: Translator,
    pub result: ExecutionResult,
    pub mode: ResponseMode,
}

impl TranslatedResponse {
    pub fn new(translator: Translator, result: ExecutionResult, mode: ResponseMode) -> Self {
        Self {
            translator,
            result,
            mode,
        }
    }
}

impl IntoResponse for TranslatedResponse {
    fn into_response(self) -> Response {
        respond(&self.translator, &self.result, self.mode)
    }
}

pub fn respond(translator: &Translator, result: &ExecutionResult, mode: ResponseMode) -> Response {
    let status = match mode {
        ResponseMode::Rest => StatusCode::OK,
        ResponseMode::GraphQl => {
            StatusCode::from_u16(status_for(&result.errors)).unwrap_or(StatusCode::OK)
        }
    };

    match translator.translate(result, mode) {
        Ok(body) => json_response(status, body),
        Err(err) => {
            tracing::error!(
                mode = ?mode,
                error = %error_chain(&err),
                "failed to translate response"
            );
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    let mut response = (status, Body::from(body)).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}
