//! Purpose: Translate execution results into GraphQL or REST response bodies.
//! Exports: `Translator`, `ResponseMode`, `build_envelope`.
//! Role: The only place response bytes are produced; HTTP and CLI layers call into it.
//! Invariants: GraphQL mode returns every fault to the caller untouched.
//! Invariants: REST mode contains one fault by writing `RestEnvelope::fallback()`;
//! Invariants: only a failed fallback write escapes.
//! Invariants: Translators hold no per-call state; calls with disjoint sinks never interact.
use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::io::Write;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::value::RawValue;

use crate::core::code::ErrorCodeResolution;
use crate::core::envelope::RestEnvelope;
use crate::core::error::{Error, ErrorKind, error_chain};
use crate::core::printer::{NoopPrinter, Printer};
use crate::core::result::{ExecutionError, ExecutionResult, RawJson};
use crate::json::parse;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ResponseMode {
    #[default]
    GraphQl,
    Rest,
}

impl ResponseMode {
    pub fn from_restful(restful: bool) -> Self {
        if restful { Self::Rest } else { Self::GraphQl }
    }

    pub fn is_restful(self) -> bool {
        matches!(self, Self::Rest)
    }
}

#[derive(Clone)]
pub struct Translator {
    printer: Arc<dyn Printer>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator").finish_non_exhaustive()
    }
}

impl Translator {
    pub fn new() -> Self {
        Self {
            printer: Arc::new(NoopPrinter),
        }
    }

    pub fn with_printer(mut self, printer: Arc<dyn Printer>) -> Self {
        self.printer = printer;
        self
    }

    /// Writes the response for `result` to `out`.
    ///
    /// In REST mode an `Err` means the fallback envelope itself could not be written.
    pub fn write_json<W: Write + ?Sized>(
        &self,
        out: &mut W,
        result: &ExecutionResult,
        mode: ResponseMode,
    ) -> Result<(), Error> {
        match mode {
            ResponseMode::GraphQl => write_graphql(out, result),
            ResponseMode::Rest => self.write_rest(out, result),
        }
    }

    pub fn translate(
        &self,
        result: &ExecutionResult,
        mode: ResponseMode,
    ) -> Result<Vec<u8>, Error> {
        let mut out = Vec::new();
        self.write_json(&mut out, result, mode)?;
        Ok(out)
    }

    pub fn write_json_error<W: Write + ?Sized>(
        &self,
        out: &mut W,
        code: i64,
        mode: ResponseMode,
        message: &str,
    ) -> Result<(), Error> {
        let error = ExecutionError::new(message).with_code(code);
        let result = ExecutionResult::from_errors(vec![error]);
        self.write_json(out, &result, mode)
    }

    pub fn write_json_errorf<W: Write + ?Sized>(
        &self,
        out: &mut W,
        code: i64,
        mode: ResponseMode,
        args: fmt::Arguments<'_>,
    ) -> Result<(), Error> {
        self.write_json_error(out, code, mode, &fmt::format(args))
    }

    fn write_rest<W: Write + ?Sized>(
        &self,
        out: &mut W,
        result: &ExecutionResult,
    ) -> Result<(), Error> {
        let written = build_envelope(result).and_then(|envelope| write_value(out, &envelope));
        match written {
            Ok(()) => Ok(()),
            Err(err) => {
                self.report(&err);
                write_value(out, &RestEnvelope::fallback())
            }
        }
    }

    fn report(&self, err: &Error) {
        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            self.printer.printf(format_args!(
                "restful response recovered from error: {}\n{backtrace}",
                error_chain(err)
            ));
        } else {
            self.printer.printf(format_args!(
                "restful response recovered from error: {}",
                error_chain(err)
            ));
        }
    }
}

/// Builds the REST envelope for `result` without writing it.
pub fn build_envelope(result: &ExecutionResult) -> Result<RestEnvelope, Error> {
    let mut envelope = RestEnvelope {
        code: 0,
        message: String::new(),
        data: result.data.clone(),
    };

    if !result.data.is_empty() {
        if let Some(inner) = unwrap_top_level_field(&result.data)? {
            envelope.data = inner;
        }
    }

    if let Some(resolved) = ErrorCodeResolution::from_errors(&result.errors) {
        envelope.code = resolved.code;
        envelope.message = resolved.message;
    }

    Ok(envelope)
}

/// Value of the first top-level field of `data`; `None` for `null` or `{}`.
fn unwrap_top_level_field(data: &RawJson) -> Result<Option<RawJson>, Error> {
    let fields: Option<IndexMap<String, Box<RawValue>>> =
        parse::from_slice(data.as_bytes()).map_err(|err| {
            Error::new(ErrorKind::Shape)
                .with_message("response data is not a single-field object")
                .with_hint(parse::hint_for_error(&err, "response data"))
                .with_source(err)
        })?;
    Ok(fields
        .and_then(|fields| fields.into_iter().next())
        .map(|(_, value)| RawJson::from(value)))
}

fn write_graphql<W: Write + ?Sized>(out: &mut W, result: &ExecutionResult) -> Result<(), Error> {
    write_value(out, result)
}

fn write_value<W, T>(out: &mut W, value: &T) -> Result<(), Error>
where
    W: Write + ?Sized,
    T: serde::Serialize,
{
    let bytes = serde_json::to_vec(value).map_err(|err| {
        Error::new(ErrorKind::Encode)
            .with_message("failed to encode response")
            .with_source(err)
    })?;
    out.write_all(&bytes).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to write response")
            .with_source(err)
    })
}
