//! Purpose: Define the stable public Rust API boundary for gqlrest.
//! Exports: Result model, translator, envelope, code policy, and diagnostic sinks.
//! Role: Public, additive-only surface used by the CLI and embedding servers.
//! Invariants: Types reachable here are the only supported entry points.

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::code::{
    ErrorCodeResolution, ProtocolCode, STATUS_INTERNAL, STATUS_UNPROCESSABLE, resolve_code,
    status_for,
};
pub use crate::core::envelope::{FALLBACK_MESSAGE, RestEnvelope};
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::printer::{NoopPrinter, Printer, TracingPrinter};
pub use crate::core::result::{
    ExecutionError, ExecutionResult, Location, PathSegment, RawJson, ResponsePath,
};
pub use crate::core::translate::{ResponseMode, Translator, build_envelope};
