//! Purpose: Diagnostic sink used to report contained translation faults.
//! Exports: `Printer`, `NoopPrinter`, `TracingPrinter`.
//! Role: Injected capability; translators hold one, the default drops everything.
//! Invariants: Implementations are `Send + Sync` and tolerate concurrent calls.
use std::fmt;

pub trait Printer: Send + Sync {
    fn println(&self, line: &str);
    fn printf(&self, args: fmt::Arguments<'_>);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopPrinter;

impl Printer for NoopPrinter {
    fn println(&self, _line: &str) {}

    fn printf(&self, _args: fmt::Arguments<'_>) {}
}

/// Forwards diagnostics to `tracing` at error level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingPrinter;

impl Printer for TracingPrinter {
    fn println(&self, line: &str) {
        tracing::error!(target: "gqlrest::translate", "{line}");
    }

    fn printf(&self, args: fmt::Arguments<'_>) {
        tracing::error!(target: "gqlrest::translate", "{args}");
    }
}
