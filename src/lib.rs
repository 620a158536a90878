//! Purpose: Shared library crate used by the `gqlrest` CLI, HTTP adapter, and tests.
//! Exports: `api` (public surface), `core` (result model, code policy, translation), `http`.
//! Role: Turns GraphQL execution results into GraphQL or flattened REST response bodies.
//! Invariants: No process-wide state; diagnostics flow through an injected `Printer`.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
pub mod core;
pub mod http;
mod json;
