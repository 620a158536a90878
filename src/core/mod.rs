// Core modules implementing the result model, code policy, and translation.
pub mod code;
pub mod envelope;
pub mod error;
pub mod printer;
pub mod result;
pub mod translate;
