//! Shared utilities for the AlphaOne dashboard
//!
//! Currently this is just tracing setup shared by the server and the CLI.

pub mod logging;

pub use logging::{LogFormat, init_tracing};
