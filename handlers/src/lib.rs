//! # Chain handlers
//!
//! Handlers that run ahead of the relay: [`LoggingHandler`] records every update and its outcome,
//! [`AuthHandler`] enforces the optional user allowlist.

mod logging_auth;

#[cfg(test)]
mod test;

pub use logging_auth::{AuthHandler, LoggingHandler};
