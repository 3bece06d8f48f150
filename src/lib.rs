//! Alertrix - a Matrix notification dispatcher
//!
//! This library converts monitoring alert events into chat messages delivered
//! to a Matrix room. It covers configuration resolution (picking the right
//! homeserver/credentials/room for an endpoint's group), message formatting
//! (plaintext and HTML bodies rendered from the same event), and a dispatcher
//! that issues a single idempotent room write through an injected transport.
//!
//! Retry, queuing, and delivery guarantees beyond one attempt are the
//! caller's responsibility.

pub mod cli;
pub mod config;
pub mod core;
pub mod formatting;
pub mod notification;
pub mod transport;

// Re-export core types for convenience
pub use crate::core::*;
