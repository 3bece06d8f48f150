//! Handles the dispatching of alerts to notification channels.
//!
//! Each channel combines resolved configuration with formatted message
//! bodies and issues a single outbound write through an injected transport;
//! callers own any retry policy.
pub mod matrix;

pub use matrix::{DeliveryError, MatrixNotifier};
