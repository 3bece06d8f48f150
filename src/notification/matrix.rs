//! A client for sending alert notifications to a Matrix room.

use crate::config::{MatrixProviderConfig, ResolvedConfig};
use crate::core::AlertEvent;
use crate::formatting::MessageBody;
use crate::transport::{Transport, TransportError};
use rand::{distr::Alphanumeric, Rng};
use reqwest::Url;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument};

/// Length of the client-chosen transaction identifier in the send URL.
const TXN_ID_LEN: usize = 24;

/// Failure modes of a single delivery attempt.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The outbound URL could not be assembled from the resolved
    /// configuration.
    #[error("failed to build request URL: {0}")]
    InvalidRequest(String),
    /// The transport could not complete the round trip.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The homeserver answered with a status code of 400 or above.
    #[error("call to provider alert returned status code {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Sends alert messages to a Matrix room over an injected transport.
///
/// The configuration is read-only after construction, so a `MatrixNotifier`
/// is safe to share across concurrent callers.
pub struct MatrixNotifier {
    config: MatrixProviderConfig,
    transport: Arc<dyn Transport>,
}

impl MatrixNotifier {
    /// Creates a new `MatrixNotifier`.
    pub fn new(config: MatrixProviderConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Delivers one alert event to the room resolved for its group.
    ///
    /// Exactly one attempt is made; there is no retry, backoff, or queuing.
    #[instrument(skip(self, event), fields(endpoint = %event.display_name, group = %event.group))]
    pub async fn send(&self, event: &AlertEvent, resolved: bool) -> Result<(), DeliveryError> {
        let config = self.config.config_for_group(&event.group);
        let message = MessageBody::render(event, resolved);
        let payload = json!({
            "msgtype": "m.text",
            "format": "org.matrix.custom.html",
            "body": message.body,
            "formatted_body": message.formatted_body,
        });
        let url = build_send_url(&config, &txn_id())?;

        let response = self.transport.put(url, payload).await?;
        if response.status >= 400 {
            error!(
                status = response.status,
                body = %response.body,
                "Matrix rejected the notification"
            );
            return Err(DeliveryError::Rejected {
                status: response.status,
                body: response.body,
            });
        }
        info!(room = %config.internal_room_id, "Sent alert notification to Matrix");
        Ok(())
    }
}

/// Builds the room-message send URL, escaping the room id as a path segment
/// and the access token as a query value.
fn build_send_url(config: &ResolvedConfig, txn_id: &str) -> Result<Url, DeliveryError> {
    let mut url = Url::parse(&config.homeserver_url)
        .map_err(|e| DeliveryError::InvalidRequest(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| DeliveryError::InvalidRequest("homeserver URL cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(["_matrix", "client", "r0", "rooms"])
        .push(&config.internal_room_id)
        .extend(["send", "m.room.message"])
        .push(txn_id);
    url.query_pairs_mut()
        .append_pair("access_token", &config.access_token);
    Ok(url)
}

/// Generates a fresh transaction identifier: 24 alphanumeric characters from
/// the process-global generator. The homeserver deduplicates on this token,
/// so it must not repeat across distinct sends.
fn txn_id() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(TXN_ID_LEN)
        .map(char::from)
        .collect()
}
