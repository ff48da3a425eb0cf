use std::sync::Arc;

use crate::tracking::{
    message_id::normalize_message_id,
    networking::{NetworkResponse, Networking},
    track_error::TrackError,
    track_request::TrackRequest,
    track_tag::TrackTag,
    tracking_config::{ConfigurationProvider, PrivacyStatus},
    tracking_event::{DELIVERY_ID_KEY, MESSAGE_ID_KEY, TrackingEvent},
};

const SELF_TAG: &str = "TrackRequestManager";

/// Sends notification receive and click track requests to the configured tracking server.
///
/// A track request is not sent when:
/// - the privacy status is not opted in, or no configuration is available
/// - the tracking server is missing from the configuration
/// - the delivery id `_dId` or message id `_mId` is missing from the event
/// - the message id is neither a UUID nor a decimal integer
/// - no network service is available
///
/// None of these are returned to the caller, every outcome is only logged.
pub struct TrackRequestManager {
    configuration: Arc<dyn ConfigurationProvider>,
    network_service: Option<Arc<dyn Networking>>,
}

impl TrackRequestManager {
    pub fn new(configuration: Arc<dyn ConfigurationProvider>, network_service: Option<Arc<dyn Networking>>) -> Self {
        TrackRequestManager {
            configuration,
            network_service,
        }
    }

    pub fn track_receive(&self, event: &TrackingEvent) {
        self.handle_track_request(event, TrackTag::Receive.as_str());
    }

    pub fn track_click(&self, event: &TrackingEvent) {
        self.handle_track_request(event, TrackTag::Click.as_str());
    }

    /// Validates the event against the current configuration and sends the track request without waiting for the response.
    pub fn handle_track_request(&self, event: &TrackingEvent, tag_id: &str) {
        match self.build_track_request(event, tag_id) {
            Ok(request) => self.send_tracking_request(request),
            Err(err) => {
                tracing::debug!(self_tag = SELF_TAG, "handle_track_request - Failed to process track request, {}", err);
            }
        }
    }

    /// Runs the validation and formatting steps of [`handle_track_request`](Self::handle_track_request) without sending anything.
    pub fn build_track_request(&self, event: &TrackingEvent, tag_id: &str) -> Result<TrackRequest, TrackError> {
        let config = self.configuration.configuration(event);

        let privacy_status = config.as_ref().map(|config| config.privacy_status()).unwrap_or_default();
        if privacy_status != PrivacyStatus::OptIn {
            return Err(TrackError::PrivacyNotOptedIn(privacy_status));
        }

        let config = config.ok_or(TrackError::ConfigurationUnavailable)?;
        let tracking_server = config.tracking_server().ok_or(TrackError::ConfigurationUnavailable)?;

        let delivery_id = event.get_delivery_id().ok_or(TrackError::MissingIdentifier {
            name: "deliveryId",
            key: DELIVERY_ID_KEY,
        })?;

        let message_id = event.get_message_id().ok_or(TrackError::MissingIdentifier {
            name: "messageId",
            key: MESSAGE_ID_KEY,
        })?;

        let message_id = normalize_message_id(message_id)?;

        Ok(TrackRequest::new(tracking_server, &message_id, delivery_id, tag_id, config.timeout()))
    }

    fn send_tracking_request(&self, request: TrackRequest) {
        let network_service = match &self.network_service {
            Some(network_service) => network_service,
            None => {
                tracing::debug!(self_tag = SELF_TAG, "send_tracking_request - Cannot send request, {}", TrackError::NetworkUnavailable);
                return;
            }
        };

        tracing::trace!(self_tag = SELF_TAG, "send_tracking_request - Track request network call initiated with URL: {}", request.url);
        network_service.connect_async(request.to_network_request(), Box::new(handle_tracking_response));
    }
}

fn handle_tracking_response(response: Option<Box<dyn NetworkResponse>>) {
    let response = match response {
        Some(response) => response,
        None => {
            let err = TrackError::RequestFailed {
                code: None,
                message: String::from("no response"),
            };
            tracing::warn!(self_tag = SELF_TAG, "send_tracking_request - {}", err);
            return;
        }
    };

    match response.response_code() {
        200 => {
            tracing::trace!(self_tag = SELF_TAG, "send_tracking_request - Connection successful {}.", response.response_message());
        }
        code => {
            let err = TrackError::RequestFailed {
                code: Some(code),
                message: response.response_message().to_string(),
            };
            tracing::warn!(self_tag = SELF_TAG, "send_tracking_request - {}", err);
        }
    }

    response.close();
}
