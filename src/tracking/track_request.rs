use std::time::Duration;

use crate::tracking::networking::NetworkRequest;

/// Track request for a single notification event, computed fresh for every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRequest {
    pub url: String,
    pub timeout_seconds: u64,
}

impl TrackRequest {
    pub fn new(tracking_server: &str, message_id: &str, delivery_id: &str, tag_id: &str, timeout_seconds: u64) -> Self {
        TrackRequest {
            url: tracking_url(tracking_server, message_id, delivery_id, tag_id),
            timeout_seconds,
        }
    }

    /// GET request without headers or body, using the timeout for both connect and read.
    pub fn to_network_request(&self) -> NetworkRequest {
        let timeout = Duration::from_secs(self.timeout_seconds);
        NetworkRequest::get(self.url.as_str())
            .connect_timeout(timeout)
            .read_timeout(timeout)
    }
}

/// The tracking server matches this URL byte for byte, do not change it.
pub fn tracking_url(tracking_server: &str, message_id: &str, delivery_id: &str, tag_id: &str) -> String {
    format!("https://{}/r/?id={},{}&mrkttag={}", tracking_server, message_id, delivery_id, tag_id)
}
