use std::collections::HashMap;

pub const DELIVERY_ID_KEY: &str = "_dId";
pub const MESSAGE_ID_KEY: &str = "_mId";

/// Tracking identifiers carried by a notification receive or click event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingEvent {
    delivery_id: Option<String>,
    message_id: Option<String>,
}

impl TrackingEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the identifiers from the tracking info of an event, using the `_dId` and `_mId` keys.
    pub fn from_event_data(data: &HashMap<String, String>) -> Self {
        let mut event = TrackingEvent::new();
        if let Some(delivery_id) = data.get(DELIVERY_ID_KEY) {
            event = event.delivery_id(delivery_id);
        }
        if let Some(message_id) = data.get(MESSAGE_ID_KEY) {
            event = event.message_id(message_id);
        }
        event
    }

    /// Empty values are treated as absent.
    pub fn delivery_id(mut self, delivery_id: impl AsRef<str>) -> Self {
        self.delivery_id = non_empty(delivery_id.as_ref());
        self
    }

    /// Empty values are treated as absent.
    pub fn message_id(mut self, message_id: impl AsRef<str>) -> Self {
        self.message_id = non_empty(message_id.as_ref());
        self
    }

    pub fn get_delivery_id(&self) -> Option<&str> {
        self.delivery_id.as_deref()
    }

    pub fn get_message_id(&self) -> Option<&str> {
        self.message_id.as_deref()
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
