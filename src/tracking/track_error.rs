use crate::tracking::tracking_config::PrivacyStatus;

/// Every way a track request can fail to be sent.
///
/// None of these reach the caller of `handle_track_request`, they are only rendered into log output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackError {
    #[error("Configuration not available, tracking server is missing or empty.")]
    ConfigurationUnavailable,

    #[error("MobilePrivacyStatus is {0}, not optedIn.")]
    PrivacyNotOptedIn(PrivacyStatus),

    #[error("trackingInfo {name} is null (missing key `{key}` from tracking Info) or empty.")]
    MissingIdentifier {
        name: &'static str,
        key: &'static str,
    },

    #[error("messageId {message_id} could not be parsed as a UUID or a decimal (integer). Error {reason}")]
    UnparseableMessageId {
        message_id: String,
        reason: String,
    },

    #[error("Network service is not available.")]
    NetworkUnavailable,

    #[error("Connection failed {}{message}.", status_prefix(.code))]
    RequestFailed {
        code: Option<u16>,
        message: String,
    },
}

fn status_prefix(code: &Option<u16>) -> String {
    match code {
        Some(code) => format!("{} ", code),
        None => String::new(),
    }
}
