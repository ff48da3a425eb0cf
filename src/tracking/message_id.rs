use std::sync::LazyLock;

use regex::Regex;

use crate::tracking::track_error::TrackError;

static UUID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)[0-9a-f]{8}-([0-9a-f]{4}-){3}[0-9a-f]{12}$").expect("UUID pattern is valid")
});

/// Converts a message id into the form the tracking server expects.
///
/// Message ids migrated to Campaign Classic arrive as UUIDs and are used verbatim. Anything else is
/// a 32-bit or 64-bit decimal that is rendered as lowercase hex:
///
/// - negative decimals that fit an `i32` are rendered as 32-bit two's complement (`-123` -> `ffffff85`)
/// - all other decimals are parsed as `i64` (`4294967295` -> `ffffffff`)
pub fn normalize_message_id(message_id: &str) -> Result<String, TrackError> {
    if is_valid_uuid(message_id) {
        return Ok(message_id.to_string());
    }

    if is_negative_32bit_decimal(message_id) {
        if let Ok(value) = message_id.parse::<i32>() {
            return Ok(format!("{:x}", value));
        }
    }

    match message_id.parse::<i64>() {
        Ok(value) => Ok(format!("{:x}", value)),
        Err(err) => Err(TrackError::UnparseableMessageId {
            message_id: message_id.to_string(),
            reason: err.to_string(),
        }),
    }
}

pub fn is_valid_uuid(value: &str) -> bool {
    UUID_PATTERN.is_match(value)
}

fn is_negative_32bit_decimal(value: &str) -> bool {
    match value.strip_prefix('-') {
        Some(digits) => digits.chars().all(|c| c.is_ascii_digit()) && value.parse::<i32>().is_ok(),
        None => false,
    }
}
