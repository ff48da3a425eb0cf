use std::{collections::HashMap, sync::{RwLock, RwLockReadGuard, RwLockWriteGuard}};

use crate::tracking::tracking_event::TrackingEvent;

pub const TRACKING_SERVER_KEY: &str = "campaignclassic.trackingServer";
pub const PRIVACY_STATUS_KEY: &str = "global.privacy";
pub const TIMEOUT_KEY: &str = "campaignclassic.timeout";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrivacyStatus {
    OptIn,
    OptOut,
    #[default]
    Unknown,
}

impl PrivacyStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PrivacyStatus::OptIn => "optedin",
            PrivacyStatus::OptOut => "optedout",
            PrivacyStatus::Unknown => "optunknown",
        }
    }

    /// Unrecognized values map to `Unknown`.
    pub fn from_str<T: AsRef<str>>(status: T) -> PrivacyStatus {
        match status.as_ref().to_ascii_lowercase().as_str() {
            "optedin" => PrivacyStatus::OptIn,
            "optedout" => PrivacyStatus::OptOut,
            _ => PrivacyStatus::Unknown,
        }
    }
}

impl std::fmt::Display for PrivacyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration snapshot used to build a single track request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingConfig {
    privacy_status: PrivacyStatus,
    tracking_server: Option<String>,
    timeout: u64,
}

impl TrackingConfig {
    pub fn builder() -> TrackingConfigBuilder {
        TrackingConfigBuilder {
            privacy_status: None,
            tracking_server: None,
            timeout: None,
        }
    }

    /// Reads the configuration shared state published by the host.
    ///
    /// Missing keys fall back to their defaults, a timeout that is not a positive integer falls back to [`DEFAULT_TIMEOUT`].
    pub fn from_shared_state(shared_state: &HashMap<String, String>) -> Self {
        let mut builder = TrackingConfig::builder();

        if let Some(status) = shared_state.get(PRIVACY_STATUS_KEY) {
            builder = builder.privacy_status(PrivacyStatus::from_str(status));
        }

        if let Some(server) = shared_state.get(TRACKING_SERVER_KEY) {
            builder = builder.tracking_server(server);
        }

        if let Some(timeout) = shared_state.get(TIMEOUT_KEY) {
            match timeout.trim().parse::<u64>() {
                Ok(timeout) if timeout > 0 => builder = builder.timeout(timeout),
                _ => tracing::warn!("invalid {} value {:?}, using default of {} seconds", TIMEOUT_KEY, timeout, DEFAULT_TIMEOUT),
            }
        }

        builder.build()
    }

    pub fn privacy_status(&self) -> PrivacyStatus {
        self.privacy_status
    }

    pub fn tracking_server(&self) -> Option<&str> {
        self.tracking_server.as_deref()
    }

    /// Request timeout in seconds.
    pub fn timeout(&self) -> u64 {
        self.timeout
    }
}

pub struct TrackingConfigBuilder {
    privacy_status: Option<PrivacyStatus>,
    tracking_server: Option<String>,
    timeout: Option<u64>,
}

impl TrackingConfigBuilder {
    pub fn build(self) -> TrackingConfig {
        TrackingConfig {
            privacy_status: self.privacy_status.unwrap_or_default(),
            tracking_server: self.tracking_server.filter(|server| !server.is_empty()),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        }
    }

    /// **Optional**
    ///
    /// Default: `PrivacyStatus::Unknown`
    pub fn privacy_status(mut self, privacy_status: PrivacyStatus) -> Self {
        self.privacy_status = Some(privacy_status);
        self
    }

    /// **Required** for track requests to be sent.
    ///
    /// Host name (and optional port) of the tracking server, without scheme.
    pub fn tracking_server(mut self, tracking_server: impl AsRef<str>) -> Self {
        self.tracking_server = Some(tracking_server.as_ref().to_owned());
        self
    }

    /// **Optional**
    ///
    /// Default: `30` seconds
    pub fn timeout(mut self, timeout: u64) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Source of the configuration in effect for an event.
///
/// Returning `None` means no configuration is available yet, which is treated as an unknown privacy status.
pub trait ConfigurationProvider: Send + Sync {
    fn configuration(&self, event: &TrackingEvent) -> Option<TrackingConfig>;
}

impl ConfigurationProvider for TrackingConfig {
    fn configuration(&self, _event: &TrackingEvent) -> Option<TrackingConfig> {
        Some(self.clone())
    }
}

/// Holds the latest configuration published by the host, replaced on every configuration update.
///
/// The snapshot is only ever replaced as a whole, so a lock poisoned by a panicking writer still holds a
/// complete value. It is recovered with a warning instead of being treated as missing configuration.
#[derive(Debug, Default)]
pub struct SharedConfiguration {
    pub(super) current: RwLock<Option<TrackingConfig>>,
}

impl SharedConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&self, config: TrackingConfig) {
        *self.write() = Some(config);
    }

    pub fn update_from_shared_state(&self, shared_state: &HashMap<String, String>) {
        self.update(TrackingConfig::from_shared_state(shared_state));
    }

    pub fn clear(&self) {
        *self.write() = None;
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<TrackingConfig>> {
        self.current.read().unwrap_or_else(|err| {
            tracing::warn!("configuration lock poisoned, recovering last configuration");
            self.current.clear_poison();
            err.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<TrackingConfig>> {
        self.current.write().unwrap_or_else(|err| {
            tracing::warn!("configuration lock poisoned, recovering last configuration");
            self.current.clear_poison();
            err.into_inner()
        })
    }
}

impl ConfigurationProvider for SharedConfiguration {
    fn configuration(&self, _event: &TrackingEvent) -> Option<TrackingConfig> {
        self.read().clone()
    }
}
