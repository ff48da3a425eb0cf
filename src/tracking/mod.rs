pub mod message_id;
pub mod networking;
pub mod track_error;
pub mod track_request;
pub mod track_request_manager;
pub mod track_tag;
pub mod tracking_config;
pub mod tracking_event;
