pub mod crypto;
pub mod http_client;
pub mod http_client_config;
pub mod http_client_version;
pub mod http_response;
