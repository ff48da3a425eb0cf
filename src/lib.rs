pub mod tracking;

#[cfg(feature = "http")]
pub mod http;
