#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpClientVersion {
    /// Negotiated with ALPN over TLS, plain http always uses HTTP/1.1.
    #[default]
    Auto,
    Http1,
    Http2,
}
