use std::time::Duration;

/// A single GET request handed to a [`Networking`] service, sent without headers or body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRequest {
    pub url: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl NetworkRequest {
    pub fn get(url: impl Into<String>) -> Self {
        NetworkRequest {
            url: url.into(),
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(5),
        }
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }
}

/// Response delivered to a [`CompletionHandler`].
///
/// The receiver of a response owns it and must call [`close`](NetworkResponse::close) once it is done inspecting it.
pub trait NetworkResponse: Send {
    fn response_code(&self) -> u16;
    fn response_message(&self) -> &str;
    fn close(self: Box<Self>);
}

/// Called once a request completes, with `None` if no response could be obtained.
pub type CompletionHandler = Box<dyn FnOnce(Option<Box<dyn NetworkResponse>>) + Send + 'static>;

/// Network service provided by the host.
///
/// Implementations must not block the caller, the completion handler may run on any thread.
pub trait Networking: Send + Sync {
    fn connect_async(&self, request: NetworkRequest, completion: CompletionHandler);
}
