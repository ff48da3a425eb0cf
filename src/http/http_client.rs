use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Method, Request, Uri, Version};
use hyper_util::rt::{TokioExecutor, TokioIo};
use rustls_pki_types::ServerName;
use tokio::{net::TcpStream, runtime::Handle, time::timeout};
use tokio_rustls::TlsConnector;

use crate::{
    http::{http_client_config::HttpClientConfig, http_client_version::HttpClientVersion, http_response::HttpResponse},
    tracking::networking::{CompletionHandler, NetworkRequest, NetworkResponse, Networking},
};

/// Network service backed by hyper, sending each request on its own connection.
#[derive(Clone)]
pub struct HttpClient {
    config: Arc<HttpClientConfig>,
    runtime: Handle,
}

impl HttpClient {
    /// Creates a client that spawns requests onto the tokio runtime of the caller.
    ///
    /// Fails when called outside of a tokio runtime, use [`HttpClient::with_runtime`] in that case.
    pub fn new(config: HttpClientConfig) -> anyhow::Result<Self> {
        let runtime = Handle::try_current()?;
        Ok(Self::with_runtime(config, runtime))
    }

    /// Requests are spawned onto `runtime`. Once that runtime has shut down, requests are dropped and their
    /// completion handler is called with `None` on the calling thread.
    pub fn with_runtime(config: HttpClientConfig, runtime: Handle) -> Self {
        HttpClient {
            config: Arc::new(config),
            runtime,
        }
    }

    /// Sends an HTTP request to the server, automatically selecting the appropriate protocol and transport.
    ///
    /// If the URL scheme is `"http"`, HTTP/1.1 will be used for the request.
    ///
    /// If the URL scheme is `"https"`, a secure TLS connection is established and ALPN is used to determine whether to use HTTP/2 or HTTP/1.1 for the request.
    ///
    /// Connecting (including the TLS handshake) is bounded by the connect timeout of the request, waiting for the response head by its read timeout.
    pub async fn send(&self, request: NetworkRequest) -> anyhow::Result<HttpResponse> {
        let uri = request.url.parse::<Uri>()?;
        let scheme = match uri.scheme_str() {
            Some(scheme) => scheme,
            None => return Err(anyhow::anyhow!("URL is missing a scheme.")),
        };

        match scheme {
            "http" => {
                if self.config.http_version == HttpClientVersion::Http2 {
                    return Err(anyhow::anyhow!("https scheme is required for HTTP/2"));
                }
                self.send_tcp(uri, request).await
            },
            "https" => self.send_tls(uri, request).await,
            _ => Err(anyhow::anyhow!("Unsupported scheme: {}", scheme)),
        }
    }

    async fn send_tcp(&self, uri: Uri, request: NetworkRequest) -> anyhow::Result<HttpResponse> {
        let host = match uri.host() {
            Some(host) => host,
            None => return Err(anyhow::anyhow!("Invalid URL.")),
        };
        let port = uri.port_u16().unwrap_or(80);

        let stream = timeout(request.connect_timeout, TcpStream::connect((host, port))).await??;
        let io = TokioIo::new(stream);

        let (mut sender, connection) = hyper::client::conn::http1::handshake(io).await?;

        tokio::spawn(async move {
            if let Err(err) = connection.await {
                tracing::debug!("connection closed with error: {:?}", err);
            }
        });

        let req = Self::build_request(&uri, Version::HTTP_11)?;
        let res = timeout(request.read_timeout, sender.send_request(req)).await??;
        Ok(HttpResponse::from(res))
    }

    async fn send_tls(&self, uri: Uri, request: NetworkRequest) -> anyhow::Result<HttpResponse> {
        let host = match uri.host() {
            Some(host) => host,
            None => return Err(anyhow::anyhow!("Invalid URL.")),
        };
        let port = uri.port_u16().unwrap_or(443);
        let domain = ServerName::try_from(host.to_string())?;

        let mut tls_config = self.config.tls_config.clone();
        tls_config.alpn_protocols = match self.config.http_version {
            HttpClientVersion::Auto => vec![b"h2".to_vec(), b"http/1.1".to_vec()],
            HttpClientVersion::Http1 => vec![b"http/1.1".to_vec()],
            HttpClientVersion::Http2 => vec![b"h2".to_vec()],
        };

        let tls_connector = TlsConnector::from(Arc::new(tls_config));
        let tls_stream = timeout(request.connect_timeout, async {
            let tcp_stream = TcpStream::connect((host, port)).await?;
            tls_connector.connect(domain, tcp_stream).await
        }).await??;

        let version = match self.config.http_version {
            HttpClientVersion::Auto => {
                let protocol = tls_stream.get_ref().1.alpn_protocol();
                match protocol {
                    Some(b"h2") => Version::HTTP_2,
                    _ => Version::HTTP_11,
                }
            },
            HttpClientVersion::Http1 => Version::HTTP_11,
            HttpClientVersion::Http2 => Version::HTTP_2,
        };

        let io = TokioIo::new(tls_stream);
        let req = Self::build_request(&uri, version)?;

        let res = match version {
            Version::HTTP_2 => {
                let (mut sender, connection) = hyper::client::conn::http2::Builder::new(TokioExecutor::new()).handshake(io).await?;

                tokio::spawn(async move {
                    if let Err(err) = connection.await {
                        tracing::debug!("connection closed with error: {:?}", err);
                    }
                });

                timeout(request.read_timeout, sender.send_request(req)).await??
            }
            _ => {
                let (mut sender, connection) = hyper::client::conn::http1::handshake(io).await?;

                tokio::spawn(async move {
                    if let Err(err) = connection.await {
                        tracing::debug!("connection closed with error: {:?}", err);
                    }
                });

                timeout(request.read_timeout, sender.send_request(req)).await??
            }
        };

        Ok(HttpResponse::from(res))
    }

    fn build_request(uri: &Uri, version: Version) -> anyhow::Result<Request<Full<Bytes>>> {
        let mut builder = Request::builder()
            .version(version)
            .method(Method::GET);

        builder = match version {
            Version::HTTP_2 => builder.uri(uri.clone()),
            _ => {
                let authority = match uri.authority() {
                    Some(authority) => authority,
                    None => return Err(anyhow::anyhow!("Invalid URL.")),
                };
                let path = uri.path_and_query().map(|path| path.as_str()).unwrap_or("/");

                builder
                    .uri(path)
                    .header(hyper::header::HOST, authority.as_str())
            }
        };

        Ok(builder.body(Full::new(Bytes::new()))?)
    }
}

impl Networking for HttpClient {
    fn connect_async(&self, request: NetworkRequest, completion: CompletionHandler) {
        let client = self.clone();
        let completion = Completion(Some(completion));
        self.runtime.spawn(async move {
            let response = match client.send(request).await {
                Ok(response) => Some(Box::new(response) as Box<dyn NetworkResponse>),
                Err(err) => {
                    tracing::debug!("request failed: {:?}", err);
                    None
                }
            };
            completion.complete(response);
        });
    }
}

/// Calls the completion handler exactly once, with `None` if the request task is dropped before it finishes.
struct Completion(Option<CompletionHandler>);

impl Completion {
    fn complete(mut self, response: Option<Box<dyn NetworkResponse>>) {
        if let Some(completion) = self.0.take() {
            completion(response);
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if let Some(completion) = self.0.take() {
            tracing::debug!("request dropped before completion, runtime is shutting down");
            completion(None);
        }
    }
}
