//! # Channel construction
//!
//! Turns [`ClientOptions`] into a lazily connecting tonic [`Channel`]. The
//! address may be a bare `host:port`, an `http://` or `https://` URL, or a
//! `dns:` target as accepted by other gRPC implementations. Bare addresses
//! connect over TLS unless [`ClientOptions::with_plaintext`] is set.
//!
//! Channels are lazy: construction validates the options but the connection
//! is only established by the first call.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use hyper_util::rt::TokioIo;
use rustls::pki_types::ServerName;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tonic::metadata::errors::InvalidMetadataValue;
use tonic::service::Interceptor;
use tonic::service::interceptor::InterceptedService;
use tonic::transport::{Channel, Endpoint, Uri};
use tracing::debug;

use crate::BoxError;
use crate::retry::CallObserver;

mod interceptor;
mod tls;

pub use interceptor::ChannelInterceptor;

/// Default connection establishment timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default number of attempts per call, including the first one.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default timeout per attempt.
pub const DEFAULT_RETRY_TIMEOUT: Duration = Duration::from_secs(2);

const DEFAULT_USER_AGENT: &str = concat!("verdict-client-rust/", env!("CARGO_PKG_VERSION"));

/// A caller-supplied interceptor run on every request.
pub type BoxInterceptor = Box<dyn Interceptor + Send + Sync + 'static>;

/// The service type produced by [`build_channel`] plus the client metadata
/// layer. This is the default transport of
/// [`Client`](crate::client::Client).
pub type Transport = InterceptedService<Channel, ChannelInterceptor>;

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("Invalid address '{0}': {1}")]
    InvalidAddress(String, #[source] tonic::transport::Error),
    #[error("Invalid user agent '{0}': {1}")]
    InvalidUserAgent(String, #[source] tonic::transport::Error),
    #[error("Failed to load CA certificate from {path}: {source}")]
    CaCertificateRead {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Invalid CA certificate in {path}: {reason}")]
    CaCertificateInvalid { path: String, reason: String },
    #[error("Failed to load client certificate and key: {path}: {source}")]
    ClientIdentityRead {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Invalid client certificate and key [{cert}, {key}]: {reason}")]
    ClientIdentityInvalid {
        cert: String,
        key: String,
        reason: String,
    },
    #[error("Invalid metadata value for '{key}': {source}")]
    InvalidMetadata {
        key: &'static str,
        #[source]
        source: InvalidMetadataValue,
    },
    #[error("Failed to create TLS config: {reason}")]
    TlsConfig { reason: String },
    #[error("Failed to configure TLS transport: {0}")]
    Tls(#[source] tonic::transport::Error),
}

/// Connection-level configuration, consumed by
/// [`Client::new`](crate::client::Client::new).
///
/// ```no_run
/// use std::time::Duration;
/// use verdict_client::ClientOptions;
///
/// let options = ClientOptions::default()
///     .with_tls_ca_cert("/var/verdict/ca.pem")
///     .with_connect_timeout(Duration::from_secs(5))
///     .with_max_retries(5);
/// ```
pub struct ClientOptions {
    pub(crate) plaintext: bool,
    pub(crate) tls_authority: Option<String>,
    pub(crate) tls_insecure: bool,
    pub(crate) tls_ca_cert: Option<PathBuf>,
    pub(crate) tls_client_identity: Option<(PathBuf, PathBuf)>,
    pub(crate) connect_timeout: Duration,
    pub(crate) max_retries: u32,
    pub(crate) retry_timeout: Duration,
    pub(crate) user_agent: String,
    pub(crate) playground_instance: Option<String>,
    pub(crate) interceptors: Vec<BoxInterceptor>,
    pub(crate) call_observer: Option<Arc<dyn CallObserver>>,
    pub(crate) max_recv_msg_size: Option<usize>,
    pub(crate) max_send_msg_size: Option<usize>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            plaintext: false,
            tls_authority: None,
            tls_insecure: false,
            tls_ca_cert: None,
            tls_client_identity: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_timeout: DEFAULT_RETRY_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            playground_instance: None,
            interceptors: Vec::new(),
            call_observer: None,
            max_recv_msg_size: None,
            max_send_msg_size: None,
        }
    }
}

impl ClientOptions {
    /// Connects over h2c without TLS.
    pub fn with_plaintext(mut self) -> Self {
        self.plaintext = true;
        self
    }

    /// Overrides the authority used for TLS verification when it differs
    /// from the address.
    pub fn with_tls_authority(mut self, authority: impl Into<String>) -> Self {
        self.tls_authority = Some(authority.into());
        self
    }

    /// Skips TLS certificate verification.
    pub fn with_tls_insecure(mut self) -> Self {
        self.tls_insecure = true;
        self
    }

    /// Verifies the server against the CA certificate chain at `path`
    /// instead of the native roots.
    pub fn with_tls_ca_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.tls_ca_cert = Some(path.into());
        self
    }

    /// Authenticates to the server with the given client certificate and
    /// key.
    pub fn with_tls_client_cert(
        mut self,
        cert: impl Into<PathBuf>,
        key: impl Into<PathBuf>,
    ) -> Self {
        self.tls_client_identity = Some((cert.into(), key.into()));
        self
    }

    /// Sets the connection establishment timeout. Zero disables it.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the number of attempts per call, including the first one. Zero
    /// disables retries.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets the timeout per attempt. Zero disables retries.
    pub fn with_retry_timeout(mut self, timeout: Duration) -> Self {
        self.retry_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Uses a playground instance as the policy source. Playground
    /// instances are for demonstration purposes only.
    pub fn with_playground_instance(mut self, instance: impl Into<String>) -> Self {
        self.playground_instance = Some(instance.into());
        self
    }

    /// Adds an interceptor run on every request, after the metadata set by
    /// the client itself. Repeated calls add interceptors in order.
    pub fn with_interceptor(
        mut self,
        interceptor: impl Interceptor + Send + Sync + 'static,
    ) -> Self {
        self.interceptors.push(Box::new(interceptor));
        self
    }

    /// Registers an observer notified with the outcome of every call.
    pub fn with_call_observer(mut self, observer: impl CallObserver + 'static) -> Self {
        self.call_observer = Some(Arc::new(observer));
        self
    }

    /// Caps the size of a single response message, in bytes.
    pub fn with_max_recv_msg_size(mut self, bytes: usize) -> Self {
        self.max_recv_msg_size = Some(bytes);
        self
    }

    /// Caps the size of a single request message, in bytes.
    pub fn with_max_send_msg_size(mut self, bytes: usize) -> Self {
        self.max_send_msg_size = Some(bytes);
        self
    }
}

/// Builds a lazy channel to `address` according to the options.
pub fn build_channel(address: &str, options: &ClientOptions) -> Result<Channel, ConnectError> {
    let address = channel_address(address, options.plaintext);
    debug!(address = %address, plaintext = options.plaintext, "building channel");

    let mut endpoint = Endpoint::from_shared(address.clone())
        .map_err(|source| ConnectError::InvalidAddress(address.clone(), source))?
        .user_agent(options.user_agent.as_str())
        .map_err(|source| ConnectError::InvalidUserAgent(options.user_agent.clone(), source))?;

    if !options.connect_timeout.is_zero() {
        endpoint = endpoint.connect_timeout(options.connect_timeout);
    }

    if options.plaintext {
        return Ok(endpoint.connect_lazy());
    }

    if options.tls_insecure {
        // Dials the TCP connection and drives the rustls handshake by hand;
        // tonic's own TLS path cannot be told to skip verification.
        let config = tls::insecure_rustls_config(options)?;
        let authority = options.tls_authority.clone();
        let connector = tower::service_fn(move |uri: Uri| {
            let config = config.clone();
            let authority = authority.clone();
            async move {
                let host = uri
                    .host()
                    .ok_or_else(|| BoxError::from(format!("no host in address '{uri}'")))?
                    .to_string();
                let port = uri.port_u16().unwrap_or(443);

                let stream = TcpStream::connect((host.as_str(), port))
                    .await
                    .map_err(BoxError::from)?;

                let server_name =
                    ServerName::try_from(authority.unwrap_or(host)).map_err(BoxError::from)?;
                let tls = TlsConnector::from(config)
                    .connect(server_name, stream)
                    .await
                    .map_err(BoxError::from)?;

                Ok::<_, BoxError>(TokioIo::new(tls))
            }
        });
        return Ok(endpoint.connect_with_connector_lazy(connector));
    }

    let endpoint = endpoint
        .tls_config(tls::client_tls_config(options)?)
        .map_err(ConnectError::Tls)?;
    Ok(endpoint.connect_lazy())
}

// Strips gRPC target prefixes and fills in the scheme tonic expects.
fn channel_address(address: &str, plaintext: bool) -> String {
    let address = endpoint_address(address);

    if address.contains("://") {
        return address.to_string();
    }

    if plaintext {
        format!("http://{address}")
    } else {
        format!("https://{address}")
    }
}

fn endpoint_address(address: &str) -> &str {
    let Some(rest) = address.strip_prefix("dns:") else {
        return address;
    };

    match rest.strip_prefix("//") {
        // dns://resolver/endpoint: custom resolvers are not supported, only
        // the endpoint is kept.
        Some(with_resolver) => match with_resolver.split_once('/') {
            Some((_, endpoint)) => endpoint,
            None => with_resolver,
        },
        None => rest,
    }
}
