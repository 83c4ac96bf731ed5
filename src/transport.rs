//! HTTP transport.
//!
//! Sessions and transactions talk to the server only through the
//! [`Transport`] trait. [`HttpTransport`] is the production implementation,
//! a blocking `reqwest` client; tests substitute a recording fake.
//!
//! Every call reads the response body to completion and drops the
//! underlying response before returning, on success and error paths alike,
//! so no connection outlives the call.

use crate::config::ClientConfig;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, CONTENT_TYPE, LOCATION};
use reqwest::{redirect, Method};
use thiserror::Error;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};
use url::Url;

/// A fully consumed HTTP response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// `Location` header, if present
    pub location: Option<String>,
    /// Response body text
    pub body: String,
}

impl Response {
    /// A 200 response with the given body and no location.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            location: None,
            body: body.into(),
        }
    }

    /// Attach a `Location` header.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Transport-level failures.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or the body could not be read
    #[error("{method} {uri} failed: {source}")]
    Request {
        /// HTTP method
        method: &'static str,
        /// Target URI (credentials removed)
        uri: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("{method} {uri} returned HTTP {status}")]
    Status {
        /// HTTP method
        method: &'static str,
        /// Target URI (credentials removed)
        uri: String,
        /// Status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// The target URI is not a valid absolute URI
    #[error("invalid request URI {uri}: {reason}")]
    InvalidUri {
        /// The offending URI
        uri: String,
        /// Parse failure
        reason: String,
    },

    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection-level failure reported by a non-HTTP transport
    #[error("connection failed: {0}")]
    Connection(String),
}

/// Blocking request/response exchange with the server.
///
/// Implementations must be safe to share between threads; a session hands
/// the same transport to every transaction it creates.
pub trait Transport: Send + Sync {
    /// `GET uri`
    fn get(&self, uri: &str) -> Result<Response, TransportError>;

    /// `POST uri` with a JSON body
    fn post(&self, uri: &str, body: String) -> Result<Response, TransportError>;

    /// `DELETE uri`
    fn delete(&self, uri: &str) -> Result<(), TransportError>;
}

/// Basic-auth user and optional password.
type Credentials = (String, Option<String>);

/// [`Transport`] over `reqwest`'s blocking client.
///
/// Credentials embedded in a request URI are stripped from the URI, sent as
/// HTTP basic auth, and remembered for the URI's host and port. Later
/// requests to that host and port without credentials of their own reuse
/// them, so server-issued links stay authenticated.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    credentials: Arc<RwLock<HashMap<(String, u16), Credentials>>>,
}

impl HttpTransport {
    /// Build a transport from client configuration.
    ///
    /// Credentials in the configured URI are registered up front.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let redirects = match config.max_redirects {
            0 => redirect::Policy::none(),
            n => redirect::Policy::limited(n),
        };
        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(redirects);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(TransportError::Client)?;
        let transport = Self {
            client,
            credentials: Arc::new(RwLock::new(HashMap::new())),
        };
        if let Ok(url) = Url::parse(&config.uri) {
            let _ = transport.credentials_for(&url);
        }
        Ok(transport)
    }

    /// Credentials to send to `url`, registering any it carries.
    fn credentials_for(&self, url: &Url) -> Option<Credentials> {
        let authority = url
            .host_str()
            .zip(url.port_or_known_default())
            .map(|(host, port)| (host.to_ascii_lowercase(), port));
        if url.username().is_empty() {
            let authority = authority?;
            return self.credentials.read().get(&authority).cloned();
        }

        let credentials = (
            url.username().to_string(),
            url.password().map(str::to_string),
        );
        if let Some(authority) = authority {
            let previous = self
                .credentials
                .write()
                .insert(authority.clone(), credentials.clone());
            if previous.is_none() {
                debug!(host = %authority.0, port = authority.1, "registered credentials");
            }
        }
        Some(credentials)
    }

    fn request(&self, method: Method, uri: &str) -> Result<RequestBuilder, TransportError> {
        let mut url = Url::parse(uri).map_err(|e| TransportError::InvalidUri {
            uri: uri.to_string(),
            reason: e.to_string(),
        })?;
        let credentials = self.credentials_for(&url);
        // Only fails for cannot-be-a-base URIs, which carry no credentials
        let _ = url.set_username("");
        let _ = url.set_password(None);

        let mut builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        if let Some((user, password)) = credentials {
            builder = builder.basic_auth(user, password);
        }
        Ok(builder)
    }

    fn send(
        method: &'static str,
        uri: &str,
        builder: RequestBuilder,
    ) -> Result<Response, TransportError> {
        let request_error = |source| TransportError::Request {
            method,
            uri: crate::discovery::redact(uri),
            source,
        };
        let response = builder.send().map_err(request_error)?;
        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        // Consumes the response and releases the connection
        let body = response.text().map_err(request_error)?;
        trace!(method, uri = %crate::discovery::redact(uri), status = status.as_u16(), "http exchange");

        if !status.is_success() {
            return Err(TransportError::Status {
                method,
                uri: crate::discovery::redact(uri),
                status: status.as_u16(),
                body,
            });
        }
        Ok(Response {
            status: status.as_u16(),
            location,
            body,
        })
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("client", &self.client)
            .field("authenticated_hosts", &self.credentials.read().len())
            .finish()
    }
}

impl Transport for HttpTransport {
    fn get(&self, uri: &str) -> Result<Response, TransportError> {
        let builder = self.request(Method::GET, uri)?;
        Self::send("GET", uri, builder)
    }

    fn post(&self, uri: &str, body: String) -> Result<Response, TransportError> {
        let builder = self
            .request(Method::POST, uri)?
            .header(CONTENT_TYPE, "application/json; charset=UTF-8")
            .body(body);
        Self::send("POST", uri, builder)
    }

    fn delete(&self, uri: &str) -> Result<(), TransportError> {
        let builder = self.request(Method::DELETE, uri)?;
        Self::send("DELETE", uri, builder).map(|_| ())
    }
}
