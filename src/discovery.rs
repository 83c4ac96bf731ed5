//! Service discovery.
//!
//! A session finds the begin-transaction URI in two hops:
//!
//! ```text
//! GET <service root>   -> {"data": "<graph uri>", ...}
//! GET <graph uri>      -> {"transaction": "<begin uri>", "neo4j_version": ...}
//! ```
//!
//! Servers that predate transactional Cypher omit `transaction`.

use crate::error::{Error, Result};
use crate::transport::Transport;
use graphtx_wire::decode_service_document;
use tracing::debug;
use url::Url;

/// Service root used when no connection URI is given.
pub const DEFAULT_URI: &str = "http://localhost:7474/";

/// What discovery learned about a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceMetadata {
    /// Service root that was queried
    pub service_root: String,
    /// Graph metadata document URI
    pub graph_uri: String,
    /// Begin-transaction URI, when supported
    pub transaction_uri: Option<String>,
    /// Server version string, when advertised
    pub neo4j_version: Option<String>,
}

impl ServiceMetadata {
    /// Whether the server accepts transactional Cypher.
    pub fn supports_transactions(&self) -> bool {
        self.transaction_uri.is_some()
    }
}

/// Reduce a connection URI to its service root, `scheme://[userinfo@]host:port/`.
///
/// The port is made explicit and any path, query or fragment is dropped.
/// Embedded credentials are preserved.
pub fn service_root_uri(connection_uri: &str) -> Result<String> {
    let url = Url::parse(connection_uri)?;
    let host = url
        .host_str()
        .ok_or_else(|| Error::InvalidUri(format!("{}: missing host", connection_uri)))?;
    let port = url
        .port_or_known_default()
        .ok_or_else(|| Error::InvalidUri(format!("{}: missing port", connection_uri)))?;

    let root = if url.username().is_empty() {
        format!("{}://{}:{}/", url.scheme(), host, port)
    } else {
        let user_info = match url.password() {
            Some(password) => format!("{}:{}", url.username(), password),
            None => url.username().to_string(),
        };
        format!("{}://{}@{}:{}/", url.scheme(), user_info, host, port)
    };
    Ok(root)
}

/// Probe a service root for transactional support.
///
/// A root document without a `data` link is read as the graph document
/// itself.
pub fn discover(transport: &dyn Transport, service_root: &str) -> Result<ServiceMetadata> {
    debug!(uri = %redact(service_root), "discovering service root");
    let root = decode_service_document(&transport.get(service_root)?.body)?;

    let (graph_uri, graph) = match root.data {
        Some(ref data) if root.transaction.is_none() => {
            let graph = decode_service_document(&transport.get(data)?.body)?;
            (data.clone(), graph)
        }
        _ => (service_root.to_string(), root.clone()),
    };

    let metadata = ServiceMetadata {
        service_root: service_root.to_string(),
        graph_uri,
        transaction_uri: graph.transaction,
        neo4j_version: graph.neo4j_version.or(root.neo4j_version),
    };
    debug!(
        transactions = metadata.supports_transactions(),
        version = metadata.neo4j_version.as_deref().unwrap_or("unknown"),
        "discovered service"
    );
    Ok(metadata)
}

/// Mask the password of a URI for logs and debug output.
///
/// Strings that do not parse as URIs are returned unchanged.
pub fn redact(uri: &str) -> String {
    match Url::parse(uri) {
        Ok(mut url) if url.password().is_some() => {
            let _ = url.set_password(Some("***"));
            url.to_string()
        }
        _ => uri.to_string(),
    }
}
