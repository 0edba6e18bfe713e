//! Filetracker HTTP client
//!
//! Provides a thin typed client over the filetracker REST surface. Every
//! call returns a classified [`StoreError`] instead of a raw transport error,
//! so callers can tell an unreachable service from a service that answered
//! badly.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ftensure_client::client::FiletrackerClient;
//! use ftensure_core::domain::{RemoteEndpoint, RemotePath};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let endpoint = RemoteEndpoint::new("http://127.0.0.1:9999")?;
//! let client = FiletrackerClient::new(endpoint);
//! client.get_version().await?;
//! let info = client.head_file(&RemotePath::new("/a.bin".to_string())?).await?;
//! println!("{info:?}");
//! # Ok(())
//! # }
//! ```

use std::error::Error as StdError;
use std::io::ErrorKind;

use ftensure_core::{
    domain::{RemoteEndpoint, RemotePath, StoreError},
    ports::{LocalContent, RemoteFileInfo, UploadReceipt},
};
use reqwest::{
    header::{CONTENT_LENGTH, CONTENT_TYPE},
    Body, Client, Response, StatusCode,
};
use serde::Deserialize;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};
use url::Url;

use crate::headers::{parse_file_info, parse_upload_receipt};

/// Path of the liveness endpoint below the service root
const VERSION_PATH: &str = "version";

/// Path prefix of the file namespace below the service root
const FILES_PATH: &str = "files";

/// Response body of `GET /version`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VersionInfo {
    /// Protocol versions the server speaks
    #[serde(default)]
    pub protocol_versions: Vec<u32>,
}

/// HTTP client for one filetracker service
///
/// No per-call timeout is configured; liveness is established by the
/// probe before any file operation runs.
#[derive(Debug, Clone)]
pub struct FiletrackerClient {
    /// The underlying HTTP client
    client: Client,
    /// Service root all URLs are built from
    endpoint: RemoteEndpoint,
}

impl FiletrackerClient {
    /// Creates a new client for the given service root
    pub fn new(endpoint: RemoteEndpoint) -> Self {
        Self::with_http_client(Client::new(), endpoint)
    }

    /// Creates a client around a preconfigured `reqwest::Client`
    ///
    /// # Arguments
    /// * `client` - HTTP client (proxy, TLS or timeout settings)
    /// * `endpoint` - Service root
    pub fn with_http_client(client: Client, endpoint: RemoteEndpoint) -> Self {
        Self { client, endpoint }
    }

    /// Returns the service root
    pub fn endpoint(&self) -> &RemoteEndpoint {
        &self.endpoint
    }

    /// URL of the liveness endpoint
    pub fn version_url(&self) -> Url {
        self.endpoint.join([VERSION_PATH])
    }

    /// URL of a file in the remote namespace
    pub fn file_url(&self, path: &RemotePath) -> Url {
        self.endpoint.join(std::iter::once(FILES_PATH).chain(path.segments()))
    }

    /// Queries `GET /version`
    ///
    /// Any success status counts as alive. An unparseable body is logged
    /// and reported as an empty version list.
    pub async fn get_version(&self) -> Result<VersionInfo, StoreError> {
        let url = self.version_url();
        debug!(%url, "Probing file store");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify("GET", &url, e))?;
        let response = check_status("GET", &url, response)?;

        match response.json::<VersionInfo>().await {
            Ok(info) => {
                debug!(versions = ?info.protocol_versions, "File store is alive");
                Ok(info)
            }
            Err(e) => {
                warn!(
                    %url,
                    error = %format!("{:#}", anyhow::Error::new(e)),
                    "Unexpected /version body"
                );
                Ok(VersionInfo::default())
            }
        }
    }

    /// Queries `HEAD /files/{path}`
    ///
    /// # Returns
    /// `Ok(None)` when the server answers 404, the parsed metadata headers
    /// on any success status
    pub async fn head_file(
        &self,
        path: &RemotePath,
    ) -> Result<Option<RemoteFileInfo>, StoreError> {
        let url = self.file_url(path);
        debug!(%url, "Querying remote file");

        let response = self
            .client
            .head(url.clone())
            .send()
            .await
            .map_err(|e| classify("HEAD", &url, e))?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(%url, "Remote file does not exist");
            return Ok(None);
        }

        let response = check_status("HEAD", &url, response)?;
        Ok(Some(parse_file_info(response.headers())))
    }

    /// Uploads a file with `PUT /files/{path}`
    ///
    /// The content is streamed as the raw request body with an explicit
    /// `Content-Length`; the reader is dropped once the request completes.
    pub async fn put_file(
        &self,
        path: &RemotePath,
        content: LocalContent,
    ) -> Result<UploadReceipt, StoreError> {
        let url = self.file_url(path);
        let len = content.len();
        debug!(%url, bytes = len, "Uploading file");

        let body = Body::wrap_stream(ReaderStream::new(content.into_reader()));
        let response = self
            .client
            .put(url.clone())
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(CONTENT_LENGTH, len)
            .body(body)
            .send()
            .await
            .map_err(|e| classify("PUT", &url, e))?;

        let response = check_status("PUT", &url, response)?;
        let receipt = parse_upload_receipt(response.headers());
        debug!(%url, version = ?receipt.version, "Upload accepted");
        Ok(receipt)
    }
}

/// Maps a `reqwest` failure to a [`StoreError`]
///
/// Failures before any response arrived are [`StoreError::Unreachable`]:
/// connection establishment (refused, DNS, connect timeout) and a peer that
/// accepted the connection but closed or reset it without answering.
/// Everything else is [`StoreError::Transport`].
pub fn classify(operation: &'static str, url: &Url, err: reqwest::Error) -> StoreError {
    let unreachable = err.is_connect()
        || (err.is_timeout() && !err.is_body())
        || (err.is_request() && connection_dropped(&err));
    let message = format!("{:#}", anyhow::Error::new(err));
    if unreachable {
        StoreError::Unreachable {
            operation,
            url: url.to_string(),
            message,
        }
    } else {
        StoreError::Transport {
            operation,
            url: url.to_string(),
            message,
        }
    }
}

/// True when the peer closed or reset the connection before a response
fn connection_dropped(err: &reqwest::Error) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        if cause
            .downcast_ref::<hyper::Error>()
            .is_some_and(hyper::Error::is_incomplete_message)
        {
            return true;
        }
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            if matches!(
                io.kind(),
                ErrorKind::ConnectionReset
                    | ErrorKind::ConnectionAborted
                    | ErrorKind::BrokenPipe
                    | ErrorKind::UnexpectedEof
            ) {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

fn check_status(
    operation: &'static str,
    url: &Url,
    response: Response,
) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    warn!(%url, status = status.as_u16(), "{operation} rejected by file store");
    Err(StoreError::Status {
        operation,
        url: url.to_string(),
        status: status.as_u16(),
    })
}
