//! Domain newtypes with validation
//!
//! This module provides strongly-typed wrappers for the values a run is
//! built from. Each newtype ensures data validity at construction time, so
//! the use cases never see a malformed path, endpoint or digest.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use super::errors::DomainError;

// ============================================================================
// RemoteEndpoint
// ============================================================================

/// Base address of the remote file storage service
///
/// Format: absolute `http` or `https` URL with a host, optionally with a
/// path prefix, e.g. `http://127.0.0.1:9999` or `https://ft.example.com/api/`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteEndpoint(Url);

impl RemoteEndpoint {
    /// Create a new RemoteEndpoint
    ///
    /// # Errors
    /// Returns error if the address does not parse or is not a plain
    /// http(s) base URL
    pub fn new(address: &str) -> Result<Self, DomainError> {
        let url = Url::parse(address)
            .map_err(|e| DomainError::InvalidEndpoint(format!("{address}: {e}")))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(DomainError::InvalidEndpoint(format!(
                "Endpoint scheme must be http or https: {address}"
            )));
        }

        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(DomainError::InvalidEndpoint(format!(
                "Endpoint must have a host: {address}"
            )));
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(DomainError::InvalidEndpoint(format!(
                "Endpoint must not carry a query or fragment: {address}"
            )));
        }

        Ok(Self(url))
    }

    /// Get the parsed base URL
    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Build a URL below this endpoint from path segments
    ///
    /// Segments are percent-encoded; a trailing `/` on the base is ignored.
    #[must_use]
    pub fn join<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.0.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl Display for RemoteEndpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RemoteEndpoint {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ============================================================================
// RemotePath
// ============================================================================

/// Slash-rooted file path within the storage service's namespace
///
/// Format: `/segment/segment/...` naming a file, e.g. `/sandboxes/base.tar.gz`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RemotePath(String);

impl RemotePath {
    /// Create a new RemotePath
    ///
    /// # Errors
    /// Returns error if path doesn't start with / or doesn't name a file
    pub fn new(path: String) -> Result<Self, DomainError> {
        if !path.starts_with('/') {
            return Err(DomainError::InvalidRemotePath(format!(
                "Remote path must start with '/': {path}"
            )));
        }

        if path == "/" {
            return Err(DomainError::InvalidRemotePath(
                "Remote path must name a file, not the root".to_string(),
            ));
        }

        for segment in path[1..].split('/') {
            if segment.is_empty() {
                return Err(DomainError::InvalidRemotePath(format!(
                    "Remote path contains an empty segment: {path}"
                )));
            }

            if segment == "." || segment == ".." {
                return Err(DomainError::InvalidRemotePath(format!(
                    "Remote path contains invalid traversal: {path}"
                )));
            }
        }

        Ok(Self(path))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the path segments (without the leading slash)
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0[1..].split('/')
    }
}

impl Display for RemotePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RemotePath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for RemotePath {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RemotePath> for String {
    fn from(path: RemotePath) -> Self {
        path.0
    }
}

// ============================================================================
// ContentDigest
// ============================================================================

/// SHA-256 content digest in lowercase hex
///
/// This is the digest the storage service reports in its `SHA256-Checksum`
/// header. Format: exactly 64 characters from `[0-9a-z]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Length of a hex-encoded 256-bit digest
    pub const HEX_LEN: usize = 64;

    /// Create a new ContentDigest
    ///
    /// # Errors
    /// Returns error if the digest has the wrong length or characters
    /// outside `[0-9a-z]`
    pub fn new(digest: String) -> Result<Self, DomainError> {
        if digest.len() != Self::HEX_LEN {
            return Err(DomainError::InvalidDigest(format!(
                "Digest has wrong length: expected {} chars, got {}",
                Self::HEX_LEN,
                digest.len()
            )));
        }

        if !digest
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        {
            return Err(DomainError::InvalidDigest(format!(
                "Digest contains characters outside [0-9a-z]: {digest}"
            )));
        }

        Ok(Self(digest))
    }

    /// Create a digest from raw SHA-256 output
    #[must_use]
    pub fn from_sha256(bytes: [u8; 32]) -> Self {
        Self(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ContentDigest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContentDigest {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for ContentDigest {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ContentDigest> for String {
    fn from(digest: ContentDigest) -> Self {
        digest.0
    }
}
