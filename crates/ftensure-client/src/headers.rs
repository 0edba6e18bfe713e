//! Filetracker metadata headers
//!
//! The filetracker server describes a stored file entirely through response
//! headers. The digest header is not `X-`-prefixed for compatibility with
//! existing filetracker deployments.

use chrono::{DateTime, Utc};
use ftensure_core::ports::{RemoteFileInfo, UploadReceipt};
use reqwest::header::{HeaderMap, CONTENT_ENCODING, LAST_MODIFIED};
use tracing::warn;

/// Lowercase hex SHA-256 of the uncompressed file content
pub const SHA256_CHECKSUM: &str = "SHA256-Checksum";

/// Uncompressed size of the stored file in bytes
pub const LOGICAL_SIZE: &str = "Logical-Size";

/// Builds [`RemoteFileInfo`] from a `HEAD /files/...` response
///
/// The digest is passed through as sent; validation happens in the use case.
/// Optional headers that fail to parse are logged and dropped.
pub fn parse_file_info(headers: &HeaderMap) -> RemoteFileInfo {
    RemoteFileInfo {
        checksum: header_str(headers, SHA256_CHECKSUM).map(str::to_string),
        logical_size: header_str(headers, LOGICAL_SIZE).and_then(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| warn!(value, "Ignoring unparseable Logical-Size header"))
                .ok()
        }),
        last_modified: last_modified(headers),
        content_encoding: headers
            .get(CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    }
}

/// Builds [`UploadReceipt`] from a `PUT /files/...` response
pub fn parse_upload_receipt(headers: &HeaderMap) -> UploadReceipt {
    UploadReceipt {
        version: last_modified(headers),
    }
}

/// Parses an RFC 2822 timestamp as sent in `Last-Modified`
pub fn parse_last_modified(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

fn last_modified(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    let value = headers.get(LAST_MODIFIED)?.to_str().ok()?;
    let parsed = parse_last_modified(value);
    if parsed.is_none() {
        warn!(value, "Ignoring unparseable Last-Modified header");
    }
    parsed
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
