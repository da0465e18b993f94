//! Constructors for every outbound message the method emits.
//!
//! Shapes follow the APT method interface, e.g.:
//!
//! ```text
//! 201 URI Done
//! URI: s3://bucket-name/apt/trusty/riemann-sumd_0.7.2-1_all.deb
//! Filename: /var/cache/apt/archives/partial/riemann-sumd_0.7.2-1_all.deb
//! Size: 9012
//! Last-Modified: Thu, 25 Oct 2018 20:17:39 GMT
//! MD5-Hash: 1964cb59e339e7a41cf64e9d40f219b1
//! MD5Sum-Hash: 1964cb59e339e7a41cf64e9d40f219b1
//! SHA1-Hash: 0d02ab49503be20d153cea63a472c43ebfad2efc
//! SHA256-Hash: 92a3f70eb1cf2c69880988a8e74dc6fea7e4f15ee261f74b9be55c866f69c64b
//! SHA512-Hash: ab3b1c94618cb58e2147db1c1d4bd3472f17fb11b1361e77216b461ab7d5f595…
//! ```

use apt_s3_protocol::{Field, Message, StatusCode, fields};
use chrono::{DateTime, Utc};

use crate::checksums::FileDigests;
use crate::error::MethodError;
use crate::location::ObjectLocation;

/// `Message` text of the not-found `URI Failure`, verbatim from S3.
pub const NOT_FOUND_TEXT: &str = "The specified key does not exist.";

/// `100 Capabilities` — announced once at startup, before any input is
/// read.
#[must_use]
pub fn capabilities() -> Message {
    Message::new(
        StatusCode::Capabilities,
        vec![
            Field::new(fields::SEND_CONFIG, fields::VALUE_TRUE),
            Field::new(fields::PIPELINE, fields::VALUE_TRUE),
            Field::new(fields::SINGLE_INSTANCE, fields::VALUE_YES),
        ],
    )
}

/// `101 Log` — free-form diagnostic line.
#[must_use]
pub fn general_log(text: &str) -> Message {
    Message::new(
        StatusCode::Log,
        vec![Field::new(fields::MESSAGE, text)],
    )
}

/// `102 Status` — connecting to the store.
#[must_use]
pub fn status_connecting(location: &ObjectLocation, endpoint_host: &str) -> Message {
    Message::new(
        StatusCode::Status,
        vec![
            Field::new(fields::URI, location.to_string()),
            Field::new(fields::MESSAGE, format!("Connecting to {endpoint_host}")),
        ],
    )
}

/// `200 URI Start` — the fetch is underway.
#[must_use]
pub fn uri_start(location: &ObjectLocation, size: i64, last_modified: DateTime<Utc>) -> Message {
    Message::new(
        StatusCode::UriStart,
        vec![
            Field::new(fields::URI, location.to_string()),
            Field::new(fields::SIZE, size.to_string()),
            last_modified_field(last_modified),
        ],
    )
}

/// `201 URI Done` — the fetch finished; carries integrity metadata.
///
/// The MD5 digest appears under both `MD5-Hash` and the legacy
/// `MD5Sum-Hash` name for older protocol consumers.
#[must_use]
pub fn uri_done(
    location: &ObjectLocation,
    filename: &str,
    size: u64,
    last_modified: DateTime<Utc>,
    digests: &FileDigests,
) -> Message {
    Message::new(
        StatusCode::UriDone,
        vec![
            Field::new(fields::URI, location.to_string()),
            Field::new(fields::FILENAME, filename),
            Field::new(fields::SIZE, size.to_string()),
            last_modified_field(last_modified),
            Field::new(fields::MD5_HASH, digests.md5.clone()),
            Field::new(fields::MD5SUM_HASH, digests.md5.clone()),
            Field::new(fields::SHA1_HASH, digests.sha1.clone()),
            Field::new(fields::SHA256_HASH, digests.sha256.clone()),
            Field::new(fields::SHA512_HASH, digests.sha512.clone()),
        ],
    )
}

/// `400 URI Failure` — the object does not exist; this request only.
#[must_use]
pub fn uri_failure_not_found(location: &ObjectLocation) -> Message {
    Message::new(
        StatusCode::UriFailure,
        vec![
            Field::new(fields::URI, location.to_string()),
            Field::new(fields::MESSAGE, NOT_FOUND_TEXT),
        ],
    )
}

/// `401 General Failure` — the method is giving up; emitted exactly once
/// before a non-zero exit. Newlines in the error text are collapsed to
/// spaces so the message stays one field line.
#[must_use]
pub fn general_failure(err: &MethodError) -> Message {
    let text = err.to_string().replace(['\n', '\r'], " ");
    Message::new(
        StatusCode::GeneralFailure,
        vec![Field::new(fields::MESSAGE, text)],
    )
}

/// RFC 1123 in GMT, the timestamp format the method interface mandates.
fn last_modified_field(t: DateTime<Utc>) -> Field {
    Field::new(
        fields::LAST_MODIFIED,
        t.format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
    )
}
