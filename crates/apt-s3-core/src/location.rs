//! Resource locator resolution.
//!
//! An `s3://` locator names an object in one of three shapes, told apart
//! purely by comparing the authority host against the resolved endpoint
//! host:
//!
//! ```text
//! s3://s3.amazonaws.com/bucket/path/to/object     path-style
//! s3://bucket.s3.amazonaws.com/path/to/object     virtual-hosted
//! s3://bucket/path/to/object                      opaque (custom endpoint)
//! ```
//!
//! Locators may embed static credentials as `accessKey:secret@`. A secret
//! access key may contain `/`, which would corrupt path segmentation if
//! parsed raw, so the credential portion is percent-escaped before URI
//! parsing and decoded again on extraction.

use std::fmt;

use percent_encoding::percent_decode_str;
use url::Url;

/// Minimum `/`-delimited path tokens for a path-style locator: the leading
/// empty token, the bucket, and at least one key segment.
const MIN_PATH_TOKENS: usize = 3;

/// Errors from locator resolution.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    /// The locator is not a parseable URI.
    #[error("parsing resource locator: {0}")]
    Parse(#[from] url::ParseError),

    /// The locator has no authority host.
    #[error("resource locator has no host")]
    MissingHost,

    /// Path-style locator without both a bucket and a key.
    #[error("location missing required number of tokens")]
    MissingTokens,

    /// A credential section was present but not `user`, `user:password`,
    /// or decodable UTF-8.
    #[error("malformed credential section in resource locator")]
    MalformedCredentials,
}

/// A resolved object location: normalized URI, store coordinates, and any
/// embedded credentials.
#[derive(Debug, Clone)]
pub struct ObjectLocation {
    uri: Url,
    bucket: String,
    key: String,
    username: Option<String>,
    password: Option<String>,
}

impl ObjectLocation {
    /// Resolve a raw locator string against the endpoint host.
    ///
    /// Classification is mutually exclusive and purely string-based:
    /// authority equals the endpoint host → path-style; authority ends in
    /// `.<endpoint-host>` → virtual-hosted; anything else → the whole
    /// authority is the bucket.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError`] for unparseable locators, a missing host,
    /// a malformed credential section, or a path-style locator with too
    /// few path tokens.
    pub fn resolve(raw: &str, endpoint_host: &str) -> Result<Self, LocationError> {
        let escaped = escape_credentials(raw)?;
        let uri = Url::parse(&escaped)?;

        let host = uri
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or(LocationError::MissingHost)?
            .to_owned();
        let path = uri.path();

        let (bucket, key) = if host == endpoint_host {
            // Splitting "/bucket/this/is/a/path" on "/" produces
            // ["", "bucket", "this", "is", "a", "path"].
            let tokens: Vec<&str> = path.split('/').collect();
            if tokens.len() < MIN_PATH_TOKENS {
                return Err(LocationError::MissingTokens);
            }
            (tokens[1].to_owned(), tokens[2..].join("/"))
        } else if let Some(bucket) = host.strip_suffix(&format!(".{endpoint_host}")) {
            (bucket.to_owned(), strip_leading_slash(path))
        } else {
            (host.clone(), strip_leading_slash(path))
        };

        let username = match uri.username() {
            "" => None,
            user => Some(decode_credential(user)?),
        };
        let password = uri.password().map(decode_credential).transpose()?;

        Ok(Self {
            uri,
            bucket,
            key,
            username,
            password,
        })
    }

    /// The normalized URI, credentials still percent-escaped.
    #[must_use]
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// The bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The object key within the bucket.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Embedded access key ID, decoded to its raw form.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Embedded secret access key, decoded to its raw form.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri.as_str())
    }
}

/// Percent-escape `/` inside the credential portion, before structural
/// parsing.
///
/// A secret access key may contain `/`, which makes the authority
/// impossible to delimit *before* escaping — so everything between the
/// scheme and the first `@` is taken as the candidate credential section.
/// A candidate of `user:password` is escaped and rebuilt; a lone token is
/// left alone (a username has nothing to hide from the URI parser, and a
/// token containing `/` is really a host-plus-path with an `@` further
/// along). A candidate with extra colons and no `/` can only be a botched
/// credential section and is rejected rather than silently parsed into
/// empty credentials.
fn escape_credentials(raw: &str) -> Result<String, LocationError> {
    let Some((scheme, rest)) = raw.split_once("://") else {
        return Ok(raw.to_owned());
    };
    let Some((userinfo, tail)) = rest.split_once('@') else {
        return Ok(raw.to_owned());
    };

    let tokens: Vec<&str> = userinfo.split(':').collect();
    match tokens.as_slice() {
        // An access key ID cannot contain '/': a first token that does is
        // host-plus-path, not a credential section.
        [user, password] if !user.contains('/') => Ok(format!(
            "{scheme}://{}:{}@{tail}",
            escape_slashes(user),
            escape_slashes(password)
        )),
        [_] => Ok(raw.to_owned()),
        _ if userinfo.contains('/') => Ok(raw.to_owned()),
        _ => Err(LocationError::MalformedCredentials),
    }
}

fn escape_slashes(component: &str) -> String {
    component.replace('/', "%2F")
}

fn decode_credential(encoded: &str) -> Result<String, LocationError> {
    percent_decode_str(encoded)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| LocationError::MalformedCredentials)
}

fn strip_leading_slash(path: &str) -> String {
    path.strip_prefix('/').unwrap_or(path).to_owned()
}
