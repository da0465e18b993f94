//! Field names and well-known values used by the APT method interface.

/// `Capabilities` field name.
pub const CAPABILITIES: &str = "Capabilities";
/// `Config-Item` field name, one per configuration entry.
pub const CONFIG_ITEM: &str = "Config-Item";
/// `Send-Config` capability flag.
pub const SEND_CONFIG: &str = "Send-Config";
/// `Pipeline` capability flag.
pub const PIPELINE: &str = "Pipeline";
/// `Single-Instance` capability flag.
pub const SINGLE_INSTANCE: &str = "Single-Instance";
/// `URI` field name.
pub const URI: &str = "URI";
/// `Filename` field name, the local destination path.
pub const FILENAME: &str = "Filename";
/// `Size` field name, in bytes.
pub const SIZE: &str = "Size";
/// `Last-Modified` field name, RFC 1123 in GMT.
pub const LAST_MODIFIED: &str = "Last-Modified";
/// `Message` field name, free-form text.
pub const MESSAGE: &str = "Message";
/// `MD5-Hash` field name.
pub const MD5_HASH: &str = "MD5-Hash";
/// `MD5Sum-Hash` field name, the legacy spelling kept for older consumers.
pub const MD5SUM_HASH: &str = "MD5Sum-Hash";
/// `SHA1-Hash` field name.
pub const SHA1_HASH: &str = "SHA1-Hash";
/// `SHA256-Hash` field name.
pub const SHA256_HASH: &str = "SHA256-Hash";
/// `SHA512-Hash` field name.
pub const SHA512_HASH: &str = "SHA512-Hash";

/// Boolean `true` as the protocol spells it.
pub const VALUE_TRUE: &str = "true";
/// Boolean `yes` as the protocol spells it.
pub const VALUE_YES: &str = "yes";
