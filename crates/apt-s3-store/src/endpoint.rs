//! Region-to-endpoint defaulting.

/// The region assumed when APT sends no `Acquire::s3::region` override.
pub const DEFAULT_REGION: &str = "us-east-1";

/// The default S3 endpoint URL for a region.
///
/// `us-east-1` keeps the legacy global hostname; China partition regions
/// use the `.com.cn` suffix; everything else follows the regional
/// `s3.<region>.amazonaws.com` scheme.
#[must_use]
pub fn default_endpoint_for(region: &str) -> String {
    if region == DEFAULT_REGION {
        "https://s3.amazonaws.com".to_owned()
    } else if region.starts_with("cn-") {
        format!("https://s3.{region}.amazonaws.com.cn")
    } else {
        format!("https://s3.{region}.amazonaws.com")
    }
}
