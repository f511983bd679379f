//! URI normalization for metadata and asset references.

use regex::Regex;
use std::sync::OnceLock;

/// Matches bare IPFS CIDs (v0 and v1) and other self-describing content ids
fn cid_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            "^(Qm[1-9A-HJ-NP-Za-km-z]{44}|b[A-Za-z2-7]{58}|B[A-Z2-7]{58}|z[1-9A-HJ-NP-Za-km-z]{48}|F[0-9A-F]{50})$",
        )
        .expect("static CID pattern")
    })
}

/// Normalize a URL, CID or URI into something fetchable.
///
/// Bare CIDs and `ipfs://` URIs resolve through the public IPFS gateway,
/// `ar://` through the Arweave gateway, `data:` URIs pass through, and
/// anything without a protocol is assumed to be HTTPS.
pub fn parse_uri(uri: &str) -> String {
    if cid_pattern().is_match(uri) {
        return format!("https://ipfs.io/ipfs/{}", uri);
    }
    if let Some(cid) = uri.strip_prefix("ipfs://") {
        return format!("https://ipfs.io/ipfs/{}", cid);
    }
    if let Some(id) = uri.strip_prefix("ar://") {
        return format!("https://arweave.net/{}", id);
    }
    if uri.starts_with("data:") {
        return uri.to_string();
    }
    if !uri.starts_with("http://") && !uri.starts_with("https://") {
        return format!("https://{}", uri);
    }
    uri.to_string()
}
