//! Package descriptors and pure helpers for downloaded artifacts.

use std::path::PathBuf;

use serde::Serialize;

/// The two packages a bootstrap run installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageKind {
    /// Zip bundle of device root CA, certificate and keys.
    Credentials,
    /// Gzip-tar bundle with the Ranger installation tree.
    Ranger,
}

impl PackageKind {
    /// Human-readable name used in progress output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Credentials => "credentials package",
            Self::Ranger => "Ranger package",
        }
    }
}

/// A package that has been retrieved to local disk.
#[derive(Debug, Clone, Serialize)]
pub struct FetchedArtifact {
    pub kind: PackageKind,
    /// Redacted source locator.
    pub source: String,
    pub path: PathBuf,
    pub bytes: u64,
    /// Informational only; nothing is checked against it.
    pub sha256: Option<String>,
}

/// Strip the query string and fragment from a URL.
///
/// Package URLs are pre-signed, so the query carries credentials and must
/// never reach a terminal or log.
#[must_use]
pub fn redact_url(url: &str) -> String {
    match url.find(['?', '#']) {
        Some(idx) => format!("{}?<redacted>", &url[..idx]),
        None => url.to_string(),
    }
}

/// Lowercase hex encoding of a byte slice.
#[must_use]
pub fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(char::from(HEX[(b >> 4) as usize]));
        out.push(char::from(HEX[(b & 0xf) as usize]));
    }
    out
}
