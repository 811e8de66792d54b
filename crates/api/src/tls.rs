//! TLS certificate discovery.
//!
//! HTTPS is enabled when one of the configured directories holds both a
//! `cert.pem` and a `key.pem`. The first such directory wins.

use std::path::{Path, PathBuf};

pub const CERT_FILE: &str = "cert.pem";
pub const KEY_FILE: &str = "key.pem";

/// Certificate and key found in a single directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificatePaths {
    pub dir: PathBuf,
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Return the first directory in `dirs` holding both PEM files.
pub fn discover_certificates<P: AsRef<Path>>(dirs: &[P]) -> Option<CertificatePaths> {
    dirs.iter().find_map(|dir| {
        let dir = dir.as_ref();
        let cert = dir.join(CERT_FILE);
        let key = dir.join(KEY_FILE);
        (cert.is_file() && key.is_file()).then(|| CertificatePaths {
            dir: dir.to_path_buf(),
            cert,
            key,
        })
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
