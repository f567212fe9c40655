//! Management certificate material

use crate::error::{Result, TransportError};
use std::fmt;
use std::path::Path;

/// PEM-encoded client certificate and private key.
///
/// The management API authenticates callers by the certificate presented
/// during the TLS handshake.
#[derive(Clone)]
pub struct ClientIdentity {
    cert_pem: Vec<u8>,
    key_pem: Vec<u8>,
}

impl ClientIdentity {
    /// Build an identity from in-memory PEM blocks.
    pub fn from_pem(cert_pem: impl Into<Vec<u8>>, key_pem: impl Into<Vec<u8>>) -> Self {
        Self {
            cert_pem: cert_pem.into(),
            key_pem: key_pem.into(),
        }
    }

    /// Read the certificate and key from PEM files.
    ///
    /// `cert_file` may already contain the key; pass the same path twice in
    /// that case.
    pub fn from_files(cert_file: impl AsRef<Path>, key_file: impl AsRef<Path>) -> Result<Self> {
        let cert_file = cert_file.as_ref();
        let key_file = key_file.as_ref();

        let cert_pem = std::fs::read(cert_file).map_err(|e| {
            TransportError::Identity(format!("cannot read {}: {}", cert_file.display(), e))
        })?;
        let key_pem = if key_file == cert_file {
            Vec::new()
        } else {
            std::fs::read(key_file).map_err(|e| {
                TransportError::Identity(format!("cannot read {}: {}", key_file.display(), e))
            })?
        };

        Ok(Self { cert_pem, key_pem })
    }

    /// Key followed by certificate chain, the layout reqwest expects.
    fn combined_pem(&self) -> Vec<u8> {
        let mut pem = Vec::with_capacity(self.key_pem.len() + self.cert_pem.len() + 1);
        pem.extend_from_slice(&self.key_pem);
        if !pem.is_empty() && !pem.ends_with(b"\n") {
            pem.push(b'\n');
        }
        pem.extend_from_slice(&self.cert_pem);
        pem
    }

    /// Convert into a reqwest TLS identity.
    pub(crate) fn to_reqwest(&self) -> Result<reqwest::Identity> {
        reqwest::Identity::from_pem(&self.combined_pem())
            .map_err(|e| TransportError::Identity(e.to_string()))
    }
}

impl fmt::Debug for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientIdentity")
            .field("cert_pem", &format_args!("{} bytes", self.cert_pem.len()))
            .field("key_pem", &"[redacted]")
            .finish()
    }
}
