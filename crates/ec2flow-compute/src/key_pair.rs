//! Key pair wrapper

use crate::error::{ComputeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// SSH key pair registered with the compute API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    pub name: String,
    pub fingerprint: Option<String>,
    pub key_pair_id: Option<String>,
    pub key_type: Option<String>,
    /// Private key material, only returned by CreateKeyPair
    #[serde(skip)]
    pub material: Option<String>,
}

impl KeyPair {
    pub fn has_material(&self) -> bool {
        self.material.is_some()
    }

    /// Write the private key to `path`, readable by the owner only
    pub fn save_material(&self, path: impl AsRef<Path>) -> Result<()> {
        let material = self.material.as_deref().ok_or_else(|| {
            ComputeError::InvalidRequest(format!(
                "key pair '{}' carries no private key material",
                self.name
            ))
        })?;
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        write_private(path, material)?;

        tracing::info!("Saved private key for '{}' to {}", self.name, path.display());
        Ok(())
    }
}

#[cfg(unix)]
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies to newly created files
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(contents.as_bytes())
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    std::fs::write(path, contents)
}
