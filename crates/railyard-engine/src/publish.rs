//! Remote artifact repository client.

use std::path::Path;
use std::time::Duration;

use railyard_util::hash::sha256_bytes;

use crate::descriptor::BuildDescriptor;
use crate::error::EngineError;

/// HTTP client for a Maven-layout remote repository.
#[derive(Debug)]
pub struct RemoteRepository {
    url: String,
    agent: ureq::Agent,
}

impl RemoteRepository {
    /// Create a client for the repository at `url`.
    pub fn new(url: &str) -> Self {
        let agent = ureq::Agent::new_with_config(
            ureq::config::Config::builder()
                .timeout_connect(Some(Duration::from_secs(30)))
                .timeout_global(Some(Duration::from_secs(600)))
                .build(),
        );
        Self {
            url: url.to_owned(),
            agent,
        }
    }

    /// The repository base URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Upload a library's descriptor and artifact.
    ///
    /// With `sign`, a detached `.sha256` checksum file is uploaded next to
    /// each deployed file.
    ///
    /// # Errors
    /// Returns `EngineError::Deploy` on any failed upload, and I/O errors
    /// if a local file cannot be read.
    pub fn deploy(&self, descriptor: &BuildDescriptor, sign: bool) -> Result<(), EngineError> {
        self.put_file(
            &descriptor.artifact_path,
            &descriptor.artifact.filename(),
            descriptor,
            sign,
        )?;
        self.put_file(
            &descriptor.descriptor_path,
            &descriptor.artifact.descriptor_filename(),
            descriptor,
            sign,
        )?;
        Ok(())
    }

    fn put_file(
        &self,
        local: &Path,
        remote_name: &str,
        descriptor: &BuildDescriptor,
        sign: bool,
    ) -> Result<(), EngineError> {
        let data = std::fs::read(local).map_err(|source| EngineError::Io {
            path: local.display().to_string(),
            source,
        })?;

        let url = descriptor.artifact.deploy_url(&self.url, remote_name);
        self.put_bytes(&url, &data)?;

        if sign {
            let digest = sha256_bytes(&data);
            self.put_bytes(&format!("{url}.sha256"), digest.as_bytes())?;
        }
        Ok(())
    }

    fn put_bytes(&self, url: &str, data: &[u8]) -> Result<(), EngineError> {
        self.agent
            .put(url)
            .send(data)
            .map_err(|e| EngineError::Deploy {
                url: url.to_owned(),
                message: e.to_string(),
            })?;
        Ok(())
    }
}
