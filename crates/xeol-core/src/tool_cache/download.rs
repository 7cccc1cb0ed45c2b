//! Installer download over HTTP

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

use super::Downloader;
use crate::error::{XeolError, XeolResult};

/// Downloads files into the runner temp directory under fresh UUID names
pub struct HttpDownloader {
    client: reqwest::Client,
    temp_dir: PathBuf,
}

impl HttpDownloader {
    pub fn new(temp_dir: impl Into<PathBuf>) -> XeolResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("xeol-action/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| XeolError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            temp_dir: temp_dir.into(),
        })
    }

    async fn write_body(response: reqwest::Response, dest: &Path) -> XeolResult<()> {
        let mut file = fs::File::create(dest)
            .await
            .map_err(|e| XeolError::io(dest, e))?;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk)
                .await
                .map_err(|e| XeolError::io(dest, e))?;
        }
        file.flush().await.map_err(|e| XeolError::io(dest, e))
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    #[instrument(skip(self))]
    async fn download(&self, url: &str) -> XeolResult<PathBuf> {
        fs::create_dir_all(&self.temp_dir)
            .await
            .map_err(|e| XeolError::io(&self.temp_dir, e))?;
        let dest = self.temp_dir.join(uuid::Uuid::new_v4().to_string());

        debug!(dest = %dest.display(), "downloading");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(XeolError::download_status(url, status.as_u16()));
        }

        if let Err(e) = Self::write_body(response, &dest).await {
            let _ = fs::remove_file(&dest).await;
            return Err(e);
        }

        debug!(dest = %dest.display(), "download complete");
        Ok(dest)
    }
}
