//! HTTP image downloads.
//!
//! Fetches result thumbnails and writes them to the output directory. One
//! attempt per image, no retries: a thumbnail is nice to have, and a failed
//! download must never cost us the textual record it belongs to.

use crate::pipeline::ImageFetcher;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// [`ImageFetcher`] backed by a shared `reqwest` client.
pub struct HttpImageFetcher {
    http: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    async fn fetch_and_save(&self, image_url: &str, destination: &str) -> Result<(), Box<dyn Error>> {
        let bytes = self
            .http
            .get(image_url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        fs::write(destination, &bytes).await?;
        Ok(())
    }
}

impl ImageFetcher for HttpImageFetcher {
    /// Download `image_url` to `destination`.
    ///
    /// Failures are logged and reported as `false`; nothing raises past this
    /// boundary.
    #[instrument(level = "info", skip(self))]
    async fn download_image(&self, image_url: &str, destination: &str) -> bool {
        match self.fetch_and_save(image_url, destination).await {
            Ok(()) => {
                info!(%destination, "Image downloaded successfully");
                true
            }
            Err(e) => {
                error!(%image_url, %destination, error = %e, "Failed to download or save image");
                false
            }
        }
    }
}
