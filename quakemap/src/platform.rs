//! Access to the network shared by the feed fetcher and the tile providers.

use std::sync::LazyLock;

use bytes::Bytes;

use crate::decoded_image::DecodedImage;
use crate::error::QuakeMapError;

#[cfg(not(target_arch = "wasm32"))]
const USER_AGENT: &str = concat!("quakemap/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper. Use [`instance`] to get the process-wide one.
#[derive(Debug, Clone)]
pub struct PlatformService {
    http_client: reqwest::Client,
}

static SERVICE: LazyLock<PlatformService> = LazyLock::new(PlatformService::new);

/// Returns the singleton instance of the platform service.
pub fn instance() -> &'static PlatformService {
    &SERVICE
}

impl PlatformService {
    fn new() -> Self {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.user_agent(USER_AGENT);

        let http_client = builder.build().unwrap_or_else(|err| {
            log::warn!("Failed to configure http client, using defaults: {err}");
            reqwest::Client::new()
        });

        Self { http_client }
    }

    /// Loads a byte array from the given url.
    pub async fn load_bytes_from_url(&self, url: &str) -> Result<Bytes, QuakeMapError> {
        let response = self.get(url).await?;
        Ok(response.bytes().await?)
    }

    /// Loads the body of the given url as text.
    pub async fn load_text_from_url(&self, url: &str) -> Result<String, QuakeMapError> {
        let response = self.get(url).await?;
        Ok(response.text().await?)
    }

    /// Decodes an image from raw bytes (PNG or JPEG).
    pub fn decode_image(&self, data: &[u8]) -> Result<DecodedImage, QuakeMapError> {
        DecodedImage::decode(data)
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, QuakeMapError> {
        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::info!("Failed to load {url}: {status}");
            return Err(QuakeMapError::Http(status.as_u16()));
        }

        Ok(response)
    }
}
