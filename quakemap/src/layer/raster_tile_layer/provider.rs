use maybe_sync::{MaybeSend, MaybeSync};

use crate::decoded_image::DecodedImage;
use crate::error::QuakeMapError;
use crate::tile_schema::TileIndex;

/// Function that gives the url to load the data for the given key.
pub trait UrlSource<Key: ?Sized>: (Fn(&Key) -> String) + MaybeSend + MaybeSync {}
impl<Key: ?Sized, T: Fn(&Key) -> String> UrlSource<Key> for T where T: MaybeSend + MaybeSync {}

/// Leaflet-style tile url template.
///
/// `{z}`, `{x}` and `{y}` are replaced with the tile index, `{s}` with one of the subdomains.
/// The subdomain is chosen from the tile position, so a tile is always requested from the same
/// host.
///
/// ```
/// use quakemap::layer::raster_tile_layer::UrlTemplate;
/// use quakemap::tile_schema::TileIndex;
///
/// let template = UrlTemplate::new("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png");
/// assert_eq!(
///     template.url(&TileIndex::new(3, 5, 4)),
///     "https://c.tile.openstreetmap.org/4/3/5.png"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    template: String,
    subdomains: Vec<char>,
}

impl UrlTemplate {
    /// Subdomains used when none are given.
    pub const DEFAULT_SUBDOMAINS: &'static str = "abc";

    /// Creates a template with the default `a`, `b`, `c` subdomains.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            subdomains: Self::DEFAULT_SUBDOMAINS.chars().collect(),
        }
    }

    /// Replaces the subdomains, one character each.
    pub fn with_subdomains(mut self, subdomains: &str) -> Self {
        self.subdomains = subdomains.chars().collect();
        self
    }

    /// Template string.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Url of the given tile.
    pub fn url(&self, index: &TileIndex) -> String {
        let subdomain = if self.subdomains.is_empty() {
            String::new()
        } else {
            let position = (index.x as i64 + index.y as i64).unsigned_abs() as usize;
            self.subdomains[position % self.subdomains.len()].to_string()
        };

        self.template
            .replace("{s}", &subdomain)
            .replace("{z}", &index.z.to_string())
            .replace("{x}", &index.x.to_string())
            .replace("{y}", &index.y.to_string())
    }
}

/// Provider of tiles for a [`RasterTileLayer`](super::RasterTileLayer).
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait RasterTileProvider: MaybeSend + MaybeSync {
    /// Loads the tile with the given index.
    async fn load(&self, index: TileIndex) -> Result<DecodedImage, QuakeMapError>;
}

/// Raster tile provider that loads tiles one by one with REST HTTP GET requests.
pub struct RestTileProvider {
    url_source: Box<dyn UrlSource<TileIndex>>,
}

impl RestTileProvider {
    /// Creates a new instance of the provider.
    pub fn new(url_source: impl UrlSource<TileIndex> + 'static) -> Self {
        Self {
            url_source: Box::new(url_source),
        }
    }

    /// Url the tile is requested from.
    pub fn url(&self, index: &TileIndex) -> String {
        (self.url_source)(index)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl RasterTileProvider for RestTileProvider {
    async fn load(&self, index: TileIndex) -> Result<DecodedImage, QuakeMapError> {
        let url = self.url(&index);

        log::trace!("Loading tile {url}");
        let platform = crate::platform::instance();
        let bytes = platform.load_bytes_from_url(&url).await?;
        platform.decode_image(&bytes)
    }
}
