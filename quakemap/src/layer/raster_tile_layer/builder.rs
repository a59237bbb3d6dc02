use super::{RasterTileLayer, RasterTileProvider, RestTileProvider, UrlSource, UrlTemplate};
use crate::layer::attribution::Attribution;
use crate::messenger::Messenger;
use crate::tile_schema::{TileIndex, TileSchema};

/// Default highest zoom level of a tile service.
const DEFAULT_MAX_ZOOM: u32 = 18;

/// Constructor for a [`RasterTileLayer`].
///
/// ```
/// use quakemap::layer::raster_tile_layer::RasterTileLayerBuilder;
/// use quakemap::layer::Attribution;
///
/// let layer = RasterTileLayerBuilder::new_template("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png")
///     .with_attribution(Attribution::new("© OpenStreetMap contributors", None))
///     .build();
/// assert_eq!(layer.tile_schema().max_zoom(), 18);
/// ```
pub struct RasterTileLayerBuilder {
    provider: Box<dyn RasterTileProvider>,
    tile_schema: Option<TileSchema>,
    messenger: Option<Box<dyn Messenger>>,
    attribution: Option<Attribution>,
}

impl RasterTileLayerBuilder {
    /// Initializes a builder for a layer that requests tiles from the given url source.
    pub fn new_rest(tile_source: impl UrlSource<TileIndex> + 'static) -> Self {
        Self::new_with_provider(RestTileProvider::new(tile_source))
    }

    /// Initializes a builder for a layer that requests tiles from a Leaflet-style url template,
    /// e.g. `https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png`.
    pub fn new_template(template: &str) -> Self {
        let template = UrlTemplate::new(template);
        Self::new_rest(move |index: &TileIndex| template.url(index))
    }

    /// Initializes a builder for a layer with the given tile provider.
    pub fn new_with_provider(provider: impl RasterTileProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
            tile_schema: None,
            messenger: None,
            attribution: None,
        }
    }

    /// Sets the tile schema of the layer. Defaults to the web schema with zoom levels up to 18.
    pub fn with_tile_schema(mut self, tile_schema: TileSchema) -> Self {
        self.tile_schema = Some(tile_schema);
        self
    }

    /// Sets the messenger notified when a tile is loaded.
    pub fn with_messenger(mut self, messenger: impl Messenger + 'static) -> Self {
        self.messenger = Some(Box::new(messenger));
        self
    }

    /// Sets the attribution of the layer.
    pub fn with_attribution(mut self, attribution: Attribution) -> Self {
        self.attribution = Some(attribution);
        self
    }

    /// Consumes the builder and constructs the layer.
    pub fn build(self) -> RasterTileLayer {
        let Self {
            provider,
            tile_schema,
            messenger,
            attribution,
        } = self;

        let mut layer = RasterTileLayer::new_raw(
            provider,
            tile_schema.unwrap_or_else(|| TileSchema::web(DEFAULT_MAX_ZOOM)),
            messenger,
        );
        layer.attribution = attribution;
        layer
    }
}
