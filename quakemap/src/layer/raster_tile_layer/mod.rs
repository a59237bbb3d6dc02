//! Raster tile layer and its providers

use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use quick_cache::sync::Cache;

use super::Layer;
use crate::decoded_image::DecodedImage;
use crate::geo::{Point2, Rect};
use crate::layer::attribution::Attribution;
use crate::messenger::Messenger;
use crate::render::Canvas;
use crate::tile_schema::{TileIndex, TileSchema, WrappingTileIndex};
use crate::view::MapView;

mod provider;
pub use provider::{RasterTileProvider, RestTileProvider, UrlSource, UrlTemplate};

mod builder;
pub use builder::RasterTileLayerBuilder;

/// Number of tiles a layer keeps in memory.
const TILE_CACHE_CAPACITY: usize = 5000;

static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(0);

/// Raster tile layers load prerendered tile sets using [tile provider](RasterTileProvider) and
/// render them to the map.
///
/// Tiles are requested when the layer is [prepared](Layer::prepare) for a view and drawn once they
/// arrive. A tile that failed to load is not requested again.
pub struct RasterTileLayer {
    id: u64,
    tile_provider: Arc<dyn RasterTileProvider>,
    tile_schema: TileSchema,
    tiles: Arc<Cache<TileIndex, Arc<TileState>>>,
    messenger: Option<Arc<dyn Messenger>>,
    attribution: Option<Attribution>,
}

impl std::fmt::Debug for RasterTileLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterTileLayer")
            .field("id", &self.id)
            .field("tile_schema", &self.tile_schema)
            .field("attribution", &self.attribution)
            .finish()
    }
}

enum TileState {
    Loading,
    Loaded(DecodedImage),
    Error,
}

impl RasterTileLayer {
    fn new_raw(
        tile_provider: Box<dyn RasterTileProvider>,
        tile_schema: TileSchema,
        messenger: Option<Box<dyn Messenger>>,
    ) -> Self {
        Self {
            id: NEXT_LAYER_ID.fetch_add(1, Ordering::Relaxed),
            tile_provider: tile_provider.into(),
            tile_schema,
            tiles: Arc::new(Cache::new(TILE_CACHE_CAPACITY)),
            messenger: messenger.map(|m| m.into()),
            attribution: None,
        }
    }

    /// Returns tile schema of the layer.
    pub fn tile_schema(&self) -> &TileSchema {
        &self.tile_schema
    }

    /// Preload tiles for the given `view`.
    pub async fn load_tiles(&self, view: &MapView) {
        if let Some(iter) = self.tile_schema.iter_tiles(view) {
            for tile in iter {
                Self::load_tile(
                    tile.index,
                    self.tile_provider.clone(),
                    &self.tiles,
                    self.messenger.clone(),
                )
                .await;
            }
        }
    }

    async fn load_tile(
        index: TileIndex,
        tile_provider: Arc<dyn RasterTileProvider>,
        tiles: &Cache<TileIndex, Arc<TileState>>,
        messenger: Option<Arc<dyn Messenger>>,
    ) {
        match tiles.get_value_or_guard_async(&index).await {
            Ok(_) => {}
            Err(guard) => {
                let _ = guard.insert(Arc::new(TileState::Loading));

                match tile_provider.load(index).await {
                    Ok(decoded_image) => {
                        tiles.insert(index, Arc::new(TileState::Loaded(decoded_image)));

                        if let Some(messenger) = messenger {
                            messenger.request_redraw();
                        }
                    }
                    Err(err) => {
                        log::debug!("Failed to load tile {index:?}: {err}");
                        tiles.insert(index, Arc::new(TileState::Error))
                    }
                }
            }
        }
    }

    fn image_key(&self, index: &TileIndex) -> String {
        format!("tile/{}/{}/{}/{}", self.id, index.z, index.x, index.y)
    }

    fn screen_bounds(&self, view: &MapView, tile: &WrappingTileIndex) -> Rect {
        let bbox = self.tile_schema.tile_bbox(tile);
        let top_left = view.map_to_screen(&Point2::new(bbox.x_min, bbox.y_max));
        let bottom_right = view.map_to_screen(&Point2::new(bbox.x_max, bbox.y_min));

        Rect::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y)
    }
}

impl Layer for RasterTileLayer {
    fn render(&self, view: &MapView, canvas: &mut dyn Canvas) {
        let Some(iter) = self.tile_schema.iter_tiles(view) else {
            return;
        };

        for tile in iter {
            let Some(state) = self.tiles.get(&tile.index) else {
                continue;
            };

            if let TileState::Loaded(image) = state.as_ref() {
                canvas.draw_image(
                    &self.image_key(&tile.index),
                    image,
                    self.screen_bounds(view, &tile),
                );
            }
        }
    }

    fn prepare(&self, view: &MapView) {
        if let Some(iter) = self.tile_schema.iter_tiles(view) {
            for tile in iter {
                if self.tiles.get(&tile.index).is_some() {
                    continue;
                }

                let tile_provider = self.tile_provider.clone();
                let tiles = self.tiles.clone();
                let messenger = self.messenger.clone();
                crate::async_runtime::spawn(async move {
                    Self::load_tile(tile.index, tile_provider, &tiles, messenger).await;
                });
            }
        }
    }

    fn set_messenger(&mut self, messenger: Box<dyn Messenger>) {
        self.messenger = Some(Arc::from(messenger));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn attribution(&self) -> Option<Attribution> {
        self.attribution.clone()
    }
}
