//! [`TileSchema`] is used by tile layers to calculate [tile indices](TileIndex) needed for a given
//! [`MapView`].

use crate::geo::{Rect, MERCATOR_HALF_EXTENT};
use crate::view::{MapView, TILE_SIZE};

/// Upper limit of tiles requested for one view, guards against degenerate screen sizes.
const MAX_TILES_PER_VIEW: i64 = 1024;

/// Tile index in the XYZ scheme: `y == 0` is the northmost row.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct TileIndex {
    /// X index.
    pub x: i32,
    /// Y index.
    pub y: i32,
    /// Z index.
    pub z: u32,
}

impl TileIndex {
    /// Create a new index instance.
    pub fn new(x: i32, y: i32, z: u32) -> Self {
        Self { x, y, z }
    }
}

/// Tile index with additional virtual `display_x` index that is used to wrap tiles over the 180
/// longitude line. `x` is always inside the tile grid, `display_x` is where the tile is drawn.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct WrappingTileIndex {
    /// Index of the tile to load.
    pub index: TileIndex,
    /// Virtual X index of the place where the tile is drawn.
    pub display_x: i32,
}

/// Square Web Mercator tile grid with 256 pixel tiles, as served by OSM-like tile services.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSchema {
    min_zoom: u32,
    max_zoom: u32,
}

impl TileSchema {
    /// Standard web schema with zoom levels `0..=max_zoom`.
    pub fn web(max_zoom: u32) -> Self {
        Self {
            min_zoom: 0,
            max_zoom,
        }
    }

    /// Highest zoom level with tiles.
    pub fn max_zoom(&self) -> u32 {
        self.max_zoom
    }

    /// Tile zoom level used to display the view: the view zoom rounded to the closest level the
    /// schema has.
    pub fn select_zoom(&self, view: &MapView) -> Option<u32> {
        let zoom = view.zoom().round();
        if !zoom.is_finite() {
            return None;
        }

        Some((zoom.max(0.0) as u32).clamp(self.min_zoom, self.max_zoom))
    }

    /// Iterate over tile indices that should be displayed for the given map view, row by row
    /// from the top.
    pub fn iter_tiles(&self, view: &MapView) -> Option<impl Iterator<Item = WrappingTileIndex>> {
        let z = self.select_zoom(view)?;
        let bbox = view.get_bbox()?;

        let tiles_across = 1i64 << z;
        let tile_width = Self::tile_width(z);

        let x_min = ((bbox.x_min + MERCATOR_HALF_EXTENT) / tile_width).floor() as i64;
        let x_max = ((bbox.x_max + MERCATOR_HALF_EXTENT) / tile_width).ceil() as i64 - 1;
        let y_min = (((MERCATOR_HALF_EXTENT - bbox.y_max) / tile_width).floor() as i64).max(0);
        let y_max = ((((MERCATOR_HALF_EXTENT - bbox.y_min) / tile_width).ceil() as i64) - 1)
            .min(tiles_across - 1);

        let count = (x_max - x_min + 1).max(0) * (y_max - y_min + 1).max(0);
        if count > MAX_TILES_PER_VIEW {
            log::warn!("View requires {count} tiles, skipping tile loading");
            return None;
        }

        let (x_min, x_max) = (x_min as i32, x_max as i32);
        let tiles_across = tiles_across as i32;
        Some((y_min as i32..=y_max as i32).flat_map(move |y| {
            (x_min..=x_max).map(move |display_x| WrappingTileIndex {
                index: TileIndex::new(display_x.rem_euclid(tiles_across), y, z),
                display_x,
            })
        }))
    }

    /// Area of the map covered by the tile, in projected meters, at its display position.
    pub fn tile_bbox(&self, tile: &WrappingTileIndex) -> Rect {
        let tile_width = Self::tile_width(tile.index.z);
        let x_min = tile.display_x as f64 * tile_width - MERCATOR_HALF_EXTENT;
        let y_max = MERCATOR_HALF_EXTENT - tile.index.y as f64 * tile_width;

        Rect::new(x_min, y_max - tile_width, x_min + tile_width, y_max)
    }

    fn tile_width(z: u32) -> f64 {
        2.0 * MERCATOR_HALF_EXTENT / (1u64 << z) as f64
    }

    /// Tile size in pixels.
    pub fn tile_size(&self) -> f64 {
        TILE_SIZE
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::geo::Size;
    use crate::latlon;

    #[test]
    fn whole_world_at_zoom_zero() {
        let view = MapView::new(&latlon!(0.0, 0.0), 0.0).with_size(Size::new(256.0, 256.0));
        let tiles: Vec<_> = TileSchema::web(18).iter_tiles(&view).unwrap().collect();
        assert_eq!(
            tiles,
            [WrappingTileIndex {
                index: TileIndex::new(0, 0, 0),
                display_x: 0
            }]
        );
    }

    #[test]
    fn tiles_cover_the_view() {
        let schema = TileSchema::web(18);
        let view = MapView::new(&latlon!(37.09, -95.71), 5.0).with_size(Size::new(800.0, 600.0));
        let bbox = view.get_bbox().unwrap();

        let tiles: Vec<_> = schema.iter_tiles(&view).unwrap().collect();
        assert!(!tiles.is_empty());
        assert!(tiles.iter().all(|t| t.index.z == 5));
        assert!(tiles.iter().all(|t| schema.tile_bbox(t).intersects(&bbox)));

        // 800x600 pixels need 4 or 5 columns and 3 or 4 rows of 256 pixel tiles.
        assert!((12..=20).contains(&tiles.len()), "{}", tiles.len());
    }

    #[test]
    fn wraps_over_antimeridian() {
        let view = MapView::new(&latlon!(0.0, 180.0), 2.0).with_size(Size::new(512.0, 256.0));
        let tiles: Vec<_> = TileSchema::web(18).iter_tiles(&view).unwrap().collect();

        let wrapped = tiles.iter().find(|t| t.display_x == 4).unwrap();
        assert_eq!(wrapped.index.x, 0);
        assert!(tiles.iter().all(|t| (0..4).contains(&t.index.x)));
    }

    #[test]
    fn zoom_is_rounded_and_clamped() {
        let schema = TileSchema::web(10);
        let view = MapView::new(&latlon!(0.0, 0.0), 4.4);
        assert_eq!(schema.select_zoom(&view), Some(4));
        assert_eq!(schema.select_zoom(&view.with_zoom(4.6)), Some(5));
        assert_eq!(schema.select_zoom(&view.with_zoom(14.0)), Some(10));
    }

    #[test]
    fn tile_bbox() {
        let schema = TileSchema::web(18);
        let bbox = schema.tile_bbox(&WrappingTileIndex {
            index: TileIndex::new(1, 0, 1),
            display_x: 1,
        });

        assert_abs_diff_eq!(bbox.x_min, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(bbox.y_min, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(bbox.x_max, MERCATOR_HALF_EXTENT, epsilon = 1e-6);
        assert_abs_diff_eq!(bbox.y_max, MERCATOR_HALF_EXTENT, epsilon = 1e-6);
    }
}
