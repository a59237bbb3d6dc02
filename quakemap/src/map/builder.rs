use super::Map;
use crate::control::{ControlEntry, ControlPosition, LayerControl, LegendControl};
use crate::geo::LatLon;
use crate::layer::raster_tile_layer::RasterTileLayerBuilder;
use crate::layer::{Attribution, Layer, MarkerLayer};
use crate::{MapView, Messenger, TileSchema};

/// Initial center of the earthquake map.
pub const DEFAULT_CENTER: LatLon = LatLon::new(37.09, -95.71);
/// Initial zoom level of the earthquake map.
pub const DEFAULT_ZOOM: f64 = 5.0;

/// Url template of the street base map.
pub const STREET_MAP_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
/// Url template of the topographic base map.
pub const TOPOGRAPHIC_MAP_URL: &str = "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png";

/// Layer control name of the street base map.
pub const STREET_MAP_NAME: &str = "Street Map";
/// Layer control name of the topographic base map.
pub const TOPOGRAPHIC_MAP_NAME: &str = "Topographic Map";
/// Layer control name of the marker overlay.
pub const EARTHQUAKES_NAME: &str = "Earthquakes";

const STREET_MAP_ATTRIBUTION: &str = "© OpenStreetMap contributors";
const STREET_MAP_ATTRIBUTION_URL: &str = "https://www.openstreetmap.org/copyright";
const TOPOGRAPHIC_MAP_ATTRIBUTION: &str =
    "Map data: © OpenStreetMap contributors, SRTM | Map style: © OpenTopoMap (CC-BY-SA)";
const TOPOGRAPHIC_MAP_ATTRIBUTION_URL: &str = "https://opentopomap.org";
const TOPOGRAPHIC_MAX_ZOOM: u32 = 17;

/// Convenience type to initialize a [Map].
///
/// Layers added with [`MapBuilder::with_base_layer`] and [`MapBuilder::with_overlay`] get an
/// entry in the map's [`LayerControl`]. The first base layer is shown, the others start hidden.
///
/// ```
/// use quakemap::layer::MarkerLayer;
/// use quakemap::MapBuilder;
///
/// let map = MapBuilder::default()
///     .with_latlon(55.0, 37.0)
///     .with_zoom(12.0)
///     .with_overlay("Points", MarkerLayer::default())
///     .build();
///
/// assert_eq!(map.view().zoom(), 12.0);
/// assert_eq!(map.layer_control().unwrap().overlays()[0].name(), "Points");
/// ```
#[derive(Default)]
pub struct MapBuilder {
    position: Option<LatLon>,
    zoom: Option<f64>,
    layers: Vec<Box<dyn Layer>>,
    base_layers: Vec<ControlEntry>,
    overlays: Vec<ControlEntry>,
    control_collapsed: Option<bool>,
    legend: Option<ControlPosition>,
    messenger: Option<Box<dyn Messenger>>,
}

impl MapBuilder {
    /// Sets the center point of the map. Defaults to `[0, 0]`.
    pub fn with_position(mut self, position: LatLon) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the center point of the map to the given coordinates.
    pub fn with_latlon(self, lat: f64, lon: f64) -> Self {
        self.with_position(LatLon::new(lat, lon))
    }

    /// Sets the zoom level. Defaults to `0`.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    /// Adds a layer that is always shown and not listed in the layer control.
    pub fn with_layer(mut self, layer: impl Layer + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// Adds a base layer choice to the layer control.
    pub fn with_base_layer(mut self, name: &str, layer: impl Layer + 'static) -> Self {
        self.base_layers.push(ControlEntry::new(name, self.layers.len()));
        self.with_layer(layer)
    }

    /// Adds an overlay to the layer control. Overlays start visible.
    pub fn with_overlay(mut self, name: &str, layer: impl Layer + 'static) -> Self {
        self.overlays.push(ControlEntry::new(name, self.layers.len()));
        self.with_layer(layer)
    }

    /// Sets whether the layer control starts collapsed. Defaults to `true`.
    pub fn with_layer_control_collapsed(mut self, collapsed: bool) -> Self {
        self.control_collapsed = Some(collapsed);
        self
    }

    /// Adds the depth legend at the given corner.
    pub fn with_legend(mut self, position: ControlPosition) -> Self {
        self.legend = Some(position);
        self
    }

    /// Sets the messenger of the map.
    pub fn with_messenger(mut self, messenger: impl Messenger + 'static) -> Self {
        self.messenger = Some(Box::new(messenger));
        self
    }

    /// Consumes the builder and constructs the map.
    pub fn build(self) -> Map {
        let MapBuilder {
            position,
            zoom,
            layers,
            base_layers,
            overlays,
            control_collapsed,
            legend,
            messenger,
        } = self;

        let view = MapView::new(&position.unwrap_or_default(), zoom.unwrap_or(0.0));
        let mut map = Map::new(view, layers, messenger);

        if !base_layers.is_empty() || !overlays.is_empty() {
            let mut control = LayerControl::new(base_layers, overlays)
                .with_collapsed(control_collapsed.unwrap_or(true));
            control.select_base(0, map.layers_mut());
            map.set_layer_control(Some(control));
        }

        map.set_legend(legend.map(LegendControl::new));
        map
    }
}

/// Assembles the earthquake map: street and topographic base layers, the marker overlay, an
/// expanded layer control and the depth legend in the bottom right corner.
///
/// No tiles are requested until the map is [prepared](Map::load_layers) by a front-end.
pub fn compose_map(markers: MarkerLayer) -> Map {
    let street = RasterTileLayerBuilder::new_template(STREET_MAP_URL)
        .with_attribution(Attribution::new(
            STREET_MAP_ATTRIBUTION,
            Some(STREET_MAP_ATTRIBUTION_URL),
        ))
        .build();

    let topographic = RasterTileLayerBuilder::new_template(TOPOGRAPHIC_MAP_URL)
        .with_tile_schema(TileSchema::web(TOPOGRAPHIC_MAX_ZOOM))
        .with_attribution(Attribution::new(
            TOPOGRAPHIC_MAP_ATTRIBUTION,
            Some(TOPOGRAPHIC_MAP_ATTRIBUTION_URL),
        ))
        .build();

    log::debug!("Composing map with {} markers", markers.len());

    MapBuilder::default()
        .with_position(DEFAULT_CENTER)
        .with_zoom(DEFAULT_ZOOM)
        .with_base_layer(STREET_MAP_NAME, street)
        .with_base_layer(TOPOGRAPHIC_MAP_NAME, topographic)
        .with_overlay(EARTHQUAKES_NAME, markers)
        .with_layer_control_collapsed(false)
        .with_legend(ControlPosition::BottomRight)
        .build()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::layer::RasterTileLayer;

    #[test]
    fn constructs_map_with_default_parameters() {
        let map = MapBuilder::default().build();

        assert_abs_diff_eq!(map.view().center_latlon().lat(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(map.view().center_latlon().lon(), 0.0, epsilon = 1e-9);
        assert_eq!(map.view().zoom(), 0.0);
        assert!(map.layers().is_empty());
        assert!(map.layer_control().is_none());
        assert!(map.legend().is_none());
    }

    #[test]
    fn first_base_layer_is_shown() {
        let map = MapBuilder::default()
            .with_base_layer("A", MarkerLayer::default())
            .with_base_layer("B", MarkerLayer::default())
            .with_overlay("C", MarkerLayer::default())
            .build();

        let control = map.layer_control().unwrap();
        assert_eq!(control.active_base(), Some(0));
        assert!(control.is_collapsed());
        assert_eq!(control.overlays()[0].layer_index(), 2);
        assert!(map.layers().is_visible(0));
        assert!(!map.layers().is_visible(1));
        assert!(map.layers().is_visible(2));
    }

    #[test]
    fn earthquake_map_layout() {
        let map = compose_map(MarkerLayer::default());

        let center = map.view().center_latlon();
        assert_abs_diff_eq!(center.lat(), 37.09, epsilon = 1e-9);
        assert_abs_diff_eq!(center.lon(), -95.71, epsilon = 1e-9);
        assert_eq!(map.view().zoom(), 5.0);

        assert_eq!(map.layers().len(), 3);
        assert!(map.layers()[0].as_any().downcast_ref::<RasterTileLayer>().is_some());
        assert!(map.layers()[1].as_any().downcast_ref::<RasterTileLayer>().is_some());
        assert!(map.layers()[2].as_any().downcast_ref::<MarkerLayer>().is_some());

        let visible: Vec<_> = (0..3).map(|i| map.layers().is_visible(i)).collect();
        assert_eq!(visible, [true, false, true]);

        let control = map.layer_control().unwrap();
        let bases: Vec<_> = control.base_layers().iter().map(ControlEntry::name).collect();
        assert_eq!(bases, [STREET_MAP_NAME, TOPOGRAPHIC_MAP_NAME]);
        assert_eq!(control.overlays()[0].name(), EARTHQUAKES_NAME);
        assert!(!control.is_collapsed());

        let legend = map.legend().unwrap();
        assert_eq!(legend.position(), ControlPosition::BottomRight);
        assert_eq!(legend.entries().len(), 6);
    }

    #[test]
    fn base_layers_have_attributions() {
        let map = compose_map(MarkerLayer::default());

        let street = map.layers()[0].attribution().unwrap();
        assert_eq!(street.text(), "© OpenStreetMap contributors");
        assert_eq!(street.url(), Some("https://www.openstreetmap.org/copyright"));

        let topo = map.layers()[1].attribution().unwrap();
        assert!(topo.text().contains("OpenTopoMap (CC-BY-SA)"));
        assert!(map.layers()[2].attribution().is_none());
    }

    #[test]
    fn switching_base_layers() {
        let mut map = compose_map(MarkerLayer::default());

        assert!(map.select_base_layer(1));
        assert!(!map.layers().is_visible(0));
        assert!(map.layers().is_visible(1));
        assert_eq!(map.layer_control().unwrap().active_base(), Some(1));

        assert!(map.set_overlay_visible(0, false));
        assert!(!map.layers().is_visible(2));
        assert!(!map.select_base_layer(2));
    }
}
