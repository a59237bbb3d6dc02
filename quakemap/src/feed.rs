//! Reading the USGS earthquake feed.

use geojson::{FeatureCollection, GeoJson, Value};

use crate::error::QuakeMapError;

/// The earthquake feed: every event of the past month.
pub const FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_month.geojson";

/// One earthquake record from the feed.
///
/// Only the fields the map uses are read. Properties the feed omits or sets to `null` are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeFeature {
    /// Human readable location, e.g. `10km NE of Testville`.
    pub place: Option<String>,
    /// Time of the event, milliseconds since the Unix epoch.
    pub time: Option<i64>,
    /// Magnitude.
    pub magnitude: Option<f64>,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Depth in kilometers (third coordinate).
    pub depth: Option<f64>,
}

impl EarthquakeFeature {
    /// Reads the used fields of a GeoJSON feature. Returns `None` if the feature has no point
    /// geometry with at least longitude and latitude.
    pub fn from_geojson(feature: &geojson::Feature) -> Option<Self> {
        let geometry = feature.geometry.as_ref()?;
        let Value::Point(coordinates) = &geometry.value else {
            return None;
        };

        let (&longitude, &latitude) = (coordinates.first()?, coordinates.get(1)?);

        Some(Self {
            place: feature
                .property("place")
                .and_then(|v| v.as_str())
                .map(str::to_owned),
            time: feature.property("time").and_then(|v| {
                // Fractional milliseconds are truncated toward zero.
                v.as_i64()
                    .or_else(|| v.as_f64().filter(|t| t.is_finite()).map(|t| t.trunc() as i64))
            }),
            magnitude: feature.property("mag").and_then(|v| v.as_f64()),
            longitude,
            latitude,
            depth: coordinates.get(2).copied(),
        })
    }
}

/// Parses the feed document, keeping the order of the features.
///
/// Features that cannot be placed on the map are skipped with a warning.
pub fn parse_feed(text: &str) -> Result<Vec<EarthquakeFeature>, QuakeMapError> {
    let geojson: GeoJson = text.parse()?;
    let collection = FeatureCollection::try_from(geojson)?;

    let mut features = Vec::with_capacity(collection.features.len());
    for (index, feature) in collection.features.iter().enumerate() {
        match EarthquakeFeature::from_geojson(feature) {
            Some(earthquake) => features.push(earthquake),
            None => log::warn!("Skipping feed feature #{index}: no point geometry"),
        }
    }

    Ok(features)
}

/// Reads the feed with a single GET request.
///
/// There is no timeout, retry or caching: every call goes to the network.
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    url: String,
}

impl Default for FeedFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedFetcher {
    /// Creates a fetcher for [`FEED_URL`].
    pub fn new() -> Self {
        Self {
            url: FEED_URL.to_owned(),
        }
    }

    /// Creates a fetcher reading a feed document from another location, e.g. a local test server.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Url the fetcher reads.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Downloads and parses the feed.
    pub async fn fetch(&self) -> Result<Vec<EarthquakeFeature>, QuakeMapError> {
        log::info!("Loading earthquake feed from {}", self.url);
        let text = crate::platform::instance()
            .load_text_from_url(&self.url)
            .await?;

        let features = parse_feed(&text)?;
        log::info!("Loaded {} earthquakes", features.len());

        Ok(features)
    }
}
