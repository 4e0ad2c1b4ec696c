use std::{fs, path::Path};

use anyhow::{Context, Result, anyhow, ensure};
use geo::{BoundingRect, Coord, LineString, MultiPolygon, Polygon, Rect};
use serde_json::Value;

use crate::boundary::Feature;

/// The delegation boundary collection, owned by the caller and passed into each render pass.
#[derive(Clone, Debug, Default)]
pub struct Boundaries {
    features: Vec<Feature>,
}

impl Boundaries {
    pub fn new(features: Vec<Feature>) -> Self { Self { features } }

    /// Read a GeoJSON FeatureCollection from `path`.
    pub fn read_from_geojson(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("[boundary::read] Boundary file not found or unreadable: {}", path.display()))?;
        Self::from_geojson_bytes(&bytes)
            .with_context(|| format!("[boundary::read] Failed to load boundaries from {}", path.display()))
    }

    /// Parse a GeoJSON FeatureCollection from bytes.
    pub fn from_geojson_bytes(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)
            .context("[boundary::read] Failed to parse GeoJSON bytes")?;
        Self::from_geojson_value(value)
    }

    pub fn from_geojson_value(mut value: Value) -> Result<Self> {
        ensure!(value["type"].as_str() == Some("FeatureCollection"),
            "[boundary::read] Expected a FeatureCollection, found {}", value["type"]);

        let features = value.get_mut("features")
            .map(Value::take)
            .ok_or_else(|| anyhow!("[boundary::read] FeatureCollection has no 'features' array"))?;
        let features: Vec<Feature> = serde_json::from_value(features)
            .context("[boundary::read] Malformed feature in collection")?;

        tracing::debug!("[boundary::read] loaded {} features", features.len());
        Ok(Self { features })
    }

    #[inline] pub fn features(&self) -> &[Feature] { &self.features }

    #[inline] pub fn len(&self) -> usize { self.features.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.features.is_empty() }

    /// Bounding box over all drawable features.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.features.iter()
            .filter_map(Feature::shape)
            .filter_map(|shape| shape.bounding_rect())
            .reduce(|a, b| Rect::new(
                Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
            ))
    }
}

impl Feature {
    /// Decode a Polygon or MultiPolygon geometry. Other geometry types, or
    /// malformed coordinates, yield `None`.
    pub fn shape(&self) -> Option<MultiPolygon<f64>> {
        let coords = self.geometry.get("coordinates")?.as_array()?;
        match self.geometry_type()? {
            "Polygon" => parse_polygon_coords(coords).map(|polygon| MultiPolygon(vec![polygon])),
            "MultiPolygon" => coords.iter()
                .map(|polygon| polygon.as_array().and_then(|rings| parse_polygon_coords(rings)))
                .collect::<Option<Vec<_>>>()
                .map(MultiPolygon),
            _ => None,
        }
    }
}

/// Parse a GeoJSON polygon: `[exterior, hole, hole, ...]`.
fn parse_polygon_coords(rings: &[Value]) -> Option<Polygon<f64>> {
    let mut rings = rings.iter().map(|ring| ring.as_array().and_then(|ring| parse_ring_coords(ring)));
    let exterior = rings.next()??;
    let interiors = rings.collect::<Option<Vec<_>>>()?;
    Some(Polygon::new(exterior, interiors))
}

/// Parse a ring: `[[x, y], [x, y], ...]`. Extra ordinates (z, m) are ignored.
fn parse_ring_coords(coords: &[Value]) -> Option<LineString<f64>> {
    let points = coords.iter()
        .map(|pair| {
            let pair = pair.as_array()?;
            Some(Coord { x: pair.first()?.as_f64()?, y: pair.get(1)?.as_f64()? })
        })
        .collect::<Option<Vec<_>>>()?;
    Some(LineString(points))
}
