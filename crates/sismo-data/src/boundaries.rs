//! Region boundaries loaded from a GeoJSON FeatureCollection.

use std::path::Path;

use geo::{coord, BoundingRect, LineString, MultiPolygon, Rect};
use geojson::{Feature, GeoJson};
use sismo_core::error::{Result, SismoError};
use tracing::{debug, warn};

/// A region shape keyed by its code property.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub code: String,
    pub shape: MultiPolygon<f64>,
}

impl Boundary {
    pub fn new(code: impl Into<String>, shape: MultiPolygon<f64>) -> Self {
        Self {
            code: code.into(),
            shape,
        }
    }

    /// Exterior and interior rings of every polygon, in file order.
    pub fn rings(&self) -> impl Iterator<Item = &LineString<f64>> {
        self.shape
            .iter()
            .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
    }
}

/// Grow `rect` by `fraction` of its size on every side.
pub fn padded(rect: Rect<f64>, fraction: f64) -> Rect<f64> {
    let delta = coord! { x: rect.width() * fraction, y: rect.height() * fraction };
    Rect::new(rect.min() - delta, rect.max() + delta)
}

/// All boundaries of one GeoJSON file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundarySet {
    features: Vec<Boundary>,
}

impl BoundarySet {
    pub fn new(features: Vec<Boundary>) -> Self {
        Self { features }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Boundary> {
        self.features.iter()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Longitude/latitude extent of every shape, `None` when there are no
    /// coordinates.
    pub fn bounding_box(&self) -> Option<Rect<f64>> {
        let all: MultiPolygon<f64> = self
            .features
            .iter()
            .flat_map(|b| b.shape.iter().cloned())
            .collect();
        all.bounding_rect()
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Load the FeatureCollection at `path`, keying each feature by `key_property`.
///
/// Features without polygon geometry are skipped. The key may be a string or
/// a number property; features lacking it are skipped with a warning.
pub fn load_boundaries(path: &Path, key_property: &str) -> Result<BoundarySet> {
    if !path.exists() {
        return Err(SismoError::InputNotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path).map_err(|source| SismoError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let set = parse_boundaries(&text, key_property)?;
    debug!("Loaded {} boundaries from {}", set.len(), path.display());
    Ok(set)
}

/// Parse GeoJSON text. A bare Feature is accepted as a one-element collection.
pub fn parse_boundaries(text: &str, key_property: &str) -> Result<BoundarySet> {
    let geojson: GeoJson = text.parse()?;
    let features = match geojson {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => {
            return Err(SismoError::Config(
                "boundary file must contain features, found a bare geometry".to_string(),
            ))
        }
    };

    let boundaries = features
        .iter()
        .filter_map(|feature| boundary_from_feature(feature, key_property))
        .collect();
    Ok(BoundarySet::new(boundaries))
}

fn boundary_from_feature(feature: &Feature, key_property: &str) -> Option<Boundary> {
    let code = match feature.property(key_property) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => {
            warn!("Boundary feature without a \"{key_property}\" property, skipping");
            return None;
        }
    };

    let geometry: Option<geo::Geometry<f64>> = feature
        .geometry
        .clone()
        .and_then(|g| g.try_into().ok());
    let shape = match geometry {
        Some(geo::Geometry::MultiPolygon(mp)) => mp,
        Some(geo::Geometry::Polygon(p)) => MultiPolygon::new(vec![p]),
        _ => {
            debug!("Boundary {code} has no polygon geometry, skipping");
            return None;
        }
    };
    Some(Boundary::new(code, shape))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
