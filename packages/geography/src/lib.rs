#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! `GeoJSON` loading for the school map.
//!
//! Parses the schools point layer and the district boundary polygon layer.
//! Marker locations are geometry centroids, so school footprint polygons
//! work the same as plain points. Structurally invalid features (missing
//! geometry, missing required attributes) fail fast; an unrecognized
//! proximity label is non-fatal and leaves the record's category unset.

use std::path::Path;

use geo::Centroid;
use geojson::{FeatureCollection, GeoJson};
use school_map_school_models::{ProximityCategory, SchoolRecord};
use thiserror::Error;

/// Schools layer attribute holding the school name.
const SCHOOL_NAME_PROP: &str = "USER_School_Name";

/// Schools layer attribute holding the proximity label.
const PROXIMITY_PROP: &str = "School_relative_to_nearest_shotspotter";

/// Schools layer attribute holding percent Black enrollment.
const PERCENT_BLACK_PROP: &str = "percent_black";

/// Schools layer attribute holding percent Hispanic enrollment.
const PERCENT_HISPANIC_PROP: &str = "percent_hispanic";

/// Districts layer attribute holding the district name.
const DISTRICT_NAME_PROP: &str = "NAME";

/// Errors that can occur during geography operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// File read failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// `GeoJSON` parsing failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// Structurally invalid feature data.
    #[error("Invalid feature: {message}")]
    Invalid {
        /// Description of what went wrong.
        message: String,
    },

    /// A layer that must contain features was empty.
    #[error("Empty layer: {layer}")]
    EmptyLayer {
        /// Name of the offending layer.
        layer: String,
    },
}

/// One district boundary from the polygon layer.
///
/// The geometry stays opaque `GeoJSON`; nothing downstream inspects it, it
/// is passed through verbatim to the boundary overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictBoundary {
    /// District name, shown in the overlay tooltip.
    pub name: String,
    /// Raw boundary geometry.
    pub geometry: geojson::Geometry,
}

/// Loads the schools point layer from a `GeoJSON` file.
///
/// # Errors
///
/// Returns [`GeoError`] if the file cannot be read or any feature is
/// structurally invalid.
pub fn load_schools(path: impl AsRef<Path>) -> Result<Vec<SchoolRecord>, GeoError> {
    let raw = std::fs::read_to_string(path)?;
    parse_schools(&raw)
}

/// Parses the schools point layer from `GeoJSON` text.
///
/// # Errors
///
/// Returns [`GeoError`] if the text is not a `FeatureCollection` or any
/// feature is missing its geometry or a required attribute.
pub fn parse_schools(raw: &str) -> Result<Vec<SchoolRecord>, GeoError> {
    let collection = parse_collection(raw)?;

    let mut schools = Vec::with_capacity(collection.features.len());
    for feature in collection.features {
        let name = require_string(feature.properties.as_ref(), SCHOOL_NAME_PROP)?;

        let geometry = feature.geometry.as_ref().ok_or_else(|| GeoError::Invalid {
            message: format!("school {name:?} has no geometry"),
        })?;
        let (latitude, longitude) = centroid_of(geometry, &name)?;

        let label = require_string(feature.properties.as_ref(), PROXIMITY_PROP)?;
        let category = ProximityCategory::from_label(&label);
        if category.is_none() {
            log::warn!("school {name:?}: unrecognized proximity label {label:?}");
        }

        schools.push(SchoolRecord {
            name,
            latitude,
            longitude,
            category,
            percent_black: require_f64(feature.properties.as_ref(), PERCENT_BLACK_PROP)?,
            percent_hispanic: require_f64(feature.properties.as_ref(), PERCENT_HISPANIC_PROP)?,
        });
    }

    log::info!("Loaded {} school records", schools.len());
    Ok(schools)
}

/// Loads the district boundary polygon layer from a `GeoJSON` file.
///
/// # Errors
///
/// Returns [`GeoError`] if the file cannot be read or any feature lacks a
/// geometry or `NAME` attribute.
pub fn load_districts(path: impl AsRef<Path>) -> Result<Vec<DistrictBoundary>, GeoError> {
    let raw = std::fs::read_to_string(path)?;
    parse_districts(&raw)
}

/// Parses the district boundary layer from `GeoJSON` text.
///
/// # Errors
///
/// Returns [`GeoError`] if the text is not a `FeatureCollection` or any
/// feature lacks a geometry or `NAME` attribute.
pub fn parse_districts(raw: &str) -> Result<Vec<DistrictBoundary>, GeoError> {
    let collection = parse_collection(raw)?;

    let mut districts = Vec::with_capacity(collection.features.len());
    for feature in collection.features {
        let name = require_string(feature.properties.as_ref(), DISTRICT_NAME_PROP)?;
        let geometry = feature.geometry.ok_or_else(|| GeoError::Invalid {
            message: format!("district {name:?} has no geometry"),
        })?;
        districts.push(DistrictBoundary { name, geometry });
    }

    log::info!("Loaded {} district boundaries", districts.len());
    Ok(districts)
}

/// Mean marker location across all schools, used to center the initial map
/// view.
///
/// # Errors
///
/// Returns [`GeoError::EmptyLayer`] if `schools` is empty.
pub fn schools_centroid(schools: &[SchoolRecord]) -> Result<(f64, f64), GeoError> {
    if schools.is_empty() {
        return Err(GeoError::EmptyLayer {
            layer: "schools".to_string(),
        });
    }

    #[allow(clippy::cast_precision_loss)]
    let count = schools.len() as f64;
    let lat = schools.iter().map(|s| s.latitude).sum::<f64>() / count;
    let lng = schools.iter().map(|s| s.longitude).sum::<f64>() / count;

    if !lat.is_finite() || !lng.is_finite() {
        return Err(GeoError::Invalid {
            message: format!("schools centroid is not finite: ({lat}, {lng})"),
        });
    }

    Ok((lat, lng))
}

fn parse_collection(raw: &str) -> Result<FeatureCollection, GeoError> {
    let geojson: GeoJson = raw.parse()?;
    FeatureCollection::try_from(geojson).map_err(Into::into)
}

/// Centroid of a feature geometry as `(latitude, longitude)`.
fn centroid_of(geometry: &geojson::Geometry, name: &str) -> Result<(f64, f64), GeoError> {
    let geo_geom: geo::Geometry<f64> =
        geometry
            .value
            .clone()
            .try_into()
            .map_err(|e: geojson::Error| GeoError::Invalid {
                message: format!("school {name:?} geometry conversion failed: {e}"),
            })?;

    let point = geo_geom.centroid().ok_or_else(|| GeoError::Invalid {
        message: format!("school {name:?} geometry has no centroid"),
    })?;

    Ok((point.y(), point.x()))
}

fn require_string(
    properties: Option<&geojson::JsonObject>,
    key: &str,
) -> Result<String, GeoError> {
    properties
        .and_then(|props| props.get(key))
        .and_then(serde_json::Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| GeoError::Invalid {
            message: format!("missing or non-string property {key:?}"),
        })
}

fn require_f64(properties: Option<&geojson::JsonObject>, key: &str) -> Result<f64, GeoError> {
    properties
        .and_then(|props| props.get(key))
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| GeoError::Invalid {
            message: format!("missing or non-numeric property {key:?}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn school_feature(name: &str, label: &str, lng: f64, lat: f64) -> String {
        format!(
            r#"{{"type": "Feature",
                 "geometry": {{"type": "Point", "coordinates": [{lng}, {lat}]}},
                 "properties": {{
                     "USER_School_Name": "{name}",
                     "School_relative_to_nearest_shotspotter": "{label}",
                     "percent_black": 42.3,
                     "percent_hispanic": 18.7
                 }}}}"#
        )
    }

    fn collection(features: &[String]) -> String {
        format!(
            r#"{{"type": "FeatureCollection", "features": [{}]}}"#,
            features.join(",")
        )
    }

    #[test]
    fn parses_point_school() {
        let raw = collection(&[school_feature(
            "Lincoln Elementary",
            "Shotspotter",
            -95.36,
            29.76,
        )]);
        let schools = parse_schools(&raw).unwrap();
        assert_eq!(schools.len(), 1);
        let school = &schools[0];
        assert_eq!(school.name, "Lincoln Elementary");
        assert_eq!(school.category, Some(ProximityCategory::Shotspotter));
        assert!((school.latitude - 29.76).abs() < 1e-9);
        assert!((school.longitude - -95.36).abs() < 1e-9);
        assert!((school.percent_black - 42.3).abs() < 1e-9);
        assert!((school.percent_hispanic - 18.7).abs() < 1e-9);
    }

    #[test]
    fn polygon_school_uses_centroid() {
        let raw = collection(&[r#"{"type": "Feature",
            "geometry": {"type": "Polygon",
                "coordinates": [[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [0.0, 0.0]]]},
            "properties": {
                "USER_School_Name": "Square Academy",
                "School_relative_to_nearest_shotspotter": "0.5 miles",
                "percent_black": 10.0,
                "percent_hispanic": 20.0
            }}"#
            .to_string()]);
        let schools = parse_schools(&raw).unwrap();
        assert!((schools[0].latitude - 1.0).abs() < 1e-9);
        assert!((schools[0].longitude - 1.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_label_is_non_fatal() {
        let raw = collection(&[school_feature("Odd School", "2 miles", -95.0, 29.0)]);
        let schools = parse_schools(&raw).unwrap();
        assert_eq!(schools[0].category, None);
    }

    #[test]
    fn missing_name_fails_fast() {
        let raw = collection(&[r#"{"type": "Feature",
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
            "properties": {
                "School_relative_to_nearest_shotspotter": "Shotspotter",
                "percent_black": 1.0,
                "percent_hispanic": 2.0
            }}"#
            .to_string()]);
        assert!(matches!(
            parse_schools(&raw),
            Err(GeoError::Invalid { .. })
        ));
    }

    #[test]
    fn missing_geometry_fails_fast() {
        let raw = collection(&[r#"{"type": "Feature",
            "geometry": null,
            "properties": {
                "USER_School_Name": "Ghost School",
                "School_relative_to_nearest_shotspotter": "Shotspotter",
                "percent_black": 1.0,
                "percent_hispanic": 2.0
            }}"#
            .to_string()]);
        assert!(matches!(
            parse_schools(&raw),
            Err(GeoError::Invalid { .. })
        ));
    }

    #[test]
    fn parses_districts() {
        let raw = collection(&[r#"{"type": "Feature",
            "geometry": {"type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]},
            "properties": {"NAME": "Houston ISD"}}"#
            .to_string()]);
        let districts = parse_districts(&raw).unwrap();
        assert_eq!(districts.len(), 1);
        assert_eq!(districts[0].name, "Houston ISD");
    }

    #[test]
    fn centroid_of_two_schools() {
        let raw = collection(&[
            school_feature("A", "Shotspotter", -96.0, 30.0),
            school_feature("B", "0.1 miles", -94.0, 28.0),
        ]);
        let schools = parse_schools(&raw).unwrap();
        let (lat, lng) = schools_centroid(&schools).unwrap();
        assert!((lat - 29.0).abs() < 1e-9);
        assert!((lng - -95.0).abs() < 1e-9);
    }

    #[test]
    fn centroid_of_empty_layer_errors() {
        assert!(matches!(
            schools_centroid(&[]),
            Err(GeoError::EmptyLayer { .. })
        ));
    }
}
