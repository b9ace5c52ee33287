#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pipeline for generating the schools/Shotspotter proximity map.
//!
//! Loads the schools point layer and the district boundary layer from
//! `GeoJSON`, centers the map on the mean school location, classifies each
//! school into its marker style, and writes a single self-contained Leaflet
//! HTML page: district outlines, one styled marker per school with tooltip
//! and popup, and a fixed legend.

use std::path::PathBuf;

use school_map_render::{MapDocument, MapView, markers};

/// Arguments for one generation run.
pub struct GenerateArgs {
    /// Path to the schools point layer (`GeoJSON`).
    pub schools: PathBuf,

    /// Path to the district boundary layer (`GeoJSON`).
    pub districts: PathBuf,

    /// Path the HTML artifact is written to.
    pub out: PathBuf,
}

/// Runs the full load/classify/render/write pipeline.
///
/// # Errors
///
/// Returns an error if either input layer fails to load, the schools layer
/// is empty, or the output file cannot be written.
pub fn run(args: &GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("Loading schools from {}", args.schools.display());
    let schools = school_map_geography::load_schools(&args.schools)?;

    log::info!("Loading districts from {}", args.districts.display());
    let districts = school_map_geography::load_districts(&args.districts)?;

    let (center_lat, center_lng) = school_map_geography::schools_centroid(&schools)?;
    log::info!("Map centered at ({center_lat:.4}, {center_lng:.4})");

    let document = MapDocument::new(MapView::centered(center_lat, center_lng))
        .with_boundaries(districts)
        .with_markers(markers(&schools))
        .with_legend(school_map_style::legend())
        .render()?;

    school_map_render::write_document(&args.out, &document)?;
    log::info!(
        "Rendered {} schools into {}",
        schools.len(),
        args.out.display()
    );

    Ok(())
}
