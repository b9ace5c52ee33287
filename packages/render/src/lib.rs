#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map document assembly and HTML emission.
//!
//! A [`MapDocument`] is an explicit builder: it accumulates immutable layer
//! descriptions (boundary overlay, styled markers, legend) and is finalized
//! exactly once by [`MapDocument::render`], which consumes it and produces a
//! self-contained Leaflet HTML page. There is no shared canvas object being
//! mutated behind the scenes, so layer order is exactly insertion order.

mod html;

use std::path::Path;

use school_map_geography::DistrictBoundary;
use school_map_school_models::SchoolRecord;
use school_map_style::{LegendRow, StyleDescriptor, classify_opt};
use thiserror::Error;

/// Initial zoom level for the map view.
pub const DEFAULT_ZOOM: u8 = 12;

/// Errors that can occur while rendering or writing the map document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing the output artifact failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing an embedded layer to JSON failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Base tile layer for the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayer {
    /// Leaflet URL template.
    pub url_template: &'static str,
    /// Attribution string shown on the map.
    pub attribution: &'static str,
}

/// CartoDB Positron: a simple, monochromatic base map that keeps the
/// colored markers legible.
pub const CARTODB_POSITRON: TileLayer = TileLayer {
    url_template: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
    attribution: "CartoDB Positron tiles",
};

/// Initial viewport for the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom_start: u8,
    pub tiles: TileLayer,
}

impl MapView {
    /// View centered on the given location with the default zoom and tiles.
    #[must_use]
    pub const fn centered(center_lat: f64, center_lng: f64) -> Self {
        Self {
            center_lat,
            center_lng,
            zoom_start: DEFAULT_ZOOM,
            tiles: CARTODB_POSITRON,
        }
    }
}

/// One marker ready for placement: location, visual style, and the
/// interactive text attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPlacement {
    pub latitude: f64,
    pub longitude: f64,
    pub style: StyleDescriptor,
    /// Hover text, already HTML-escaped.
    pub tooltip_html: String,
    /// Click popup body, already HTML-escaped.
    pub popup_html: String,
}

impl MarkerPlacement {
    /// Builds the placement for one school record: classified style, bold
    /// name tooltip, and a popup with the demographic percentages to one
    /// decimal place.
    #[must_use]
    pub fn for_school(school: &SchoolRecord) -> Self {
        let name = html::escape(&school.name);
        Self {
            latitude: school.latitude,
            longitude: school.longitude,
            style: classify_opt(school.category),
            tooltip_html: format!("<b>{name}</b><br>"),
            popup_html: format!(
                "{name}<br>Percent Black: {:.1}%<br>Percent Hispanic: {:.1}%",
                school.percent_black, school.percent_hispanic
            ),
        }
    }
}

/// Lazily transforms school records into marker placements, one per record,
/// preserving input order.
pub fn markers(schools: &[SchoolRecord]) -> impl Iterator<Item = MarkerPlacement> + '_ {
    schools.iter().map(MarkerPlacement::for_school)
}

/// Accumulates map layers and finalizes them into a single HTML document.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDocument {
    view: MapView,
    boundaries: Vec<DistrictBoundary>,
    markers: Vec<MarkerPlacement>,
    legend: Vec<LegendRow>,
}

impl MapDocument {
    /// Starts an empty document with the given viewport.
    #[must_use]
    pub const fn new(view: MapView) -> Self {
        Self {
            view,
            boundaries: Vec::new(),
            markers: Vec::new(),
            legend: Vec::new(),
        }
    }

    /// Adds the district boundary overlay layer.
    #[must_use]
    pub fn with_boundaries(mut self, boundaries: Vec<DistrictBoundary>) -> Self {
        self.boundaries.extend(boundaries);
        self
    }

    /// Adds marker placements, keeping their order.
    #[must_use]
    pub fn with_markers(mut self, markers: impl IntoIterator<Item = MarkerPlacement>) -> Self {
        self.markers.extend(markers);
        self
    }

    /// Sets the static legend rows.
    #[must_use]
    pub fn with_legend(mut self, legend: Vec<LegendRow>) -> Self {
        self.legend = legend;
        self
    }

    /// Finalizes the document into a self-contained Leaflet HTML page.
    ///
    /// Consumes the builder; a document is rendered exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Json`] if an embedded layer fails to
    /// serialize.
    pub fn render(self) -> Result<String, RenderError> {
        html::render_document(&self)
    }

    pub(crate) const fn view(&self) -> &MapView {
        &self.view
    }

    pub(crate) fn boundaries(&self) -> &[DistrictBoundary] {
        &self.boundaries
    }

    pub(crate) fn placements(&self) -> &[MarkerPlacement] {
        &self.markers
    }

    pub(crate) fn legend(&self) -> &[LegendRow] {
        &self.legend
    }
}

/// Writes the rendered document to `path`.
///
/// # Errors
///
/// Returns [`RenderError::Io`] if the write fails.
pub fn write_document(path: impl AsRef<Path>, document: &str) -> Result<(), RenderError> {
    let path = path.as_ref();
    std::fs::write(path, document)?;
    log::info!("Map written to {}", path.display());
    Ok(())
}
