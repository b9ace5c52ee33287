#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Marker style classification for the school map.
//!
//! Maps a school's [`ProximityCategory`] to the visual style its marker is
//! drawn with. The mapping is total: every category yields exactly one
//! [`StyleDescriptor`], and unrecognized categories get a defined fallback
//! style instead of an error, so one bad record can never abort rendering.
//!
//! `HalfMile` and `TenthMile` intentionally collapse onto the identical
//! style; both mean "near a sensor" at different granularity in the source
//! data.

use school_map_school_models::ProximityCategory;
use serde::{Deserialize, Serialize};

/// Marker size used by the fallback style for unrecognized categories.
pub const DEFAULT_MARKER_SIZE_PX: u32 = 8;

/// Point-symbol shape for a school marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarkerShape {
    Circle,
    Star,
}

impl MarkerShape {
    /// Glyph rendered inside the marker's icon HTML.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Circle => "\u{25cf}",
            Self::Star => "\u{2605}",
        }
    }
}

/// Visual style for one school marker.
///
/// Pure value type produced on demand from a record's category. Every
/// constructor path, including [`StyleDescriptor::fallback`], populates all
/// fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDescriptor {
    pub shape: MarkerShape,
    /// Named CSS color for the glyph.
    pub color: &'static str,
    /// Glyph font size in pixels.
    pub size_px: u32,
    pub background_transparent: bool,
    pub border_transparent: bool,
}

impl StyleDescriptor {
    const fn new(shape: MarkerShape, color: &'static str, size_px: u32) -> Self {
        Self {
            shape,
            color,
            size_px,
            background_transparent: true,
            border_transparent: true,
        }
    }

    /// Degraded but valid style for categories outside the known set.
    #[must_use]
    pub const fn fallback() -> Self {
        Self::new(MarkerShape::Circle, "gray", DEFAULT_MARKER_SIZE_PX)
    }

    /// Inline CSS for the marker glyph, e.g. `color:red;font-size:10px;`.
    #[must_use]
    pub fn icon_css(&self) -> String {
        format!("color:{};font-size:{}px;", self.color, self.size_px)
    }
}

/// Maps a proximity category to its marker style.
///
/// Pure, total, and deterministic; same input always yields the same output.
#[must_use]
pub const fn classify(category: ProximityCategory) -> StyleDescriptor {
    match category {
        ProximityCategory::AllOther => StyleDescriptor::new(MarkerShape::Circle, "gray", 5),
        ProximityCategory::HalfMile | ProximityCategory::TenthMile => {
            StyleDescriptor::new(MarkerShape::Star, "pink", 10)
        }
        ProximityCategory::Shotspotter => StyleDescriptor::new(MarkerShape::Star, "red", 10),
    }
}

/// Like [`classify`], with the fallback style applied for records whose
/// source label was not recognized.
#[must_use]
pub const fn classify_opt(category: Option<ProximityCategory>) -> StyleDescriptor {
    match category {
        Some(category) => classify(category),
        None => StyleDescriptor::fallback(),
    }
}

/// One row of the static map legend: a color swatch paired with the
/// category's label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendRow {
    pub label: &'static str,
    pub swatch_color: &'static str,
}

/// Builds the legend payload: one row per category, in taxonomy order,
/// each swatch colored to match [`classify`]'s output for that category.
#[must_use]
pub fn legend() -> Vec<LegendRow> {
    ProximityCategory::all()
        .iter()
        .map(|&category| LegendRow {
            label: category.label(),
            swatch_color: classify(category).color,
        })
        .collect()
}
