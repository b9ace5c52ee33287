#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! School record and Shotspotter proximity category types.
//!
//! This crate defines the canonical proximity taxonomy used across the
//! school-map system. Source datasets carry free-text proximity labels;
//! [`ProximityCategory::from_label`] normalizes them into this shared enum.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A school's qualitative distance bucket relative to the nearest acoustic
/// gunshot-detection sensor.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ProximityCategory {
    /// Schools with no sensor nearby
    AllOther,
    /// Within half a mile of a sensor
    HalfMile,
    /// Within a tenth of a mile of a sensor
    TenthMile,
    /// A sensor is sited at the school itself
    Shotspotter,
}

impl ProximityCategory {
    /// Parses the label used in the source dataset's
    /// `School_relative_to_nearest_shotspotter` attribute.
    ///
    /// Returns `None` for labels outside the known set; callers treat that
    /// as non-fatal and fall back to a default marker style.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "All other schools" => Some(Self::AllOther),
            "0.5 miles" => Some(Self::HalfMile),
            "0.1 miles" => Some(Self::TenthMile),
            "Shotspotter" => Some(Self::Shotspotter),
            _ => None,
        }
    }

    /// Returns the dataset label for this category, also used as the legend
    /// row text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AllOther => "All other schools",
            Self::HalfMile => "0.5 miles",
            Self::TenthMile => "0.1 miles",
            Self::Shotspotter => "Shotspotter",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::AllOther,
            Self::HalfMile,
            Self::TenthMile,
            Self::Shotspotter,
        ]
    }
}

/// One school from the point layer, with the attributes the map needs.
///
/// Immutable value type; `category` is `None` when the source label was not
/// recognized, which downstream styling handles with a fallback rather than
/// an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolRecord {
    /// Human-readable school name.
    pub name: String,
    /// Marker latitude (geometry centroid).
    pub latitude: f64,
    /// Marker longitude (geometry centroid).
    pub longitude: f64,
    /// Normalized proximity category, if the source label was recognized.
    pub category: Option<ProximityCategory>,
    /// Percent of enrolled students who are Black, 0-100.
    pub percent_black: f64,
    /// Percent of enrolled students who are Hispanic, 0-100.
    pub percent_hispanic: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_roundtrip() {
        for category in ProximityCategory::all() {
            assert_eq!(
                ProximityCategory::from_label(category.label()),
                Some(*category),
                "{category:?} label does not round-trip"
            );
        }
    }

    #[test]
    fn unknown_label_is_none() {
        assert_eq!(ProximityCategory::from_label("0.25 miles"), None);
        assert_eq!(ProximityCategory::from_label(""), None);
    }

    #[test]
    fn all_covers_every_label() {
        let labels: Vec<&str> = ProximityCategory::all()
            .iter()
            .map(|c| c.label())
            .collect();
        assert_eq!(
            labels,
            ["All other schools", "0.5 miles", "0.1 miles", "Shotspotter"]
        );
    }
}
