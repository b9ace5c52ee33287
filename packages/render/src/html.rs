//! Leaflet HTML emission.
//!
//! Produces a single self-contained page: a full-viewport map div, the
//! district boundary overlay as embedded `GeoJSON`, one `L.divIcon` glyph
//! marker per school, and a fixed-position legend box. Marker and boundary
//! add order follows the document's layer insertion order.

use std::fmt::Write as _;

use crate::{MapDocument, MarkerPlacement, RenderError};
use school_map_geography::DistrictBoundary;
use school_map_style::LegendRow;

/// Popup max width in pixels.
const POPUP_MAX_WIDTH: u32 = 300;

/// Escapes text for inclusion in HTML content or attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Quotes a string as a JavaScript string literal.
fn js_str(text: &str) -> Result<String, RenderError> {
    serde_json::to_string(text).map_err(Into::into)
}

/// Renders the finalized document to HTML.
pub fn render_document(document: &MapDocument) -> Result<String, RenderError> {
    let view = document.view();

    let mut script = String::new();
    let _ = writeln!(
        script,
        "var map = L.map('map').setView([{lat}, {lng}], {zoom});",
        lat = view.center_lat,
        lng = view.center_lng,
        zoom = view.zoom_start,
    );
    let _ = writeln!(
        script,
        "L.tileLayer({url}, {{attribution: {attribution}}}).addTo(map);",
        url = js_str(view.tiles.url_template)?,
        attribution = js_str(view.tiles.attribution)?,
    );

    if !document.boundaries().is_empty() {
        script.push_str(&boundary_layer_js(document.boundaries())?);
    }

    for placement in document.placements() {
        script.push_str(&marker_js(placement)?);
    }

    log::debug!(
        "Rendering document: {} boundaries, {} markers, {} legend rows",
        document.boundaries().len(),
        document.placements().len(),
        document.legend().len(),
    );

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Schools and Shotspotter proximity</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>
html, body, #map {{ height: 100%; margin: 0; }}
.school-marker {{ background: transparent; border: none; text-align: center; }}
.legend-swatch {{ width: 16px; height: 16px; display: inline-block; margin-right: 8px; }}
</style>
</head>
<body>
<div id="map"></div>
{legend}
<script>
{script}</script>
</body>
</html>
"#,
        legend = legend_html(document.legend()),
    ))
}

/// Emits the district overlay: embedded `GeoJSON` styled as thin blue
/// outlines with a name tooltip, no fill.
fn boundary_layer_js(boundaries: &[DistrictBoundary]) -> Result<String, RenderError> {
    let features: Vec<serde_json::Value> = boundaries
        .iter()
        .map(|boundary| {
            Ok(serde_json::json!({
                "type": "Feature",
                "geometry": serde_json::to_value(&boundary.geometry)?,
                "properties": { "NAME": boundary.name },
            }))
        })
        .collect::<Result<_, serde_json::Error>>()?;

    let collection = serde_json::to_string(&serde_json::json!({
        "type": "FeatureCollection",
        "features": features,
    }))?;

    Ok(format!(
        "L.geoJSON({collection}, {{\n\
         \u{20} style: function() {{ return {{fill: false, color: 'blue', weight: 2, opacity: 0.5}}; }},\n\
         \u{20} onEachFeature: function(feature, layer) {{\n\
         \u{20}   layer.bindTooltip('District Name: ' + feature.properties.NAME);\n\
         \u{20} }}\n\
         }}).addTo(map);\n"
    ))
}

/// Emits one marker: a `divIcon` glyph carrying the classifier's inline
/// CSS, with tooltip and popup attached.
fn marker_js(placement: &MarkerPlacement) -> Result<String, RenderError> {
    let style = &placement.style;
    let background = if style.background_transparent {
        "transparent"
    } else {
        "white"
    };
    let border = if style.border_transparent {
        "none"
    } else {
        "1px solid black"
    };
    let icon_html = format!(
        "<span style=\"{css}background:{background};border:{border};\">{glyph}</span>",
        css = style.icon_css(),
        glyph = style.shape.glyph(),
    );

    Ok(format!(
        "L.marker([{lat}, {lng}], {{icon: L.divIcon({{className: 'school-marker', html: {icon}}})}})\n\
         \u{20} .bindTooltip({tooltip})\n\
         \u{20} .bindPopup({popup}, {{maxWidth: {POPUP_MAX_WIDTH}}})\n\
         \u{20} .addTo(map);\n",
        lat = placement.latitude,
        lng = placement.longitude,
        icon = js_str(&icon_html)?,
        tooltip = js_str(&placement.tooltip_html)?,
        popup = js_str(&placement.popup_html)?,
    ))
}

/// Emits the fixed-position legend box, one swatch + label row per entry.
fn legend_html(rows: &[LegendRow]) -> String {
    let mut body = String::new();
    for row in rows {
        let _ = write!(
            body,
            "\n    <i class=\"legend-swatch\" style=\"background:{color};\"></i> {label}<br>",
            color = row.swatch_color,
            label = escape(row.label),
        );
    }

    format!(
        r#"<div id="legend" style="position: fixed; bottom: 50px; left: 50px; width: 160px; height: auto; background: white; padding: 10px; border-radius: 5px; box-shadow: 0 0 5px rgba(0,0,0,0.5); z-index: 9999;">
    <h4>Legend</h4>{body}
</div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use school_map_style::{MarkerShape, StyleDescriptor, classify};

    #[test]
    fn escape_covers_html_metacharacters() {
        assert_eq!(
            escape(r#"<b>"A & B's"</b>"#),
            "&lt;b&gt;&quot;A &amp; B&#39;s&quot;&lt;/b&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn legend_rows_render_in_order() {
        let rows = vec![
            LegendRow {
                label: "All other schools",
                swatch_color: "gray",
            },
            LegendRow {
                label: "Shotspotter",
                swatch_color: "red",
            },
        ];
        let html = legend_html(&rows);
        let gray = html.find("background:gray").unwrap();
        let red = html.find("background:red").unwrap();
        assert!(gray < red);
        assert!(html.contains("<h4>Legend</h4>"));
    }

    #[test]
    fn marker_js_embeds_glyph_and_text() {
        let placement = MarkerPlacement {
            latitude: 29.76,
            longitude: -95.36,
            style: classify(school_map_school_models::ProximityCategory::Shotspotter),
            tooltip_html: "<b>Lincoln Elementary</b><br>".to_string(),
            popup_html: "Lincoln Elementary<br>Percent Black: 42.3%".to_string(),
        };
        let js = marker_js(&placement).unwrap();
        assert!(js.contains("L.marker([29.76, -95.36]"));
        assert!(js.contains(MarkerShape::Star.glyph()));
        assert!(js.contains("color:red;font-size:10px;"));
        assert!(js.contains("background:transparent"));
        assert!(js.contains("maxWidth: 300"));
    }

    #[test]
    fn fallback_marker_still_renders() {
        let placement = MarkerPlacement {
            latitude: 0.0,
            longitude: 0.0,
            style: StyleDescriptor::fallback(),
            tooltip_html: String::new(),
            popup_html: String::new(),
        };
        let js = marker_js(&placement).unwrap();
        assert!(js.contains("color:gray"));
        assert!(js.contains(MarkerShape::Circle.glyph()));
    }
}
