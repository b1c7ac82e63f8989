//! Map renderer boundary.
//!
//! `MapView` is the crate's only interface to the mapping stack: it takes a
//! center/zoom, optionally a boundary outline and a heatmap layer, and
//! renders a self-contained Leaflet HTML document. Nothing else in the crate
//! knows how the map is drawn.

use askama::Template;

use crate::aggregate::WeightedPoint;
use crate::data::GeoBoundary;

/// Default view over Vietnam.
pub const MAP_CENTER: (f64, f64) = (16.0, 108.0);
pub const MAP_ZOOM: u8 = 6;

/// Embedded map size on the search page.
pub const EMBED_WIDTH: u32 = 700;
pub const EMBED_HEIGHT: u32 = 500;

/// Style of the country outline overlay.
#[derive(Debug, Clone)]
pub struct OutlineStyle {
    pub color: String,
    pub weight: u32,
}

impl Default for OutlineStyle {
    fn default() -> Self {
        OutlineStyle {
            color: "red".to_string(),
            weight: 2,
        }
    }
}

/// Heatmap layer tuning.
#[derive(Debug, Clone, Copy)]
pub struct HeatmapOptions {
    pub radius: u32,
    pub blur: u32,
    pub max_zoom: u32,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        HeatmapOptions {
            radius: 20,
            blur: 15,
            max_zoom: 10,
        }
    }
}

/// Builder for one map document.
#[derive(Debug)]
pub struct MapView {
    center: (f64, f64),
    zoom: u8,
    boundary: Option<(serde_json::Value, OutlineStyle)>,
    heatmap: Option<(Vec<WeightedPoint>, HeatmapOptions)>,
}

impl MapView {
    pub fn new(center_lat: f64, center_lon: f64, zoom: u8) -> Self {
        MapView {
            center: (center_lat, center_lon),
            zoom,
            boundary: None,
            heatmap: None,
        }
    }

    /// Base map over Vietnam.
    pub fn vietnam() -> Self {
        MapView::new(MAP_CENTER.0, MAP_CENTER.1, MAP_ZOOM)
    }

    pub fn with_outline(mut self, boundary: &GeoBoundary, style: OutlineStyle) -> Self {
        self.boundary = Some((boundary.feature.clone(), style));
        self
    }

    /// An empty point list adds no layer; the base map still renders.
    pub fn with_heatmap(mut self, points: &[WeightedPoint], options: HeatmapOptions) -> Self {
        if !points.is_empty() {
            self.heatmap = Some((points.to_vec(), options));
        }
        self
    }

    /// Render the full HTML document.
    pub fn render(&self) -> anyhow::Result<String> {
        let (boundary_json, outline) = match &self.boundary {
            Some((feature, style)) => (serde_json::to_string(feature)?, style.clone()),
            None => (String::new(), OutlineStyle::default()),
        };

        let (points_json, heat) = match &self.heatmap {
            Some((points, options)) => {
                let triples: Vec<[f64; 3]> = points.iter().map(WeightedPoint::as_triple).collect();
                (serde_json::to_string(&triples)?, *options)
            }
            None => (String::new(), HeatmapOptions::default()),
        };

        let template = MapTemplate {
            center_lat: self.center.0,
            center_lon: self.center.1,
            zoom: self.zoom,
            boundary_json,
            outline_color: outline.color,
            outline_weight: outline.weight,
            points_json,
            radius: heat.radius,
            blur: heat.blur,
            max_zoom: heat.max_zoom,
        };

        Ok(template.render()?)
    }
}

#[derive(Template)]
#[template(path = "map.html")]
struct MapTemplate {
    center_lat: f64,
    center_lon: f64,
    zoom: u8,
    boundary_json: String,
    outline_color: String,
    outline_weight: u32,
    points_json: String,
    radius: u32,
    blur: u32,
    max_zoom: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64, weight: u32) -> WeightedPoint {
        WeightedPoint {
            latitude: lat,
            longitude: lon,
            weight,
        }
    }

    #[test]
    fn renders_center_and_zoom() {
        let html = MapView::vietnam().render().unwrap();
        assert!(html.contains("[16, 108]"));
        assert!(html.contains("setView"));
    }

    #[test]
    fn empty_points_render_no_heat_layer() {
        let html = MapView::vietnam()
            .with_heatmap(&[], HeatmapOptions::default())
            .render()
            .unwrap();
        assert!(!html.contains("L.heatLayer"));
    }

    #[test]
    fn points_are_embedded_as_triples() {
        let html = MapView::vietnam()
            .with_heatmap(&[point(21.0, 105.8, 3)], HeatmapOptions::default())
            .render()
            .unwrap();
        assert!(html.contains("L.heatLayer"));
        assert!(html.contains("[21.0,105.8,3.0]"));
    }

    #[test]
    fn outline_uses_boundary_feature() {
        let boundary = GeoBoundary {
            name: "Vietnam".to_string(),
            feature: serde_json::json!({
                "type": "Feature",
                "properties": {"name": "Vietnam"},
                "geometry": {"type": "Polygon", "coordinates": []}
            }),
        };

        let html = MapView::vietnam()
            .with_outline(&boundary, OutlineStyle::default())
            .render()
            .unwrap();
        assert!(html.contains("L.geoJSON"));
        assert!(html.contains("\"Vietnam\""));
    }
}
