//! Map markers for the attraction map page

use serde::Serialize;

use crate::models::{Attraction, Coordinates};

/// Marker colour when neither the type nor any category has one
pub const DEFAULT_MARKER_COLOR: &str = "#003366";

const MARKER_COLORS: &[(&str, &str)] = &[
    ("monument", "#8B4513"),
    ("museum", "#9B59B6"),
    ("viewpoint", "#3498DB"),
    ("neighborhood", "#E74C3C"),
    ("church", "#F39C12"),
    ("palace", "#D4AF37"),
    ("aquarium", "#1ABC9C"),
    ("market", "#E67E22"),
    ("nightlife", "#E91E63"),
    ("park", "#27AE60"),
    ("experience", "#16A085"),
    ("bridge", "#95A5A6"),
];

/// One pin on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub id: String,
    pub name: String,
    pub tagline: String,
    pub coordinates: Coordinates,
    pub rating: f64,
    pub color: &'static str,
}

impl From<&Attraction> for MapMarker {
    fn from(attraction: &Attraction) -> Self {
        Self {
            id: attraction.id.clone(),
            name: attraction.name.clone(),
            tagline: attraction.tagline.clone(),
            coordinates: attraction.location.coordinates,
            rating: attraction.rating,
            color: marker_color(attraction),
        }
    }
}

fn palette_color(label: &str) -> Option<&'static str> {
    MARKER_COLORS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, color)| *color)
}

/// Colour for the primary type, else the first category that has one
pub fn marker_color(attraction: &Attraction) -> &'static str {
    palette_color(&attraction.kind)
        .or_else(|| attraction.categories.iter().find_map(|c| palette_color(c)))
        .unwrap_or(DEFAULT_MARKER_COLOR)
}

/// Markers in the same order as `attractions`
pub fn markers(attractions: &[Attraction]) -> Vec<MapMarker> {
    attractions.iter().map(MapMarker::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::AttractionBuilder;

    #[test]
    fn test_marker_color_prefers_type() {
        let attraction = AttractionBuilder::new("a", "A")
            .kind("church")
            .categories(&["museum"])
            .build();
        assert_eq!(marker_color(&attraction), "#F39C12");
    }

    #[test]
    fn test_marker_color_falls_back_to_category() {
        let attraction = AttractionBuilder::new("a", "A")
            .kind("landmark")
            .categories(&["historic", "viewpoint", "museum"])
            .build();
        assert_eq!(marker_color(&attraction), "#3498DB");

        let plain = AttractionBuilder::new("b", "B").categories(&["historic"]).build();
        assert_eq!(marker_color(&plain), DEFAULT_MARKER_COLOR);
    }

    #[test]
    fn test_markers() {
        let attractions = vec![
            AttractionBuilder::new("a", "A")
                .kind("bridge")
                .tagline("Span")
                .coordinates(38.69, -9.17)
                .build(),
            AttractionBuilder::new("b", "B").build(),
        ];

        let markers = markers(&attractions);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].id, "a");
        assert_eq!(markers[0].tagline, "Span");
        assert_eq!(markers[0].coordinates.latitude, 38.69);
        assert_eq!(markers[0].color, "#95A5A6");
        assert_eq!(markers[1].color, DEFAULT_MARKER_COLOR);
    }
}
