use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::MAP_CONTAINER_ID;
use crate::error::DatasetError;

const MONASTERIES_JSON: &str = include_str!("../data/monasteries.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Major,
    Medium,
}

impl Category {
    /// Marker radius in SVG units, enlarged while hovered.
    pub fn marker_radius(self, hovered: bool) -> f64 {
        match (self, hovered) {
            (Self::Major, false) => 8.0,
            (Self::Major, true) => 10.0,
            (Self::Medium, false) => 5.0,
            (Self::Medium, true) => 7.0,
        }
    }

    pub fn marker_fill(self) -> &'static str {
        match self {
            Self::Major => "#8e7dbe",
            Self::Medium => "#d4af37",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monastery {
    pub id: u32,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub category: Category,
    pub century: String,
    pub rating: f64,
    pub description: String,
    pub image: String,
    pub virtual_tour: bool,
    #[serde(default)]
    pub events: Vec<String>,
    /// Hand-placed marker position in map SVG units.
    #[serde(default)]
    pub pin: Option<(f64, f64)>,
}

impl Monastery {
    /// Short tooltip line, e.g. `16th Century • 4.8 ★`.
    pub fn summary_line(&self) -> String {
        format!("{} Century \u{2022} {} \u{2605}", self.century, self.rating)
    }

    pub fn tour_label(&self) -> &'static str {
        if self.virtual_tour {
            "Available"
        } else {
            "Coming Soon"
        }
    }
}

/// How markers are laid out on the decorative outline.
///
/// Neither variant is a geographic projection. `LinearLatLng` reproduces the
/// old offset hack; `Pinned` uses hand-placed coordinates when a record has them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MarkerPlacement {
    #[default]
    Pinned,
    LinearLatLng {
        x_scale: f64,
        x_offset: f64,
        y_scale: f64,
        y_offset: f64,
    },
}

impl MarkerPlacement {
    pub const LEGACY_LINEAR: Self = Self::LinearLatLng {
        x_scale: 10.0,
        x_offset: 200.0,
        y_scale: 5.0,
        y_offset: 100.0,
    };

    pub fn place(&self, monastery: &Monastery) -> (f64, f64) {
        match *self {
            Self::Pinned => monastery
                .pin
                .unwrap_or_else(|| Self::LEGACY_LINEAR.place(monastery)),
            Self::LinearLatLng {
                x_scale,
                x_offset,
                y_scale,
                y_offset,
            } => (
                monastery.lat * x_scale + x_offset,
                monastery.lng * y_scale + y_offset,
            ),
        }
    }
}

/// A district label drawn over the outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistrictLabel {
    pub name: &'static str,
    pub x: f64,
    pub y: f64,
}

pub const MAP_VIEW_BOX: &str = "0 0 800 600";
pub const OUTLINE_PATH: &str = "M400,100 L500,150 L550,250 L500,350 L400,400 L300,350 L250,250 L300,150 Z";
pub const DISTRICTS: [DistrictLabel; 4] = [
    DistrictLabel {
        name: "North Sikkim",
        x: 450.0,
        y: 200.0,
    },
    DistrictLabel {
        name: "South Sikkim",
        x: 400.0,
        y: 350.0,
    },
    DistrictLabel {
        name: "East Sikkim",
        x: 500.0,
        y: 300.0,
    },
    DistrictLabel {
        name: "West Sikkim",
        x: 300.0,
        y: 250.0,
    },
];

/// Markers are keyed by id, so ids must be unique.
pub fn parse_monasteries(json: &str) -> Result<Vec<Monastery>, DatasetError> {
    let monasteries: Vec<Monastery> =
        serde_json::from_str(json).map_err(DatasetError::malformed("monastery"))?;
    let mut seen = HashSet::with_capacity(monasteries.len());
    if let Some(dup) = monasteries.iter().find(|m| !seen.insert(m.id)) {
        return Err(DatasetError::DuplicateMonasteryId(dup.id));
    }
    Ok(monasteries)
}

/// The bundled six-record sample.
pub fn sample_monasteries() -> Result<Vec<Monastery>, DatasetError> {
    parse_monasteries(MONASTERIES_JSON)
}

/// Mount configuration for the map controller.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub container_id: String,
    pub monasteries: Vec<Monastery>,
    pub placement: MarkerPlacement,
}

impl MapConfig {
    pub fn sample() -> Result<Self, DatasetError> {
        Ok(Self {
            container_id: MAP_CONTAINER_ID.to_string(),
            monasteries: sample_monasteries()?,
            placement: MarkerPlacement::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rumtek() -> Monastery {
        sample_monasteries()
            .expect("bundled dataset parses")
            .into_iter()
            .find(|m| m.name == "Rumtek Monastery")
            .expect("rumtek present")
    }

    #[test]
    fn bundled_dataset_has_six_records() {
        let monasteries = sample_monasteries().expect("bundled dataset parses");
        assert_eq!(monasteries.len(), 6);
        let majors = monasteries
            .iter()
            .filter(|m| m.category == Category::Major)
            .count();
        assert_eq!(majors, 2);
    }

    #[test]
    fn malformed_dataset_is_an_error() {
        let err = parse_monasteries("[{\"id\": 1}]").expect_err("missing fields");
        assert!(err.to_string().starts_with("malformed monastery dataset"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut records: Vec<serde_json::Value> =
            serde_json::from_str(MONASTERIES_JSON).expect("bundled json");
        let mut copy = records[0].clone();
        copy["name"] = "Rumtek Annex".into();
        records.push(copy);
        let json = serde_json::Value::Array(records).to_string();
        let err = parse_monasteries(&json).expect_err("duplicate id");
        assert!(matches!(err, DatasetError::DuplicateMonasteryId(id) if id == 1));
    }

    #[test]
    fn legacy_linear_placement_uses_offset_formula() {
        let m = rumtek();
        let (x, y) = MarkerPlacement::LEGACY_LINEAR.place(&m);
        assert!((x - (27.2860 * 10.0 + 200.0)).abs() < 1e-9);
        assert!((y - (88.5762 * 5.0 + 100.0)).abs() < 1e-9);
    }

    #[test]
    fn pinned_placement_prefers_pin_and_falls_back_to_linear() {
        let mut m = rumtek();
        assert_eq!(MarkerPlacement::Pinned.place(&m), (500.0, 280.0));
        m.pin = None;
        assert_eq!(
            MarkerPlacement::Pinned.place(&m),
            MarkerPlacement::LEGACY_LINEAR.place(&m)
        );
    }

    #[test]
    fn marker_radius_grows_on_hover() {
        assert_eq!(Category::Major.marker_radius(false), 8.0);
        assert_eq!(Category::Major.marker_radius(true), 10.0);
        assert_eq!(Category::Medium.marker_radius(false), 5.0);
        assert_eq!(Category::Medium.marker_radius(true), 7.0);
    }

    #[test]
    fn summary_line_formats_century_and_rating() {
        assert_eq!(rumtek().summary_line(), "16th Century \u{2022} 4.8 \u{2605}");
    }
}
