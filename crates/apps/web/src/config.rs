use formats::{COUNTRY_DATA_PATH, GEOGRAPHY_PATH};
use serde::Deserialize;

use crate::globe_controller::{DRAG_SENSITIVITY, INITIAL_ROTATE_DEG, INITIAL_SCALE, MIN_ZOOM};

/// View settings. Every field is optional in the JSON form and falls back to
/// the defaults below.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub data_url: String,
    pub geography_url: String,
    pub initial_scale: f64,
    /// `[lambda, phi]` in degrees.
    pub initial_rotate: [f64; 2],
    pub sensitivity: f64,
    pub min_zoom: f64,
    /// Element whose text mirrors the hover details, if present.
    pub details_element_id: String,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            data_url: COUNTRY_DATA_PATH.to_string(),
            geography_url: GEOGRAPHY_PATH.to_string(),
            initial_scale: INITIAL_SCALE,
            initial_rotate: INITIAL_ROTATE_DEG,
            sensitivity: DRAG_SENSITIVITY,
            min_zoom: MIN_ZOOM,
            details_element_id: "globe-details".to_string(),
        }
    }
}

impl GlobeConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}
