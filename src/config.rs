//! Tuning constants for the flight loop.
//! Everything here is overridable from JSON so that deployments can retune
//! speed, smoothing and the win target without a rebuild.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::{clog, cwarn};

/// Plane silhouette pointing up (hence the 90 degree default heading offset).
pub const DEFAULT_PLANE_ICON: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 64 64'><path fill='%23f0f6fc' stroke='%230e1116' stroke-width='2' d='M32 2 L36 24 L60 38 L60 44 L36 36 L35 52 L44 58 L44 62 L32 58 L20 62 L20 58 L29 52 L28 36 L4 44 L4 38 L28 24 Z'/></svg>";

/// Default trophy image for the win modal.
pub const DEFAULT_REWARD_IMAGE: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 120 120'><path fill='%23e3b341' d='M30 14 H90 V40 C90 62 76 74 60 76 C44 74 30 62 30 40 Z'/><path fill='none' stroke='%23e3b341' stroke-width='6' d='M30 24 H14 C14 44 22 52 32 54 M90 24 H106 C106 44 98 52 88 54'/><rect x='54' y='76' width='12' height='18' fill='%23e3b341'/><rect x='36' y='94' width='48' height='12' rx='3' fill='%23bb8009'/></svg>";

/// localStorage key checked first for a configuration override.
pub const STORAGE_KEY: &str = "flight_config";
/// Id of the `<script type="application/json">` element checked second.
pub const CONFIG_ELEMENT_ID: &str = "flight-config";

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// How smoothed velocity is turned into pan calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanPolicy {
    /// Raw fractional velocity every frame.
    Direct,
    /// Whole units only; the fractional remainder carries to the next frame.
    #[default]
    Accumulated,
}

/// What the frame loop does once the target has been reached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinBehavior {
    /// Stop rescheduling frames.
    #[default]
    Stop,
    /// Keep flying; the latch keeps the check from firing again.
    Continue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    /// Target velocity magnitude in pixels per frame.
    pub speed: f64,
    /// Velocity smoothing factor while a finger is down.
    pub touch_smoothing: f64,
    /// Velocity smoothing factor after release (glide).
    pub release_smoothing: f64,
    pub rotation_smoothing: f64,
    /// Added to the touch angle so the icon asset faces the direction of travel.
    pub heading_offset_deg: f64,
    pub pan_policy: PanPolicy,
    pub on_win: WinBehavior,
    pub target: LatLng,
    pub threshold_km: f64,
    pub start: LatLng,
    pub start_zoom: f64,
    pub tile_url: String,
    pub max_zoom: f64,
    pub attribution: String,
    pub plane_icon: String,
    pub reward_image: Option<String>,
    pub reward_pdf: Option<String>,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            speed: 4.0,
            touch_smoothing: 0.15,
            release_smoothing: 0.04,
            rotation_smoothing: 0.2,
            heading_offset_deg: 90.0,
            pan_policy: PanPolicy::Accumulated,
            on_win: WinBehavior::Stop,
            target: LatLng::new(60.1699, 24.9384),
            threshold_km: 16.0,
            start: LatLng::new(47.447915, 8.562177),
            start_zoom: 7.0,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            max_zoom: 19.0,
            attribution: "&copy; OpenStreetMap contributors".to_string(),
            plane_icon: DEFAULT_PLANE_ICON.to_string(),
            reward_image: Some(DEFAULT_REWARD_IMAGE.to_string()),
            reward_pdf: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be in (0, 1], got {value}")]
    SmoothingOutOfRange { field: &'static str, value: f64 },
    #[error("{field} must be finite and >= 0, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} is not a valid coordinate: ({}, {})", .value.lat, .value.lng)]
    BadCoordinate { field: &'static str, value: LatLng },
    #[error("start_zoom {zoom} outside [0, {max_zoom}]")]
    ZoomOutOfRange { zoom: f64, max_zoom: f64 },
}

impl FlightConfig {
    /// Parses a (possibly partial) JSON document; missing fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: FlightConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("touch_smoothing", self.touch_smoothing),
            ("release_smoothing", self.release_smoothing),
            ("rotation_smoothing", self.rotation_smoothing),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::SmoothingOutOfRange { field, value });
            }
        }
        for (field, value) in [
            ("speed", self.speed),
            ("threshold_km", self.threshold_km),
            ("max_zoom", self.max_zoom),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if !self.heading_offset_deg.is_finite() {
            return Err(ConfigError::Negative {
                field: "heading_offset_deg",
                value: self.heading_offset_deg,
            });
        }
        for (field, value) in [("target", self.target), ("start", self.start)] {
            let ok = (-90.0..=90.0).contains(&value.lat) && (-180.0..=180.0).contains(&value.lng);
            if !ok {
                return Err(ConfigError::BadCoordinate { field, value });
            }
        }
        if !(0.0..=self.max_zoom).contains(&self.start_zoom) {
            return Err(ConfigError::ZoomOutOfRange {
                zoom: self.start_zoom,
                max_zoom: self.max_zoom,
            });
        }
        Ok(())
    }

    /// Resolves the active configuration from the page: localStorage override,
    /// then the inline JSON element, then defaults. Bad documents are logged
    /// and skipped.
    pub fn load() -> Self {
        let from_storage = web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|store| store.get_item(STORAGE_KEY).ok().flatten());
        let from_element = || {
            web_sys::window()
                .and_then(|win| win.document())
                .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
                .and_then(|el| el.text_content())
        };
        for (source, raw) in [("localStorage", from_storage), ("inline element", from_element())] {
            let Some(raw) = raw else { continue };
            if raw.trim().is_empty() {
                continue;
            }
            match Self::from_json(&raw) {
                Ok(cfg) => {
                    clog(&format!("flight config loaded from {source}"));
                    return cfg;
                }
                Err(e) => cwarn(&format!("ignoring flight config from {source}: {e}")),
            }
        }
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(FlightConfig::default().validate().is_ok());
    }

    #[test]
    fn default_images_are_built_in() {
        let cfg = FlightConfig::default();
        assert!(cfg.plane_icon.starts_with("data:image/svg+xml"));
        assert!(cfg.reward_image.as_deref().is_some_and(|s| s.starts_with("data:image/svg+xml")));
        assert_eq!(cfg.reward_pdf, None);
        // '#' would end the data URI early
        assert!(!cfg.plane_icon.contains('#'));
        assert!(!DEFAULT_REWARD_IMAGE.contains('#'));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = FlightConfig::from_json(r#"{"speed": 6.5, "pan_policy": "direct"}"#).unwrap();
        assert_eq!(cfg.speed, 6.5);
        assert_eq!(cfg.pan_policy, PanPolicy::Direct);
        assert_eq!(cfg.threshold_km, FlightConfig::default().threshold_km);
        assert_eq!(cfg.on_win, WinBehavior::Stop);
    }

    #[test]
    fn target_and_win_behavior_parse() {
        let cfg = FlightConfig::from_json(
            r#"{"target": {"lat": 48.8566, "lng": 2.3522}, "threshold_km": 20, "on_win": "continue", "reward_pdf": null}"#,
        )
        .unwrap();
        assert_eq!(cfg.target, LatLng::new(48.8566, 2.3522));
        assert_eq!(cfg.threshold_km, 20.0);
        assert_eq!(cfg.on_win, WinBehavior::Continue);
        assert_eq!(cfg.reward_pdf, None);
    }

    #[test]
    fn smoothing_out_of_range_is_rejected() {
        let err = FlightConfig::from_json(r#"{"release_smoothing": 0.0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::SmoothingOutOfRange { field: "release_smoothing", .. }
        ));
        assert!(FlightConfig::from_json(r#"{"touch_smoothing": 1.5}"#).is_err());
    }

    #[test]
    fn bad_coordinates_and_zoom_are_rejected() {
        assert!(matches!(
            FlightConfig::from_json(r#"{"target": {"lat": 91.0, "lng": 0.0}}"#),
            Err(ConfigError::BadCoordinate { field: "target", .. })
        ));
        assert!(matches!(
            FlightConfig::from_json(r#"{"start_zoom": 25}"#),
            Err(ConfigError::ZoomOutOfRange { .. })
        ));
        assert!(matches!(
            FlightConfig::from_json(r#"{"speed": -1}"#),
            Err(ConfigError::Negative { field: "speed", .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = FlightConfig::from_json("{speed:").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("invalid config JSON"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn validation_errors_name_the_field() {
        let err = FlightConfig::from_json(r#"{"start": {"lat": 10.0, "lng": 200.0}}"#).unwrap_err();
        assert_eq!(err.to_string(), "start is not a valid coordinate: (10, 200)");
        let err = FlightConfig::from_json(r#"{"rotation_smoothing": 2}"#).unwrap_err();
        assert_eq!(err.to_string(), "rotation_smoothing must be in (0, 1], got 2");
    }
}
