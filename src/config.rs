use serde::{Deserialize, Serialize};

const STORAGE_KEY: &str = "mc_view_config";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Scale applied per wheel notch when zooming out; zooming in uses the
    /// reciprocal. Kept strictly inside (0, 1) so the view stays invertible.
    pub zoom_ratio: f64,
    /// Marker radius in client pixels, independent of zoom.
    pub marker_screen_radius: f64,
    /// Stroke width is the marker radius divided by this.
    pub stroke_divisor: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            zoom_ratio: 0.9,
            marker_screen_radius: 5.0,
            stroke_divisor: 5.0,
        }
    }
}

impl ViewConfig {
    /// Replace any out-of-range field with its default.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let mut out = self;
        if !(out.zoom_ratio > 0.0 && out.zoom_ratio < 1.0) {
            log::warn!("zoom_ratio {} out of range, using {}", out.zoom_ratio, defaults.zoom_ratio);
            out.zoom_ratio = defaults.zoom_ratio;
        }
        if !(out.marker_screen_radius.is_finite() && out.marker_screen_radius > 0.0) {
            log::warn!(
                "marker_screen_radius {} out of range, using {}",
                out.marker_screen_radius,
                defaults.marker_screen_radius
            );
            out.marker_screen_radius = defaults.marker_screen_radius;
        }
        if !(out.stroke_divisor.is_finite() && out.stroke_divisor > 0.0) {
            log::warn!(
                "stroke_divisor {} out of range, using {}",
                out.stroke_divisor,
                defaults.stroke_divisor
            );
            out.stroke_divisor = defaults.stroke_divisor;
        }
        out
    }

    pub fn from_json(raw: &str) -> Option<Self> {
        match serde_json::from_str::<ViewConfig>(raw) {
            Ok(cfg) => Some(cfg.sanitized()),
            Err(err) => {
                log::warn!("ignoring stored view config: {err}");
                None
            }
        }
    }

    /// Stored settings, or defaults when nothing usable is stored.
    pub fn load() -> Self {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(Some(raw)) = store.get_item(STORAGE_KEY) {
                    if let Some(cfg) = Self::from_json(&raw) {
                        return cfg;
                    }
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                match serde_json::to_string(self) {
                    Ok(s) => {
                        if store.set_item(STORAGE_KEY, &s).is_err() {
                            log::warn!("could not write {STORAGE_KEY}");
                        }
                    }
                    Err(err) => log::warn!("could not encode view config: {err}"),
                }
            }
        }
    }

    pub fn clear_stored() {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                let _ = store.remove_item(STORAGE_KEY);
            }
        }
    }
}
