//! Zoom factor rules shared by the browser view and the headless renderer.

/// Projection scale at zoom factor 1.
pub const INITIAL_SCALE: f64 = 400.0;

/// Zoom factors at or below this are clamped to it.
pub const MIN_ZOOM: f64 = 0.3;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ZoomOutcome {
    Applied(f64),
    Clamped(f64),
}

impl ZoomOutcome {
    pub fn k(self) -> f64 {
        match self {
            ZoomOutcome::Applied(k) | ZoomOutcome::Clamped(k) => k,
        }
    }

    /// Projection scale for this outcome.
    pub fn scale(self, initial_scale: f64) -> f64 {
        initial_scale * self.k()
    }
}

/// Floor a requested zoom factor at `min_zoom`. There is no upper bound.
pub fn clamp_zoom(k: f64, min_zoom: f64) -> ZoomOutcome {
    if k > min_zoom {
        ZoomOutcome::Applied(k)
    } else {
        ZoomOutcome::Clamped(min_zoom)
    }
}
