//! Projection state and its drag/zoom interaction.
//!
//! Handlers take explicit event values ([`DragEvent`], [`ZoomEvent`]) so the
//! same logic runs from DOM listeners, from JavaScript calls and from tests.

use foundation::math::{OrthographicProjection, Vec2};
use layers::svg::Viewport;
use layers::clamp_zoom;
pub use layers::{INITIAL_SCALE, MIN_ZOOM, ZoomOutcome};

use crate::config::GlobeConfig;

/// Initial `[lambda, phi]` rotation in degrees; tilts the northern hemisphere
/// towards the viewer.
pub const INITIAL_ROTATE_DEG: [f64; 2] = [0.0, -30.0];

/// Degrees of rotation per pixel of drag at scale 1.
pub const DRAG_SENSITIVITY: f64 = 75.0;

/// Pointer movement since the previous drag event, in pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DragEvent {
    pub dx: f64,
    pub dy: f64,
}

/// Requested zoom factor relative to the initial scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ZoomEvent {
    pub k: f64,
}

/// `WheelEvent.deltaMode`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum WheelDeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl WheelDeltaMode {
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => WheelDeltaMode::Line,
            2 => WheelDeltaMode::Page,
            _ => WheelDeltaMode::Pixel,
        }
    }

    fn factor(self) -> f64 {
        match self {
            WheelDeltaMode::Pixel => 0.002,
            WheelDeltaMode::Line => 0.05,
            WheelDeltaMode::Page => 1.0,
        }
    }
}

/// Accumulated zoom factor. Wheel and double-click input scale it
/// exponentially; there is no upper bound.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ZoomTransform {
    k: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self { k: 1.0 }
    }
}

impl ZoomTransform {
    pub fn k(&self) -> f64 {
        self.k
    }

    /// Zoom event for a wheel movement (`deltaY > 0` zooms out).
    pub fn wheel(&self, delta_y: f64, mode: WheelDeltaMode) -> ZoomEvent {
        ZoomEvent {
            k: self.k * 2f64.powf(-delta_y * mode.factor()),
        }
    }

    /// Double-click doubles the zoom factor; with shift it halves it.
    pub fn double_click(&self, shift: bool) -> ZoomEvent {
        ZoomEvent {
            k: if shift { self.k / 2.0 } else { self.k * 2.0 },
        }
    }
}

#[derive(Debug, Clone)]
pub struct GlobeController {
    projection: OrthographicProjection,
    initial_scale: f64,
    sensitivity: f64,
    min_zoom: f64,
    zoom: ZoomTransform,
    dragging: bool,
    last_pos_px: Vec2,
}

impl Default for GlobeController {
    fn default() -> Self {
        Self::new(&GlobeConfig::default(), Viewport::new(1280.0, 720.0))
    }
}

impl GlobeController {
    pub fn new(config: &GlobeConfig, viewport: Viewport) -> Self {
        let [lambda, phi] = config.initial_rotate;
        Self {
            projection: OrthographicProjection::new(
                config.initial_scale,
                viewport.center(),
                [lambda, phi, 0.0],
            ),
            initial_scale: config.initial_scale,
            sensitivity: config.sensitivity,
            min_zoom: config.min_zoom,
            zoom: ZoomTransform::default(),
            dragging: false,
            last_pos_px: Vec2::new(0.0, 0.0),
        }
    }

    pub fn projection(&self) -> &OrthographicProjection {
        &self.projection
    }

    pub fn zoom(&self) -> ZoomTransform {
        self.zoom
    }

    /// Radius of the background disc.
    pub fn globe_radius(&self) -> f64 {
        self.projection.scale()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.projection.set_translate(viewport.center());
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn on_pointer_down(&mut self, pos_px: Vec2) {
        self.dragging = true;
        self.last_pos_px = pos_px;
    }

    /// Drag delta since the last pointer position, while a drag is active.
    pub fn on_pointer_move(&mut self, pos_px: Vec2) -> Option<DragEvent> {
        if !self.dragging {
            return None;
        }
        let delta = pos_px - self.last_pos_px;
        self.last_pos_px = pos_px;
        Some(DragEvent {
            dx: delta.x,
            dy: delta.y,
        })
    }

    pub fn on_pointer_up(&mut self) {
        self.dragging = false;
    }

    /// Rotate by a pixel delta. The angular step shrinks as the globe grows
    /// so that the surface follows the pointer at any zoom.
    pub fn on_drag(&mut self, event: DragEvent) {
        let [lambda, phi, gamma] = self.projection.rotate();
        let k = self.sensitivity / self.projection.scale();
        self.projection
            .set_rotate([lambda + event.dx * k, phi - event.dy * k, gamma]);
    }

    pub fn on_zoom(&mut self, event: ZoomEvent) -> ZoomOutcome {
        let outcome = clamp_zoom(event.k, self.min_zoom);
        self.zoom.k = outcome.k();
        self.projection.set_scale(outcome.scale(self.initial_scale));
        outcome
    }

    pub fn on_wheel(&mut self, delta_y: f64, mode: WheelDeltaMode) -> ZoomOutcome {
        let event = self.zoom.wheel(delta_y, mode);
        self.on_zoom(event)
    }

    pub fn on_double_click(&mut self, shift: bool) -> ZoomOutcome {
        let event = self.zoom.double_click(shift);
        self.on_zoom(event)
    }

    pub fn debug_info(&self) -> String {
        let [lambda, phi, _] = self.projection.rotate();
        format!(
            "rotate: [{lambda:.2}, {phi:.2}]\nscale: {:.1}\nzoom: {:.3}\ndrag: {}",
            self.projection.scale(),
            self.zoom.k,
            self.dragging
        )
    }
}
