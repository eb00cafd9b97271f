use super::{LonLat, SphericalRotation, Vec2, Vec3};

/// Orthographic (view from infinity) projection of the unit sphere.
///
/// Screen coordinates follow SVG conventions: `x` grows to the right and `y`
/// grows downwards. The visible hemisphere is the one facing the viewer after
/// rotation; its outline is a circle of radius `scale` around `translate`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrthographicProjection {
    scale: f64,
    translate: Vec2,
    rotation: SphericalRotation,
}

impl OrthographicProjection {
    pub fn new(scale: f64, translate: Vec2, rotate_deg: [f64; 3]) -> Self {
        Self {
            scale,
            translate,
            rotation: SphericalRotation::from_degrees(rotate_deg),
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    pub fn translate(&self) -> Vec2 {
        self.translate
    }

    pub fn set_translate(&mut self, translate: Vec2) {
        self.translate = translate;
    }

    pub fn rotate(&self) -> [f64; 3] {
        self.rotation.angles_deg()
    }

    pub fn set_rotate(&mut self, rotate_deg: [f64; 3]) {
        self.rotation = SphericalRotation::from_degrees(rotate_deg);
    }

    /// Rotate a geographic position into view space.
    pub fn to_view(&self, p: LonLat) -> Vec3 {
        self.rotation.apply(p.to_unit())
    }

    /// Project a view-space unit vector onto the screen plane, ignoring
    /// whether it faces the viewer.
    pub fn view_to_screen(&self, v: Vec3) -> Vec2 {
        Vec2::new(
            self.translate.x + v.y * self.scale,
            self.translate.y - v.z * self.scale,
        )
    }

    /// Screen position of `p`, or `None` when it lies on the far hemisphere.
    pub fn project(&self, p: LonLat) -> Option<Vec2> {
        let v = self.to_view(p);
        is_visible(v).then(|| self.view_to_screen(v))
    }
}

/// Whether a view-space vector is on the hemisphere facing the viewer.
pub fn is_visible(v: Vec3) -> bool {
    v.x >= 0.0
}

#[cfg(test)]
mod tests {
    use super::OrthographicProjection;
    use crate::math::{LonLat, Vec2};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn globe() -> OrthographicProjection {
        OrthographicProjection::new(400.0, Vec2::new(640.0, 360.0), [0.0, -30.0, 0.0])
    }

    #[test]
    fn rotation_target_lands_on_translate() {
        let p = globe().project(LonLat::new(0.0, 30.0)).expect("visible");
        assert_close(p.x, 640.0, 1e-9);
        assert_close(p.y, 360.0, 1e-9);
    }

    #[test]
    fn north_is_up_and_east_is_right() {
        let proj = OrthographicProjection::new(100.0, Vec2::new(0.0, 0.0), [0.0, 0.0, 0.0]);
        let north = proj.project(LonLat::new(0.0, 90.0)).expect("visible");
        assert_close(north.x, 0.0, 1e-9);
        assert_close(north.y, -100.0, 1e-9);
        let east = proj.project(LonLat::new(90.0, 0.0)).expect("visible");
        assert_close(east.x, 100.0, 1e-9);
        assert_close(east.y, 0.0, 1e-9);
    }

    #[test]
    fn far_side_is_not_projected() {
        assert!(globe().project(LonLat::new(180.0, -30.0)).is_none());
    }

    #[test]
    fn scale_change_moves_points_radially() {
        let mut proj = globe();
        let before = proj.project(LonLat::new(20.0, 10.0)).expect("visible");
        proj.set_scale(800.0);
        let after = proj.project(LonLat::new(20.0, 10.0)).expect("visible");
        assert_close(after.x - 640.0, 2.0 * (before.x - 640.0), 1e-9);
        assert_close(after.y - 360.0, 2.0 * (before.y - 360.0), 1e-9);
    }
}
