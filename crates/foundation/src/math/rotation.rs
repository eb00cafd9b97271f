use super::Vec3;

/// Three-axis spherical rotation `[lambda, phi, gamma]` in degrees.
///
/// Lambda spins the globe about its polar axis (adds to longitude), phi tilts
/// it towards or away from the viewer and gamma rolls it about the view axis.
/// A rotation of `[-lon, -lat]` brings `(lon, lat)` to the centre of the view.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SphericalRotation {
    angles_deg: [f64; 3],
    cos_lambda: f64,
    sin_lambda: f64,
    cos_phi: f64,
    sin_phi: f64,
    cos_gamma: f64,
    sin_gamma: f64,
}

impl SphericalRotation {
    pub fn from_degrees(angles_deg: [f64; 3]) -> Self {
        let [lambda, phi, gamma] = angles_deg.map(f64::to_radians);
        Self {
            angles_deg,
            cos_lambda: lambda.cos(),
            sin_lambda: lambda.sin(),
            cos_phi: phi.cos(),
            sin_phi: phi.sin(),
            cos_gamma: gamma.cos(),
            sin_gamma: gamma.sin(),
        }
    }

    pub fn angles_deg(&self) -> [f64; 3] {
        self.angles_deg
    }

    /// Rotate a unit vector into view space.
    pub fn apply(&self, v: Vec3) -> Vec3 {
        // Spin about the polar axis first.
        let x = v.x * self.cos_lambda - v.y * self.sin_lambda;
        let y = v.x * self.sin_lambda + v.y * self.cos_lambda;
        let z = v.z;

        let k = z * self.cos_phi + x * self.sin_phi;
        Vec3::new(
            x * self.cos_phi - z * self.sin_phi,
            y * self.cos_gamma - k * self.sin_gamma,
            k * self.cos_gamma + y * self.sin_gamma,
        )
    }
}

impl Default for SphericalRotation {
    fn default() -> Self {
        Self::from_degrees([0.0, 0.0, 0.0])
    }
}
