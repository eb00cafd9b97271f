use super::Vec3;

/// Longitude/latitude pair in degrees, as stored in GeoJSON.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LonLat {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl LonLat {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }

    /// Unit vector on the sphere: `x` towards (0, 0), `y` towards (90E, 0),
    /// `z` towards the north pole.
    pub fn to_unit(self) -> Vec3 {
        let lambda = self.lon_deg.to_radians();
        let phi = self.lat_deg.to_radians();
        let cos_phi = phi.cos();
        Vec3::new(cos_phi * lambda.cos(), cos_phi * lambda.sin(), phi.sin())
    }
}
