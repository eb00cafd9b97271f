//! Clipping of spherical rings against the visible hemisphere.
//!
//! Rings are clipped in view space (see [`SphericalRotation`](super::SphericalRotation))
//! against the plane `x = 0`. Crossing points are pushed onto the horizon
//! circle so that they project exactly onto the globe outline.

use super::Vec3;

/// Default angular step when walking along the horizon between an exit and
/// the following entry point.
pub const HORIZON_STEP_DEG: f64 = 4.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ClipVertex {
    /// Original vertex on the visible side.
    Inside(Vec3),
    /// Ring leaves the visible hemisphere here.
    Exit(Vec3),
    /// Ring re-enters the visible hemisphere here.
    Entry(Vec3),
}

impl ClipVertex {
    pub fn position(self) -> Vec3 {
        match self {
            ClipVertex::Inside(v) | ClipVertex::Exit(v) | ClipVertex::Entry(v) => v,
        }
    }
}

/// Clip a closed ring of view-space unit vectors. A repeated closing vertex
/// is ignored. The result is empty when nothing of the ring is visible.
pub fn clip_ring(ring: &[Vec3]) -> Vec<ClipVertex> {
    let ring = match ring {
        [first, .., last] if first == last => &ring[..ring.len() - 1],
        _ => ring,
    };
    let Some(&last) = ring.last() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(ring.len() + 2);
    let mut prev = last;
    for &cur in ring {
        let prev_in = inside(prev);
        let cur_in = inside(cur);
        match (prev_in, cur_in) {
            (true, true) => out.push(ClipVertex::Inside(cur)),
            (false, true) => {
                out.push(ClipVertex::Entry(horizon_crossing(prev, cur)));
                out.push(ClipVertex::Inside(cur));
            }
            (true, false) => out.push(ClipVertex::Exit(horizon_crossing(prev, cur))),
            (false, false) => {}
        }
        prev = cur;
    }
    out
}

/// Points strictly between `from` and `to` along the shorter horizon arc.
pub fn horizon_arc(from: Vec3, to: Vec3, step_deg: f64) -> Vec<Vec3> {
    let a = from.z.atan2(from.y);
    let b = to.z.atan2(to.y);
    let mut delta = b - a;
    if delta > std::f64::consts::PI {
        delta -= std::f64::consts::TAU;
    } else if delta < -std::f64::consts::PI {
        delta += std::f64::consts::TAU;
    }

    let step = step_deg.max(0.1).to_radians();
    let n = (delta.abs() / step).ceil() as usize;
    (1..n)
        .map(|i| {
            let t = a + delta * (i as f64 / n as f64);
            Vec3::new(0.0, t.cos(), t.sin())
        })
        .collect()
}

fn inside(v: Vec3) -> bool {
    super::orthographic::is_visible(v)
}

fn horizon_crossing(a: Vec3, b: Vec3) -> Vec3 {
    let t = a.x / (a.x - b.x);
    let p = a.lerp(b, t);
    Vec3::new(0.0, p.y, p.z).normalize()
}

#[cfg(test)]
mod tests {
    use super::{ClipVertex, clip_ring, horizon_arc};
    use crate::math::Vec3;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn v(x: f64, y: f64, z: f64) -> Vec3 {
        Vec3::new(x, y, z).normalize()
    }

    #[test]
    fn fully_visible_ring_is_unchanged() {
        let ring = vec![v(1.0, 0.1, 0.1), v(1.0, -0.1, 0.1), v(1.0, 0.0, -0.1), v(1.0, 0.1, 0.1)];
        let out = clip_ring(&ring);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|c| matches!(c, ClipVertex::Inside(_))));
    }

    #[test]
    fn hidden_ring_is_dropped() {
        let ring = vec![v(-1.0, 0.1, 0.1), v(-1.0, -0.1, 0.1), v(-1.0, 0.0, -0.1)];
        assert!(clip_ring(&ring).is_empty());
    }

    #[test]
    fn crossing_ring_gets_exit_then_entry_on_horizon() {
        let ring = vec![v(1.0, 0.0, 0.5), v(-1.0, 0.0, 0.5), v(-1.0, 0.0, -0.5), v(1.0, 0.0, -0.5)];
        let out = clip_ring(&ring);
        let kinds: Vec<_> = out
            .iter()
            .map(|c| match c {
                ClipVertex::Inside(_) => 'i',
                ClipVertex::Exit(_) => 'x',
                ClipVertex::Entry(_) => 'e',
            })
            .collect();
        assert_eq!(kinds, vec!['i', 'x', 'e', 'i']);
        for c in &out[1..3] {
            let p = c.position();
            assert_close(p.x, 0.0, 1e-12);
            assert_close(p.y * p.y + p.z * p.z, 1.0, 1e-12);
        }
    }

    #[test]
    fn horizon_arc_takes_the_short_way() {
        let from = Vec3::new(0.0, 1.0, 0.0);
        let to = Vec3::new(0.0, 0.0, 1.0);
        let arc = horizon_arc(from, to, 10.0);
        assert_eq!(arc.len(), 8);
        assert!(arc.iter().all(|p| p.y > 0.0 && p.z > 0.0));
    }
}
