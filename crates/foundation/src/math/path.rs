//! SVG path data for projected polygons.

use std::fmt::Write;

use super::clip::{ClipVertex, HORIZON_STEP_DEG, clip_ring, horizon_arc};
use super::{LonLat, OrthographicProjection, Vec2};

/// Incremental builder for an SVG `d` attribute.
#[derive(Debug, Default, Clone)]
pub struct PathWriter {
    d: String,
}

impl PathWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: Vec2) {
        self.command('M', p);
    }

    pub fn line_to(&mut self, p: Vec2) {
        self.command('L', p);
    }

    pub fn close(&mut self) {
        self.d.push('Z');
    }

    pub fn finish(self) -> String {
        self.d
    }

    fn command(&mut self, cmd: char, p: Vec2) {
        self.d.push(cmd);
        push_number(&mut self.d, p.x);
        self.d.push(',');
        push_number(&mut self.d, p.y);
    }
}

fn push_number(out: &mut String, value: f64) {
    let mut s = String::new();
    let _ = write!(s, "{value:.3}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        s.truncate(trimmed.len());
    }
    if s == "-0" {
        s = "0".to_string();
    }
    out.push_str(&s);
}

/// Append one closed ring, clipped to the visible hemisphere.
pub fn write_ring(projection: &OrthographicProjection, ring: &[LonLat], out: &mut PathWriter) {
    let view: Vec<_> = ring.iter().map(|p| projection.to_view(*p)).collect();
    let clipped = clip_ring(&view);

    let mut points = Vec::with_capacity(clipped.len());
    for (i, vertex) in clipped.iter().enumerate() {
        points.push(projection.view_to_screen(vertex.position()));
        if let ClipVertex::Exit(exit) = vertex {
            let next = clipped[(i + 1) % clipped.len()].position();
            points.extend(
                horizon_arc(*exit, next, HORIZON_STEP_DEG)
                    .into_iter()
                    .map(|v| projection.view_to_screen(v)),
            );
        }
    }

    if points.len() < 3 {
        return;
    }
    out.move_to(points[0]);
    for p in &points[1..] {
        out.line_to(*p);
    }
    out.close();
}

/// Path data for a polygon given as outer ring followed by holes.
pub fn polygon_path(projection: &OrthographicProjection, rings: &[Vec<LonLat>]) -> String {
    let mut out = PathWriter::new();
    for ring in rings {
        write_ring(projection, ring, &mut out);
    }
    out.finish()
}

pub fn multi_polygon_path(
    projection: &OrthographicProjection,
    polygons: &[Vec<Vec<LonLat>>],
) -> String {
    let mut out = PathWriter::new();
    for rings in polygons {
        for ring in rings {
            write_ring(projection, ring, &mut out);
        }
    }
    out.finish()
}

#[cfg(test)]
mod tests {
    use super::{PathWriter, multi_polygon_path, polygon_path};
    use crate::math::{LonLat, OrthographicProjection, Vec2};

    fn square(lon: f64, lat: f64, half: f64) -> Vec<LonLat> {
        vec![
            LonLat::new(lon - half, lat - half),
            LonLat::new(lon + half, lat - half),
            LonLat::new(lon + half, lat + half),
            LonLat::new(lon - half, lat + half),
            LonLat::new(lon - half, lat - half),
        ]
    }

    fn flat() -> OrthographicProjection {
        OrthographicProjection::new(100.0, Vec2::new(0.0, 0.0), [0.0, 0.0, 0.0])
    }

    #[test]
    fn writer_formats_compact_numbers() {
        let mut w = PathWriter::new();
        w.move_to(Vec2::new(1.0, -0.0001));
        w.line_to(Vec2::new(2.5, 3.12345));
        w.close();
        assert_eq!(w.finish(), "M1,0L2.5,3.123Z");
    }

    #[test]
    fn visible_square_has_four_vertices() {
        let d = polygon_path(&flat(), &[square(0.0, 0.0, 10.0)]);
        assert!(d.starts_with('M'));
        assert_eq!(d.matches('L').count(), 3);
        assert!(d.ends_with('Z'));
    }

    #[test]
    fn far_side_polygon_yields_empty_path() {
        assert!(polygon_path(&flat(), &[square(180.0, 0.0, 10.0)]).is_empty());
    }

    #[test]
    fn straddling_polygon_is_closed_along_horizon() {
        let d = polygon_path(&flat(), &[square(90.0, 0.0, 20.0)]);
        assert!(!d.is_empty());
        // Every emitted point stays inside the globe outline.
        for pair in d.trim_end_matches('Z').split(['M', 'L']).filter(|s| !s.is_empty()) {
            let (x, y) = pair.split_once(',').expect("x,y");
            let x: f64 = x.parse().expect("x");
            let y: f64 = y.parse().expect("y");
            assert!((x * x + y * y).sqrt() <= 100.0 + 1e-3);
        }
    }

    #[test]
    fn multi_polygon_emits_one_subpath_per_ring() {
        let d = multi_polygon_path(
            &flat(),
            &[vec![square(0.0, 0.0, 5.0)], vec![square(30.0, 10.0, 5.0)]],
        );
        assert_eq!(d.matches('M').count(), 2);
        assert_eq!(d.matches('Z').count(), 2);
    }
}
