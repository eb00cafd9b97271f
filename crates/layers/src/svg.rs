//! Static SVG document for the score globe.

use std::fmt::Write;

use foundation::math::{OrthographicProjection, Vec2};

use crate::countries::CountryPath;
use crate::symbology::{CountryStyle, GlobeStyle};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// The SVG element is this much smaller than the viewport in each direction.
pub const SVG_MARGIN: f64 = 20.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Globe centre. The margin is not subtracted here, so the globe sits
    /// slightly right of and below the centre of the SVG element.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn svg_size(&self) -> (f64, f64) {
        (
            (self.width - SVG_MARGIN).max(0.0),
            (self.height - SVG_MARGIN).max(0.0),
        )
    }
}

pub fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn country_inline_style(style: &CountryStyle) -> String {
    format!("stroke: {}; stroke-width: {}", style.stroke, style.stroke_width)
}

/// Full standalone document: background disc plus one path per country.
pub fn render_document(
    viewport: Viewport,
    projection: &OrthographicProjection,
    globe: &GlobeStyle,
    country_style: &CountryStyle,
    paths: &[CountryPath],
) -> String {
    let (w, h) = viewport.svg_size();
    let c = projection.translate();
    let style = country_inline_style(country_style);

    let mut out = String::new();
    let _ = writeln!(out, r#"<svg xmlns="{SVG_NS}" width="{w}" height="{h}">"#);
    let _ = writeln!(
        out,
        r#"  <circle fill="{}" stroke="{}" stroke-width="{}" cx="{}" cy="{}" r="{}"/>"#,
        globe.fill,
        globe.stroke,
        globe.stroke_width,
        c.x,
        c.y,
        projection.scale()
    );
    out.push_str("  <g>\n    <g class=\"countries\">\n");
    for path in paths {
        let _ = writeln!(
            out,
            r#"      <path class="{}" d="{}" fill="{}" style="{}"><title>{}</title></path>"#,
            escape_xml(&path.class()),
            path.d,
            path.fill,
            style,
            escape_xml(&path.name)
        );
    }
    out.push_str("    </g>\n  </g>\n</svg>\n");
    out
}
