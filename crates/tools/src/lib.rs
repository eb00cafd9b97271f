//! Command implementations behind the `globe` binary.

use std::fs;
use std::path::Path;

use formats::{CountryCollection, CountryData};
use foundation::math::OrthographicProjection;
use layers::svg::{Viewport, render_document};
use layers::{
    CountryLayer, DEFAULT_FILL, Details, GlobeStyle, INITIAL_SCALE, MIN_ZOOM, ScoreBucket,
    clamp_zoom, country_score, score_colour, show_details,
};
use serde::Serialize;

pub fn load_country_data(path: &Path) -> Result<CountryData, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
    CountryData::from_json_str(&text).map_err(|e| format!("parse {path:?}: {e}"))
}

pub fn load_geography(path: &Path) -> Result<CountryCollection, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
    CountryCollection::from_geojson_str(&text).map_err(|e| format!("parse {path:?}: {e}"))
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderOptions {
    pub width: f64,
    pub height: f64,
    /// Zoom factor relative to the initial scale; floored like the browser.
    pub zoom: f64,
    /// `[lambda, phi]` in degrees.
    pub rotate: [f64; 2],
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            zoom: 1.0,
            rotate: [0.0, -30.0],
        }
    }
}

/// The same picture the browser draws on first paint, as a standalone SVG.
pub fn render_svg(
    data: Option<&CountryData>,
    geography: &CountryCollection,
    options: RenderOptions,
) -> String {
    let viewport = Viewport::new(options.width, options.height);
    let [lambda, phi] = options.rotate;
    let scale = clamp_zoom(options.zoom, MIN_ZOOM).scale(INITIAL_SCALE);
    let projection = OrthographicProjection::new(scale, viewport.center(), [lambda, phi, 0.0]);
    let layer = CountryLayer::default();
    let paths = layer.extract(geography, data, &projection);
    render_document(
        viewport,
        &projection,
        &GlobeStyle::default(),
        &layer.style,
        &paths,
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupReport {
    pub code: String,
    pub name: String,
    pub known: bool,
    /// Score as displayed on the globe (entitled countries only).
    pub score: Option<f64>,
    pub fill: String,
    /// Omitted when cleared, `null` when withheld, otherwise the text.
    #[serde(skip_serializing_if = "Details::is_cleared", serialize_with = "details_json")]
    pub details: Details,
}

fn details_json<S: serde::Serializer>(details: &Details, serializer: S) -> Result<S::Ok, S::Error> {
    match details {
        Details::Text(text) => serializer.serialize_str(text),
        Details::Cleared | Details::Withheld => serializer.serialize_none(),
    }
}

pub fn lookup(data: &CountryData, code: &str, name: &str) -> LookupReport {
    let score = country_score(Some(data), code);
    let details = show_details(Details::Cleared, Some(data), code, name);
    LookupReport {
        code: code.to_string(),
        name: name.to_string(),
        known: data.get(code).is_some(),
        score,
        fill: score_colour(score).to_string(),
        details,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketCount {
    pub range: &'static str,
    pub colour: &'static str,
    pub countries: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub buckets: Vec<BucketCount>,
    /// Countries drawn with the neutral fill.
    pub neutral: usize,
}

pub fn summarize(data: &CountryData) -> Summary {
    let mut buckets: Vec<BucketCount> = ScoreBucket::ALL
        .iter()
        .map(|b| BucketCount {
            range: b.label(),
            colour: b.colour(),
            countries: 0,
        })
        .collect();
    let mut neutral = 0;

    for (code, _) in data.iter() {
        match ScoreBucket::for_score(country_score(Some(data), code)) {
            Some(bucket) => {
                if let Some(i) = ScoreBucket::ALL.iter().position(|b| *b == bucket) {
                    buckets[i].countries += 1;
                }
            }
            None => neutral += 1,
        }
    }

    Summary {
        total: data.len(),
        buckets,
        neutral,
    }
}

pub fn format_summary(summary: &Summary) -> String {
    let mut out = format!("{} countries\n", summary.total);
    for b in &summary.buckets {
        out.push_str(&format!("  {:<9} {}  {}\n", b.range, b.colour, b.countries));
    }
    out.push_str(&format!("  {:<9} {}  {}\n", "none", DEFAULT_FILL, summary.neutral));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use formats::CountryRecord;

    fn data() -> CountryData {
        CountryData::from_records([
            ("FR", CountryRecord::new(Some(6.2), Some(true))),
            ("DE", CountryRecord::new(Some(1.0), Some(true))),
            ("GB", CountryRecord::new(Some(9.9), Some(true))),
            ("YY", CountryRecord::new(None, Some(false))),
            ("ZZ", CountryRecord::new(Some(12.0), Some(true))),
        ])
    }

    #[test]
    fn lookup_reports_score_fill_and_details() {
        let report = lookup(&data(), "FR", "France");
        assert!(report.known);
        assert_eq!(report.score, Some(6.2));
        assert_eq!(report.fill, "#ffc709");
        assert_eq!(report.details, Details::Text("France: 6.20".to_string()));

        let withheld = lookup(&data(), "YY", "Nope");
        assert_eq!(withheld.details, Details::Withheld);
        assert_eq!(withheld.fill, DEFAULT_FILL);

        let unknown = lookup(&data(), "XX", "Nowhere");
        assert!(!unknown.known);
        assert_eq!(unknown.details, Details::Cleared);
    }

    #[test]
    fn lookup_json_matches_details_encoding() {
        let json = |code, name| serde_json::to_value(lookup(&data(), code, name)).expect("json");

        assert_eq!(json("FR", "France")["details"], serde_json::json!("France: 6.20"));

        let withheld = json("YY", "Nope");
        assert_eq!(withheld.get("details"), Some(&serde_json::Value::Null));

        let cleared = json("XX", "Nowhere");
        assert!(cleared.get("details").is_none());
    }

    #[test]
    fn summary_counts_each_bucket() {
        let summary = summarize(&data());
        assert_eq!(summary.total, 5);
        let counts: Vec<_> = summary.buckets.iter().map(|b| b.countries).collect();
        assert_eq!(counts, vec![1, 0, 1, 1]);
        assert_eq!(summary.neutral, 2);
        assert!(format_summary(&summary).starts_with("5 countries\n"));
    }

    #[test]
    fn render_and_load_from_files() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let data_path = tmp.path().join("data.json");
        let geo_path = tmp.path().join("countries.json");
        std::fs::write(&data_path, r#"{ "FR": { "score": 3, "entitled": true } }"#)
            .expect("write data");
        std::fs::write(
            &geo_path,
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{"ISO_A2":"FR","NAME":"France"},
                 "geometry":{"type":"Polygon","coordinates":[[[-4,43],[7,43],[7,51],[-4,51],[-4,43]]]}}
            ]}"#,
        )
        .expect("write geography");

        let data = load_country_data(&data_path).expect("data");
        let geography = load_geography(&geo_path).expect("geography");
        let svg = render_svg(Some(&data), &geography, RenderOptions::default());
        assert!(svg.contains(r#"width="1260" height="700""#));
        assert!(svg.contains(r##"class="country_FR" d="M"##));
        assert!(svg.contains(r##"fill="#f47721""##));

        assert!(load_country_data(&tmp.path().join("missing.json")).is_err());

        let zoomed_out = render_svg(
            Some(&data),
            &geography,
            RenderOptions {
                zoom: 0.2,
                ..RenderOptions::default()
            },
        );
        assert!(zoomed_out.contains(r#"r="120""#));
        let zoomed_in = render_svg(
            Some(&data),
            &geography,
            RenderOptions {
                zoom: 1.5,
                ..RenderOptions::default()
            },
        );
        assert!(zoomed_in.contains(r#"r="600""#));
    }
}
