use foundation::math::{LonLat, OrthographicProjection, multi_polygon_path, polygon_path};
use serde_json::{Map, Value};

/// Relative URL of the Natural Earth 1:110m country boundaries.
pub const GEOGRAPHY_PATH: &str = "assets/ne_110m_admin_0_countries.json";

#[derive(Debug, Clone, PartialEq)]
pub enum CountryGeometry {
    Polygon(Vec<Vec<LonLat>>),
    MultiPolygon(Vec<Vec<Vec<LonLat>>>),
}

impl CountryGeometry {
    /// SVG path data for this geometry under `projection`.
    pub fn path(&self, projection: &OrthographicProjection) -> String {
        match self {
            CountryGeometry::Polygon(rings) => polygon_path(projection, rings),
            CountryGeometry::MultiPolygon(polys) => multi_polygon_path(projection, polys),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryFeature {
    /// `ISO_A2` property; Natural Earth uses `-99` for disputed areas.
    pub iso_a2: String,
    /// `NAME` property.
    pub name: String,
    pub geometry: CountryGeometry,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryCollection {
    pub features: Vec<CountryFeature>,
    /// Features without an area geometry; they are not drawn.
    pub skipped: usize,
}

#[derive(Debug)]
pub enum GeographyError {
    Json(serde_json::Error),
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for GeographyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeographyError::Json(e) => write!(f, "JSON parse error: {e}"),
            GeographyError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            GeographyError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for GeographyError {}

impl From<serde_json::Error> for GeographyError {
    fn from(e: serde_json::Error) -> Self {
        GeographyError::Json(e)
    }
}

impl CountryCollection {
    pub fn from_geojson_str(payload: &str) -> Result<Self, GeographyError> {
        let value: Value = serde_json::from_str(payload)?;
        Self::from_geojson_value(value)
    }

    pub fn from_geojson_value(value: Value) -> Result<Self, GeographyError> {
        let obj = value
            .as_object()
            .ok_or(GeographyError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(GeographyError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(GeographyError::NotAFeatureCollection);
        }

        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(GeographyError::NotAFeatureCollection)?;

        let mut out = CountryCollection {
            features: Vec::with_capacity(features_val.len()),
            skipped: 0,
        };
        for (index, feat_val) in features_val.iter().enumerate() {
            let feat_obj = feat_val
                .as_object()
                .ok_or(GeographyError::InvalidFeature {
                    index,
                    reason: "feature must be an object".to_string(),
                })?;

            let properties = feat_obj
                .get("properties")
                .and_then(|v| v.as_object())
                .cloned()
                .unwrap_or_default();

            let geometry = match feat_obj.get("geometry") {
                Some(Value::Object(g)) => parse_geometry(g)
                    .map_err(|reason| GeographyError::InvalidFeature { index, reason })?,
                _ => None,
            };
            let Some(geometry) = geometry else {
                out.skipped += 1;
                continue;
            };

            out.features.push(CountryFeature {
                iso_a2: string_property(&properties, "ISO_A2"),
                name: string_property(&properties, "NAME"),
                geometry,
            });
        }

        Ok(out)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn find(&self, iso_a2: &str) -> Option<&CountryFeature> {
        self.features.iter().find(|f| f.iso_a2 == iso_a2)
    }
}

fn string_property(properties: &Map<String, Value>, key: &str) -> String {
    match properties.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// `Ok(None)` for geometry types that carry no area.
fn parse_geometry(obj: &Map<String, Value>) -> Result<Option<CountryGeometry>, String> {
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "geometry missing type".to_string())?;
    let coords = obj.get("coordinates");

    match ty {
        "Polygon" => {
            let coords = coords.ok_or_else(|| "Polygon missing coordinates".to_string())?;
            Ok(Some(CountryGeometry::Polygon(parse_rings(coords)?)))
        }
        "MultiPolygon" => {
            let coords = coords.ok_or_else(|| "MultiPolygon missing coordinates".to_string())?;
            let polys = coords
                .as_array()
                .ok_or_else(|| "MultiPolygon coordinates must be an array".to_string())?
                .iter()
                .map(parse_rings)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Some(CountryGeometry::MultiPolygon(polys)))
        }
        _ => Ok(None),
    }
}

fn parse_rings(value: &Value) -> Result<Vec<Vec<LonLat>>, String> {
    value
        .as_array()
        .ok_or_else(|| "polygon must be an array of rings".to_string())?
        .iter()
        .map(|ring| {
            ring.as_array()
                .ok_or_else(|| "ring must be an array of positions".to_string())?
                .iter()
                .map(parse_position)
                .collect::<Result<Vec<_>, _>>()
        })
        .collect()
}

fn parse_position(value: &Value) -> Result<LonLat, String> {
    let arr = value
        .as_array()
        .ok_or_else(|| "position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have at least 2 elements".to_string());
    }
    let lon = arr[0]
        .as_f64()
        .ok_or_else(|| "position lon must be a number".to_string())?;
    let lat = arr[1]
        .as_f64()
        .ok_or_else(|| "position lat must be a number".to_string())?;
    Ok(LonLat::new(lon, lat))
}

#[cfg(test)]
mod tests {
    use super::{CountryCollection, CountryGeometry, GeographyError};
    use foundation::math::{OrthographicProjection, Vec2};

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "ISO_A2": "FR", "NAME": "France" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-4.5, 43.0], [7.5, 43.0], [7.5, 51.0], [-4.5, 51.0], [-4.5, 43.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "ISO_A2": "JP", "NAME": "Japan" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[130.0, 31.0], [132.0, 31.0], [132.0, 34.0], [130.0, 31.0]]],
                        [[[139.0, 35.0], [141.0, 35.0], [141.0, 41.0], [139.0, 35.0]]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": { "ISO_A2": "-99", "NAME": "Nowhere" },
                "geometry": null
            }
        ]
    }"#;

    #[test]
    fn parses_countries_and_skips_empty_geometry() {
        let collection = CountryCollection::from_geojson_str(SAMPLE).expect("parse");
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.skipped, 1);

        let france = collection.find("FR").expect("FR");
        assert_eq!(france.name, "France");
        assert!(matches!(&france.geometry, CountryGeometry::Polygon(r) if r[0].len() == 5));

        let japan = collection.find("JP").expect("JP");
        assert!(matches!(&japan.geometry, CountryGeometry::MultiPolygon(p) if p.len() == 2));
    }

    #[test]
    fn geometry_path_follows_projection() {
        let collection = CountryCollection::from_geojson_str(SAMPLE).expect("parse");
        let facing_europe =
            OrthographicProjection::new(400.0, Vec2::new(500.0, 400.0), [0.0, -30.0, 0.0]);
        let d = collection.find("FR").expect("FR").geometry.path(&facing_europe);
        assert!(d.starts_with('M') && d.ends_with('Z'));

        let facing_pacific =
            OrthographicProjection::new(400.0, Vec2::new(500.0, 400.0), [-180.0, 30.0, 0.0]);
        assert!(collection.find("FR").expect("FR").geometry.path(&facing_pacific).is_empty());
    }

    #[test]
    fn rejects_other_roots() {
        let err = CountryCollection::from_geojson_str(r#"{"type":"Feature"}"#).unwrap_err();
        assert!(matches!(err, GeographyError::NotAFeatureCollection));

        let err = CountryCollection::from_geojson_str(
            r#"{"type":"FeatureCollection","features":[{"type":"Feature","geometry":{"type":"Polygon","coordinates":[[[1]]]}}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, GeographyError::InvalidFeature { index: 0, .. }));
    }

    #[test]
    fn syntax_errors_are_not_blamed_on_a_feature() {
        let err = CountryCollection::from_geojson_str(r#"{"type":"FeatureCollection","#).unwrap_err();
        assert!(matches!(err, GeographyError::Json(_)));
        assert!(err.to_string().starts_with("JSON parse error"));
    }
}
