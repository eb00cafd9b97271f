use formats::{CountryCollection, CountryData, CountryFeature};
use foundation::math::OrthographicProjection;

use crate::details::country_score;
use crate::symbology::{CountryStyle, score_colour};

/// One drawable country: its join key, label, outline and fill.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryPath {
    pub iso_a2: String,
    pub name: String,
    pub d: String,
    pub fill: &'static str,
}

impl CountryPath {
    /// CSS class used to address the path, e.g. `country_FR`.
    pub fn class(&self) -> String {
        country_class(&self.iso_a2)
    }
}

pub fn country_class(iso_a2: &str) -> String {
    format!("country_{iso_a2}")
}

/// Joins country outlines with their scores.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CountryLayer {
    pub style: CountryStyle,
}

impl CountryLayer {
    pub fn new(style: CountryStyle) -> Self {
        Self { style }
    }

    pub fn fill(&self, data: Option<&CountryData>, feature: &CountryFeature) -> &'static str {
        score_colour(country_score(data, &feature.iso_a2))
    }

    pub fn extract(
        &self,
        collection: &CountryCollection,
        data: Option<&CountryData>,
        projection: &OrthographicProjection,
    ) -> Vec<CountryPath> {
        collection
            .features
            .iter()
            .map(|feature| CountryPath {
                iso_a2: feature.iso_a2.clone(),
                name: feature.name.clone(),
                d: feature.geometry.path(projection),
                fill: self.fill(data, feature),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{CountryLayer, country_class};
    use crate::symbology::DEFAULT_FILL;
    use formats::{CountryCollection, CountryData, CountryRecord};
    use foundation::math::{OrthographicProjection, Vec2};

    fn collection() -> CountryCollection {
        CountryCollection::from_geojson_str(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{"ISO_A2":"FR","NAME":"France"},
                 "geometry":{"type":"Polygon","coordinates":[[[-4,43],[7,43],[7,51],[-4,51],[-4,43]]]}},
                {"type":"Feature","properties":{"ISO_A2":"NZ","NAME":"New Zealand"},
                 "geometry":{"type":"Polygon","coordinates":[[[166,-46],[178,-46],[178,-35],[166,-35],[166,-46]]]}}
            ]}"#,
        )
        .expect("parse")
    }

    #[test]
    fn paths_carry_fill_and_class() {
        let data = CountryData::from_records([
            ("FR", CountryRecord::new(Some(8.0), Some(true))),
            ("NZ", CountryRecord::new(Some(1.0), Some(false))),
        ]);
        let projection = OrthographicProjection::new(400.0, Vec2::new(640.0, 360.0), [0.0, -30.0, 0.0]);
        let paths = CountryLayer::default().extract(&collection(), Some(&data), &projection);

        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].class(), "country_FR");
        assert_eq!(paths[0].fill, "#d6e040");
        assert!(!paths[0].d.is_empty());

        // Unentitled and on the far side: neutral fill, nothing to draw.
        assert_eq!(paths[1].fill, DEFAULT_FILL);
        assert!(paths[1].d.is_empty());
    }

    #[test]
    fn missing_data_renders_neutral() {
        let projection = OrthographicProjection::new(400.0, Vec2::new(0.0, 0.0), [0.0, 0.0, 0.0]);
        let paths = CountryLayer::default().extract(&collection(), None, &projection);
        assert!(paths.iter().all(|p| p.fill == DEFAULT_FILL));
        assert_eq!(country_class("-99"), "country_-99");
    }
}
