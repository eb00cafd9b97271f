//! One-shot fetches of the score file and the country outlines.

use formats::{COUNTRY_DATA_PATH, CountryCollection, CountryData};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;

/// Fetch `./assets/data.json` once. Transport and decoding errors are
/// returned as-is; there is no retry and no caching.
pub async fn fetch_country_data() -> Result<CountryData, gloo_net::Error> {
    fetch_json(COUNTRY_DATA_PATH).await
}

pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, gloo_net::Error> {
    Request::get(url).send().await?.json::<T>().await
}

pub async fn fetch_geography(url: &str) -> Result<CountryCollection, JsValue> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let text = resp
        .text()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    CountryCollection::from_geojson_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Completion state of the score fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DataLoad {
    #[default]
    Pending,
    Loaded(CountryData),
    Failed(String),
}

impl DataLoad {
    pub fn loaded(&self) -> Option<&CountryData> {
        match self {
            DataLoad::Loaded(data) => Some(data),
            DataLoad::Pending | DataLoad::Failed(_) => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, DataLoad::Loaded(_))
    }
}

/// What the view has to paint after a fetch completes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Paint {
    /// Nothing visible changed.
    Nothing,
    /// Outlines exist; refresh their fills from the new scores.
    Fills,
    /// Draw the country paths, with whatever scores are loaded.
    Countries,
    /// The result belongs to an earlier mount and was dropped.
    Stale,
}

/// Both one-shot fetches of one mount. Either may finish first; each
/// arrival reports what has to be painted so the final picture is the same
/// in both orders.
#[derive(Debug, Default)]
pub struct LoadState {
    generation: u64,
    data: DataLoad,
    geography: Option<CountryCollection>,
}

impl LoadState {
    /// Forget both results and start a new mount. Returns the generation
    /// its fetches must report back with.
    pub fn restart(&mut self) -> u64 {
        self.generation += 1;
        self.data = DataLoad::Pending;
        self.geography = None;
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn data(&self) -> &DataLoad {
        &self.data
    }

    /// Scores, once loaded.
    pub fn scores(&self) -> Option<&CountryData> {
        self.data.loaded()
    }

    pub fn geography(&self) -> Option<&CountryCollection> {
        self.geography.as_ref()
    }

    pub fn data_arrived(&mut self, generation: u64, load: DataLoad) -> Paint {
        if generation != self.generation {
            return Paint::Stale;
        }
        self.data = load;
        if self.geography.is_some() && self.data.is_loaded() {
            Paint::Fills
        } else {
            Paint::Nothing
        }
    }

    pub fn geography_arrived(&mut self, generation: u64, collection: CountryCollection) -> Paint {
        if generation != self.generation {
            return Paint::Stale;
        }
        self.geography = Some(collection);
        Paint::Countries
    }
}
