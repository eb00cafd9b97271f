use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Relative URL the view fetches country scores from.
pub const COUNTRY_DATA_PATH: &str = "./assets/data.json";

/// Per-country score entry from `data.json`.
///
/// Both fields are optional: a record may omit the score or the entitlement
/// flag and still be a known country.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryRecord {
    pub score: Option<f64>,
    pub entitled: Option<bool>,
}

impl CountryRecord {
    pub fn new(score: Option<f64>, entitled: Option<bool>) -> Self {
        Self { score, entitled }
    }

    fn from_value(value: &Value) -> Self {
        Self {
            score: value.get("score").and_then(Value::as_f64),
            entitled: value.get("entitled").and_then(Value::as_bool),
        }
    }
}

/// Immutable snapshot of all country records keyed by ISO 3166-1 alpha-2 code.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct CountryData {
    records: BTreeMap<String, CountryRecord>,
}

#[derive(Debug)]
pub enum CountryDataError {
    Json(serde_json::Error),
    NotAnObject,
}

impl std::fmt::Display for CountryDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CountryDataError::Json(e) => write!(f, "JSON parse error: {e}"),
            CountryDataError::NotAnObject => {
                write!(f, "expected an object keyed by country code")
            }
        }
    }
}

impl std::error::Error for CountryDataError {}

impl From<serde_json::Error> for CountryDataError {
    fn from(e: serde_json::Error) -> Self {
        CountryDataError::Json(e)
    }
}

impl CountryData {
    pub fn from_records<I, K>(records: I) -> Self
    where
        I: IntoIterator<Item = (K, CountryRecord)>,
        K: Into<String>,
    {
        Self {
            records: records.into_iter().map(|(k, r)| (k.into(), r)).collect(),
        }
    }

    pub fn from_json_str(payload: &str) -> Result<Self, CountryDataError> {
        let value: Value = serde_json::from_str(payload)?;
        Self::from_json_value(value)
    }

    /// Falsy entries (`null`, `false`, `0`, `""`) are treated as unknown
    /// countries. Any other entry is a known country; fields with the wrong
    /// type read as absent.
    pub fn from_json_value(value: Value) -> Result<Self, CountryDataError> {
        let Value::Object(map) = value else {
            return Err(CountryDataError::NotAnObject);
        };

        let records = map
            .into_iter()
            .filter(|(_, v)| !is_falsy(v))
            .map(|(code, v)| {
                let record = CountryRecord::from_value(&v);
                (code, record)
            })
            .collect();
        Ok(Self { records })
    }

    pub fn get(&self, country_code: &str) -> Option<&CountryRecord> {
        self.records.get(country_code)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CountryRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64().is_some_and(|n| n == 0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

impl TryFrom<Value> for CountryData {
    type Error = CountryDataError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json_value(value)
    }
}
