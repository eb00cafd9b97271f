//! Score lookup and hover detail text.

use formats::CountryData;

/// Detail line shown for the hovered country.
///
/// `Cleared` and `Withheld` both render as no text, but they are kept apart:
/// `Withheld` means the country is known and explicitly not entitled, while
/// `Cleared` means nothing is hovered or the country is unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Details {
    #[default]
    Cleared,
    Text(String),
    Withheld,
}

impl Details {
    pub fn text(&self) -> Option<&str> {
        match self {
            Details::Text(s) => Some(s),
            Details::Cleared | Details::Withheld => None,
        }
    }

    pub fn is_cleared(&self) -> bool {
        matches!(self, Details::Cleared)
    }
}

/// Displayable score for `country_code`: only when the record exists and is
/// entitled. `data` is `None` until the score file has loaded.
pub fn country_score(data: Option<&CountryData>, country_code: &str) -> Option<f64> {
    let record = data?.get(country_code)?;
    if record.entitled == Some(true) {
        record.score
    } else {
        None
    }
}

/// Details after hovering `country_code`.
///
/// A known country with no score that is not explicitly unentitled keeps
/// whatever was shown before.
pub fn show_details(
    current: Details,
    data: Option<&CountryData>,
    country_code: &str,
    country_name: &str,
) -> Details {
    let Some(record) = data.and_then(|d| d.get(country_code)) else {
        return Details::Cleared;
    };

    let mut details = current;
    if let Some(score) = record.score {
        details = Details::Text(format!("{country_name}: {score:.2}"));
    }
    if record.entitled == Some(false) {
        details = Details::Withheld;
    }
    details
}

pub fn clear_details() -> Details {
    Details::Cleared
}

#[cfg(test)]
mod tests {
    use super::{Details, clear_details, country_score, show_details};
    use formats::{CountryData, CountryRecord};

    fn data() -> CountryData {
        CountryData::from_records([
            ("FR", CountryRecord::new(Some(6.2), Some(true))),
            ("DE", CountryRecord::new(Some(3.0), Some(false))),
            ("YY", CountryRecord::new(None, Some(false))),
            ("IT", CountryRecord::new(Some(4.457), None)),
            ("ES", CountryRecord::new(None, Some(true))),
        ])
    }

    #[test]
    fn score_requires_entitlement() {
        let data = data();
        assert_eq!(country_score(Some(&data), "FR"), Some(6.2));
        assert_eq!(country_score(Some(&data), "DE"), None);
        assert_eq!(country_score(Some(&data), "IT"), None);
        assert_eq!(country_score(Some(&data), "XX"), None);
        assert_eq!(country_score(None, "FR"), None);
    }

    #[test]
    fn entitled_country_shows_two_decimals() {
        let d = show_details(Details::Cleared, Some(&data()), "FR", "France");
        assert_eq!(d, Details::Text("France: 6.20".to_string()));
        assert_eq!(d.text(), Some("France: 6.20"));
    }

    #[test]
    fn unknown_country_clears() {
        let shown = Details::Text("France: 6.20".to_string());
        assert_eq!(show_details(shown, Some(&data()), "XX", "Nowhere"), Details::Cleared);
        assert_eq!(show_details(Details::Withheld, None, "FR", "France"), Details::Cleared);
    }

    #[test]
    fn unentitled_country_is_withheld_not_cleared() {
        let d = show_details(Details::Cleared, Some(&data()), "YY", "Nope");
        assert_eq!(d, Details::Withheld);
        assert_eq!(d.text(), None);
        assert!(!d.is_cleared());

        // A score is never shown once entitlement is explicitly false.
        assert_eq!(show_details(Details::Cleared, Some(&data()), "DE", "Germany"), Details::Withheld);
    }

    #[test]
    fn missing_entitlement_still_shows_score_text() {
        let d = show_details(Details::Cleared, Some(&data()), "IT", "Italy");
        assert_eq!(d, Details::Text("Italy: 4.46".to_string()));
    }

    #[test]
    fn scoreless_entitled_country_keeps_previous_text() {
        let shown = Details::Text("France: 6.20".to_string());
        assert_eq!(show_details(shown.clone(), Some(&data()), "ES", "Spain"), shown);
        assert_eq!(clear_details(), Details::Cleared);
    }
}
