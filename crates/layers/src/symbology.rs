//! Fill colours and stroke styles for the score globe.

/// Neutral fill for countries without a displayable score.
pub const DEFAULT_FILL: &str = "LightGray";

/// Scores above this are treated as invalid and get the default fill.
pub const MAX_SCORE: f64 = 10.0;

/// Four fixed score bands. Each band includes its upper bound, so a score of
/// exactly 2.5 is [`ScoreBucket::Low`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScoreBucket {
    Low,
    Moderate,
    Elevated,
    High,
}

impl ScoreBucket {
    pub const ALL: [ScoreBucket; 4] = [
        ScoreBucket::Low,
        ScoreBucket::Moderate,
        ScoreBucket::Elevated,
        ScoreBucket::High,
    ];

    /// `None` for missing, NaN and above-range scores.
    pub fn for_score(score: Option<f64>) -> Option<Self> {
        let score = score?;
        if score.is_nan() || score > MAX_SCORE {
            return None;
        }
        Some(if score <= 2.5 {
            ScoreBucket::Low
        } else if score <= 5.0 {
            ScoreBucket::Moderate
        } else if score <= 7.5 {
            ScoreBucket::Elevated
        } else {
            ScoreBucket::High
        })
    }

    pub const fn colour(self) -> &'static str {
        match self {
            ScoreBucket::Low => "#ce181f",
            ScoreBucket::Moderate => "#f47721",
            ScoreBucket::Elevated => "#ffc709",
            ScoreBucket::High => "#d6e040",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ScoreBucket::Low => "0 - 2.5",
            ScoreBucket::Moderate => "2.5 - 5",
            ScoreBucket::Elevated => "5 - 7.5",
            ScoreBucket::High => "7.5 - 10",
        }
    }
}

/// Fill colour for a score, falling back to [`DEFAULT_FILL`].
pub fn score_colour(score: Option<f64>) -> &'static str {
    score_colour_or(score, DEFAULT_FILL)
}

pub fn score_colour_or(score: Option<f64>, default: &str) -> &str {
    ScoreBucket::for_score(score).map_or(default, |bucket| bucket.colour())
}

/// Presentation attributes shared by every country path.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CountryStyle {
    pub stroke: &'static str,
    pub stroke_width: f32,
}

impl Default for CountryStyle {
    fn default() -> Self {
        Self {
            stroke: "black",
            stroke_width: 0.3,
        }
    }
}

/// Background disc drawn behind the countries.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlobeStyle {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub stroke_width: f32,
}

impl Default for GlobeStyle {
    fn default() -> Self {
        Self {
            fill: "#ADD8E6",
            stroke: "#000",
            stroke_width: 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_FILL, ScoreBucket, score_colour, score_colour_or};

    #[test]
    fn invalid_scores_use_default() {
        assert_eq!(score_colour(None), DEFAULT_FILL);
        assert_eq!(score_colour(Some(f64::NAN)), DEFAULT_FILL);
        assert_eq!(score_colour(Some(10.0001)), DEFAULT_FILL);
        assert_eq!(score_colour(Some(f64::INFINITY)), DEFAULT_FILL);
        assert_eq!(score_colour_or(Some(11.0), "white"), "white");
    }

    #[test]
    fn bucket_bounds_are_inclusive_at_the_top() {
        assert_eq!(score_colour(Some(2.5)), "#ce181f");
        assert_eq!(score_colour(Some(2.5001)), "#f47721");
        assert_eq!(score_colour(Some(5.0)), "#f47721");
        assert_eq!(score_colour(Some(7.5)), "#ffc709");
        assert_eq!(score_colour(Some(7.5001)), "#d6e040");
        assert_eq!(score_colour(Some(10.0)), "#d6e040");
    }

    #[test]
    fn negative_scores_fall_in_lowest_bucket() {
        assert_eq!(ScoreBucket::for_score(Some(-3.0)), Some(ScoreBucket::Low));
        assert_eq!(score_colour(Some(f64::NEG_INFINITY)), "#ce181f");
    }
}
