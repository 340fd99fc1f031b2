//! Constant lookup tables shared by the field matchers.
//!
//! Everything here is immutable and process-wide, so concurrent readers need
//! no synchronization.

/// Similarity scores awarded by the heuristic field matchers (0-100)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchThresholds {
    /// Exact match on the highest-priority field
    pub exact: f64,
    /// Exact match on a lower-priority field (secondary breed, other colors, tags)
    pub exact_secondary: f64,
    /// Substring match either direction on the highest-priority field
    pub contains: f64,
    pub contains_secondary: f64,
    /// Whole-word overlap with the primary breed
    pub token: f64,
    pub token_secondary: f64,
    /// Weak credit for mixed breeds
    pub mixed_breed: f64,
    /// Part of a compound color ("black/tan")
    pub compound_exact: f64,
    pub compound_contains: f64,
    /// Temperament matched through the synonym table
    pub synonym: f64,
    /// One step apart on an ordinal scale (size, age band)
    pub adjacent: f64,
    /// Two steps apart on the size scale
    pub two_steps: f64,
    /// Compatibility flag the shelter never recorded
    pub unknown_compatibility: f64,
}

pub const HEURISTIC_THRESHOLDS: MatchThresholds = MatchThresholds {
    exact: 100.0,
    exact_secondary: 90.0,
    contains: 85.0,
    contains_secondary: 75.0,
    token: 70.0,
    token_secondary: 60.0,
    mixed_breed: 30.0,
    compound_exact: 80.0,
    compound_contains: 70.0,
    synonym: 70.0,
    adjacent: 60.0,
    two_steps: 30.0,
    unknown_compatibility: 50.0,
};

impl Default for MatchThresholds {
    fn default() -> Self {
        HEURISTIC_THRESHOLDS
    }
}

/// Full score for a satisfied boolean check
pub const FULL_SCORE: f64 = 100.0;

/// Query and breed words shorter than this are ignored
pub const MIN_TOKEN_LEN: usize = 3;

/// Breed query that opts out of the mixed-breed fallback
pub const MIXED_BREED_QUERY: &str = "mixed breed";

/// Marker for mixed-breed candidates
pub const MIX_MARKER: &str = "mix";

/// Delimiters for compound color names ("black/tan", "brown-white")
pub const COLOR_DELIMITERS: &[char] = &['/', '-', ','];

pub const HYPOALLERGENIC_MARKER: &str = "hypoallergenic";
pub const NON_SHED_MARKER: &str = "non-shed";
pub const HAIRLESS_MARKER: &str = "hairless";

/// Four-point size scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Size {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl Size {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "small" => Some(Size::Small),
            "medium" => Some(Size::Medium),
            "large" => Some(Size::Large),
            "extra large" | "extra-large" | "extralarge" | "xl" => Some(Size::ExtraLarge),
            _ => None,
        }
    }

    /// Steps between two sizes on the ordinal scale
    pub fn distance(self, other: Size) -> usize {
        (self as usize).abs_diff(other as usize)
    }
}

/// Age group with its bounds in years, lower inclusive and upper exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AgeBand {
    Baby,
    Young,
    Adult,
    Senior,
}

pub const AGE_BANDS: [(AgeBand, f64, f64); 4] = [
    (AgeBand::Baby, 0.0, 1.0),
    (AgeBand::Young, 1.0, 3.0),
    (AgeBand::Adult, 3.0, 8.0),
    (AgeBand::Senior, 8.0, 20.0),
];

impl AgeBand {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "baby" => Some(AgeBand::Baby),
            "young" => Some(AgeBand::Young),
            "adult" => Some(AgeBand::Adult),
            "senior" => Some(AgeBand::Senior),
            _ => None,
        }
    }

    pub fn from_years(years: f64) -> Option<Self> {
        AGE_BANDS
            .iter()
            .find(|(_, min, max)| years >= *min && years < *max)
            .map(|(band, _, _)| *band)
    }

    pub fn distance(self, other: AgeBand) -> usize {
        (self as usize).abs_diff(other as usize)
    }
}

/// Temperament keywords and the traits that count as the same thing
pub const TEMPERAMENT_SYNONYMS: &[(&str, &[&str])] = &[
    ("friendly", &["social", "affectionate", "loving", "sweet", "gentle"]),
    ("active", &["energetic", "playful", "high-energy"]),
    ("calm", &["gentle", "relaxed", "laid-back", "mellow"]),
    ("smart", &["intelligent", "clever", "trainable"]),
    ("protective", &["alert", "watchful", "loyal"]),
    ("independent", &["self-sufficient", "confident"]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_parse() {
        assert_eq!(Size::parse("Small"), Some(Size::Small));
        assert_eq!(Size::parse(" EXTRA LARGE "), Some(Size::ExtraLarge));
        assert_eq!(Size::parse("ExtraLarge"), Some(Size::ExtraLarge));
        assert_eq!(Size::parse("huge"), None);
    }

    #[test]
    fn test_size_distance() {
        assert_eq!(Size::Small.distance(Size::ExtraLarge), 3);
        assert_eq!(Size::Large.distance(Size::Medium), 1);
    }

    #[test]
    fn test_age_band_bounds() {
        assert_eq!(AgeBand::from_years(0.0), Some(AgeBand::Baby));
        assert_eq!(AgeBand::from_years(1.0), Some(AgeBand::Young));
        assert_eq!(AgeBand::from_years(2.9), Some(AgeBand::Young));
        assert_eq!(AgeBand::from_years(8.0), Some(AgeBand::Senior));
        assert_eq!(AgeBand::from_years(20.0), None);
        assert_eq!(AgeBand::from_years(-1.0), None);
    }

    #[test]
    fn test_age_band_labels() {
        assert_eq!(AgeBand::from_label("Senior"), Some(AgeBand::Senior));
        assert_eq!(AgeBand::from_label("puppy"), None);
    }

    #[test]
    fn test_synonym_keys_are_lowercase() {
        for (key, synonyms) in TEMPERAMENT_SYNONYMS {
            assert_eq!(*key, key.to_lowercase());
            assert!(synonyms.iter().all(|s| *s == s.to_lowercase()));
        }
    }
}
