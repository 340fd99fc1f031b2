use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Shelter animal record as consumed by the matcher
///
/// Categorical fields are `None` when the source has no data. Empty or
/// whitespace-only strings are read as `None` so they never take part in
/// matching. So is a value of the wrong shape in any field except `id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalRecord {
    pub id: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub breed: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub breed_secondary: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_mixed: bool,
    #[serde(default, deserialize_with = "non_empty")]
    pub size: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub color_secondary: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub color_tertiary: Option<String>,
    #[serde(default, deserialize_with = "non_empty_age")]
    pub age: Option<AgeValue>,
    #[serde(default, deserialize_with = "non_empty")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub coat: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub temperament: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub attributes: Attributes,
    #[serde(default, deserialize_with = "string_or_list")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub environment: Environment,
    #[serde(default, deserialize_with = "non_empty")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub photos: Vec<Photo>,
    #[serde(default, deserialize_with = "lenient")]
    pub primary_photo: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub adoption_fee: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient")]
    pub status_changed_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient")]
    pub distance: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub shelter: Option<Shelter>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
}

impl AnimalRecord {
    /// Primary, secondary and tertiary colors that are present, in that order
    pub fn colors(&self) -> Vec<&str> {
        [&self.color, &self.color_secondary, &self.color_tertiary]
            .into_iter()
            .filter_map(|c| c.as_deref())
            .collect()
    }
}

/// Age as either a group label ("Young") or a number of years
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgeValue {
    Years(f64),
    Label(String),
}

impl fmt::Display for AgeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeValue::Years(years) => write!(f, "{}", years),
            AgeValue::Label(label) => f.write_str(label),
        }
    }
}

impl From<&str> for AgeValue {
    fn from(value: &str) -> Self {
        AgeValue::Label(value.to_string())
    }
}

impl From<f64> for AgeValue {
    fn from(value: f64) -> Self {
        AgeValue::Years(value)
    }
}

/// Tri-state compatibility flag: known yes, known no, or no information
///
/// Serialized as `true`, `false` or `null`. Anything other than a boolean
/// reads as `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Option<bool>")]
pub enum Compatibility {
    Yes,
    No,
    #[default]
    Unknown,
}

impl From<Option<bool>> for Compatibility {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Compatibility::Yes,
            Some(false) => Compatibility::No,
            None => Compatibility::Unknown,
        }
    }
}

impl From<Value> for Compatibility {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(flag) => Compatibility::from(Some(flag)),
            _ => Compatibility::Unknown,
        }
    }
}

impl From<Compatibility> for Option<bool> {
    fn from(value: Compatibility) -> Self {
        match value {
            Compatibility::Yes => Some(true),
            Compatibility::No => Some(false),
            Compatibility::Unknown => None,
        }
    }
}

/// Household compatibility
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(default)]
    pub children: Compatibility,
    #[serde(default)]
    pub dogs: Compatibility,
    #[serde(default)]
    pub cats: Compatibility,
}

/// Care attributes reported by the shelter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attributes {
    pub spayed_neutered: bool,
    pub house_trained: bool,
    pub declawed: bool,
    pub special_needs: bool,
    pub shots_current: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
    pub full: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shelter {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Address,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
}

/// Sparse trait query
///
/// Every key is optional; an absent key means "no preference". Deserializing
/// goes through the query normalizer, which drops empty values and values of
/// the wrong shape instead of rejecting the whole query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "serde_json::Value")]
pub struct TraitQuery {
    pub breed: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub age: Option<AgeValue>,
    pub gender: Option<String>,
    pub coat: Option<String>,
    pub temperament: Option<String>,
    #[serde(rename = "wantsGoodWithKids")]
    pub good_with_kids: Option<bool>,
    #[serde(rename = "wantsGoodWithDogs")]
    pub good_with_dogs: Option<bool>,
    #[serde(rename = "wantsGoodWithCats")]
    pub good_with_cats: Option<bool>,
    pub house_trained: bool,
    pub hypoallergenic: bool,
    pub non_shed: bool,
    pub search_text: Option<String>,
}

impl TraitQuery {
    /// Whether any compatibility check was requested
    pub fn wants_environment(&self) -> bool {
        self.good_with_kids.is_some() || self.good_with_dogs.is_some() || self.good_with_cats.is_some()
    }

    /// Whether any special attribute was requested
    pub fn wants_special(&self) -> bool {
        self.house_trained || self.hypoallergenic || self.non_shed
    }
}

/// One scoring axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Breed,
    Size,
    Color,
    Age,
    Gender,
    Coat,
    Temperament,
    Environment,
    Special,
    TextSearch,
}

impl Dimension {
    pub const ALL: [Dimension; 10] = [
        Dimension::Breed,
        Dimension::Size,
        Dimension::Color,
        Dimension::Age,
        Dimension::Gender,
        Dimension::Coat,
        Dimension::Temperament,
        Dimension::Environment,
        Dimension::Special,
        Dimension::TextSearch,
    ];
}

/// Per-dimension similarity scores (0-100), kept for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub breed: f64,
    pub size: f64,
    pub color: f64,
    pub age: f64,
    pub gender: f64,
    pub coat: f64,
    pub temperament: f64,
    pub environment: f64,
    pub special: f64,
    pub text_search: f64,
}

impl ScoreBreakdown {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Breed => self.breed,
            Dimension::Size => self.size,
            Dimension::Color => self.color,
            Dimension::Age => self.age,
            Dimension::Gender => self.gender,
            Dimension::Coat => self.coat,
            Dimension::Temperament => self.temperament,
            Dimension::Environment => self.environment,
            Dimension::Special => self.special,
            Dimension::TextSearch => self.text_search,
        }
    }
}

/// Scored match result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: AnimalRecord,
    pub score: u8,
    pub match_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_breakdown: Option<ScoreBreakdown>,
}

/// Scoring weights, one per dimension
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub breed: f64,
    pub size: f64,
    pub color: f64,
    pub age: f64,
    pub gender: f64,
    pub coat: f64,
    pub temperament: f64,
    pub environment: f64,
    pub special: f64,
    pub text_search: f64,
}

impl ScoringWeights {
    pub fn weight(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Breed => self.breed,
            Dimension::Size => self.size,
            Dimension::Color => self.color,
            Dimension::Age => self.age,
            Dimension::Gender => self.gender,
            Dimension::Coat => self.coat,
            Dimension::Temperament => self.temperament,
            Dimension::Environment => self.environment,
            Dimension::Special => self.special,
            Dimension::TextSearch => self.text_search,
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            breed: 25.0,
            size: 15.0,
            color: 10.0,
            age: 12.0,
            gender: 8.0,
            coat: 8.0,
            temperament: 12.0,
            environment: 10.0,
            special: 5.0,
            text_search: 15.0,
        }
    }
}

pub(crate) fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::String(_) | Value::Null => None,
        other => {
            tracing::debug!("Ignoring non-string record value: {}", other);
            None
        }
    })
}

pub(crate) fn non_empty_age<'de, D>(deserializer: D) -> Result<Option<AgeValue>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(label) if !label.trim().is_empty() => Some(AgeValue::Label(label)),
        Value::Number(n) => n.as_f64().filter(|years| years.is_finite()).map(AgeValue::Years),
        Value::String(_) | Value::Null => None,
        other => {
            tracing::debug!("Ignoring unusable record age: {}", other);
            None
        }
    })
}

/// Accepts either a single string or a list of strings
///
/// Non-string list items are skipped.
pub(crate) fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::String(item) => vec![item],
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Value::Null => Vec::new(),
        other => {
            tracing::debug!("Ignoring non-list record value: {}", other);
            Vec::new()
        }
    };

    Ok(items.into_iter().filter(|s| !s.trim().is_empty()).collect())
}

/// Falls back to `T::default()` when the value has the wrong shape
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::debug!("Ignoring malformed record value: {}", e);
        T::default()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_strings_read_as_absent() {
        let record: AnimalRecord = serde_json::from_value(json!({
            "id": "1",
            "breed": "Beagle",
            "breedSecondary": "",
            "coat": "   ",
            "age": ""
        }))
        .unwrap();

        assert_eq!(record.breed.as_deref(), Some("Beagle"));
        assert!(record.breed_secondary.is_none());
        assert!(record.coat.is_none());
        assert!(record.age.is_none());
    }

    #[test]
    fn test_environment_tri_state() {
        let record: AnimalRecord = serde_json::from_value(json!({
            "id": "1",
            "environment": { "children": true, "dogs": false, "cats": null }
        }))
        .unwrap();

        assert_eq!(record.environment.children, Compatibility::Yes);
        assert_eq!(record.environment.dogs, Compatibility::No);
        assert_eq!(record.environment.cats, Compatibility::Unknown);

        let out = serde_json::to_value(&record.environment).unwrap();
        assert_eq!(out, json!({ "children": true, "dogs": false, "cats": null }));
    }

    #[test]
    fn test_age_label_or_number() {
        let labeled: AnimalRecord = serde_json::from_value(json!({ "id": "1", "age": "Young" })).unwrap();
        let numeric: AnimalRecord = serde_json::from_value(json!({ "id": "2", "age": 2 })).unwrap();

        assert_eq!(labeled.age, Some(AgeValue::Label("Young".to_string())));
        assert_eq!(numeric.age, Some(AgeValue::Years(2.0)));
        assert_eq!(AgeValue::Years(2.0).to_string(), "2");
    }

    #[test]
    fn test_malformed_optional_fields_read_as_absent() {
        let record: AnimalRecord = serde_json::from_value(json!({
            "id": "7",
            "breed": "Beagle",
            "coat": 5,
            "age": true,
            "tags": [1, 2],
            "temperament": { "calm": true },
            "environment": { "children": "unknown", "dogs": true },
            "attributes": "house-trained",
            "isMixed": "yes",
            "distance": "far",
            "shelter": 42
        }))
        .unwrap();

        assert_eq!(record.breed.as_deref(), Some("Beagle"));
        assert!(record.coat.is_none());
        assert!(record.age.is_none());
        assert!(record.tags.is_empty());
        assert!(record.temperament.is_empty());
        assert_eq!(record.environment.children, Compatibility::Unknown);
        assert_eq!(record.environment.dogs, Compatibility::Yes);
        assert_eq!(record.attributes, Attributes::default());
        assert!(!record.is_mixed);
        assert!(record.distance.is_none());
        assert!(record.shelter.is_none());
    }

    #[test]
    fn test_list_keeps_string_items() {
        let record: AnimalRecord =
            serde_json::from_value(json!({ "id": "1", "tags": ["Quiet", 3, "", "Crate-trained"] })).unwrap();
        assert_eq!(record.tags, vec!["Quiet", "Crate-trained"]);
    }

    #[test]
    fn test_id_stays_required() {
        assert!(serde_json::from_value::<AnimalRecord>(json!({ "breed": "Beagle" })).is_err());
        assert!(serde_json::from_value::<AnimalRecord>(json!({ "id": 5 })).is_err());
    }

    #[test]
    fn test_temperament_accepts_single_string() {
        let record: AnimalRecord =
            serde_json::from_value(json!({ "id": "1", "temperament": "Calm" })).unwrap();
        assert_eq!(record.temperament, vec!["Calm"]);
    }

    #[test]
    fn test_colors_in_priority_order() {
        let record = AnimalRecord {
            id: "1".to_string(),
            color: Some("Black".to_string()),
            color_tertiary: Some("White".to_string()),
            ..Default::default()
        };
        assert_eq!(record.colors(), vec!["Black", "White"]);
    }

    #[test]
    fn test_default_weights() {
        let weights = ScoringWeights::default();
        let total: f64 = Dimension::ALL.iter().map(|d| weights.weight(*d)).sum();
        assert_eq!(weights.breed, 25.0);
        assert_eq!(total, 120.0);
    }
}
