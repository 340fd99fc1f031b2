use crate::core::error::MatchError;
use crate::models::{AgeValue, TraitQuery};
use serde_json::{Map, Value};

/// Normalize a raw JSON trait query
///
/// Recognized keys are picked out of the object; everything else is ignored.
/// Empty strings count as absent, numbers and numeric-looking strings are
/// coerced where a key expects them, and a value of the wrong shape is
/// dropped so that dimension simply scores 0. Only a query that is not a
/// JSON object at all (or `null`, treated as empty) is rejected.
pub fn normalize_query(raw: &Value) -> Result<TraitQuery, MatchError> {
    let object = match raw {
        Value::Object(object) => object,
        Value::Null => return Ok(TraitQuery::default()),
        other => {
            return Err(MatchError::MalformedQuery(format!(
                "expected an object of traits, got {}",
                json_type(other)
            )))
        }
    };

    let query = TraitQuery {
        breed: text(object, &["breed"]),
        size: text(object, &["size"]),
        color: text(object, &["color", "furColor"]),
        age: age(object),
        gender: text(object, &["gender"]),
        coat: text(object, &["coat"]),
        temperament: text(object, &["temperament"]),
        good_with_kids: flag(object, &["wantsGoodWithKids", "goodWithKids"]),
        good_with_dogs: flag(object, &["wantsGoodWithDogs", "goodWithDogs"]),
        good_with_cats: flag(object, &["wantsGoodWithCats", "goodWithCats"]),
        house_trained: flag(object, &["houseTrained"]).unwrap_or(false),
        hypoallergenic: flag(object, &["hypoallergenic"]).unwrap_or(false),
        non_shed: flag(object, &["nonShed"]).unwrap_or(false),
        search_text: text(object, &["searchText"]),
    };

    tracing::debug!("Normalized trait query: {:?}", query);

    Ok(query)
}

impl TryFrom<Value> for TraitQuery {
    type Error = MatchError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        normalize_query(&value)
    }
}

/// First usable value among `keys`, in order
fn first<'a, T>(
    object: &'a Map<String, Value>,
    keys: &[&str],
    coerce: impl Fn(&'a Value) -> Option<T>,
) -> Option<T> {
    keys.iter().find_map(|key| {
        let value = object.get(*key)?;
        let coerced = coerce(value);
        if coerced.is_none() && !value.is_null() {
            tracing::debug!("Ignoring unusable value for {}: {}", key, value);
        }
        coerced
    })
}

fn text(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    first(object, keys, |value| match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn age(object: &Map<String, Value>) -> Option<AgeValue> {
    first(object, &["age"], |value| match value {
        Value::Number(n) => n.as_f64().map(AgeValue::Years),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else if let Ok(years) = s.parse::<f64>() {
                Some(AgeValue::Years(years)).filter(|_| years.is_finite())
            } else {
                Some(AgeValue::Label(s.to_string()))
            }
        }
        _ => None,
    })
}

fn flag(object: &Map<String, Value>, keys: &[&str]) -> Option<bool> {
    first(object, keys, |value| match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        _ => None,
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strips_empty_and_unknown_keys() {
        let query = normalize_query(&json!({
            "breed": "  ",
            "size": "Medium",
            "eyeColor": "brown",
            "searchText": ""
        }))
        .unwrap();

        assert_eq!(query.breed, None);
        assert_eq!(query.size.as_deref(), Some("Medium"));
        assert_eq!(query.search_text, None);
    }

    #[test]
    fn test_coerces_numeric_age() {
        let from_string = normalize_query(&json!({ "age": "2" })).unwrap();
        let from_number = normalize_query(&json!({ "age": 2 })).unwrap();
        let label = normalize_query(&json!({ "age": "Young" })).unwrap();

        assert_eq!(from_string.age, Some(AgeValue::Years(2.0)));
        assert_eq!(from_number.age, Some(AgeValue::Years(2.0)));
        assert_eq!(label.age, Some(AgeValue::Label("Young".to_string())));
    }

    #[test]
    fn test_aliases() {
        let query = normalize_query(&json!({
            "furColor": "black",
            "goodWithKids": true,
            "wantsGoodWithCats": "false"
        }))
        .unwrap();

        assert_eq!(query.color.as_deref(), Some("black"));
        assert_eq!(query.good_with_kids, Some(true));
        assert_eq!(query.good_with_cats, Some(false));
        assert_eq!(query.good_with_dogs, None);
    }

    #[test]
    fn test_color_wins_over_fur_color() {
        let query = normalize_query(&json!({ "color": "tan", "furColor": "black" })).unwrap();
        assert_eq!(query.color.as_deref(), Some("tan"));
    }

    #[test]
    fn test_wrong_shapes_are_dropped() {
        let query = normalize_query(&json!({
            "breed": ["Beagle"],
            "houseTrained": "sometimes",
            "gender": { "value": "Male" },
            "hypoallergenic": true
        }))
        .unwrap();

        assert_eq!(query.breed, None);
        assert!(!query.house_trained);
        assert_eq!(query.gender, None);
        assert!(query.hypoallergenic);
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(matches!(
            normalize_query(&json!(["breed"])),
            Err(MatchError::MalformedQuery(_))
        ));
        assert_eq!(normalize_query(&Value::Null).unwrap(), TraitQuery::default());
    }

    #[test]
    fn test_deserialize_goes_through_normalizer() {
        let query: TraitQuery = serde_json::from_value(json!({ "breed": "Beagle", "age": "" })).unwrap();
        assert_eq!(query.breed.as_deref(), Some("Beagle"));
        assert_eq!(query.age, None);

        assert!(serde_json::from_value::<TraitQuery>(json!("Beagle")).is_err());
    }
}
