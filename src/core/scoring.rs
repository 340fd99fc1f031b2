use crate::core::similarity::{search_words, SimilarityStrategy};
use crate::models::{AnimalRecord, Dimension, ScoreBreakdown, ScoringWeights, TraitQuery};

/// Calculate a match score (0-100) for a record against a trait query
///
/// Scoring formula:
/// score = round(
///     sum(dimension_score * weight) / sum(weight)
/// )
/// over the included dimensions. A dimension is included when the query
/// asked for it, or when it scored above zero anyway. Only the final score is
/// rounded. A query that asks for nothing scores 0.
pub fn calculate_match_score<S: SimilarityStrategy + ?Sized>(
    record: &AnimalRecord,
    query: &TraitQuery,
    weights: &ScoringWeights,
    similarity: &S,
) -> (u8, ScoreBreakdown) {
    let breakdown = score_dimensions(record, query, similarity);

    let mut total_score = 0.0;
    let mut total_weight = 0.0;

    for dimension in Dimension::ALL {
        let score = breakdown.get(dimension);
        if score > 0.0 || is_requested(dimension, query) {
            let weight = weights.weight(dimension);
            total_score += score * weight;
            total_weight += weight;
        }
    }

    let normalized = if total_weight > 0.0 {
        total_score / total_weight
    } else {
        0.0
    };

    (normalized.round().clamp(0.0, 100.0) as u8, breakdown)
}

/// Whether the query supplied a value for a dimension
///
/// Environment and special attributes count as requested when any of their
/// sub-checks is. Text search needs at least one usable search word.
pub fn is_requested(dimension: Dimension, query: &TraitQuery) -> bool {
    match dimension {
        Dimension::Breed => query.breed.is_some(),
        Dimension::Size => query.size.is_some(),
        Dimension::Color => query.color.is_some(),
        Dimension::Age => query.age.is_some(),
        Dimension::Gender => query.gender.is_some(),
        Dimension::Coat => query.coat.is_some(),
        Dimension::Temperament => query.temperament.is_some(),
        Dimension::Environment => query.wants_environment(),
        Dimension::Special => query.wants_special(),
        Dimension::TextSearch => query
            .search_text
            .as_deref()
            .is_some_and(|text| !search_words(text).is_empty()),
    }
}

/// Per-dimension similarity for every dimension the query touches
fn score_dimensions<S: SimilarityStrategy + ?Sized>(
    record: &AnimalRecord,
    query: &TraitQuery,
    similarity: &S,
) -> ScoreBreakdown {
    let mut scores = ScoreBreakdown::default();

    if let Some(breed) = &query.breed {
        scores.breed = match &record.breed {
            Some(primary) => similarity.breed(breed, primary, record.breed_secondary.as_deref()),
            None => missing(record, Dimension::Breed),
        };
    }

    if let Some(size) = &query.size {
        scores.size = match &record.size {
            Some(candidate) => similarity.size(size, candidate),
            None => missing(record, Dimension::Size),
        };
    }

    if let Some(color) = &query.color {
        let colors = record.colors();
        scores.color = if colors.is_empty() {
            missing(record, Dimension::Color)
        } else {
            similarity.color(color, &colors)
        };
    }

    if let Some(age) = &query.age {
        scores.age = match &record.age {
            Some(candidate) => similarity.age(age, candidate),
            None => missing(record, Dimension::Age),
        };
    }

    if let Some(gender) = &query.gender {
        scores.gender = match &record.gender {
            Some(candidate) => similarity.exact(gender, candidate),
            None => missing(record, Dimension::Gender),
        };
    }

    if let Some(coat) = &query.coat {
        scores.coat = match &record.coat {
            Some(candidate) => similarity.exact(coat, candidate),
            None => missing(record, Dimension::Coat),
        };
    }

    if let Some(temperament) = &query.temperament {
        scores.temperament = similarity.temperament(temperament, &record.temperament, &record.tags);
    }

    if query.wants_environment() {
        scores.environment = similarity.environment(query, &record.environment);
    }

    if query.wants_special() {
        scores.special = similarity.special_attributes(query, record);
    }

    if let Some(text) = &query.search_text {
        scores.text_search = similarity.free_text(text, record);
    }

    scores
}

#[inline]
fn missing(record: &AnimalRecord, dimension: Dimension) -> f64 {
    tracing::trace!("Record {} has no data for {:?}, scoring 0", record.id, dimension);
    0.0
}
