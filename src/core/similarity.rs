use crate::core::tables::{
    AgeBand, MatchThresholds, Size, COLOR_DELIMITERS, FULL_SCORE, HAIRLESS_MARKER,
    HYPOALLERGENIC_MARKER, MIN_TOKEN_LEN, MIXED_BREED_QUERY, MIX_MARKER, NON_SHED_MARKER,
    TEMPERAMENT_SYNONYMS,
};
use crate::models::{AgeValue, AnimalRecord, Compatibility, Environment, TraitQuery};

/// Per-dimension similarity functions
///
/// Every method returns a score in `0.0..=100.0` and must return `0.0` rather
/// than fail when the candidate has nothing usable. Aggregation only sees the
/// scores, so an implementation can swap the heuristics for a proper string
/// similarity without touching the weighting.
pub trait SimilarityStrategy: Send + Sync {
    fn breed(&self, query: &str, primary: &str, secondary: Option<&str>) -> f64;

    fn size(&self, query: &str, candidate: &str) -> f64;

    /// `colors` is ordered primary, secondary, tertiary
    fn color(&self, query: &str, colors: &[&str]) -> f64;

    fn age(&self, query: &AgeValue, candidate: &AgeValue) -> f64;

    /// Discrete fields (gender, coat)
    fn exact(&self, query: &str, candidate: &str) -> f64;

    fn temperament(&self, query: &str, temperament: &[String], tags: &[String]) -> f64;

    fn environment(&self, query: &TraitQuery, environment: &Environment) -> f64;

    fn special_attributes(&self, query: &TraitQuery, record: &AnimalRecord) -> f64 {
        match_special_attributes(query, record)
    }

    fn free_text(&self, search_text: &str, record: &AnimalRecord) -> f64 {
        match_free_text(search_text, record)
    }
}

/// Keyword and substring heuristics driven by a [`MatchThresholds`] table
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicSimilarity {
    thresholds: MatchThresholds,
}

impl HeuristicSimilarity {
    pub fn new(thresholds: MatchThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &MatchThresholds {
        &self.thresholds
    }
}

impl SimilarityStrategy for HeuristicSimilarity {
    fn breed(&self, query: &str, primary: &str, secondary: Option<&str>) -> f64 {
        match_breed(query, primary, secondary, &self.thresholds)
    }

    fn size(&self, query: &str, candidate: &str) -> f64 {
        match_size(query, candidate, &self.thresholds)
    }

    fn color(&self, query: &str, colors: &[&str]) -> f64 {
        match_color(query, colors, &self.thresholds)
    }

    fn age(&self, query: &AgeValue, candidate: &AgeValue) -> f64 {
        match_age(query, candidate, &self.thresholds)
    }

    fn exact(&self, query: &str, candidate: &str) -> f64 {
        match_exact(query, candidate, &self.thresholds)
    }

    fn temperament(&self, query: &str, temperament: &[String], tags: &[String]) -> f64 {
        match_temperament(query, temperament, tags, &self.thresholds)
    }

    fn environment(&self, query: &TraitQuery, environment: &Environment) -> f64 {
        match_environment(query, environment, &self.thresholds)
    }
}

/// Breed matching with partial and word-level matching
///
/// Users often type part of a breed ("lab") or don't know a mixed
/// breed's composition, so partial matches keep decreasing credit.
pub fn match_breed(
    query: &str,
    primary: &str,
    secondary: Option<&str>,
    t: &MatchThresholds,
) -> f64 {
    let query = normalize(query);
    let primary = normalize(primary);
    let secondary = secondary.map(normalize).filter(|s| !s.is_empty());

    if query.is_empty() || primary.is_empty() {
        return 0.0;
    }

    if primary == query {
        return t.exact;
    }
    if secondary.as_deref() == Some(query.as_str()) {
        return t.exact_secondary;
    }

    if contains_either(&primary, &query) {
        return t.contains;
    }
    if let Some(secondary) = &secondary {
        if contains_either(secondary, &query) {
            return t.contains_secondary;
        }
    }

    // "retriever" matches "Golden Retriever"
    let query_words = words(&query);
    if shares_word(&query_words, &primary) {
        return t.token;
    }
    if let Some(secondary) = &secondary {
        if shares_word(&query_words, secondary) {
            return t.token_secondary;
        }
    }

    if primary.contains(MIX_MARKER) && query != MIXED_BREED_QUERY {
        return t.mixed_breed;
    }

    0.0
}

/// Size matching on the four-point scale with credit for nearby sizes
pub fn match_size(query: &str, candidate: &str, t: &MatchThresholds) -> f64 {
    let (Some(query), Some(candidate)) = (Size::parse(query), Size::parse(candidate)) else {
        return 0.0;
    };

    match query.distance(candidate) {
        0 => t.exact,
        1 => t.adjacent,
        2 => t.two_steps,
        _ => 0.0,
    }
}

/// Color matching across primary, secondary and tertiary colors
///
/// The first color that yields any match decides the score.
pub fn match_color(query: &str, colors: &[&str], t: &MatchThresholds) -> f64 {
    let query = normalize(query);
    if query.is_empty() {
        return 0.0;
    }

    for (index, color) in colors.iter().map(|c| normalize(c)).enumerate() {
        if color.is_empty() {
            continue;
        }
        let is_primary = index == 0;

        if color == query {
            return if is_primary { t.exact } else { t.exact_secondary };
        }

        if contains_either(&color, &query) {
            return if is_primary { t.contains } else { t.contains_secondary };
        }

        // Compound colors, e.g. "black/tan"
        for part in color
            .split(|c: char| COLOR_DELIMITERS.contains(&c) || c.is_whitespace())
            .filter(|p| !p.is_empty())
        {
            if part == query {
                return t.compound_exact;
            }
            if contains_either(part, &query) {
                return t.compound_contains;
            }
        }
    }

    0.0
}

/// Age matching through age groups
///
/// Labels and year counts are both mapped onto the Baby/Young/Adult/Senior
/// bands so "Young" and `2` compare equal.
pub fn match_age(query: &AgeValue, candidate: &AgeValue, t: &MatchThresholds) -> f64 {
    if normalize(&query.to_string()) == normalize(&candidate.to_string()) {
        return t.exact;
    }

    match (age_band(query), age_band(candidate)) {
        (Some(q), Some(c)) => match q.distance(c) {
            0 => t.exact,
            1 => t.adjacent,
            _ => 0.0,
        },
        _ => 0.0,
    }
}

/// Band for a label, or for a number of years (also "2 years")
pub fn age_band(age: &AgeValue) -> Option<AgeBand> {
    match age {
        AgeValue::Years(years) => AgeBand::from_years(*years),
        AgeValue::Label(label) => AgeBand::from_label(label).or_else(|| {
            label
                .split_whitespace()
                .next()
                .and_then(|n| n.parse::<f64>().ok())
                .and_then(AgeBand::from_years)
        }),
    }
}

#[inline]
pub fn match_exact(query: &str, candidate: &str, t: &MatchThresholds) -> f64 {
    if normalize(query) == normalize(candidate) {
        t.exact
    } else {
        0.0
    }
}

/// Temperament matching against traits, then tags, then the synonym table
pub fn match_temperament(
    query: &str,
    temperament: &[String],
    tags: &[String],
    t: &MatchThresholds,
) -> f64 {
    let traits = normalize_all(temperament);
    if traits.is_empty() {
        return 0.0;
    }

    let query = normalize(query);
    if query.is_empty() {
        return 0.0;
    }
    let tags = normalize_all(tags);

    if traits.contains(&query) {
        return t.exact;
    }
    if tags.contains(&query) {
        return t.exact_secondary;
    }

    if traits.iter().any(|trait_| contains_either(trait_, &query)) {
        return t.contains;
    }
    if tags.iter().any(|tag| contains_either(tag, &query)) {
        return t.contains_secondary;
    }

    for (key, synonyms) in TEMPERAMENT_SYNONYMS {
        if query != *key && !synonyms.contains(&query.as_str()) {
            continue;
        }

        let matched = traits
            .iter()
            .any(|trait_| trait_ == key || synonyms.iter().any(|s| trait_.contains(s)));
        if matched {
            return t.synonym;
        }
    }

    0.0
}

/// Mean compatibility over the requested kids/dogs/cats checks
///
/// Returns `0.0` when no check was requested.
pub fn match_environment(query: &TraitQuery, environment: &Environment, t: &MatchThresholds) -> f64 {
    let checks = [
        (query.good_with_kids, environment.children),
        (query.good_with_dogs, environment.dogs),
        (query.good_with_cats, environment.cats),
    ];

    let scores: Vec<f64> = checks
        .iter()
        .filter_map(|(wanted, actual)| wanted.map(|wanted| compatibility_score(wanted, *actual, t)))
        .collect();

    mean(&scores)
}

#[inline]
fn compatibility_score(wanted: bool, actual: Compatibility, t: &MatchThresholds) -> f64 {
    match (actual, wanted) {
        (Compatibility::Yes, true) | (Compatibility::No, false) => t.exact,
        // Missing information is not a contradiction
        (Compatibility::Unknown, _) => t.unknown_compatibility,
        _ => 0.0,
    }
}

/// Mean over the requested house-trained, hypoallergenic and non-shedding checks
///
/// Only house training has a backing field. Hypoallergenic and non-shedding
/// are guessed from tags, description and coat, so they are best-effort.
pub fn match_special_attributes(query: &TraitQuery, record: &AnimalRecord) -> f64 {
    let mut checks = Vec::with_capacity(3);

    if query.house_trained {
        checks.push(record.attributes.house_trained);
    }
    if query.hypoallergenic {
        checks.push(mentions(record, HYPOALLERGENIC_MARKER));
    }
    if query.non_shed {
        checks.push(mentions(record, NON_SHED_MARKER));
    }

    let scores: Vec<f64> = checks
        .into_iter()
        .map(|passed| if passed { FULL_SCORE } else { 0.0 })
        .collect();

    mean(&scores)
}

fn mentions(record: &AnimalRecord, marker: &str) -> bool {
    record.tags.iter().any(|tag| tag.to_lowercase().contains(marker))
        || record
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(marker))
        || record
            .coat
            .as_deref()
            .is_some_and(|c| c.to_lowercase().contains(HAIRLESS_MARKER))
}

/// Share of search words found anywhere in the record's text, as 0-100
pub fn match_free_text(search_text: &str, record: &AnimalRecord) -> f64 {
    let words = search_words(search_text);
    if words.is_empty() {
        return 0.0;
    }

    let haystack = searchable_text(record);
    let found = words.iter().filter(|w| haystack.contains(w.as_str())).count();

    found as f64 / words.len() as f64 * FULL_SCORE
}

/// Lowercase search words of at least [`MIN_TOKEN_LEN`] characters
pub fn search_words(search_text: &str) -> Vec<String> {
    search_text
        .to_lowercase()
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

/// Lowercase blob of every text field of a record
pub fn searchable_text(record: &AnimalRecord) -> String {
    let age = record.age.as_ref().map(|a| a.to_string());

    let mut parts: Vec<&str> = [
        &record.name,
        &record.breed,
        &record.breed_secondary,
        &record.description,
        &record.size,
        &age,
        &record.gender,
        &record.color,
        &record.coat,
    ]
    .into_iter()
    .filter_map(|field| field.as_deref())
    .collect();

    parts.extend(record.temperament.iter().map(String::as_str));
    parts.extend(record.tags.iter().map(String::as_str));

    parts.join(" ").to_lowercase()
}

#[inline]
fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn normalize_all(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| normalize(v))
        .filter(|v| !v.is_empty())
        .collect()
}

#[inline]
fn contains_either(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

fn words(value: &str) -> Vec<&str> {
    value
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_TOKEN_LEN)
        .collect()
}

fn shares_word(query_words: &[&str], field: &str) -> bool {
    words(field)
        .iter()
        .any(|word| query_words.iter().any(|q| contains_either(word, q)))
}

fn mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}
