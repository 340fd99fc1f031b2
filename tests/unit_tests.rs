// Unit tests for Companion Matcher

use companion_matcher::core::{
    scoring::calculate_match_score,
    similarity::{
        match_age, match_breed, match_color, match_environment, match_free_text, match_size,
        match_special_attributes, match_temperament,
    },
    HeuristicSimilarity, HEURISTIC_THRESHOLDS as T,
};
use companion_matcher::models::{
    AgeValue, AnimalRecord, Attributes, Compatibility, Environment, ScoringWeights, TraitQuery,
};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_breed_case_insensitive() {
    assert_eq!(match_breed("labrador retriever", "Labrador Retriever", None, &T), 100.0);
    assert_eq!(match_breed("  BEAGLE ", "Beagle", None, &T), 100.0);
}

#[test]
fn test_breed_partial_query() {
    // "lab" is inside "labrador retriever"
    assert_eq!(match_breed("lab", "Labrador Retriever", None, &T), 85.0);
    assert_eq!(match_breed("retriever", "Golden Retriever", None, &T), 85.0);
}

#[test]
fn test_breed_word_overlap() {
    assert_eq!(match_breed("golden doodle", "Golden Retriever", None, &T), 70.0);
    assert_eq!(match_breed("german pointer", "Beagle", Some("German Shepherd"), &T), 60.0);
}

#[test]
fn test_breed_secondary() {
    assert_eq!(match_breed("poodle", "Labrador Retriever", Some("Poodle"), &T), 90.0);
    assert_eq!(match_breed("Boxer", "Beagle", None, &T), 0.0);
}

#[test]
fn test_size_decay() {
    assert_eq!(match_size("Small", "Small", &T), 100.0);
    assert_eq!(match_size("Small", "Medium", &T), 60.0);
    assert_eq!(match_size("Small", "Large", &T), 30.0);
    assert_eq!(match_size("Small", "Extra Large", &T), 0.0);
    assert_eq!(match_size("xl", "extra-large", &T), 100.0);
}

#[test]
fn test_size_unrecognized() {
    assert_eq!(match_size("tiny", "tiny", &T), 0.0);
    assert_eq!(match_size("Small", "", &T), 0.0);
}

#[test]
fn test_color_primary_and_secondary() {
    assert_eq!(match_color("black", &["Black", "White"], &T), 100.0);
    assert_eq!(match_color("white", &["Black", "White"], &T), 90.0);
    assert_eq!(match_color("gold", &["Golden"], &T), 85.0);
    assert_eq!(match_color("purple", &["Black", "White"], &T), 0.0);
}

#[test]
fn test_color_first_match_wins() {
    // Primary only matches via substring, secondary is exact; primary decides
    assert_eq!(match_color("tan", &["Black/Tan", "Tan"], &T), 85.0);
}

#[test]
fn test_age_banding() {
    let young = AgeValue::from("Young");
    assert_eq!(match_age(&young, &AgeValue::Years(2.0), &T), 100.0);
    assert_eq!(match_age(&young, &AgeValue::from("Adult"), &T), 60.0);
    assert_eq!(match_age(&young, &AgeValue::from("Senior"), &T), 0.0);
    assert_eq!(match_age(&AgeValue::Years(0.5), &AgeValue::from("baby"), &T), 100.0);
}

#[test]
fn test_temperament_levels() {
    let traits = strings(&["Friendly", "Energetic"]);
    let tags = strings(&["House-trained", "Calm indoors"]);

    assert_eq!(match_temperament("friendly", &traits, &tags, &T), 100.0);
    assert_eq!(match_temperament("house-trained", &traits, &tags, &T), 90.0);
    assert_eq!(match_temperament("energy", &traits, &tags, &T), 0.0);
    assert_eq!(match_temperament("energetic dog", &traits, &tags, &T), 85.0);
    assert_eq!(match_temperament("calm", &traits, &tags, &T), 75.0);
    assert_eq!(match_temperament("active", &traits, &tags, &T), 70.0);
}

#[test]
fn test_temperament_requires_traits() {
    let tags = strings(&["Friendly"]);
    assert_eq!(match_temperament("friendly", &[], &tags, &T), 0.0);
}

#[test]
fn test_environment_tri_state() {
    let query = TraitQuery {
        good_with_kids: Some(true),
        ..Default::default()
    };

    let env = |children| Environment {
        children,
        ..Default::default()
    };

    assert_eq!(match_environment(&query, &env(Compatibility::Unknown), &T), 50.0);
    assert_eq!(match_environment(&query, &env(Compatibility::Yes), &T), 100.0);
    assert_eq!(match_environment(&query, &env(Compatibility::No), &T), 0.0);
}

#[test]
fn test_environment_mean_over_requested() {
    let query = TraitQuery {
        good_with_kids: Some(true),
        good_with_cats: Some(false),
        ..Default::default()
    };
    let environment = Environment {
        children: Compatibility::Yes,
        dogs: Compatibility::No,
        cats: Compatibility::Unknown,
    };

    assert_eq!(match_environment(&query, &environment, &T), 75.0);
}

#[test]
fn test_special_attributes() {
    let record = AnimalRecord {
        id: "1".to_string(),
        coat: Some("Hairless".to_string()),
        attributes: Attributes {
            house_trained: false,
            ..Default::default()
        },
        ..Default::default()
    };
    let query = TraitQuery {
        house_trained: true,
        hypoallergenic: true,
        ..Default::default()
    };

    assert_eq!(match_special_attributes(&query, &record), 50.0);
}

#[test]
fn test_free_text_coverage() {
    let record = AnimalRecord {
        id: "1".to_string(),
        name: Some("Scout".to_string()),
        temperament: strings(&["Loyal"]),
        description: Some("Scout adores swimming in the lake".to_string()),
        ..Default::default()
    };

    assert_eq!(match_free_text("loyal swimming", &record), 100.0);
    assert_eq!(match_free_text("loyal cat", &record), 50.0);
    assert_eq!(match_free_text("a to", &record), 0.0);
}

#[test]
fn test_score_uses_custom_similarity_thresholds() {
    let record = AnimalRecord {
        id: "1".to_string(),
        breed: Some("Labrador Retriever".to_string()),
        ..Default::default()
    };
    let query = TraitQuery {
        breed: Some("lab".to_string()),
        ..Default::default()
    };

    let strict = HeuristicSimilarity::new(companion_matcher::core::MatchThresholds {
        contains: 50.0,
        ..T
    });

    let (default_score, _) =
        calculate_match_score(&record, &query, &ScoringWeights::default(), &HeuristicSimilarity::default());
    let (strict_score, _) = calculate_match_score(&record, &query, &ScoringWeights::default(), &strict);

    assert_eq!(default_score, 85);
    assert_eq!(strict_score, 50);
}
