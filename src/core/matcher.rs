use crate::core::{
    error::MatchError,
    query::normalize_query,
    scoring::calculate_match_score,
    similarity::{HeuristicSimilarity, SimilarityStrategy},
};
use crate::models::{AnimalRecord, ScoreBreakdown, ScoredRecord, ScoringWeights, TraitQuery};
use serde_json::Value;
use std::collections::HashSet;

/// Label attached to every scored record
pub const MATCH_TYPE: &str = "intelligent";

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredRecord>,
    pub total_candidates: usize,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Candidate batch validation
/// 2. Per-dimension similarity
/// 3. Weighted aggregation
/// 4. Stable ranking
///
/// The matcher holds no mutable state, so one instance can be cloned into
/// every worker and called concurrently.
#[derive(Debug, Clone)]
pub struct Matcher<S = HeuristicSimilarity> {
    weights: ScoringWeights,
    similarity: S,
    include_breakdown: bool,
}

impl Matcher<HeuristicSimilarity> {
    pub fn new(weights: ScoringWeights) -> Self {
        Self::with_similarity(weights, HeuristicSimilarity::default())
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default())
    }
}

impl<S: SimilarityStrategy> Matcher<S> {
    pub fn with_similarity(weights: ScoringWeights, similarity: S) -> Self {
        Self {
            weights,
            similarity,
            include_breakdown: true,
        }
    }

    /// Attach the per-dimension breakdown to each result (on by default)
    pub fn include_breakdown(mut self, include: bool) -> Self {
        self.include_breakdown = include;
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score every candidate against a query and rank them
    ///
    /// # Arguments
    /// * `query` - The normalized trait query
    /// * `candidates` - The full candidate batch, in catalog order
    ///
    /// # Returns
    /// Every candidate with its score, highest first. Equal scores keep their
    /// input order, so the output is reproducible. Nothing is filtered or
    /// truncated here.
    pub fn find_matches(
        &self,
        query: &TraitQuery,
        candidates: Vec<AnimalRecord>,
    ) -> Result<MatchResult, MatchError> {
        validate_batch(&candidates)?;

        let total_candidates = candidates.len();
        let ranked = self.rank(query, &candidates);

        let mut slots: Vec<Option<AnimalRecord>> = candidates.into_iter().map(Some).collect();
        let matches = ranked
            .into_iter()
            .filter_map(|(index, score, breakdown)| {
                let record = slots.get_mut(index)?.take()?;
                Some(self.scored(record, score, breakdown))
            })
            .collect();

        Ok(MatchResult {
            matches,
            total_candidates,
        })
    }

    /// Rank a borrowed batch and return only the best `limit` records
    ///
    /// Ordering is identical to [`Matcher::find_matches`]; only the returned
    /// records are cloned, so a shared catalog snapshot can be ranked without
    /// copying it.
    pub fn top_matches(
        &self,
        query: &TraitQuery,
        candidates: &[AnimalRecord],
        limit: usize,
    ) -> Result<MatchResult, MatchError> {
        validate_batch(candidates)?;

        let matches = self
            .rank(query, candidates)
            .into_iter()
            .take(limit)
            .map(|(index, score, breakdown)| self.scored(candidates[index].clone(), score, breakdown))
            .collect();

        Ok(MatchResult {
            matches,
            total_candidates: candidates.len(),
        })
    }

    /// Positions, scores and breakdowns, best first
    fn rank(&self, query: &TraitQuery, candidates: &[AnimalRecord]) -> Vec<(usize, u8, ScoreBreakdown)> {
        let mut ranked: Vec<(usize, u8, ScoreBreakdown)> = candidates
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let (score, breakdown) =
                    calculate_match_score(record, query, &self.weights, &self.similarity);
                (index, score, breakdown)
            })
            .collect();

        // Stable sort: ties keep catalog order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        tracing::debug!(
            "Scored {} candidates, top score {}",
            candidates.len(),
            ranked.first().map_or(0, |(_, score, _)| *score)
        );

        ranked
    }

    fn scored(&self, record: AnimalRecord, score: u8, breakdown: ScoreBreakdown) -> ScoredRecord {
        ScoredRecord {
            record,
            score,
            match_type: MATCH_TYPE.to_string(),
            match_breakdown: self.include_breakdown.then_some(breakdown),
        }
    }

    /// Same as [`Matcher::find_matches`], from raw JSON
    ///
    /// `query` goes through the query normalizer and `candidates` must be an
    /// array of records.
    pub fn find_matches_json(
        &self,
        query: &Value,
        candidates: Value,
    ) -> Result<MatchResult, MatchError> {
        let query = normalize_query(query)?;
        let candidates = parse_candidates(candidates)?;
        self.find_matches(&query, candidates)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Check the structural contract of a candidate batch
///
/// Ids must be non-empty and unique within the batch.
pub fn validate_batch(candidates: &[AnimalRecord]) -> Result<(), MatchError> {
    let mut seen = HashSet::with_capacity(candidates.len());

    for (index, record) in candidates.iter().enumerate() {
        if record.id.trim().is_empty() {
            return Err(MatchError::InvalidCandidateBatch(format!(
                "record at position {} has an empty id",
                index
            )));
        }
        if !seen.insert(record.id.as_str()) {
            return Err(MatchError::InvalidCandidateBatch(format!(
                "duplicate record id {}",
                record.id
            )));
        }
    }

    Ok(())
}

/// Decode a JSON array of records
///
/// Only a missing or non-string `id` fails a record; malformed optional
/// fields read as absent.
pub fn parse_candidates(value: Value) -> Result<Vec<AnimalRecord>, MatchError> {
    let Value::Array(items) = value else {
        return Err(MatchError::InvalidCandidateBatch(
            "candidates must be an array of records".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| {
                MatchError::InvalidCandidateBatch(format!("record at position {}: {}", index, e))
            })
        })
        .collect()
}
