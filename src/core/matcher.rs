use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use crate::core::{
    distance::distance_between,
    filters::elimination_reasons,
    scoring::{compute_breakdown, normalize_score},
};
use crate::models::{
    ChildData, FamilyData, JobData, MatchResult, NannyProfile, NannySummary, RankedMatch,
    ScoringWeights,
};

/// Evaluate one nanny against one job
///
/// # Phases
/// 1. Elimination: every mandatory requirement of the job is checked; each
///    failure adds a reason and makes the nanny ineligible.
/// 2. Scoring: applicable components are computed and normalized to 0-100.
///    This runs for ineligible nannies too, so callers can show how close
///    they were; `is_eligible == false` still blocks applications.
///
/// `now` pins every time-dependent rule (document expiry in the seal tier).
pub fn calculate_match_score(
    job: &JobData,
    family: &FamilyData,
    children: &[ChildData],
    nanny: &NannyProfile,
    weights: &ScoringWeights,
    now: DateTime<Utc>,
) -> MatchResult {
    let elimination_reasons = elimination_reasons(job, family, children, nanny);
    let breakdown = compute_breakdown(job, family, children, nanny, weights, now);

    MatchResult {
        score: normalize_score(&breakdown),
        is_eligible: elimination_reasons.is_empty(),
        elimination_reasons,
        breakdown,
    }
}

/// Options for ranking many candidates against one job
#[derive(Debug, Clone, Copy)]
pub struct RankingOptions {
    pub min_score: u8,
    pub limit: usize,
    pub include_ineligible: bool,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            min_score: 0,
            limit: 20,
            include_ineligible: false,
        }
    }
}

/// Result of ranking candidates
#[derive(Debug)]
pub struct RankingResult {
    pub matches: Vec<RankedMatch>,
    pub total_candidates: usize,
}

/// Matching orchestrator holding the configured weights
///
/// # Ranking
/// 1. Evaluate every candidate
/// 2. Drop ineligible candidates (unless requested) and those below `min_score`
/// 3. Sort and truncate to `limit`
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn evaluate(
        &self,
        job: &JobData,
        family: &FamilyData,
        children: &[ChildData],
        nanny: &NannyProfile,
        now: DateTime<Utc>,
    ) -> MatchResult {
        calculate_match_score(job, family, children, nanny, &self.weights, now)
    }

    /// Rank candidate nannies for a job
    ///
    /// Ties on score are broken by eligibility, then distance (unknown last),
    /// then most recent activity, then experience, then id.
    pub fn rank(
        &self,
        job: &JobData,
        family: &FamilyData,
        children: &[ChildData],
        candidates: &[NannyProfile],
        options: RankingOptions,
        now: DateTime<Utc>,
    ) -> RankingResult {
        let total_candidates = candidates.len();

        let mut ranked: Vec<(RankedMatch, &NannyProfile)> = candidates
            .iter()
            .filter_map(|nanny| {
                let result = self.evaluate(job, family, children, nanny, now);

                if !result.is_eligible && !options.include_ineligible {
                    tracing::trace!("Nanny {} eliminated: {:?}", nanny.id, result.elimination_reasons);
                    return None;
                }
                if result.score < options.min_score {
                    return None;
                }

                let ranked = RankedMatch {
                    nanny: NannySummary::from(nanny),
                    match_score: result.score,
                    is_eligible: result.is_eligible,
                    elimination_reasons: result.elimination_reasons,
                    breakdown: result.breakdown,
                    distance_km: distance_between(family.address.as_ref(), nanny.address.as_ref()),
                };
                Some((ranked, nanny))
            })
            .collect();

        ranked.sort_by(|(a, a_nanny), (b, b_nanny)| {
            b.match_score
                .cmp(&a.match_score)
                .then_with(|| b.is_eligible.cmp(&a.is_eligible))
                .then_with(|| compare_distance(a.distance_km, b.distance_km))
                .then_with(|| b_nanny.last_active_at.cmp(&a_nanny.last_active_at))
                .then_with(|| b_nanny.experience_years.cmp(&a_nanny.experience_years))
                .then_with(|| a_nanny.id.cmp(&b_nanny.id))
        });

        let matches: Vec<RankedMatch> = ranked
            .into_iter()
            .take(options.limit)
            .map(|(ranked, _)| ranked)
            .collect();

        RankingResult {
            matches,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Ascending distance with unknown distances last
fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
