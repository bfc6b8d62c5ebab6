use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::codes::{
    ActivityCode, AgeRange, Certification, ContractRegime, DayCode, Gender, HourlyRateRange,
    NannyType, PetComfort, RequirementCode, ShiftCode, TravelDistance,
};

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Hard constraints of a job posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobData {
    pub id: i64,
    /// In declaration order, without duplicates
    pub mandatory_requirements: Vec<RequirementCode>,
    pub children_ids: Vec<i64>,
    pub required_gender: Option<Gender>,
}

/// Structural needs of the household that owns the job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyData {
    pub id: i64,
    pub has_pets: bool,
    pub number_of_children: u32,
    pub nanny_type: Option<NannyType>,
    pub contract_regime: Option<ContractRegime>,
    pub hourly_rate_range: Option<HourlyRateRange>,
    pub domestic_help_expected: BTreeSet<ActivityCode>,
    pub needed_days: BTreeSet<DayCode>,
    pub needed_shifts: BTreeSet<ShiftCode>,
    pub address: Option<GeoPoint>,
    pub preferred_nanny_gender: Option<Gender>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildData {
    pub id: i64,
    /// `None` for unborn children and for children without a birth date
    pub age_in_months: Option<u32>,
    pub unborn: bool,
    pub expected_birth_date: Option<NaiveDate>,
    pub has_special_needs: bool,
    pub special_needs_types: BTreeSet<String>,
    pub special_needs_description: Option<String>,
}

impl ChildData {
    /// Age bucket, only for born children with a known age
    pub fn age_range(&self) -> Option<AgeRange> {
        if self.unborn {
            return None;
        }
        self.age_in_months.map(AgeRange::from_months)
    }
}

/// Weekly availability declared by a nanny, as (day, shift) slots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilityGrid(BTreeSet<(DayCode, ShiftCode)>);

impl AvailabilityGrid {
    pub fn covers(&self, day: DayCode, shift: ShiftCode) -> bool {
        self.0.contains(&(day, shift))
    }
}

impl FromIterator<(DayCode, ShiftCode)> for AvailabilityGrid {
    fn from_iter<I: IntoIterator<Item = (DayCode, ShiftCode)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Aggregate of the reviews a nanny has received
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub average_rating: Option<f64>,
    pub review_count: u32,
}

/// Candidate nanny, normalized for evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NannyProfile {
    pub id: i64,
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub is_smoker: bool,
    pub has_cnh: bool,
    pub experience_years: Option<u32>,
    pub has_special_needs_experience: bool,
    pub special_needs_specialties: BTreeSet<String>,
    pub certifications: BTreeSet<Certification>,
    pub age_ranges_experience: BTreeSet<AgeRange>,
    pub max_travel_distance: Option<TravelDistance>,
    pub max_children_care: Option<u32>,
    pub comfortable_with_pets: Option<PetComfort>,
    pub accepted_activities: BTreeSet<ActivityCode>,
    pub nanny_types: BTreeSet<NannyType>,
    pub contract_regimes: BTreeSet<ContractRegime>,
    pub hourly_rate_range: Option<HourlyRateRange>,
    pub document_validated: bool,
    pub document_expiration_date: Option<NaiveDate>,
    pub personal_data_validated: bool,
    pub criminal_background_validated: bool,
    pub has_active_subscription: bool,
    /// `None` when the nanny's schedule is unknown
    pub availability: Option<AvailabilityGrid>,
    pub last_active_at: Option<DateTime<Utc>>,
    pub address: Option<GeoPoint>,
    pub review_stats: ReviewStats,
}

/// Key of a scoring component in the breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentKey {
    AgeRange,
    NannyType,
    Activities,
    ContractRegime,
    Availability,
    ChildrenCount,
    Seal,
    Reviews,
    DistanceBonus,
    BudgetBonus,
}

/// One independently computed part of the match score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreComponent {
    pub score: f64,
    pub max_score: f64,
    pub weight: f64,
    pub weighted: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ScoreComponent {
    /// Build a component; `score` is clamped into `[0, max_score]`.
    pub fn new(score: f64, max_score: f64, weight: f64, details: impl Into<String>) -> Self {
        let score = if score.is_finite() { score.clamp(0.0, max_score) } else { 0.0 };
        let weighted = if max_score > 0.0 { score / max_score * weight } else { 0.0 };
        Self {
            score,
            max_score,
            weight,
            weighted,
            details: Some(details.into()),
        }
    }
}

/// Per-component score detail; absent keys are inapplicable components
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Breakdown(BTreeMap<ComponentKey, ScoreComponent>);

impl Breakdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ComponentKey, component: ScoreComponent) {
        self.0.insert(key, component);
    }

    pub fn get(&self, key: ComponentKey) -> Option<&ScoreComponent> {
        self.0.get(&key)
    }

    pub fn contains(&self, key: ComponentKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ComponentKey, &ScoreComponent)> {
        self.0.iter()
    }

    pub fn total_weight(&self) -> f64 {
        self.0.values().map(|c| c.weight).sum()
    }

    pub fn total_weighted(&self) -> f64 {
        self.0.values().map(|c| c.weighted).sum()
    }
}

/// Outcome of evaluating one nanny against one job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Integer percentage in `[0, 100]`
    pub score: u8,
    pub is_eligible: bool,
    pub elimination_reasons: Vec<String>,
    pub breakdown: Breakdown,
}

/// Nanny identity as returned alongside a ranked match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NannySummary {
    pub id: i64,
    pub name: Option<String>,
    pub experience_years: Option<u32>,
    pub average_rating: Option<f64>,
    pub review_count: u32,
    pub last_active_at: Option<DateTime<Utc>>,
}

impl From<&NannyProfile> for NannySummary {
    fn from(nanny: &NannyProfile) -> Self {
        Self {
            id: nanny.id,
            name: nanny.name.clone(),
            experience_years: nanny.experience_years,
            average_rating: nanny.review_stats.average_rating,
            review_count: nanny.review_stats.review_count,
            last_active_at: nanny.last_active_at,
        }
    }
}

/// Candidate nanny scored against a job, ready for ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedMatch {
    pub nanny: NannySummary,
    pub match_score: u8,
    pub is_eligible: bool,
    pub elimination_reasons: Vec<String>,
    pub breakdown: Breakdown,
    pub distance_km: Option<f64>,
}

/// Relative weights of the scoring components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringWeights {
    pub age_range: f64,
    pub nanny_type: f64,
    pub activities: f64,
    pub contract_regime: f64,
    pub availability: f64,
    pub children_count: f64,
    pub seal: f64,
    pub reviews: f64,
    pub distance_bonus: f64,
    pub budget_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            age_range: 20.0,
            nanny_type: 10.0,
            activities: 10.0,
            contract_regime: 10.0,
            availability: 20.0,
            children_count: 10.0,
            seal: 5.0,
            reviews: 5.0,
            distance_bonus: 5.0,
            budget_bonus: 5.0,
        }
    }
}
