use chrono::{DateTime, Utc};

use crate::core::distance::{distance_between, proximity_score};
use crate::models::{
    Breakdown, ChildData, ComponentKey, FamilyData, JobData, NannyProfile, ScoreComponent,
    ScoringWeights, SealTier,
};

/// Maximum rating on the review scale
const MAX_RATING: f64 = 5.0;

/// Review count at which the rating is trusted at face value
const REVIEW_SATURATION: u32 = 5;

/// Compute every applicable scoring component
///
/// Components whose inputs are missing on either side are left out of the
/// breakdown entirely, so they count neither for nor against the nanny.
/// The seal is only scored when something else is being compared.
pub fn compute_breakdown(
    job: &JobData,
    family: &FamilyData,
    children: &[ChildData],
    nanny: &NannyProfile,
    weights: &ScoringWeights,
    now: DateTime<Utc>,
) -> Breakdown {
    let mut breakdown = Breakdown::new();

    let components = [
        (ComponentKey::AgeRange, score_age_range(children, nanny, weights.age_range)),
        (ComponentKey::NannyType, score_nanny_type(family, nanny, weights.nanny_type)),
        (ComponentKey::Activities, score_activities(family, nanny, weights.activities)),
        (
            ComponentKey::ContractRegime,
            score_contract_regime(family, nanny, weights.contract_regime),
        ),
        (ComponentKey::Availability, score_availability(family, nanny, weights.availability)),
        (
            ComponentKey::ChildrenCount,
            score_children_count(job, family, nanny, weights.children_count),
        ),
        (ComponentKey::Reviews, score_reviews(nanny, weights.reviews)),
        (ComponentKey::DistanceBonus, score_distance_bonus(family, nanny, weights.distance_bonus)),
        (ComponentKey::BudgetBonus, score_budget_bonus(family, nanny, weights.budget_bonus)),
    ];

    for (key, component) in components {
        if let Some(component) = component {
            breakdown.insert(key, component);
        }
    }

    if !breakdown.is_empty() {
        breakdown.insert(ComponentKey::Seal, score_seal(nanny, weights.seal, now));
    }

    breakdown
}

/// Normalize the breakdown to an integer percentage
///
/// `round(Σweighted / Σweight * 100)`, rounding half up; an empty breakdown
/// scores 0.
pub fn normalize_score(breakdown: &Breakdown) -> u8 {
    let total_weight = breakdown.total_weight();
    if total_weight <= 0.0 {
        return 0;
    }

    let percentage = breakdown.total_weighted() / total_weight * 100.0;
    if !percentage.is_finite() {
        return 0;
    }

    // Non-negative, so round() is half-up
    percentage.round().clamp(0.0, 100.0) as u8
}

/// Fraction of born children whose age bucket the nanny has experience with
pub fn score_age_range(children: &[ChildData], nanny: &NannyProfile, weight: f64) -> Option<ScoreComponent> {
    let ranges: Vec<_> = children.iter().filter_map(ChildData::age_range).collect();
    if ranges.is_empty() {
        return None;
    }

    let covered = ranges
        .iter()
        .filter(|range| nanny.age_ranges_experience.contains(*range))
        .count();

    Some(ScoreComponent::new(
        covered as f64,
        ranges.len() as f64,
        weight,
        format!("{} of {} children in an age range the nanny has experience with", covered, ranges.len()),
    ))
}

pub fn score_nanny_type(family: &FamilyData, nanny: &NannyProfile, weight: f64) -> Option<ScoreComponent> {
    let wanted = family.nanny_type?;
    let matches = nanny.nanny_types.contains(&wanted);

    Some(ScoreComponent::new(
        if matches { 1.0 } else { 0.0 },
        1.0,
        weight,
        if matches { "Nanny type matches" } else { "Nanny type does not match" },
    ))
}

/// Partial credit for each expected activity the nanny accepts
pub fn score_activities(family: &FamilyData, nanny: &NannyProfile, weight: f64) -> Option<ScoreComponent> {
    if family.domestic_help_expected.is_empty() {
        return None;
    }

    let expected = family.domestic_help_expected.len();
    let accepted = family
        .domestic_help_expected
        .intersection(&nanny.accepted_activities)
        .count();

    Some(ScoreComponent::new(
        accepted as f64,
        expected as f64,
        weight,
        format!("{} of {} expected activities accepted", accepted, expected),
    ))
}

pub fn score_contract_regime(family: &FamilyData, nanny: &NannyProfile, weight: f64) -> Option<ScoreComponent> {
    let wanted = family.contract_regime?;
    let matches = nanny.contract_regimes.contains(&wanted);

    Some(ScoreComponent::new(
        if matches { 1.0 } else { 0.0 },
        1.0,
        weight,
        if matches { "Contract regime matches" } else { "Contract regime does not match" },
    ))
}

/// Overlap of the family's day x shift needs with the nanny's schedule
pub fn score_availability(family: &FamilyData, nanny: &NannyProfile, weight: f64) -> Option<ScoreComponent> {
    let grid = nanny.availability.as_ref()?;
    if family.needed_days.is_empty() || family.needed_shifts.is_empty() {
        return None;
    }

    let needed = family.needed_days.len() * family.needed_shifts.len();
    let covered = family
        .needed_days
        .iter()
        .flat_map(|day| family.needed_shifts.iter().map(move |shift| (*day, *shift)))
        .filter(|(day, shift)| grid.covers(*day, *shift))
        .count();

    Some(ScoreComponent::new(
        covered as f64,
        needed as f64,
        weight,
        format!("{} of {} needed time slots available", covered, needed),
    ))
}

/// Full score unless the nanny's capacity is below the number of children
pub fn score_children_count(
    job: &JobData,
    family: &FamilyData,
    nanny: &NannyProfile,
    weight: f64,
) -> Option<ScoreComponent> {
    let count = if job.children_ids.is_empty() {
        family.number_of_children
    } else {
        job.children_ids.len() as u32
    };
    if count == 0 {
        return None;
    }

    let component = match nanny.max_children_care {
        Some(max) if max < count => {
            let shortfall = (count - max) as f64;
            ScoreComponent::new(
                1.0 - shortfall / count as f64,
                1.0,
                weight,
                format!("Nanny cares for up to {} of {} children", max, count),
            )
        }
        Some(max) => ScoreComponent::new(
            1.0,
            1.0,
            weight,
            format!("Nanny cares for up to {} children, job has {}", max, count),
        ),
        None => ScoreComponent::new(1.0, 1.0, weight, "No declared limit on children"),
    };

    Some(component)
}

/// Verification tier of the nanny at `now`
pub fn seal_tier(nanny: &NannyProfile, now: DateTime<Utc>) -> SealTier {
    let today = now.date_naive();
    let document_valid = nanny.document_validated
        && nanny
            .document_expiration_date
            .map_or(true, |expires| expires >= today);

    let identified = document_valid && nanny.personal_data_validated;
    let verified = identified && nanny.criminal_background_validated;
    let trusted = verified && nanny.has_active_subscription;

    if trusted {
        SealTier::Trusted
    } else if verified {
        SealTier::Verified
    } else if identified {
        SealTier::Identified
    } else {
        SealTier::Unverified
    }
}

pub fn score_seal(nanny: &NannyProfile, weight: f64, now: DateTime<Utc>) -> ScoreComponent {
    let tier = seal_tier(nanny, now);
    ScoreComponent::new(
        tier.level(),
        SealTier::MAX_LEVEL,
        weight,
        format!("Seal tier {:?}", tier),
    )
}

/// Review confidence in `[0.5, 1.0]`, growing with the number of reviews
#[inline]
fn review_confidence(review_count: u32) -> f64 {
    let saturation = review_count.min(REVIEW_SATURATION) as f64 / REVIEW_SATURATION as f64;
    0.5 + 0.5 * saturation
}

/// Average rating discounted while the review count is low
pub fn score_reviews(nanny: &NannyProfile, weight: f64) -> Option<ScoreComponent> {
    let stats = nanny.review_stats;
    if stats.review_count == 0 {
        return None;
    }
    let average = stats.average_rating?;

    Some(ScoreComponent::new(
        average.clamp(0.0, MAX_RATING) * review_confidence(stats.review_count),
        MAX_RATING,
        weight,
        format!("Average rating {:.1} from {} reviews", average, stats.review_count),
    ))
}

/// Proximity bonus inside the nanny's travel radius; never eliminates
pub fn score_distance_bonus(family: &FamilyData, nanny: &NannyProfile, weight: f64) -> Option<ScoreComponent> {
    let radius_km = nanny.max_travel_distance?.radius_km();
    let distance_km = distance_between(family.address.as_ref(), nanny.address.as_ref())?;

    Some(ScoreComponent::new(
        proximity_score(distance_km, radius_km),
        1.0,
        weight,
        format!("{:.1} km away, travel radius {:.0} km", distance_km, radius_km),
    ))
}

/// Full bonus when the nanny's rate fits the family budget, half one bracket above
pub fn score_budget_bonus(family: &FamilyData, nanny: &NannyProfile, weight: f64) -> Option<ScoreComponent> {
    let budget = family.hourly_rate_range?;
    let asking = nanny.hourly_rate_range?;

    let (score, details) = match asking.rank() - budget.rank() {
        gap if gap <= 0 => (1.0, "Hourly rate within budget"),
        1 => (0.5, "Hourly rate one bracket above budget"),
        _ => (0.0, "Hourly rate above budget"),
    };

    Some(ScoreComponent::new(score, 1.0, weight, details))
}
