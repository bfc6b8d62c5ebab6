//! Normalization of raw persisted records into evaluator value objects.
//!
//! Adapters are pure: absent collections become empty sets, absent scalars
//! become `None`, unknown codes are dropped. The only failure is a missing
//! identity field.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use thiserror::Error;

use crate::models::codes::parse_code;
use crate::models::{
    AddressRecord, AvailabilityGrid, ChildData, ChildRecord, DayCode, FamilyData, FamilyRecord,
    GeoPoint, JobData, JobRecord, NannyProfile, NannyRecord, RequirementCode, ReviewStats,
    ShiftCode,
};

/// Structurally invalid adapter input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{record} record is missing required field `{field}`")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },
}

fn require_id(id: Option<i64>, record: &'static str) -> Result<i64, ValidationError> {
    id.ok_or(ValidationError::MissingField { record, field: "id" })
}

/// Parse a list of codes into a set, dropping unknown entries
fn code_set<T: DeserializeOwned + Ord>(codes: Option<&Vec<String>>) -> BTreeSet<T> {
    codes
        .map(|codes| codes.iter().filter_map(|code| parse_code(code)).collect())
        .unwrap_or_default()
}

fn optional_code<T: DeserializeOwned>(code: Option<&String>) -> Option<T> {
    code.and_then(|code| parse_code(code))
}

fn string_set(values: Option<&Vec<String>>) -> BTreeSet<String> {
    values
        .map(|values| {
            values
                .iter()
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn to_geo_point(address: Option<&AddressRecord>) -> Option<GeoPoint> {
    let address = address?;
    match (address.latitude, address.longitude) {
        (Some(latitude), Some(longitude))
            if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) =>
        {
            Some(GeoPoint { latitude, longitude })
        }
        _ => None,
    }
}

/// Whole months elapsed from `from` to `to`; `None` if `from` is in the future
pub fn months_between(from: NaiveDate, to: NaiveDate) -> Option<u32> {
    let mut months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    if to.day() < from.day() {
        months -= 1;
    }
    u32::try_from(months).ok()
}

pub fn to_job_data(record: &JobRecord) -> Result<JobData, ValidationError> {
    let id = require_id(record.id, "job")?;

    let mut mandatory_requirements: Vec<RequirementCode> = Vec::new();
    for code in record.mandatory_requirements.iter().flatten() {
        if let Some(requirement) = parse_code::<RequirementCode>(code) {
            if !mandatory_requirements.contains(&requirement) {
                mandatory_requirements.push(requirement);
            }
        }
    }

    Ok(JobData {
        id,
        mandatory_requirements,
        children_ids: record.children_ids.clone().unwrap_or_default(),
        required_gender: optional_code(record.required_gender.as_ref()),
    })
}

pub fn to_family_data(record: &FamilyRecord) -> Result<FamilyData, ValidationError> {
    let id = require_id(record.id, "family")?;

    Ok(FamilyData {
        id,
        has_pets: record.has_pets.unwrap_or(false),
        number_of_children: record.number_of_children.unwrap_or(0),
        nanny_type: optional_code(record.nanny_type.as_ref()),
        contract_regime: optional_code(record.contract_regime.as_ref()),
        hourly_rate_range: optional_code(record.hourly_rate_range.as_ref()),
        domestic_help_expected: code_set(record.domestic_help_expected.as_ref()),
        needed_days: code_set(record.needed_days.as_ref()),
        needed_shifts: code_set(record.needed_shifts.as_ref()),
        address: to_geo_point(record.address.as_ref()),
        preferred_nanny_gender: optional_code(record.preferred_nanny_gender.as_ref()),
    })
}

/// Normalize a child record; `now` pins the age calculation
pub fn to_child_data(record: &ChildRecord, now: DateTime<Utc>) -> Result<ChildData, ValidationError> {
    let id = require_id(record.id, "child")?;
    let unborn = record.unborn.unwrap_or(false);

    let age_in_months = if unborn {
        None
    } else {
        record
            .birth_date
            .and_then(|birth_date| months_between(birth_date, now.date_naive()))
    };

    Ok(ChildData {
        id,
        age_in_months,
        unborn,
        expected_birth_date: record.expected_birth_date,
        has_special_needs: record.has_special_needs.unwrap_or(false),
        special_needs_types: string_set(record.special_needs_types.as_ref()),
        special_needs_description: record
            .special_needs_description
            .as_ref()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty()),
    })
}

/// Parse the availability schedule JSON (`{"MONDAY": ["MORNING"], ...}`)
///
/// Returns `None` when the schedule is absent or not an object.
pub fn parse_availability(schedule: Option<&serde_json::Value>) -> Option<AvailabilityGrid> {
    let days = schedule?.as_object()?;

    let grid = days
        .iter()
        .filter_map(|(day, shifts)| Some((parse_code::<DayCode>(day)?, shifts.as_array()?)))
        .flat_map(|(day, shifts)| {
            shifts
                .iter()
                .filter_map(|shift| shift.as_str().and_then(parse_code::<ShiftCode>))
                .map(move |shift| (day, shift))
        })
        .collect();

    Some(grid)
}

/// Normalize a nanny record; `now` decides whether the subscription is active
pub fn to_nanny_profile(record: &NannyRecord, now: DateTime<Utc>) -> Result<NannyProfile, ValidationError> {
    let id = require_id(record.id, "nanny")?;

    let has_active_subscription = record
        .subscription
        .as_ref()
        .map(|subscription| {
            subscription.active.unwrap_or(false)
                && subscription.expires_at.map_or(true, |expires_at| expires_at > now)
        })
        .unwrap_or(false);

    let review_stats = record
        .review_stats
        .as_ref()
        .map(|stats| ReviewStats {
            average_rating: stats
                .average_rating
                .filter(|rating| rating.is_finite())
                .map(|rating| rating.clamp(0.0, 5.0)),
            review_count: stats.review_count.unwrap_or(0),
        })
        .unwrap_or_default();

    Ok(NannyProfile {
        id,
        name: record.name.clone(),
        gender: optional_code(record.gender.as_ref()),
        birth_date: record.birth_date,
        is_smoker: record.is_smoker.unwrap_or(false),
        has_cnh: record.has_cnh.unwrap_or(false),
        experience_years: record.experience_years,
        has_special_needs_experience: record.has_special_needs_experience.unwrap_or(false),
        special_needs_specialties: string_set(record.special_needs_specialties.as_ref()),
        certifications: code_set(record.certifications.as_ref()),
        age_ranges_experience: code_set(record.age_ranges_experience.as_ref()),
        max_travel_distance: optional_code(record.max_travel_distance.as_ref()),
        max_children_care: record.max_children_care,
        comfortable_with_pets: optional_code(record.comfortable_with_pets.as_ref()),
        accepted_activities: code_set(record.accepted_activities.as_ref()),
        nanny_types: code_set(record.nanny_types.as_ref()),
        contract_regimes: code_set(record.contract_regimes.as_ref()),
        hourly_rate_range: optional_code(record.hourly_rate_range.as_ref()),
        document_validated: record.document_validated.unwrap_or(false),
        document_expiration_date: record.document_expiration_date,
        personal_data_validated: record.personal_data_validated.unwrap_or(false),
        criminal_background_validated: record.criminal_background_validated.unwrap_or(false),
        has_active_subscription,
        availability: parse_availability(record.availability.as_ref()),
        last_active_at: record.last_active_at,
        address: to_geo_point(record.address.as_ref()),
        review_stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityCode, AgeRange, Certification, HourlyRateRange, SubscriptionRecord};
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_missing_id_is_validation_error() {
        let err = to_job_data(&JobRecord::default()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField { record: "job", field: "id" });
        assert!(to_family_data(&FamilyRecord::default()).is_err());
        assert!(to_child_data(&ChildRecord::default(), now()).is_err());
        assert!(to_nanny_profile(&NannyRecord::default(), now()).is_err());
    }

    #[test]
    fn test_job_requirements_keep_order_and_drop_unknown() {
        let record = JobRecord {
            id: Some(1),
            mandatory_requirements: Some(vec![
                "CPR".to_string(),
                "NON_SMOKER".to_string(),
                "TELEPORTATION".to_string(),
                "cpr".to_string(),
            ]),
            ..Default::default()
        };

        let job = to_job_data(&record).unwrap();
        assert_eq!(
            job.mandatory_requirements,
            vec![RequirementCode::Cpr, RequirementCode::NonSmoker]
        );
        assert!(job.children_ids.is_empty());
    }

    #[test]
    fn test_family_defaults() {
        let family = to_family_data(&FamilyRecord { id: Some(9), ..Default::default() }).unwrap();
        assert!(!family.has_pets);
        assert_eq!(family.number_of_children, 0);
        assert!(family.nanny_type.is_none());
        assert!(family.domestic_help_expected.is_empty());
        assert!(family.address.is_none());
    }

    #[test]
    fn test_family_address_requires_both_coordinates() {
        let record = FamilyRecord {
            id: Some(9),
            address: Some(AddressRecord { latitude: Some(-23.5), longitude: None }),
            ..Default::default()
        };
        assert!(to_family_data(&record).unwrap().address.is_none());
    }

    #[test]
    fn test_months_between() {
        let birth = NaiveDate::from_ymd_opt(2024, 12, 15).unwrap();
        assert_eq!(months_between(birth, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()), Some(6));
        assert_eq!(months_between(birth, NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()), Some(5));
        assert_eq!(months_between(birth, NaiveDate::from_ymd_opt(2024, 12, 20).unwrap()), Some(0));
        assert_eq!(months_between(birth, NaiveDate::from_ymd_opt(2024, 11, 1).unwrap()), None);
    }

    #[test]
    fn test_child_age_and_unborn() {
        let born = ChildRecord {
            id: Some(1),
            birth_date: NaiveDate::from_ymd_opt(2024, 12, 15),
            ..Default::default()
        };
        let child = to_child_data(&born, now()).unwrap();
        assert_eq!(child.age_in_months, Some(6));
        assert_eq!(child.age_range(), Some(AgeRange::Baby));

        let unborn = ChildRecord {
            id: Some(2),
            unborn: Some(true),
            expected_birth_date: NaiveDate::from_ymd_opt(2025, 9, 1),
            ..Default::default()
        };
        let child = to_child_data(&unborn, now()).unwrap();
        assert!(child.unborn);
        assert_eq!(child.age_in_months, None);

        let no_birth_date = ChildRecord { id: Some(3), ..Default::default() };
        assert_eq!(to_child_data(&no_birth_date, now()).unwrap().age_in_months, None);
    }

    #[test]
    fn test_parse_availability() {
        let schedule = json!({
            "MONDAY": ["MORNING", "AFTERNOON"],
            "tuesday": ["evening", "BRUNCH"],
            "FUNDAY": ["MORNING"],
            "WEDNESDAY": "MORNING"
        });

        let grid = parse_availability(Some(&schedule)).unwrap();
        assert_eq!(grid, [
            (DayCode::Monday, ShiftCode::Morning),
            (DayCode::Monday, ShiftCode::Afternoon),
            (DayCode::Tuesday, ShiftCode::Evening),
        ]
        .into_iter()
        .collect::<AvailabilityGrid>());
        assert!(grid.covers(DayCode::Monday, ShiftCode::Morning));
        assert!(grid.covers(DayCode::Tuesday, ShiftCode::Evening));
        assert!(!grid.covers(DayCode::Wednesday, ShiftCode::Morning));

        assert!(parse_availability(None).is_none());
        assert!(parse_availability(Some(&json!(["MONDAY"]))).is_none());
        assert_eq!(parse_availability(Some(&json!({}))), Some(AvailabilityGrid::default()));
    }

    #[test]
    fn test_nanny_profile_normalization() {
        let record = NannyRecord {
            id: Some(42),
            certifications: Some(vec!["FIRST_AID".to_string(), "JUGGLING".to_string()]),
            accepted_activities: Some(vec!["SCHOOL_PICKUP".to_string()]),
            hourly_rate_range: Some("from_31_to_40".to_string()),
            comfortable_with_pets: Some("MAYBE".to_string()),
            ..Default::default()
        };

        let nanny = to_nanny_profile(&record, now()).unwrap();
        assert_eq!(nanny.certifications.len(), 1);
        assert!(nanny.certifications.contains(&Certification::FirstAid));
        assert!(nanny.accepted_activities.contains(&ActivityCode::SchoolPickup));
        assert_eq!(nanny.hourly_rate_range, Some(HourlyRateRange::From31To40));
        assert!(nanny.comfortable_with_pets.is_none());
        assert!(!nanny.is_smoker);
        assert!(nanny.availability.is_none());
        assert_eq!(nanny.review_stats, ReviewStats::default());
    }

    #[test]
    fn test_subscription_expiry_uses_now() {
        let mut record = NannyRecord {
            id: Some(1),
            subscription: Some(SubscriptionRecord {
                active: Some(true),
                expires_at: Some(Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap()),
            }),
            ..Default::default()
        };
        assert!(to_nanny_profile(&record, now()).unwrap().has_active_subscription);

        record.subscription.as_mut().unwrap().expires_at =
            Some(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());
        assert!(!to_nanny_profile(&record, now()).unwrap().has_active_subscription);
    }

    #[test]
    fn test_malformed_optional_input_is_not_an_error() {
        let record: NannyRecord = serde_json::from_value(json!({
            "id": 8,
            "experienceYears": -1,
            "birthDate": "unknown",
            "maxChildrenCare": "2",
            "hourlyRateRange": 40,
            "ageRangesExperience": ["TODDLER", {"code": "BABY"}]
        }))
        .unwrap();

        let nanny = to_nanny_profile(&record, now()).unwrap();
        assert_eq!(nanny.id, 8);
        assert!(nanny.experience_years.is_none());
        assert!(nanny.birth_date.is_none());
        assert!(nanny.max_children_care.is_none());
        assert!(nanny.hourly_rate_range.is_none());
        assert_eq!(nanny.age_ranges_experience, [AgeRange::Toddler].into_iter().collect::<BTreeSet<_>>());

        let child: ChildRecord =
            serde_json::from_value(json!({"id": 4, "birthDate": "2024-02-30"})).unwrap();
        let child = to_child_data(&child, now()).unwrap();
        assert!(child.age_in_months.is_none());
        assert!(child.age_range().is_none());
    }
}
