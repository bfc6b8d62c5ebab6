//! Raw records as persisted by the marketplace.
//!
//! Every field is optional and every code is a plain string: the adapters in
//! [`crate::core::adapters`] decide what survives normalization. A field of
//! the wrong type reads as absent, so one bad value never rejects a record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Deserialize an optional field, mapping a wrong type or unparsable value to `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Deserialize an optional list of codes, keeping only its string entries
fn lenient_strings<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(None),
    };

    Ok(Some(
        items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(code) => Some(code),
                _ => None,
            })
            .collect(),
    ))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub mandatory_requirements: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub children_ids: Option<Vec<i64>>,
    #[serde(default, deserialize_with = "lenient")]
    pub required_gender: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub has_pets: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub number_of_children: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub nanny_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub contract_regime: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub hourly_rate_range: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub domestic_help_expected: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub needed_days: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub needed_shifts: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub address: Option<AddressRecord>,
    #[serde(default, deserialize_with = "lenient")]
    pub preferred_nanny_gender: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient")]
    pub unborn: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub expected_birth_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient")]
    pub has_special_needs: Option<bool>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub special_needs_types: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub special_needs_description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStatsRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub average_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub review_count: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub active: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NannyRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_smoker: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub has_cnh: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub experience_years: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub has_special_needs_experience: Option<bool>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub special_needs_specialties: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub certifications: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub age_ranges_experience: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub max_travel_distance: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub max_children_care: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub comfortable_with_pets: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub accepted_activities: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub nanny_types: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub contract_regimes: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub hourly_rate_range: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub document_validated: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub document_expiration_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient")]
    pub personal_data_validated: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub criminal_background_validated: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub subscription: Option<SubscriptionRecord>,
    /// Schedule JSON, e.g. `{"MONDAY": ["MORNING", "AFTERNOON"]}`
    #[serde(default)]
    pub availability: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub last_active_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient")]
    pub address: Option<AddressRecord>,
    #[serde(default, deserialize_with = "lenient")]
    pub review_stats: Option<ReviewStatsRecord>,
}
