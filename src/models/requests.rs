use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

use super::records::{ChildRecord, FamilyRecord, JobRecord, NannyRecord};

/// Read each candidate on its own; one that is not a record at all becomes an
/// empty record, which the adapters then reject for its missing id
fn tolerant_candidates<'de, D>(deserializer: D) -> Result<Vec<NannyRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|value| serde_json::from_value(value).unwrap_or_default())
        .collect())
}

/// Request to rank candidate nannies for a job
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MatchingRequest {
    pub job: JobRecord,
    pub family: FamilyRecord,
    #[validate(length(max = 20))]
    #[serde(default)]
    pub children: Vec<ChildRecord>,
    #[validate(length(min = 1, max = 1000))]
    #[serde(deserialize_with = "tolerant_candidates")]
    pub candidates: Vec<NannyRecord>,
    #[validate(range(max = 100))]
    #[serde(default)]
    pub min_score: Option<u8>,
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub limit: Option<u16>,
    #[serde(default)]
    pub include_ineligible: bool,
}

/// Request to evaluate a single nanny against a job
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub job: JobRecord,
    pub family: FamilyRecord,
    #[validate(length(max = 20))]
    #[serde(default)]
    pub children: Vec<ChildRecord>,
    pub nanny: NannyRecord,
}
