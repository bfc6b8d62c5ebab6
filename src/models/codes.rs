use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Mandatory requirement a job can declare on the nanny
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequirementCode {
    NonSmoker,
    HasCnh,
    PetFriendly,
    SpecialNeedsExperience,
    GenderPreference,
    FirstAid,
    Cpr,
    ChildDevelopment,
    EarlyChildhoodEducation,
    NursingTechnician,
}

impl RequirementCode {
    /// Certification the nanny must hold to satisfy this requirement, if any
    pub fn required_certification(self) -> Option<Certification> {
        match self {
            RequirementCode::FirstAid => Some(Certification::FirstAid),
            RequirementCode::Cpr => Some(Certification::Cpr),
            RequirementCode::ChildDevelopment => Some(Certification::ChildDevelopment),
            RequirementCode::EarlyChildhoodEducation => {
                Some(Certification::EarlyChildhoodEducation)
            }
            RequirementCode::NursingTechnician => Some(Certification::NursingTechnician),
            RequirementCode::NonSmoker
            | RequirementCode::HasCnh
            | RequirementCode::PetFriendly
            | RequirementCode::SpecialNeedsExperience
            | RequirementCode::GenderPreference => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Certification {
    FirstAid,
    Cpr,
    ChildDevelopment,
    EarlyChildhoodEducation,
    NursingTechnician,
}

impl Certification {
    pub fn label(self) -> &'static str {
        match self {
            Certification::FirstAid => "first aid",
            Certification::Cpr => "CPR",
            Certification::ChildDevelopment => "child development",
            Certification::EarlyChildhoodEducation => "early childhood education",
            Certification::NursingTechnician => "nursing technician",
        }
    }
}

/// Household activity a family expects and a nanny may accept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityCode {
    ChildrenMeals,
    ChildrenLaundry,
    ChildrenRoomTidying,
    SchoolPickup,
    HomeworkHelp,
    Bathing,
    LightCleaning,
    FamilyMeals,
    Errands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayCode {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftCode {
    Morning,
    Afternoon,
    Evening,
    Overnight,
}

/// Child-age category used for both nanny experience and child classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgeRange {
    Newborn,
    Baby,
    Toddler,
    Preschool,
    SchoolAge,
    Teenager,
}

impl AgeRange {
    /// Lower month boundaries (inclusive), in bucket order
    const LOWER_BOUNDS: [(u32, AgeRange); 6] = [
        (144, AgeRange::Teenager),
        (72, AgeRange::SchoolAge),
        (36, AgeRange::Preschool),
        (12, AgeRange::Toddler),
        (3, AgeRange::Baby),
        (0, AgeRange::Newborn),
    ];

    /// Bucket for an age expressed in whole months
    pub fn from_months(months: u32) -> AgeRange {
        Self::LOWER_BOUNDS
            .iter()
            .find(|(lower, _)| months >= *lower)
            .map(|(_, range)| *range)
            .unwrap_or(AgeRange::Newborn)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NannyType {
    FullTime,
    PartTime,
    LiveIn,
    Occasional,
    NightNanny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractRegime {
    Clt,
    Pj,
    DailyWorker,
    Freelance,
}

/// Hourly rate bucket; variant order is ascending price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HourlyRateRange {
    #[serde(rename = "UP_TO_20")]
    UpTo20,
    #[serde(rename = "FROM_21_TO_30")]
    From21To30,
    #[serde(rename = "FROM_31_TO_40")]
    From31To40,
    #[serde(rename = "FROM_41_TO_50")]
    From41To50,
    #[serde(rename = "ABOVE_50")]
    Above50,
}

impl HourlyRateRange {
    pub fn rank(self) -> i32 {
        self as i32
    }
}

/// Radius a nanny is willing to travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelDistance {
    #[serde(rename = "UP_TO_5KM")]
    UpTo5Km,
    #[serde(rename = "UP_TO_10KM")]
    UpTo10Km,
    #[serde(rename = "UP_TO_20KM")]
    UpTo20Km,
    #[serde(rename = "UP_TO_30KM")]
    UpTo30Km,
    #[serde(rename = "UP_TO_50KM")]
    UpTo50Km,
    #[serde(rename = "ABOVE_50KM")]
    Above50Km,
}

impl TravelDistance {
    pub fn radius_km(self) -> f64 {
        match self {
            TravelDistance::UpTo5Km => 5.0,
            TravelDistance::UpTo10Km => 10.0,
            TravelDistance::UpTo20Km => 20.0,
            TravelDistance::UpTo30Km => 30.0,
            TravelDistance::UpTo50Km => 50.0,
            TravelDistance::Above50Km => 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PetComfort {
    Yes,
    No,
    Depends,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Female,
    Male,
    Other,
}

impl Gender {
    pub fn label(self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::Other => "other",
        }
    }
}

/// Verification tier shown as a seal on the nanny profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SealTier {
    Unverified,
    Identified,
    Verified,
    Trusted,
}

impl SealTier {
    pub const MAX_LEVEL: f64 = 3.0;

    pub fn level(self) -> f64 {
        match self {
            SealTier::Unverified => 0.0,
            SealTier::Identified => 1.0,
            SealTier::Verified => 2.0,
            SealTier::Trusted => 3.0,
        }
    }
}

/// Parse a stored code string into one of the closed enums above.
///
/// Codes are matched case-insensitively after trimming; unknown codes yield `None`.
pub fn parse_code<T: DeserializeOwned>(raw: &str) -> Option<T> {
    let normalized = raw.trim().to_ascii_uppercase();
    if normalized.is_empty() {
        return None;
    }
    serde_json::from_value(serde_json::Value::String(normalized)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_range_boundaries() {
        assert_eq!(AgeRange::from_months(0), AgeRange::Newborn);
        assert_eq!(AgeRange::from_months(2), AgeRange::Newborn);
        assert_eq!(AgeRange::from_months(3), AgeRange::Baby);
        assert_eq!(AgeRange::from_months(6), AgeRange::Baby);
        assert_eq!(AgeRange::from_months(12), AgeRange::Toddler);
        assert_eq!(AgeRange::from_months(36), AgeRange::Preschool);
        assert_eq!(AgeRange::from_months(72), AgeRange::SchoolAge);
        assert_eq!(AgeRange::from_months(144), AgeRange::Teenager);
        assert_eq!(AgeRange::from_months(400), AgeRange::Teenager);
    }

    #[test]
    fn test_parse_code() {
        assert_eq!(parse_code::<RequirementCode>("NON_SMOKER"), Some(RequirementCode::NonSmoker));
        assert_eq!(parse_code::<RequirementCode>(" non_smoker "), Some(RequirementCode::NonSmoker));
        assert_eq!(parse_code::<TravelDistance>("up_to_10km"), Some(TravelDistance::UpTo10Km));
        assert_eq!(parse_code::<HourlyRateRange>("FROM_31_TO_40"), Some(HourlyRateRange::From31To40));
        assert_eq!(parse_code::<RequirementCode>("FLYING"), None);
        assert_eq!(parse_code::<RequirementCode>(""), None);
    }

    #[test]
    fn test_rate_ranges_are_ordered() {
        assert!(HourlyRateRange::UpTo20 < HourlyRateRange::From21To30);
        assert!(HourlyRateRange::From41To50 < HourlyRateRange::Above50);
        assert_eq!(HourlyRateRange::From31To40.rank() - HourlyRateRange::From21To30.rank(), 1);
    }

    #[test]
    fn test_requirement_certifications() {
        assert_eq!(RequirementCode::Cpr.required_certification(), Some(Certification::Cpr));
        assert_eq!(RequirementCode::NonSmoker.required_certification(), None);
    }
}
