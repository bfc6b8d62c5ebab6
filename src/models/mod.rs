// Model exports
pub mod codes;
pub mod domain;
pub mod records;
pub mod requests;
pub mod responses;

pub use codes::{
    ActivityCode, AgeRange, Certification, ContractRegime, DayCode, Gender, HourlyRateRange,
    NannyType, PetComfort, RequirementCode, SealTier, ShiftCode, TravelDistance,
};
pub use domain::{
    AvailabilityGrid, Breakdown, ChildData, ComponentKey, FamilyData, GeoPoint, JobData,
    MatchResult, NannyProfile, NannySummary, RankedMatch, ReviewStats, ScoreComponent,
    ScoringWeights,
};
pub use records::{
    AddressRecord, ChildRecord, FamilyRecord, JobRecord, NannyRecord, ReviewStatsRecord,
    SubscriptionRecord,
};
pub use requests::{EvaluateRequest, MatchingRequest};
pub use responses::{ErrorResponse, HealthResponse, MatchingResponse};
