// Core algorithm exports
pub mod adapters;
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use adapters::{to_child_data, to_family_data, to_job_data, to_nanny_profile, ValidationError};
pub use distance::{distance_between, haversine_distance, proximity_score};
pub use filters::{check_requirement, elimination_reasons};
pub use matcher::{calculate_match_score, Matcher, RankingOptions, RankingResult};
pub use scoring::{compute_breakdown, normalize_score, seal_tier};
