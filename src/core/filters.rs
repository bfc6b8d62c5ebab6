use crate::models::{ChildData, FamilyData, JobData, NannyProfile, PetComfort, RequirementCode};

/// Check a single mandatory requirement against the nanny
///
/// Returns the elimination reason when the requirement fails.
pub fn check_requirement(
    requirement: RequirementCode,
    job: &JobData,
    family: &FamilyData,
    children: &[ChildData],
    nanny: &NannyProfile,
) -> Option<String> {
    match requirement {
        RequirementCode::NonSmoker => nanny
            .is_smoker
            .then(|| "Job requires a non-smoking nanny".to_string()),
        RequirementCode::HasCnh => (!nanny.has_cnh)
            .then(|| "Job requires a nanny with a driver's license (CNH)".to_string()),
        RequirementCode::PetFriendly => {
            let comfortable = matches!(
                nanny.comfortable_with_pets,
                Some(PetComfort::Yes) | Some(PetComfort::Depends)
            );
            (family.has_pets && !comfortable)
                .then(|| "Family has pets and the nanny is not comfortable with pets".to_string())
        }
        RequirementCode::SpecialNeedsExperience => {
            let any_special_needs = children.iter().any(|child| child.has_special_needs);
            (any_special_needs && !nanny.has_special_needs_experience).then(|| {
                "Job requires experience with children with special needs".to_string()
            })
        }
        RequirementCode::GenderPreference => {
            let required = job.required_gender.or(family.preferred_nanny_gender)?;
            (nanny.gender != Some(required))
                .then(|| format!("Job requires a {} nanny", required.label()))
        }
        RequirementCode::FirstAid
        | RequirementCode::Cpr
        | RequirementCode::ChildDevelopment
        | RequirementCode::EarlyChildhoodEducation
        | RequirementCode::NursingTechnician => {
            let certification = requirement.required_certification()?;
            (!nanny.certifications.contains(&certification))
                .then(|| format!("Job requires a {} certification", certification.label()))
        }
    }
}

/// Run every mandatory requirement of the job, in declaration order
///
/// This is phase 1 of the evaluation. An empty result means eligible.
pub fn elimination_reasons(
    job: &JobData,
    family: &FamilyData,
    children: &[ChildData],
    nanny: &NannyProfile,
) -> Vec<String> {
    job.mandatory_requirements
        .iter()
        .filter_map(|requirement| check_requirement(*requirement, job, family, children, nanny))
        .collect()
}
