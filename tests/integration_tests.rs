// Integration tests for Nanny Match

use actix_web::{test, web, App};
use chrono::{Months, Utc};
use nanny_match::core::Matcher;
use nanny_match::models::{ComponentKey, MatchResult, MatchingResponse};
use nanny_match::routes::{self, matches::{AppState, MatchingDefaults}};
use nanny_match::services::CacheManager;
use serde_json::{json, Value};
use std::sync::Arc;

fn create_state() -> AppState {
    AppState {
        cache: Arc::new(CacheManager::new(100, 60)),
        matcher: Matcher::with_default_weights(),
        defaults: MatchingDefaults::default(),
    }
}

fn create_job_side() -> (Value, Value, Value) {
    let job = json!({
        "id": 1,
        "mandatoryRequirements": ["NON_SMOKER", "PET_FRIENDLY"],
        "childrenIds": [11]
    });
    let family = json!({
        "id": 2,
        "hasPets": true,
        "numberOfChildren": 1,
        "nannyType": "FULL_TIME",
        "hourlyRateRange": "FROM_31_TO_40",
        "domesticHelpExpected": ["SCHOOL_PICKUP", "HOMEWORK_HELP"],
        "neededDays": ["MONDAY", "TUESDAY"],
        "neededShifts": ["MORNING"],
        "address": { "latitude": -23.5505, "longitude": -46.6333 }
    });
    // Four years old whenever the suite runs
    let birth_date = Utc::now().date_naive() - Months::new(48);
    let children = json!([{ "id": 11, "birthDate": birth_date.to_string() }]);
    (job, family, children)
}

fn create_candidate(id: i64, smoker: bool, latitude: f64) -> Value {
    json!({
        "id": id,
        "name": format!("Nanny {}", id),
        "isSmoker": smoker,
        "comfortableWithPets": "YES",
        "ageRangesExperience": ["PRESCHOOL"],
        "nannyTypes": ["FULL_TIME"],
        "acceptedActivities": ["SCHOOL_PICKUP"],
        "hourlyRateRange": "FROM_21_TO_30",
        "maxTravelDistance": "UP_TO_20KM",
        "availability": { "MONDAY": ["MORNING"], "TUESDAY": ["MORNING", "AFTERNOON"] },
        "address": { "latitude": latitude, "longitude": -46.6333 },
        "reviewStats": { "averageRating": 4.5, "reviewCount": 8 }
    })
}

#[actix_web::test]
async fn test_integration_health_check() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_integration_end_to_end_matching() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let (job, family, children) = create_job_side();
    let payload = json!({
        "job": job,
        "family": family,
        "children": children,
        "candidates": [
            create_candidate(7, false, -23.60),  // ~5.5 km
            create_candidate(8, true, -23.56),   // Smoker
            create_candidate(9, false, -23.56),  // ~1 km
            { "name": "No id" }                  // Malformed
        ]
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/matching")
        .set_json(&payload)
        .to_request();
    let response: MatchingResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(response.job_id, 1);
    assert_eq!(response.total_candidates, 4);
    assert_eq!(response.skipped_candidates, 1);
    assert_eq!(response.matches.len(), 2);

    // Same profile otherwise, so the closer nanny ranks first
    assert_eq!(response.matches[0].nanny.id, 9);
    assert_eq!(response.matches[1].nanny.id, 7);
    assert!(response.matches[0].match_score >= response.matches[1].match_score);
    assert!(response.matches.iter().all(|m| m.is_eligible));
    assert!(response.matches[0].distance_km.unwrap() < 2.0);
}

#[actix_web::test]
async fn test_integration_include_ineligible() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let (job, family, children) = create_job_side();
    let payload = json!({
        "job": job,
        "family": family,
        "children": children,
        "candidates": [create_candidate(8, true, -23.56)],
        "includeIneligible": true
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/matching")
        .set_json(&payload)
        .to_request();
    let response: MatchingResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(response.matches.len(), 1);
    assert!(!response.matches[0].is_eligible);
    assert_eq!(
        response.matches[0].elimination_reasons,
        vec!["Job requires a non-smoking nanny".to_string()]
    );
}

#[actix_web::test]
async fn test_integration_evaluate_single_nanny() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let (job, family, children) = create_job_side();
    let payload = json!({
        "job": job,
        "family": family,
        "children": children,
        "nanny": create_candidate(7, false, -23.60)
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/matching/evaluate")
        .set_json(&payload)
        .to_request();
    let result: MatchResult = test::call_and_read_body_json(&app, req).await;

    assert!(result.is_eligible);
    assert!(result.score > 0 && result.score <= 100);
    assert_eq!(result.breakdown.get(ComponentKey::NannyType).unwrap().score, 1.0);
    assert_eq!(result.breakdown.get(ComponentKey::AgeRange).unwrap().score, 1.0);
    assert_eq!(result.breakdown.get(ComponentKey::Availability).unwrap().score, 2.0);
    assert_eq!(result.breakdown.get(ComponentKey::BudgetBonus).unwrap().score, 1.0);
    assert!(!result.breakdown.contains(ComponentKey::ContractRegime));

    // Second call is served from the cache with the same result
    let req = test::TestRequest::post()
        .uri("/api/v1/matching/evaluate")
        .set_json(&payload)
        .to_request();
    let cached: MatchResult = test::call_and_read_body_json(&app, req).await;
    assert_eq!(cached, result);
}

#[actix_web::test]
async fn test_integration_missing_job_id_is_rejected() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let (_, family, children) = create_job_side();
    let payload = json!({
        "job": { "mandatoryRequirements": ["NON_SMOKER"] },
        "family": family,
        "children": children,
        "nanny": create_candidate(7, false, -23.60)
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/matching/evaluate")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_integration_empty_candidates_fail_validation() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let (job, family, children) = create_job_side();
    let payload = json!({
        "job": job,
        "family": family,
        "children": children,
        "candidates": []
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/matching")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");
}

#[actix_web::test]
async fn test_integration_malformed_optional_fields_do_not_fail_batch() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let mut sloppy = create_candidate(8, false, -23.56);
    sloppy["experienceYears"] = json!(-1);
    sloppy["birthDate"] = json!("unknown");
    sloppy["maxChildrenCare"] = json!("2");

    let (job, family, children) = create_job_side();
    let payload = json!({
        "job": job,
        "family": family,
        "children": children,
        "candidates": [create_candidate(7, false, -23.60), sloppy, "not a record"]
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/matching")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);

    let response: MatchingResponse = test::read_body_json(resp).await;
    assert_eq!(response.total_candidates, 3);
    assert_eq!(response.skipped_candidates, 1);

    let mut ids: Vec<i64> = response.matches.iter().map(|m| m.nanny.id).collect();
    ids.sort();
    assert_eq!(ids, vec![7, 8]);

    let sloppy = response.matches.iter().find(|m| m.nanny.id == 8).unwrap();
    assert!(sloppy.nanny.experience_years.is_none());
}

#[actix_web::test]
async fn test_integration_evaluate_rejects_too_many_children() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let (job, family, _) = create_job_side();
    let children: Vec<Value> = (0..21).map(|id| json!({ "id": id })).collect();
    let payload = json!({
        "job": job,
        "family": family,
        "children": children,
        "nanny": create_candidate(7, false, -23.60)
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/matching/evaluate")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");
}
