// Integration tests for JobSwipe Match

use actix_web::{test, web, App};
use jobswipe_match::core::{Matcher, RankOptions};
use jobswipe_match::models::{CandidateProfile, Coordinates, JobPosting, Modality, RankedJobsResponse, MatchResult};
use jobswipe_match::routes::{self, jobs::{AppState, ListingLimits}};
use jobswipe_match::services::{DataStoreClient, DataStoreTables, ProfileCache};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn create_job(title: &str, modality: Modality, skills: &[&str], coordinates: Option<Coordinates>) -> JobPosting {
    JobPosting {
        title: title.to_string(),
        category: "Engineering".to_string(),
        modality,
        required_skills: skills.iter().map(|s| s.to_string()).collect(),
        coordinates,
        ..Default::default()
    }
}

fn create_candidate() -> CandidateProfile {
    CandidateProfile {
        skills: vec!["TypeScript".to_string(), "React".to_string()],
        tools: vec!["Figma".to_string()],
        target_role: "Frontend Developer".to_string(),
        target_industry: "Engineering".to_string(),
        preferred_modality: Modality::Remote,
        search_radius_km: Some(25.0),
        coordinates: Some(Coordinates::new(-23.5505, -46.6333)),
        ..Default::default()
    }
}

fn app_state(store_url: String) -> AppState {
    let datastore = DataStoreClient::new(
        store_url,
        "anon_key".to_string(),
        DataStoreTables {
            jobs: "jobs".to_string(),
            profiles: "profiles".to_string(),
        },
        Duration::from_secs(5),
    )
    .unwrap();

    AppState {
        datastore: Arc::new(datastore),
        cache: ProfileCache::new(100, 60),
        matcher: Matcher::deterministic(),
        limits: ListingLimits::default(),
    }
}

#[::core::prelude::v1::test]
fn test_integration_end_to_end_ranking() {
    let matcher = Matcher::deterministic();
    let candidate = create_candidate();

    let jobs = vec![
        create_job("Frontend Developer", Modality::Remote, &["React", "TypeScript"], None),
        create_job("Backend Developer", Modality::OnSite, &["Java"], Some(Coordinates::new(-23.56, -46.64))),
        create_job("Frontend Developer", Modality::OnSite, &["React"], Some(Coordinates::new(-22.9068, -43.1729))),
        create_job("UX Designer", Modality::Hybrid, &["Figma"], None),
    ];

    let result = matcher.rank_jobs(Some(&candidate), jobs, RankOptions { limit: 10, radius_filter: true });

    // The Rio posting is ~360km away and on-site
    assert_eq!(result.total_jobs, 4);
    assert_eq!(result.jobs.len(), 3);
    assert_eq!(result.jobs[0].job.title, "Frontend Developer");
    assert_eq!(result.jobs[0].result.score, 85);

    for pair in result.jobs.windows(2) {
        assert!(pair[0].result.score >= pair[1].result.score, "Jobs not sorted by score");
    }
    for scored in &result.jobs {
        assert!(scored.result.match_reasons.len() <= 2);
    }
}

#[::core::prelude::v1::test]
fn test_score_range_with_live_randomness() {
    let matcher = Matcher::new(true);
    let candidate = create_candidate();
    let job = create_job("Frontend Developer", Modality::Remote, &["React", "TypeScript"], None);

    for _ in 0..100 {
        let result = matcher.score(&job, Some(&candidate));
        // 40 + 20 + 15 + 10 plus a 0-9 draw
        assert!((85..=94).contains(&result.score), "Score {} out of range", result.score);
    }
}

#[actix_web::test]
async fn test_score_endpoint() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state("http://127.0.0.1:9".to_string())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/jobs/score")
        .set_json(json!({
            "job": {
                "title": "Senior React Dev",
                "category": "Engineering",
                "modality": "on-site",
                "requiredSkills": ["React", "Tailwind"]
            },
            "candidate": {
                "skills": ["React"],
                "tools": ["Tailwind"],
                "targetRole": "React Dev",
                "targetIndustry": "Engineering",
                "preferredModality": "OnSite",
                "experienceLevel": "Senior",
                "searchRadiusKm": 50
            }
        }))
        .to_request();

    let result: MatchResult = test::call_and_read_body_json(&app, req).await;

    assert_eq!(result.score, 90);
    assert_eq!(result.match_reasons, vec!["2 matching skills", "Desired role compatible"]);
    assert_eq!(result.distance_km, None);
}

#[actix_web::test]
async fn test_score_endpoint_without_candidate() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state("http://127.0.0.1:9".to_string())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/jobs/score")
        .set_json(json!({ "job": { "title": "Barista" } }))
        .to_request();

    let result: MatchResult = test::call_and_read_body_json(&app, req).await;

    assert_eq!(result.score, 50);
    assert_eq!(result.match_reasons.len(), 1);
}

#[actix_web::test]
async fn test_rank_endpoint_caps_limit() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state("http://127.0.0.1:9".to_string())))
            .configure(routes::configure_routes),
    )
    .await;

    let jobs: Vec<JobPosting> = (0..150)
        .map(|i| create_job(&format!("Engineer {}", i), Modality::Remote, &[], None))
        .collect();

    let req = test::TestRequest::post()
        .uri("/api/v1/jobs/rank")
        .set_json(json!({ "candidate": create_candidate(), "jobs": jobs, "limit": 500 }))
        .to_request();

    let response: RankedJobsResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(response.total_jobs, 150);
    assert_eq!(response.jobs.len(), 100);
}

#[actix_web::test]
async fn test_rank_endpoint_rejects_zero_limit() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state("http://127.0.0.1:9".to_string())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/jobs/rank")
        .set_json(json!({ "jobs": [], "limit": 0 }))
        .to_request();

    let response = test::call_service(&app, req).await;

    assert_eq!(response.status(), 400);
}

#[actix_web::test]
async fn test_feed_endpoint_reads_data_store() {
    let mut server = mockito::Server::new_async().await;
    let profile_mock = server
        .mock("GET", "/rest/v1/profiles")
        .match_query(mockito::Matcher::UrlEncoded("id".into(), "eq.user-42".into()))
        .with_status(200)
        .with_body(
            json!([{
                "skills": ["React"],
                "metadata": { "tools": ["TypeScript"], "preferredModality": "remote", "experienceLevel": "Junior" },
                "target_role": "Frontend Developer",
                "industry": "Engineering",
                "search_radius": 30,
                "latitude": -23.5505,
                "longitude": -46.6333
            }])
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    server
        .mock("GET", "/rest/v1/jobs")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(
            json!([
                { "title": "Junior Frontend Developer", "category": "Engineering", "type": "Remote",
                  "required_skills": ["React", "TypeScript"] },
                { "title": "Warehouse Operator", "category": "Logistics", "type": "Presencial",
                  "required_skills": ["Forklift"], "latitude": -22.9068, "longitude": -43.1729 },
                { "title": "Account Manager", "category": "Sales", "type": "presencial",
                  "required_skills": null, "latitude": -23.56, "longitude": -46.64 }
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(server.url())))
            .configure(routes::configure_routes),
    )
    .await;

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/v1/jobs/feed")
            .set_json(json!({ "userId": "user-42", "applyRadiusFilter": true }))
            .to_request();

        let response: RankedJobsResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(response.total_jobs, 3);
        assert_eq!(response.jobs.len(), 2);
        assert_eq!(response.jobs[0].job.title, "Junior Frontend Developer");
        // 40 skills + 20 role + 15 modality + 15 experience
        assert_eq!(response.jobs[0].result.score, 90);
        assert_eq!(response.jobs[1].job.title, "Account Manager");
        assert!(response.jobs[1].result.distance_km.is_some());
    }

    // Second request is served from the profile cache
    profile_mock.assert_async().await;
}

#[actix_web::test]
async fn test_feed_endpoint_without_profile_uses_neutral_score() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/v1/profiles")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    server
        .mock("GET", "/rest/v1/jobs")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(json!([{ "title": "Cook" }, { "title": "Driver" }]).to_string())
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(server.url())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/jobs/feed")
        .set_json(json!({ "userId": "new-user" }))
        .to_request();

    let response: RankedJobsResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(response.jobs.len(), 2);
    assert!(response.jobs.iter().all(|j| j.result.score == 50));
}

#[actix_web::test]
async fn test_feed_endpoint_reports_store_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/v1/profiles")
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(server.url())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/jobs/feed")
        .set_json(json!({ "userId": "user-1" }))
        .to_request();

    let response = test::call_service(&app, req).await;

    assert_eq!(response.status(), 502);
}

#[actix_web::test]
async fn test_feed_endpoint_validates_user_id() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state("http://127.0.0.1:9".to_string())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/jobs/feed")
        .set_json(json!({ "userId": "" }))
        .to_request();

    let response = test::call_service(&app, req).await;

    assert_eq!(response.status(), 400);
}

#[actix_web::test]
async fn test_invalidate_profile_cache() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state("http://127.0.0.1:9".to_string())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::delete()
        .uri("/api/v1/profiles/user-1/cache")
        .to_request();

    let response = test::call_service(&app, req).await;

    assert_eq!(response.status(), 204);
}
