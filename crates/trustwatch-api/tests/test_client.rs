//! Gateway client against a local fake backend.
//!
//! Run with: cargo test --package trustwatch-api --test test_client

use std::collections::HashMap;
use std::time::Duration;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use trustwatch_api::fanout::claims_for_all;
use trustwatch_api::{ApiClient, Backend};
use trustwatch_common::entities::{Claim, Influencer, ResearchConfig, SourceFilters};
use trustwatch_common::{ApiError, Operation, VerificationStatus};

async fn spawn_backend(router: Router) -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    ApiClient::with_base_url(&format!("http://{addr}")).unwrap()
}

fn influencer(id: &str, name: &str) -> Influencer {
    Influencer {
        id: id.to_string(),
        name: name.to_string(),
        follower_count: 1_000,
        trust_score: 72.5,
        platform: "YouTube".to_string(),
    }
}

fn claim_json(id: &str, influencer_id: &str) -> Value {
    json!({
        "id": id,
        "influencer_id": influencer_id,
        "content": format!("claim {id}"),
        "category": "Nutrition",
        "verification_status": "Verified",
        "trust_score": 80.0,
        "source": "twitter",
        "date": "2024-05-01"
    })
}

#[tokio::test]
async fn lists_influencers() {
    let client = spawn_backend(Router::new().route(
        "/api/influencers",
        get(|| async { Json(json!([{ "id": "1", "name": "Dr. A", "follower_count": 10,
                                     "trust_score": 55.0, "platform": "Twitter" }])) }),
    ))
    .await;

    let influencers = client.list_influencers().await.unwrap();
    assert_eq!(influencers.len(), 1);
    assert_eq!(influencers[0].name, "Dr. A");
    assert_eq!(influencers[0].platform, "Twitter");
}

#[tokio::test]
async fn add_influencer_sends_query_parameters() {
    let client = spawn_backend(Router::new().route(
        "/api/influencers",
        post(|Query(params): Query<HashMap<String, String>>| async move {
            Json(json!({
                "id": "new",
                "name": params.get("name").cloned().unwrap_or_default(),
                "follower_count": 0,
                "trust_score": 0.0,
                "platform": params.get("platform").cloned().unwrap_or_default(),
            }))
        }),
    ))
    .await;

    let created = client.add_influencer("Dr. Joe & Co = 100%", "Instagram").await.unwrap();
    assert_eq!(created.name, "Dr. Joe & Co = 100%");
    assert_eq!(created.platform, "Instagram");
}

#[tokio::test]
async fn add_claim_sends_influencer_and_content() {
    let client = spawn_backend(Router::new().route(
        "/api/claims",
        post(|Query(params): Query<HashMap<String, String>>| async move {
            let mut claim = claim_json("c9", &params["influencer_id"]);
            claim["content"] = json!(params["content"]);
            claim["verification_status"] = json!("Pending");
            Json(claim)
        }),
    ))
    .await;

    let claim = client.add_claim("inf-7", "Cold showers boost immunity?").await.unwrap();
    assert_eq!(claim.influencer_id, "inf-7");
    assert_eq!(claim.content, "Cold showers boost immunity?");
    assert_eq!(claim.verification_status, VerificationStatus::Other("Pending".into()));
}

#[tokio::test]
async fn non_success_status_is_request_failed() {
    let client = spawn_backend(Router::new().route(
        "/api/influencers",
        post(|| async {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "detail": "bad platform" })))
        }),
    ))
    .await;

    let err = client.add_influencer("x", "y").await.unwrap_err();
    assert_eq!(err, ApiError::RequestFailed(Operation::AddInfluencer));
    assert_eq!(err.to_string(), "Failed to add influencer");
}

#[tokio::test]
async fn undecodable_body_is_request_failed() {
    let client = spawn_backend(
        Router::new().route("/api/stats", get(|| async { "definitely not json" })),
    )
    .await;

    let err = client.stats().await.unwrap_err();
    assert_eq!(err, ApiError::RequestFailed(Operation::GetStats));
}

#[tokio::test]
async fn unreachable_backend_is_request_failed() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::with_base_url(&format!("http://{addr}")).unwrap();
    let err = client.list_influencers().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch influencers");
}

#[tokio::test]
async fn research_config_round_trips_through_echoing_backend() {
    let client = spawn_backend(Router::new().route(
        "/api/config",
        post(|Json(body): Json<Value>| async move {
            Json(json!({ "status": "saved", "config": body }))
        }),
    ))
    .await;

    let config = ResearchConfig {
        date_range: "90d".to_string(),
        claim_limit: 250,
        journals: vec!["the lancet".into(), "pubmed".into()],
        categories: vec!["Fitness".into(), "Nutrition".into()],
        sources: SourceFilters {
            scientific_journals: vec!["nejm".into(), "pubmed".into()],
            social_media: vec!["youtube".into()],
            claim_types: vec!["implicit".into(), "explicit".into()],
            min_confidence: 0.3,
        },
    };

    let ack = client.update_research_config(&config).await.unwrap();
    assert_eq!(ack.status.as_deref(), Some("saved"));
    assert_eq!(ack.echoed_config(), Some(config));
}

#[tokio::test]
async fn batch_and_journal_requests_send_json_bodies() {
    let client = spawn_backend(
        Router::new()
            .route(
                "/api/batch-process",
                post(|Json(claims): Json<Vec<String>>| async move {
                    let results: Vec<Value> =
                        claims.iter().map(|c| json!({ "claim": c })).collect();
                    Json(json!({ "results": results }))
                }),
            )
            .route(
                "/api/validate/journals",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({ "status": "ok", "echo": body["claim"] }))
                }),
            ),
    )
    .await;

    let batch = client
        .batch_process_claims(&["a".to_string(), "b".to_string()])
        .await
        .unwrap();
    assert_eq!(batch.results, vec![json!({ "claim": "a" }), json!({ "claim": "b" })]);

    let validation = client.validate_with_journals("Fasting heals").await.unwrap();
    assert_eq!(validation.extra.get("echo"), Some(&json!("Fasting heals")));
}

#[tokio::test]
async fn scan_and_analysis_use_id_paths() {
    let client = spawn_backend(
        Router::new()
            .route(
                "/api/influencers/{id}/scan",
                post(|Path(id): Path<String>| async move {
                    Json(json!({ "claims": [claim_json("s1", &id), claim_json("s2", &id)] }))
                }),
            )
            .route(
                "/api/influencers/{id}/analyze",
                get(|Path(id): Path<String>| async move {
                    Json(json!({
                        "name": id,
                        "total_claims": 2,
                        "status_breakdown": { "Verified": 2 },
                    }))
                }),
            ),
    )
    .await;

    let scan = client.scan_influencer("inf 1").await.unwrap();
    assert_eq!(scan.claims.len(), 2);
    assert!(scan.claims.iter().all(|c| c.influencer_id == "inf 1"));

    let analysis = client.influencer_analysis("inf 1").await.unwrap();
    assert_eq!(analysis.name.as_deref(), Some("inf 1"));
    assert_eq!(analysis.status_breakdown.get("Verified"), Some(&2));
}

#[tokio::test]
async fn free_text_and_podcast_analysis_pass_query() {
    let client = spawn_backend(
        Router::new()
            .route(
                "/api/analyze",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    Json(json!({ "message": q["content"] }))
                }),
            )
            .route(
                "/api/analyze/podcast",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    Json(json!({ "message": q["url"] }))
                }),
            ),
    )
    .await;

    let analysis = client.analyze_claim("Sugar is toxic?").await.unwrap();
    assert_eq!(analysis.message.as_deref(), Some("Sugar is toxic?"));

    let podcast = client.analyze_podcast("https://pod.example/ep?id=1&t=2").await.unwrap();
    assert_eq!(podcast.message.as_deref(), Some("https://pod.example/ep?id=1&t=2"));
}

#[tokio::test]
async fn fan_out_keeps_influencer_order_not_completion_order() {
    let client = spawn_backend(Router::new().route(
        "/api/claims/{id}",
        get(|Path(id): Path<String>| async move {
            // The first influencer answers last.
            let delay = if id == "first" { 150 } else { 0 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Json(json!([claim_json(&format!("{id}-1"), &id), claim_json(&format!("{id}-2"), &id)]))
        }),
    ))
    .await;

    let influencers = vec![
        influencer("first", "A"),
        influencer("second", "B"),
        influencer("third", "C"),
    ];
    let claims: Vec<Claim> = claims_for_all(&client, &influencers).await.unwrap();
    let ids: Vec<&str> = claims.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["first-1", "first-2", "second-1", "second-2", "third-1", "third-2"]);
}

#[tokio::test]
async fn fan_out_fails_when_any_influencer_fails() {
    let client = spawn_backend(Router::new().route(
        "/api/claims/{id}",
        get(|Path(id): Path<String>| async move {
            if id == "broken" {
                Err(StatusCode::INTERNAL_SERVER_ERROR)
            } else {
                Ok(Json(json!([claim_json("ok", &id)])))
            }
        }),
    ))
    .await;

    let influencers = vec![influencer("fine", "A"), influencer("broken", "B")];
    let err = claims_for_all(&client, &influencers).await.unwrap_err();
    assert_eq!(err, ApiError::RequestFailed(Operation::ListClaims));
}
