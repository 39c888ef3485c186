#[allow(dead_code)]
mod common;

use common::{MockBackend, dead_base_url};

use lastos_api::types::{CertificateAction, InfectionLevel, PlayerRole, SessionStatus};
use lastos_api::{ApiClient, ApiConfig, ApiError};
use lastos_core::context::SessionContext;

#[tokio::test]
async fn requests_carry_json_content_type_and_bearer_token() {
    let server = MockBackend::start().await;
    let ctx = SessionContext::in_memory();
    ctx.set_auth("id-token-1", "Ana").unwrap();
    let client = server.client(ctx);

    client.game_state("s-1").await.unwrap();

    let req = server.last_request();
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/api/session/s-1/state");
    assert_eq!(req.content_type.as_deref(), Some("application/json"));
    assert_eq!(req.authorization.as_deref(), Some("Bearer id-token-1"));
}

#[tokio::test]
async fn no_token_means_no_authorization_header() {
    let server = MockBackend::start().await;
    let client = server.client(SessionContext::in_memory());

    client.leaderboard("s-1").await.unwrap();

    assert_eq!(server.last_request().authorization, None);
}

#[tokio::test]
async fn token_changes_are_picked_up_by_existing_client() {
    let server = MockBackend::start().await;
    let ctx = SessionContext::in_memory();
    let client = server.client(ctx.clone());

    ctx.set_token("refreshed").unwrap();
    client.ledger("s-1").await.unwrap();

    assert_eq!(
        server.last_request().authorization.as_deref(),
        Some("Bearer refreshed")
    );
}

#[tokio::test]
async fn create_session_records_session_id() {
    let server = MockBackend::start().await;
    let ctx = SessionContext::in_memory();
    let client = server.client(ctx.clone());

    let resp = client.create_session().await.unwrap();

    assert_eq!(resp.session_id, "s-100");
    assert_eq!(resp.session.status, SessionStatus::Waiting);
    assert_eq!(ctx.session_id().as_deref(), Some("s-100"));
    assert_eq!(server.last_request().method, "POST");
}

#[tokio::test]
async fn join_session_records_session_id() {
    let server = MockBackend::start().await;
    let ctx = SessionContext::in_memory();
    let client = server.client(ctx.clone());

    let resp = client.join_session("s-42").await.unwrap();

    assert_eq!(resp.player_count, 4);
    assert_eq!(ctx.session_id().as_deref(), Some("s-42"));
    assert_eq!(server.last_request().path, "/api/session/s-42/join");
}

#[tokio::test]
async fn failed_join_leaves_session_id_untouched() {
    let server = MockBackend::start().await;
    let ctx = SessionContext::in_memory();
    ctx.set_session_id("s-old").unwrap();
    let client = server.client(ctx.clone());

    let err = client.join_session("missing").await.unwrap_err();

    match err {
        ApiError::Status {
            status,
            message,
            body,
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Session not found");
            assert_eq!(body["error"], "Session not found");
        },
        other => panic!("expected status error, got {other:?}"),
    }
    assert_eq!(ctx.session_id().as_deref(), Some("s-old"));
}

#[tokio::test]
async fn plain_text_error_body_uses_reason_phrase() {
    let server = MockBackend::start().await;
    server.set_fail_state(true);
    let client = server.client(SessionContext::in_memory());

    let err = client.game_state("s-1").await.unwrap_err();

    assert_eq!(err.status(), Some(502));
    match err {
        ApiError::Status { message, body, .. } => {
            assert_eq!(message, "Bad Gateway");
            assert_eq!(body, serde_json::json!("upstream unavailable"));
        },
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn mismatched_success_body_is_decode_error() {
    let server = MockBackend::start().await;
    let client = server.client(SessionContext::in_memory());

    let err = client.game_state("garbled").await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let base = dead_base_url().await;
    let client = ApiClient::new(&ApiConfig::with_base(base), SessionContext::in_memory()).unwrap();

    let err = client.game_state("s-1").await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn auth_endpoints_send_camel_case_bodies() {
    let server = MockBackend::start().await;
    let client = server.client(SessionContext::in_memory());

    let verified = client.verify_token("abc").await.unwrap();
    assert_eq!(verified.uid, "uid-for-abc");
    assert_eq!(server.last_request().body, serde_json::json!({ "idToken": "abc" }));

    let registered = client
        .register_user("ana@vitstudent.ac.in", "Ana")
        .await
        .unwrap();
    assert_eq!(registered.user_id, "u-7");
    assert_eq!(registered.message, "Registered Ana");
    assert_eq!(
        server.last_request().body,
        serde_json::json!({ "email": "ana@vitstudent.ac.in", "displayName": "Ana" })
    );
}

#[tokio::test]
async fn round_lifecycle_endpoints() {
    let server = MockBackend::start().await;
    let client = server.client(SessionContext::in_memory());

    let started = client.start_session("s-1").await.unwrap();
    assert_eq!(started.roles["u-2"], PlayerRole::Attacker);
    assert_eq!(started.roles.len(), 4);

    let next = client.next_round("s-1").await.unwrap();
    assert!(!next.game_over);
    assert_eq!(next.new_round, Some(2));
    assert_eq!(next.winner, None);
    assert_eq!(server.last_request().path, "/api/session/s-1/nextRound");
}

#[tokio::test]
async fn game_state_decodes_polled_fields() {
    let server = MockBackend::start().await;
    let client = server.client(SessionContext::in_memory());

    let state = client.game_state("s-1").await.unwrap();

    assert_eq!(state.global_health, 87.5);
    assert_eq!(state.current_round, 1);
    assert_eq!(state.player_role, Some(PlayerRole::Citizen));
    assert_eq!(state.total_players, 4);
    assert_eq!(state.cooldown_remaining(1_000.0), std::time::Duration::ZERO);
}

#[tokio::test]
async fn minigame_fetch_and_submit() {
    let server = MockBackend::start().await;
    let client = server.client(SessionContext::in_memory());

    let mg = client.minigame("s-1").await.unwrap();
    assert_eq!(mg.problem_id, "p-9");
    assert_eq!(mg.problem.kind, "sensor_average");
    assert_eq!(mg.problem.readings, Some(vec![1.0, 2.0, 3.0]));

    let clean = client
        .submit_minigame("s-1", &mg.problem_id, 2.0, None)
        .await
        .unwrap();
    assert_eq!(clean.certificate_id, "c-1");
    assert_eq!(clean.score, 20.0);
    let req = server.last_request();
    assert_eq!(req.path, "/api/session/s-1/minigame/submit");
    assert_eq!(req.body, serde_json::json!({ "problemId": "p-9", "answer": 2.0 }));

    client
        .submit_minigame("s-1", "p-9", 2.0, Some(InfectionLevel::Minor))
        .await
        .unwrap();
    assert_eq!(server.last_request().body["infectionLevel"], "minor");
}

#[tokio::test]
async fn authority_processes_pending_certificate() {
    let server = MockBackend::start().await;
    let client = server.client(SessionContext::in_memory());

    let pending = client.pending_certificates("s-1").await.unwrap();
    assert_eq!(pending.certificates.len(), 1);
    let cert = &pending.certificates[0];

    let resp = client
        .process_certificate("s-1", &cert.id, CertificateAction::Approve, 72.0)
        .await
        .unwrap();
    assert!(resp.approved);
    assert_eq!(resp.health_change, -5.0);
    assert_eq!(resp.winner, None);

    let req = server.last_request();
    assert_eq!(req.path, "/api/session/s-1/certificates/c-1/process");
    assert_eq!(
        req.body,
        serde_json::json!({ "action": "approve", "medianEstimate": 72.0 })
    );
}

#[tokio::test]
async fn auditor_reads_ledger_and_issues_cooldown() {
    let server = MockBackend::start().await;
    let client = server.client(SessionContext::in_memory());

    let ledger = client.ledger("s-1").await.unwrap();
    assert_eq!(ledger.entries.len(), 1);
    assert!(ledger.entries[0].was_infected);

    let target = ledger.entries[0].player_id.clone();
    let resp = client
        .issue_cooldown("s-1", &target, "infected certificate")
        .await
        .unwrap();
    assert_eq!(resp.cooldown_duration, 60_000.0);
    assert_eq!(
        server.last_request().body,
        serde_json::json!({ "targetPlayerId": "u-2", "reason": "infected certificate" })
    );
}
