//! Gateway, auth and resource service tests against the mock backend
//!
//! - Bearer token attached to every call
//! - 401 handling: forced logout on regular calls, inline error on login
//! - Backend error payloads surfaced verbatim
//! - Bare-array and envelope list responses normalized

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::*;
use op_monitor::clients::AuthClient;
use op_monitor::error::ApiError;
use op_monitor::filters::{ActivityFilter, ActivityFilterKey, ResourceFilter};
use op_monitor::guard::View;
use op_monitor::services::{ActivityService, ProjectService, SquadService};
use op_monitor::types::{Role, Status};

// ═══════════════════════════════════════════════════════════════════════════
// Gateway
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let backend = MockBackend::start(|_| ok(json!([]))).await;
    let state = state(&backend.url, Some(Role::Analyst));

    ProjectService::new(&state).list_all().await.unwrap();

    let request = backend.last();
    assert_eq!(request.path, "/projetos");
    assert_eq!(request.authorization.as_deref(), Some("Bearer test-token"));
    assert!(request.query.is_empty());
}

#[tokio::test]
async fn test_401_on_regular_call_forces_login() {
    let backend = MockBackend::start(|_| error(StatusCode::UNAUTHORIZED, "Token expirado")).await;
    let state = state(&backend.url, Some(Role::Admin));
    assert_eq!(state.navigator.current(), View::Dashboard);

    let err = SquadService::new(&state).list_all().await.unwrap_err();

    assert!(matches!(err, ApiError::SessionExpired));
    assert!(state.session.token().is_none());
    assert!(!state.session.is_authenticated());
    assert_eq!(state.navigator.current(), View::Login);
}

#[tokio::test]
async fn test_401_while_on_login_view_is_inline() {
    let backend = MockBackend::start(|_| error(StatusCode::UNAUTHORIZED, "Token inválido")).await;
    let state = state(&backend.url, None);
    assert_eq!(state.navigator.current(), View::Login);

    let err = ProjectService::new(&state).list_all().await.unwrap_err();

    match err {
        ApiError::Unauthorized(message) => assert_eq!(message, "Token inválido"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(state.navigator.current(), View::Login);
}

#[tokio::test]
async fn test_rejected_login_is_inline_and_keeps_session() {
    let backend =
        MockBackend::start(|_| error(StatusCode::UNAUTHORIZED, "Login ou senha inválidos")).await;
    let state = state(&backend.url, Some(Role::Analyst));

    let err = AuthClient::new(&state)
        .login("maria", "errada", false)
        .await
        .unwrap_err();

    match err {
        ApiError::Unauthorized(message) => assert_eq!(message, "Login ou senha inválidos"),
        other => panic!("unexpected error: {other:?}"),
    }
    // The stored session is untouched by a failed login attempt
    assert_eq!(state.session.token().as_deref(), Some(TOKEN));
    assert_eq!(state.navigator.current(), View::Dashboard);
}

#[tokio::test]
async fn test_login_persists_session_and_enters_dashboard() {
    let backend = MockBackend::start(|req| {
        assert_eq!(req.path, "/auth/login");
        ok(json!({
            "token": "fresh-token",
            "usuario": {"id": 4, "nome": "Carlos", "login": "carlos", "role": "admin", "ativo": true}
        }))
    })
    .await;
    let state = state(&backend.url, None);

    let user = AuthClient::new(&state)
        .login("carlos", "segredo", true)
        .await
        .unwrap();

    assert_eq!(user.login, "carlos");
    assert!(state.session.is_admin());
    assert_eq!(state.session.token().as_deref(), Some("fresh-token"));
    assert_eq!(state.navigator.current(), View::Dashboard);

    let body = backend.last().body.unwrap();
    assert_eq!(body, json!({"login": "carlos", "senha": "segredo", "lembrar": true}));
}

#[tokio::test]
async fn test_logout_clears_without_backend_call() {
    let backend = MockBackend::start(|_| ok(json!({}))).await;
    let state = state(&backend.url, Some(Role::Admin));

    AuthClient::new(&state).logout();

    assert!(state.session.token().is_none());
    assert_eq!(state.navigator.current(), View::Login);
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_token_check() {
    let backend =
        MockBackend::start(|_| ok(json!({"valid": true, "usuario_id": 1, "role": "analista"}))).await;
    let state = state(&backend.url, Some(Role::Analyst));

    let check = AuthClient::new(&state).check().await.unwrap();

    assert!(check.valid);
    assert_eq!(check.role, Some(Role::Analyst));
    assert_eq!(backend.last().path, "/auth/check");
}

#[tokio::test]
async fn test_profile_lookup() {
    let backend = MockBackend::start(|req| match req.path.as_str() {
        "/auth/me" => ok(json!({"id": 1, "nome": "Maria Souza", "login": "maria", "role": "admin", "ativo": true})),
        _ => error(StatusCode::NOT_FOUND, "Not found"),
    })
    .await;
    let state = state(&backend.url, Some(Role::Analyst));

    let profile = AuthClient::new(&state).me().await.unwrap();

    assert_eq!(profile.nome, "Maria Souza");
    assert_eq!(profile.role, Role::Admin);
    let request = backend.last();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.authorization.as_deref(), Some("Bearer test-token"));
}

// ═══════════════════════════════════════════════════════════════════════════
// Error taxonomy
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_business_error_message_is_verbatim() {
    let backend =
        MockBackend::start(|_| error(StatusCode::BAD_REQUEST, "Já existe uma squad com esse nome"))
            .await;
    let state = state(&backend.url, Some(Role::Admin));

    let err = SquadService::new(&state).get(3).await.unwrap_err();

    assert_eq!(err.to_string(), "Já existe uma squad com esse nome");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
}

#[tokio::test]
async fn test_server_fault_is_generic() {
    let backend =
        MockBackend::start(|_| (StatusCode::INTERNAL_SERVER_ERROR, json!("boom"))).await;
    let state = state(&backend.url, Some(Role::Admin));

    let err = ActivityService::new(&state).statistics().await.unwrap_err();

    assert!(matches!(err, ApiError::Server { .. }));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let backend = MockBackend::start(|_| ok(json!({"unexpected": true}))).await;
    let state = state(&backend.url, Some(Role::Admin));

    let err = ProjectService::new(&state).get(1).await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let state = state("http://127.0.0.1:1/api", Some(Role::Admin));

    let err = ProjectService::new(&state).list_all().await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
    // No response means no 401, so the session survives
    assert!(state.session.is_authenticated());
}

// ═══════════════════════════════════════════════════════════════════════════
// Resource services
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_envelope_is_normalized() {
    let backend = MockBackend::start(|_| {
        ok(envelope(
            vec![project_json(1, "SP01", "Enem", "OP-1")],
            2,
            1,
            3,
        ))
    })
    .await;
    let state = state(&backend.url, Some(Role::Analyst));

    let page = ProjectService::new(&state)
        .list(Some(2), Some(1), &Default::default())
        .await
        .unwrap();

    assert_eq!(page.records.len(), 1);
    assert_eq!(page.records[0].nome, "Enem");
    let pagination = page.pagination.unwrap();
    assert_eq!((pagination.page, pagination.pages, pagination.total), (2, 3, 3));
    assert!(pagination.has_prev && pagination.has_next);

    let request = backend.last();
    assert_eq!(request.param("page"), Some("2"));
    assert_eq!(request.param("per_page"), Some("1"));
}

#[tokio::test]
async fn test_filters_are_sent_without_empty_values() {
    let backend = MockBackend::start(|_| ok(json!([]))).await;
    let state = state(&backend.url, Some(Role::Analyst));

    let mut filters = ActivityFilter::default();
    filters.set(ActivityFilterKey::Status, String::new());
    filters.set(ActivityFilterKey::Priority, "alta".to_string());
    ActivityService::new(&state)
        .list(None, None, &filters)
        .await
        .unwrap();

    let request = backend.last();
    assert_eq!(request.keys(), vec!["prioridade"]);
    assert_eq!(request.param("prioridade"), Some("alta"));
}

#[tokio::test]
async fn test_crud_paths_and_methods() {
    let backend = MockBackend::start(|req| match req.method {
        Method::DELETE => ok(json!({"message": "Squad excluída com sucesso"})),
        _ => ok(squad_json(5, "Auditoria")),
    })
    .await;
    let state = state(&backend.url, Some(Role::Admin));
    let service = SquadService::new(&state);
    let attrs = op_monitor::types::SquadAttrs {
        nome: "Auditoria".to_string(),
        descricao: String::new(),
    };

    service.create(&attrs).await.unwrap();
    service.update(5, &attrs).await.unwrap();
    service.delete(5).await.unwrap();

    let calls: Vec<(Method, String)> = backend
        .requests()
        .into_iter()
        .map(|r| (r.method, r.path))
        .collect();
    assert_eq!(
        calls,
        vec![
            (Method::POST, "/squads".to_string()),
            (Method::PUT, "/squads/5".to_string()),
            (Method::DELETE, "/squads/5".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_relationship_listings() {
    let backend = MockBackend::start(|req| match req.path.as_str() {
        "/squads/7/projetos" => ok(json!([project_json(1, "SP01", "Enem", "OP-1")])),
        "/squads/7/atividades" | "/projetos/1/atividades" => ok(json!([activity_json(
            9,
            "Destaque",
            "concluida",
            1,
            (7, "Auditoria")
        )])),
        _ => error(StatusCode::NOT_FOUND, "Not found"),
    })
    .await;
    let state = state(&backend.url, Some(Role::Analyst));

    let projects = SquadService::new(&state).projects(7).await.unwrap();
    let squad_activities = SquadService::new(&state).activities(7).await.unwrap();
    let project_activities = ProjectService::new(&state).activities(1).await.unwrap();

    assert_eq!(projects[0].ordem_producao.as_deref(), Some("OP-1"));
    assert_eq!(squad_activities[0].status, Status::Completed);
    assert_eq!(project_activities[0].squad.nome, "Auditoria");
    assert!(project_activities[0].data_fim_real.is_none());
}

#[tokio::test]
async fn test_statistics_decode() {
    let backend = MockBackend::start(|_| {
        ok(json!({
            "total": 6,
            "por_status": {"pendente": 1, "em_andamento": 2, "concluida": 3},
            "por_prioridade": {"baixa": 0, "media": 4, "alta": 2}
        }))
    })
    .await;
    let state = state(&backend.url, Some(Role::Analyst));

    let stats = ActivityService::new(&state).statistics().await.unwrap();

    assert_eq!(backend.last().path, "/atividades/estatisticas");
    assert_eq!(stats.total, 6);
    assert_eq!(stats.por_status.concluida, 3);
    assert_eq!(stats.por_prioridade.alta, 2);
}
