//! List-view controller and dashboard tests against the mock backend
//!
//! - Filter and page-size changes reset to the first page
//! - Delete is only issued after confirmation
//! - Read-only sessions cannot reach mutating flows
//! - Failed submissions keep the form
//! - Auxiliary and dashboard loads

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::*;
use op_monitor::controller::{Confirmation, DeleteOutcome, ListController, SelectOptions};
use op_monitor::dashboard::Dashboard;
use op_monitor::error::{ApiError, ControllerError};
use op_monitor::filters::{ActivityFilterKey, ProjectFilterKey};
use op_monitor::notify::RecordingNotifier;
use op_monitor::pagination::{PageChange, PageItem};
use op_monitor::services::{Activities, Projects, Squads, Users};
use op_monitor::types::{Priority, Role};

/// 95 projects served in pages of whatever size is requested.
async fn paged_projects() -> MockBackend {
    MockBackend::start(|req| {
        let page: u32 = req.param("page").and_then(|p| p.parse().ok()).unwrap_or(1);
        let per_page: u32 = req.param("per_page").and_then(|p| p.parse().ok()).unwrap_or(10);
        let items = (0..per_page.min(3))
            .map(|i| project_json(i64::from(i) + 1, "SP01", "Enem", "OP-1"))
            .collect();
        ok(envelope(items, page, per_page, 95))
    })
    .await
}

// ═══════════════════════════════════════════════════════════════════════════
// Filters and pages
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_filter_change_resets_to_first_page() {
    let backend = paged_projects().await;
    let notifier = Arc::new(RecordingNotifier::new());
    let mut controller =
        ListController::<Projects>::new(state(&backend.url, Some(Role::Analyst)), notifier);

    controller.change_page(PageChange::to_page(4)).await.unwrap();
    assert_eq!(controller.page(), 4);
    assert_eq!(backend.last().param("page"), Some("4"));

    controller
        .set_filter(ProjectFilterKey::ProductionOrder, "OP-1")
        .await
        .unwrap();

    let request = backend.last();
    assert_eq!(controller.page(), 1);
    assert_eq!(request.param("page"), Some("1"));
    assert_eq!(request.param("search_ordem_producao"), Some("OP-1"));
}

#[tokio::test]
async fn test_page_size_change_forces_first_page() {
    let backend = paged_projects().await;
    let notifier = Arc::new(RecordingNotifier::new());
    let mut controller =
        ListController::<Projects>::new(state(&backend.url, Some(Role::Analyst)), notifier);

    controller.change_page(PageChange::to_page(3)).await.unwrap();
    let view = controller.pagination_view().unwrap();
    let resize = view.select_page_size(50).unwrap();
    controller.change_page(resize).await.unwrap();

    assert_eq!((controller.page(), controller.per_page()), (1, 50));
    let request = backend.last();
    assert_eq!(request.param("page"), Some("1"));
    assert_eq!(request.param("per_page"), Some("50"));

    let view = controller.pagination_view().unwrap();
    assert_eq!(view.pages, 2);
    assert!(!view.prev_enabled);
    assert!(view.next_enabled);

    // A size the selector does not offer is ignored
    controller.change_page(PageChange::resize(7)).await.unwrap();
    assert_eq!((controller.page(), controller.per_page()), (1, 50));
    assert_eq!(backend.last().param("per_page"), Some("50"));
}

#[tokio::test]
async fn test_pagination_widget_drives_controller() {
    let backend = paged_projects().await;
    let notifier = Arc::new(RecordingNotifier::new());
    let mut controller =
        ListController::<Projects>::new(state(&backend.url, Some(Role::Analyst)), notifier);

    controller.refresh().await.unwrap();
    let view = controller.pagination_view().unwrap();
    assert_eq!(view.pages, 10);
    assert_eq!(view.items.last(), Some(&PageItem::Page(10)));
    assert!(view.select(PageItem::Ellipsis).is_none());

    let last = view.last().unwrap();
    controller.change_page(last).await.unwrap();
    assert_eq!(controller.page(), 10);
    assert_eq!(controller.pagination_view().unwrap().start_item, 91);
}

#[tokio::test]
async fn test_empty_activity_filters_are_omitted() {
    let backend = MockBackend::start(|_| ok(json!([]))).await;
    let notifier = Arc::new(RecordingNotifier::new());
    let mut controller =
        ListController::<Activities>::new(state(&backend.url, Some(Role::Analyst)), notifier);

    controller.set_filter(ActivityFilterKey::Status, "").await.unwrap();
    controller
        .set_filter(ActivityFilterKey::Priority, Priority::High.as_str())
        .await
        .unwrap();

    assert_eq!(backend.last().keys(), vec!["page", "per_page", "prioridade"]);
    assert!(controller.pagination_view().is_none());

    controller.clear_filters().await.unwrap();
    assert_eq!(backend.last().keys(), vec!["page", "per_page"]);
}

#[tokio::test]
async fn test_failed_refresh_notifies_and_empties() {
    let backend = MockBackend::start(|req| match req.param("page") {
        Some("1") => ok(json!([squad_json(1, "Auditoria")])),
        _ => error(StatusCode::INTERNAL_SERVER_ERROR, "Erro interno"),
    })
    .await;
    let notifier = Arc::new(RecordingNotifier::new());
    let mut controller = ListController::<Squads>::new(
        state(&backend.url, Some(Role::Analyst)),
        notifier.clone(),
    );

    controller.refresh().await.unwrap();
    assert_eq!(controller.records().len(), 1);

    let err = controller.change_page(PageChange::to_page(2)).await.unwrap_err();

    assert!(matches!(err, ControllerError::Api(ApiError::Server { .. })));
    assert!(controller.records().is_empty());
    assert_eq!(notifier.errors().len(), 1);
    assert!(notifier.errors()[0].starts_with("Failed to load squads"));
}

// ═══════════════════════════════════════════════════════════════════════════
// Delete confirmation
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_delete_waits_for_confirmation() {
    let backend = MockBackend::start(|req| match req.method {
        Method::DELETE => ok(json!({"message": "Squad excluída com sucesso"})),
        _ => ok(json!([squad_json(2, "Recodificação")])),
    })
    .await;
    let notifier = Arc::new(RecordingNotifier::new());
    let mut controller =
        ListController::<Squads>::new(state(&backend.url, Some(Role::Admin)), notifier.clone());
    controller.refresh().await.unwrap();
    let record = controller.records()[0].clone();

    let pending = controller.request_delete(&record).unwrap();
    assert!(pending.prompt().contains("Recodificação"));
    assert_eq!(backend.count(Method::DELETE), 0);

    let outcome = controller
        .resolve_delete(pending.clone(), Confirmation::Cancelled)
        .await
        .unwrap();
    assert_eq!(outcome, DeleteOutcome::Cancelled);
    assert_eq!(backend.count(Method::DELETE), 0);
    assert_eq!(controller.records().len(), 1);

    let outcome = controller
        .resolve_delete(pending, Confirmation::Confirmed)
        .await
        .unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(backend.count(Method::DELETE), 1);
    assert!(backend
        .requests()
        .iter()
        .any(|r| r.method == Method::DELETE && r.path == "/squads/2"));
    assert_eq!(notifier.successes(), vec!["Squad deleted successfully"]);
}

#[tokio::test]
async fn test_failed_delete_leaves_list_untouched() {
    let backend = MockBackend::start(|req| match req.method {
        Method::DELETE => error(StatusCode::BAD_REQUEST, "Squad possui atividades vinculadas"),
        _ => ok(json!([squad_json(2, "Recodificação"), squad_json(3, "Auditoria")])),
    })
    .await;
    let notifier = Arc::new(RecordingNotifier::new());
    let mut controller =
        ListController::<Squads>::new(state(&backend.url, Some(Role::Admin)), notifier.clone());
    controller.refresh().await.unwrap();
    let before = controller.records().to_vec();
    backend.clear();

    let pending = controller.request_delete(&before[0]).unwrap();
    let err = controller
        .resolve_delete(pending, Confirmation::Confirmed)
        .await
        .unwrap_err();

    assert!(matches!(err, ControllerError::Api(ApiError::Api { .. })));
    assert_eq!(controller.records(), before.as_slice());
    assert_eq!(
        notifier.errors(),
        vec!["Failed to delete: Squad possui atividades vinculadas"]
    );
    assert!(notifier.successes().is_empty());
    // Only the DELETE went out; no refresh followed it
    let calls: Vec<Method> = backend.requests().into_iter().map(|r| r.method).collect();
    assert_eq!(calls, vec![Method::DELETE]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Role gating
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_read_only_session_cannot_mutate() {
    let backend = MockBackend::start(|_| ok(json!([squad_json(2, "Auditoria")]))).await;
    let notifier = Arc::new(RecordingNotifier::new());
    let mut controller =
        ListController::<Squads>::new(state(&backend.url, Some(Role::Analyst)), notifier);
    controller.refresh().await.unwrap();
    backend.clear();
    let record = controller.records()[0].clone();

    assert!(!controller.can_mutate());
    assert!(matches!(controller.open_create_form(), Err(ControllerError::ReadOnly)));
    assert!(matches!(controller.edit(record.clone()), Err(ControllerError::ReadOnly)));
    assert!(matches!(controller.request_delete(&record), Err(ControllerError::ReadOnly)));
    assert!(matches!(controller.submit().await, Err(ControllerError::ReadOnly)));
    assert!(!controller.is_form_open());
    assert!(backend.requests().is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// Form submission
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_create_then_refresh() {
    let backend = MockBackend::start(|req| match req.method {
        Method::POST => ok(squad_json(8, "Nova")),
        _ => ok(json!([squad_json(8, "Nova")])),
    })
    .await;
    let notifier = Arc::new(RecordingNotifier::new());
    let mut controller =
        ListController::<Squads>::new(state(&backend.url, Some(Role::Admin)), notifier.clone());

    controller.open_create_form().unwrap();
    controller.form_mut().nome = "Nova".to_string();
    let created = controller.submit().await.unwrap();

    assert_eq!(created.id, 8);
    assert!(!controller.is_form_open());
    assert_eq!(controller.records().len(), 1);
    assert_eq!(notifier.successes(), vec!["Squad created successfully"]);
    let post = &backend.requests()[0];
    assert_eq!(post.body.as_ref().unwrap()["nome"], "Nova");
}

#[tokio::test]
async fn test_failed_submit_keeps_form() {
    let backend = MockBackend::start(|req| match req.method {
        Method::PUT => error(StatusCode::BAD_REQUEST, "Login já está em uso"),
        _ => ok(json!({"id": 3, "nome": "Ana", "login": "ana", "role": "analista"})),
    })
    .await;
    let state = state(&backend.url, Some(Role::Admin));
    let notifier = Arc::new(RecordingNotifier::new());
    let mut controller = ListController::<Users>::new(state.clone(), notifier.clone());

    let user = op_monitor::services::UserService::new(&state).get(3).await.unwrap();
    controller.edit(user).unwrap();
    controller.form_mut().login = "maria".to_string();

    let err = controller.submit().await.unwrap_err();

    assert_eq!(err.to_string(), "Login já está em uso");
    assert!(controller.is_form_open());
    assert_eq!(controller.form().login, "maria");
    assert_eq!(controller.editing().map(|u| u.id), Some(3));
    assert_eq!(notifier.errors(), vec!["Failed to save: Login já está em uso"]);

    // No password typed on edit, so none is sent
    let put = backend.last();
    assert_eq!(put.method, Method::PUT);
    assert!(put.body.unwrap().get("senha").is_none());
}

#[tokio::test]
async fn test_invalid_form_is_not_sent() {
    let backend = MockBackend::start(|_| ok(json!({}))).await;
    let notifier = Arc::new(RecordingNotifier::new());
    let mut controller =
        ListController::<Activities>::new(state(&backend.url, Some(Role::Admin)), notifier.clone());

    controller.open_create_form().unwrap();
    controller.form_mut().titulo = "Destaque".to_string();
    let err = controller.submit().await.unwrap_err();

    assert!(matches!(err, ControllerError::Validation(_)));
    assert!(controller.is_form_open());
    assert_eq!(notifier.errors(), vec!["Project is required"]);
    assert!(backend.requests().is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// Auxiliary lists and dashboard
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_select_options_fail_independently() {
    let backend = MockBackend::start(|req| match req.path.as_str() {
        "/projetos" => error(StatusCode::INTERNAL_SERVER_ERROR, "Erro interno"),
        _ => ok(json!([squad_json(1, "Auditoria"), squad_json(2, "Recodificação")])),
    })
    .await;
    let state = state(&backend.url, Some(Role::Analyst));
    let notifier = RecordingNotifier::new();

    let options = SelectOptions::load(&state, &notifier).await;

    assert!(options.projects.is_empty());
    assert_eq!(options.squads.len(), 2);
    assert_eq!(notifier.errors().len(), 1);
    assert!(notifier.errors()[0].starts_with("Failed to load projects"));
}

#[tokio::test]
async fn test_dashboard_load_builds_sections() {
    let backend = MockBackend::start(|req| match req.path.as_str() {
        "/projetos" => ok(json!([
            project_json(1, "SP01", "Enem", "OP-1"),
            project_json(2, "SP02", "Saeb", "OP-2"),
        ])),
        "/squads" => ok(json!([squad_json(10, "Auditoria"), squad_json(20, "Recodificação")])),
        "/atividades" => ok(json!([
            activity_json(1, "Destaque", "concluida", 1, (10, "Auditoria")),
            activity_json(2, "Destaque", "pendente", 1, (10, "Auditoria")),
            activity_json(3, "Destaque", "concluida", 2, (10, "Auditoria")),
            activity_json(4, "Destaque", "em_andamento", 2, (10, "Auditoria")),
        ])),
        _ => error(StatusCode::NOT_FOUND, "Not found"),
    })
    .await;
    let state = state(&backend.url, Some(Role::Analyst));

    let dashboard = Dashboard::load(&state).await.unwrap();

    // Every collection is fetched unpaginated
    assert!(backend.requests().iter().all(|r| r.query.is_empty()));
    let sections = dashboard.sections();
    assert_eq!(sections.len(), 2);
    let auditoria = &sections[0].by_type[0].indicator;
    assert_eq!(
        (auditoria.total, auditoria.completed, auditoria.in_progress, auditoria.pending),
        (4, 2, 1, 1)
    );
    assert_eq!(auditoria.percentage_label(), "50.0");
    assert!(sections[1].by_type.is_empty());
    assert_eq!(dashboard.summary().projects, 2);
}

#[tokio::test]
async fn test_dashboard_load_fails_as_a_whole() {
    let backend = MockBackend::start(|req| match req.path.as_str() {
        "/atividades" => error(StatusCode::INTERNAL_SERVER_ERROR, "Erro interno"),
        _ => ok(json!([])),
    })
    .await;
    let state = state(&backend.url, Some(Role::Analyst));

    let err = Dashboard::load(&state).await.unwrap_err();

    assert!(matches!(err, ApiError::Server { .. }));
}
