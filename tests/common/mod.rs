//! In-process mock of the REST backend
//!
//! Every request is recorded; responses come from a per-test responder.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};

use op_monitor::config::{AppState, Config};
use op_monitor::pagination::PageInfo;
use op_monitor::session::{MemoryStorage, Session};
use op_monitor::types::{Role, User};

pub const TOKEN: &str = "test-token";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

impl Recorded {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> Vec<&str> {
        self.query.iter().map(|(k, _)| k.as_str()).collect()
    }
}

type Responder = Arc<dyn Fn(&Recorded) -> (StatusCode, Value) + Send + Sync>;

#[derive(Clone)]
struct Shared {
    log: Arc<Mutex<Vec<Recorded>>>,
    responder: Responder,
}

pub struct MockBackend {
    pub url: String,
    log: Arc<Mutex<Vec<Recorded>>>,
}

impl MockBackend {
    pub async fn start<F>(responder: F) -> Self
    where
        F: Fn(&Recorded) -> (StatusCode, Value) + Send + Sync + 'static,
    {
        let log = Arc::new(Mutex::new(Vec::new()));
        let shared = Shared {
            log: log.clone(),
            responder: Arc::new(responder),
        };
        let app = Router::new().fallback(handle).with_state(shared);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{addr}/api"),
            log,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().clone()
    }

    pub fn last(&self) -> Recorded {
        self.log.lock().last().cloned().expect("no request recorded")
    }

    pub fn count(&self, method: Method) -> usize {
        self.log.lock().iter().filter(|r| r.method == method).count()
    }

    pub fn clear(&self) {
        self.log.lock().clear();
    }
}

async fn handle(
    State(shared): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let query = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (k.to_string(), v.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect();

    let recorded = Recorded {
        method,
        path: uri.path().trim_start_matches("/api").to_string(),
        query,
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    };

    let (status, value) = (shared.responder)(&recorded);
    shared.log.lock().push(recorded);
    (status, Json(value))
}

// ═══════════════════════════════════════════════════════════════════════════
// Fixtures
// ═══════════════════════════════════════════════════════════════════════════

pub fn user(role: Role) -> User {
    User {
        id: 1,
        nome: "Maria Souza".to_string(),
        login: "maria".to_string(),
        role,
        ativo: true,
        created_at: None,
    }
}

/// State pointed at `url`, logged in with `role` or anonymous.
pub fn state(url: &str, role: Option<Role>) -> AppState {
    let session = Session::hydrate(Arc::new(MemoryStorage::new()));
    if let Some(role) = role {
        session.establish(TOKEN.to_string(), user(role)).unwrap();
    }
    let config = Config {
        api_url: url.to_string(),
        ..Config::default()
    };
    AppState::new(config, Arc::new(session)).unwrap()
}

pub fn envelope(items: Vec<Value>, page: u32, per_page: u32, total: u32) -> Value {
    json!({
        "items": items,
        "pagination": PageInfo::compute(page, per_page, total),
    })
}

pub fn project_json(id: i64, subprograma: &str, nome: &str, ordem: &str) -> Value {
    json!({
        "id": id,
        "subprograma": subprograma,
        "nome": nome,
        "ordem_producao": ordem,
        "data_aplicacao": "2024-03-01",
        "data_termino": null,
        "squads": [],
        "total_atividades": 0,
        "created_at": "2024-02-10T12:00:00",
    })
}

pub fn squad_json(id: i64, nome: &str) -> Value {
    json!({
        "id": id,
        "nome": nome,
        "descricao": "",
        "total_projetos": 1,
        "total_atividades": 2,
    })
}

pub fn activity_json(id: i64, titulo: &str, status: &str, projeto: i64, squad: (i64, &str)) -> Value {
    json!({
        "id": id,
        "titulo": titulo,
        "prioridade": "media",
        "status": status,
        "data_inicio_prevista": "2024-04-01",
        "data_fim_real": "",
        "projeto": {"id": projeto, "nome": format!("Projeto {projeto}")},
        "squad": {"id": squad.0, "nome": squad.1},
    })
}

pub fn ok(value: Value) -> (StatusCode, Value) {
    (StatusCode::OK, value)
}

pub fn error(status: StatusCode, message: &str) -> (StatusCode, Value) {
    (status, json!({"error": message}))
}
