//! Data types matching the backend's REST payloads
//!
//! Field names on the wire follow the backend (`nome`, `titulo`, ...);
//! Rust names are English. Records are what the backend returns, `*Attrs`
//! are the form attribute sets sent on create/update.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// ═══════════════════════════════════════════════════════════════════════════
// Enumerations
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "baixa")]
    Low,
    #[default]
    #[serde(rename = "media")]
    Medium,
    #[serde(rename = "alta")]
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Value used on the wire and in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "baixa",
            Priority::Medium => "media",
            Priority::High => "alta",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        };
        f.write_str(label)
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown priority '{s}' (expected baixa, media or alta)"))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "pendente")]
    Pending,
    #[serde(rename = "em_andamento")]
    InProgress,
    #[serde(rename = "concluida")]
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Pending, Status::InProgress, Status::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pendente",
            Status::InProgress => "em_andamento",
            Status::Completed => "concluida",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Pending => "Pending",
            Status::InProgress => "In progress",
            Status::Completed => "Completed",
        };
        f.write_str(label)
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL.into_iter().find(|st| st.as_str() == s).ok_or_else(|| {
            format!("unknown status '{s}' (expected pendente, em_andamento or concluida)")
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[default]
    #[serde(rename = "analista")]
    Analyst,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Analyst => "analista",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::Admin => "Admin",
            Role::Analyst => "Analyst",
        };
        f.write_str(label)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "analista" => Ok(Role::Analyst),
            _ => Err(format!("unknown role '{s}' (expected admin or analista)")),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Shared pieces
// ═══════════════════════════════════════════════════════════════════════════

/// `{id, nome}` reference embedded in other records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i64,
    pub nome: String,
}

/// The backend emits naive ISO timestamps (`2024-03-01T12:00:00.123456`);
/// accept those as well as RFC 3339.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}

/// Optional ISO date; empty strings read as absent.
fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.filter(|s| !s.is_empty()) {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn date_field(date: &Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn text_field(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

// ═══════════════════════════════════════════════════════════════════════════
// Project
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    #[serde(default)]
    pub subprograma: Option<String>,
    pub nome: String,
    #[serde(default)]
    pub ordem_producao: Option<String>,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub data_aplicacao: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub data_termino: Option<NaiveDate>,
    #[serde(default)]
    pub etapas: Option<String>,
    #[serde(default)]
    pub disciplinas: Option<String>,
    #[serde(default)]
    pub tipos_processamento: Option<String>,
    #[serde(default)]
    pub observacao: Option<String>,
    #[serde(default)]
    pub squads: Vec<EntityRef>,
    #[serde(default)]
    pub total_atividades: u32,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create/update body for `/projetos`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectAttrs {
    pub subprograma: String,
    pub nome: String,
    pub ordem_producao: String,
    pub data_aplicacao: String,
    pub data_termino: String,
    pub etapas: String,
    pub disciplinas: String,
    pub tipos_processamento: String,
    pub observacao: String,
    pub squad_ids: Vec<i64>,
}

impl From<&Project> for ProjectAttrs {
    fn from(p: &Project) -> Self {
        Self {
            subprograma: text_field(&p.subprograma),
            nome: p.nome.clone(),
            ordem_producao: text_field(&p.ordem_producao),
            data_aplicacao: date_field(&p.data_aplicacao),
            data_termino: date_field(&p.data_termino),
            etapas: text_field(&p.etapas),
            disciplinas: text_field(&p.disciplinas),
            tipos_processamento: text_field(&p.tipos_processamento),
            observacao: text_field(&p.observacao),
            squad_ids: p.squads.iter().map(|s| s.id).collect(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Squad
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Squad {
    pub id: i64,
    pub nome: String,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub total_projetos: u32,
    #[serde(default)]
    pub total_atividades: u32,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SquadAttrs {
    pub nome: String,
    pub descricao: String,
}

impl From<&Squad> for SquadAttrs {
    fn from(s: &Squad) -> Self {
        Self {
            nome: s.nome.clone(),
            descricao: text_field(&s.descricao),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Activity
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub titulo: String,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub data_inicio_prevista: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub data_inicio_real: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub data_fim_prevista: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub data_fim_real: Option<NaiveDate>,
    #[serde(default)]
    pub prioridade: Priority,
    #[serde(default)]
    pub status: Status,
    pub projeto: EntityRef,
    pub squad: EntityRef,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityAttrs {
    pub titulo: String,
    pub descricao: String,
    pub data_inicio_prevista: String,
    pub data_inicio_real: String,
    pub data_fim_prevista: String,
    pub data_fim_real: String,
    pub prioridade: Priority,
    pub status: Status,
    pub projeto_id: Option<i64>,
    pub squad_id: Option<i64>,
}

impl From<&Activity> for ActivityAttrs {
    fn from(a: &Activity) -> Self {
        Self {
            titulo: a.titulo.clone(),
            descricao: text_field(&a.descricao),
            data_inicio_prevista: date_field(&a.data_inicio_prevista),
            data_inicio_real: date_field(&a.data_inicio_real),
            data_fim_prevista: date_field(&a.data_fim_prevista),
            data_fim_real: date_field(&a.data_fim_real),
            prioridade: a.prioridade,
            status: a.status,
            projeto_id: Some(a.projeto.id),
            squad_id: Some(a.squad.id),
        }
    }
}

/// Response of `GET /atividades/estatisticas`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityStatistics {
    pub total: u32,
    pub por_status: StatusCounts,
    pub por_prioridade: PriorityCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusCounts {
    #[serde(default)]
    pub pendente: u32,
    #[serde(default)]
    pub em_andamento: u32,
    #[serde(default)]
    pub concluida: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriorityCounts {
    #[serde(default)]
    pub baixa: u32,
    #[serde(default)]
    pub media: u32,
    #[serde(default)]
    pub alta: u32,
}

// ═══════════════════════════════════════════════════════════════════════════
// User
// ═══════════════════════════════════════════════════════════════════════════

/// Account as read back from the backend. The password is never returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub nome: String,
    pub login: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default = "default_active")]
    pub ativo: bool,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Create/update body for `/usuarios`. `senha` is only sent when filled in,
/// so an edit without a new password keeps the stored one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAttrs {
    pub nome: String,
    pub login: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub senha: String,
    pub role: Role,
    pub ativo: bool,
}

impl Default for UserAttrs {
    fn default() -> Self {
        Self {
            nome: String::new(),
            login: String::new(),
            senha: String::new(),
            role: Role::Analyst,
            ativo: true,
        }
    }
}

impl From<&User> for UserAttrs {
    fn from(u: &User) -> Self {
        Self {
            nome: u.nome.clone(),
            login: u.login.clone(),
            senha: String::new(),
            role: u.role,
            ativo: u.ativo,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Auth
// ═══════════════════════════════════════════════════════════════════════════

/// Body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub login: &'a str,
    pub senha: &'a str,
    pub lembrar: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub usuario: User,
}

/// Response of `GET /auth/check`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenCheck {
    pub valid: bool,
    pub usuario_id: serde_json::Value,
    #[serde(default)]
    pub role: Option<Role>,
}
