//! Resource services for `/projetos`, `/squads`, `/atividades` and `/usuarios`
//!
//! Every resource has the same list/get/create/update/delete shape; the
//! differences (path, record and form types, filters, required fields)
//! live in the [`Resource`] implementations. Services do no recovery:
//! failures go straight back to the caller.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::marker::PhantomData;
use tracing::debug;

use crate::clients::{ApiClient, Query};
use crate::config::AppState;
use crate::error::{ApiError, ControllerError};
use crate::filters::{ActivityFilter, ProjectFilter, ResourceFilter, SquadFilter, UserFilter};
use crate::pagination::{ListPage, ListResponse};
use crate::types::*;

/// Static description of a REST resource.
pub trait Resource: Send + Sync + 'static {
    /// Collection path, e.g. `/projetos`
    const PATH: &'static str;
    /// Singular name used in notifications
    const NOUN: &'static str;

    type Record: DeserializeOwned + Serialize + Debug + Clone + Send + Sync;
    type Attrs: Serialize + Debug + Clone + Default + Send + Sync;
    type Filter: ResourceFilter;

    fn id(record: &Self::Record) -> i64;

    /// Human-readable name of a record, used in the delete prompt.
    fn label(record: &Self::Record) -> String;

    /// Form contents for editing `record`.
    fn edit_form(record: &Self::Record) -> Self::Attrs;

    /// Presence checks for required fields. `editing` is true for updates.
    fn validate(attrs: &Self::Attrs, editing: bool) -> Result<(), ControllerError>;
}

fn require(value: &str, message: &str) -> Result<(), ControllerError> {
    if value.trim().is_empty() {
        return Err(ControllerError::Validation(message.to_string()));
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// Resource definitions
// ═══════════════════════════════════════════════════════════════════════════

pub struct Projects;

impl Resource for Projects {
    const PATH: &'static str = "/projetos";
    const NOUN: &'static str = "Project";

    type Record = Project;
    type Attrs = ProjectAttrs;
    type Filter = ProjectFilter;

    fn id(record: &Project) -> i64 {
        record.id
    }

    fn label(record: &Project) -> String {
        match record.subprograma.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(code) => format!("{code} - {}", record.nome),
            None => record.nome.clone(),
        }
    }

    fn edit_form(record: &Project) -> ProjectAttrs {
        ProjectAttrs::from(record)
    }

    fn validate(attrs: &ProjectAttrs, _editing: bool) -> Result<(), ControllerError> {
        require(&attrs.nome, "Name is required")
    }
}

pub struct Squads;

impl Resource for Squads {
    const PATH: &'static str = "/squads";
    const NOUN: &'static str = "Squad";

    type Record = Squad;
    type Attrs = SquadAttrs;
    type Filter = SquadFilter;

    fn id(record: &Squad) -> i64 {
        record.id
    }

    fn label(record: &Squad) -> String {
        record.nome.clone()
    }

    fn edit_form(record: &Squad) -> SquadAttrs {
        SquadAttrs::from(record)
    }

    fn validate(attrs: &SquadAttrs, _editing: bool) -> Result<(), ControllerError> {
        require(&attrs.nome, "Name is required")
    }
}

pub struct Activities;

impl Resource for Activities {
    const PATH: &'static str = "/atividades";
    const NOUN: &'static str = "Activity";

    type Record = Activity;
    type Attrs = ActivityAttrs;
    type Filter = ActivityFilter;

    fn id(record: &Activity) -> i64 {
        record.id
    }

    fn label(record: &Activity) -> String {
        format!("{} ({})", record.titulo, record.projeto.nome)
    }

    fn edit_form(record: &Activity) -> ActivityAttrs {
        ActivityAttrs::from(record)
    }

    fn validate(attrs: &ActivityAttrs, _editing: bool) -> Result<(), ControllerError> {
        require(&attrs.titulo, "Title is required")?;
        if attrs.projeto_id.is_none() {
            return Err(ControllerError::Validation("Project is required".to_string()));
        }
        if attrs.squad_id.is_none() {
            return Err(ControllerError::Validation("Squad is required".to_string()));
        }
        Ok(())
    }
}

pub struct Users;

impl Resource for Users {
    const PATH: &'static str = "/usuarios";
    const NOUN: &'static str = "User";

    type Record = User;
    type Attrs = UserAttrs;
    type Filter = UserFilter;

    fn id(record: &User) -> i64 {
        record.id
    }

    fn label(record: &User) -> String {
        format!("{} ({})", record.nome, record.login)
    }

    fn edit_form(record: &User) -> UserAttrs {
        UserAttrs::from(record)
    }

    fn validate(attrs: &UserAttrs, editing: bool) -> Result<(), ControllerError> {
        require(&attrs.nome, "Name and login are required")?;
        require(&attrs.login, "Name and login are required")?;
        if !editing {
            require(&attrs.senha, "Password is required for new users")?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Generic service
// ═══════════════════════════════════════════════════════════════════════════

pub struct ResourceService<'a, R: Resource> {
    client: ApiClient<'a>,
    _resource: PhantomData<R>,
}

impl<'a, R: Resource> ResourceService<'a, R> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            client: ApiClient::new(state),
            _resource: PhantomData,
        }
    }

    /// GET /{resource}
    ///
    /// Without `page` the request is unpaginated. With it, `page` and
    /// `per_page` are always sent. Active filters follow as their own
    /// parameters.
    pub async fn list(
        &self,
        page: Option<u32>,
        per_page: Option<u32>,
        filters: &R::Filter,
    ) -> Result<ListPage<R::Record>, ApiError> {
        let query = list_query(page, per_page, filters);
        debug!(path = R::PATH, ?query, "Listing records");

        let response: ListResponse<R::Record> = self.client.get(R::PATH, &query).await?;
        Ok(response.into())
    }

    /// Unpaginated, unfiltered list of every record.
    pub async fn list_all(&self) -> Result<Vec<R::Record>, ApiError> {
        Ok(self.list(None, None, &R::Filter::default()).await?.records)
    }

    /// GET /{resource}/{id}
    pub async fn get(&self, id: i64) -> Result<R::Record, ApiError> {
        self.client
            .get(&format!("{}/{}", R::PATH, id), &Vec::new())
            .await
    }

    /// POST /{resource}
    pub async fn create(&self, attrs: &R::Attrs) -> Result<R::Record, ApiError> {
        self.client.post(R::PATH, attrs).await
    }

    /// PUT /{resource}/{id}
    pub async fn update(&self, id: i64, attrs: &R::Attrs) -> Result<R::Record, ApiError> {
        self.client.put(&format!("{}/{}", R::PATH, id), attrs).await
    }

    /// DELETE /{resource}/{id}
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("{}/{}", R::PATH, id)).await?;
        Ok(())
    }

    async fn related<T: DeserializeOwned>(&self, id: i64, relation: &str) -> Result<Vec<T>, ApiError> {
        let response: ListResponse<T> = self
            .client
            .get(&format!("{}/{}/{}", R::PATH, id, relation), &Vec::new())
            .await?;
        Ok(ListPage::from(response).records)
    }
}

/// Query for a list call.
pub fn list_query<F: ResourceFilter>(page: Option<u32>, per_page: Option<u32>, filters: &F) -> Query {
    let mut query = Vec::new();
    if let Some(page) = page {
        query.push(("page", page.to_string()));
        let per_page = per_page.unwrap_or(crate::config::DEFAULT_PER_PAGE);
        query.push(("per_page", per_page.to_string()));
    }
    query.extend(filters.query());
    query
}

// ═══════════════════════════════════════════════════════════════════════════
// Relationship listings and statistics
// ═══════════════════════════════════════════════════════════════════════════

impl ResourceService<'_, Projects> {
    /// GET /projetos/{id}/atividades
    pub async fn activities(&self, id: i64) -> Result<Vec<Activity>, ApiError> {
        self.related(id, "atividades").await
    }
}

impl ResourceService<'_, Squads> {
    /// GET /squads/{id}/projetos
    pub async fn projects(&self, id: i64) -> Result<Vec<Project>, ApiError> {
        self.related(id, "projetos").await
    }

    /// GET /squads/{id}/atividades
    pub async fn activities(&self, id: i64) -> Result<Vec<Activity>, ApiError> {
        self.related(id, "atividades").await
    }
}

impl ResourceService<'_, Activities> {
    /// GET /atividades/estatisticas - counts by status and priority
    pub async fn statistics(&self) -> Result<ActivityStatistics, ApiError> {
        self.client
            .get(&format!("{}/estatisticas", Activities::PATH), &Vec::new())
            .await
    }
}

pub type ProjectService<'a> = ResourceService<'a, Projects>;
pub type SquadService<'a> = ResourceService<'a, Squads>;
pub type ActivityService<'a> = ResourceService<'a, Activities>;
pub type UserService<'a> = ResourceService<'a, Users>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::ActivityFilterKey;

    #[test]
    fn unpaginated_query_has_only_filters() {
        let mut filter = ActivityFilter::default();
        filter.set(ActivityFilterKey::SquadId, "3".to_string());
        assert_eq!(list_query(None, Some(20), &filter), vec![("squad_id", "3".to_string())]);
    }

    #[test]
    fn paginated_query_always_sends_page_and_size() {
        let filter = ProjectFilter::default();
        assert_eq!(
            list_query(Some(2), Some(20), &filter),
            vec![("page", "2".to_string()), ("per_page", "20".to_string())]
        );
        assert_eq!(
            list_query(Some(1), None, &filter),
            vec![("page", "1".to_string()), ("per_page", "10".to_string())]
        );
    }

    #[test]
    fn activity_form_requires_project_and_squad() {
        let mut attrs = ActivityAttrs {
            titulo: "Recodificação de itens".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            Activities::validate(&attrs, false),
            Err(ControllerError::Validation(ref m)) if m == "Project is required"
        ));
        attrs.projeto_id = Some(1);
        attrs.squad_id = Some(2);
        assert!(Activities::validate(&attrs, false).is_ok());
    }

    #[test]
    fn password_only_required_on_create() {
        let attrs = UserAttrs {
            nome: "Ana".to_string(),
            login: "ana".to_string(),
            ..Default::default()
        };
        assert!(Users::validate(&attrs, false).is_err());
        assert!(Users::validate(&attrs, true).is_ok());
    }
}
