//! List-view controller shared by the projects, squads, activities and
//! users screens
//!
//! Owns the filter, page and page-size state, the fetched page and the
//! create/edit form. Every transition that changes what should be shown
//! re-fetches. Failures are reported through the notifier and leave the
//! view in a usable state.

use std::sync::Arc;

use futures::future::join;
use tracing::{debug, info};

use crate::config::AppState;
use crate::error::ControllerError;
use crate::filters::ResourceFilter;
use crate::notify::Notifier;
use crate::pagination::{ListPage, PageChange, PageInfo, PaginationView, PAGE_SIZE_CHOICES};
use crate::services::{ProjectService, Resource, ResourceService, SquadService};
use crate::types::{Project, Squad};

// ═══════════════════════════════════════════════════════════════════════════
// Delete confirmation
// ═══════════════════════════════════════════════════════════════════════════

/// A delete waiting for the user's answer. Nothing has been sent yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: i64,
    pub label: String,
    noun: &'static str,
}

impl PendingDelete {
    /// Question to put to the user, naming the record.
    pub fn prompt(&self) -> String {
        format!(
            "Delete {} \"{}\"? This action cannot be undone.",
            self.noun.to_lowercase(),
            self.label
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

// ═══════════════════════════════════════════════════════════════════════════
// Controller
// ═══════════════════════════════════════════════════════════════════════════

pub struct ListController<R: Resource> {
    state: AppState,
    notifier: Arc<dyn Notifier>,
    filters: R::Filter,
    page: u32,
    per_page: u32,
    data: ListPage<R::Record>,
    form: R::Attrs,
    form_open: bool,
    editing: Option<R::Record>,
}

impl<R: Resource> ListController<R> {
    pub fn new(state: AppState, notifier: Arc<dyn Notifier>) -> Self {
        let per_page = state.config.per_page;
        Self {
            state,
            notifier,
            filters: R::Filter::default(),
            page: 1,
            per_page,
            data: ListPage::default(),
            form: R::Attrs::default(),
            form_open: false,
            editing: None,
        }
    }

    /// Initial filters, applied by the first fetch.
    pub fn with_filters(mut self, filters: R::Filter) -> Self {
        self.filters = filters;
        self
    }

    /// Initial page size; a size outside `PAGE_SIZE_CHOICES` keeps the
    /// configured default.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        if PAGE_SIZE_CHOICES.contains(&per_page) {
            self.per_page = per_page;
        }
        self
    }

    pub fn filters(&self) -> &R::Filter {
        &self.filters
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn records(&self) -> &[R::Record] {
        &self.data.records
    }

    pub fn pagination(&self) -> Option<&PageInfo> {
        self.data.pagination.as_ref()
    }

    /// Pagination controls for the current page, if there is anything to page.
    pub fn pagination_view(&self) -> Option<PaginationView> {
        self.pagination().and_then(PaginationView::render)
    }

    pub fn form(&self) -> &R::Attrs {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut R::Attrs {
        &mut self.form
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn editing(&self) -> Option<&R::Record> {
        self.editing.as_ref()
    }

    /// Create/edit/delete controls are only offered to admins.
    pub fn can_mutate(&self) -> bool {
        self.state.session.is_admin()
    }

    fn service(&self) -> ResourceService<'_, R> {
        ResourceService::new(&self.state)
    }

    fn ensure_can_mutate(&self) -> Result<(), ControllerError> {
        if self.can_mutate() {
            Ok(())
        } else {
            Err(ControllerError::ReadOnly)
        }
    }

    /// Fetches the current page with the current filters.
    ///
    /// On failure the previous records are dropped so the view shows an
    /// empty, loaded table.
    pub async fn refresh(&mut self) -> Result<(), ControllerError> {
        let result = self
            .service()
            .list(Some(self.page), Some(self.per_page), &self.filters)
            .await;

        match result {
            Ok(page) => {
                debug!(
                    path = R::PATH,
                    page = self.page,
                    per_page = self.per_page,
                    records = page.records.len(),
                    "List refreshed"
                );
                self.data = page;
                Ok(())
            }
            Err(e) => {
                self.data = ListPage::default();
                self.notifier
                    .error(&format!("Failed to load {}s: {}", R::NOUN.to_lowercase(), e));
                Err(e.into())
            }
        }
    }

    /// Sets one filter value and goes back to the first page.
    pub async fn set_filter(
        &mut self,
        key: <R::Filter as ResourceFilter>::Key,
        value: impl Into<String>,
    ) -> Result<(), ControllerError> {
        self.filters.set(key, value.into());
        self.page = 1;
        self.refresh().await
    }

    pub async fn clear_filters(&mut self) -> Result<(), ControllerError> {
        self.filters.clear();
        self.page = 1;
        self.refresh().await
    }

    /// A page-size change sets the new size and forces the first page.
    pub async fn change_page(&mut self, change: PageChange) -> Result<(), ControllerError> {
        match change.per_page {
            Some(per_page) if PAGE_SIZE_CHOICES.contains(&per_page) => {
                self.per_page = per_page;
                self.page = 1;
            }
            _ => self.page = change.page.max(1),
        }
        self.refresh().await
    }

    /// Opens an empty form for a new record.
    pub fn open_create_form(&mut self) -> Result<(), ControllerError> {
        self.ensure_can_mutate()?;
        self.form = R::Attrs::default();
        self.editing = None;
        self.form_open = true;
        Ok(())
    }

    /// Fills the form from `record` and enters edit mode.
    pub fn edit(&mut self, record: R::Record) -> Result<(), ControllerError> {
        self.ensure_can_mutate()?;
        self.form = R::edit_form(&record);
        self.editing = Some(record);
        self.form_open = true;
        Ok(())
    }

    pub fn cancel_form(&mut self) {
        self.form = R::Attrs::default();
        self.editing = None;
        self.form_open = false;
    }

    /// Creates or updates depending on edit mode.
    ///
    /// On failure the form stays open with its values.
    pub async fn submit(&mut self) -> Result<R::Record, ControllerError> {
        self.ensure_can_mutate()?;

        let editing_id = self.editing.as_ref().map(R::id);
        if let Err(e) = R::validate(&self.form, editing_id.is_some()) {
            self.notifier.error(&e.to_string());
            return Err(e);
        }

        let result = match editing_id {
            Some(id) => self.service().update(id, &self.form).await,
            None => self.service().create(&self.form).await,
        };

        match result {
            Ok(record) => {
                let verb = if editing_id.is_some() { "updated" } else { "created" };
                info!(path = R::PATH, id = R::id(&record), verb, "Record saved");
                self.notifier
                    .success(&format!("{} {} successfully", R::NOUN, verb));
                self.cancel_form();
                // Refresh failures are already notified; the save itself succeeded.
                let _ = self.refresh().await;
                Ok(record)
            }
            Err(e) => {
                self.notifier.error(&format!("Failed to save: {e}"));
                Err(e.into())
            }
        }
    }

    /// First half of a delete: names the record, sends nothing.
    pub fn request_delete(&self, record: &R::Record) -> Result<PendingDelete, ControllerError> {
        self.ensure_can_mutate()?;
        Ok(PendingDelete {
            id: R::id(record),
            label: R::label(record),
            noun: R::NOUN,
        })
    }

    /// Second half of a delete. Only a confirmed request reaches the backend.
    pub async fn resolve_delete(
        &mut self,
        pending: PendingDelete,
        answer: Confirmation,
    ) -> Result<DeleteOutcome, ControllerError> {
        if answer == Confirmation::Cancelled {
            debug!(path = R::PATH, id = pending.id, "Delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }
        self.ensure_can_mutate()?;

        match self.service().delete(pending.id).await {
            Ok(()) => {
                info!(path = R::PATH, id = pending.id, "Record deleted");
                self.notifier
                    .success(&format!("{} deleted successfully", R::NOUN));
                let _ = self.refresh().await;
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => {
                self.notifier.error(&format!("Failed to delete: {e}"));
                Err(e.into())
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Auxiliary lists
// ═══════════════════════════════════════════════════════════════════════════

/// Projects and squads that populate the activity view's selects.
#[derive(Debug, Clone, Default)]
pub struct SelectOptions {
    pub projects: Vec<Project>,
    pub squads: Vec<Squad>,
}

impl SelectOptions {
    /// Loads both lists concurrently. A failure on one is notified and
    /// leaves that list empty without affecting the other.
    pub async fn load(state: &AppState, notifier: &dyn Notifier) -> Self {
        let projects = ProjectService::new(state);
        let squads = SquadService::new(state);
        let (projects, squads) = join(projects.list_all(), squads.list_all()).await;

        let projects = projects.unwrap_or_else(|e| {
            notifier.error(&format!("Failed to load projects: {e}"));
            Vec::new()
        });
        let squads = squads.unwrap_or_else(|e| {
            notifier.error(&format!("Failed to load squads: {e}"));
            Vec::new()
        });

        Self { projects, squads }
    }
}
