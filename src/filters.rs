//! Per-resource filter schemas
//!
//! Each list view has a closed set of filter keys. A filter is active only
//! when its value is non-empty; inactive filters are never serialized.

use serde::Serialize;
use std::fmt::Debug;

use crate::clients::Query;

/// Filter state of one list view.
pub trait ResourceFilter: Debug + Clone + Default + Send + Sync {
    /// Closed set of keys accepted by [`ResourceFilter::set`].
    type Key: Debug + Copy + Eq;

    fn set(&mut self, key: Self::Key, value: String);

    /// Query parameters for the active filters, in a stable order.
    fn query(&self) -> Query;

    fn is_active(&self) -> bool {
        !self.query().is_empty()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

fn push_active(query: &mut Query, key: &'static str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        query.push((key, value.to_string()));
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Projects
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectFilter {
    pub subprogram: String,
    pub name: String,
    pub production_order: String,
    pub disciplines: String,
    pub processing_types: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFilterKey {
    Subprogram,
    Name,
    ProductionOrder,
    Disciplines,
    ProcessingTypes,
}

impl ResourceFilter for ProjectFilter {
    type Key = ProjectFilterKey;

    fn set(&mut self, key: Self::Key, value: String) {
        match key {
            ProjectFilterKey::Subprogram => self.subprogram = value,
            ProjectFilterKey::Name => self.name = value,
            ProjectFilterKey::ProductionOrder => self.production_order = value,
            ProjectFilterKey::Disciplines => self.disciplines = value,
            ProjectFilterKey::ProcessingTypes => self.processing_types = value,
        }
    }

    fn query(&self) -> Query {
        let mut query = Vec::new();
        push_active(&mut query, "search_subprograma", &self.subprogram);
        push_active(&mut query, "search_nome", &self.name);
        push_active(&mut query, "search_ordem_producao", &self.production_order);
        push_active(&mut query, "search_disciplinas", &self.disciplines);
        push_active(&mut query, "search_tipos_processamento", &self.processing_types);
        query
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Squads
// ═══════════════════════════════════════════════════════════════════════════

/// `/squads` reads no filter parameters, so there are no keys to set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SquadFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquadFilterKey {}

impl ResourceFilter for SquadFilter {
    type Key = SquadFilterKey;

    fn set(&mut self, key: Self::Key, _value: String) {
        match key {}
    }

    fn query(&self) -> Query {
        Vec::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Activities
// ═══════════════════════════════════════════════════════════════════════════

/// Activity filters. Values are kept as entered (ids as text, enumerations
/// by wire value) so an untouched select stays empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityFilter {
    pub project_id: String,
    pub squad_id: String,
    pub status: String,
    pub priority: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityFilterKey {
    ProjectId,
    SquadId,
    Status,
    Priority,
}

impl ResourceFilter for ActivityFilter {
    type Key = ActivityFilterKey;

    fn set(&mut self, key: Self::Key, value: String) {
        match key {
            ActivityFilterKey::ProjectId => self.project_id = value,
            ActivityFilterKey::SquadId => self.squad_id = value,
            ActivityFilterKey::Status => self.status = value,
            ActivityFilterKey::Priority => self.priority = value,
        }
    }

    fn query(&self) -> Query {
        let mut query = Vec::new();
        push_active(&mut query, "projeto_id", &self.project_id);
        push_active(&mut query, "squad_id", &self.squad_id);
        push_active(&mut query, "status", &self.status);
        push_active(&mut query, "prioridade", &self.priority);
        query
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Users
// ═══════════════════════════════════════════════════════════════════════════

/// `/usuarios` only reads `page`, so there are no keys to set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserFilterKey {}

impl ResourceFilter for UserFilter {
    type Key = UserFilterKey;

    fn set(&mut self, key: Self::Key, _value: String) {
        match key {}
    }

    fn query(&self) -> Query {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_not_serialized() {
        let mut filter = ActivityFilter::default();
        filter.set(ActivityFilterKey::Status, String::new());
        filter.set(ActivityFilterKey::Priority, "alta".to_string());

        assert_eq!(filter.query(), vec![("prioridade", "alta".to_string())]);
        assert!(filter.is_active());
    }

    #[test]
    fn whitespace_only_is_inactive() {
        let mut filter = ProjectFilter::default();
        filter.set(ProjectFilterKey::Name, "   ".to_string());
        assert!(!filter.is_active());
    }

    #[test]
    fn clear_resets_every_key() {
        let mut filter = ProjectFilter::default();
        filter.set(ProjectFilterKey::ProductionOrder, "OP-12".to_string());
        filter.set(ProjectFilterKey::Disciplines, "Matemática".to_string());
        assert_eq!(filter.query().len(), 2);

        filter.clear();
        assert_eq!(filter, ProjectFilter::default());
        assert!(filter.query().is_empty());
    }

    #[test]
    fn keyless_filters_send_nothing() {
        assert!(SquadFilter.query().is_empty());
        assert!(!UserFilter.is_active());
    }
}
