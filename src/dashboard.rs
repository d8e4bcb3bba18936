//! Dashboard aggregator
//!
//! Loads the full project, squad and activity collections once and derives
//! everything else locally: the narrowed filter options, one section per
//! configured squad, and per-activity-type completion indicators.

use std::collections::BTreeSet;

use futures::future::try_join3;
use serde::Serialize;
use tracing::info;

use crate::config::AppState;
use crate::error::ApiError;
use crate::services::{ActivityService, ProjectService, SquadService};
use crate::types::{Activity, Project, Squad, Status};

// ═══════════════════════════════════════════════════════════════════════════
// Indicators
// ═══════════════════════════════════════════════════════════════════════════

/// Completion counts for a set of activities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Indicator {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub pending: usize,
    /// Rounded to one decimal; 0 when `total == 0`.
    pub completion_percentage: f64,
}

impl Indicator {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Percentage as displayed: one decimal, or a bare `0` when empty.
    pub fn percentage_label(&self) -> String {
        if self.total == 0 {
            "0".to_string()
        } else {
            format!("{:.1}", self.completion_percentage)
        }
    }
}

/// Counts statuses over `activities`, optionally restricted to one title.
pub fn calculate_indicators<'a, I>(activities: I, activity_type: Option<&str>) -> Indicator
where
    I: IntoIterator<Item = &'a Activity>,
{
    let mut indicator = Indicator {
        total: 0,
        completed: 0,
        in_progress: 0,
        pending: 0,
        completion_percentage: 0.0,
    };

    for activity in activities
        .into_iter()
        .filter(|a| activity_type.is_none_or(|t| a.titulo == t))
    {
        indicator.total += 1;
        match activity.status {
            Status::Completed => indicator.completed += 1,
            Status::InProgress => indicator.in_progress += 1,
            Status::Pending => indicator.pending += 1,
        }
    }

    if indicator.total > 0 {
        let raw = indicator.completed as f64 / indicator.total as f64 * 100.0;
        indicator.completion_percentage = (raw * 10.0).round() / 10.0;
    }
    indicator
}

// ═══════════════════════════════════════════════════════════════════════════
// Filters and options
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardFilters {
    pub production_order: Option<String>,
    pub project_id: Option<i64>,
    pub squad_id: Option<i64>,
    pub activity_type: Option<String>,
}

impl DashboardFilters {
    /// Choosing a production order invalidates the project selection.
    pub fn set_production_order(&mut self, order: Option<String>) {
        self.production_order = order.filter(|o| !o.trim().is_empty());
        self.project_id = None;
    }

    pub fn set_project(&mut self, project_id: Option<i64>) {
        self.project_id = project_id;
    }

    pub fn set_squad(&mut self, squad_id: Option<i64>) {
        self.squad_id = squad_id;
    }

    pub fn set_activity_type(&mut self, activity_type: Option<String>) {
        self.activity_type = activity_type.filter(|t| !t.trim().is_empty());
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectOption {
    pub id: i64,
    pub label: String,
}

/// Values currently selectable in each dashboard filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub production_orders: Vec<String>,
    pub projects: Vec<ProjectOption>,
    pub squads: Vec<Squad>,
    pub activity_types: Vec<String>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Sections
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeIndicator {
    pub activity_type: String,
    pub indicator: Indicator,
}

/// One configured squad's block on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SquadSection {
    pub squad: Squad,
    pub overall: Indicator,
    /// One entry per activity title, sorted, never empty ones.
    pub by_type: Vec<TypeIndicator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub activities: usize,
    pub projects: usize,
    pub squads: usize,
}

// ═══════════════════════════════════════════════════════════════════════════
// Aggregator
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub projects: Vec<Project>,
    pub squads: Vec<Squad>,
    pub activities: Vec<Activity>,
    pub section_squads: Vec<String>,
    pub filters: DashboardFilters,
}

impl Dashboard {
    pub fn new(
        projects: Vec<Project>,
        squads: Vec<Squad>,
        activities: Vec<Activity>,
        section_squads: Vec<String>,
    ) -> Self {
        Self {
            projects,
            squads,
            activities,
            section_squads,
            filters: DashboardFilters::default(),
        }
    }

    /// Fetches the three collections concurrently. Any failure fails the
    /// whole load.
    pub async fn load(state: &AppState) -> Result<Self, ApiError> {
        let projects = ProjectService::new(state);
        let squads = SquadService::new(state);
        let activities = ActivityService::new(state);

        let (projects, squads, activities) =
            try_join3(projects.list_all(), squads.list_all(), activities.list_all()).await?;

        info!(
            projects = projects.len(),
            squads = squads.len(),
            activities = activities.len(),
            "Dashboard loaded"
        );

        Ok(Self::new(
            projects,
            squads,
            activities,
            state.config.dashboard_squads.clone(),
        ))
    }

    fn project_ids_in_order(&self, order: &str) -> BTreeSet<i64> {
        self.projects
            .iter()
            .filter(|p| p.ordem_producao.as_deref() == Some(order))
            .map(|p| p.id)
            .collect()
    }

    /// Activities matching the order, project and squad filters.
    fn scoped_activities(&self) -> Vec<&Activity> {
        let in_order = self
            .filters
            .production_order
            .as_deref()
            .map(|o| self.project_ids_in_order(o));

        self.activities
            .iter()
            .filter(|a| in_order.as_ref().is_none_or(|ids| ids.contains(&a.projeto.id)))
            .filter(|a| self.filters.project_id.is_none_or(|id| a.projeto.id == id))
            .filter(|a| self.filters.squad_id.is_none_or(|id| a.squad.id == id))
            .collect()
    }

    /// Activities matching every filter, activity type included.
    pub fn filtered_activities(&self) -> Vec<&Activity> {
        let activity_type = self.filters.activity_type.as_deref();
        self.scoped_activities()
            .into_iter()
            .filter(|a| activity_type.is_none_or(|t| a.titulo == t))
            .collect()
    }

    pub fn options(&self) -> FilterOptions {
        let production_orders = match self.filters.project_id {
            Some(id) => self
                .projects
                .iter()
                .find(|p| p.id == id)
                .and_then(|p| p.ordem_producao.clone())
                .filter(|o| !o.trim().is_empty())
                .into_iter()
                .collect(),
            None => self
                .projects
                .iter()
                .filter_map(|p| p.ordem_producao.as_deref())
                .filter(|o| !o.trim().is_empty())
                .map(str::to_string)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
        };

        let mut projects: Vec<ProjectOption> = self
            .projects
            .iter()
            .filter(|p| {
                self.filters
                    .production_order
                    .as_deref()
                    .is_none_or(|o| p.ordem_producao.as_deref() == Some(o))
            })
            .filter_map(|p| {
                let code = p.subprograma.as_deref()?.trim();
                (!code.is_empty()).then(|| ProjectOption {
                    id: p.id,
                    label: format!("{} - {}", code, p.nome),
                })
            })
            .collect();
        projects.sort_by(|a, b| a.label.cmp(&b.label));

        let scoped = self.scoped_activities();
        let squad_ids: BTreeSet<i64> = scoped.iter().map(|a| a.squad.id).collect();
        let squads = self
            .squads
            .iter()
            .filter(|s| squad_ids.contains(&s.id))
            .cloned()
            .collect();
        let activity_types = scoped
            .iter()
            .map(|a| a.titulo.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        FilterOptions {
            production_orders,
            projects,
            squads,
            activity_types,
        }
    }

    /// One section per configured squad name that exists, hidden when a
    /// different squad is selected.
    pub fn sections(&self) -> Vec<SquadSection> {
        let filtered = self.filtered_activities();

        self.section_squads
            .iter()
            .filter_map(|name| self.squads.iter().find(|s| &s.nome == name))
            .filter(|squad| self.filters.squad_id.is_none_or(|id| id == squad.id))
            .map(|squad| {
                let members: Vec<&Activity> = filtered
                    .iter()
                    .copied()
                    .filter(|a| a.squad.id == squad.id)
                    .collect();

                let titles: BTreeSet<&str> = members.iter().map(|a| a.titulo.as_str()).collect();
                let by_type = titles
                    .into_iter()
                    .map(|title| TypeIndicator {
                        activity_type: title.to_string(),
                        indicator: calculate_indicators(members.iter().copied(), Some(title)),
                    })
                    .filter(|t| !t.indicator.is_empty())
                    .collect();

                SquadSection {
                    squad: squad.clone(),
                    overall: calculate_indicators(members.iter().copied(), None),
                    by_type,
                }
            })
            .collect()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            activities: self.activities.len(),
            projects: self.projects.len(),
            squads: self.squads.len(),
        }
    }
}
