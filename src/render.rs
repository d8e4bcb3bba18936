//! Terminal rendering of records, list pages and the dashboard

use std::fmt::{self, Write as _};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;

use crate::dashboard::{Dashboard, Indicator};
use crate::pagination::PaginationView;
use crate::types::{Activity, ActivityStatistics, Project, Squad, User};

/// Placeholder shown instead of row actions for read-only sessions.
pub const NO_PERMISSION: &str = "no permission";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Serializes `value` for the structured formats. `None` for text.
pub fn structured<T: Serialize + ?Sized>(format: OutputFormat, value: &T) -> Result<Option<String>> {
    match format {
        OutputFormat::Text => Ok(None),
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(Some)
            .context("Failed to encode JSON output"),
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map(Some)
            .context("Failed to encode YAML output"),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tables
// ═══════════════════════════════════════════════════════════════════════════

/// Plain-text table with columns padded to their widest cell.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }
        widths
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        writeln!(f, "{}", line(&self.headers))?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("  "))?;
        for row in &self.rows {
            writeln!(f, "{}", line(row))?;
        }
        Ok(())
    }
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn date<T: fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(|d| d.to_string()).unwrap_or_default()
}

fn actions(can_mutate: bool) -> String {
    if can_mutate {
        "edit | delete".to_string()
    } else {
        NO_PERMISSION.to_string()
    }
}

pub fn projects_table(projects: &[Project], can_mutate: bool) -> Table {
    let mut table = Table::new([
        "ID", "Subprogram", "Name", "Production order", "Application", "End", "Squads",
        "Activities", "Actions",
    ]);
    for p in projects {
        table.row(vec![
            p.id.to_string(),
            opt(&p.subprograma),
            p.nome.clone(),
            opt(&p.ordem_producao),
            date(&p.data_aplicacao),
            date(&p.data_termino),
            p.squads
                .iter()
                .map(|s| s.nome.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            p.total_atividades.to_string(),
            actions(can_mutate),
        ]);
    }
    table
}

pub fn squads_table(squads: &[Squad], can_mutate: bool) -> Table {
    let mut table = Table::new(["ID", "Name", "Description", "Projects", "Activities", "Actions"]);
    for s in squads {
        table.row(vec![
            s.id.to_string(),
            s.nome.clone(),
            opt(&s.descricao),
            s.total_projetos.to_string(),
            s.total_atividades.to_string(),
            actions(can_mutate),
        ]);
    }
    table
}

pub fn activities_table(activities: &[Activity], can_mutate: bool) -> Table {
    let mut table = Table::new([
        "ID", "Title", "Project", "Squad", "Priority", "Status", "Planned start", "Planned end",
        "Actions",
    ]);
    for a in activities {
        table.row(vec![
            a.id.to_string(),
            a.titulo.clone(),
            a.projeto.nome.clone(),
            a.squad.nome.clone(),
            a.prioridade.to_string(),
            a.status.to_string(),
            date(&a.data_inicio_prevista),
            date(&a.data_fim_prevista),
            actions(can_mutate),
        ]);
    }
    table
}

pub fn users_table(users: &[User], can_mutate: bool) -> Table {
    let mut table = Table::new(["ID", "Name", "Login", "Role", "Active", "Actions"]);
    for u in users {
        table.row(vec![
            u.id.to_string(),
            u.nome.clone(),
            u.login.clone(),
            u.role.to_string(),
            if u.ativo { "yes" } else { "no" }.to_string(),
            actions(can_mutate),
        ]);
    }
    table
}

/// A table followed by its pagination controls, or an empty-state line.
pub fn list(table: &Table, pagination: Option<&PaginationView>, empty: &str) -> String {
    if table.is_empty() {
        return format!("{empty}\n");
    }
    let mut out = table.to_string();
    if let Some(view) = pagination {
        let _ = writeln!(out, "\n{view}");
    }
    out
}

// ═══════════════════════════════════════════════════════════════════════════
// Details
// ═══════════════════════════════════════════════════════════════════════════

/// `field: value` lines for one record's top-level fields.
pub fn details<T: Serialize>(record: &T) -> Result<String> {
    let value = serde_json::to_value(record).context("Failed to encode record")?;
    let Value::Object(fields) = value else {
        return Ok(format!("{value}\n"));
    };

    let width = fields.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for (key, value) in fields {
        let _ = writeln!(out, "{:<width$}  {}", key, scalar(&value), width = width);
    }
    Ok(out)
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(scalar).collect::<Vec<_>>().join(", "),
        Value::Object(map) => map
            .get("nome")
            .map(scalar)
            .unwrap_or_else(|| value.to_string()),
        other => other.to_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Statistics and dashboard
// ═══════════════════════════════════════════════════════════════════════════

pub fn statistics(stats: &ActivityStatistics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total activities: {}", stats.total);
    let _ = writeln!(out, "\nBy status");
    let _ = writeln!(out, "  Pending      {}", stats.por_status.pendente);
    let _ = writeln!(out, "  In progress  {}", stats.por_status.em_andamento);
    let _ = writeln!(out, "  Completed    {}", stats.por_status.concluida);
    let _ = writeln!(out, "\nBy priority");
    let _ = writeln!(out, "  Low     {}", stats.por_prioridade.baixa);
    let _ = writeln!(out, "  Medium  {}", stats.por_prioridade.media);
    let _ = writeln!(out, "  High    {}", stats.por_prioridade.alta);
    out
}

const BAR_WIDTH: usize = 20;

fn progress_bar(indicator: &Indicator) -> String {
    let filled = ((indicator.completion_percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn indicator_line(label: &str, indicator: &Indicator) -> String {
    format!(
        "{} {:>5}% completed  {}  (total {}, completed {}, in progress {}, pending {})",
        progress_bar(indicator),
        indicator.percentage_label(),
        label,
        indicator.total,
        indicator.completed,
        indicator.in_progress,
        indicator.pending,
    )
}

pub fn dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    let summary = dashboard.summary();
    let _ = writeln!(out, "Summary");
    let _ = writeln!(out, "  Activities  {}", summary.activities);
    let _ = writeln!(out, "  Projects    {}", summary.projects);
    let _ = writeln!(out, "  Squads      {}", summary.squads);

    let sections = dashboard.sections();
    if sections.is_empty() {
        let _ = writeln!(out, "\nNo squad sections to show for the selected filters.");
    }

    for section in sections {
        let _ = writeln!(out, "\nSquad {}", section.squad.nome);
        if section.overall.is_empty() {
            let _ = writeln!(out, "  No activities found for the selected filters.");
            continue;
        }
        let _ = writeln!(out, "  {}", indicator_line("Overall", &section.overall));
        for entry in &section.by_type {
            let _ = writeln!(out, "  {}", indicator_line(&entry.activity_type, &entry.indicator));
        }
    }

    let options = dashboard.options();
    let _ = writeln!(out, "\nFilter options");
    let _ = writeln!(out, "  Production orders  {}", options.production_orders.join(", "));
    let _ = writeln!(
        out,
        "  Projects           {}",
        options
            .projects
            .iter()
            .map(|p| format!("{} ({})", p.label, p.id))
            .collect::<Vec<_>>()
            .join(", ")
    );
    let _ = writeln!(
        out,
        "  Squads             {}",
        options
            .squads
            .iter()
            .map(|s| format!("{} ({})", s.nome, s.id))
            .collect::<Vec<_>>()
            .join(", ")
    );
    let _ = writeln!(out, "  Activity types     {}", options.activity_types.join(", "));
    out
}
