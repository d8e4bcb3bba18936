//! Command-line surface
//!
//! Each subcommand plays the part of one screen: it enters the matching view
//! through the route guard, drives a controller and renders the result.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::clients::AuthClient;
use crate::config::AppState;
use crate::controller::{Confirmation, DeleteOutcome, ListController};
use crate::dashboard::{Dashboard, DashboardFilters, FilterOptions, SquadSection, Summary};
use crate::error::{ApiError, ControllerError};
use crate::filters::{ActivityFilter, ProjectFilter, SquadFilter, UserFilter};
use crate::guard::View;
use crate::notify::Notifier;
use crate::pagination::{PageChange, PageInfo, PAGE_SIZE_CHOICES};
use crate::render::{self, OutputFormat, Table};
use crate::services::{
    Activities, ActivityService, ProjectService, Projects, Resource, ResourceService, SquadService,
    Squads, Users,
};
use crate::types::{
    Activity, ActivityAttrs, Priority, Project, ProjectAttrs, Role, SquadAttrs, Status, UserAttrs,
};

#[derive(Debug, Parser)]
#[command(name = "op-monitor", version, about = "Production-order activity monitor")]
pub struct Cli {
    /// Base URL of the REST backend
    #[arg(long, env = "OP_MONITOR_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session
    Login(LoginArgs),
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami {
        /// Also validate the token against the backend
        #[arg(long)]
        check: bool,
    },
    /// Projects
    #[command(subcommand)]
    Projects(ProjectCommand),
    /// Squads
    #[command(subcommand)]
    Squads(SquadCommand),
    /// Activities
    #[command(subcommand)]
    Activities(ActivityCommand),
    /// User accounts (administrators only)
    #[command(subcommand)]
    Users(UserCommand),
    /// Completion indicators per squad and activity type
    Dashboard(DashboardArgs),
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    pub login: String,
    /// Read from stdin when omitted
    #[arg(long, env = "OP_MONITOR_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    /// Keep the session for 30 days instead of 8 hours
    #[arg(long)]
    pub remember: bool,
}

#[derive(Debug, Args)]
pub struct PageArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Records per page (5, 10, 20, 50 or 100)
    #[arg(long, value_parser = parse_page_size)]
    pub per_page: Option<u32>,
}

fn parse_page_size(raw: &str) -> Result<u32, String> {
    let size: u32 = raw.parse().map_err(|e| format!("{e}"))?;
    if PAGE_SIZE_CHOICES.contains(&size) {
        Ok(size)
    } else {
        Err(format!("page size must be one of {PAGE_SIZE_CHOICES:?}"))
    }
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: i64,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

// ═══════════════════════════════════════════════════════════════════════════
// Projects
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        subprogram: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        production_order: Option<String>,
        #[arg(long)]
        disciplines: Option<String>,
        #[arg(long)]
        processing_types: Option<String>,
    },
    Show {
        id: i64,
    },
    Create(ProjectFields),
    Update {
        id: i64,
        #[command(flatten)]
        fields: ProjectFields,
    },
    Delete(DeleteArgs),
    /// Activities of one project
    Activities {
        id: i64,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ProjectFields {
    #[arg(long)]
    pub subprogram: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub production_order: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub application_date: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub end_date: Option<String>,
    #[arg(long)]
    pub stages: Option<String>,
    #[arg(long)]
    pub disciplines: Option<String>,
    #[arg(long)]
    pub processing_types: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    /// Squad id; repeat to link several squads
    #[arg(long = "squad")]
    pub squads: Vec<i64>,
}

impl ProjectFields {
    fn apply(self, attrs: &mut ProjectAttrs) {
        overlay(&mut attrs.subprograma, self.subprogram);
        overlay(&mut attrs.nome, self.name);
        overlay(&mut attrs.ordem_producao, self.production_order);
        overlay(&mut attrs.data_aplicacao, self.application_date);
        overlay(&mut attrs.data_termino, self.end_date);
        overlay(&mut attrs.etapas, self.stages);
        overlay(&mut attrs.disciplinas, self.disciplines);
        overlay(&mut attrs.tipos_processamento, self.processing_types);
        overlay(&mut attrs.observacao, self.notes);
        if !self.squads.is_empty() {
            attrs.squad_ids = self.squads;
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Squads
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Subcommand)]
pub enum SquadCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    Show {
        id: i64,
    },
    Create(SquadFields),
    Update {
        id: i64,
        #[command(flatten)]
        fields: SquadFields,
    },
    Delete(DeleteArgs),
    /// Projects linked to one squad
    Projects {
        id: i64,
    },
    /// Activities of one squad
    Activities {
        id: i64,
    },
}

#[derive(Debug, Clone, Args)]
pub struct SquadFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

impl SquadFields {
    fn apply(self, attrs: &mut SquadAttrs) {
        overlay(&mut attrs.nome, self.name);
        overlay(&mut attrs.descricao, self.description);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Activities
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Subcommand)]
pub enum ActivityCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        project: Option<i64>,
        #[arg(long)]
        squad: Option<i64>,
        /// pendente, em_andamento or concluida
        #[arg(long)]
        status: Option<Status>,
        /// baixa, media or alta
        #[arg(long)]
        priority: Option<Priority>,
    },
    Show {
        id: i64,
    },
    Create(ActivityFields),
    Update {
        id: i64,
        #[command(flatten)]
        fields: ActivityFields,
    },
    Delete(DeleteArgs),
    /// Counts by status and priority
    Stats,
}

#[derive(Debug, Clone, Args)]
pub struct ActivityFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub project: Option<i64>,
    #[arg(long)]
    pub squad: Option<i64>,
    #[arg(long)]
    pub priority: Option<Priority>,
    #[arg(long)]
    pub status: Option<Status>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub planned_start: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub actual_start: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub planned_end: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub actual_end: Option<String>,
}

impl ActivityFields {
    fn apply(self, attrs: &mut ActivityAttrs) {
        overlay(&mut attrs.titulo, self.title);
        overlay(&mut attrs.descricao, self.description);
        overlay(&mut attrs.data_inicio_prevista, self.planned_start);
        overlay(&mut attrs.data_inicio_real, self.actual_start);
        overlay(&mut attrs.data_fim_prevista, self.planned_end);
        overlay(&mut attrs.data_fim_real, self.actual_end);
        if let Some(project) = self.project {
            attrs.projeto_id = Some(project);
        }
        if let Some(squad) = self.squad {
            attrs.squad_id = Some(squad);
        }
        if let Some(priority) = self.priority {
            attrs.prioridade = priority;
        }
        if let Some(status) = self.status {
            attrs.status = status;
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Users
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    Show {
        id: i64,
    },
    Create(UserFields),
    Update {
        id: i64,
        #[command(flatten)]
        fields: UserFields,
    },
    Delete(DeleteArgs),
}

#[derive(Debug, Clone, Args)]
pub struct UserFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub login: Option<String>,
    /// Leave out on update to keep the current password
    #[arg(long)]
    pub password: Option<String>,
    /// admin or analista
    #[arg(long)]
    pub role: Option<Role>,
    #[arg(long)]
    pub active: Option<bool>,
}

impl UserFields {
    fn apply(self, attrs: &mut UserAttrs) {
        overlay(&mut attrs.nome, self.name);
        overlay(&mut attrs.login, self.login);
        overlay(&mut attrs.senha, self.password);
        if let Some(role) = self.role {
            attrs.role = role;
        }
        if let Some(active) = self.active {
            attrs.ativo = active;
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Dashboard
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Args)]
pub struct DashboardArgs {
    #[arg(long)]
    pub production_order: Option<String>,
    #[arg(long)]
    pub project: Option<i64>,
    #[arg(long)]
    pub squad: Option<i64>,
    /// Activity title
    #[arg(long)]
    pub activity_type: Option<String>,
}

fn overlay(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Dispatch
// ═══════════════════════════════════════════════════════════════════════════

/// Failure already shown to the user through the notifier.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct Reported(pub String);

fn reported(e: impl std::fmt::Display) -> anyhow::Error {
    Reported(e.to_string()).into()
}

pub struct Context {
    pub state: AppState,
    pub notifier: Arc<dyn Notifier>,
    pub format: OutputFormat,
}

impl Context {
    fn emit(&self, text: impl FnOnce() -> Result<String>, value: &impl Serialize) -> Result<()> {
        let out = match render::structured(self.format, value)? {
            Some(out) => out,
            None => text()?,
        };
        let mut stdout = io::stdout().lock();
        write!(stdout, "{out}")?;
        if !out.ends_with('\n') {
            writeln!(stdout)?;
        }
        Ok(())
    }

    /// Enters `view` through the route guard.
    fn enter(&self, view: View) -> Result<()> {
        let entered = self.state.navigator.navigate(view, &self.state.session);
        match entered {
            v if v == view => Ok(()),
            View::Login => bail!("Not logged in. Run `op-monitor login <login>` first."),
            _ => bail!("{} is only available to administrators", view.path()),
        }
    }
}

pub async fn run(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Login(args) => {
            debug!(login = %args.login, remember = args.remember, "Logging in");
            login(ctx, args).await
        }
        Command::Logout => {
            AuthClient::new(&ctx.state).logout();
            ctx.notifier.success("Logged out");
            Ok(())
        }
        Command::Whoami { check } => whoami(ctx, check).await,
        Command::Projects(cmd) => {
            ctx.enter(View::Projects)?;
            projects(ctx, cmd).await
        }
        Command::Squads(cmd) => {
            ctx.enter(View::Squads)?;
            squads(ctx, cmd).await
        }
        Command::Activities(cmd) => {
            ctx.enter(View::Activities)?;
            activities(ctx, cmd).await
        }
        Command::Users(cmd) => {
            ctx.enter(View::Users)?;
            users(ctx, cmd).await
        }
        Command::Dashboard(args) => {
            ctx.enter(View::Dashboard)?;
            dashboard(ctx, args).await
        }
    }
}

async fn login(ctx: &Context, args: LoginArgs) -> Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => prompt("Password: ")?,
    };

    match AuthClient::new(&ctx.state)
        .login(&args.login, &password, args.remember)
        .await
    {
        Ok(user) => {
            ctx.notifier
                .success(&format!("Logged in as {} ({})", user.nome, user.role));
            Ok(())
        }
        Err(ApiError::Unauthorized(message)) => {
            ctx.notifier.error(&message);
            Err(reported(message))
        }
        Err(e) => {
            ctx.notifier.error(&format!("Login failed: {e}"));
            Err(reported(e))
        }
    }
}

#[derive(Serialize)]
struct WhoAmI {
    user: Option<crate::types::User>,
    token_valid: Option<bool>,
}

async fn whoami(ctx: &Context, check: bool) -> Result<()> {
    let mut user = ctx.state.session.user();
    let mut token_valid = None;
    if check && user.is_some() {
        let auth = AuthClient::new(&ctx.state);
        let valid = auth.check().await.is_some_and(|c| c.valid);
        if valid {
            // Show the profile as the backend has it now, not as stored at login
            match auth.me().await {
                Ok(profile) => user = Some(profile),
                Err(e) => debug!(error = %e, "Profile lookup failed"),
            }
        }
        token_valid = Some(valid);
    }

    let output = WhoAmI { user, token_valid };
    ctx.emit(
        || {
            let Some(user) = &output.user else {
                return Ok("Not logged in\n".to_string());
            };
            let mut text = format!("{} <{}> ({})\n", user.nome, user.login, user.role);
            if let Some(valid) = output.token_valid {
                text.push_str(if valid { "Token is valid\n" } else { "Token is no longer valid\n" });
            }
            Ok(text)
        },
        &output,
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// Generic resource flows
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Serialize)]
struct ListOutput<'a, T> {
    records: &'a [T],
    pagination: Option<&'a PageInfo>,
}

async fn list<R: Resource>(
    ctx: &Context,
    filters: R::Filter,
    page: PageArgs,
    table: fn(&[R::Record], bool) -> Table,
) -> Result<()> {
    let mut controller = ListController::<R>::new(ctx.state.clone(), ctx.notifier.clone())
        .with_filters(filters)
        .with_per_page(page.per_page.unwrap_or(0));
    controller
        .change_page(PageChange::to_page(page.page))
        .await
        .map_err(reported)?;

    let output = ListOutput {
        records: controller.records(),
        pagination: controller.pagination(),
    };
    let empty = format!("No {}s found", R::NOUN.to_lowercase());
    ctx.emit(
        || {
            let rendered = table(controller.records(), controller.can_mutate());
            Ok(render::list(&rendered, controller.pagination_view().as_ref(), &empty))
        },
        &output,
    )
}

async fn show<R: Resource>(ctx: &Context, id: i64) -> Result<()> {
    let record = fetch::<R>(ctx, id).await?;
    ctx.emit(|| render::details(&record), &record)
}

async fn fetch<R: Resource>(ctx: &Context, id: i64) -> Result<R::Record> {
    ResourceService::<R>::new(&ctx.state)
        .get(id)
        .await
        .map_err(|e| {
            ctx.notifier
                .error(&format!("Failed to load {}: {e}", R::NOUN.to_lowercase()));
            reported(e)
        })
}

/// Create when `id` is `None`, otherwise update the record with that id.
async fn save<R: Resource>(
    ctx: &Context,
    id: Option<i64>,
    fill: impl FnOnce(&mut R::Attrs),
) -> Result<()> {
    let mut controller = ListController::<R>::new(ctx.state.clone(), ctx.notifier.clone());
    match id {
        Some(id) => {
            let record = fetch::<R>(ctx, id).await?;
            controller.edit(record).map_err(notified(ctx))?;
        }
        None => controller.open_create_form().map_err(notified(ctx))?,
    }
    fill(controller.form_mut());

    let record = controller.submit().await.map_err(reported)?;
    ctx.emit(|| render::details(&record), &record)
}

async fn delete<R: Resource>(ctx: &Context, args: DeleteArgs) -> Result<()> {
    let record = fetch::<R>(ctx, args.id).await?;
    let mut controller = ListController::<R>::new(ctx.state.clone(), ctx.notifier.clone());
    let pending = controller.request_delete(&record).map_err(notified(ctx))?;

    let answer = if args.yes || confirm(&pending.prompt())? {
        Confirmation::Confirmed
    } else {
        Confirmation::Cancelled
    };

    match controller
        .resolve_delete(pending, answer)
        .await
        .map_err(reported)?
    {
        DeleteOutcome::Deleted => Ok(()),
        DeleteOutcome::Cancelled => {
            eprintln!("Cancelled");
            Ok(())
        }
    }
}

fn notified(ctx: &Context) -> impl Fn(ControllerError) -> anyhow::Error + '_ {
    move |e| {
        ctx.notifier.error(&e.to_string());
        reported(e)
    }
}

async fn related<T: Serialize>(
    ctx: &Context,
    what: &str,
    result: Result<Vec<T>, ApiError>,
    table: impl FnOnce(&[T]) -> Table,
) -> Result<()> {
    let records = result.map_err(|e| {
        ctx.notifier.error(&format!("Failed to load {what}: {e}"));
        reported(e)
    })?;
    let empty = format!("No {what} found");
    ctx.emit(|| Ok(render::list(&table(&records), None, &empty)), &records)
}

// ═══════════════════════════════════════════════════════════════════════════
// Per-resource commands
// ═══════════════════════════════════════════════════════════════════════════

async fn projects(ctx: &Context, cmd: ProjectCommand) -> Result<()> {
    match cmd {
        ProjectCommand::List {
            page,
            subprogram,
            name,
            production_order,
            disciplines,
            processing_types,
        } => {
            let filters = ProjectFilter {
                subprogram: subprogram.unwrap_or_default(),
                name: name.unwrap_or_default(),
                production_order: production_order.unwrap_or_default(),
                disciplines: disciplines.unwrap_or_default(),
                processing_types: processing_types.unwrap_or_default(),
            };
            list::<Projects>(ctx, filters, page, render::projects_table).await
        }
        ProjectCommand::Show { id } => show::<Projects>(ctx, id).await,
        ProjectCommand::Create(fields) => save::<Projects>(ctx, None, |a| fields.apply(a)).await,
        ProjectCommand::Update { id, fields } => {
            save::<Projects>(ctx, Some(id), |a| fields.apply(a)).await
        }
        ProjectCommand::Delete(args) => delete::<Projects>(ctx, args).await,
        ProjectCommand::Activities { id } => {
            let can_mutate = ctx.state.session.is_admin();
            let result = ProjectService::new(&ctx.state).activities(id).await;
            related(ctx, "activities", result, |r: &[Activity]| {
                render::activities_table(r, can_mutate)
            })
            .await
        }
    }
}

async fn squads(ctx: &Context, cmd: SquadCommand) -> Result<()> {
    let can_mutate = ctx.state.session.is_admin();
    match cmd {
        SquadCommand::List { page } => {
            list::<Squads>(ctx, SquadFilter, page, render::squads_table).await
        }
        SquadCommand::Show { id } => show::<Squads>(ctx, id).await,
        SquadCommand::Create(fields) => save::<Squads>(ctx, None, |a| fields.apply(a)).await,
        SquadCommand::Update { id, fields } => {
            save::<Squads>(ctx, Some(id), |a| fields.apply(a)).await
        }
        SquadCommand::Delete(args) => delete::<Squads>(ctx, args).await,
        SquadCommand::Projects { id } => {
            let result = SquadService::new(&ctx.state).projects(id).await;
            related(ctx, "projects", result, |r: &[Project]| {
                render::projects_table(r, can_mutate)
            })
            .await
        }
        SquadCommand::Activities { id } => {
            let result = SquadService::new(&ctx.state).activities(id).await;
            related(ctx, "activities", result, |r: &[Activity]| {
                render::activities_table(r, can_mutate)
            })
            .await
        }
    }
}

async fn activities(ctx: &Context, cmd: ActivityCommand) -> Result<()> {
    match cmd {
        ActivityCommand::List {
            page,
            project,
            squad,
            status,
            priority,
        } => {
            let filters = ActivityFilter {
                project_id: project.map(|id| id.to_string()).unwrap_or_default(),
                squad_id: squad.map(|id| id.to_string()).unwrap_or_default(),
                status: status.map(|s| s.as_str().to_string()).unwrap_or_default(),
                priority: priority.map(|p| p.as_str().to_string()).unwrap_or_default(),
            };
            list::<Activities>(ctx, filters, page, render::activities_table).await
        }
        ActivityCommand::Show { id } => show::<Activities>(ctx, id).await,
        ActivityCommand::Create(fields) => {
            save::<Activities>(ctx, None, |a| fields.apply(a)).await
        }
        ActivityCommand::Update { id, fields } => {
            save::<Activities>(ctx, Some(id), |a| fields.apply(a)).await
        }
        ActivityCommand::Delete(args) => delete::<Activities>(ctx, args).await,
        ActivityCommand::Stats => {
            let stats = ActivityService::new(&ctx.state)
                .statistics()
                .await
                .map_err(|e| {
                    ctx.notifier.error(&format!("Failed to load statistics: {e}"));
                    reported(e)
                })?;
            ctx.emit(|| Ok(render::statistics(&stats)), &stats)
        }
    }
}

async fn users(ctx: &Context, cmd: UserCommand) -> Result<()> {
    match cmd {
        UserCommand::List { page } => {
            list::<Users>(ctx, UserFilter, page, render::users_table).await
        }
        UserCommand::Show { id } => show::<Users>(ctx, id).await,
        UserCommand::Create(fields) => save::<Users>(ctx, None, |a| fields.apply(a)).await,
        UserCommand::Update { id, fields } => {
            save::<Users>(ctx, Some(id), |a| fields.apply(a)).await
        }
        UserCommand::Delete(args) => delete::<Users>(ctx, args).await,
    }
}

#[derive(Serialize)]
struct DashboardOutput<'a> {
    summary: Summary,
    filters: &'a DashboardFilters,
    options: FilterOptions,
    sections: Vec<SquadSection>,
}

async fn dashboard(ctx: &Context, args: DashboardArgs) -> Result<()> {
    let mut dashboard = Dashboard::load(&ctx.state).await.map_err(|e| {
        ctx.notifier.error(&format!("Failed to load dashboard: {e}"));
        reported(e)
    })?;

    // The production order goes first: choosing one clears the project.
    dashboard.filters.set_production_order(args.production_order);
    dashboard.filters.set_project(args.project);
    dashboard.filters.set_squad(args.squad);
    dashboard.filters.set_activity_type(args.activity_type);

    let output = DashboardOutput {
        summary: dashboard.summary(),
        filters: &dashboard.filters,
        options: dashboard.options(),
        sections: dashboard.sections(),
    };
    ctx.emit(|| Ok(render::dashboard(&dashboard)), &output)
}

// ═══════════════════════════════════════════════════════════════════════════
// Terminal input
// ═══════════════════════════════════════════════════════════════════════════

fn prompt(label: &str) -> Result<String> {
    eprint!("{label}");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn confirm(question: &str) -> Result<bool> {
    let answer = prompt(&format!("{question} [y/N] "))?;
    Ok(parse_confirmation(&answer))
}

fn parse_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
