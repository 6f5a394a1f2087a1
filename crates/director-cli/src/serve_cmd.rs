use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use director_core::render::html::{PageView, render_page};
use director_core::theme::TemplateLibrary;
use director_core::{GenerateError, Plan, ThemeCategory, generate_plan};

/// Idea shown when the server starts.
pub const DEFAULT_IDEA: &str = "Create a superhero story where a father saves his family";

const BLANK_NOTICE: &str = "Please enter a story idea.";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: msg.into(),
        }
    }
}

impl From<GenerateError> for AppError {
    fn from(err: GenerateError) -> Self {
        match err {
            GenerateError::InvalidInput => Self::unprocessable(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// The plan currently on display, with the idea that produced it.
#[derive(Debug)]
pub struct CurrentPlan {
    pub idea: String,
    pub plan: Plan,
}

#[derive(Clone)]
pub struct AppState {
    current: Arc<RwLock<CurrentPlan>>,
}

impl AppState {
    /// Seed the slot with a plan for `idea`.
    pub fn new(idea: &str) -> Result<Self> {
        let plan = generate_plan(idea)?;
        Ok(Self {
            current: Arc::new(RwLock::new(CurrentPlan {
                idea: plan.idea.clone(),
                plan,
            })),
        })
    }

    /// Generate outside the lock, then replace the slot. Last write wins.
    async fn submit(&self, idea: &str) -> Result<Plan, GenerateError> {
        let plan = generate_plan(idea)?;
        tracing::info!(
            category = %plan.category,
            fingerprint = %plan.fingerprint,
            "generated plan"
        );
        let mut slot = self.current.write().await;
        slot.idea = plan.idea.clone();
        slot.plan = plan.clone();
        Ok(plan)
    }
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct IdeaInput {
    #[serde(default)]
    pub idea: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSummary {
    pub category: ThemeCategory,
    pub label: &'static str,
    pub keywords: Vec<String>,
    pub theme: String,
    pub setting: String,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(submit_form))
        .route("/api/plan", get(get_plan).post(submit_json))
        .route("/api/themes", get(list_themes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(bind: &str, port: u16) -> Result<()> {
    let app = build_router(AppState::new(DEFAULT_IDEA)?);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("director serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("director serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn index(State(state): State<AppState>) -> Result<axum::response::Response, AppError> {
    let slot = state.current.read().await;
    let page = render_page(&PageView::interactive(&slot.plan, &slot.idea, None));
    Ok(Html(page).into_response())
}

async fn submit_form(
    State(state): State<AppState>,
    Form(input): Form<IdeaInput>,
) -> Result<axum::response::Response, AppError> {
    let idea = input.idea.trim();
    if idea.is_empty() {
        tracing::warn!("rejected blank idea from form");
        let slot = state.current.read().await;
        let page = render_page(&PageView::interactive(
            &slot.plan,
            &slot.idea,
            Some(BLANK_NOTICE),
        ));
        return Ok(Html(page).into_response());
    }

    let plan = state.submit(idea).await?;
    let page = render_page(&PageView::interactive(&plan, &plan.idea, None));
    Ok(Html(page).into_response())
}

async fn get_plan(State(state): State<AppState>) -> Result<axum::response::Response, AppError> {
    let slot = state.current.read().await;
    Ok(Json(&slot.plan).into_response())
}

async fn submit_json(
    State(state): State<AppState>,
    Json(input): Json<IdeaInput>,
) -> Result<axum::response::Response, AppError> {
    if input.idea.trim().is_empty() {
        tracing::warn!("rejected blank idea from api");
    }
    let plan = state.submit(&input.idea).await?;
    Ok(Json(plan).into_response())
}

async fn list_themes() -> Result<axum::response::Response, AppError> {
    let themes: Vec<ThemeSummary> = TemplateLibrary::builtin()
        .themes()
        .iter()
        .map(|set| ThemeSummary {
            category: set.category,
            label: set.category.label(),
            keywords: set.keywords.clone(),
            theme: set.theme.clone(),
            setting: set.setting.clone(),
        })
        .collect();
    Ok(Json(themes).into_response())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
