use crate::error::ApiError;
use crate::AppState;
use analysis_core::display::AnalysisView;
use analysis_core::history::{self, IncidentDetail, IncidentQuery, IncidentSummary, Page};
use analysis_core::roles::Role;
use analysis_core::upload::ImageUpload;
use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use incident_registry::IncidentRecord;
use std::path::PathBuf;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub const IMAGE_FIELD: &str = "image";

#[derive(Clone, Debug)]
pub struct RouterOptions {
    pub ui_dir: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            ui_dir: None,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

pub fn dashboard_router(state: AppState, options: RouterOptions) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/api/analyze", post(analyze))
        .route("/api/history", get(full_history))
        .route("/api/incidents", get(list_incidents))
        .route("/api/incidents/:id", get(get_incident))
        .layer(DefaultBodyLimit::max(options.max_upload_bytes));

    let ui_index = options
        .ui_dir
        .as_ref()
        .map(|dir| dir.join("index.html"))
        .filter(|index| index.is_file());

    let router = match (options.ui_dir, ui_index) {
        (Some(dir), Some(index)) => {
            api.fallback_service(ServeDir::new(dir).not_found_service(ServeFile::new(index)))
        }
        _ => api.fallback(landing),
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "dashboard-server",
        "version": env!("CARGO_PKG_VERSION"),
        "analyzer": state.analyzer.mode_name(),
    }))
}

async fn analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisView>, ApiError> {
    let upload = read_image_field(&mut multipart).await?;
    tracing::info!(
        file = %upload.file_name,
        content_type = %upload.content_type,
        bytes = upload.bytes.len(),
        analyzer = state.analyzer.mode_name(),
        "analyzing upload"
    );
    let result = state.analyzer.analyze(&upload).await?;
    tracing::info!(severity = %result.severity, confidence = result.confidence, "analysis complete");
    Ok(Json(AnalysisView::from(result)))
}

async fn read_image_field(multipart: &mut Multipart) -> Result<ImageUpload, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        return Ok(ImageUpload::new(file_name, content_type, bytes.to_vec()));
    }
    Err(ApiError::BadRequest(format!(
        "multipart field '{IMAGE_FIELD}' is required"
    )))
}

/// Every record, for clients that filter and paginate locally.
async fn full_history(State(state): State<AppState>) -> Json<Vec<IncidentRecord>> {
    Json(state.history.as_ref().clone())
}

async fn list_incidents(
    State(state): State<AppState>,
    Query(query): Query<IncidentQuery>,
) -> Json<Page<IncidentSummary>> {
    Json(history::query_history(&state.history, &query))
}

async fn get_incident(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<IncidentDetail>, ApiError> {
    history::find_incident(&state.history, &id)
        .map(|record| Json(IncidentDetail::from(record)))
        .ok_or(ApiError::NotFound(id))
}

/// Served for every unmatched path when no built UI is available.
async fn landing(uri: Uri) -> Response {
    match Role::from_path(uri.path()) {
        Some(role) => (StatusCode::NOT_FOUND, Html(ui_missing_page(role))).into_response(),
        None => Html(role_chooser_page()).into_response(),
    }
}

fn role_chooser_page() -> String {
    let cards = [
        (
            Role::User,
            "Upload and analyze incident photos",
            "/api/analyze",
        ),
        (
            Role::Admin,
            "Manage and review incident history",
            "/api/incidents",
        ),
    ]
    .iter()
    .map(|(role, blurb, api)| {
        format!(
            r#"<section class="card"><h2>{label} Dashboard</h2><p>{blurb}</p><p><code>{api}</code></p><a href="{path}">Continue as {label}</a></section>"#,
            label = role.label(),
            path = role.path(),
        )
    })
    .collect::<Vec<_>>()
    .join("\n");

    page(&format!(
        r#"<h1>Incident Analysis Dashboard</h1>
  <p>AI-powered incident analysis for emergency responders and administrators</p>
  {cards}"#
    ))
}

fn ui_missing_page(role: Role) -> String {
    page(&format!(
        r#"<h1>{label} Dashboard</h1>
  <section class="card"><p>The dashboard UI is not built. Run <code>trunk build</code> in <code>dashboard-ui</code> and start the server with <code>--ui-dir dashboard-ui/dist</code>.</p><a href="/">Back to Home</a></section>"#,
        label = role.label(),
    ))
}

fn page(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>Incident Analysis Dashboard</title>
  <style>
    body {{ font-family: sans-serif; margin: 40px; background: #111; color: #eee; }}
    .card {{ border: 1px solid #444; border-radius: 8px; padding: 16px; margin: 16px 0; max-width: 480px; }}
    a {{ color: #f97316; }}
  </style>
</head>
<body>
  {body}
</body>
</html>"#
    )
}
