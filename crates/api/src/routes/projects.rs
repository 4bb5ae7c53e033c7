//! Project boundary routes.
//!
//! Projects are owned by the wider application; these routes exist so
//! the ledger has something to hang records on.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use studio_db::repositories::{CreateProjectInput, ProjectError, ProjectRepository};

use super::error_response;

/// Creates the project routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects", post(create_project))
        .route("/projects", get(list_projects))
        .route("/projects/{project_id}", get(get_project))
}

/// Request body for creating a project.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    /// Project name.
    pub name: String,
    /// Client the project is for.
    pub client_name: Option<String>,
}

/// Response for a project.
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    /// Project ID.
    pub id: Uuid,
    /// Project name.
    pub name: String,
    /// Client the project is for.
    pub client_name: Option<String>,
}

fn project_error(e: &ProjectError) -> axum::response::Response {
    error_response(e.http_status_code(), e.error_code(), &e.to_string())
}

/// POST `/projects` - Create a project.
async fn create_project(
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectRequest>,
) -> impl IntoResponse {
    let repo = ProjectRepository::new((*state.db).clone());

    let input = CreateProjectInput {
        name: payload.name,
        client_name: payload.client_name,
    };

    match repo.create_project(input).await {
        Ok(project) => {
            info!(project_id = %project.id, name = %project.name, "Project created");
            (
                StatusCode::CREATED,
                Json(ProjectResponse {
                    id: project.id,
                    name: project.name,
                    client_name: project.client_name,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create project");
            project_error(&e)
        }
    }
}

/// GET `/projects` - List projects, newest first.
async fn list_projects(State(state): State<AppState>) -> impl IntoResponse {
    let repo = ProjectRepository::new((*state.db).clone());

    match repo.list_projects().await {
        Ok(projects) => {
            let response: Vec<ProjectResponse> = projects
                .into_iter()
                .map(|p| ProjectResponse {
                    id: p.id,
                    name: p.name,
                    client_name: p.client_name,
                })
                .collect();
            Json(serde_json::json!({ "projects": response })).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list projects");
            project_error(&e)
        }
    }
}

/// GET `/projects/{project_id}` - Get one project.
async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = ProjectRepository::new((*state.db).clone());

    match repo.get_project(project_id).await {
        Ok(project) => Json(ProjectResponse {
            id: project.id,
            name: project.name,
            client_name: project.client_name,
        })
        .into_response(),
        Err(e) => project_error(&e),
    }
}
