//! Project repository.
//!
//! Projects are owned by the wider application; the ledger core only
//! needs create/list/get and existence checks, so that is all this
//! repository exposes.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::projects;

/// Error types for project operations.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// Project not found.
    #[error("Project not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl ProjectError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "PROJECT_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }
}

/// Input for creating a project.
#[derive(Debug, Clone)]
pub struct CreateProjectInput {
    /// Project name.
    pub name: String,
    /// Client the project is for.
    pub client_name: Option<String>,
}

/// Project repository for boundary CRUD.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    db: DatabaseConnection,
}

impl ProjectRepository {
    /// Creates a new project repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new project.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create_project(
        &self,
        input: CreateProjectInput,
    ) -> Result<projects::Model, ProjectError> {
        let now = Utc::now().into();

        let project = projects::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            client_name: Set(input.client_name),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(project.insert(&self.db).await?)
    }

    /// Lists all projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_projects(&self) -> Result<Vec<projects::Model>, ProjectError> {
        Ok(projects::Entity::find()
            .order_by_desc(projects::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Gets a project by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the project does not exist.
    pub async fn get_project(&self, project_id: Uuid) -> Result<projects::Model, ProjectError> {
        projects::Entity::find_by_id(project_id)
            .one(&self.db)
            .await?
            .ok_or(ProjectError::NotFound(project_id))
    }
}
