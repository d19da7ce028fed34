use wfcore::{
    error::BackendError,
    platform::{
        ConnectorOption,
        PlatformUrl,
    },
};
use sqlx::{
    migrate::MigrateDatabase,
    Sqlite,
    SqlitePool,
};
use std::sync::Arc;

use crate::SqliteBackend;

impl PlatformUrl for SqliteBackend {
    fn url(&self) -> &str {
        self.url.as_ref()
    }
}

impl SqliteBackend {
    pub async fn connect(opts: ConnectorOption) -> Result<SqliteBackend, sqlx::Error> {
        if opts.auto_create_db && !Sqlite::database_exists(&opts.url).await.unwrap_or(false) {
            log::warn!("sqlite database {} does not exist; creating...", &opts.url);
            Sqlite::create_database(&opts.url).await?
        }

        let pool = SqlitePool::connect(&opts.url).await?;
        Ok(SqliteBackend {
            pool: Arc::new(pool),
            url: opts.url,
        })
    }

    pub async fn migrate_wf(self) -> Result<Self, sqlx::Error> {
        sqlx::migrate!("migrations/wf").run(&*self.pool).await?;
        Ok(self)
    }

    /// Connect and bring the schema up to date.
    pub async fn wf(opts: ConnectorOption) -> Result<SqliteBackend, sqlx::Error> {
        SqliteBackend::connect(opts).await?
            .migrate_wf()
            .await
    }
}

/// Unique index violations are reported distinctly so callers may
/// treat them as a rejected duplicate rather than a storage failure.
pub(crate) fn map_unique_violation(e: sqlx::Error) -> BackendError {
    match e.as_database_error() {
        Some(db_e) if db_e.is_unique_violation() =>
            BackendError::UniqueViolation(db_e.message().to_string()),
        _ => BackendError::from(e),
    }
}

mod entity_type;
mod project;
mod role;
mod status;
mod transition;
mod workflow;

mod default_impl {
    use wfcore::platform::DefaultWFPlatform;
    use crate::SqliteBackend;

    impl DefaultWFPlatform for SqliteBackend {}
}

#[cfg(test)]
pub(crate) mod testing {
    use wfcore::{
        project::traits::ProjectBackend,
        role::traits::RoleBackend,
        status::traits::StatusBackend,
        workflow::traits::WorkflowBackend,
    };
    use crate::SqliteBackend;

    pub(crate) async fn create_backend() -> anyhow::Result<SqliteBackend> {
        Ok(SqliteBackend::wf("sqlite::memory:".into()).await?)
    }

    /// A backend with project 1 holding statuses 1 (A), 2 (B), 3 (C),
    /// roles 1 (Dev), 2 (QA), 3 (Lead) and workflow 1 (W1).
    pub(crate) async fn create_populated_backend() -> anyhow::Result<SqliteBackend> {
        let backend = create_backend().await?;
        let project_id = backend.add_project("Project").await?;
        backend.add_status(project_id, "A", Some(1), false).await?;
        backend.add_status(project_id, "B", Some(2), false).await?;
        backend.add_status(project_id, "C", Some(3), true).await?;
        backend.add_role(project_id, "Dev").await?;
        backend.add_role(project_id, "QA").await?;
        backend.add_role(project_id, "Lead").await?;
        backend.add_workflow(project_id, "W1").await?;
        Ok(backend)
    }
}

#[cfg(test)]
mod tests {
    use wfcore::{
        platform::{
            ConnectorOption,
            PlatformUrl,
            WFPlatform,
        },
        project::traits::ProjectBackend,
    };
    use crate::SqliteBackend;

    #[async_std::test]
    async fn auto_create_db() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let url = format!("sqlite://{}", dir.path().join("wf.db").display());
        assert!(SqliteBackend::wf(url.as_str().into()).await.is_err());

        let backend = SqliteBackend::wf(
            ConnectorOption::from(&url)
                .auto_create_db(true)
        ).await?;
        let platform: &dyn WFPlatform = backend.as_dyn();
        assert_eq!(platform.url(), url);
        assert_eq!(platform.add_project("Project").await?, 1);

        // migrations are idempotent on an existing database
        let backend = SqliteBackend::wf(url.as_str().into()).await?;
        assert_eq!(backend.get_project(1).await?.map(|p| p.name), Some("Project".to_string()));
        Ok(())
    }
}
