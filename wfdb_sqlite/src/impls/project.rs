use async_trait::async_trait;
use wfcore::{
    error::BackendError,
    project::{
        traits::ProjectBackend,
        Project,
    },
};

use crate::SqliteBackend;

async fn add_project_sqlite(
    backend: &SqliteBackend,
    name: &str,
) -> Result<i64, BackendError> {
    let id = sqlx::query(
        r#"
INSERT INTO project (
    name
)
VALUES ( ?1 )
        "#,
    )
    .bind(name)
    .execute(&*backend.pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}

async fn get_project_sqlite(
    backend: &SqliteBackend,
    id: i64,
) -> Result<Option<Project>, BackendError> {
    let rec = sqlx::query_as::<_, Project>(
        r#"
SELECT
    id,
    name
FROM
    project
WHERE
    id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&*backend.pool)
    .await?;
    Ok(rec)
}

#[async_trait]
impl ProjectBackend for SqliteBackend {
    async fn add_project(
        &self,
        name: &str,
    ) -> Result<i64, BackendError> {
        add_project_sqlite(
            &self,
            name,
        ).await
    }

    async fn get_project(
        &self,
        id: i64,
    ) -> Result<Option<Project>, BackendError> {
        get_project_sqlite(
            &self,
            id,
        ).await
    }
}
