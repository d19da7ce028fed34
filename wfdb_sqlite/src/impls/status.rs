use async_trait::async_trait;
use wfcore::{
    error::BackendError,
    status::{
        traits::StatusBackend,
        Status,
        Statuses,
    },
};

use crate::SqliteBackend;

async fn add_status_sqlite(
    backend: &SqliteBackend,
    project_id: i64,
    name: &str,
    sort_order: Option<i64>,
    is_final: bool,
) -> Result<i64, BackendError> {
    let id = sqlx::query(
        r#"
INSERT INTO status (
    project_id,
    name,
    sort_order,
    is_final
)
VALUES ( ?1, ?2, ?3, ?4 )
        "#,
    )
    .bind(project_id)
    .bind(name)
    .bind(sort_order)
    .bind(is_final)
    .execute(&*backend.pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}

async fn get_status_sqlite(
    backend: &SqliteBackend,
    id: i64,
) -> Result<Option<Status>, BackendError> {
    let rec = sqlx::query_as::<_, Status>(
        r#"
SELECT
    id,
    project_id,
    name,
    sort_order,
    is_final
FROM
    status
WHERE
    id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&*backend.pool)
    .await?;
    Ok(rec)
}

async fn list_statuses_for_project_sqlite(
    backend: &SqliteBackend,
    project_id: i64,
) -> Result<Statuses, BackendError> {
    let recs = sqlx::query_as::<_, Status>(
        r#"
SELECT
    id,
    project_id,
    name,
    sort_order,
    is_final
FROM
    status
WHERE
    project_id = ?1
        "#,
    )
    .bind(project_id)
    .fetch_all(&*backend.pool)
    .await?;
    let mut statuses = Statuses::from(recs);
    statuses.sort_by_catalog();
    Ok(statuses)
}

#[async_trait]
impl StatusBackend for SqliteBackend {
    async fn add_status(
        &self,
        project_id: i64,
        name: &str,
        sort_order: Option<i64>,
        is_final: bool,
    ) -> Result<i64, BackendError> {
        add_status_sqlite(
            &self,
            project_id,
            name,
            sort_order,
            is_final,
        ).await
    }

    async fn get_status(
        &self,
        id: i64,
    ) -> Result<Option<Status>, BackendError> {
        get_status_sqlite(
            &self,
            id,
        ).await
    }

    async fn list_statuses_for_project(
        &self,
        project_id: i64,
    ) -> Result<Statuses, BackendError> {
        list_statuses_for_project_sqlite(
            &self,
            project_id,
        ).await
    }
}
