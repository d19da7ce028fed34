use async_trait::async_trait;
use wfcore::{
    error::BackendError,
    workflow::{
        traits::WorkflowBackend,
        Workflow,
        Workflows,
    },
};

use crate::SqliteBackend;

async fn add_workflow_sqlite(
    backend: &SqliteBackend,
    project_id: i64,
    name: &str,
) -> Result<i64, BackendError> {
    let id = sqlx::query(
        r#"
INSERT INTO workflow (
    project_id,
    name
)
VALUES ( ?1, ?2 )
        "#,
    )
    .bind(project_id)
    .bind(name)
    .execute(&*backend.pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}

async fn get_workflow_sqlite(
    backend: &SqliteBackend,
    id: i64,
) -> Result<Option<Workflow>, BackendError> {
    let rec = sqlx::query_as::<_, Workflow>(
        r#"
SELECT
    id,
    project_id,
    name
FROM
    workflow
WHERE
    id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&*backend.pool)
    .await?;
    Ok(rec)
}

async fn list_workflows_for_project_sqlite(
    backend: &SqliteBackend,
    project_id: i64,
) -> Result<Workflows, BackendError> {
    let recs = sqlx::query_as::<_, Workflow>(
        r#"
SELECT
    id,
    project_id,
    name
FROM
    workflow
WHERE
    project_id = ?1
ORDER BY
    id
        "#,
    )
    .bind(project_id)
    .fetch_all(&*backend.pool)
    .await?;
    Ok(recs.into())
}

async fn rename_workflow_sqlite(
    backend: &SqliteBackend,
    id: i64,
    name: &str,
) -> Result<bool, BackendError> {
    let rows_affected = sqlx::query(
        r#"
UPDATE
    workflow
SET
    name = ?2
WHERE
    id = ?1
        "#,
    )
    .bind(id)
    .bind(name)
    .execute(&*backend.pool)
    .await?
    .rows_affected();
    Ok(rows_affected > 0)
}

async fn delete_workflow_sqlite(
    backend: &SqliteBackend,
    id: i64,
) -> Result<bool, BackendError> {
    let mut tx = backend.pool.begin().await?;

    let relations = sqlx::query(
        r#"
DELETE FROM
    workflow_status_relation
WHERE
    workflow_id = ?1
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let rows_affected = sqlx::query(
        r#"
DELETE FROM
    workflow
WHERE
    id = ?1
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    tx.commit().await?;
    if rows_affected > 0 {
        log::info!("deleted workflow {id} along with {relations} transition(s)");
    }
    Ok(rows_affected > 0)
}

#[async_trait]
impl WorkflowBackend for SqliteBackend {
    async fn add_workflow(
        &self,
        project_id: i64,
        name: &str,
    ) -> Result<i64, BackendError> {
        add_workflow_sqlite(
            &self,
            project_id,
            name,
        ).await
    }

    async fn get_workflow(
        &self,
        id: i64,
    ) -> Result<Option<Workflow>, BackendError> {
        get_workflow_sqlite(
            &self,
            id,
        ).await
    }

    async fn list_workflows_for_project(
        &self,
        project_id: i64,
    ) -> Result<Workflows, BackendError> {
        list_workflows_for_project_sqlite(
            &self,
            project_id,
        ).await
    }

    async fn rename_workflow(
        &self,
        id: i64,
        name: &str,
    ) -> Result<bool, BackendError> {
        rename_workflow_sqlite(
            &self,
            id,
            name,
        ).await
    }

    async fn delete_workflow(
        &self,
        id: i64,
    ) -> Result<bool, BackendError> {
        delete_workflow_sqlite(
            &self,
            id,
        ).await
    }
}
