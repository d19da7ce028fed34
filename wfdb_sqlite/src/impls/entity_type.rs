use async_trait::async_trait;
use wfcore::{
    entity::{
        traits::EntityTypeBackend,
        EntityType,
        EntityTypes,
    },
    error::BackendError,
};

use crate::SqliteBackend;

async fn add_entity_type_sqlite(
    backend: &SqliteBackend,
    project_id: i64,
    kind: &str,
    name: &str,
    workflow_id: Option<i64>,
) -> Result<i64, BackendError> {
    let id = sqlx::query(
        r#"
INSERT INTO entity_type (
    project_id,
    kind,
    name,
    workflow_id
)
VALUES ( ?1, ?2, ?3, ?4 )
        "#,
    )
    .bind(project_id)
    .bind(kind)
    .bind(name)
    .bind(workflow_id)
    .execute(&*backend.pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}

async fn get_entity_type_sqlite(
    backend: &SqliteBackend,
    id: i64,
) -> Result<Option<EntityType>, BackendError> {
    let rec = sqlx::query_as::<_, EntityType>(
        r#"
SELECT
    id,
    project_id,
    kind,
    name,
    workflow_id
FROM
    entity_type
WHERE
    id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&*backend.pool)
    .await?;
    Ok(rec)
}

async fn list_entity_types_sqlite(
    backend: &SqliteBackend,
    project_id: i64,
    kind: &str,
) -> Result<EntityTypes, BackendError> {
    let recs = sqlx::query_as::<_, EntityType>(
        r#"
SELECT
    id,
    project_id,
    kind,
    name,
    workflow_id
FROM
    entity_type
WHERE
    project_id = ?1 AND
    kind = ?2
ORDER BY
    id
        "#,
    )
    .bind(project_id)
    .bind(kind)
    .fetch_all(&*backend.pool)
    .await?;
    Ok(recs.into())
}

async fn set_entity_type_workflow_sqlite(
    backend: &SqliteBackend,
    id: i64,
    workflow_id: Option<i64>,
) -> Result<bool, BackendError> {
    let rows_affected = sqlx::query(
        r#"
UPDATE
    entity_type
SET
    workflow_id = ?2
WHERE
    id = ?1
        "#,
    )
    .bind(id)
    .bind(workflow_id)
    .execute(&*backend.pool)
    .await?
    .rows_affected();
    Ok(rows_affected > 0)
}

#[async_trait]
impl EntityTypeBackend for SqliteBackend {
    async fn add_entity_type(
        &self,
        project_id: i64,
        kind: &str,
        name: &str,
        workflow_id: Option<i64>,
    ) -> Result<i64, BackendError> {
        add_entity_type_sqlite(
            &self,
            project_id,
            kind,
            name,
            workflow_id,
        ).await
    }

    async fn get_entity_type(
        &self,
        id: i64,
    ) -> Result<Option<EntityType>, BackendError> {
        get_entity_type_sqlite(
            &self,
            id,
        ).await
    }

    async fn list_entity_types(
        &self,
        project_id: i64,
        kind: &str,
    ) -> Result<EntityTypes, BackendError> {
        list_entity_types_sqlite(
            &self,
            project_id,
            kind,
        ).await
    }

    async fn set_entity_type_workflow(
        &self,
        id: i64,
        workflow_id: Option<i64>,
    ) -> Result<bool, BackendError> {
        set_entity_type_workflow_sqlite(
            &self,
            id,
            workflow_id,
        ).await
    }
}

#[cfg(test)]
mod tests {
    use wfcore::entity::traits::EntityTypeBackend;
    use crate::impls::testing::create_populated_backend;

    #[async_std::test]
    async fn test_entity_types() -> anyhow::Result<()> {
        let backend = create_populated_backend().await?;
        let bug = backend.add_entity_type(1, "activity", "Bug", Some(1)).await?;
        let task = backend.add_entity_type(1, "activity", "Task", None).await?;
        backend.add_entity_type(1, "meeting", "Standup", Some(1)).await?;

        let types = backend.list_entity_types(1, "activity").await?;
        assert_eq!(
            types.iter().map(|t| t.id).collect::<Vec<_>>(),
            [bug, task],
        );
        assert_eq!(types[0].workflow_id, Some(1));
        assert!(backend.list_entity_types(2, "activity").await?.is_empty());

        assert!(backend.set_entity_type_workflow(task, Some(1)).await?);
        assert!(!backend.set_entity_type_workflow(42, Some(1)).await?);
        let entity_type = backend.get_entity_type(task).await?
            .expect("entity type should exist");
        assert_eq!(entity_type.workflow_id, Some(1));
        Ok(())
    }
}
