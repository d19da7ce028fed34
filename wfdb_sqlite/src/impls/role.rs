use async_trait::async_trait;
use wfcore::{
    error::BackendError,
    role::{
        traits::RoleBackend,
        Role,
        Roles,
    },
};

use crate::SqliteBackend;

async fn add_role_sqlite(
    backend: &SqliteBackend,
    project_id: i64,
    name: &str,
) -> Result<i64, BackendError> {
    let id = sqlx::query(
        r#"
INSERT INTO role (
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

async fn get_role_sqlite(
    backend: &SqliteBackend,
    id: i64,
) -> Result<Option<Role>, BackendError> {
    let rec = sqlx::query_as::<_, Role>(
        r#"
SELECT
    id,
    project_id,
    name
FROM
    role
WHERE
    id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&*backend.pool)
    .await?;
    Ok(rec)
}

async fn list_roles_for_project_sqlite(
    backend: &SqliteBackend,
    project_id: i64,
) -> Result<Roles, BackendError> {
    let recs = sqlx::query_as::<_, Role>(
        r#"
SELECT
    id,
    project_id,
    name
FROM
    role
WHERE
    project_id = ?1
        "#,
    )
    .bind(project_id)
    .fetch_all(&*backend.pool)
    .await?;
    Ok(recs.into())
}

#[async_trait]
impl RoleBackend for SqliteBackend {
    async fn add_role(
        &self,
        project_id: i64,
        name: &str,
    ) -> Result<i64, BackendError> {
        add_role_sqlite(
            &self,
            project_id,
            name,
        ).await
    }

    async fn get_role(
        &self,
        id: i64,
    ) -> Result<Option<Role>, BackendError> {
        get_role_sqlite(
            &self,
            id,
        ).await
    }

    async fn list_roles_for_project(
        &self,
        project_id: i64,
    ) -> Result<Roles, BackendError> {
        list_roles_for_project_sqlite(
            &self,
            project_id,
        ).await
    }
}

#[cfg(test)]
mod tests {
    use wfcore::{
        project::traits::ProjectBackend,
        role::traits::RoleBackend,
    };
    use crate::impls::testing::{
        create_backend,
        create_populated_backend,
    };

    #[async_std::test]
    async fn test_list_roles() -> anyhow::Result<()> {
        let backend = create_populated_backend().await?;
        let other = backend.add_project("Other").await?;
        backend.add_role(other, "Guest").await?;

        let roles = backend.list_roles_for_project(1).await?;
        assert_eq!(roles.to_string(), "[Dev, QA, Lead]");
        assert_eq!(roles.ids(), [1, 2, 3]);

        let role = backend.get_role(4).await?
            .expect("role should have been added");
        assert_eq!(role.project_id, other);
        Ok(())
    }

    #[async_std::test]
    async fn test_role_requires_project() -> anyhow::Result<()> {
        let backend = create_backend().await?;
        assert!(backend.add_role(1, "Dev").await.is_err());
        Ok(())
    }
}
