use async_trait::async_trait;
use itertools::Itertools;
use sqlx::{
    sqlite::SqliteRow,
    QueryBuilder,
    Row,
    Sqlite,
};
use std::collections::HashMap;
use wfcore::{
    error::BackendError,
    role::{
        Role,
        Roles,
    },
    status::Status,
    workflow::{
        traits::TransitionBackend,
        Workflow,
        WorkflowStatusRelation,
        WorkflowStatusRelations,
    },
};

use crate::{
    impls::map_unique_violation,
    SqliteBackend,
};

const SELECT_RELATION: &str = r#"
SELECT
    r.id AS id,
    r.active AS active,
    r.initial_status AS initial_status,
    w.id AS workflow_id,
    w.project_id AS workflow_project_id,
    w.name AS workflow_name,
    f.id AS from_id,
    f.project_id AS from_project_id,
    f.name AS from_name,
    f.sort_order AS from_sort_order,
    f.is_final AS from_is_final,
    t.id AS to_id,
    t.project_id AS to_project_id,
    t.name AS to_name,
    t.sort_order AS to_sort_order,
    t.is_final AS to_is_final
FROM
    workflow_status_relation AS r
    JOIN workflow AS w ON w.id = r.workflow_id
    JOIN status AS f ON f.id = r.from_status_id
    JOIN status AS t ON t.id = r.to_status_id
"#;

fn status_from_row(row: &SqliteRow, prefix: &str) -> Result<Status, sqlx::Error> {
    Ok(Status {
        id: row.try_get(format!("{prefix}_id").as_str())?,
        project_id: row.try_get(format!("{prefix}_project_id").as_str())?,
        name: row.try_get(format!("{prefix}_name").as_str())?,
        sort_order: row.try_get(format!("{prefix}_sort_order").as_str())?,
        is_final: row.try_get(format!("{prefix}_is_final").as_str())?,
    })
}

fn relation_from_row(row: &SqliteRow) -> Result<WorkflowStatusRelation, sqlx::Error> {
    let workflow = Workflow {
        id: row.try_get("workflow_id")?,
        project_id: row.try_get("workflow_project_id")?,
        name: row.try_get("workflow_name")?,
    };
    Ok(WorkflowStatusRelation::new(
        row.try_get("id")?,
        workflow,
        status_from_row(row, "from")?,
        status_from_row(row, "to")?,
    )
    .with_active(row.try_get("active")?)
    .with_initial_status(row.try_get("initial_status")?))
}

async fn roles_for_relations_sqlite(
    backend: &SqliteBackend,
    relation_ids: &[i64],
) -> Result<HashMap<i64, Vec<Role>>, BackendError> {
    if relation_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let mut query_builder: QueryBuilder<Sqlite> = QueryBuilder::new(r#"
SELECT
    rr.workflow_status_relation_id AS relation_id,
    role.id AS id,
    role.project_id AS project_id,
    role.name AS name
FROM
    workflow_status_relation_role AS rr
    JOIN role ON role.id = rr.role_id
WHERE
    rr.workflow_status_relation_id IN ("#
    );
    let mut separated = query_builder.separated(", ");
    for id in relation_ids.iter() {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let rows = query_builder.build()
        .fetch_all(&*backend.pool)
        .await?;
    let pairs = rows.iter()
        .map(|row| Ok((
            row.try_get::<i64, _>("relation_id")?,
            Role {
                id: row.try_get("id")?,
                project_id: row.try_get("project_id")?,
                name: row.try_get("name")?,
            },
        )))
        .collect::<Result<Vec<_>, sqlx::Error>>()?;
    Ok(pairs.into_iter().into_group_map())
}

/// Selects the fully materialized relations matching the condition,
/// which refers to its arguments as `?1`, `?2` and so on.
async fn select_relations_sqlite(
    backend: &SqliteBackend,
    condition: &str,
    args: &[i64],
) -> Result<WorkflowStatusRelations, BackendError> {
    let sql = format!("{SELECT_RELATION}WHERE\n    {condition}\nORDER BY\n    r.id\n");
    let mut query = sqlx::query(&sql);
    for arg in args {
        query = query.bind(*arg);
    }
    let rows = query.fetch_all(&*backend.pool).await?;
    let relations = rows.iter()
        .map(relation_from_row)
        .collect::<Result<Vec<_>, _>>()?;

    let ids = relations.iter()
        .map(WorkflowStatusRelation::id)
        .collect::<Vec<_>>();
    let mut roles = roles_for_relations_sqlite(backend, &ids).await?;
    Ok(relations.into_iter()
        .map(|relation| {
            let relation_roles = roles.remove(&relation.id())
                .map(Roles::from)
                .unwrap_or_default();
            relation.with_roles(relation_roles)
        })
        .collect::<Vec<_>>()
        .into())
}

async fn add_transition_sqlite(
    backend: &SqliteBackend,
    workflow_id: i64,
    from_status_id: i64,
    to_status_id: i64,
    role_ids: &[i64],
    active: bool,
    initial_status: bool,
) -> Result<i64, BackendError> {
    let mut tx = backend.pool.begin().await?;

    let id = sqlx::query(
        r#"
INSERT INTO workflow_status_relation (
    workflow_id,
    from_status_id,
    to_status_id,
    active,
    initial_status
)
VALUES ( ?1, ?2, ?3, ?4, ?5 )
        "#,
    )
    .bind(workflow_id)
    .bind(from_status_id)
    .bind(to_status_id)
    .bind(active)
    .bind(initial_status)
    .execute(&mut *tx)
    .await
    .map_err(map_unique_violation)?
    .last_insert_rowid();

    for role_id in role_ids.iter().unique() {
        sqlx::query(
            r#"
INSERT INTO workflow_status_relation_role (
    workflow_status_relation_id,
    role_id
)
VALUES ( ?1, ?2 )
            "#,
        )
        .bind(id)
        .bind(role_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(id)
}

async fn get_transition_by_id_sqlite(
    backend: &SqliteBackend,
    id: i64,
) -> Result<Option<WorkflowStatusRelation>, BackendError> {
    Ok(select_relations_sqlite(backend, "r.id = ?1", &[id]).await?
        .into_iter()
        .next())
}

async fn find_by_workflow_and_endpoints_sqlite(
    backend: &SqliteBackend,
    workflow_id: i64,
    from_status_id: i64,
    to_status_id: i64,
) -> Result<Option<WorkflowStatusRelation>, BackendError> {
    Ok(select_relations_sqlite(
        backend,
        "r.workflow_id = ?1 AND r.from_status_id = ?2 AND r.to_status_id = ?3",
        &[workflow_id, from_status_id, to_status_id],
    ).await?
        .into_iter()
        .next())
}

async fn exists_by_workflow_and_endpoints_sqlite(
    backend: &SqliteBackend,
    workflow_id: i64,
    from_status_id: i64,
    to_status_id: i64,
) -> Result<bool, BackendError> {
    let count: i64 = sqlx::query_scalar(
        r#"
SELECT
    COUNT(*)
FROM
    workflow_status_relation
WHERE
    workflow_id = ?1 AND
    from_status_id = ?2 AND
    to_status_id = ?3
        "#,
    )
    .bind(workflow_id)
    .bind(from_status_id)
    .bind(to_status_id)
    .fetch_one(&*backend.pool)
    .await?;
    Ok(count > 0)
}

async fn count_by_workflow_id_sqlite(
    backend: &SqliteBackend,
    workflow_id: i64,
) -> Result<i64, BackendError> {
    let count = sqlx::query_scalar(
        r#"
SELECT
    COUNT(*)
FROM
    workflow_status_relation
WHERE
    workflow_id = ?1
        "#,
    )
    .bind(workflow_id)
    .fetch_one(&*backend.pool)
    .await?;
    Ok(count)
}

async fn set_transition_roles_sqlite(
    backend: &SqliteBackend,
    id: i64,
    role_ids: &[i64],
) -> Result<bool, BackendError> {
    let mut tx = backend.pool.begin().await?;

    let found: Option<i64> = sqlx::query_scalar(
        r#"
SELECT
    id
FROM
    workflow_status_relation
WHERE
    id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;
    if found.is_none() {
        tx.rollback().await?;
        return Ok(false);
    }

    sqlx::query(
        r#"
DELETE FROM
    workflow_status_relation_role
WHERE
    workflow_status_relation_id = ?1
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    for role_id in role_ids.iter().unique() {
        sqlx::query(
            r#"
INSERT INTO workflow_status_relation_role (
    workflow_status_relation_id,
    role_id
)
VALUES ( ?1, ?2 )
            "#,
        )
        .bind(id)
        .bind(role_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(true)
}

async fn set_transition_flag_sqlite(
    backend: &SqliteBackend,
    id: i64,
    column: &str,
    value: bool,
) -> Result<bool, BackendError> {
    let sql = format!(r#"
UPDATE
    workflow_status_relation
SET
    {column} = ?2
WHERE
    id = ?1
    "#);
    let rows_affected = sqlx::query(&sql)
        .bind(id)
        .bind(value)
        .execute(&*backend.pool)
        .await?
        .rows_affected();
    Ok(rows_affected > 0)
}

async fn delete_by_workflow_and_endpoints_sqlite(
    backend: &SqliteBackend,
    workflow_id: i64,
    from_status_id: i64,
    to_status_id: i64,
) -> Result<bool, BackendError> {
    let rows_affected = sqlx::query(
        r#"
DELETE FROM
    workflow_status_relation
WHERE
    workflow_id = ?1 AND
    from_status_id = ?2 AND
    to_status_id = ?3
        "#,
    )
    .bind(workflow_id)
    .bind(from_status_id)
    .bind(to_status_id)
    .execute(&*backend.pool)
    .await?
    .rows_affected();
    Ok(rows_affected > 0)
}

async fn delete_by_workflow_id_sqlite(
    backend: &SqliteBackend,
    workflow_id: i64,
) -> Result<u64, BackendError> {
    let rows_affected = sqlx::query(
        r#"
DELETE FROM
    workflow_status_relation
WHERE
    workflow_id = ?1
        "#,
    )
    .bind(workflow_id)
    .execute(&*backend.pool)
    .await?
    .rows_affected();
    Ok(rows_affected)
}

#[async_trait]
impl TransitionBackend for SqliteBackend {
    async fn add_transition(
        &self,
        workflow_id: i64,
        from_status_id: i64,
        to_status_id: i64,
        role_ids: &[i64],
        active: bool,
        initial_status: bool,
    ) -> Result<i64, BackendError> {
        add_transition_sqlite(
            &self,
            workflow_id,
            from_status_id,
            to_status_id,
            role_ids,
            active,
            initial_status,
        ).await
    }

    async fn get_transition_by_id(
        &self,
        id: i64,
    ) -> Result<Option<WorkflowStatusRelation>, BackendError> {
        get_transition_by_id_sqlite(
            &self,
            id,
        ).await
    }

    async fn find_by_workflow_id(
        &self,
        workflow_id: i64,
    ) -> Result<WorkflowStatusRelations, BackendError> {
        select_relations_sqlite(
            &self,
            "r.workflow_id = ?1",
            &[workflow_id],
        ).await
    }

    async fn find_by_from_status_id(
        &self,
        status_id: i64,
    ) -> Result<WorkflowStatusRelations, BackendError> {
        select_relations_sqlite(
            &self,
            "r.from_status_id = ?1",
            &[status_id],
        ).await
    }

    async fn find_by_to_status_id(
        &self,
        status_id: i64,
    ) -> Result<WorkflowStatusRelations, BackendError> {
        select_relations_sqlite(
            &self,
            "r.to_status_id = ?1",
            &[status_id],
        ).await
    }

    async fn find_by_workflow_and_endpoints(
        &self,
        workflow_id: i64,
        from_status_id: i64,
        to_status_id: i64,
    ) -> Result<Option<WorkflowStatusRelation>, BackendError> {
        find_by_workflow_and_endpoints_sqlite(
            &self,
            workflow_id,
            from_status_id,
            to_status_id,
        ).await
    }

    async fn exists_by_workflow_and_endpoints(
        &self,
        workflow_id: i64,
        from_status_id: i64,
        to_status_id: i64,
    ) -> Result<bool, BackendError> {
        exists_by_workflow_and_endpoints_sqlite(
            &self,
            workflow_id,
            from_status_id,
            to_status_id,
        ).await
    }

    async fn find_by_role_id(
        &self,
        role_id: i64,
    ) -> Result<WorkflowStatusRelations, BackendError> {
        select_relations_sqlite(
            &self,
            "r.id IN (
        SELECT workflow_status_relation_id
        FROM workflow_status_relation_role
        WHERE role_id = ?1
    )",
            &[role_id],
        ).await
    }

    async fn count_by_workflow_id(
        &self,
        workflow_id: i64,
    ) -> Result<i64, BackendError> {
        count_by_workflow_id_sqlite(
            &self,
            workflow_id,
        ).await
    }

    async fn set_transition_roles(
        &self,
        id: i64,
        role_ids: &[i64],
    ) -> Result<bool, BackendError> {
        set_transition_roles_sqlite(
            &self,
            id,
            role_ids,
        ).await
    }

    async fn set_transition_active(
        &self,
        id: i64,
        active: bool,
    ) -> Result<bool, BackendError> {
        set_transition_flag_sqlite(
            &self,
            id,
            "active",
            active,
        ).await
    }

    async fn set_transition_initial(
        &self,
        id: i64,
        initial_status: bool,
    ) -> Result<bool, BackendError> {
        set_transition_flag_sqlite(
            &self,
            id,
            "initial_status",
            initial_status,
        ).await
    }

    async fn delete_by_workflow_and_endpoints(
        &self,
        workflow_id: i64,
        from_status_id: i64,
        to_status_id: i64,
    ) -> Result<bool, BackendError> {
        delete_by_workflow_and_endpoints_sqlite(
            &self,
            workflow_id,
            from_status_id,
            to_status_id,
        ).await
    }

    async fn delete_by_workflow_id(
        &self,
        workflow_id: i64,
    ) -> Result<u64, BackendError> {
        delete_by_workflow_id_sqlite(
            &self,
            workflow_id,
        ).await
    }
}
