use wfcore::{
    entity::EntityType,
    project::Project,
    role::Role,
    status::Status,
    workflow::Workflow,
};
use wfctrl::{
    platform::Builder,
    Platform,
};
use wfdb_sqlite::SqliteBackend;

pub async fn create_sqlite_backend() -> anyhow::Result<SqliteBackend> {
    Ok(SqliteBackend::wf("sqlite::memory:".into()).await?)
}

pub async fn create_sqlite_platform() -> anyhow::Result<Platform> {
    Ok(Builder::new()
        .wf_platform(create_sqlite_backend().await?)
        .build())
}

/// A project with statuses A, B and C (final, in that catalog order),
/// roles Dev, QA and Lead, an empty workflow W1 and an "activity" type
/// Bug that is governed by W1.
pub struct Fixture {
    pub platform: Platform,
    pub project: Project,
    pub a: Status,
    pub b: Status,
    pub c: Status,
    pub dev: Role,
    pub qa: Role,
    pub lead: Role,
    pub workflow: Workflow,
    pub bug: EntityType,
}

pub async fn create_fixture() -> anyhow::Result<Fixture> {
    let platform = create_sqlite_platform().await?;
    let project = platform.create_project("Project").await?;
    let a = platform.create_status(&project, "A", Some(1), false).await?;
    let b = platform.create_status(&project, "B", Some(2), false).await?;
    let c = platform.create_status(&project, "C", Some(3), true).await?;
    let dev = platform.create_role(&project, "Dev").await?;
    let qa = platform.create_role(&project, "QA").await?;
    let lead = platform.create_role(&project, "Lead").await?;
    let workflow = platform.create_workflow(&project, "W1").await?;
    let bug = platform.create_entity_type(&project, "activity", "Bug", Some(&workflow)).await?;
    Ok(Fixture { platform, project, a, b, c, dev, qa, lead, workflow, bug })
}
