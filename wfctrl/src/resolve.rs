//! Status resolution for workflow-aware entities.
//!
//! The free functions here only depend on the two collaborator traits,
//! so any catalog may drive them; `Platform` provides the store-backed
//! implementation of both.

use async_trait::async_trait;
use wfcore::{
    entity::{
        EntityTypes,
        WorkflowAware,
    },
    project::Project,
    status::{
        Status,
        Statuses,
    },
    workflow::{
        WorkflowStatusRelation,
        WorkflowStatusRelations,
    },
};

use crate::{
    error::{
        ConfigurationError,
        Error,
        ValidationError,
    },
    platform::Platform,
    validate,
};

/// Lists the statuses an entity may hold next.  The ordering matters as
/// the first entry is the default choice.
#[async_trait]
pub trait StatusCatalog: Send + Sync {
    async fn valid_next_statuses(
        &self,
        entity: &dyn WorkflowAware,
    ) -> Result<Statuses, Error>;
}

#[async_trait]
pub trait EntityTypeService: Send + Sync {
    /// The entity types of the project applicable to the given kind of
    /// entity, in their order of preference.
    async fn list_by_project(
        &self,
        project: &Project,
        kind: &str,
    ) -> Result<EntityTypes, Error>;
}

/// The first of the valid next statuses for the entity, which for a
/// brand new entity is the first status any initial transition leads to.
pub async fn get_initial_status(
    catalog: &dyn StatusCatalog,
    entity: &dyn WorkflowAware,
) -> Result<Status, Error> {
    let workflow_id = entity.workflow_id()
        .ok_or(ConfigurationError::MissingWorkflow)?;
    let status = catalog.valid_next_statuses(entity).await?
        .into_iter()
        .next()
        .ok_or(ConfigurationError::NoValidStatus { workflow_id })?;
    log::debug!("initial status for workflow {workflow_id} resolved to {status}");
    Ok(status)
}

/// Assigns the first available entity type of the project followed by
/// the initial status of the governing workflow.
///
/// The entity is only updated once every step succeeded, so a failure
/// leaves it exactly as it was provided.
pub async fn initialize_new_entity<E>(
    entity: &mut E,
    project: &Project,
    types: &dyn EntityTypeService,
    catalog: &dyn StatusCatalog,
) -> Result<(), Error>
where
    E: WorkflowAware + Clone,
{
    if entity.project_id() != project.id {
        return Err(ValidationError::ForeignEntity {
            project_id: entity.project_id(),
            expected: project.id,
        }.into());
    }
    let entity_type = types.list_by_project(project, entity.kind()).await?
        .into_iter()
        .next()
        .ok_or_else(|| ConfigurationError::NoTypesAvailable {
            project_id: project.id,
            kind: entity.kind().to_string(),
        })?;

    let mut staged = entity.clone();
    staged.set_entity_type(entity_type);
    if staged.workflow_id().is_none() {
        return Err(ConfigurationError::MissingWorkflow.into());
    }
    let status = get_initial_status(catalog, &staged).await?;
    staged.set_status(status);
    *entity = staged;
    Ok(())
}

/// The statuses reachable from `current` through the relations, with
/// `current` itself kept in front.  Relations are expected to be active
/// and in resolution order already.
fn next_statuses<'a>(
    relations: impl IntoIterator<Item = &'a WorkflowStatusRelation>,
    current: Option<&Status>,
    permits: impl Fn(&WorkflowStatusRelation) -> bool,
) -> Statuses {
    let mut statuses = Statuses::default();
    match current {
        None => relations.into_iter()
            .filter(|relation| relation.initial_status() && permits(relation))
            .for_each(|relation| {
                statuses.push_unique(relation.to_status().clone());
            }),
        Some(current) => {
            statuses.push_unique(current.clone());
            relations.into_iter()
                .filter(|relation| relation.from_status().id == current.id && permits(relation))
                .for_each(|relation| {
                    statuses.push_unique(relation.to_status().clone());
                });
        }
    }
    statuses
}

impl Platform {
    /// The active relations governing the entity, in resolution order.
    async fn governing_relations(
        &self,
        entity: &dyn WorkflowAware,
    ) -> Result<WorkflowStatusRelations, Error> {
        let workflow_id = entity.workflow_id()
            .ok_or(ConfigurationError::MissingWorkflow)?;
        let workflow = self.get_workflow(workflow_id).await?
            .ok_or(Error::UnknownEntity { kind: "workflow", id: workflow_id })?;
        validate::same_project(
            "workflow",
            workflow.id,
            workflow.project_id,
            entity.project_id(),
        )?;
        let mut relations = self.wf_platform()
            .find_by_workflow_id(workflow_id)
            .await?
            .into_active();
        relations.sort_by_target();
        Ok(relations)
    }

    /// As `valid_next_statuses`, but only through transitions that the
    /// holder of the provided roles may use.
    pub async fn valid_next_statuses_for(
        &self,
        entity: &dyn WorkflowAware,
        user_role_ids: &[i64],
    ) -> Result<Statuses, Error> {
        let relations = self.governing_relations(entity).await?;
        Ok(next_statuses(
            relations.iter(),
            entity.status(),
            |relation| relation.roles().permits(user_role_ids),
        ))
    }

    pub async fn get_initial_status(
        &self,
        entity: &dyn WorkflowAware,
    ) -> Result<Status, Error> {
        get_initial_status(self, entity).await
    }

    /// Initializes the entity against this platform's entity types and
    /// workflows.
    pub async fn initialize_new_entity<E>(
        &self,
        entity: &mut E,
        project: &Project,
    ) -> Result<(), Error>
    where
        E: WorkflowAware + Clone,
    {
        initialize_new_entity(entity, project, self, self).await?;
        log::info!(
            "initialized {} in project {} with status {:?}",
            entity.kind(),
            project.id,
            entity.status().map(|status| status.name.as_str()),
        );
        Ok(())
    }

    /// Moves the entity along the active transition from its current
    /// status to `to_status`, provided the user holds one of the roles
    /// of that transition.  Only the entity in memory is updated.
    pub async fn transition_entity<E>(
        &self,
        entity: &mut E,
        to_status: &Status,
        user_role_ids: &[i64],
    ) -> Result<WorkflowStatusRelation, Error>
    where
        E: WorkflowAware,
    {
        let workflow_id = entity.workflow_id()
            .ok_or(ConfigurationError::MissingWorkflow)?;
        let from_status_id = entity.status()
            .ok_or(ValidationError::Missing("current status"))?
            .id;
        let relation = self.find_relationship_by_statuses(
            workflow_id,
            from_status_id,
            to_status.id,
        ).await?
            .filter(WorkflowStatusRelation::active)
            .ok_or(Error::EdgeNotFound {
                workflow_id,
                from_status_id,
                to_status_id: to_status.id,
            })?;
        if !relation.roles().permits(user_role_ids) {
            return Err(Error::Forbidden {
                transition: relation.to_string(),
                user_role_ids: user_role_ids.to_vec(),
            });
        }
        entity.set_status(relation.to_status().clone());
        log::info!("{} moved through transition {relation}", entity.kind());
        Ok(relation)
    }
}

#[async_trait]
impl StatusCatalog for Platform {
    async fn valid_next_statuses(
        &self,
        entity: &dyn WorkflowAware,
    ) -> Result<Statuses, Error> {
        let relations = self.governing_relations(entity).await?;
        Ok(next_statuses(relations.iter(), entity.status(), |_| true))
    }
}

#[async_trait]
impl EntityTypeService for Platform {
    async fn list_by_project(
        &self,
        project: &Project,
        kind: &str,
    ) -> Result<EntityTypes, Error> {
        self.list_entity_types(project, kind).await
    }
}
