use wfcore::{
    entity::{
        EntityType,
        EntityTypes,
    },
    error::BackendError,
    project::Project,
    role::{
        Role,
        Roles,
    },
    status::{
        Status,
        Statuses,
    },
    workflow::Workflow,
};

use crate::{
    error::Error,
    platform::Platform,
    validate,
};

fn missing_after_insert(kind: &str, id: i64) -> BackendError {
    BackendError::AppInvariantViolation(format!("{kind} {id} missing after insert"))
}

// Projects

impl Platform {
    pub async fn create_project(
        &self,
        name: &str,
    ) -> Result<Project, Error> {
        let name = validate::name("project name", name)?;
        let id = self.wf_platform().add_project(name).await?;
        log::info!("created project {id} ({name})");
        Ok(self.wf_platform().get_project(id).await?
            .ok_or_else(|| missing_after_insert("project", id))?)
    }

    pub async fn get_project(
        &self,
        id: i64,
    ) -> Result<Project, Error> {
        self.wf_platform().get_project(id).await?
            .ok_or(Error::UnknownEntity { kind: "project", id })
    }
}

// Statuses and roles

impl Platform {
    pub async fn create_status(
        &self,
        project: &Project,
        name: &str,
        sort_order: Option<i64>,
        is_final: bool,
    ) -> Result<Status, Error> {
        let name = validate::name("status name", name)?;
        let id = self.wf_platform()
            .add_status(project.id, name, sort_order, is_final)
            .await?;
        log::info!("created status {id} ({name}) in project {}", project.id);
        Ok(self.wf_platform().get_status(id).await?
            .ok_or_else(|| missing_after_insert("status", id))?)
    }

    pub async fn get_status(
        &self,
        id: i64,
    ) -> Result<Status, Error> {
        self.wf_platform().get_status(id).await?
            .ok_or(Error::UnknownEntity { kind: "status", id })
    }

    /// Statuses of the project in catalog order.
    pub async fn list_statuses(
        &self,
        project: &Project,
    ) -> Result<Statuses, Error> {
        Ok(self.wf_platform().list_statuses_for_project(project.id).await?)
    }

    pub async fn create_role(
        &self,
        project: &Project,
        name: &str,
    ) -> Result<Role, Error> {
        let name = validate::name("role name", name)?;
        let id = self.wf_platform().add_role(project.id, name).await?;
        log::info!("created role {id} ({name}) in project {}", project.id);
        Ok(self.wf_platform().get_role(id).await?
            .ok_or_else(|| missing_after_insert("role", id))?)
    }

    pub async fn get_role(
        &self,
        id: i64,
    ) -> Result<Role, Error> {
        self.wf_platform().get_role(id).await?
            .ok_or(Error::UnknownEntity { kind: "role", id })
    }

    /// Resolves every id into a role; unknown ids are rejected.
    pub async fn get_roles(
        &self,
        ids: &[i64],
    ) -> Result<Roles, Error> {
        let mut roles = Roles::default();
        for id in ids {
            roles.insert(self.get_role(*id).await?);
        }
        Ok(roles)
    }

    pub async fn list_roles(
        &self,
        project: &Project,
    ) -> Result<Roles, Error> {
        Ok(self.wf_platform().list_roles_for_project(project.id).await?)
    }
}

// Entity types

impl Platform {
    pub async fn create_entity_type(
        &self,
        project: &Project,
        kind: &str,
        name: &str,
        workflow: Option<&Workflow>,
    ) -> Result<EntityType, Error> {
        let kind = validate::name("entity kind", kind)?;
        let name = validate::name("entity type name", name)?;
        if let Some(workflow) = workflow {
            validate::same_project("workflow", workflow.id, workflow.project_id, project.id)?;
        }
        let id = self.wf_platform()
            .add_entity_type(project.id, kind, name, workflow.map(|w| w.id))
            .await?;
        log::info!("created {kind} type {id} ({name}) in project {}", project.id);
        Ok(self.wf_platform().get_entity_type(id).await?
            .ok_or_else(|| missing_after_insert("entity type", id))?)
    }

    pub async fn get_entity_type(
        &self,
        id: i64,
    ) -> Result<EntityType, Error> {
        self.wf_platform().get_entity_type(id).await?
            .ok_or(Error::UnknownEntity { kind: "entity type", id })
    }

    pub async fn list_entity_types(
        &self,
        project: &Project,
        kind: &str,
    ) -> Result<EntityTypes, Error> {
        Ok(self.wf_platform().list_entity_types(project.id, kind).await?)
    }

    /// Point the entity type at a different workflow, or detach it.
    pub async fn assign_workflow(
        &self,
        entity_type: &EntityType,
        workflow: Option<&Workflow>,
    ) -> Result<EntityType, Error> {
        if let Some(workflow) = workflow {
            validate::same_project(
                "workflow",
                workflow.id,
                workflow.project_id,
                entity_type.project_id,
            )?;
        }
        if !self.wf_platform()
            .set_entity_type_workflow(entity_type.id, workflow.map(|w| w.id))
            .await?
        {
            return Err(Error::UnknownEntity { kind: "entity type", id: entity_type.id });
        }
        log::info!(
            "entity type {} now governed by workflow {:?}",
            entity_type.id,
            workflow.map(|w| w.id),
        );
        self.get_entity_type(entity_type.id).await
    }
}
