use wfcore::{
    error::BackendError,
    role::{
        Role,
        Roles,
    },
    status::Status,
    workflow::{
        Workflow,
        WorkflowStatusRelation,
        WorkflowStatusRelations,
    },
};

use crate::{
    error::{
        Error,
        ValidationError,
    },
    platform::Platform,
    validate,
};

// Creation and modification

impl Platform {
    /// Adds a transition usable by holders of any of the provided
    /// roles.  An empty role set is rejected here; use
    /// `add_system_transition` to create one deliberately.
    pub async fn add_status_transition(
        &self,
        workflow: &Workflow,
        from_status: &Status,
        to_status: &Status,
        roles: &Roles,
    ) -> Result<WorkflowStatusRelation, Error> {
        if roles.is_empty() {
            return Err(ValidationError::Empty("roles").into());
        }
        self.insert_transition(workflow, from_status, to_status, roles, false).await
    }

    /// Adds a transition without any roles, reserved for administrative
    /// or system driven status changes.
    pub async fn add_system_transition(
        &self,
        workflow: &Workflow,
        from_status: &Status,
        to_status: &Status,
    ) -> Result<WorkflowStatusRelation, Error> {
        self.insert_transition(
            workflow,
            from_status,
            to_status,
            &Roles::default(),
            false,
        ).await
    }

    pub(crate) async fn insert_transition(
        &self,
        workflow: &Workflow,
        from_status: &Status,
        to_status: &Status,
        roles: &Roles,
        initial_status: bool,
    ) -> Result<WorkflowStatusRelation, Error> {
        log::debug!(
            "adding transition {} -> {} to workflow {}",
            from_status,
            to_status,
            workflow.id,
        );
        validate::transition(workflow, from_status, to_status, roles)?;
        let duplicate = || Error::DuplicateEdge {
            workflow_id: workflow.id,
            from_status: from_status.name.clone(),
            to_status: to_status.name.clone(),
        };

        if self.wf_platform()
            .exists_by_workflow_and_endpoints(workflow.id, from_status.id, to_status.id)
            .await?
        {
            return Err(duplicate());
        }
        let id = match self.wf_platform()
            .add_transition(
                workflow.id,
                from_status.id,
                to_status.id,
                &roles.ids(),
                true,
                initial_status,
            )
            .await
        {
            Ok(id) => id,
            // lost the race against a concurrent insert of the same edge
            Err(BackendError::UniqueViolation(_)) => return Err(duplicate()),
            Err(e) => return Err(e.into()),
        };
        let relation = self.transition_by_id(id).await?;
        log::info!("added transition {relation} to workflow {}", workflow.id);
        Ok(relation)
    }

    /// Replaces the role set of an existing transition; the endpoints
    /// are left untouched.
    pub async fn update_status_transition(
        &self,
        workflow: &Workflow,
        from_status: &Status,
        to_status: &Status,
        roles: &Roles,
    ) -> Result<WorkflowStatusRelation, Error> {
        if roles.is_empty() {
            return Err(ValidationError::Empty("roles").into());
        }
        validate::transition(workflow, from_status, to_status, roles)?;
        self.replace_roles(workflow, from_status, to_status, roles).await
    }

    /// Removes every role from the transition, leaving it usable only
    /// by administrative or system driven status changes.
    pub async fn restrict_status_transition(
        &self,
        workflow: &Workflow,
        from_status: &Status,
        to_status: &Status,
    ) -> Result<WorkflowStatusRelation, Error> {
        self.replace_roles(workflow, from_status, to_status, &Roles::default()).await
    }

    async fn replace_roles(
        &self,
        workflow: &Workflow,
        from_status: &Status,
        to_status: &Status,
        roles: &Roles,
    ) -> Result<WorkflowStatusRelation, Error> {
        let relation = self.require_transition(workflow, from_status, to_status).await?;
        self.wf_platform()
            .set_transition_roles(relation.id(), &roles.ids())
            .await?;
        let relation = self.transition_by_id(relation.id()).await?;
        log::info!("updated roles of transition {relation}");
        Ok(relation)
    }

    pub async fn set_transition_active(
        &self,
        workflow: &Workflow,
        from_status: &Status,
        to_status: &Status,
        active: bool,
    ) -> Result<WorkflowStatusRelation, Error> {
        let relation = self.require_transition(workflow, from_status, to_status).await?;
        self.wf_platform()
            .set_transition_active(relation.id(), active)
            .await?;
        let relation = self.transition_by_id(relation.id()).await?;
        log::info!("set active={active} on transition {relation}");
        Ok(relation)
    }

    /// Marks whether the target of the transition may be assigned to a
    /// brand new entity.
    pub async fn set_initial_transition(
        &self,
        workflow: &Workflow,
        from_status: &Status,
        to_status: &Status,
        initial_status: bool,
    ) -> Result<WorkflowStatusRelation, Error> {
        let relation = self.require_transition(workflow, from_status, to_status).await?;
        self.wf_platform()
            .set_transition_initial(relation.id(), initial_status)
            .await?;
        let relation = self.transition_by_id(relation.id()).await?;
        log::info!("set initial_status={initial_status} on transition {relation}");
        Ok(relation)
    }

    /// Deletes the transition if present; absence is not an error.
    pub async fn delete_by_workflow_and_statuses(
        &self,
        workflow: &Workflow,
        from_status: &Status,
        to_status: &Status,
    ) -> Result<(), Error> {
        if self.wf_platform()
            .delete_by_workflow_and_endpoints(workflow.id, from_status.id, to_status.id)
            .await?
        {
            log::info!(
                "deleted transition {} -> {} from workflow {}",
                from_status,
                to_status,
                workflow.id,
            );
        } else {
            log::debug!(
                "no transition {} -> {} in workflow {} to delete",
                from_status,
                to_status,
                workflow.id,
            );
        }
        Ok(())
    }
}

// Queries

impl Platform {
    async fn transition_by_id(
        &self,
        id: i64,
    ) -> Result<WorkflowStatusRelation, Error> {
        Ok(self.wf_platform().get_transition_by_id(id).await?
            .ok_or_else(|| BackendError::AppInvariantViolation(
                format!("transition {id} vanished while being modified")
            ))?)
    }

    async fn require_transition(
        &self,
        workflow: &Workflow,
        from_status: &Status,
        to_status: &Status,
    ) -> Result<WorkflowStatusRelation, Error> {
        self.find_relationship_by_statuses(workflow.id, from_status.id, to_status.id)
            .await?
            .ok_or(Error::EdgeNotFound {
                workflow_id: workflow.id,
                from_status_id: from_status.id,
                to_status_id: to_status.id,
            })
    }

    pub async fn find_relationship_by_statuses(
        &self,
        workflow_id: i64,
        from_status_id: i64,
        to_status_id: i64,
    ) -> Result<Option<WorkflowStatusRelation>, Error> {
        Ok(self.wf_platform()
            .find_by_workflow_and_endpoints(workflow_id, from_status_id, to_status_id)
            .await?)
    }

    pub async fn relationship_exists(
        &self,
        workflow_id: i64,
        from_status_id: i64,
        to_status_id: i64,
    ) -> Result<bool, Error> {
        Ok(self.wf_platform()
            .exists_by_workflow_and_endpoints(workflow_id, from_status_id, to_status_id)
            .await?)
    }

    pub async fn find_by_workflow(
        &self,
        workflow: &Workflow,
    ) -> Result<WorkflowStatusRelations, Error> {
        Ok(self.wf_platform().find_by_workflow_id(workflow.id).await?)
    }

    pub async fn find_by_from_status(
        &self,
        status: &Status,
    ) -> Result<WorkflowStatusRelations, Error> {
        Ok(self.wf_platform().find_by_from_status_id(status.id).await?)
    }

    pub async fn find_by_to_status(
        &self,
        status: &Status,
    ) -> Result<WorkflowStatusRelations, Error> {
        Ok(self.wf_platform().find_by_to_status_id(status.id).await?)
    }

    pub async fn find_by_role(
        &self,
        role: &Role,
    ) -> Result<WorkflowStatusRelations, Error> {
        Ok(self.wf_platform().find_by_role_id(role.id).await?)
    }

    pub async fn count_by_workflow(
        &self,
        workflow: &Workflow,
    ) -> Result<i64, Error> {
        Ok(self.wf_platform().count_by_workflow_id(workflow.id).await?)
    }
}

// Pre-flight checks

impl Platform {
    /// Reports why the transition may not be saved, if at all.  Unlike
    /// the create and update paths a validation failure is returned as
    /// a message rather than an error.
    pub fn check_save_allowed(
        &self,
        relation: &WorkflowStatusRelation,
    ) -> Option<String> {
        validate::transition(
            relation.workflow(),
            relation.from_status(),
            relation.to_status(),
            relation.roles(),
        )
            .err()
            .map(|e| e.to_string())
    }

    /// Reports why the transition may not be deleted, if at all.  Only
    /// a transition that is still stored may be deleted.
    pub async fn check_delete_allowed(
        &self,
        relation: &WorkflowStatusRelation,
    ) -> Result<Option<String>, Error> {
        let exists = self.wf_platform()
            .exists_by_workflow_and_endpoints(
                relation.workflow().id,
                relation.from_status().id,
                relation.to_status().id,
            )
            .await?;
        Ok((!exists).then(|| format!("transition {relation} is not stored")))
    }
}
