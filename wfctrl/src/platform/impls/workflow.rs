use wfcore::{
    error::BackendError,
    project::Project,
    workflow::{
        Workflow,
        Workflows,
    },
};

use crate::{
    error::Error,
    platform::Platform,
    validate,
};

impl Platform {
    pub async fn create_workflow(
        &self,
        project: &Project,
        name: &str,
    ) -> Result<Workflow, Error> {
        let name = validate::name("workflow name", name)?;
        let id = self.wf_platform().add_workflow(project.id, name).await?;
        log::info!("created workflow {id} ({name}) in project {}", project.id);
        Ok(self.wf_platform().get_workflow(id).await?
            .ok_or_else(|| BackendError::AppInvariantViolation(
                format!("workflow {id} missing after insert")
            ))?)
    }

    pub async fn get_workflow(
        &self,
        id: i64,
    ) -> Result<Option<Workflow>, Error> {
        Ok(self.wf_platform().get_workflow(id).await?)
    }

    pub async fn list_workflows(
        &self,
        project: &Project,
    ) -> Result<Workflows, Error> {
        Ok(self.wf_platform().list_workflows_for_project(project.id).await?)
    }

    pub async fn rename_workflow(
        &self,
        workflow: &Workflow,
        name: &str,
    ) -> Result<Workflow, Error> {
        let name = validate::name("workflow name", name)?;
        if !self.wf_platform().rename_workflow(workflow.id, name).await? {
            return Err(Error::UnknownEntity { kind: "workflow", id: workflow.id });
        }
        log::info!("renamed workflow {} to {name}", workflow.id);
        Ok(Workflow {
            name: name.to_string(),
            .. workflow.clone()
        })
    }

    /// Removes the workflow together with all of its transitions.
    /// Entity types that referenced it are left without a workflow.
    pub async fn delete_workflow(
        &self,
        workflow: &Workflow,
    ) -> Result<bool, Error> {
        let deleted = self.wf_platform().delete_workflow(workflow.id).await?;
        if deleted {
            log::info!("deleted workflow {}", workflow);
        } else {
            log::debug!("workflow {} was already absent", workflow.id);
        }
        Ok(deleted)
    }
}
