use async_trait::async_trait;
use crate::{
    error::BackendError,
    workflow::{
        Workflow,
        Workflows,
        WorkflowStatusRelation,
        WorkflowStatusRelations,
    },
};

#[async_trait]
pub trait WorkflowBackend {
    async fn add_workflow(
        &self,
        project_id: i64,
        name: &str,
    ) -> Result<i64, BackendError>;
    async fn get_workflow(
        &self,
        id: i64,
    ) -> Result<Option<Workflow>, BackendError>;
    async fn list_workflows_for_project(
        &self,
        project_id: i64,
    ) -> Result<Workflows, BackendError>;
    async fn rename_workflow(
        &self,
        id: i64,
        name: &str,
    ) -> Result<bool, BackendError>;
    /// Removes the workflow along with every transition it owns.
    async fn delete_workflow(
        &self,
        id: i64,
    ) -> Result<bool, BackendError>;
}

/// Persistence contract for status transitions.
///
/// Every read returns fully materialized relations (workflow, both
/// endpoint statuses and the role set).
#[async_trait]
pub trait TransitionBackend {
    /// Inserts the relation and its role set as a single unit.  A
    /// relation that already exists for the same workflow and endpoints
    /// must be rejected with `BackendError::UniqueViolation`.
    async fn add_transition(
        &self,
        workflow_id: i64,
        from_status_id: i64,
        to_status_id: i64,
        role_ids: &[i64],
        active: bool,
        initial_status: bool,
    ) -> Result<i64, BackendError>;
    async fn get_transition_by_id(
        &self,
        id: i64,
    ) -> Result<Option<WorkflowStatusRelation>, BackendError>;
    async fn find_by_workflow_id(
        &self,
        workflow_id: i64,
    ) -> Result<WorkflowStatusRelations, BackendError>;
    async fn find_by_from_status_id(
        &self,
        status_id: i64,
    ) -> Result<WorkflowStatusRelations, BackendError>;
    async fn find_by_to_status_id(
        &self,
        status_id: i64,
    ) -> Result<WorkflowStatusRelations, BackendError>;
    async fn find_by_workflow_and_endpoints(
        &self,
        workflow_id: i64,
        from_status_id: i64,
        to_status_id: i64,
    ) -> Result<Option<WorkflowStatusRelation>, BackendError>;
    async fn exists_by_workflow_and_endpoints(
        &self,
        workflow_id: i64,
        from_status_id: i64,
        to_status_id: i64,
    ) -> Result<bool, BackendError>;
    async fn find_by_role_id(
        &self,
        role_id: i64,
    ) -> Result<WorkflowStatusRelations, BackendError>;
    async fn count_by_workflow_id(
        &self,
        workflow_id: i64,
    ) -> Result<i64, BackendError>;
    /// Replaces the complete role set of the relation.
    async fn set_transition_roles(
        &self,
        id: i64,
        role_ids: &[i64],
    ) -> Result<bool, BackendError>;
    async fn set_transition_active(
        &self,
        id: i64,
        active: bool,
    ) -> Result<bool, BackendError>;
    async fn set_transition_initial(
        &self,
        id: i64,
        initial_status: bool,
    ) -> Result<bool, BackendError>;
    /// Deleting a relation that does not exist is not an error.
    async fn delete_by_workflow_and_endpoints(
        &self,
        workflow_id: i64,
        from_status_id: i64,
        to_status_id: i64,
    ) -> Result<bool, BackendError>;
    async fn delete_by_workflow_id(
        &self,
        workflow_id: i64,
    ) -> Result<u64, BackendError>;
}
