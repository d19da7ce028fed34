use async_trait::async_trait;
use crate::{
    entity::{
        EntityType,
        EntityTypes,
    },
    error::BackendError,
    status::Status,
};

/// An entity whose status is governed by a workflow.
///
/// The entity owns its references; the workflow engine reads them to
/// resolve statuses and only ever writes back the type and status.
pub trait WorkflowAware: Send + Sync {
    fn kind(&self) -> &str;
    fn project_id(&self) -> i64;
    fn entity_type(&self) -> Option<&EntityType>;
    fn set_entity_type(&mut self, entity_type: EntityType);
    fn status(&self) -> Option<&Status>;
    fn set_status(&mut self, status: Status);

    /// The governing workflow, as resolved from the entity type.
    fn workflow_id(&self) -> Option<i64> {
        self.entity_type()
            .and_then(|entity_type| entity_type.workflow_id)
    }
}

#[async_trait]
pub trait EntityTypeBackend {
    async fn add_entity_type(
        &self,
        project_id: i64,
        kind: &str,
        name: &str,
        workflow_id: Option<i64>,
    ) -> Result<i64, BackendError>;
    async fn get_entity_type(
        &self,
        id: i64,
    ) -> Result<Option<EntityType>, BackendError>;
    async fn list_entity_types(
        &self,
        project_id: i64,
        kind: &str,
    ) -> Result<EntityTypes, BackendError>;
    async fn set_entity_type_workflow(
        &self,
        id: i64,
        workflow_id: Option<i64>,
    ) -> Result<bool, BackendError>;
}
