use async_trait::async_trait;
use mockall::mock;
use wfcore::{
    entity::{
        EntityType,
        EntityTypes,
        traits::EntityTypeBackend,
    },
    error::BackendError,
    platform::{
        DefaultWFPlatform,
        PlatformUrl,
    },
    project::{
        Project,
        traits::ProjectBackend,
    },
    role::{
        Role,
        Roles,
        traits::RoleBackend,
    },
    status::{
        Status,
        Statuses,
        traits::StatusBackend,
    },
    workflow::{
        Workflow,
        Workflows,
        WorkflowStatusRelation,
        WorkflowStatusRelations,
        traits::{
            TransitionBackend,
            WorkflowBackend,
        },
    },
};

mock! {
    pub Platform {}

    #[async_trait]
    impl ProjectBackend for Platform {
        async fn add_project(&self, name: &str) -> Result<i64, BackendError>;
        async fn get_project(&self, id: i64) -> Result<Option<Project>, BackendError>;
    }

    #[async_trait]
    impl RoleBackend for Platform {
        async fn add_role(&self, project_id: i64, name: &str) -> Result<i64, BackendError>;
        async fn get_role(&self, id: i64) -> Result<Option<Role>, BackendError>;
        async fn list_roles_for_project(&self, project_id: i64) -> Result<Roles, BackendError>;
    }

    #[async_trait]
    impl StatusBackend for Platform {
        async fn add_status(
            &self,
            project_id: i64,
            name: &str,
            sort_order: Option<i64>,
            is_final: bool,
        ) -> Result<i64, BackendError>;
        async fn get_status(&self, id: i64) -> Result<Option<Status>, BackendError>;
        async fn list_statuses_for_project(&self, project_id: i64) -> Result<Statuses, BackendError>;
    }

    #[async_trait]
    impl EntityTypeBackend for Platform {
        async fn add_entity_type(
            &self,
            project_id: i64,
            kind: &str,
            name: &str,
            workflow_id: Option<i64>,
        ) -> Result<i64, BackendError>;
        async fn get_entity_type(&self, id: i64) -> Result<Option<EntityType>, BackendError>;
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

    #[async_trait]
    impl WorkflowBackend for Platform {
        async fn add_workflow(&self, project_id: i64, name: &str) -> Result<i64, BackendError>;
        async fn get_workflow(&self, id: i64) -> Result<Option<Workflow>, BackendError>;
        async fn list_workflows_for_project(&self, project_id: i64) -> Result<Workflows, BackendError>;
        async fn rename_workflow(&self, id: i64, name: &str) -> Result<bool, BackendError>;
        async fn delete_workflow(&self, id: i64) -> Result<bool, BackendError>;
    }

    #[async_trait]
    impl TransitionBackend for Platform {
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
}

impl PlatformUrl for MockPlatform {
    fn url(&self) -> &str {
        "mock::"
    }
}

impl DefaultWFPlatform for MockPlatform {}
