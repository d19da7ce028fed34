use async_trait::async_trait;
use crate::{
    error::BackendError,
    role::{
        Role,
        Roles,
    },
};

#[async_trait]
pub trait RoleBackend {
    async fn add_role(
        &self,
        project_id: i64,
        name: &str,
    ) -> Result<i64, BackendError>;
    async fn get_role(
        &self,
        id: i64,
    ) -> Result<Option<Role>, BackendError>;
    async fn list_roles_for_project(
        &self,
        project_id: i64,
    ) -> Result<Roles, BackendError>;
}
