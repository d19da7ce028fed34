use async_trait::async_trait;
use crate::{
    error::BackendError,
    project::Project,
};

#[async_trait]
pub trait ProjectBackend {
    async fn add_project(
        &self,
        name: &str,
    ) -> Result<i64, BackendError>;
    async fn get_project(
        &self,
        id: i64,
    ) -> Result<Option<Project>, BackendError>;
}
