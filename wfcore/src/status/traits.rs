use async_trait::async_trait;
use crate::{
    error::BackendError,
    status::{
        Status,
        Statuses,
    },
};

#[async_trait]
pub trait StatusBackend {
    async fn add_status(
        &self,
        project_id: i64,
        name: &str,
        sort_order: Option<i64>,
        is_final: bool,
    ) -> Result<i64, BackendError>;
    async fn get_status(
        &self,
        id: i64,
    ) -> Result<Option<Status>, BackendError>;
    async fn list_statuses_for_project(
        &self,
        project_id: i64,
    ) -> Result<Statuses, BackendError>;
}
