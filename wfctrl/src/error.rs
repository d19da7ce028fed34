use thiserror::Error;
use wfcore::error::BackendError;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("storage error")]
    Storage(#[from] BackendError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("transition {from_status} -> {to_status} already exists in workflow {workflow_id}")]
    DuplicateEdge {
        workflow_id: i64,
        from_status: String,
        to_status: String,
    },
    #[error("no transition from status {from_status_id} to status {to_status_id} in workflow {workflow_id}")]
    EdgeNotFound {
        workflow_id: i64,
        from_status_id: i64,
        to_status_id: i64,
    },
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("none of the roles {user_role_ids:?} may use transition {transition}")]
    Forbidden {
        transition: String,
        user_role_ids: Vec<i64>,
    },
    #[error("{kind} {id} not found")]
    UnknownEntity {
        kind: &'static str,
        id: i64,
    },
}

#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{0} must not be blank")]
    Blank(&'static str),
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("From status and To status cannot be the same. {from_status} -> {to_status}")]
    SelfLoop {
        from_status: String,
        to_status: String,
    },
    #[error("{kind} {id} belongs to project {project_id} instead of project {expected}")]
    ProjectMismatch {
        kind: &'static str,
        id: i64,
        project_id: i64,
        expected: i64,
    },
    #[error("entity belongs to project {project_id} instead of project {expected}")]
    ForeignEntity {
        project_id: i64,
        expected: i64,
    },
}

/// Defects in how a project or workflow has been set up; these abort
/// entity initialization rather than fall back to a default.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("no workflow is configured for the entity type")]
    MissingWorkflow,
    #[error("project {project_id} defines no entity types for {kind}")]
    NoTypesAvailable {
        project_id: i64,
        kind: String,
    },
    #[error("workflow {workflow_id} yields no valid status for the entity")]
    NoValidStatus {
        workflow_id: i64,
    },
}
