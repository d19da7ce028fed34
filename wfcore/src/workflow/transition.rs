use serde::{Deserialize, Serialize};
use crate::{
    role::Roles,
    status::Status,
    workflow::Workflow,
};

/// A directed, role-gated edge between two statuses of a workflow.
///
/// Instances are always fully materialized: the owning workflow, both
/// endpoint statuses and the role set are loaded together.  The
/// endpoints cannot be changed once constructed; a transition between
/// different statuses is a different edge.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct WorkflowStatusRelation {
    id: i64,
    workflow: Workflow,
    from_status: Status,
    to_status: Status,
    roles: Roles,
    active: bool,
    initial_status: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct WorkflowStatusRelations(Vec<WorkflowStatusRelation>);

mod impls;
