use serde::{Deserialize, Serialize};

/// A named, project-scoped container of status transitions.  The graph
/// itself is maintained through its transitions, never through this
/// record.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Workflow {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Workflows(Vec<Workflow>);

mod impls;
pub mod traits;
pub mod transition;

pub use transition::{
    WorkflowStatusRelation,
    WorkflowStatusRelations,
};
