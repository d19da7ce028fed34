use serde::{Deserialize, Serialize};
use crate::status::Status;

/// The type of a workflow-aware entity.  `kind` is the label of the
/// entity class this type applies to (e.g. "activity"), and the
/// workflow governing entities of this type is referenced from here.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct EntityType {
    pub id: i64,
    pub project_id: i64,
    pub kind: String,
    pub name: String,
    pub workflow_id: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct EntityTypes(Vec<EntityType>);

/// A plain workflow-aware entity for callers that do not carry their
/// own entity type.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Item {
    pub kind: String,
    pub project_id: i64,
    pub entity_type: Option<EntityType>,
    pub status: Option<Status>,
}

mod impls;
pub mod traits;

pub use traits::WorkflowAware;
