use serde::{Deserialize, Serialize};

/// The scope that owns workflows, statuses, roles and entity types.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
}

pub mod traits;
