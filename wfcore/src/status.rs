use serde::{Deserialize, Serialize};

/// A catalog entry describing a state a workflow-aware entity may
/// occupy.  The `is_final` flag marks terminal states for consumers;
/// nothing here derives it from the transition graph.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Status {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub sort_order: Option<i64>,
    pub is_final: bool,
}

/// Ordered list of statuses; the first entry is the default choice
/// whenever one is needed.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Statuses(Vec<Status>);

mod impls;
pub mod traits;
