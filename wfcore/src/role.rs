use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A project-scoped role.  Role membership for users is managed
/// elsewhere; only the identity of the role matters here.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct Role {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
}

/// The set of roles permitted to use a transition, ordered by role id.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct Roles(BTreeSet<Role>);

mod impls;
pub mod traits;
