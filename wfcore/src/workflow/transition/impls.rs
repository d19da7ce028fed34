use std::{
    fmt,
    ops::Deref,
};
use crate::{
    role::Roles,
    status::Status,
    workflow::{
        Workflow,
        transition::{
            WorkflowStatusRelation,
            WorkflowStatusRelations,
        },
    },
};

impl WorkflowStatusRelation {
    /// A new active, non-initial relation without any roles.
    pub fn new(
        id: i64,
        workflow: Workflow,
        from_status: Status,
        to_status: Status,
    ) -> Self {
        Self {
            id,
            workflow,
            from_status,
            to_status,
            roles: Roles::default(),
            active: true,
            initial_status: false,
        }
    }

    pub fn with_roles(mut self, roles: Roles) -> Self {
        self.roles = roles;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_initial_status(mut self, initial_status: bool) -> Self {
        self.initial_status = initial_status;
        self
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    pub fn from_status(&self) -> &Status {
        &self.from_status
    }

    pub fn to_status(&self) -> &Status {
        &self.to_status
    }

    pub fn roles(&self) -> &Roles {
        &self.roles
    }

    pub fn active(&self) -> bool {
        self.active
    }

    /// Whether the target of this edge may seed a brand new entity.
    pub fn initial_status(&self) -> bool {
        self.initial_status
    }

    pub fn set_roles(&mut self, roles: Roles) {
        self.roles = roles;
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn into_to_status(self) -> Status {
        self.to_status
    }
}

impl WorkflowStatusRelations {
    /// Only the relations that take part in resolution.
    pub fn into_active(self) -> Self {
        Self(self.0.into_iter()
            .filter(WorkflowStatusRelation::active)
            .collect())
    }

    /// Sorts by the catalog order of the target status, then by id.
    pub fn sort_by_target(&mut self) {
        self.0.sort_by(|a, b| a.to_status.catalog_cmp(&b.to_status)
            .then(a.id.cmp(&b.id)));
    }
}

impl From<Vec<WorkflowStatusRelation>> for WorkflowStatusRelations {
    fn from(args: Vec<WorkflowStatusRelation>) -> Self {
        Self(args)
    }
}

impl Deref for WorkflowStatusRelations {
    type Target = Vec<WorkflowStatusRelation>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for WorkflowStatusRelations {
    type Item = WorkflowStatusRelation;
    type IntoIter = std::vec::IntoIter<WorkflowStatusRelation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for WorkflowStatusRelation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {} {}{}{}",
            self.id,
            self.from_status,
            self.to_status,
            self.roles,
            if self.initial_status { " (initial)" } else { "" },
            if self.active { "" } else { " (inactive)" },
        )
    }
}
