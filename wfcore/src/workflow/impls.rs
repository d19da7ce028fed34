use std::{
    fmt,
    ops::Deref,
};
use crate::workflow::{
    Workflow,
    Workflows,
};

impl From<Vec<Workflow>> for Workflows {
    fn from(args: Vec<Workflow>) -> Self {
        Self(args)
    }
}

impl Deref for Workflows {
    type Target = Vec<Workflow>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for Workflows {
    type Item = Workflow;
    type IntoIter = std::vec::IntoIter<Workflow>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (id: {})", self.name, self.id)
    }
}
