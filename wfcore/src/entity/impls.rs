use std::ops::Deref;
use crate::{
    entity::{
        EntityType,
        EntityTypes,
        Item,
        WorkflowAware,
    },
    status::Status,
};

impl Item {
    pub fn new(kind: impl Into<String>, project_id: i64) -> Self {
        Self {
            kind: kind.into(),
            project_id,
            entity_type: None,
            status: None,
        }
    }
}

impl WorkflowAware for Item {
    fn kind(&self) -> &str {
        self.kind.as_str()
    }

    fn project_id(&self) -> i64 {
        self.project_id
    }

    fn entity_type(&self) -> Option<&EntityType> {
        self.entity_type.as_ref()
    }

    fn set_entity_type(&mut self, entity_type: EntityType) {
        self.entity_type = Some(entity_type);
    }

    fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    fn set_status(&mut self, status: Status) {
        self.status = Some(status);
    }
}

impl From<Vec<EntityType>> for EntityTypes {
    fn from(args: Vec<EntityType>) -> Self {
        Self(args)
    }
}

impl Deref for EntityTypes {
    type Target = Vec<EntityType>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for EntityTypes {
    type Item = EntityType;
    type IntoIter = std::vec::IntoIter<EntityType>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
