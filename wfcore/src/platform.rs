use async_trait::async_trait;
use crate::{
    entity::traits::EntityTypeBackend,
    project::traits::ProjectBackend,
    role::traits::RoleBackend,
    status::traits::StatusBackend,
    workflow::traits::{
        TransitionBackend,
        WorkflowBackend,
    },
};

mod connector;
pub use connector::ConnectorOption;

pub trait PlatformUrl {
    fn url(&self) -> &str;
}

/// WFPlatform - Workflow Platform
///
/// This platform is used to persist workflows, their status transitions
/// and the catalog entries the transitions reference.
///
/// This trait is applicable to everything that correctly implements the
/// relevant backends that compose this trait, and opts in through
/// `DefaultWFPlatform`.
#[async_trait]
pub trait WFPlatform: ProjectBackend
    + RoleBackend
    + StatusBackend
    + EntityTypeBackend
    + WorkflowBackend
    + TransitionBackend

    + PlatformUrl

    + Send
    + Sync
{
    fn as_dyn(&self) -> &dyn WFPlatform;
}

pub trait DefaultWFPlatform {}

impl<P: ProjectBackend
    + RoleBackend
    + StatusBackend
    + EntityTypeBackend
    + WorkflowBackend
    + TransitionBackend

    + PlatformUrl

    + DefaultWFPlatform

    + Send
    + Sync
> WFPlatform for P {
    fn as_dyn(&self) -> &(dyn WFPlatform) {
        self
    }
}
