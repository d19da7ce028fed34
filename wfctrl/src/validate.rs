use wfcore::{
    role::Roles,
    status::Status,
    workflow::Workflow,
};

use crate::error::ValidationError;

pub(crate) fn name<'a>(
    field: &'static str,
    value: &'a str,
) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    (!value.is_empty())
        .then_some(value)
        .ok_or(ValidationError::Blank(field))
}

pub(crate) fn same_project(
    kind: &'static str,
    id: i64,
    project_id: i64,
    expected: i64,
) -> Result<(), ValidationError> {
    if project_id == expected {
        Ok(())
    } else {
        Err(ValidationError::ProjectMismatch { kind, id, project_id, expected })
    }
}

/// The checks shared by the save pre-flight and the create/update paths.
pub(crate) fn transition(
    workflow: &Workflow,
    from_status: &Status,
    to_status: &Status,
    roles: &Roles,
) -> Result<(), ValidationError> {
    if from_status.id == to_status.id {
        return Err(ValidationError::SelfLoop {
            from_status: from_status.name.clone(),
            to_status: to_status.name.clone(),
        });
    }
    same_project("status", from_status.id, from_status.project_id, workflow.project_id)?;
    same_project("status", to_status.id, to_status.project_id, workflow.project_id)?;
    for role in roles.iter() {
        same_project("role", role.id, role.project_id, workflow.project_id)?;
    }
    Ok(())
}
