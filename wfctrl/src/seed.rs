use wfcore::{
    project::Project,
    role::Roles,
    status::{
        Status,
        Statuses,
    },
    workflow::Workflow,
};

use crate::{
    error::{
        Error,
        ValidationError,
    },
    platform::Platform,
    validate,
};

/// The workflows created by `initialize_sample_workflows`.
pub const SAMPLE_WORKFLOWS: [&str; 5] = [
    "Activity Status Workflow",
    "Decision Status Workflow",
    "Meeting Status Workflow",
    "Risk Status Workflow",
    "Project Status Workflow",
];

impl Platform {
    /// Creates a workflow over the provided statuses, which are taken in
    /// catalog order.  The first few statuses are chained forward (the
    /// very first transition being the initial one) and backward, the
    /// last status leads back to the first, and every status in between
    /// may be cancelled straight to the last.
    ///
    /// Roles from other projects are ignored.  Transitions that already
    /// exist are skipped.
    pub async fn initialize_sample_workflow(
        &self,
        project: &Project,
        name: &str,
        statuses: &Statuses,
        roles: &Roles,
    ) -> Result<Workflow, Error> {
        let name = validate::name("workflow name", name)?;
        if statuses.is_empty() {
            return Err(ValidationError::Empty("statuses").into());
        }
        for status in statuses.iter() {
            validate::same_project("status", status.id, status.project_id, project.id)?;
        }
        let mut statuses = statuses.clone();
        statuses.sort_by_catalog();
        let roles = roles.iter()
            .filter(|role| role.project_id == project.id)
            .cloned()
            .collect::<Roles>();
        let first_role = roles.iter()
            .next()
            .cloned()
            .map(|role| Roles::from([role]))
            .ok_or(ValidationError::Empty("roles"))?;
        let second_role = roles.iter()
            .nth(1)
            .cloned()
            .map(|role| Roles::from([role]))
            .unwrap_or_else(|| roles.clone());

        let workflow = self.create_workflow(project, name).await?;
        if statuses.len() < 2 {
            log::warn!("workflow {workflow} has a single status, no transitions seeded");
            return Ok(workflow);
        }

        let first = &statuses[0];
        let last = &statuses[statuses.len() - 1];
        for i in 0..(statuses.len() - 1).min(3) {
            let (from, to) = (&statuses[i], &statuses[i + 1]);
            self.seed_transition(&workflow, from, to, &first_role, i == 0).await?;
            if i > 0 {
                self.seed_transition(&workflow, to, from, &second_role, false).await?;
            }
        }
        // done
        self.seed_transition(&workflow, last, first, &roles, false).await?;
        // cancel
        for status in &statuses[1..statuses.len() - 1] {
            self.seed_transition(&workflow, status, last, &roles, false).await?;
        }

        log::info!(
            "seeded workflow {workflow} with {} transition(s)",
            self.count_by_workflow(&workflow).await?,
        );
        Ok(workflow)
    }

    /// Seeds every workflow named in `SAMPLE_WORKFLOWS` from all the
    /// statuses and roles of the project.
    pub async fn initialize_sample_workflows(
        &self,
        project: &Project,
    ) -> Result<Vec<Workflow>, Error> {
        let statuses = self.list_statuses(project).await?;
        let roles = self.list_roles(project).await?;
        let mut workflows = Vec::new();
        for name in SAMPLE_WORKFLOWS {
            workflows.push(
                self.initialize_sample_workflow(project, name, &statuses, &roles).await?
            );
        }
        Ok(workflows)
    }

    async fn seed_transition(
        &self,
        workflow: &Workflow,
        from_status: &Status,
        to_status: &Status,
        roles: &Roles,
        initial_status: bool,
    ) -> Result<(), Error> {
        match self.insert_transition(
            workflow,
            from_status,
            to_status,
            roles,
            initial_status,
        ).await {
            Ok(_) => Ok(()),
            Err(Error::DuplicateEdge { .. }) => {
                log::debug!("skipped existing transition {from_status} -> {to_status}");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
