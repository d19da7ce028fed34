use wfcore::{
    role::Roles,
    status::Statuses,
};
use wfctrl::{
    error::{
        Error,
        ValidationError,
    },
    seed::SAMPLE_WORKFLOWS,
};

use test_wf::ctrl::create_fixture;

fn edges(relations: &wfcore::workflow::WorkflowStatusRelations) -> Vec<String> {
    let mut edges = relations.iter()
        .map(|r| format!("{}->{} {}{}", r.from_status(), r.to_status(), r.roles(), if r.initial_status() { " *" } else { "" }))
        .collect::<Vec<_>>();
    edges.sort();
    edges
}

#[async_std::test]
async fn seed_four_statuses() -> anyhow::Result<()> {
    let f = create_fixture().await?;
    let d = f.platform.create_status(&f.project, "D", Some(4), true).await?;
    let statuses = Statuses::from([d, f.c.clone(), f.b.clone(), f.a.clone()]);
    let roles = Roles::from([f.dev.clone(), f.qa.clone(), f.lead.clone()]);

    let workflow = f.platform.initialize_sample_workflow(&f.project, "Sample", &statuses, &roles).await?;
    let relations = f.platform.find_by_workflow(&workflow).await?;
    assert_eq!(edges(&relations), [
        "A->B [Dev] *",
        "B->C [Dev]",
        "B->D [Dev, QA, Lead]",
        "C->B [QA]",
        "C->D [Dev]",
        "D->A [Dev, QA, Lead]",
        "D->C [QA]",
    ]);
    Ok(())
}

#[async_std::test]
async fn seed_two_statuses_single_role() -> anyhow::Result<()> {
    let f = create_fixture().await?;
    let statuses = Statuses::from([f.a.clone(), f.b.clone()]);
    let roles = Roles::from([f.dev.clone()]);
    let workflow = f.platform.initialize_sample_workflow(&f.project, "Pair", &statuses, &roles).await?;
    assert_eq!(edges(&f.platform.find_by_workflow(&workflow).await?), [
        "A->B [Dev] *",
        "B->A [Dev]",
    ]);
    Ok(())
}

#[async_std::test]
async fn seed_rejects_bad_input() -> anyhow::Result<()> {
    let f = create_fixture().await?;
    let statuses = Statuses::from([f.a.clone(), f.b.clone()]);
    assert!(matches!(
        f.platform.initialize_sample_workflow(&f.project, "Sample", &Statuses::default(), &Roles::from([f.dev.clone()])).await,
        Err(Error::Validation(ValidationError::Empty("statuses"))),
    ));

    let other = f.platform.create_project("Other").await?;
    let guest = f.platform.create_role(&other, "Guest").await?;
    assert!(matches!(
        f.platform.initialize_sample_workflow(&f.project, "Sample", &statuses, &Roles::from([guest])).await,
        Err(Error::Validation(ValidationError::Empty("roles"))),
    ));
    // nothing was created by the rejected attempts
    assert_eq!(f.platform.list_workflows(&f.project).await?.len(), 1);
    Ok(())
}

#[async_std::test]
async fn seeded_workflow_initializes_entities() -> anyhow::Result<()> {
    let f = create_fixture().await?;
    let workflows = f.platform.initialize_sample_workflows(&f.project).await?;
    assert_eq!(
        workflows.iter().map(|w| w.name.as_str()).collect::<Vec<_>>(),
        SAMPLE_WORKFLOWS,
    );
    // A -> B, B -> C, C -> B, C -> A, B -> C (skipped as it exists)
    for workflow in workflows.iter() {
        assert_eq!(f.platform.count_by_workflow(workflow).await?, 4);
    }

    let bug = f.platform.assign_workflow(&f.bug, Some(&workflows[0])).await?;
    assert_eq!(bug.workflow_id, Some(workflows[0].id));
    let mut item = wfcore::entity::Item::new("activity", f.project.id);
    f.platform.initialize_new_entity(&mut item, &f.project).await?;
    assert_eq!(item.status.as_ref(), Some(&f.b));
    Ok(())
}
