use wfcore::{
    entity::{
        Item,
        WorkflowAware,
    },
    role::Roles,
};
use wfctrl::{
    error::{
        ConfigurationError,
        Error,
        ValidationError,
    },
    resolve::StatusCatalog,
};

use test_wf::ctrl::{
    create_fixture,
    Fixture,
};

/// W1 with A -> B (Dev) and A -> C (QA) as the initial transitions.
async fn create_branching_fixture() -> anyhow::Result<Fixture> {
    let f = create_fixture().await?;
    f.platform.add_status_transition(&f.workflow, &f.a, &f.b, &Roles::from([f.dev.clone()])).await?;
    f.platform.add_status_transition(&f.workflow, &f.a, &f.c, &Roles::from([f.qa.clone()])).await?;
    f.platform.set_initial_transition(&f.workflow, &f.a, &f.b, true).await?;
    f.platform.set_initial_transition(&f.workflow, &f.a, &f.c, true).await?;
    Ok(f)
}

fn bug(f: &Fixture) -> Item {
    let mut item = Item::new("activity", f.project.id);
    item.set_entity_type(f.bug.clone());
    item
}

#[async_std::test]
async fn initial_status_is_first_candidate() -> anyhow::Result<()> {
    let f = create_branching_fixture().await?;
    let item = bug(&f);

    let statuses = f.platform.valid_next_statuses(&item).await?;
    assert_eq!(statuses.to_vec(), [f.b.clone(), f.c.clone()]);

    let first = f.platform.get_initial_status(&item).await?;
    let second = f.platform.get_initial_status(&item).await?;
    assert_eq!(first, f.b);
    assert_eq!(first, second);
    Ok(())
}

#[async_std::test]
async fn initial_status_follows_catalog_order() -> anyhow::Result<()> {
    let f = create_fixture().await?;
    // C sorts after B regardless of insertion order
    f.platform.add_status_transition(&f.workflow, &f.a, &f.c, &Roles::from([f.qa.clone()])).await?;
    f.platform.add_status_transition(&f.workflow, &f.b, &f.a, &Roles::from([f.dev.clone()])).await?;
    f.platform.set_initial_transition(&f.workflow, &f.a, &f.c, true).await?;
    f.platform.set_initial_transition(&f.workflow, &f.b, &f.a, true).await?;
    assert_eq!(f.platform.get_initial_status(&bug(&f)).await?, f.a);
    Ok(())
}

#[async_std::test]
async fn no_initial_transition_is_misconfiguration() -> anyhow::Result<()> {
    let f = create_fixture().await?;
    f.platform.add_status_transition(&f.workflow, &f.a, &f.b, &Roles::from([f.dev.clone()])).await?;
    assert!(matches!(
        f.platform.get_initial_status(&bug(&f)).await,
        Err(Error::Configuration(ConfigurationError::NoValidStatus { workflow_id }))
            if workflow_id == f.workflow.id,
    ));

    // inactive initial transitions do not count either
    f.platform.set_initial_transition(&f.workflow, &f.a, &f.b, true).await?;
    f.platform.set_transition_active(&f.workflow, &f.a, &f.b, false).await?;
    assert!(matches!(
        f.platform.get_initial_status(&bug(&f)).await,
        Err(Error::Configuration(ConfigurationError::NoValidStatus { .. })),
    ));
    Ok(())
}

#[async_std::test]
async fn next_statuses_for_existing_entity() -> anyhow::Result<()> {
    let f = create_branching_fixture().await?;
    f.platform.add_status_transition(&f.workflow, &f.b, &f.c, &Roles::from([f.qa.clone()])).await?;
    f.platform.add_status_transition(&f.workflow, &f.b, &f.a, &Roles::from([f.lead.clone()])).await?;

    let mut item = bug(&f);
    item.set_status(f.b.clone());
    assert_eq!(
        f.platform.valid_next_statuses(&item).await?.to_vec(),
        [f.b.clone(), f.a.clone(), f.c.clone()],
    );
    assert_eq!(
        f.platform.valid_next_statuses_for(&item, &[f.qa.id]).await?.to_vec(),
        [f.b.clone(), f.c.clone()],
    );
    assert_eq!(
        f.platform.valid_next_statuses_for(&item, &[]).await?.to_vec(),
        [f.b.clone()],
    );

    let new_item = bug(&f);
    assert_eq!(
        f.platform.valid_next_statuses_for(&new_item, &[f.qa.id]).await?.to_vec(),
        [f.c.clone()],
    );
    Ok(())
}

#[async_std::test]
async fn initialize_new_entity() -> anyhow::Result<()> {
    let f = create_branching_fixture().await?;
    let mut item = Item::new("activity", f.project.id);
    f.platform.initialize_new_entity(&mut item, &f.project).await?;
    assert_eq!(item.entity_type(), Some(&f.bug));
    assert_eq!(item.workflow_id(), Some(f.workflow.id));
    assert_eq!(item.status(), Some(&f.b));
    Ok(())
}

#[async_std::test]
async fn initialize_new_entity_failures() -> anyhow::Result<()> {
    let f = create_branching_fixture().await?;

    let mut meeting = Item::new("meeting", f.project.id);
    assert!(matches!(
        f.platform.initialize_new_entity(&mut meeting, &f.project).await,
        Err(Error::Configuration(ConfigurationError::NoTypesAvailable { .. })),
    ));
    assert_eq!(meeting, Item::new("meeting", f.project.id));

    f.platform.create_entity_type(&f.project, "meeting", "Standup", None).await?;
    assert!(matches!(
        f.platform.initialize_new_entity(&mut meeting, &f.project).await,
        Err(Error::Configuration(ConfigurationError::MissingWorkflow)),
    ));
    assert_eq!(meeting, Item::new("meeting", f.project.id));
    Ok(())
}

#[async_std::test]
async fn workflow_from_another_project() -> anyhow::Result<()> {
    let f = create_branching_fixture().await?;
    let other = f.platform.create_project("Other").await?;
    let mut item = Item::new("activity", other.id);
    item.set_entity_type(f.bug.clone());
    assert!(matches!(
        f.platform.valid_next_statuses(&item).await,
        Err(Error::Validation(ValidationError::ProjectMismatch { kind: "workflow", .. })),
    ));
    Ok(())
}

#[async_std::test]
async fn transition_entity() -> anyhow::Result<()> {
    let f = create_branching_fixture().await?;
    f.platform.add_status_transition(&f.workflow, &f.b, &f.c, &Roles::from([f.qa.clone()])).await?;
    let mut item = bug(&f);

    assert!(matches!(
        f.platform.transition_entity(&mut item, &f.c, &[f.qa.id]).await,
        Err(Error::Validation(ValidationError::Missing("current status"))),
    ));

    item.set_status(f.b.clone());
    assert!(matches!(
        f.platform.transition_entity(&mut item, &f.c, &[f.dev.id]).await,
        Err(Error::Forbidden { .. }),
    ));
    assert!(matches!(
        f.platform.transition_entity(&mut item, &f.a, &[f.dev.id]).await,
        Err(Error::EdgeNotFound { .. }),
    ));
    assert_eq!(item.status(), Some(&f.b));

    let relation = f.platform.transition_entity(&mut item, &f.c, &[f.dev.id, f.qa.id]).await?;
    assert_eq!(relation.from_status(), &f.b);
    assert_eq!(item.status(), Some(&f.c));

    f.platform.set_transition_active(&f.workflow, &f.b, &f.c, false).await?;
    item.set_status(f.b.clone());
    assert!(matches!(
        f.platform.transition_entity(&mut item, &f.c, &[f.qa.id]).await,
        Err(Error::EdgeNotFound { .. }),
    ));
    Ok(())
}
