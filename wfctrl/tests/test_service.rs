use wfcore::role::Roles;
use wfctrl::error::{
    Error,
    ValidationError,
};

use test_wf::{
    ctrl::create_fixture,
    is_send_sync,
};

#[async_std::test]
async fn add_find_round_trip() -> anyhow::Result<()> {
    let f = create_fixture().await?;
    is_send_sync(&f.platform);

    let added = f.platform.add_status_transition(
        &f.workflow,
        &f.a,
        &f.b,
        &Roles::from([f.dev.clone()]),
    ).await?;
    assert!(added.active());
    assert!(!added.initial_status());

    let found = f.platform.find_relationship_by_statuses(f.workflow.id, f.a.id, f.b.id).await?
        .expect("transition should have been stored");
    assert_eq!(found, added);
    assert_eq!(found.roles(), &Roles::from([f.dev.clone()]));
    assert_eq!(found.workflow(), &f.workflow);
    assert!(f.platform.relationship_exists(f.workflow.id, f.a.id, f.b.id).await?);
    assert!(!f.platform.relationship_exists(f.workflow.id, f.b.id, f.a.id).await?);
    Ok(())
}

#[async_std::test]
async fn self_loop_persists_nothing() -> anyhow::Result<()> {
    let f = create_fixture().await?;
    let before = f.platform.find_by_workflow(&f.workflow).await?.len();
    let err = f.platform.add_status_transition(
        &f.workflow,
        &f.a,
        &f.a,
        &Roles::from([f.dev.clone()]),
    ).await.expect_err("self loop must be rejected");
    assert!(matches!(err, Error::Validation(ValidationError::SelfLoop { .. })));
    assert_eq!(f.platform.find_by_workflow(&f.workflow).await?.len(), before);
    assert_eq!(f.platform.count_by_workflow(&f.workflow).await?, 0);
    Ok(())
}

#[async_std::test]
async fn duplicate_rejected() -> anyhow::Result<()> {
    let f = create_fixture().await?;
    let roles = Roles::from([f.dev.clone()]);
    f.platform.add_status_transition(&f.workflow, &f.a, &f.b, &roles).await?;
    assert!(matches!(
        f.platform.add_status_transition(&f.workflow, &f.a, &f.b, &roles).await,
        Err(Error::DuplicateEdge { .. }),
    ));
    assert!(matches!(
        f.platform.add_system_transition(&f.workflow, &f.a, &f.b).await,
        Err(Error::DuplicateEdge { .. }),
    ));
    assert_eq!(f.platform.count_by_workflow(&f.workflow).await?, 1);
    Ok(())
}

#[async_std::test]
async fn foreign_status_rejected() -> anyhow::Result<()> {
    let f = create_fixture().await?;
    let other = f.platform.create_project("Other").await?;
    let x = f.platform.create_status(&other, "X", None, false).await?;
    assert!(matches!(
        f.platform.add_status_transition(
            &f.workflow,
            &f.a,
            &x,
            &Roles::from([f.dev.clone()]),
        ).await,
        Err(Error::Validation(ValidationError::ProjectMismatch { kind: "status", .. })),
    ));
    let guest = f.platform.create_role(&other, "Guest").await?;
    assert!(matches!(
        f.platform.add_status_transition(
            &f.workflow,
            &f.a,
            &f.b,
            &Roles::from([guest]),
        ).await,
        Err(Error::Validation(ValidationError::ProjectMismatch { kind: "role", .. })),
    ));
    Ok(())
}

#[async_std::test]
async fn update_changes_roles_only() -> anyhow::Result<()> {
    let f = create_fixture().await?;
    let added = f.platform.add_status_transition(
        &f.workflow,
        &f.a,
        &f.b,
        &Roles::from([f.dev.clone()]),
    ).await?;
    let updated = f.platform.update_status_transition(
        &f.workflow,
        &f.a,
        &f.b,
        &Roles::from([f.dev.clone(), f.lead.clone()]),
    ).await?;
    assert_eq!(updated.id(), added.id());

    let refetched = f.platform.find_relationship_by_statuses(f.workflow.id, f.a.id, f.b.id).await?
        .expect("transition should still exist");
    assert_eq!(refetched.from_status(), &f.a);
    assert_eq!(refetched.to_status(), &f.b);
    assert_eq!(refetched.roles(), &Roles::from([f.dev.clone(), f.lead.clone()]));

    assert!(matches!(
        f.platform.update_status_transition(
            &f.workflow,
            &f.b,
            &f.c,
            &Roles::from([f.qa.clone()]),
        ).await,
        Err(Error::EdgeNotFound { .. }),
    ));
    Ok(())
}

#[async_std::test]
async fn restrict_and_flags() -> anyhow::Result<()> {
    let f = create_fixture().await?;
    f.platform.add_status_transition(
        &f.workflow,
        &f.a,
        &f.b,
        &Roles::from([f.dev.clone(), f.qa.clone()]),
    ).await?;

    let relation = f.platform.restrict_status_transition(&f.workflow, &f.a, &f.b).await?;
    assert!(relation.roles().is_empty());
    assert!(f.platform.find_by_role(&f.dev).await?.is_empty());

    let relation = f.platform.set_transition_active(&f.workflow, &f.a, &f.b, false).await?;
    assert!(!relation.active());
    let relation = f.platform.set_initial_transition(&f.workflow, &f.a, &f.b, true).await?;
    assert!(relation.initial_status());
    assert_eq!(relation.to_string(), format!("{}: A -> B [] (initial) (inactive)", relation.id()));

    assert!(matches!(
        f.platform.set_transition_active(&f.workflow, &f.b, &f.a, true).await,
        Err(Error::EdgeNotFound { .. }),
    ));
    Ok(())
}

#[async_std::test]
async fn delete_is_idempotent_and_targeted() -> anyhow::Result<()> {
    let f = create_fixture().await?;
    f.platform.add_status_transition(&f.workflow, &f.a, &f.b, &Roles::from([f.dev.clone()])).await?;
    let ac = f.platform.add_status_transition(&f.workflow, &f.a, &f.c, &Roles::from([f.qa.clone()])).await?;

    let ab = f.platform.find_relationship_by_statuses(f.workflow.id, f.a.id, f.b.id).await?
        .expect("transition should exist");
    assert_eq!(f.platform.check_delete_allowed(&ab).await?, None);

    f.platform.delete_by_workflow_and_statuses(&f.workflow, &f.a, &f.b).await?;
    f.platform.delete_by_workflow_and_statuses(&f.workflow, &f.a, &f.b).await?;
    assert!(f.platform.check_delete_allowed(&ab).await?.is_some());

    let remaining = f.platform.find_by_workflow(&f.workflow).await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0], ac);
    Ok(())
}

#[async_std::test]
async fn queries_by_endpoint_and_role() -> anyhow::Result<()> {
    let f = create_fixture().await?;
    let ab = f.platform.add_status_transition(&f.workflow, &f.a, &f.b, &Roles::from([f.dev.clone()])).await?;
    let bc = f.platform.add_status_transition(&f.workflow, &f.b, &f.c, &Roles::from([f.qa.clone()])).await?;
    let ca = f.platform.add_system_transition(&f.workflow, &f.c, &f.a).await?;

    assert_eq!(f.platform.find_by_from_status(&f.b).await?.to_vec(), [bc.clone()]);
    assert_eq!(f.platform.find_by_to_status(&f.a).await?.to_vec(), [ca.clone()]);
    assert_eq!(f.platform.find_by_role(&f.dev).await?.to_vec(), [ab.clone()]);
    assert!(f.platform.find_by_role(&f.lead).await?.is_empty());
    assert_eq!(f.platform.find_by_workflow(&f.workflow).await?.to_vec(), [ab, bc, ca]);
    Ok(())
}

#[async_std::test]
async fn check_save_allowed() -> anyhow::Result<()> {
    let f = create_fixture().await?;
    let relation = f.platform.add_status_transition(
        &f.workflow,
        &f.a,
        &f.b,
        &Roles::from([f.dev.clone()]),
    ).await?;
    assert_eq!(f.platform.check_save_allowed(&relation), None);
    Ok(())
}

#[async_std::test]
async fn workflow_administration() -> anyhow::Result<()> {
    let f = create_fixture().await?;
    f.platform.add_status_transition(&f.workflow, &f.a, &f.b, &Roles::from([f.dev.clone()])).await?;
    let renamed = f.platform.rename_workflow(&f.workflow, "Bugs").await?;
    assert_eq!(renamed.name, "Bugs");
    assert_eq!(f.platform.get_workflow(f.workflow.id).await?, Some(renamed.clone()));
    assert!(matches!(
        f.platform.rename_workflow(&f.workflow, "").await,
        Err(Error::Validation(ValidationError::Blank("workflow name"))),
    ));

    let other = f.platform.create_workflow(&f.project, "Other").await?;
    assert_eq!(f.platform.list_workflows(&f.project).await?.len(), 2);

    assert!(f.platform.delete_workflow(&renamed).await?);
    assert!(!f.platform.delete_workflow(&renamed).await?);
    assert_eq!(f.platform.count_by_workflow(&renamed).await?, 0);
    assert_eq!(f.platform.list_workflows(&f.project).await?.to_vec(), [other]);
    assert_eq!(f.platform.get_entity_type(f.bug.id).await?.workflow_id, None);
    Ok(())
}
