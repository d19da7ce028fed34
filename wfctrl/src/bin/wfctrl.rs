use clap::{
    Parser,
    Subcommand,
};
use wfcore::{
    entity::Item,
    platform::ConnectorOption,
    workflow::Workflow,
};
use wfctrl::{
    platform::Builder as PlatformBuilder,
    Platform,
};
use wfdb::Backend;

#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[clap(long, value_name = "WFCTRL_DB_URL", env = "WFCTRL_DB_URL")]
    db_url: String,
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(arg_required_else_help = true)]
    Project {
        #[command(subcommand)]
        cmd: ProjectCmd,
    },
    #[command(arg_required_else_help = true)]
    Status {
        #[command(subcommand)]
        cmd: StatusCmd,
    },
    #[command(arg_required_else_help = true)]
    Role {
        #[command(subcommand)]
        cmd: RoleCmd,
    },
    #[command(arg_required_else_help = true)]
    Type {
        #[command(subcommand)]
        cmd: TypeCmd,
    },
    #[command(arg_required_else_help = true)]
    Workflow {
        #[command(subcommand)]
        cmd: WorkflowCmd,
    },
    #[command(arg_required_else_help = true)]
    Transition {
        workflow_id: i64,
        #[command(subcommand)]
        cmd: TransitionCmd,
    },
    #[command(arg_required_else_help = true)]
    Item {
        #[command(subcommand)]
        cmd: ItemCmd,
    },
    /// Seeds a sample workflow from every status and role of the project
    #[command(arg_required_else_help = true)]
    Seed {
        project_id: i64,
        /// Name of the workflow; all the standard samples if omitted
        name: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum ProjectCmd {
    #[command(arg_required_else_help = true)]
    Create {
        name: String,
    },
    #[command(arg_required_else_help = true)]
    Show {
        project_id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum StatusCmd {
    #[command(arg_required_else_help = true)]
    Create {
        project_id: i64,
        name: String,
        #[clap(long)]
        sort_order: Option<i64>,
        #[clap(long)]
        is_final: bool,
    },
    #[command(arg_required_else_help = true)]
    List {
        project_id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum RoleCmd {
    #[command(arg_required_else_help = true)]
    Create {
        project_id: i64,
        name: String,
    },
    #[command(arg_required_else_help = true)]
    List {
        project_id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum TypeCmd {
    #[command(arg_required_else_help = true)]
    Create {
        project_id: i64,
        kind: String,
        name: String,
        #[clap(long)]
        workflow_id: Option<i64>,
    },
    #[command(arg_required_else_help = true)]
    List {
        project_id: i64,
        kind: String,
    },
    /// Sets the governing workflow; detaches it if none is provided
    #[command(arg_required_else_help = true)]
    Assign {
        type_id: i64,
        workflow_id: Option<i64>,
    },
}

#[derive(Debug, Subcommand)]
enum WorkflowCmd {
    #[command(arg_required_else_help = true)]
    Create {
        project_id: i64,
        name: String,
    },
    #[command(arg_required_else_help = true)]
    List {
        project_id: i64,
    },
    #[command(arg_required_else_help = true)]
    Rename {
        workflow_id: i64,
        name: String,
    },
    #[command(arg_required_else_help = true)]
    Delete {
        workflow_id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum TransitionCmd {
    List,
    #[command(arg_required_else_help = true)]
    Add {
        from_status_id: i64,
        to_status_id: i64,
        #[clap(required = true)]
        role_ids: Vec<i64>,
    },
    /// Adds a transition not usable by any role
    #[command(arg_required_else_help = true)]
    System {
        from_status_id: i64,
        to_status_id: i64,
    },
    /// Replaces the roles of a transition
    #[command(arg_required_else_help = true)]
    Update {
        from_status_id: i64,
        to_status_id: i64,
        #[clap(required = true)]
        role_ids: Vec<i64>,
    },
    /// Removes every role from a transition
    #[command(arg_required_else_help = true)]
    Restrict {
        from_status_id: i64,
        to_status_id: i64,
    },
    #[command(arg_required_else_help = true)]
    Active {
        from_status_id: i64,
        to_status_id: i64,
        #[clap(action = clap::ArgAction::Set)]
        active: bool,
    },
    #[command(arg_required_else_help = true)]
    Initial {
        from_status_id: i64,
        to_status_id: i64,
        #[clap(action = clap::ArgAction::Set)]
        initial: bool,
    },
    #[command(arg_required_else_help = true)]
    Delete {
        from_status_id: i64,
        to_status_id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum ItemCmd {
    /// Initializes a new item of the kind, printing it as JSON
    #[command(arg_required_else_help = true)]
    Init {
        project_id: i64,
        kind: String,
    },
    /// Lists the statuses an item of the type may move to
    #[command(arg_required_else_help = true)]
    Next {
        type_id: i64,
        #[clap(long)]
        status_id: Option<i64>,
        #[clap(long = "role")]
        role_ids: Vec<i64>,
    },
    /// Moves an item of the type between statuses, printing it as JSON
    #[command(arg_required_else_help = true)]
    Move {
        type_id: i64,
        status_id: i64,
        to_status_id: i64,
        #[clap(long = "role")]
        role_ids: Vec<i64>,
    },
}

#[async_std::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    stderrlog::new()
        .module(module_path!())
        .module("wfdb")
        .module("wfdb_sqlite")
        .verbosity((args.verbose as usize) + 1)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;

    let platform = PlatformBuilder::new()
        .arc_wf_platform(
            Backend::wf(
                ConnectorOption::from(args.db_url)
                    .auto_create_db(true)
            )
                .await
                .map_err(anyhow::Error::from_boxed)?
        )
        .build();

    match args.command {
        Commands::Project { cmd } => {
            parse_project(&platform, cmd).await?;
        },
        Commands::Status { cmd } => {
            parse_status(&platform, cmd).await?;
        },
        Commands::Role { cmd } => {
            parse_role(&platform, cmd).await?;
        },
        Commands::Type { cmd } => {
            parse_type(&platform, cmd).await?;
        },
        Commands::Workflow { cmd } => {
            parse_workflow(&platform, cmd).await?;
        },
        Commands::Transition { workflow_id, cmd } => {
            let workflow = require_workflow(&platform, workflow_id).await?;
            parse_transition(&platform, &workflow, cmd).await?;
        },
        Commands::Item { cmd } => {
            parse_item(&platform, cmd).await?;
        },
        Commands::Seed { project_id, name } => {
            let project = platform.get_project(project_id).await?;
            let workflows = match name {
                Some(name) => vec![
                    platform.initialize_sample_workflow(
                        &project,
                        &name,
                        &platform.list_statuses(&project).await?,
                        &platform.list_roles(&project).await?,
                    ).await?
                ],
                None => platform.initialize_sample_workflows(&project).await?,
            };
            for workflow in workflows {
                println!("{workflow}");
            }
        },
    }

    Ok(())
}

async fn require_workflow(
    platform: &Platform,
    workflow_id: i64,
) -> anyhow::Result<Workflow> {
    platform.get_workflow(workflow_id).await?
        .ok_or_else(|| anyhow::anyhow!("workflow {workflow_id} not found"))
}

async fn parse_project(
    platform: &Platform,
    arg: ProjectCmd,
) -> anyhow::Result<()> {
    match arg {
        ProjectCmd::Create { name } => {
            let project = platform.create_project(&name).await?;
            println!("created project {} with id {}", project.name, project.id);
        }
        ProjectCmd::Show { project_id } => {
            let project = platform.get_project(project_id).await?;
            println!("project {} (id: {})", project.name, project.id);
            println!("statuses:");
            for status in platform.list_statuses(&project).await?.iter() {
                println!("  {}: {}{}", status.id, status, if status.is_final { " (final)" } else { "" });
            }
            println!("roles: {}", platform.list_roles(&project).await?);
            println!("workflows:");
            for workflow in platform.list_workflows(&project).await?.iter() {
                println!("  {workflow}");
            }
        }
    }
    Ok(())
}

async fn parse_status(
    platform: &Platform,
    arg: StatusCmd,
) -> anyhow::Result<()> {
    match arg {
        StatusCmd::Create { project_id, name, sort_order, is_final } => {
            let project = platform.get_project(project_id).await?;
            let status = platform.create_status(&project, &name, sort_order, is_final).await?;
            println!("created status {} with id {}", status.name, status.id);
        }
        StatusCmd::List { project_id } => {
            let project = platform.get_project(project_id).await?;
            for status in platform.list_statuses(&project).await? {
                println!("{}", serde_json::to_string(&status)?);
            }
        }
    }
    Ok(())
}

async fn parse_role(
    platform: &Platform,
    arg: RoleCmd,
) -> anyhow::Result<()> {
    match arg {
        RoleCmd::Create { project_id, name } => {
            let project = platform.get_project(project_id).await?;
            let role = platform.create_role(&project, &name).await?;
            println!("created role {} with id {}", role.name, role.id);
        }
        RoleCmd::List { project_id } => {
            let project = platform.get_project(project_id).await?;
            for role in platform.list_roles(&project).await?.iter() {
                println!("{}: {role}", role.id);
            }
        }
    }
    Ok(())
}

async fn parse_type(
    platform: &Platform,
    arg: TypeCmd,
) -> anyhow::Result<()> {
    match arg {
        TypeCmd::Create { project_id, kind, name, workflow_id } => {
            let project = platform.get_project(project_id).await?;
            let workflow = match workflow_id {
                Some(id) => Some(require_workflow(platform, id).await?),
                None => None,
            };
            let entity_type = platform.create_entity_type(
                &project,
                &kind,
                &name,
                workflow.as_ref(),
            ).await?;
            println!("created {} type {} with id {}", entity_type.kind, entity_type.name, entity_type.id);
        }
        TypeCmd::List { project_id, kind } => {
            let project = platform.get_project(project_id).await?;
            for entity_type in platform.list_entity_types(&project, &kind).await? {
                println!("{}", serde_json::to_string(&entity_type)?);
            }
        }
        TypeCmd::Assign { type_id, workflow_id } => {
            let entity_type = platform.get_entity_type(type_id).await?;
            let workflow = match workflow_id {
                Some(id) => Some(require_workflow(platform, id).await?),
                None => None,
            };
            let entity_type = platform.assign_workflow(&entity_type, workflow.as_ref()).await?;
            println!("{}", serde_json::to_string(&entity_type)?);
        }
    }
    Ok(())
}

async fn parse_workflow(
    platform: &Platform,
    arg: WorkflowCmd,
) -> anyhow::Result<()> {
    match arg {
        WorkflowCmd::Create { project_id, name } => {
            let project = platform.get_project(project_id).await?;
            let workflow = platform.create_workflow(&project, &name).await?;
            println!("created workflow {workflow}");
        }
        WorkflowCmd::List { project_id } => {
            let project = platform.get_project(project_id).await?;
            for workflow in platform.list_workflows(&project).await?.iter() {
                println!("{workflow}: {} transition(s)", platform.count_by_workflow(workflow).await?);
            }
        }
        WorkflowCmd::Rename { workflow_id, name } => {
            let workflow = require_workflow(platform, workflow_id).await?;
            let workflow = platform.rename_workflow(&workflow, &name).await?;
            println!("renamed workflow to {workflow}");
        }
        WorkflowCmd::Delete { workflow_id } => {
            let workflow = require_workflow(platform, workflow_id).await?;
            platform.delete_workflow(&workflow).await?;
            println!("deleted workflow {workflow}");
        }
    }
    Ok(())
}

async fn parse_transition(
    platform: &Platform,
    workflow: &Workflow,
    arg: TransitionCmd,
) -> anyhow::Result<()> {
    let relation = match arg {
        TransitionCmd::List => {
            for relation in platform.find_by_workflow(workflow).await?.iter() {
                println!("{relation}");
            }
            return Ok(());
        }
        TransitionCmd::Add { from_status_id, to_status_id, role_ids } => {
            platform.add_status_transition(
                workflow,
                &platform.get_status(from_status_id).await?,
                &platform.get_status(to_status_id).await?,
                &platform.get_roles(&role_ids).await?,
            ).await?
        }
        TransitionCmd::System { from_status_id, to_status_id } => {
            platform.add_system_transition(
                workflow,
                &platform.get_status(from_status_id).await?,
                &platform.get_status(to_status_id).await?,
            ).await?
        }
        TransitionCmd::Update { from_status_id, to_status_id, role_ids } => {
            platform.update_status_transition(
                workflow,
                &platform.get_status(from_status_id).await?,
                &platform.get_status(to_status_id).await?,
                &platform.get_roles(&role_ids).await?,
            ).await?
        }
        TransitionCmd::Restrict { from_status_id, to_status_id } => {
            platform.restrict_status_transition(
                workflow,
                &platform.get_status(from_status_id).await?,
                &platform.get_status(to_status_id).await?,
            ).await?
        }
        TransitionCmd::Active { from_status_id, to_status_id, active } => {
            platform.set_transition_active(
                workflow,
                &platform.get_status(from_status_id).await?,
                &platform.get_status(to_status_id).await?,
                active,
            ).await?
        }
        TransitionCmd::Initial { from_status_id, to_status_id, initial } => {
            platform.set_initial_transition(
                workflow,
                &platform.get_status(from_status_id).await?,
                &platform.get_status(to_status_id).await?,
                initial,
            ).await?
        }
        TransitionCmd::Delete { from_status_id, to_status_id } => {
            let from_status = platform.get_status(from_status_id).await?;
            let to_status = platform.get_status(to_status_id).await?;
            let relation = platform.find_relationship_by_statuses(
                workflow.id,
                from_status.id,
                to_status.id,
            ).await?;
            if let Some(message) = match &relation {
                Some(relation) => platform.check_delete_allowed(relation).await?,
                None => None,
            } {
                anyhow::bail!(message);
            }
            platform.delete_by_workflow_and_statuses(workflow, &from_status, &to_status).await?;
            match relation {
                Some(relation) => println!("deleted transition {relation}"),
                None => println!("no transition {from_status} -> {to_status} to delete"),
            }
            return Ok(());
        }
    };
    println!("{relation}");
    Ok(())
}

async fn item_of_type(
    platform: &Platform,
    type_id: i64,
    status_id: Option<i64>,
) -> anyhow::Result<Item> {
    let entity_type = platform.get_entity_type(type_id).await?;
    let status = match status_id {
        Some(id) => Some(platform.get_status(id).await?),
        None => None,
    };
    Ok(Item {
        kind: entity_type.kind.clone(),
        project_id: entity_type.project_id,
        entity_type: Some(entity_type),
        status,
    })
}

async fn parse_item(
    platform: &Platform,
    arg: ItemCmd,
) -> anyhow::Result<()> {
    match arg {
        ItemCmd::Init { project_id, kind } => {
            let project = platform.get_project(project_id).await?;
            let mut item = Item::new(kind, project.id);
            platform.initialize_new_entity(&mut item, &project).await?;
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        ItemCmd::Next { type_id, status_id, role_ids } => {
            let item = item_of_type(platform, type_id, status_id).await?;
            let statuses = if role_ids.is_empty() {
                use wfctrl::resolve::StatusCatalog;
                platform.valid_next_statuses(&item).await?
            } else {
                platform.valid_next_statuses_for(&item, &role_ids).await?
            };
            for status in statuses.iter() {
                println!("{}: {status}", status.id);
            }
        }
        ItemCmd::Move { type_id, status_id, to_status_id, role_ids } => {
            let mut item = item_of_type(platform, type_id, Some(status_id)).await?;
            let to_status = platform.get_status(to_status_id).await?;
            platform.transition_entity(&mut item, &to_status, &role_ids).await?;
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
    }
    Ok(())
}
