//! Buildboard - terminal kanban client for Web3 build projects.
//!
//! Talks to the remote task store, renders the board, and runs the
//! Owner/Builder workflow actions from the command line.

use std::io;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use buildboard::api::{ApiClient, ApiError, ProjectClient, TaskAccess, TaskClient, UserClient};
use buildboard::board::Board;
use buildboard::core::{
    filter_by_tag, BackendProbe, Config, NewProject, NewTask, NewUser, Priority, Role, TaskPatch,
    TaskStatus, User,
};
use buildboard::store::TaskStore;
use buildboard::workflow::{authorize, TransitionRequest};
use buildboard::InMemoryTasks;

/// Terminal kanban client for Web3 build projects
#[derive(Parser)]
#[command(name = "buildboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Acting wallet address (overrides config)
    #[arg(short, long, global = true, env = "BUILDBOARD_ADDRESS")]
    address: Option<String>,

    /// Task store base URL (overrides config and VITE_API_BASE_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the kanban board (default)
    Board {
        /// Limit the board to one project
        #[arg(short, long)]
        project: Option<u64>,
    },

    /// Task operations
    Task {
        #[command(subcommand)]
        operation: TaskOperation,
    },

    /// Project operations
    Project {
        #[command(subcommand)]
        operation: ProjectOperation,
    },

    /// User operations
    User {
        #[command(subcommand)]
        operation: UserOperation,
    },

    /// Check backend and database reachability
    Doctor,

    /// Render a sample board offline (no backend needed)
    Demo,

    /// Show configuration
    Config {
        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum TaskOperation {
    /// List tasks
    List {
        /// Limit to one project
        #[arg(short, long)]
        project: Option<u64>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show one task with its categories
    Show {
        /// Task id
        id: u64,
    },

    /// Create a task (Owner)
    Create {
        /// Task title
        title: String,

        /// Owning project id
        #[arg(short, long)]
        project: u64,

        /// Free-text description
        #[arg(short, long)]
        description: Option<String>,

        /// Priority (low, medium, high)
        #[arg(long)]
        priority: Option<Priority>,

        /// Effort estimate
        #[arg(long)]
        effort: Option<u32>,

        /// Step (project phase) id
        #[arg(long)]
        step: Option<u64>,
    },

    /// Update task fields
    Update {
        /// Task id
        id: u64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New priority (low, medium, high)
        #[arg(long)]
        priority: Option<Priority>,

        /// New effort estimate
        #[arg(long)]
        effort: Option<u32>,
    },

    /// Delete a task (Owner)
    Delete {
        /// Task id
        id: u64,
    },

    /// Take an unassigned To Do task (Builder)
    Take {
        /// Task id
        id: u64,
    },

    /// Release a task back to To Do
    Release {
        /// Task id
        id: u64,
    },

    /// Submit your In Progress task for review (Builder)
    Review {
        /// Task id
        id: u64,
    },

    /// Approve an In Review task into Done (Owner)
    Approve {
        /// Task id
        id: u64,
    },

    /// Move a task to a column (free-form board move)
    Move {
        /// Task id
        id: u64,

        /// Target status (todo, in-progress, in-review, done)
        status: TaskStatus,
    },

    /// List a task's categories
    Categories {
        /// Task id
        id: u64,
    },

    /// Associate a category with a task
    Categorize {
        /// Task id
        id: u64,

        /// Category id
        category: u64,
    },

    /// Remove a category association
    Uncategorize {
        /// Task id
        id: u64,

        /// Category id
        category: u64,
    },
}

#[derive(Subcommand)]
enum ProjectOperation {
    /// List projects
    List {
        /// Filter by tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Show one project with its progress
    Show {
        /// Project id
        id: u64,
    },

    /// Create a project
    Create {
        /// Project name
        name: String,

        /// Tags (repeatable)
        #[arg(short, long)]
        tag: Vec<String>,
    },

    /// Rename or retag a project
    Update {
        /// Project id
        id: u64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// Replacement tags (repeatable)
        #[arg(short, long)]
        tag: Option<Vec<String>>,
    },

    /// Delete a project
    Delete {
        /// Project id
        id: u64,
    },
}

#[derive(Subcommand)]
enum UserOperation {
    /// List users
    List,

    /// Show a user by id
    Show {
        /// User id
        id: u64,
    },

    /// Show the acting user (resolved from the address)
    Whoami,

    /// Register a user
    Register {
        /// Wallet address
        address: String,

        /// Role (owner, builder)
        role: Role,
    },
}

/// Shared handles built once per invocation.
struct Context {
    config: Config,
    api: ApiClient,
}

impl Context {
    fn build(cli: &Cli) -> Result<Self> {
        let mut config = Config::load()?;
        if let Some(url) = &cli.api_url {
            config.api.base_url = url.clone();
        }
        if let Some(address) = &cli.address {
            config.identity.address = Some(address.clone());
        }
        let api = ApiClient::new(&config)?;
        Ok(Self { config, api })
    }

    fn tasks(&self) -> TaskClient {
        TaskClient::new(self.api.clone())
    }

    fn projects(&self) -> ProjectClient {
        ProjectClient::new(self.api.clone())
    }

    fn users(&self) -> UserClient {
        UserClient::new(self.api.clone())
    }

    fn address(&self) -> Result<&str> {
        self.config.identity.address.as_deref().context(
            "no acting address configured; pass --address, set BUILDBOARD_ADDRESS, \
             or add it to the config file",
        )
    }

    /// Resolve the acting user (and thus their role) from the store.
    async fn actor(&self) -> Result<User> {
        let address = self.address()?;
        let user = self.users().by_address(address).await.with_context(|| {
            format!("no user registered for address {}", address)
        })?;
        Ok(user)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };
    tracing_subscriber::registry().with(fmt::layer().with_target(false)).with(filter).init();

    if let Err(err) = run(cli).await {
        if err
            .chain()
            .filter_map(|cause| cause.downcast_ref::<ApiError>())
            .any(ApiError::is_unreachable)
        {
            eprintln!("Backend Required");
            eprintln!();
            eprintln!("The task store could not be reached. Start the backend and retry,");
            eprintln!("or run `buildboard doctor` to check connectivity.");
            std::process::exit(2);
        }
        return Err(err);
    }
    Ok(())
}

async fn run(mut cli: Cli) -> Result<()> {
    let command = cli.command.take();
    match command {
        None | Some(Commands::Board { project: None }) => {
            let ctx = Context::build(&cli)?;
            cmd_board(&ctx, None).await
        }
        Some(Commands::Board { project }) => {
            let ctx = Context::build(&cli)?;
            cmd_board(&ctx, project).await
        }
        Some(Commands::Task { operation }) => {
            let ctx = Context::build(&cli)?;
            cmd_task(&ctx, operation).await
        }
        Some(Commands::Project { operation }) => {
            let ctx = Context::build(&cli)?;
            cmd_project(&ctx, operation).await
        }
        Some(Commands::User { operation }) => {
            let ctx = Context::build(&cli)?;
            cmd_user(&ctx, operation).await
        }
        Some(Commands::Doctor) => {
            let ctx = Context::build(&cli)?;
            cmd_doctor(&ctx).await
        }
        Some(Commands::Demo) => cmd_demo().await,
        Some(Commands::Config { path }) => {
            let ctx = Context::build(&cli)?;
            cmd_config(&ctx, path)
        }
        Some(Commands::Completions { shell }) => {
            cmd_completions(shell);
            Ok(())
        }
    }
}

async fn cmd_board(ctx: &Context, project: Option<u64>) -> Result<()> {
    let store = TaskStore::new(Arc::new(ctx.tasks()));
    store.fetch(project).await?;

    let board = Board::group(&store.tasks());
    if board.is_empty() {
        println!("No tasks yet.");
        return Ok(());
    }
    print!("{}", board.render());
    Ok(())
}

async fn cmd_task(ctx: &Context, operation: TaskOperation) -> Result<()> {
    match operation {
        TaskOperation::List { project, format } => {
            let store = TaskStore::new(Arc::new(ctx.tasks()));
            store.fetch(project).await?;
            let tasks = store.tasks();

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if tasks.is_empty() {
                println!("No tasks found.");
            } else {
                for task in &tasks {
                    print_task_line(task);
                }
            }
            Ok(())
        }
        TaskOperation::Show { id } => {
            let client = ctx.tasks();
            let task = client.get(id).await?;
            println!("{}", serde_json::to_string_pretty(&task)?);
            let categories = client.list_categories(id).await?;
            if !categories.is_empty() {
                let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
                println!("categories: {}", names.join(", "));
            }
            Ok(())
        }
        TaskOperation::Create { title, project, description, priority, effort, step } => {
            let mut new = NewTask::new(title, project);
            new.description = description;
            new.priority = priority;
            new.effort = effort;
            new.step_id = step;

            let store = TaskStore::new(Arc::new(ctx.tasks()));
            let created = store.create(new).await?;
            println!("Created task #{} in project {}", created.id, created.project_id);
            Ok(())
        }
        TaskOperation::Update { id, title, description, priority, effort } => {
            let patch = TaskPatch { title, description, priority, effort, ..TaskPatch::default() };
            if patch.is_empty() {
                println!("Nothing to update.");
                return Ok(());
            }
            let store = TaskStore::new(Arc::new(ctx.tasks()));
            let updated = store.update(id, patch).await?;
            print_task_line(&updated);
            Ok(())
        }
        TaskOperation::Delete { id } => {
            let store = TaskStore::new(Arc::new(ctx.tasks()));
            store.remove(id).await?;
            println!("Deleted task #{}", id);
            Ok(())
        }
        TaskOperation::Take { id } => cmd_transition(ctx, id, TransitionRequest::Take).await,
        TaskOperation::Release { id } => cmd_transition(ctx, id, TransitionRequest::Release).await,
        TaskOperation::Review { id } => {
            cmd_transition(ctx, id, TransitionRequest::SubmitForReview).await
        }
        TaskOperation::Approve { id } => cmd_transition(ctx, id, TransitionRequest::Approve).await,
        TaskOperation::Move { id, status } => {
            cmd_transition(ctx, id, TransitionRequest::Move(status)).await
        }
        TaskOperation::Categories { id } => {
            let categories = ctx.tasks().list_categories(id).await?;
            if categories.is_empty() {
                println!("No categories.");
            } else {
                for category in categories {
                    println!("#{} {}", category.id, category.name);
                }
            }
            Ok(())
        }
        TaskOperation::Categorize { id, category } => {
            ctx.tasks().add_category(id, category).await?;
            println!("Added category {} to task #{}", category, id);
            Ok(())
        }
        TaskOperation::Uncategorize { id, category } => {
            ctx.tasks().remove_category(id, category).await?;
            println!("Removed category {} from task #{}", category, id);
            Ok(())
        }
    }
}

/// Run one guarded workflow transition end to end.
async fn cmd_transition(ctx: &Context, id: u64, request: TransitionRequest) -> Result<()> {
    let actor = ctx.actor().await?;
    let client = ctx.tasks();
    let task = client.get(id).await?;

    let patch = authorize(&actor, &task, request)?;

    let store = TaskStore::new(Arc::new(client));
    let updated = store.update(id, patch).await?;
    println!("#{} {} → {}", updated.id, updated.title, updated.status);
    Ok(())
}

async fn cmd_project(ctx: &Context, operation: ProjectOperation) -> Result<()> {
    let client = ctx.projects();
    match operation {
        ProjectOperation::List { tag } => {
            let projects = client.list().await?;
            let visible: Vec<_> = match &tag {
                Some(t) => filter_by_tag(&projects, t).into_iter().cloned().collect(),
                None => projects,
            };
            if visible.is_empty() {
                println!("No projects found.");
            } else {
                for project in &visible {
                    let tags = if project.tags.is_empty() {
                        String::new()
                    } else {
                        format!(" [{}]", project.tags.join(", "))
                    };
                    let progress = project
                        .progress
                        .map(|p| format!(" {:.0}%", p))
                        .unwrap_or_default();
                    println!("#{} {}{}{}", project.id, project.name, tags, progress);
                }
            }
            Ok(())
        }
        ProjectOperation::Show { id } => {
            let project = client.get(id).await?;
            println!("{}", serde_json::to_string_pretty(&project)?);

            // Derive progress locally when the store does not send it
            if project.progress.is_none() {
                let tasks = ctx.tasks().list(Some(id)).await?;
                println!("progress: {}%", buildboard::core::progress_of(&tasks));
            }
            Ok(())
        }
        ProjectOperation::Create { name, tag } => {
            let created = client.create(NewProject { name, tags: tag }).await?;
            println!("Created project #{} {}", created.id, created.name);
            Ok(())
        }
        ProjectOperation::Update { id, name, tag } => {
            let patch = buildboard::core::ProjectPatch { name, tags: tag };
            let updated = client.update(id, patch).await?;
            println!("Updated project #{} {}", updated.id, updated.name);
            Ok(())
        }
        ProjectOperation::Delete { id } => {
            client.remove(id).await?;
            println!("Deleted project #{}", id);
            Ok(())
        }
    }
}

async fn cmd_user(ctx: &Context, operation: UserOperation) -> Result<()> {
    let client = ctx.users();
    match operation {
        UserOperation::List => {
            for user in client.list().await? {
                println!("#{} {} ({})", user.id, user.address, user.role);
            }
            Ok(())
        }
        UserOperation::Show { id } => {
            let user = client.get(id).await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
            Ok(())
        }
        UserOperation::Whoami => {
            let user = ctx.actor().await?;
            println!("{} ({})", user.address, user.role);
            Ok(())
        }
        UserOperation::Register { address, role } => {
            let created = client.create(NewUser { address, role }).await?;
            println!("Registered {} as {}", created.address, created.role);
            Ok(())
        }
    }
}

async fn cmd_doctor(ctx: &Context) -> Result<()> {
    println!("config:   {}", Config::config_path().display());
    println!("base url: {}", ctx.config.api.base_url);
    println!();

    let probes = [BackendProbe::health(&ctx.config), BackendProbe::database(&ctx.config)];
    let mut all_up = true;
    for probe in &probes {
        let status = probe.check().await;
        let mark = if status.is_reachable() { "ok" } else { "UNREACHABLE" };
        println!("{:12} {} ... {}", probe.name, probe.url, mark);
        all_up &= status.is_reachable();
    }

    if !all_up {
        println!();
        println!("Backend Required: start the task store, then retry.");
        std::process::exit(2);
    }
    Ok(())
}

async fn cmd_demo() -> Result<()> {
    let store = TaskStore::new(Arc::new(InMemoryTasks::with_samples()));
    store.fetch(None).await?;

    println!("Sample board (offline, in-memory backend):");
    println!();
    print!("{}", Board::group(&store.tasks()).render());
    Ok(())
}

fn cmd_config(ctx: &Context, path_only: bool) -> Result<()> {
    if path_only {
        println!("{}", Config::config_path().display());
    } else {
        print!("{}", toml::to_string_pretty(&ctx.config)?);
    }
    Ok(())
}

fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn print_task_line(task: &buildboard::core::Task) {
    let builder = task
        .builder
        .as_deref()
        .filter(|b| !b.is_empty())
        .map(|b| format!(" → {}", b))
        .unwrap_or_default();
    println!("#{} [{}] {}{}", task.id, task.status, task.title, builder);
}
