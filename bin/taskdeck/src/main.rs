//! `taskdeck` — command-line front end for the Task Manager API and the
//! local todo store. Contexts pick the server and the on-disk profile.

mod commands;
mod config;

use clap::{Parser, Subcommand};

/// taskdeck CLI tool.
#[derive(Parser, Debug)]
#[command(name = "taskdeck", about = "Task manager + todo CLI client")]
struct Cli {
    /// Path to client config file (default: ~/.taskdeck/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage contexts (server + local profile).
    Context {
        #[command(subcommand)]
        action: ContextAction,
    },

    /// Switch the current context.
    #[command(name = "use")]
    Use {
        #[command(subcommand)]
        what: UseWhat,
    },

    /// Login to the current context's server.
    Login {
        /// Username.
        #[arg(long)]
        user: Option<String>,
        /// Password (not recommended — use interactive prompt).
        #[arg(long)]
        password: Option<String>,
    },

    /// Logout — clear the stored token.
    Logout,

    /// Register a new account on the server.
    Register {
        #[arg(long)]
        user: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
    },

    /// Request a password-reset mail.
    #[command(name = "forgot-password")]
    ForgotPassword {
        email: String,
    },

    /// Set a new password using the emailed reset token.
    #[command(name = "reset-password")]
    ResetPassword {
        token: String,
        #[arg(long)]
        password: Option<String>,
    },

    /// Confirm a registration via the emailed token.
    Confirm {
        token: String,
    },

    /// Run the route guard against a path and show where the UI lands.
    Open {
        path: String,
    },

    /// Task operations against the server.
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// User administration against the server.
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },

    /// Local todo app (no server).
    Todo {
        #[command(subcommand)]
        action: TodoAction,
    },

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum ContextAction {
    /// Create or update a context.
    Set {
        name: String,
        #[arg(long)]
        server: Option<String>,
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// List all contexts.
    List,
    /// Delete a context.
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
enum UseWhat {
    /// Switch to a context.
    Context { name: String },
}

#[derive(Subcommand, Debug)]
enum TaskAction {
    /// List tasks.
    List {
        /// Only tasks assigned to the current user.
        #[arg(long)]
        assigned: bool,
    },
    /// Create a task (status starts at "To Do").
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Due date, YYYY-MM-DD.
        #[arg(long)]
        due: String,
        #[arg(long, default_value = "Medium")]
        priority: String,
        /// Manager user id.
        #[arg(long)]
        manager: i64,
        /// Assignee user id (repeatable).
        #[arg(long = "assignee")]
        assignees: Vec<i64>,
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// Update a task's status.
    Status {
        id: i64,
        /// "To Do", "In Progress", or "Completed".
        status: String,
    },
}

#[derive(Subcommand, Debug)]
enum UsersAction {
    /// List users.
    List,
    /// Change a user's role.
    SetRole {
        id: i64,
        /// ADMIN, MANAGER, or EMPLOYEE.
        role: String,
    },
    /// Delete a user.
    Delete {
        id: i64,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum TodoAction {
    /// Register a local account.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Log in to a local account.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Log out of the local account.
    Logout,
    /// List todos.
    List {
        /// all, pending, or completed.
        #[arg(long, default_value = "all")]
        filter: String,
        /// Free-text search over title and description.
        #[arg(long)]
        search: Option<String>,
    },
    /// Add a todo.
    Add {
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Due date, YYYY-MM-DD.
        #[arg(long)]
        due: Option<String>,
    },
    /// Toggle a todo's completion.
    Done { id: String },
    /// Delete a todo.
    Rm { id: String },
    /// Show aggregate counts.
    Stats,
    /// Run the todo app's route guard against a path.
    Open { path: String },
    /// Remove all of the session's todos.
    Clear {
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

fn prompt_line(label: &str) -> String {
    eprint!("{label}: ");
    let mut s = String::new();
    std::io::stdin().read_line(&mut s).unwrap_or_default();
    s.trim().to_string()
}

fn prompt_password(password: Option<String>) -> String {
    password.unwrap_or_else(|| rpassword::prompt_password("Password: ").unwrap_or_default())
}

fn confirm_or_cancel(yes: bool) -> bool {
    if yes {
        return true;
    }
    eprint!("Are you sure? [y/N]: ");
    let mut s = String::new();
    std::io::stdin().read_line(&mut s).unwrap_or_default();
    s.trim().eq_ignore_ascii_case("y")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(config::ClientConfig::default_path);

    match cli.command {
        Commands::Context { action } => match action {
            ContextAction::Set { name, server, data_dir } => {
                commands::context::set(
                    &name,
                    server.as_deref(),
                    data_dir.as_deref(),
                    &config_path,
                )?;
            }
            ContextAction::List => {
                commands::context::list(&config_path)?;
            }
            ContextAction::Delete { name } => {
                commands::context::delete(&name, &config_path)?;
            }
        },

        Commands::Use { what } => match what {
            UseWhat::Context { name } => {
                commands::context::use_context(&name, &config_path)?;
            }
        },

        Commands::Login { user, password } => {
            let username = user.unwrap_or_else(|| prompt_line("Username"));
            let password = prompt_password(password);
            commands::login::login(&username, &password, &config_path).await?;
        }

        Commands::Logout => {
            commands::login::logout(&config_path).await?;
        }

        Commands::Register { user, email, password } => {
            let password = prompt_password(password);
            commands::login::register(&user, &email, &password, &config_path).await?;
        }

        Commands::ForgotPassword { email } => {
            commands::login::forgot_password(&email, &config_path).await?;
        }

        Commands::ResetPassword { token, password } => {
            let password = prompt_password(password);
            commands::login::reset_password(&token, &password, &config_path).await?;
        }

        Commands::Confirm { token } => {
            commands::login::confirm(&token, &config_path).await?;
        }

        Commands::Open { path } => {
            commands::nav::open(&path, &config_path)?;
        }

        Commands::Task { action } => match action {
            TaskAction::List { assigned } => {
                commands::task::list(assigned, &config_path).await?;
            }
            TaskAction::Create {
                title,
                description,
                due,
                priority,
                manager,
                assignees,
                tags,
            } => {
                commands::task::create(
                    &title,
                    &description,
                    &due,
                    &priority,
                    manager,
                    &assignees,
                    &tags,
                    &config_path,
                )
                .await?;
            }
            TaskAction::Status { id, status } => {
                commands::task::set_status(id, &status, &config_path).await?;
            }
        },

        Commands::Users { action } => match action {
            UsersAction::List => {
                commands::users::list(&config_path).await?;
            }
            UsersAction::SetRole { id, role } => {
                commands::users::set_role(id, &role, &config_path).await?;
            }
            UsersAction::Delete { id, yes } => {
                if !confirm_or_cancel(yes) {
                    println!("Cancelled.");
                    return Ok(());
                }
                commands::users::delete(id, &config_path).await?;
            }
        },

        Commands::Todo { action } => match action {
            TodoAction::Signup { name, email, password } => {
                let password = prompt_password(password);
                commands::todo::signup(&name, &email, &password, &config_path)?;
            }
            TodoAction::Login { email, password } => {
                let password = prompt_password(password);
                commands::todo::login(&email, &password, &config_path)?;
            }
            TodoAction::Logout => {
                commands::todo::logout(&config_path)?;
            }
            TodoAction::List { filter, search } => {
                commands::todo::list(&filter, search.as_deref(), &config_path).await?;
            }
            TodoAction::Add { title, description, due } => {
                commands::todo::add(
                    &title,
                    description.as_deref(),
                    due.as_deref(),
                    &config_path,
                )
                .await?;
            }
            TodoAction::Done { id } => {
                commands::todo::toggle(&id, &config_path).await?;
            }
            TodoAction::Rm { id } => {
                commands::todo::remove(&id, &config_path).await?;
            }
            TodoAction::Stats => {
                commands::todo::stats(&config_path).await?;
            }
            TodoAction::Open { path } => {
                commands::todo::open(&path, &config_path)?;
            }
            TodoAction::Clear { yes } => {
                if !confirm_or_cancel(yes) {
                    println!("Cancelled.");
                    return Ok(());
                }
                commands::todo::clear(&config_path).await?;
            }
        },

        Commands::Version => {
            println!("taskdeck cli v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
