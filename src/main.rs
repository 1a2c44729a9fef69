//! CodeSense command line client.
//!
//! Drives the same session orchestration a graphical front end would:
//! analysis with full-fix gating, autosave, the assistant and projects.

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use codesense::domain::ProjectId;

#[derive(Parser, Debug)]
#[command(name = "codesense")]
#[command(version)]
#[command(about = "Code analysis client with projects, autosave and an AI assistant", long_about = None)]
struct Args {
    /// Config file (default: <data dir>/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Analysis server base URL
    #[arg(long, global = true)]
    server: Option<String>,

    /// Keep snapshots, chat and projects in the local SQLite store
    #[arg(long, global = true)]
    local: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a source file
    Analyze {
        file: PathBuf,
        /// Language identifier (default: from the file extension)
        #[arg(short, long)]
        language: Option<String>,
        /// Request a full corrected rewrite when the analysis finds issues
        #[arg(long)]
        fix: bool,
        /// Copy the rendered output to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Save a file as the latest code snapshot
    Save {
        file: PathBuf,
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Print (or write) the latest code snapshot
    Restore {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Ask the assistant a question
    Chat {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Show the stored conversation
    History,

    /// Show recent full fixes (local store only)
    Fixes {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Manage saved projects
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Print the effective configuration
    Config {
        /// Also write it to the config file
        #[arg(long)]
        write: bool,
    },

    /// Autosave a file while it is edited elsewhere; Ctrl-C to stop
    Watch {
        file: PathBuf,
        #[arg(short, long)]
        language: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ProjectCommands {
    /// List projects, newest first
    List,
    /// Save a file as a new project
    Create {
        name: String,
        file: PathBuf,
        #[arg(short, long)]
        language: Option<String>,
    },
    Favorite {
        id: ProjectId,
    },
    Unfavorite {
        id: ProjectId,
    },
    Delete {
        id: ProjectId,
    },
    /// Print a project's code with line numbers
    Show {
        id: ProjectId,
    },
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("codesense=info"))
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(codesense::infra::app_config::config_path);
    let mut config = match &args.config {
        Some(path) => codesense::infra::app_config::load_config_from(path).with_env_overrides(),
        None => codesense::infra::app_config::load_config(),
    };
    if let Some(server) = args.server {
        config.server_url = server;
    }
    if args.local {
        config.storage = codesense::infra::app_config::StorageBackend::Local;
    }

    let ctx = cli::Context::new(config)?;

    match args.command {
        Commands::Analyze {
            file,
            language,
            fix,
            copy,
        } => cli::analyze(&ctx, &file, language.as_deref(), fix, copy).await,
        Commands::Save { file, language } => cli::save(&ctx, &file, language.as_deref()).await,
        Commands::Restore { output } => cli::restore(&ctx, output.as_deref()).await,
        Commands::Chat { message } => cli::chat(&ctx, &message.join(" ")).await,
        Commands::History => cli::history(&ctx).await,
        Commands::Fixes { limit } => cli::fixes(&ctx, limit).await,
        Commands::Projects { command } => match command {
            ProjectCommands::List => cli::list_projects(&ctx).await,
            ProjectCommands::Create {
                name,
                file,
                language,
            } => cli::create_project(&ctx, &name, &file, language.as_deref()).await,
            ProjectCommands::Favorite { id } => cli::set_favorite(&ctx, id, true).await,
            ProjectCommands::Unfavorite { id } => cli::set_favorite(&ctx, id, false).await,
            ProjectCommands::Delete { id } => cli::delete_project(&ctx, id).await,
            ProjectCommands::Show { id } => cli::show_project(&ctx, id).await,
        },
        Commands::Config { write } => cli::show_config(&ctx, write.then_some(config_path.as_path())),
        Commands::Watch { file, language } => cli::watch(&ctx, &file, language.as_deref()).await,
    }
}
