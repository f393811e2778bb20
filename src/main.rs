//! Connections Puzzle - CLI
//!
//! Play in a TUI or line mode, inspect generated puzzles, share and submit
//! drafts, and moderate submissions.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use connections_puzzle::{
    backend::{AuthorInfo, FileBackend, SubmissionStatus},
    commands::{
        AdminAction, generate, run_admin, run_simple, seed_admin, share_draft, submit_draft,
        validate_draft,
    },
    config::{Config, DEFAULT_CONFIG_PATH, Overrides, Settings},
    core::{DifficultyMode, bundle},
    game::Game,
    output::{
        print_admin_outcome, print_draft_check, print_generate_result, print_share_link,
        print_submission_created,
    },
    pool::{PuzzlePool, loader},
};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(
    name = "connections",
    about = "Find four groups of four: play, create and moderate word-grouping puzzles",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Pool: 'store' (default, approved groups), 'embedded', or path to a JSON file
    #[arg(short = 'p', long, global = true, default_value = "store")]
    source: PoolSource,

    /// Store document (default: from config, else connections_store.json)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Config file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Write logs to this file (RUST_LOG sets the level)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Difficulty: mixed, easy, medium, hard, expert
    #[arg(short, long, global = true)]
    difficulty: Option<DifficultyMode>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play {
        /// Shared link or bundle to play instead of generated puzzles
        #[arg(long)]
        custom: Option<String>,
    },

    /// Simple CLI mode (line-based play without TUI)
    Simple {
        /// Shared link or bundle to play instead of generated puzzles
        #[arg(long)]
        custom: Option<String>,
    },

    /// List the candidate puzzles for the current difficulty
    Generate {
        /// Show every group's words
        #[arg(short, long)]
        verbose: bool,
    },

    /// Check a draft file (JSON, or TOML by extension)
    Validate { draft: PathBuf },

    /// Print a share link for a draft
    Share {
        draft: PathBuf,

        /// Page the link points at (default: from config)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Submit a draft for moderator review
    Submit {
        draft: PathBuf,

        #[command(flatten)]
        author: AuthorArgs,
    },

    /// Moderate submissions
    Admin {
        #[command(flatten)]
        login: LoginArgs,

        #[command(subcommand)]
        action: AdminCommand,
    },

    /// Create the store if needed and add an administrator
    SeedAdmin {
        #[command(flatten)]
        login: LoginArgs,
    },
}

#[derive(Subcommand)]
enum AdminCommand {
    /// List submissions, newest first
    List {
        /// Only show this status: pending, approved, rejected
        #[arg(long)]
        status: Option<SubmissionStatus>,
    },

    /// Count submissions by status
    Stats,

    /// Approve a submission and add its groups to the pool
    Approve {
        id: String,

        #[arg(long, default_value = "")]
        note: String,
    },

    /// Reject a submission
    Reject {
        id: String,

        #[arg(long, default_value = "")]
        note: String,
    },
}

#[derive(Args)]
struct LoginArgs {
    /// Administrator email
    #[arg(long)]
    email: String,

    /// Administrator password (prompted when not given)
    #[arg(long, env = "CONNECTIONS_ADMIN_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

impl LoginArgs {
    fn password(&self) -> Result<String> {
        match &self.password {
            Some(password) => Ok(password.clone()),
            None => prompt("Password"),
        }
    }
}

#[derive(Args)]
struct AuthorArgs {
    /// Your name, shown when no email is given
    #[arg(long)]
    name: Option<String>,

    /// Contact email
    #[arg(long)]
    email: Option<String>,

    /// Puzzle title
    #[arg(long)]
    title: Option<String>,

    /// Short description for moderators
    #[arg(long)]
    description: Option<String>,
}

impl From<AuthorArgs> for AuthorInfo {
    fn from(args: AuthorArgs) -> Self {
        Self {
            display_name: args.name,
            contact_email: args.email,
            title: args.title,
            description: args.description,
        }
    }
}

/// Where the approved groups come from
#[derive(Debug, Clone)]
enum PoolSource {
    Store,
    Embedded,
    File(PathBuf),
}

impl FromStr for PoolSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "store" => Self::Store,
            "embedded" => Self::Embedded,
            path => Self::File(PathBuf::from(path)),
        })
    }
}

/// Load the pool for play and generation
///
/// A store that does not exist yet falls back to the embedded pool; a store
/// that cannot be read yields an empty pool and the placeholder puzzle.
fn load_pool(source: &PoolSource, store_path: &Path) -> Result<PuzzlePool> {
    match source {
        PoolSource::Store if !store_path.exists() => {
            tracing::info!(path = %store_path.display(), "No store yet, using embedded groups");
            Ok(PuzzlePool::embedded())
        }
        PoolSource::Store => Ok(loader::load_from_backend(&FileBackend::new(store_path))),
        PoolSource::Embedded => Ok(PuzzlePool::embedded()),
        PoolSource::File(path) => loader::load_from_file(path)
            .with_context(|| format!("Failed to load pool from {}", path.display())),
    }
}

fn init_tracing(log_file: Option<&Path>, to_stderr: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();
        tracing::info!(path = %path.display(), "Logging initialized");
    } else if to_stderr {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr))
            .with(env_filter)
            .init();
    } else {
        // The TUI owns the terminal; without a log file, logs are dropped
        tracing_subscriber::registry().with(env_filter).init();
    }
    Ok(())
}

/// Read one line from stdin after a prompt
fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play { custom: None });

    let is_tui = matches!(command, Commands::Play { .. });
    init_tracing(cli.log_file.as_deref(), !is_tui)?;

    let settings = Config::load(&cli.config).resolve(Overrides {
        difficulty: cli.difficulty,
        store_path: cli.store,
    });

    match command {
        Commands::Play { custom } => run_play_command(&cli.source, &settings, custom.as_deref()),
        Commands::Simple { custom } => {
            let mut game = build_game(&cli.source, &settings, custom.as_deref())?;
            run_simple(&mut game)
        }
        Commands::Generate { verbose } => {
            let pool = load_pool(&cli.source, &settings.store_path)?;
            let result = generate(&pool, settings.difficulty, &mut rand::rng());
            print_generate_result(&result, verbose);
            Ok(())
        }
        Commands::Validate { draft } => {
            let check = validate_draft(&draft, &mut rand::rng())?;
            print_draft_check(&check);
            Ok(())
        }
        Commands::Share { draft, base_url } => {
            let base_url = base_url.unwrap_or(settings.share_base_url);
            let link = share_draft(&draft, &base_url)?;
            print_share_link(&link);
            Ok(())
        }
        Commands::Submit { draft, author } => {
            let mut backend = FileBackend::new(&settings.store_path);
            let id = submit_draft(&mut backend, &draft, &author.into())?;
            print_submission_created(&id);
            Ok(())
        }
        Commands::Admin { login, action } => {
            let action = match action {
                AdminCommand::List { status } => AdminAction::List(status),
                AdminCommand::Stats => AdminAction::Stats,
                AdminCommand::Approve { id, note } => AdminAction::Approve { id, note },
                AdminCommand::Reject { id, note } => AdminAction::Reject { id, note },
            };
            let password = login.password()?;
            let mut backend = FileBackend::new(&settings.store_path);
            let outcome = run_admin(&mut backend, &login.email, &password, action)?;
            print_admin_outcome(&outcome);
            Ok(())
        }
        Commands::SeedAdmin { login } => {
            let password = login.password()?;
            let backend = FileBackend::new(&settings.store_path);
            let created = seed_admin(&backend, &PuzzlePool::embedded(), &login.email, &password)?;
            if created {
                println!("Created {}", backend.path().display());
            }
            println!("{} can now moderate submissions.", login.email);
            Ok(())
        }
    }
}

/// A custom puzzle when the bundle decodes, else generated play
fn build_game(source: &PoolSource, settings: &Settings, custom: Option<&str>) -> Result<Game> {
    if let Some(puzzle) = bundle::decode_lenient(custom) {
        return Ok(Game::custom(puzzle));
    }
    if custom.is_some() {
        eprintln!("Could not read the shared puzzle; starting a regular game.");
    }
    let pool = load_pool(source, &settings.store_path)?;
    Ok(Game::new(pool, settings.difficulty))
}

fn run_play_command(source: &PoolSource, settings: &Settings, custom: Option<&str>) -> Result<()> {
    use connections_puzzle::interactive::{App, run_tui};

    let game = build_game(source, settings, custom)?;
    run_tui(App::new(game))
}
