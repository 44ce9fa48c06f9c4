//! scorenote CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

use commands::add::ScoreArgs;

#[derive(Parser)]
#[command(name = "scorenote", version, about = "Personal exam-score tracker")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new exam
    Add {
        #[command(flatten)]
        scores: ScoreArgs,
    },

    /// List all recorded exams
    List,

    /// Show one exam with its subject balance
    Show {
        /// Record id
        id: i64,
    },

    /// Print the total-score curve, or one subject's
    Curve {
        /// Subject to chart instead of the total (e.g. "math")
        #[arg(long)]
        subject: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show the goal to chase next
    Target,

    /// Manage score goals
    Goals {
        #[command(subcommand)]
        action: GoalAction,
    },

    /// Write a JSON backup of all records and goals
    Export {
        /// Output file (default: <backup_dir>/ScoreNote_Backup_<date>.json)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Replace all records and goals with a JSON backup
    Import {
        /// Backup file to restore
        path: PathBuf,
    },

    /// Delete all recorded exams
    Clear {
        /// Also reset goals to the defaults
        #[arg(long)]
        goals: bool,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Create a starter config file
    Init,
}

#[derive(Subcommand)]
pub enum GoalAction {
    /// List goals, highest first
    List,

    /// Add a goal
    Add {
        /// Goal name (e.g. a university)
        #[arg(long)]
        name: String,

        /// Total score needed
        #[arg(long)]
        score: u32,

        /// Display colour, e.g. "#10b981"
        #[arg(long)]
        color: Option<String>,
    },

    /// Remove a goal by id
    Remove {
        /// Goal id
        id: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("scorenote=warn".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Add { scores } => commands::add::execute(scores, config),
        Commands::List => commands::list::execute(config),
        Commands::Show { id } => commands::list::show(id, config),
        Commands::Curve { subject, format } => commands::curve::execute(subject, format, config),
        Commands::Target => commands::target::execute(config),
        Commands::Goals { action } => commands::goals::execute(action, config),
        Commands::Export { output } => commands::backup::export(output, config),
        Commands::Import { path } => commands::backup::import(path, config),
        Commands::Clear { goals, yes } => commands::clear::execute(goals, yes, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
