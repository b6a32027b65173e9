mod cmd;
mod input;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{catalog::CatalogSubcommand, config::ConfigSubcommand, Options};
use input::InputArgs;
use specgate_core::types::DocumentType;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "specgate",
    about = "Quality gates for spec-driven development: validate specs, plans and task lists, and route work to domain agents",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .specgate/ or .git/)
    #[arg(long, global = true, env = "SPECGATE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Show every check and matched keyword, and enable debug logging
    #[arg(long, global = true, short = 'v')]
    verbose: bool,

    /// Exit 2 when recommended checks fail (beyond validation.warn_tolerance)
    #[arg(long, global = true)]
    strict: bool,

    /// Pattern catalog file (overrides config and .specgate/catalog.yaml)
    #[arg(long, global = true, env = "SPECGATE_CATALOG", value_name = "FILE")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a feature specification
    ValidateSpec {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Validate an implementation plan
    ValidatePlan {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Validate a task list
    ValidateTasks {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Classify text into technical domains and suggest a delegation strategy
    DetectDomain {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Validate several documents of the same type
    Validate {
        /// Document type: spec, plan or tasks
        #[arg(long = "type", value_name = "TYPE")]
        doc_type: DocumentType,

        /// Documents to validate
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<PathBuf>,
    },

    /// Inspect or scaffold the pattern catalog
    Catalog {
        #[command(subcommand)]
        subcommand: CatalogSubcommand,
    },

    /// Validate or scaffold the project configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    // Logs go to stderr so stdout stays machine-readable under --json.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let opts = Options {
        json: cli.json,
        verbose: cli.verbose,
        strict: cli.strict,
        catalog: cli.catalog,
    };

    let result = match cli.command {
        Commands::ValidateSpec { input } => {
            cmd::validate::run(&root, DocumentType::Spec, &input, &opts)
        }
        Commands::ValidatePlan { input } => {
            cmd::validate::run(&root, DocumentType::Plan, &input, &opts)
        }
        Commands::ValidateTasks { input } => {
            cmd::validate::run(&root, DocumentType::TaskList, &input, &opts)
        }
        Commands::DetectDomain { input } => cmd::detect::run(&root, &input, &opts),
        Commands::Validate { doc_type, paths } => cmd::batch::run(&root, doc_type, &paths, &opts),
        Commands::Catalog { subcommand } => cmd::catalog::run(&root, subcommand, &opts),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, opts.json),
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}
