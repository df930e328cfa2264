#![forbid(unsafe_code)]
//! iconsmith Command Line Interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use iconsmith::commands::{
    execute_add, execute_init, execute_list, execute_remove, AddOptions, InitOptions, ListOptions,
    Project, RemoveOptions,
};
use iconsmith::config::CONFIG_FILE;
use iconsmith::registry::IconifyClient;
use iconsmith::{A11yStrategy, Framework};

#[derive(Parser)]
#[command(name = "iconsmith")]
#[command(about = "Generate and maintain icon component modules from the Iconify registry")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path, relative to the project root
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Project root directory
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new iconsmith project
    Init {
        /// Barrel file (with extension) or icon folder (without)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Component framework (react, preact, solid)
        #[arg(long)]
        framework: Option<Framework>,

        /// Generate JavaScript instead of TypeScript
        #[arg(long)]
        js: bool,

        /// Record the registry identifier in each icon
        #[arg(long)]
        track_source: bool,

        /// Accessibility strategy (hidden, img, presentation, none)
        #[arg(long)]
        a11y: Option<A11yStrategy>,

        /// Add a <title> to each icon
        #[arg(long)]
        titles: bool,

        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,

        /// Skip interactive prompts (use defaults + CLI args)
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Add icons by registry identifier (e.g. lucide:check)
    Add {
        /// Icons to add
        #[arg(required = true)]
        icons: Vec<String>,

        /// Component name (only with a single icon)
        #[arg(short, long)]
        name: Option<String>,

        /// Overwrite existing icons without asking
        #[arg(short = 'y', long)]
        yes: bool,

        /// Show the changes without writing them
        #[arg(long)]
        dry_run: bool,
    },

    /// List generated icons
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove icons by component name
    Remove {
        /// Component names to remove
        #[arg(required = true)]
        names: Vec<String>,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "iconsmith=debug" } else { "warn" })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init {
            output,
            framework,
            js,
            track_source,
            a11y,
            titles,
            force,
            yes,
        } => {
            let options = InitOptions {
                root: cli.root,
                config: cli.config,
                output,
                framework,
                js,
                track_source,
                a11y,
                titles,
                force,
                yes,
            };
            execute_init(options)?;
        }

        Commands::Add {
            icons,
            name,
            yes,
            dry_run,
        } => {
            let project = Project::load(&cli.root, &cli.config)?;
            let options = AddOptions {
                icons,
                name,
                yes,
                dry_run,
            };
            let client = IconifyClient::new(project.config.registry.as_str());
            if !execute_add(options, &project, &client)? {
                std::process::exit(1);
            }
        }

        Commands::List { json } => {
            let project = Project::load(&cli.root, &cli.config)?;
            execute_list(ListOptions { json }, &project)?;
        }

        Commands::Remove { names, yes } => {
            let project = Project::load(&cli.root, &cli.config)?;
            execute_remove(RemoveOptions { names, yes }, &project)?;
        }
    }

    Ok(())
}
