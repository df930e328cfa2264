//! @acp:module "Init Command"
//! @acp:summary "Initialize an iconsmith project"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Writes `iconsmith.config.json` and the empty generated artifact: a barrel
//! module, or an icon folder with its `index` (and `types` for TypeScript).

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::component::Framework;
use crate::config::{Config, OutputShape};
use crate::document::ModuleDocument;
use crate::folder;
use crate::storage::{DiskStorage, Storage};
use crate::svg::A11yStrategy;

/// Options for the init command
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Project root
    pub root: PathBuf,
    /// Config file path, relative to the root
    pub config: PathBuf,
    /// Barrel file or icon folder
    pub output: Option<PathBuf>,
    pub framework: Option<Framework>,
    /// Generate JavaScript instead of TypeScript
    pub js: bool,
    pub track_source: bool,
    pub a11y: Option<A11yStrategy>,
    pub titles: bool,
    /// Overwrite an existing config and artifact
    pub force: bool,
    /// Skip interactive prompts
    pub yes: bool,
}

/// Execute the init command
pub fn execute_init(options: InitOptions) -> Result<()> {
    let storage = DiskStorage::new(&options.root);

    if storage.exists(&options.config) && !options.force {
        bail!(
            "{} already exists. Use --force to overwrite",
            options.config.display()
        );
    }

    let mut config = Config::default();

    // Interactive mode if no CLI options and not using --yes
    let interactive = !options.yes
        && options.output.is_none()
        && options.framework.is_none()
        && options.a11y.is_none()
        && !options.js
        && !options.track_source
        && !options.titles;

    if interactive {
        run_interactive_init(&mut config)?;
    } else {
        apply_cli_options(&mut config, &options);
    }

    config.save(storage.resolve(&options.config))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        options.config.display()
    );

    write_artifacts(&storage, &config, options.force)?;

    println!("\n{}", style("Next steps:").bold());
    println!(
        "  Run {} to add your first icon",
        style("iconsmith add lucide:check").cyan()
    );

    Ok(())
}

fn default_output(typescript: bool) -> PathBuf {
    if typescript {
        PathBuf::from("src/icons.tsx")
    } else {
        PathBuf::from("src/icons.jsx")
    }
}

fn run_interactive_init(config: &mut Config) -> Result<()> {
    println!("{} iconsmith setup\n", style("→").cyan());
    let theme = ColorfulTheme::default();

    let frameworks = Framework::all();
    let framework = Select::with_theme(&theme)
        .with_prompt("Component framework")
        .items(frameworks)
        .default(0)
        .interact()?;
    config.framework = frameworks[framework];

    config.typescript = Confirm::with_theme(&theme)
        .with_prompt("Use TypeScript?")
        .default(true)
        .interact()?;

    let output: String = Input::with_theme(&theme)
        .with_prompt("Output (a file for a single module, a folder for one file per icon)")
        .default(default_output(config.typescript).display().to_string())
        .interact_text()?;
    config.output = PathBuf::from(output);

    let strategies = A11yStrategy::all();
    let a11y = Select::with_theme(&theme)
        .with_prompt("Accessibility")
        .items(strategies)
        .default(0)
        .interact()?;
    config.a11y = strategies[a11y];

    config.track_source = Confirm::with_theme(&theme)
        .with_prompt("Record the registry identifier in each icon?")
        .default(true)
        .interact()?;

    config.titles = Confirm::with_theme(&theme)
        .with_prompt("Add a <title> to each icon?")
        .default(false)
        .interact()?;

    Ok(())
}

fn apply_cli_options(config: &mut Config, options: &InitOptions) {
    config.typescript = !options.js;
    config.output = options
        .output
        .clone()
        .unwrap_or_else(|| default_output(config.typescript));
    if let Some(framework) = options.framework {
        config.framework = framework;
    }
    if let Some(a11y) = options.a11y {
        config.a11y = a11y;
    }
    config.track_source = options.track_source;
    config.titles = options.titles;
}

fn write_artifacts(storage: &DiskStorage, config: &Config, force: bool) -> Result<()> {
    let dialect = config.dialect();
    let imports: Vec<&str> = dialect.type_import().into_iter().collect();

    let mut files: Vec<(PathBuf, String)> = Vec::new();
    match config.output_shape() {
        OutputShape::Barrel(path) => {
            let document =
                ModuleDocument::empty(folder::MAP_NAME, folder::NAME_TYPE, &imports, dialect.typescript);
            files.push((path, document.render()));
        }
        OutputShape::Folder(dir) => {
            files.push((
                dir.join(folder::barrel_file_name(dialect)),
                folder::build_barrel(&[], dialect.typescript),
            ));
            if let (Some(props_type), Some(import)) = (dialect.props_type(), dialect.type_import()) {
                files.push((
                    dir.join(folder::TYPES_FILE),
                    folder::build_types_file(props_type, import)?,
                ));
            }
        }
    }

    for (path, contents) in files {
        write_unless_present(storage, &path, &contents, force)?;
    }
    Ok(())
}

fn write_unless_present(storage: &DiskStorage, path: &Path, contents: &str, force: bool) -> Result<()> {
    if storage.exists(path) && !force {
        println!(
            "{} {} already exists, leaving it as is",
            style("!").yellow(),
            path.display()
        );
        return Ok(());
    }
    storage.write(path, contents)?;
    println!("{} Created {}", style("✓").green(), path.display());
    Ok(())
}
