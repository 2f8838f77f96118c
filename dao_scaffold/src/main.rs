//! Command-line front end for DaoScaffold.
//!
//! Table schemas are passed in as JSON files shaped like `TableInfo`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use dao_scaffold::config::{self, Config, LoggingConfig};
use dao_scaffold::utils::{logging, naming};
use dao_scaffold::{open_project, FileOutcome, FsStorage, Project, TableInfo, View};

#[derive(Parser)]
#[command(name = "dao_scaffold")]
#[command(about = "Generate model, DAO and service files from table schemas", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, short, global = true)]
    config: Option<String>,

    /// Project directory (overrides the configured root)
    #[arg(long, short, global = true)]
    project: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every table schema in the project
    List {
        /// Print the schemas as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one schema literal
    Show {
        #[arg(long)]
        module: String,

        #[arg(long)]
        model: String,

        /// Print only the field mapping
        #[arg(long)]
        property_only: bool,
    },

    /// Write a model file from a JSON table description
    Save {
        /// JSON file holding the table description
        input: PathBuf,

        /// Also generate the DAO and service files
        #[arg(long)]
        generate: bool,

        /// Overwrite existing DAO and service files
        #[arg(long)]
        cover: bool,
    },

    /// Generate the DAO and service files for a JSON table description
    Generate {
        /// JSON file holding the table description
        input: PathBuf,

        /// Overwrite existing files
        #[arg(long)]
        cover: bool,
    },

    /// Delete a model together with its DAO and service files
    Remove {
        #[arg(long)]
        module: String,

        #[arg(long)]
        model: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_from_file(path)?,
        None => Config::default(),
    };
    if let Some(root) = cli.project {
        config.project.root = root;
    }
    let logging_config = config
        .logging
        .clone()
        .or_else(|| Some(LoggingConfig::default()));
    logging::init_logging(&logging_config)?;

    let Some(project) = open_project(&config).await? else {
        eprintln!("No project directory selected, aborting.");
        return Ok(());
    };

    match cli.command {
        Commands::List { json } => list(&project, json).await,
        Commands::Show {
            module,
            model,
            property_only,
        } => {
            let info = project.load_model(&module, &model).await?;
            let views: &[View] = if property_only {
                &[View::Property]
            } else {
                &View::ALL
            };
            println!("{}", dao_scaffold::table_info_to_code_text(&info, views));
            Ok(())
        }
        Commands::Save {
            input,
            generate,
            cover,
        } => {
            let info = read_table_info(&input)?;
            let path = project.save_model(&info).await?;
            println!("saved {}", path);
            if generate {
                generate_files(&project, &info, cover).await?;
            }
            Ok(())
        }
        Commands::Generate { input, cover } => {
            let info = read_table_info(&input)?;
            generate_files(&project, &info, cover).await
        }
        Commands::Remove { module, model } => {
            let info = TableInfo::new(&model, "").with_module(&module);
            project.remove(&info).await?;
            println!("removed {}/{}", module, model);
            Ok(())
        }
    }
}

async fn list(project: &Project<FsStorage>, json: bool) -> Result<()> {
    let tables = project.list_models().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&tables)?);
        return Ok(());
    }
    for info in &tables {
        println!(
            "{}/{} ({}, {} fields)",
            info.module.as_deref().unwrap_or("-"),
            info.model,
            info.table,
            info.property.len()
        );
    }
    Ok(())
}

async fn generate_files(project: &Project<FsStorage>, info: &TableInfo, cover: bool) -> Result<()> {
    let cover = cover || project.default_cover();
    for file in project.generate(info, cover).await? {
        let verb = match file.outcome {
            FileOutcome::Created => "created",
            FileOutcome::Overwritten => "overwrote",
            FileOutcome::Skipped => "kept",
        };
        println!("{} {}", verb, file.path);
    }
    Ok(())
}

fn read_table_info(path: &Path) -> Result<TableInfo> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut info: TableInfo = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    if info.table.trim().is_empty() {
        info.table = naming::suggest_table_name(&info.model);
    }
    Ok(info)
}
