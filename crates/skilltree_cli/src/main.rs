//! Command-line driver for the skill tree engine.
//!
//! # Responsibility
//! - List the specialization picklist.
//! - Open one specialization, replay clicks, and emit SVG or the detail panel.
//! - Keep output deterministic so runs can be diffed.

use clap::{Parser, Subcommand};
use skilltree_core::{
    default_log_level, init_logging, DetailView, SkillTreeService, TaxonomySource,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "skilltree")]
#[command(version, about = "Progressive skill tree renderer")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Taxonomy JSON file; the bundled sample is used when omitted
    #[arg(long, global = true, env = "SKILLTREE_TAXONOMY_PATH")]
    taxonomy: Option<PathBuf>,

    /// Absolute directory for rotating log files; logging is off when omitted
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true, env = "SKILLTREE_LOG_LEVEL")]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List specializations grouped by domain
    List,

    /// Open a specialization, replay clicks, and write the SVG scene
    Render {
        /// Specialization id
        specialization: String,

        /// Node id to click; repeat to replay a click sequence
        #[arg(long = "select", short = 's')]
        select: Vec<String>,

        /// Output file (stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Open a specialization, replay clicks, and print the visible nodes and panel
    Inspect {
        /// Specialization id
        specialization: String,

        /// Node id to click; repeat to replay a click sequence
        #[arg(long = "select", short = 's')]
        select: Vec<String>,

        /// Print the scene and detail panel as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(message) = start_logging(cli.log_dir.as_deref(), cli.log_level.as_deref()) {
        eprintln!("error: {message}");
        return ExitCode::FAILURE;
    }

    let source = match cli.taxonomy {
        Some(path) => TaxonomySource::File(path),
        None => TaxonomySource::Builtin,
    };
    let mut service = SkillTreeService::from_source(&source);

    let result = match cli.command {
        Commands::List => cmd_list(&service),
        Commands::Render {
            specialization,
            select,
            output,
        } => cmd_render(&mut service, &specialization, &select, output.as_deref()),
        Commands::Inspect {
            specialization,
            select,
            json,
        } => cmd_inspect(&mut service, &specialization, &select, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            log::error!("event=cli_command module=cli status=error error={message}");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn start_logging(log_dir: Option<&Path>, level: Option<&str>) -> Result<(), String> {
    let Some(log_dir) = log_dir else {
        return Ok(());
    };
    let log_dir = log_dir
        .to_str()
        .ok_or_else(|| format!("log dir is not valid UTF-8: {}", log_dir.display()))?;
    init_logging(level.unwrap_or(default_log_level()), log_dir, true)
        .map_err(|err| err.to_string())
}

fn cmd_list(service: &SkillTreeService) -> Result<(), String> {
    if service.specializations().is_empty() {
        return Err("no specializations loaded; check the taxonomy source".to_string());
    }
    let mut current_domain: Option<&str> = None;
    for item in service.specializations() {
        if current_domain != Some(item.domain_id.as_str()) {
            println!("{} ({})", item.domain_name, item.domain_id);
            current_domain = Some(item.domain_id.as_str());
        }
        println!("  {:<24} {}", item.id(), item.name());
    }
    Ok(())
}

fn cmd_render(
    service: &mut SkillTreeService,
    specialization: &str,
    clicks: &[String],
    output: Option<&Path>,
) -> Result<(), String> {
    replay(service, specialization, clicks)?;
    let svg = service.render_svg().map_err(|err| err.to_string())?;
    match output {
        Some(path) => std::fs::write(path, svg)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            print!("{svg}");
            Ok(())
        }
    }
}

fn cmd_inspect(
    service: &mut SkillTreeService,
    specialization: &str,
    clicks: &[String],
    json: bool,
) -> Result<(), String> {
    replay(service, specialization, clicks)?;
    let scene = service.scene().map_err(|err| err.to_string())?;
    let panel = service.detail_panel();

    if json {
        let document = serde_json::json!({
            "specialization": specialization,
            "scene": scene,
            "panel": panel,
            "legend": service.legend(),
        });
        let text = serde_json::to_string_pretty(&document).map_err(|err| err.to_string())?;
        println!("{text}");
        return Ok(());
    }

    println!("visible nodes:");
    for node in &scene.nodes {
        let marker = if node.selected { '*' } else { ' ' };
        println!(
            " {marker} {:<28} {:<10} ({:>5.1}, {:>5.1}) {}",
            node.id,
            node.status.as_str(),
            node.x,
            node.y,
            node.label
        );
    }
    println!();
    match panel {
        DetailView::Empty { hint } => println!("{hint}"),
        DetailView::Node(panel) => {
            println!("{} [{}]", panel.title, panel.tier);
            if let Some(description) = &panel.description {
                println!("{description}");
            }
            println!("{} ({})", panel.status_message, panel.icon.as_str());
            if let Some(action) = panel.action {
                println!("> {}", action.label());
            }
        }
    }
    Ok(())
}

fn replay(
    service: &mut SkillTreeService,
    specialization: &str,
    clicks: &[String],
) -> Result<(), String> {
    service
        .open_specialization(specialization)
        .map_err(|err| err.to_string())?;
    for id in clicks {
        service
            .select_node(id)
            .map_err(|err| format!("click `{id}` failed: {err}"))?;
    }
    Ok(())
}
