//! `obralog` - CLI for construction-site and inspection records
//!
//! This binary is the user-facing layer over the record registry: it maps
//! subcommands to registry operations and device captures, and turns
//! errors into messages instead of crashes.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use obralog::cli::{Cli, Command, ConfigCommand, FiscalizacaoCommand, ObraCommand};
use obralog::device::{self, FileCamera, StaticLocation};
use obralog::model::{GeoPoint, Inspection, Site};
use obralog::registry::{Registry, SitePatch};
use obralog::store::SqliteSlots;
use obralog::{init_logging, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Obra(cmd) => handle_obra(&config, cmd).await,
        Command::Fiscalizacao(cmd) => handle_fiscalizacao(&config, cmd).await,
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

/// Open the registry over the configured database.
fn open_registry(config: &Config) -> anyhow::Result<Registry<SqliteSlots>> {
    let path = config.database_path();
    let slots = SqliteSlots::open(&path)
        .with_context(|| format!("cannot open record storage at {}", path.display()))?;
    Ok(Registry::new(slots))
}

/// Run the one-shot device captures a registration asked for.
///
/// Both captures complete (or fail) before any record is written, so a
/// refused permission aborts the whole registration cleanly.
async fn capture_attachments(
    config: &Config,
    lat: Option<f64>,
    lon: Option<f64>,
    photo: Option<PathBuf>,
) -> anyhow::Result<(Option<GeoPoint>, Option<String>)> {
    let location = match (lat, lon) {
        (Some(latitude), Some(longitude)) => {
            let provider = StaticLocation::new(
                GeoPoint {
                    latitude,
                    longitude,
                },
                config.device.location_enabled,
            );
            Some(device::acquire_location(&provider).await?)
        }
        _ => None,
    };

    let photo_uri = match photo {
        Some(source) => {
            let camera = FileCamera::new(
                source,
                config.photo_dir(),
                config.device.photo_quality,
                config.device.camera_enabled,
            );
            Some(device::acquire_photo(&camera).await?)
        }
        None => None,
    };

    Ok((location, photo_uri))
}

async fn handle_obra(config: &Config, cmd: ObraCommand) -> anyhow::Result<()> {
    match cmd {
        ObraCommand::Add(args) => {
            let (location, photo) =
                capture_attachments(config, args.lat, args.lon, args.photo).await?;

            let mut site = Site::new(args.name, args.responsible)?;
            site.start_date = args.start_date.unwrap_or_default();
            site.expected_end = args.expected_end.unwrap_or_default();
            site.description = args.description.unwrap_or_default();
            site.location = location;
            site.photo = photo;

            let mut registry = open_registry(config)?;
            registry.add_site(&site)?;
            println!("Registered obra '{}' (id {})", site.name, site.id);
        }

        ObraCommand::List { json } => {
            let registry = open_registry(config)?;
            let sites = registry.sites()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&sites)?);
            } else if sites.is_empty() {
                println!("No obras registered.");
            } else {
                for site in &sites {
                    println!("{}  {}", site.id, site.name);
                    println!("    Responsável: {}", site.responsible);
                    if !site.start_date.is_empty() {
                        println!("    Início:      {}", site.start_date);
                    }
                    if !site.expected_end.is_empty() {
                        println!("    Término:     {}", site.expected_end);
                    }
                }
            }
        }

        ObraCommand::Show { id, json } => {
            let registry = open_registry(config)?;
            let site = registry.site(&id)?;
            let inspections = registry.inspections_for_site(&id)?;

            if json {
                let detail = serde_json::json!({
                    "obra": site,
                    "fiscalizacoes": inspections,
                });
                println!("{}", serde_json::to_string_pretty(&detail)?);
            } else {
                println!("{}", site.name);
                println!("  Responsável: {}", site.responsible);
                if !site.start_date.is_empty() {
                    println!("  Início:      {}", site.start_date);
                }
                if !site.expected_end.is_empty() {
                    println!("  Término:     {}", site.expected_end);
                }
                if !site.description.is_empty() {
                    println!("  Descrição:   {}", site.description);
                }
                if let Some(location) = site.location {
                    println!("  Localização: {location}");
                }
                if let Some(photo) = &site.photo {
                    println!("  Foto:        {photo}");
                }
                if inspections.is_empty() {
                    println!("  No inspections recorded.");
                } else {
                    println!("  Fiscalizações:");
                    for inspection in &inspections {
                        println!(
                            "    {}  {}  {}",
                            inspection.id,
                            inspection.date.format("%Y-%m-%d"),
                            inspection.status
                        );
                    }
                }
            }
        }

        ObraCommand::Edit(args) => {
            let patch = SitePatch {
                name: args.name,
                responsible: args.responsible,
                start_date: args.start_date,
                expected_end: args.expected_end,
                description: args.description,
            };
            if patch.is_empty() {
                println!("Nothing to change; pass at least one field flag.");
                return Ok(());
            }

            let mut registry = open_registry(config)?;
            registry.update_site(&args.id, &patch)?;
            println!("Updated obra {}", args.id);
        }

        ObraCommand::Remove { id, yes } => {
            let mut registry = open_registry(config)?;
            let site = registry.site(&id)?;
            let tied = registry.inspections_for_site(&id)?.len();

            if !yes {
                println!(
                    "This will remove obra '{}' and {tied} inspection(s). Use --yes to confirm.",
                    site.name
                );
                return Ok(());
            }

            registry.remove_site(&id)?;
            println!("Removed obra '{}' and {tied} inspection(s)", site.name);
        }
    }
    Ok(())
}

async fn handle_fiscalizacao(config: &Config, cmd: FiscalizacaoCommand) -> anyhow::Result<()> {
    match cmd {
        FiscalizacaoCommand::Add(args) => {
            let (location, photo) =
                capture_attachments(config, args.lat, args.lon, args.photo).await?;

            let mut inspection = Inspection::new(&args.site_id, args.status.into());
            if let Some(date) = args.date {
                inspection.date = date;
            }
            inspection.observations = args.observations.unwrap_or_default();
            inspection.location = location;
            inspection.photo = photo;

            let mut registry = open_registry(config)?;
            registry.add_inspection(&inspection)?;
            println!(
                "Registered fiscalização {} for obra {}",
                inspection.id, inspection.site_id
            );
        }

        FiscalizacaoCommand::List { site_id, json } => {
            let registry = open_registry(config)?;
            let inspections = match site_id {
                Some(id) => registry.inspections_for_site(&id)?,
                None => registry.inspections()?,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&inspections)?);
            } else if inspections.is_empty() {
                println!("No fiscalizações recorded.");
            } else {
                for inspection in &inspections {
                    println!(
                        "{}  obra {}  {}  {}",
                        inspection.id,
                        inspection.site_id,
                        inspection.date.format("%Y-%m-%d"),
                        inspection.status
                    );
                }
            }
        }

        FiscalizacaoCommand::Show { id, json } => {
            let registry = open_registry(config)?;
            let inspection = registry.inspection(&id)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&inspection)?);
            } else {
                println!("Fiscalização {}", inspection.id);
                println!("  Obra:        {}", inspection.site_id);
                println!("  Data:        {}", inspection.date.to_rfc3339());
                println!("  Status:      {}", inspection.status);
                if !inspection.observations.is_empty() {
                    println!("  Observações: {}", inspection.observations);
                }
                if let Some(location) = inspection.location {
                    println!("  Localização: {location}");
                }
                if let Some(photo) = &inspection.photo {
                    println!("  Foto:        {photo}");
                }
            }
        }
    }
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let registry = open_registry(config)?;
    let sites = registry.sites()?.len();
    let inspections = registry.inspections()?.len();

    if json {
        let status = serde_json::json!({
            "database_path": config.database_path(),
            "obras": sites,
            "fiscalizacoes": inspections,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("obralog status");
        println!("--------------");
        println!("Database:       {}", config.database_path().display());
        println!("Obras:          {sites}");
        println!("Fiscalizações:  {inspections}");
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:   {}", config.database_path().display());
                println!();
                println!("[Device]");
                println!("  Location:        {}", config.device.location_enabled);
                println!("  Camera:          {}", config.device.camera_enabled);
                println!("  Photo quality:   {}", config.device.photo_quality);
                println!("  Photo directory: {}", config.photo_dir().display());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
