//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands. Long flag
//! names follow the product vocabulary (and the persisted field names),
//! hence the Portuguese spellings.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::model::InspectionStatus;

/// Site ("obra") management commands.
#[derive(Debug, Subcommand)]
pub enum ObraCommand {
    /// Register a new site
    Add(ObraAddArgs),

    /// List registered sites
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show one site and its inspections
    Show {
        /// Site identifier
        id: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Edit fields of a site
    Edit(ObraEditArgs),

    /// Remove a site and every inspection tied to it
    Remove {
        /// Site identifier
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for registering a site.
#[derive(Debug, Args)]
pub struct ObraAddArgs {
    /// Site name (required)
    #[arg(long = "nome")]
    pub name: String,

    /// Responsible party (required)
    #[arg(long = "responsavel")]
    pub responsible: String,

    /// Start date, free-form
    #[arg(long = "data-inicio")]
    pub start_date: Option<String>,

    /// Expected end date, free-form
    #[arg(long = "previsao-termino")]
    pub expected_end: Option<String>,

    /// Description
    #[arg(long = "descricao")]
    pub description: Option<String>,

    /// Latitude of the site (requires --lon)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude of the site (requires --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Image file to import as the site photo
    #[arg(long = "foto", value_name = "FILE")]
    pub photo: Option<PathBuf>,
}

/// Arguments for editing a site.
#[derive(Debug, Args)]
pub struct ObraEditArgs {
    /// Site identifier
    pub id: String,

    /// New site name
    #[arg(long = "nome")]
    pub name: Option<String>,

    /// New responsible party
    #[arg(long = "responsavel")]
    pub responsible: Option<String>,

    /// New start date
    #[arg(long = "data-inicio")]
    pub start_date: Option<String>,

    /// New expected end date
    #[arg(long = "previsao-termino")]
    pub expected_end: Option<String>,

    /// New description
    #[arg(long = "descricao")]
    pub description: Option<String>,
}

/// Inspection ("fiscalização") commands.
#[derive(Debug, Subcommand)]
pub enum FiscalizacaoCommand {
    /// Register a new inspection against a site
    Add(FiscalizacaoAddArgs),

    /// List inspections
    List {
        /// Only inspections of this site
        #[arg(long = "obra", value_name = "ID")]
        site_id: Option<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show one inspection
    Show {
        /// Inspection identifier
        id: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Arguments for registering an inspection.
#[derive(Debug, Args)]
pub struct FiscalizacaoAddArgs {
    /// Identifier of the inspected site
    #[arg(long = "obra", value_name = "ID")]
    pub site_id: String,

    /// Inspection date (RFC 3339); defaults to now
    #[arg(long = "data")]
    pub date: Option<chrono::DateTime<chrono::Utc>>,

    /// Progress status
    #[arg(long, value_enum, default_value = "em-dia")]
    pub status: StatusArg,

    /// Observations
    #[arg(long = "observacoes")]
    pub observations: Option<String>,

    /// Latitude of the inspection (requires --lon)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude of the inspection (requires --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Image file to import as the inspection photo
    #[arg(long = "foto", value_name = "FILE")]
    pub photo: Option<PathBuf>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Inspection status argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// On schedule ("Em dia")
    EmDia,
    /// Behind schedule ("Atrasada")
    Atrasada,
    /// Halted ("Parada")
    Parada,
}

impl From<StatusArg> for InspectionStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::EmDia => Self::OnSchedule,
            StatusArg::Atrasada => Self::Delayed,
            StatusArg::Parada => Self::Halted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_arg_conversion() {
        assert_eq!(
            InspectionStatus::from(StatusArg::EmDia),
            InspectionStatus::OnSchedule
        );
        assert_eq!(
            InspectionStatus::from(StatusArg::Atrasada),
            InspectionStatus::Delayed
        );
        assert_eq!(
            InspectionStatus::from(StatusArg::Parada),
            InspectionStatus::Halted
        );
    }

    #[test]
    fn test_obra_command_debug() {
        let cmd = ObraCommand::List { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("List"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: true };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
