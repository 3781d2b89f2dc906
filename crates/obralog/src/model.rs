//! Core record types for obralog.
//!
//! This module defines the two persisted entity kinds — construction sites
//! and their inspections — with the exact field names used by the on-device
//! data they remain compatible with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Slot key under which the site collection is stored.
pub const SITES_SLOT: &str = "obras";

/// Slot key under which the inspection collection is stored.
pub const INSPECTIONS_SLOT: &str = "fiscalizacoes";

/// Field on an inspection that references its owning site.
pub const SITE_FK_FIELD: &str = "obraId";

/// Generate a new record identifier.
///
/// Identifiers are UUID v4 strings: locally unique with no clock-collision
/// window, and immutable once assigned to a record.
#[must_use]
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A single latitude/longitude fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Progress status of an inspection.
///
/// The persisted strings are the three values the stored data has always
/// used; the store itself never validates them, only this type does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InspectionStatus {
    /// Work is progressing as planned.
    #[serde(rename = "Em dia")]
    OnSchedule,
    /// Work is behind schedule.
    #[serde(rename = "Atrasada")]
    Delayed,
    /// Work is halted.
    #[serde(rename = "Parada")]
    Halted,
}

impl InspectionStatus {
    /// The persisted string form of this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnSchedule => "Em dia",
            Self::Delayed => "Atrasada",
            Self::Halted => "Parada",
        }
    }
}

impl std::fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A construction site record ("obra").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Unique identifier, immutable once assigned.
    pub id: String,

    /// Site name. Required non-empty at creation.
    #[serde(rename = "nome")]
    pub name: String,

    /// Responsible party. Required non-empty at creation.
    #[serde(rename = "responsavel")]
    pub responsible: String,

    /// Start date, free-form.
    #[serde(rename = "dataInicio", default)]
    pub start_date: String,

    /// Expected end date, free-form.
    #[serde(rename = "previsaoTermino", default)]
    pub expected_end: String,

    /// Free-form description.
    #[serde(rename = "descricao", default)]
    pub description: String,

    /// Geolocation captured at registration, if any.
    #[serde(rename = "localizacao", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,

    /// Reference to a locally captured photo, if any.
    #[serde(rename = "imagem", default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl Site {
    /// Create a new site with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` or `responsible` is empty — both are
    /// required fields; they are not re-validated on later updates beyond
    /// presence.
    pub fn new(name: impl Into<String>, responsible: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let responsible = responsible.into();
        if name.trim().is_empty() {
            return Err(Error::invalid_record("site name must not be empty"));
        }
        if responsible.trim().is_empty() {
            return Err(Error::invalid_record(
                "site responsible party must not be empty",
            ));
        }
        Ok(Self {
            id: new_record_id(),
            name,
            responsible,
            start_date: String::new(),
            expected_end: String::new(),
            description: String::new(),
            location: None,
            photo: None,
        })
    }
}

/// An inspection record ("fiscalização") against exactly one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    /// Unique identifier, immutable once assigned.
    pub id: String,

    /// Identifier of the owning site. Referential integrity is the
    /// caller's responsibility, not the store's.
    #[serde(rename = "obraId")]
    pub site_id: String,

    /// When the inspection took place.
    #[serde(rename = "data")]
    pub date: DateTime<Utc>,

    /// Progress status recorded by the inspector.
    pub status: InspectionStatus,

    /// Free-form observations.
    #[serde(rename = "observacoes", default)]
    pub observations: String,

    /// Reference to a locally captured photo, if any.
    #[serde(rename = "fotoUri", default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    /// Geolocation captured during the inspection, if any.
    #[serde(rename = "localizacao", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

impl Inspection {
    /// Create a new inspection with a fresh identifier, dated now.
    #[must_use]
    pub fn new(site_id: impl Into<String>, status: InspectionStatus) -> Self {
        Self {
            id: new_record_id(),
            site_id: site_id.into(),
            date: Utc::now(),
            status,
            observations: String::new(),
            photo: None,
            location: None,
        }
    }
}
