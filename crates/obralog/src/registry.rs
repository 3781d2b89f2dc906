//! Typed operations over the record store.
//!
//! The [`Registry`] is the one store instance the whole application shares:
//! every command handler receives a reference to it instead of reaching for
//! storage on its own. It enforces the rules the store itself deliberately
//! does not — required fields, referential checks, and the cascade when a
//! site is removed.

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::error::{Error, Result};
use crate::model::{Inspection, Site, INSPECTIONS_SLOT, SITES_SLOT, SITE_FK_FIELD};
use crate::store::{KvSlots, RecordStore};

/// A partial update for a site record.
///
/// Only the fields carried by the original edit screen are patchable; the
/// identifier, geolocation, and photo are set at registration and left
/// alone afterwards.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SitePatch {
    /// New site name.
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New responsible party.
    #[serde(rename = "responsavel", skip_serializing_if = "Option::is_none")]
    pub responsible: Option<String>,
    /// New start date.
    #[serde(rename = "dataInicio", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// New expected end date.
    #[serde(rename = "previsaoTermino", skip_serializing_if = "Option::is_none")]
    pub expected_end: Option<String>,
    /// New description.
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SitePatch {
    /// Check whether the patch changes anything at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.responsible.is_none()
            && self.start_date.is_none()
            && self.expected_end.is_none()
            && self.description.is_none()
    }
}

/// The application's record registry: sites and their inspections.
#[derive(Debug)]
pub struct Registry<S: KvSlots> {
    store: RecordStore<S>,
}

impl<S: KvSlots> Registry<S> {
    /// Create a registry over the given slot backend.
    #[must_use]
    pub fn new(slots: S) -> Self {
        Self {
            store: RecordStore::new(slots),
        }
    }

    /// Register a new site.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be read or written.
    pub fn add_site(&mut self, site: &Site) -> Result<()> {
        self.store.append(SITES_SLOT, site)?;
        info!("Registered site '{}' ({})", site.name, site.id);
        Ok(())
    }

    /// List all registered sites in registration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be read or decoded.
    pub fn sites(&self) -> Result<Vec<Site>> {
        self.store.list_all(SITES_SLOT)
    }

    /// Look up one site by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no site has that identifier.
    pub fn site(&self, id: &str) -> Result<Site> {
        self.sites()?
            .into_iter()
            .find(|site| site.id == id)
            .ok_or_else(|| Error::not_found(SITES_SLOT, id))
    }

    /// Apply a partial update to a site.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the site does not exist, or
    /// [`Error::InvalidRecord`] if the patch blanks out the site name.
    pub fn update_site(&mut self, id: &str, patch: &SitePatch) -> Result<()> {
        if matches!(&patch.name, Some(name) if name.trim().is_empty()) {
            return Err(Error::invalid_record("site name must not be empty"));
        }
        let patch_value: Value = serde_json::to_value(patch)?;
        self.store.update_in_place(SITES_SLOT, id, &patch_value)?;
        info!("Updated site '{}'", id);
        Ok(())
    }

    /// Remove a site and every inspection that references it.
    ///
    /// Inspections are deleted first, the site second: a crash between the
    /// two writes leaves a site with zero inspections rather than
    /// inspections referencing a site that no longer exists. The two
    /// writes are otherwise independent, not a transaction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the site does not exist.
    pub fn remove_site(&mut self, id: &str) -> Result<()> {
        let site = self.site(id)?;
        self.store
            .delete_related(INSPECTIONS_SLOT, SITE_FK_FIELD, id)?;
        self.store.delete_by_id(SITES_SLOT, id)?;
        info!("Removed site '{}' ({}) and its inspections", site.name, id);
        Ok(())
    }

    /// Register a new inspection against an existing site.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the referenced site does not exist —
    /// the store would accept the dangling reference, so the check lives
    /// here.
    pub fn add_inspection(&mut self, inspection: &Inspection) -> Result<()> {
        self.site(&inspection.site_id)?;
        self.store.append(INSPECTIONS_SLOT, inspection)?;
        info!(
            "Registered inspection {} for site '{}'",
            inspection.id, inspection.site_id
        );
        Ok(())
    }

    /// List all inspections in registration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be read or decoded.
    pub fn inspections(&self) -> Result<Vec<Inspection>> {
        self.store.list_all(INSPECTIONS_SLOT)
    }

    /// List the inspections belonging to one site.
    ///
    /// There is no inverse index; this is a full scan-and-filter of the
    /// inspection collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be read or decoded.
    pub fn inspections_for_site(&self, site_id: &str) -> Result<Vec<Inspection>> {
        let mut inspections = self.inspections()?;
        inspections.retain(|inspection| inspection.site_id == site_id);
        Ok(inspections)
    }

    /// Look up one inspection by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no inspection has that identifier.
    pub fn inspection(&self, id: &str) -> Result<Inspection> {
        self.inspections()?
            .into_iter()
            .find(|inspection| inspection.id == id)
            .ok_or_else(|| Error::not_found(INSPECTIONS_SLOT, id))
    }
}
