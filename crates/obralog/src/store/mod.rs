//! Local record store.
//!
//! Records live in named slots, each holding one whole JSON array. Every
//! mutation is a full-slot read-modify-write: load the array, change the
//! in-memory copy, write the array back. Nothing here indexes, caches, or
//! locks.
//!
//! The read-modify-write pattern has a lost-update race: two overlapping
//! mutations of the same slot can clobber each other. The host is a
//! single-user foreground tool whose actions are serialized by the user,
//! so the store keeps a single logical writer instead of locking. If
//! mutual exclusion is ever added, the unit is one slot key, not one
//! record.

pub mod slots;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

pub use slots::{KvSlots, MemorySlots, SqliteSlots};

/// A whole-array record store over a slot backend.
///
/// Generic over any record type that serializes to a JSON object carrying
/// a string `id` field.
#[derive(Debug)]
pub struct RecordStore<S: KvSlots> {
    slots: S,
}

impl<S: KvSlots> RecordStore<S> {
    /// Create a record store over the given slot backend.
    #[must_use]
    pub fn new(slots: S) -> Self {
        Self { slots }
    }

    /// List every record in a slot, in stored (append) order.
    ///
    /// A slot that has never been written yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptData`] if the stored blob is not a valid
    /// array of the expected record shape; callers decide whether to treat
    /// that as fatal or reset the collection.
    pub fn list_all<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.slots.get(key)? {
            None => Ok(Vec::new()),
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|source| Error::corrupt_data(key, source))
            }
        }
    }

    /// Append a record to a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read, decoded, or written.
    pub fn append<T: Serialize>(&mut self, key: &str, record: &T) -> Result<()> {
        let mut records = self.read_values(key)?;
        records.push(serde_json::to_value(record)?);
        self.write_values(key, &records)?;
        debug!("Appended record to slot '{}' ({} total)", key, records.len());
        Ok(())
    }

    /// Shallow-merge a patch into the record whose `id` matches.
    ///
    /// Fields present in the patch replace the stored fields; fields absent
    /// from the patch are preserved untouched. The `id` field is immutable
    /// and ignored if present in the patch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record in the slot has the given
    /// identifier, or [`Error::InvalidRecord`] if the patch is not a JSON
    /// object.
    pub fn update_in_place(&mut self, key: &str, id: &str, patch: &Value) -> Result<()> {
        let Some(patch_fields) = patch.as_object() else {
            return Err(Error::invalid_record("patch must be a JSON object"));
        };

        let mut records = self.read_values(key)?;
        let target = records
            .iter_mut()
            .find(|record| record_id(record) == Some(id))
            .ok_or_else(|| Error::not_found(key, id))?;

        if let Some(fields) = target.as_object_mut() {
            for (field, value) in patch_fields {
                if field == "id" {
                    continue;
                }
                fields.insert(field.clone(), value.clone());
            }
        }

        self.write_values(key, &records)?;
        debug!("Patched record '{}' in slot '{}'", id, key);
        Ok(())
    }

    /// Remove the record whose `id` matches. A no-op if the identifier is
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read, decoded, or written.
    pub fn delete_by_id(&mut self, key: &str, id: &str) -> Result<()> {
        let mut records = self.read_values(key)?;
        let before = records.len();
        records.retain(|record| record_id(record) != Some(id));
        self.write_values(key, &records)?;
        if records.len() < before {
            debug!("Deleted record '{}' from slot '{}'", id, key);
        }
        Ok(())
    }

    /// Remove every record whose foreign-key field equals `owning_id`.
    ///
    /// Used to cascade-delete inspections when their owning site goes. A
    /// no-op if nothing matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read, decoded, or written.
    pub fn delete_related(&mut self, key: &str, fk_field: &str, owning_id: &str) -> Result<()> {
        let mut records = self.read_values(key)?;
        let before = records.len();
        records.retain(|record| {
            record.get(fk_field).and_then(Value::as_str) != Some(owning_id)
        });
        self.write_values(key, &records)?;
        if records.len() < before {
            debug!(
                "Deleted {} record(s) related to '{}' from slot '{}'",
                before - records.len(),
                owning_id,
                key
            );
        }
        Ok(())
    }

    /// Read a slot as untyped JSON records.
    fn read_values(&self, key: &str) -> Result<Vec<Value>> {
        match self.slots.get(key)? {
            None => Ok(Vec::new()),
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|source| Error::corrupt_data(key, source))
            }
        }
    }

    /// Write a whole slot back.
    fn write_values(&mut self, key: &str, records: &[Value]) -> Result<()> {
        let raw = serde_json::to_string(records)?;
        self.slots.set(key, &raw)
    }
}

/// Extract the string identifier of an untyped record, if it has one.
fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}
