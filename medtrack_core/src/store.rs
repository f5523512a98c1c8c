//! Pure store transformations.
//!
//! Every mutation takes the current store by reference and returns a new
//! store state (or an error with no state change). Operations addressing
//! an absent id are no-ops, which keeps them idempotent under retry; the
//! tracker layer decides when a missing id is worth reporting.

use crate::{Error, Medicine, MedicineStore, Result};
use std::collections::BTreeSet;
use uuid::Uuid;

impl MedicineStore {
    /// Add a new medicine with the given name and daily reminder time.
    ///
    /// The name is trimmed; an empty result is rejected with
    /// `Error::InvalidInput`, as is an out-of-range hour or minute. The
    /// new medicine starts enabled with an empty history and is appended
    /// at the end of the sequence. `notification_id` carries whatever
    /// handle the scheduling collaborator issued (`None` when scheduling
    /// was skipped or failed).
    pub fn add(
        &self,
        name: &str,
        hour: u32,
        minute: u32,
        notification_id: Option<String>,
    ) -> Result<(MedicineStore, Medicine)> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("medicine name is empty".into()));
        }
        if hour > 23 {
            return Err(Error::InvalidInput(format!("hour {} out of range", hour)));
        }
        if minute > 59 {
            return Err(Error::InvalidInput(format!(
                "minute {} out of range",
                minute
            )));
        }

        let medicine = Medicine {
            id: Uuid::new_v4(),
            name: name.to_string(),
            hour,
            minute,
            enabled: true,
            taken_dates: BTreeSet::new(),
            notification_id,
        };

        let mut medicines = self.medicines.clone();
        medicines.push(medicine.clone());

        tracing::debug!("Added medicine {} ({})", medicine.name, medicine.id);
        Ok((MedicineStore { medicines }, medicine))
    }

    /// Remove the medicine with the matching id; no-op when absent
    pub fn remove(&self, id: Uuid) -> MedicineStore {
        let medicines = self
            .medicines
            .iter()
            .filter(|m| m.id != id)
            .cloned()
            .collect();
        MedicineStore { medicines }
    }

    /// Update the `enabled` flag and `notification_id` for the matching
    /// medicine, leaving all other fields unchanged; no-op when absent.
    ///
    /// Callers pass `None` when disabling, which maintains the invariant
    /// that disabled medicines carry no reminder handle.
    pub fn set_enabled(
        &self,
        id: Uuid,
        enabled: bool,
        notification_id: Option<String>,
    ) -> MedicineStore {
        let medicines = self
            .medicines
            .iter()
            .map(|m| {
                if m.id == id {
                    let mut updated = m.clone();
                    updated.enabled = enabled;
                    updated.notification_id = notification_id.clone();
                    updated
                } else {
                    m.clone()
                }
            })
            .collect();
        MedicineStore { medicines }
    }

    /// Record an intake confirmation for the given date key.
    ///
    /// Idempotent: marking the same date twice leaves the store identical
    /// to marking it once. No-op when the id is absent.
    pub fn mark_taken(&self, id: Uuid, date_key: &str) -> MedicineStore {
        let medicines = self
            .medicines
            .iter()
            .map(|m| {
                if m.id == id {
                    let mut updated = m.clone();
                    updated.taken_dates.insert(date_key.to_string());
                    updated
                } else {
                    m.clone()
                }
            })
            .collect();
        MedicineStore { medicines }
    }
}
