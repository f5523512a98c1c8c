//! Core domain types for the medtrack system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Medicines and their daily reminder times
//! - Per-day intake history (date-key sets)
//! - The ordered medicine store
//! - Notification permission state

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

// ============================================================================
// Medicine Types
// ============================================================================

/// One scheduled medication reminder with its intake history.
///
/// `taken_dates` holds canonical `YYYY-MM-DD` keys, one per day the user
/// confirmed intake. A set keeps the keys unique; it serializes as a plain
/// JSON array so the persisted layout matches the original record format.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Medicine {
    pub id: Uuid,
    pub name: String,
    pub hour: u32,
    pub minute: u32,
    pub enabled: bool,
    pub taken_dates: BTreeSet<String>,
    /// Opaque collaborator handle for the registered daily reminder.
    /// `None` when disabled or when scheduling failed.
    pub notification_id: Option<String>,
}

impl Medicine {
    /// Whether this medicine was marked taken on the given date key
    pub fn taken_on(&self, date_key: &str) -> bool {
        self.taken_dates.contains(date_key)
    }

    /// Number of distinct days this medicine was marked taken
    pub fn days_taken(&self) -> usize {
        self.taken_dates.len()
    }
}

// ============================================================================
// Store Type
// ============================================================================

/// Ordered sequence of medicines, insertion order preserved.
///
/// The application holds one logical store at a time; every mutation goes
/// through the operations in [`crate::store`], which produce a new store
/// state rather than editing in place.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MedicineStore {
    pub medicines: Vec<Medicine>,
}

impl MedicineStore {
    /// Look up a medicine by id
    pub fn get(&self, id: Uuid) -> Option<&Medicine> {
        self.medicines.iter().find(|m| m.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Medicine> {
        self.medicines.iter()
    }

    pub fn len(&self) -> usize {
        self.medicines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.medicines.is_empty()
    }
}

// ============================================================================
// Permission State
// ============================================================================

/// Notification permission as reported by the platform collaborator.
///
/// Scheduling is only attempted under `Granted`; both `Denied` and
/// `Unknown` leave medicines enabled-but-unreminded.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Unknown,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}
