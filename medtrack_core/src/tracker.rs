//! Application state and operation orchestration.
//!
//! [`Tracker`] owns the one store instance the application works with and
//! threads it through every operation, together with the scheduling
//! collaborator and the current permission state. Each mutation produces a
//! new store state, persists it, and only then replaces the held state, so
//! a persistence failure never leaves a half-applied store in memory.

use crate::dates::today_key;
use crate::reminders::{cancel_if_present, schedule_if_permitted, ReminderScheduler};
use crate::streak::compute_global_streak;
use crate::{Error, Medicine, MedicineStore, PermissionStatus, Result};
use std::path::PathBuf;
use uuid::Uuid;

/// Owned application state: store + scheduler + permission + store path
pub struct Tracker<S: ReminderScheduler> {
    store: MedicineStore,
    scheduler: S,
    permission: PermissionStatus,
    store_path: PathBuf,
}

impl<S: ReminderScheduler> Tracker<S> {
    /// Load the store from `store_path` and build a tracker around it
    pub fn open(
        store_path: impl Into<PathBuf>,
        scheduler: S,
        permission: PermissionStatus,
    ) -> Result<Self> {
        let store_path = store_path.into();
        let store = MedicineStore::load(&store_path)?;
        Ok(Self {
            store,
            scheduler,
            permission,
            store_path,
        })
    }

    /// Current store state
    pub fn store(&self) -> &MedicineStore {
        &self.store
    }

    /// Add a medicine, attempting to register its daily reminder first.
    ///
    /// A failed or permission-blocked registration still adds the
    /// medicine; it just carries no handle. If the add itself is rejected
    /// (empty name, bad time) the registration is cancelled again so the
    /// collaborator holds no orphan.
    pub fn add_medicine(&mut self, name: &str, hour: u32, minute: u32) -> Result<Medicine> {
        let handle =
            schedule_if_permitted(&mut self.scheduler, self.permission, name.trim(), hour, minute);

        match self.store.add(name, hour, minute, handle.clone()) {
            Ok((store, medicine)) => {
                self.commit(store)?;
                tracing::info!("Added medicine {} ({})", medicine.name, medicine.id);
                Ok(medicine)
            }
            Err(e) => {
                cancel_if_present(&mut self.scheduler, handle.as_deref());
                Err(e)
            }
        }
    }

    /// Delete a medicine permanently, cancelling any live reminder
    pub fn delete_medicine(&mut self, id: Uuid) -> Result<()> {
        let medicine = self.store.get(id).ok_or(Error::NotFound(id))?;
        let handle = medicine.notification_id.clone();

        cancel_if_present(&mut self.scheduler, handle.as_deref());
        let store = self.store.remove(id);
        self.commit(store)?;

        tracing::info!("Deleted medicine {}", id);
        Ok(())
    }

    /// Flip a medicine's enabled flag.
    ///
    /// Disabling cancels the reminder and clears the handle. Re-enabling
    /// re-attempts scheduling through the permission gate and records
    /// whatever handle comes back, possibly `None`.
    pub fn toggle_enabled(&mut self, id: Uuid) -> Result<bool> {
        let medicine = self.store.get(id).ok_or(Error::NotFound(id))?.clone();

        let store = if medicine.enabled {
            cancel_if_present(&mut self.scheduler, medicine.notification_id.as_deref());
            self.store.set_enabled(id, false, None)
        } else {
            let handle = schedule_if_permitted(
                &mut self.scheduler,
                self.permission,
                &medicine.name,
                medicine.hour,
                medicine.minute,
            );
            self.store.set_enabled(id, true, handle)
        };

        self.commit(store)?;
        let now_enabled = !medicine.enabled;
        tracing::info!(
            "Medicine {} is now {}",
            id,
            if now_enabled { "enabled" } else { "disabled" }
        );
        Ok(now_enabled)
    }

    /// Record an intake confirmation for a specific date key
    pub fn mark_taken(&mut self, id: Uuid, date_key: &str) -> Result<()> {
        if self.store.get(id).is_none() {
            return Err(Error::NotFound(id));
        }
        let store = self.store.mark_taken(id, date_key);
        self.commit(store)?;
        Ok(())
    }

    /// Record an intake confirmation for today's local date
    pub fn mark_taken_today(&mut self, id: Uuid) -> Result<()> {
        self.mark_taken(id, &today_key())
    }

    /// Global streak over the current store, recomputed from scratch
    pub fn global_streak(&self) -> u32 {
        compute_global_streak(&self.store.medicines)
    }

    fn commit(&mut self, store: MedicineStore) -> Result<()> {
        store.save(&self.store_path)?;
        self.store = store;
        Ok(())
    }
}
