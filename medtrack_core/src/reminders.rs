//! Reminder-scheduling collaborator seam.
//!
//! The core never talks to a platform notification service directly; it
//! goes through [`ReminderScheduler`]. Scheduling hands back an opaque
//! handle (or `None` on failure), and cancellation tolerates absent
//! handles. [`JsonRegistry`] is the file-backed implementation used by the
//! CLI: a JSON document of active registrations that a delivery agent can
//! consume.

use crate::{Error, PermissionStatus, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Collaborator that registers and cancels repeating daily reminders
pub trait ReminderScheduler {
    /// Register a daily repeating reminder at the given local time.
    ///
    /// Returns `Ok(None)` when the registration could not be made; the
    /// medicine stays enabled-but-unreminded in that case.
    fn schedule_daily(&mut self, name: &str, hour: u32, minute: u32) -> Result<Option<String>>;

    /// Unregister a previously scheduled reminder.
    ///
    /// An unknown handle is a no-op.
    fn cancel(&mut self, handle: &str) -> Result<()>;
}

/// Attempt to schedule a reminder, gated on notification permission.
///
/// Scheduling is only tried under `Granted`; any collaborator failure is
/// swallowed into `None`, mirroring the platform behavior where a denied
/// or failed registration simply leaves no handle behind.
pub fn schedule_if_permitted(
    scheduler: &mut dyn ReminderScheduler,
    permission: PermissionStatus,
    name: &str,
    hour: u32,
    minute: u32,
) -> Option<String> {
    if !permission.is_granted() {
        tracing::debug!(
            "Notification permission {:?}, skipping reminder for {}",
            permission,
            name
        );
        return None;
    }

    match scheduler.schedule_daily(name, hour, minute) {
        Ok(handle) => handle,
        Err(e) => {
            tracing::warn!("Failed to schedule reminder for {}: {}", name, e);
            None
        }
    }
}

/// Cancel a reminder if a handle exists; absent handles are a no-op
pub fn cancel_if_present(scheduler: &mut dyn ReminderScheduler, handle: Option<&str>) {
    if let Some(handle) = handle {
        if let Err(e) = scheduler.cancel(handle) {
            tracing::warn!("Failed to cancel reminder {}: {}", handle, e);
        }
    }
}

// ============================================================================
// File-backed registry
// ============================================================================

/// One active reminder registration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Registration {
    pub handle: String,
    pub name: String,
    pub hour: u32,
    pub minute: u32,
}

/// JSON-file registry of active daily reminders.
///
/// Stands in for a platform notification service: registrations are
/// appended with fresh Uuid handles and removed on cancel, with the whole
/// document rewritten atomically each time.
pub struct JsonRegistry {
    path: PathBuf,
}

impl JsonRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read all active registrations
    pub fn registrations(&self) -> Result<Vec<Registration>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        reader.read_to_string(&mut contents)?;
        file.unlock()?;

        match serde_json::from_str(&contents) {
            Ok(regs) => Ok(regs),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse reminder registry {:?}: {}. Treating as empty.",
                    self.path,
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    fn write_registrations(&self, regs: &[Registration]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = NamedTempFile::new_in(self.path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "registry path missing parent")
        })?)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(regs)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;
        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

impl ReminderScheduler for JsonRegistry {
    fn schedule_daily(&mut self, name: &str, hour: u32, minute: u32) -> Result<Option<String>> {
        let handle = Uuid::new_v4().to_string();

        let mut regs = self.registrations()?;
        regs.push(Registration {
            handle: handle.clone(),
            name: name.to_string(),
            hour,
            minute,
        });
        self.write_registrations(&regs)?;

        tracing::debug!("Registered daily reminder {} for {}", handle, name);
        Ok(Some(handle))
    }

    fn cancel(&mut self, handle: &str) -> Result<()> {
        let regs = self.registrations()?;
        let remaining: Vec<_> = regs.into_iter().filter(|r| r.handle != handle).collect();
        self.write_registrations(&remaining)?;

        tracing::debug!("Cancelled reminder {}", handle);
        Ok(())
    }
}

// ============================================================================
// In-memory scheduler (test collaborator)
// ============================================================================

/// In-memory scheduler that records registrations, useful in tests and as
/// a stand-in when no delivery agent is configured. Can be told to fail
/// every registration to model a broken platform service.
#[derive(Default)]
pub struct MemoryScheduler {
    pub scheduled: Vec<Registration>,
    pub cancelled: Vec<String>,
    pub fail_scheduling: bool,
}

impl ReminderScheduler for MemoryScheduler {
    fn schedule_daily(&mut self, name: &str, hour: u32, minute: u32) -> Result<Option<String>> {
        if self.fail_scheduling {
            return Ok(None);
        }
        let handle = Uuid::new_v4().to_string();
        self.scheduled.push(Registration {
            handle: handle.clone(),
            name: name.to_string(),
            hour,
            minute,
        });
        Ok(Some(handle))
    }

    fn cancel(&mut self, handle: &str) -> Result<()> {
        self.cancelled.push(handle.to_string());
        self.scheduled.retain(|r| r.handle != handle);
        Ok(())
    }
}
