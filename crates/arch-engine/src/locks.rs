use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OwnedMutexGuard;
use uuid::Uuid;

/// One async lock per patient, created on demand and pruned when idle.
#[derive(Debug, Default)]
pub struct PatientLocks {
    locks: Mutex<HashMap<Uuid, Arc<tokio::sync::Mutex<()>>>>,
}

impl PatientLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other assessment holds `patient_id`, then hold it until
    /// the returned guard is dropped.
    pub async fn acquire(&self, patient_id: Uuid) -> PatientGuard<'_> {
        let lock = self
            .locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(patient_id)
            .or_default()
            .clone();
        let guard = lock.lock_owned().await;
        PatientGuard {
            locks: self,
            patient_id,
            guard: Some(guard),
        }
    }

    /// Number of patients with a live lock entry.
    pub fn tracked(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

pub struct PatientGuard<'a> {
    locks: &'a PatientLocks,
    patient_id: Uuid,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for PatientGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        let mut locks = self
            .locks
            .locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Only the map's own handle left: nobody holds or waits on it.
        if locks
            .get(&self.patient_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.patient_id);
        }
    }
}
