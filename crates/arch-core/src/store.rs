//! Capabilities the engine needs from whoever stores readings.
//!
//! Trend analysis reads prior readings through [`ReadingHistory`]; finished
//! assessments are handed to an [`AssessmentSink`]. Implementations return
//! boxed futures so both traits stay dyn-compatible.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, PoisonError, RwLock};

use thiserror::Error;
use uuid::Uuid;

use crate::models::assessment::AssessmentOutcome;
use crate::models::reading::{HistoricalReading, Reading};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// How many prior readings trend analysis looks at.
pub const TREND_WINDOW: usize = 5;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("stored record is corrupt: {0}")]
    Corrupt(String),

    #[error("record already exists: {0}")]
    Conflict(String),
}

pub trait ReadingHistory: Send + Sync {
    /// Fetch up to `limit` readings for `patient_id` recorded strictly before
    /// `before`, newest first.
    fn recent_readings(
        &self,
        patient_id: Uuid,
        before: jiff::Timestamp,
        limit: usize,
    ) -> BoxFuture<'_, Result<Vec<HistoricalReading>, StoreError>>;
}

pub trait AssessmentSink: Send + Sync {
    /// Persist a reading together with the outcome computed from it.
    fn record<'a>(
        &'a self,
        reading: &'a Reading,
        outcome: &'a AssessmentOutcome,
    ) -> BoxFuture<'a, Result<(), StoreError>>;
}

/// Readings and outcomes held in memory, keyed by patient.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    readings: RwLock<HashMap<Uuid, Vec<HistoricalReading>>>,
    outcomes: Mutex<Vec<AssessmentOutcome>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_readings(
        patient_id: Uuid,
        readings: impl IntoIterator<Item = HistoricalReading>,
    ) -> Self {
        let store = Self::new();
        for reading in readings {
            store.insert(patient_id, reading);
        }
        store
    }

    pub fn insert(&self, patient_id: Uuid, reading: HistoricalReading) {
        self.readings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(patient_id)
            .or_default()
            .push(reading);
    }

    /// Outcomes recorded so far, oldest first.
    pub fn outcomes(&self) -> Vec<AssessmentOutcome> {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn select(
        &self,
        patient_id: Uuid,
        before: jiff::Timestamp,
        limit: usize,
    ) -> Vec<HistoricalReading> {
        let readings = self.readings.read().unwrap_or_else(PoisonError::into_inner);
        let mut prior: Vec<HistoricalReading> = readings
            .get(&patient_id)
            .map(|all| {
                all.iter()
                    .filter(|r| r.recorded_at < before)
                    .copied()
                    .collect()
            })
            .unwrap_or_default();
        prior.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        prior.truncate(limit);
        prior
    }
}

impl ReadingHistory for InMemoryStore {
    fn recent_readings(
        &self,
        patient_id: Uuid,
        before: jiff::Timestamp,
        limit: usize,
    ) -> BoxFuture<'_, Result<Vec<HistoricalReading>, StoreError>> {
        let selected = self.select(patient_id, before, limit);
        Box::pin(async move { Ok(selected) })
    }
}

impl AssessmentSink for InMemoryStore {
    fn record<'a>(
        &'a self,
        reading: &'a Reading,
        outcome: &'a AssessmentOutcome,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            let mut outcomes = self.outcomes.lock().unwrap_or_else(PoisonError::into_inner);
            if outcomes
                .iter()
                .any(|o| o.assessment.reading_id == reading.id)
            {
                return Err(StoreError::Conflict(format!(
                    "assessment for reading {}",
                    reading.id
                )));
            }
            outcomes.push(outcome.clone());
            drop(outcomes);
            self.insert(reading.patient_id, reading.to_historical());
            Ok(())
        })
    }
}
