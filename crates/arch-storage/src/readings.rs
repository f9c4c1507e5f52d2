//! Readings, assessments, and alerts stored as JSON objects in S3.
//!
//! Layout (see `arch_core::s3_keys`):
//!
//! ```text
//! patients/{patient_id}/readings/{millis:020}-{reading_id}.json
//! assessments/{reading_id}.json
//! alerts/{alert_id}.json
//! ```
//!
//! Reading keys sort chronologically within a patient prefix, so a history
//! fetch is one listing plus at most `limit` GETs. Timestamps are compared at
//! millisecond precision. A record writes the assessment and alert first and
//! the reading object last.

use arch_core::models::alert::{Alert, AlertStatus};
use arch_core::models::assessment::{AssessmentOutcome, RiskAssessment};
use arch_core::models::reading::{HistoricalReading, Reading};
use arch_core::s3_keys;
use arch_core::store::{AssessmentSink, BoxFuture, ReadingHistory, StoreError};
use aws_sdk_s3::Client;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::StorageError;
use crate::{objects, state};

#[derive(Clone)]
pub struct S3ReadingStore {
    client: Client,
    bucket: String,
}

impl S3ReadingStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Store a reading. Readings are write-once; rewriting the identical
    /// reading succeeds.
    pub async fn put_reading(&self, reading: &Reading) -> Result<(), StorageError> {
        let key = s3_keys::patient_reading(reading.patient_id, reading.recorded_at, reading.id);
        state::create_json(&self.client, &self.bucket, &key, reading).await?;
        debug!(key = %key, "reading stored");
        Ok(())
    }

    /// Store an assessment outcome for `reading`.
    ///
    /// The assessment key is derived from the reading. A different assessment
    /// already stored for a committed reading is rejected with
    /// `AlreadyExists`; one left by an interrupted record (reading object
    /// absent) is replaced together with its alert.
    pub async fn put_outcome(
        &self,
        reading: &Reading,
        outcome: &AssessmentOutcome,
    ) -> Result<(), StorageError> {
        let assessment = &outcome.assessment;
        let key = s3_keys::assessment(assessment.reading_id);
        match state::create_json(&self.client, &self.bucket, &key, assessment).await {
            Ok(()) => {}
            Err(StorageError::AlreadyExists { .. }) => {
                self.replace_interrupted(reading, &key, assessment).await?;
            }
            Err(e) => return Err(e),
        }

        if let Some(alert) = &outcome.alert {
            state::create_json(&self.client, &self.bucket, &s3_keys::alert(alert.id), alert)
                .await?;
            info!(
                alert_id = %alert.id,
                patient_id = %alert.patient_id,
                "alert stored"
            );
        }
        Ok(())
    }

    async fn replace_interrupted(
        &self,
        reading: &Reading,
        key: &str,
        assessment: &RiskAssessment,
    ) -> Result<(), StorageError> {
        let reading_key =
            s3_keys::patient_reading(reading.patient_id, reading.recorded_at, reading.id);
        let committed = match objects::get_object(&self.client, &self.bucket, &reading_key).await
        {
            Ok(_) => true,
            Err(StorageError::NotFound { .. }) => false,
            Err(e) => return Err(e),
        };
        if resolve_existing_assessment(committed) == ExistingAssessment::Final {
            return Err(StorageError::AlreadyExists {
                key: key.to_string(),
            });
        }

        let (stale, etag): (RiskAssessment, String) =
            state::load_json(&self.client, &self.bucket, key).await?;
        warn!(
            reading_id = %reading.id,
            stale_assessment_id = %stale.id,
            "replacing assessment left by an interrupted record"
        );
        self.delete_alerts_for(stale.id).await?;
        state::replace_json(&self.client, &self.bucket, key, assessment, &etag).await?;
        Ok(())
    }

    async fn delete_alerts_for(&self, assessment_id: Uuid) -> Result<(), StorageError> {
        let keys = objects::list_keys(&self.client, &self.bucket, s3_keys::ALERTS_PREFIX).await?;
        for key in &keys {
            let (alert, _): (Alert, String) =
                state::load_json(&self.client, &self.bucket, key).await?;
            if alert.assessment_id == assessment_id {
                objects::delete_object(&self.client, &self.bucket, key).await?;
                debug!(alert_id = %alert.id, "stale alert deleted");
            }
        }
        Ok(())
    }

    /// Mark an alert resolved. Uses the loaded ETag so a concurrent
    /// resolution fails with `PreconditionFailed` instead of overwriting.
    pub async fn resolve_alert(
        &self,
        id: Uuid,
        at: jiff::Timestamp,
    ) -> Result<Alert, StorageError> {
        let key = s3_keys::alert(id);
        let (mut alert, etag): (Alert, String) =
            state::load_json(&self.client, &self.bucket, &key).await?;
        alert.resolve(at)?;
        state::replace_json(&self.client, &self.bucket, &key, &alert, &etag).await?;
        info!(alert_id = %id, "alert resolved");
        Ok(alert)
    }

    pub async fn pending_alerts(&self) -> Result<Vec<Alert>, StorageError> {
        let keys = objects::list_keys(&self.client, &self.bucket, s3_keys::ALERTS_PREFIX).await?;
        let mut pending = Vec::new();
        for key in &keys {
            let (alert, _): (Alert, String) =
                state::load_json(&self.client, &self.bucket, key).await?;
            if alert.status == AlertStatus::Pending {
                pending.push(alert);
            }
        }
        pending.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(pending)
    }

    async fn fetch_recent(
        &self,
        patient_id: Uuid,
        before: jiff::Timestamp,
        limit: usize,
    ) -> Result<Vec<HistoricalReading>, StorageError> {
        let prefix = s3_keys::patient_readings_prefix(patient_id);
        let keys = objects::list_keys(&self.client, &self.bucket, &prefix).await?;
        let selected = select_prior_keys(&keys, &prefix, before, limit);

        let mut readings = Vec::with_capacity(selected.len());
        for key in selected {
            let (reading, _): (Reading, String) =
                state::load_json(&self.client, &self.bucket, key).await?;
            readings.push(reading.to_historical());
        }
        Ok(readings)
    }
}

/// What to do when a different assessment is already stored for a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingAssessment {
    /// The reading object exists, so the stored assessment is final.
    Final,
    /// The reading object is missing: an earlier record stopped before its
    /// last write and the stored assessment can be replaced.
    Interrupted,
}

/// The reading object is written last, so its presence marks a record as
/// complete.
pub fn resolve_existing_assessment(reading_committed: bool) -> ExistingAssessment {
    if reading_committed {
        ExistingAssessment::Final
    } else {
        ExistingAssessment::Interrupted
    }
}

/// From an ascending listing of reading keys, pick the newest `limit` keys
/// recorded strictly before `before`, newest first.
pub fn select_prior_keys<'a>(
    keys: &'a [String],
    prefix: &str,
    before: jiff::Timestamp,
    limit: usize,
) -> Vec<&'a str> {
    let cutoff = s3_keys::reading_sort_key(before);
    let mut prior: Vec<&str> = keys
        .iter()
        .map(String::as_str)
        .filter(|key| {
            key.strip_prefix(prefix)
                .and_then(|name| name.split_once('-'))
                .is_some_and(|(sort_key, _)| sort_key < cutoff.as_str())
        })
        .collect();
    prior.sort_unstable();
    prior.into_iter().rev().take(limit).collect()
}

impl ReadingHistory for S3ReadingStore {
    fn recent_readings(
        &self,
        patient_id: Uuid,
        before: jiff::Timestamp,
        limit: usize,
    ) -> BoxFuture<'_, Result<Vec<HistoricalReading>, StoreError>> {
        Box::pin(async move {
            self.fetch_recent(patient_id, before, limit)
                .await
                .map_err(StoreError::from)
        })
    }
}

impl AssessmentSink for S3ReadingStore {
    fn record<'a>(
        &'a self,
        reading: &'a Reading,
        outcome: &'a AssessmentOutcome,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        // The reading goes last: history only lists reading objects, so a
        // reading counts toward later trends once its outcome is stored.
        Box::pin(async move {
            self.put_outcome(reading, outcome).await?;
            self.put_reading(reading).await?;
            Ok(())
        })
    }
}
