use arch_bedrock::advice::AdviceProvider;
use arch_bedrock::prompt::AdviceRequest;
use arch_core::models::alert::Alert;
use arch_core::models::assessment::{AssessmentOutcome, RiskAssessment};
use arch_core::models::reading::Reading;
use arch_core::store::{AssessmentSink, ReadingHistory, TREND_WINDOW};
use arch_risk::scoring::{self, ScoreInput};
use arch_risk::{alert, trend};
use tracing::info;
use uuid::Uuid;

use crate::error::AssessError;
use crate::locks::PatientLocks;

/// Runs assessments. Cheap to share behind an `Arc`; holds no per-reading
/// state.
pub struct Assessor {
    advice: AdviceProvider,
    locks: PatientLocks,
}

impl Assessor {
    pub fn new(advice: AdviceProvider) -> Self {
        Self {
            advice,
            locks: PatientLocks::new(),
        }
    }

    pub fn locks(&self) -> &PatientLocks {
        &self.locks
    }

    /// Assess a reading against the patient's prior readings.
    ///
    /// Either a full outcome is returned or nothing is: a history failure
    /// aborts, while advice failures are absorbed by the provider.
    pub async fn assess(
        &self,
        reading: &Reading,
        history: &dyn ReadingHistory,
    ) -> Result<AssessmentOutcome, AssessError> {
        let _patient = self.locks.acquire(reading.patient_id).await;
        self.evaluate(reading, history).await
    }

    /// Assess a reading and hand the result to `store` before releasing the
    /// patient, so the next assessment for the same patient sees this reading
    /// in its history.
    pub async fn assess_and_record<S>(
        &self,
        reading: &Reading,
        store: &S,
    ) -> Result<AssessmentOutcome, AssessError>
    where
        S: ReadingHistory + AssessmentSink,
    {
        let _patient = self.locks.acquire(reading.patient_id).await;
        let outcome = self.evaluate(reading, store).await?;
        store
            .record(reading, &outcome)
            .await
            .map_err(AssessError::Record)?;
        Ok(outcome)
    }

    async fn evaluate(
        &self,
        reading: &Reading,
        history: &dyn ReadingHistory,
    ) -> Result<AssessmentOutcome, AssessError> {
        let prior = history
            .recent_readings(reading.patient_id, reading.recorded_at, TREND_WINDOW)
            .await
            .map_err(AssessError::History)?;
        let trend = trend::analyze(&prior);

        let risk = scoring::score(&ScoreInput {
            glucose: reading.glucose,
            medication_taken: reading.medication_taken,
            stress_level: reading.stress_level,
            trend,
        });

        let advice = self
            .advice
            .advise(&AdviceRequest {
                glucose: reading.glucose,
                medication_taken: reading.medication_taken,
                stress_level: reading.stress_level,
                symptoms: reading.symptoms.as_deref(),
                tier: risk.tier,
            })
            .await;

        let created_at = jiff::Timestamp::now();
        let assessment = RiskAssessment {
            id: Uuid::new_v4(),
            reading_id: reading.id,
            patient_id: reading.patient_id,
            tier: risk.tier,
            score: risk.score,
            advice: advice.text,
            advice_source: advice.source,
            warnings: risk.warning_messages(),
            referral_recommended: risk.referral_recommended,
            created_at,
        };

        let alert = alert::decide(risk.tier, reading.glucose).map(|draft| {
            Alert::pending(
                reading.patient_id,
                assessment.id,
                draft.alert_type,
                draft.message,
                created_at,
            )
        });

        info!(
            patient_id = %reading.patient_id,
            reading_id = %reading.id,
            prior_readings = prior.len(),
            persistently_high = trend.persistently_high,
            score = assessment.score,
            tier = %assessment.tier,
            advice_source = ?assessment.advice_source,
            alert = alert.is_some(),
            "reading assessed"
        );

        Ok(AssessmentOutcome { assessment, alert })
    }
}
