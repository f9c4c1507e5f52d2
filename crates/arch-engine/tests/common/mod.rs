#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use arch_bedrock::advice::{AdviceProvider, GenerativeAdvice};
use arch_bedrock::error::BedrockError;
use arch_bedrock::generate::TextGenerator;
use arch_bedrock::prompt::Prompt;
use arch_core::models::reading::{GlucoseMgDl, HistoricalReading, Reading, StressLevel};
use arch_core::store::{ReadingHistory, StoreError};
use uuid::Uuid;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub fn ts(s: &str) -> jiff::Timestamp {
    s.parse().unwrap()
}

pub fn reading(patient: Uuid, glucose: f64, medication_taken: bool, stress: StressLevel, at: &str) -> Reading {
    Reading::new(patient, glucose, medication_taken, stress, ts(at)).unwrap()
}

pub fn prior(glucose: f64, at: &str) -> HistoricalReading {
    HistoricalReading {
        glucose: GlucoseMgDl::new(glucose).unwrap(),
        recorded_at: ts(at),
    }
}

/// History whose backing store is down.
pub struct UnavailableHistory;

impl ReadingHistory for UnavailableHistory {
    fn recent_readings(
        &self,
        _patient_id: Uuid,
        _before: jiff::Timestamp,
        _limit: usize,
    ) -> BoxFuture<'_, Result<Vec<HistoricalReading>, StoreError>> {
        Box::pin(async { Err(StoreError::Unavailable("connection refused".to_string())) })
    }
}

/// Generator that counts how many calls are in flight at once.
#[derive(Default)]
pub struct SlowGenerator {
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl TextGenerator for SlowGenerator {
    fn generate<'a>(&'a self, _prompt: &'a Prompt) -> BoxFuture<'a, Result<String, BedrockError>> {
        Box::pin(async move {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok("Generated advice.".to_string())
        })
    }
}

/// Generator that always fails.
pub struct FailingGenerator;

impl TextGenerator for FailingGenerator {
    fn generate<'a>(&'a self, _prompt: &'a Prompt) -> BoxFuture<'a, Result<String, BedrockError>> {
        Box::pin(async { Err(BedrockError::Invocation("throttled".to_string())) })
    }
}

pub fn generative(generator: Arc<dyn TextGenerator>) -> AdviceProvider {
    AdviceProvider::Generative(GenerativeAdvice::new(generator, Duration::from_secs(5)))
}
