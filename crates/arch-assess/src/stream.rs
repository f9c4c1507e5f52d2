use arch_core::models::assessment::AssessmentOutcome;
use arch_core::models::reading::{HistoricalReading, Reading};
use arch_core::store::InMemoryStore;
use arch_engine::assessor::Assessor;
use arch_storage::readings::S3ReadingStore;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

/// Where prior readings come from.
pub enum Backend {
    /// History travels with each request; nothing is persisted.
    Inline,
    /// History is read from S3 and every outcome is written back.
    S3(S3ReadingStore),
}

#[derive(Debug, Deserialize)]
pub struct AssessRequest {
    pub reading: Reading,
    #[serde(default)]
    pub history: Vec<HistoricalReading>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AssessResponse {
    Assessed(AssessmentOutcome),
    Failed { error: String },
}

/// Totals for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub assessed: usize,
    pub failed: usize,
}

impl RunSummary {
    /// At least one request came in and none was assessed.
    pub fn all_failed(&self) -> bool {
        self.failed > 0 && self.assessed == 0
    }
}

pub async fn run<R, W>(
    assessor: &Assessor,
    backend: &Backend,
    input: R,
    mut output: W,
) -> eyre::Result<RunSummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut summary = RunSummary::default();
    let mut lines = input.lines();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }

        let response = match handle_line(assessor, backend, &line).await {
            Ok(outcome) => {
                summary.assessed += 1;
                AssessResponse::Assessed(outcome)
            }
            Err(e) => {
                summary.failed += 1;
                warn!(line = line_no, error = %e, "request failed");
                AssessResponse::Failed {
                    error: format!("line {line_no}: {e}"),
                }
            }
        };

        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        output.write_all(&encoded).await?;
    }
    output.flush().await?;

    info!(assessed = summary.assessed, failed = summary.failed, "run complete");
    Ok(summary)
}

async fn handle_line(
    assessor: &Assessor,
    backend: &Backend,
    line: &str,
) -> eyre::Result<AssessmentOutcome> {
    let request: AssessRequest = serde_json::from_str(line)?;
    let outcome = match backend {
        Backend::Inline => {
            let history = InMemoryStore::from_readings(request.reading.patient_id, request.history);
            assessor.assess(&request.reading, &history).await?
        }
        Backend::S3(store) => {
            if !request.history.is_empty() {
                warn!("ignoring inline history, reading history from S3");
            }
            assessor.assess_and_record(&request.reading, store).await?
        }
    };
    Ok(outcome)
}
