use std::env;

use arch_assess::config::AssessConfig;
use arch_assess::stream::{self, Backend};
use arch_bedrock::advice::AdviceProvider;
use arch_engine::assessor::Assessor;
use arch_storage::readings::S3ReadingStore;
use tokio::io::{AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging on stderr; stdout carries results only.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AssessConfig::from_env()?;
    let args: Vec<String> = env::args().skip(1).collect();

    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] | ["assess"] => assess(&config).await,
        ["pending-alerts"] => pending_alerts(&config).await,
        ["resolve-alert", id] => resolve_alert(&config, id).await,
        _ => Err(eyre::eyre!(
            "usage: arch-assess [assess | pending-alerts | resolve-alert <alert-id>]"
        )),
    }
}

async fn assess(config: &AssessConfig) -> eyre::Result<()> {
    let advice = AdviceProvider::from_config(&config.advice).await;
    let assessor = Assessor::new(advice);

    let backend = match &config.bucket {
        Some(bucket) => {
            tracing::info!(bucket = %bucket, "reading history from S3");
            Backend::S3(build_store(config, bucket).await)
        }
        None => {
            tracing::info!("no bucket configured, using inline history");
            Backend::Inline
        }
    };

    let input = BufReader::new(tokio::io::stdin());
    let summary = stream::run(&assessor, &backend, input, tokio::io::stdout()).await?;
    if summary.all_failed() {
        return Err(eyre::eyre!("all {} requests failed", summary.failed));
    }
    if summary.failed > 0 {
        tracing::warn!(failed = summary.failed, "some requests failed");
    }
    Ok(())
}

async fn pending_alerts(config: &AssessConfig) -> eyre::Result<()> {
    let store = require_store(config).await?;
    let alerts = store.pending_alerts().await?;
    let mut stdout = tokio::io::stdout();
    for alert in &alerts {
        let mut line = serde_json::to_vec(alert)?;
        line.push(b'\n');
        stdout.write_all(&line).await?;
    }
    stdout.flush().await?;
    Ok(())
}

async fn resolve_alert(config: &AssessConfig, id: &str) -> eyre::Result<()> {
    let id: Uuid = id
        .parse()
        .map_err(|e| eyre::eyre!("invalid alert id {id:?}: {e}"))?;
    let store = require_store(config).await?;
    let alert = store.resolve_alert(id, jiff::Timestamp::now()).await?;
    let mut line = serde_json::to_vec(&alert)?;
    line.push(b'\n');
    let mut stdout = tokio::io::stdout();
    stdout.write_all(&line).await?;
    stdout.flush().await?;
    Ok(())
}

async fn require_store(config: &AssessConfig) -> eyre::Result<S3ReadingStore> {
    let bucket = config
        .bucket
        .as_deref()
        .ok_or_else(|| eyre::eyre!("ARCH_BUCKET must be set for alert commands"))?;
    Ok(build_store(config, bucket).await)
}

async fn build_store(config: &AssessConfig, bucket: &str) -> S3ReadingStore {
    let client = arch_storage::client::build_client_with_region(&config.region).await;
    S3ReadingStore::new(client, bucket)
}
