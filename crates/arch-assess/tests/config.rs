use std::collections::HashMap;
use std::time::Duration;

use arch_assess::config::{AssessConfig, DEFAULT_REGION};

fn load(pairs: &[(&str, &str)]) -> eyre::Result<AssessConfig> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AssessConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_to_rule_based_inline_mode() {
    let config = load(&[]).unwrap();
    assert_eq!(config.region, DEFAULT_REGION);
    assert!(config.bucket.is_none());
    assert!(config.advice.model_id.is_none());
    assert_eq!(config.advice.timeout, Duration::from_secs(20));
}

#[test]
fn reads_all_settings() {
    let config = load(&[
        ("AWS_REGION", "eu-west-1"),
        ("ARCH_BUCKET", "arch-readings"),
        ("ARCH_ADVICE_MODEL_ID", "eu.anthropic.claude-haiku"),
        ("ARCH_ADVICE_TIMEOUT_SECS", "8"),
    ])
    .unwrap();
    assert_eq!(config.region, "eu-west-1");
    assert_eq!(config.bucket.as_deref(), Some("arch-readings"));
    assert_eq!(config.advice.model_id.as_deref(), Some("eu.anthropic.claude-haiku"));
    assert_eq!(config.advice.region, "eu-west-1");
    assert_eq!(config.advice.timeout, Duration::from_secs(8));
}

#[test]
fn empty_values_count_as_unset() {
    let config = load(&[("ARCH_BUCKET", ""), ("ARCH_ADVICE_MODEL_ID", "  ")]).unwrap();
    assert!(config.bucket.is_none());
    assert!(config.advice.model_id.is_none());
}

#[test]
fn rejects_bad_timeouts() {
    assert!(load(&[("ARCH_ADVICE_TIMEOUT_SECS", "soon")]).is_err());
    assert!(load(&[("ARCH_ADVICE_TIMEOUT_SECS", "0")]).is_err());
}
