use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::alert::Alert;

/// Discrete risk classification derived from the numeric score. Serialized
/// as the display name (`"High"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which strategy produced the advisory text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AdviceSource {
    Generative,
    RuleBased,
}

/// The risk assessment computed for exactly one reading.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskAssessment {
    pub id: Uuid,
    pub reading_id: Uuid,
    pub patient_id: Uuid,
    pub tier: RiskTier,
    pub score: u32,
    pub advice: String,
    pub advice_source: AdviceSource,
    pub warnings: Vec<String>,
    pub referral_recommended: bool,
    pub created_at: jiff::Timestamp,
}

/// What one assessment run produces: the assessment and, for High tier, the
/// alert raised from it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentOutcome {
    pub assessment: RiskAssessment,
    pub alert: Option<Alert>,
}
