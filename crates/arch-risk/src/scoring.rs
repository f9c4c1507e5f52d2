use std::fmt;

use arch_core::models::assessment::RiskTier;
use arch_core::models::reading::{GlucoseMgDl, StressLevel};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::trend::TrendSignal;

pub const HYPOGLYCEMIA_BELOW: f64 = 70.0;
pub const HYPERGLYCEMIA_ABOVE: f64 = 180.0;
pub const SEVERE_HYPERGLYCEMIA_ABOVE: f64 = 250.0;

pub const HIGH_TIER_MIN_SCORE: u32 = 70;
pub const MEDIUM_TIER_MIN_SCORE: u32 = 40;

/// A warning flag raised by a scoring rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Warning {
    Hypoglycemia,
    Hyperglycemia,
    SevereHyperglycemia,
    MedicationNotTaken,
    ConsistentlyHigh,
}

impl Warning {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hypoglycemia => "Hypoglycemia detected",
            Self::Hyperglycemia => "Hyperglycemia detected",
            Self::SevereHyperglycemia => "Severe hyperglycemia",
            Self::MedicationNotTaken => "Medication not taken",
            Self::ConsistentlyHigh => "Consistently high readings",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The scoring inputs taken from the current reading plus the trend.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInput {
    pub glucose: GlucoseMgDl,
    pub medication_taken: bool,
    pub stress_level: StressLevel,
    pub trend: TrendSignal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskScore {
    pub score: u32,
    pub tier: RiskTier,
    /// Warnings in the order their rules fired.
    pub warnings: Vec<Warning>,
    pub referral_recommended: bool,
}

impl RiskScore {
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(|w| w.as_str().to_string()).collect()
    }
}

/// Score a reading. Every applicable rule adds to the total.
///
/// The glucose bands form one exclusive chain tested as `< 70`, then `> 180`,
/// then `> 250`. Because `> 180` is open-ended and tested first, the severe
/// band can never fire: anything above 250 scores as ordinary
/// hyperglycemia (+30).
pub fn score(input: &ScoreInput) -> RiskScore {
    let glucose = input.glucose.value();
    let mut total = 0;
    let mut warnings = Vec::new();

    if glucose < HYPOGLYCEMIA_BELOW {
        total += 40;
        warnings.push(Warning::Hypoglycemia);
    } else if glucose > HYPERGLYCEMIA_ABOVE {
        total += 30;
        warnings.push(Warning::Hyperglycemia);
    } else if glucose > SEVERE_HYPERGLYCEMIA_ABOVE {
        total += 50;
        warnings.push(Warning::SevereHyperglycemia);
    }

    if !input.medication_taken {
        total += 20;
        warnings.push(Warning::MedicationNotTaken);
    }

    if input.stress_level.is_elevated() {
        total += 15;
    }

    if input.trend.persistently_high {
        total += 25;
        warnings.push(Warning::ConsistentlyHigh);
    }

    let tier = tier_for(total);
    RiskScore {
        score: total,
        tier,
        warnings,
        referral_recommended: tier == RiskTier::High,
    }
}

pub fn tier_for(score: u32) -> RiskTier {
    if score >= HIGH_TIER_MIN_SCORE {
        RiskTier::High
    } else if score >= MEDIUM_TIER_MIN_SCORE {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}
