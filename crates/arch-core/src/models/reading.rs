use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

/// A blood glucose concentration in mg/dL.
///
/// Always finite and strictly positive. Deserialization goes through
/// [`GlucoseMgDl::new`], so a malformed value never reaches scoring.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, TS)]
#[ts(export)]
pub struct GlucoseMgDl(f64);

impl GlucoseMgDl {
    pub fn new(value: f64) -> Result<Self, CoreError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidGlucose(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for GlucoseMgDl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for GlucoseMgDl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        GlucoseMgDl::new(value).map_err(serde::de::Error::custom)
    }
}

/// Self-reported stress, ordered from least to most severe.
///
/// Serializes as the display name. Deserialization goes through
/// [`FromStr`], so `"high"` and `"very_high"` are accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export)]
pub enum StressLevel {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl StressLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }

    /// `High` and `Very High` both count as elevated stress.
    pub fn is_elevated(self) -> bool {
        self >= Self::High
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StressLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "very high" => Ok(Self::VeryHigh),
            _ => Err(CoreError::InvalidStressLevel(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for StressLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One glucose measurement event recorded by a community health worker.
///
/// Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Reading {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub glucose: GlucoseMgDl,
    pub medication_taken: bool,
    pub stress_level: StressLevel,
    #[serde(default)]
    pub food_availability: Option<String>,
    #[serde(default)]
    pub diet_description: Option<String>,
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub recorded_by: Option<String>,
    pub recorded_at: jiff::Timestamp,
}

impl Reading {
    pub fn new(
        patient_id: Uuid,
        glucose: f64,
        medication_taken: bool,
        stress_level: StressLevel,
        recorded_at: jiff::Timestamp,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            id: Uuid::new_v4(),
            patient_id,
            glucose: GlucoseMgDl::new(glucose)?,
            medication_taken,
            stress_level,
            food_availability: None,
            diet_description: None,
            symptoms: None,
            notes: None,
            recorded_by: None,
            recorded_at,
        })
    }

    pub fn with_symptoms(mut self, symptoms: impl Into<String>) -> Self {
        self.symptoms = Some(symptoms.into());
        self
    }

    pub fn with_diet(mut self, diet_description: impl Into<String>) -> Self {
        self.diet_description = Some(diet_description.into());
        self
    }

    pub fn with_food_availability(mut self, food_availability: impl Into<String>) -> Self {
        self.food_availability = Some(food_availability.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn recorded_by(mut self, worker: impl Into<String>) -> Self {
        self.recorded_by = Some(worker.into());
        self
    }

    /// The slice of this reading that later trend analysis looks at.
    pub fn to_historical(&self) -> HistoricalReading {
        HistoricalReading {
            glucose: self.glucose,
            recorded_at: self.recorded_at,
        }
    }
}

/// A prior reading as returned by a history fetch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HistoricalReading {
    pub glucose: GlucoseMgDl,
    pub recorded_at: jiff::Timestamp,
}
