use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AlertType {
    HighRisk,
}

impl AlertType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HighRisk => "high_risk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AlertStatus {
    Pending,
    Resolved,
}

/// A notification raised for a High-tier assessment.
///
/// The engine only ever creates alerts in `Pending`; resolution belongs to
/// whoever works the alert queue.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Alert {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub assessment_id: Uuid,
    pub alert_type: AlertType,
    pub message: String,
    pub status: AlertStatus,
    pub created_at: jiff::Timestamp,
    pub resolved_at: Option<jiff::Timestamp>,
}

impl Alert {
    pub fn pending(
        patient_id: Uuid,
        assessment_id: Uuid,
        alert_type: AlertType,
        message: impl Into<String>,
        created_at: jiff::Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient_id,
            assessment_id,
            alert_type,
            message: message.into(),
            status: AlertStatus::Pending,
            created_at,
            resolved_at: None,
        }
    }

    pub fn resolve(&mut self, at: jiff::Timestamp) -> Result<(), CoreError> {
        if self.status == AlertStatus::Resolved {
            return Err(CoreError::AlertAlreadyResolved(self.id));
        }
        self.status = AlertStatus::Resolved;
        self.resolved_at = Some(at);
        Ok(())
    }
}
