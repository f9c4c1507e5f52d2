use arch_core::models::alert::AlertType;
use arch_core::models::assessment::RiskTier;
use arch_core::models::reading::GlucoseMgDl;

/// What the alert policy decided to emit, before it is bound to an
/// assessment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDraft {
    pub alert_type: AlertType,
    pub message: String,
}

/// Alert on High tier only, whatever the score magnitude.
pub fn decide(tier: RiskTier, glucose: GlucoseMgDl) -> Option<AlertDraft> {
    if tier != RiskTier::High {
        return None;
    }
    Some(AlertDraft {
        alert_type: AlertType::HighRisk,
        message: format!("High-risk patient detected. Glucose: {glucose} mg/dL"),
    })
}
