use arch_core::models::alert::AlertType;
use arch_core::models::assessment::RiskTier;
use arch_core::models::reading::GlucoseMgDl;
use arch_risk::alert::decide;

#[test]
fn only_high_tier_alerts() {
    let glucose = GlucoseMgDl::new(300.0).unwrap();
    assert!(decide(RiskTier::Low, glucose).is_none());
    assert!(decide(RiskTier::Medium, glucose).is_none());

    let draft = decide(RiskTier::High, glucose).unwrap();
    assert_eq!(draft.alert_type, AlertType::HighRisk);
    assert_eq!(draft.message, "High-risk patient detected. Glucose: 300 mg/dL");
}

#[test]
fn message_keeps_fractional_glucose() {
    let draft = decide(RiskTier::High, GlucoseMgDl::new(65.5).unwrap()).unwrap();
    assert_eq!(draft.message, "High-risk patient detected. Glucose: 65.5 mg/dL");
}
