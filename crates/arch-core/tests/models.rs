use arch_core::error::CoreError;
use arch_core::models::alert::{Alert, AlertStatus, AlertType};
use arch_core::models::assessment::RiskTier;
use arch_core::models::reading::{GlucoseMgDl, Reading, StressLevel};
use uuid::Uuid;

fn ts(s: &str) -> jiff::Timestamp {
    s.parse().unwrap()
}

#[test]
fn glucose_rejects_zero_negative_and_non_finite() {
    assert!(matches!(GlucoseMgDl::new(0.0), Err(CoreError::InvalidGlucose(_))));
    assert!(matches!(GlucoseMgDl::new(-12.0), Err(CoreError::InvalidGlucose(_))));
    assert!(GlucoseMgDl::new(f64::NAN).is_err());
    assert!(GlucoseMgDl::new(f64::INFINITY).is_err());
    assert_eq!(GlucoseMgDl::new(95.5).unwrap().value(), 95.5);
}

#[test]
fn reading_new_validates_glucose() {
    let patient = Uuid::new_v4();
    let at = ts("2025-03-01T08:00:00Z");
    assert!(Reading::new(patient, -1.0, true, StressLevel::Low, at).is_err());

    let reading = Reading::new(patient, 120.0, true, StressLevel::Low, at)
        .unwrap()
        .with_symptoms("dizziness")
        .recorded_by("chv_demo");
    assert_eq!(reading.symptoms.as_deref(), Some("dizziness"));
    assert_eq!(reading.recorded_by.as_deref(), Some("chv_demo"));
    assert_eq!(reading.to_historical().glucose.value(), 120.0);
}

#[test]
fn stress_level_parses_leniently() {
    assert_eq!("Very High".parse::<StressLevel>().unwrap(), StressLevel::VeryHigh);
    assert_eq!("very_high".parse::<StressLevel>().unwrap(), StressLevel::VeryHigh);
    assert_eq!(" medium ".parse::<StressLevel>().unwrap(), StressLevel::Medium);
    assert!(matches!(
        "extreme".parse::<StressLevel>(),
        Err(CoreError::InvalidStressLevel(_))
    ));
}

#[test]
fn stress_level_elevation() {
    assert!(!StressLevel::Low.is_elevated());
    assert!(!StressLevel::Medium.is_elevated());
    assert!(StressLevel::High.is_elevated());
    assert!(StressLevel::VeryHigh.is_elevated());
}

#[test]
fn reading_json_rejects_bad_glucose() {
    let json = serde_json::json!({
        "id": Uuid::new_v4(),
        "patient_id": Uuid::new_v4(),
        "glucose": -5.0,
        "medication_taken": true,
        "stress_level": "Low",
        "recorded_at": "2025-03-01T08:00:00Z",
    });
    assert!(serde_json::from_value::<Reading>(json).is_err());
}

#[test]
fn reading_json_uses_display_stress_names() {
    let json = serde_json::json!({
        "id": Uuid::new_v4(),
        "patient_id": Uuid::new_v4(),
        "glucose": 210.0,
        "medication_taken": false,
        "stress_level": "Very High",
        "recorded_at": "2025-03-01T08:00:00Z",
    });
    let reading: Reading = serde_json::from_value(json).unwrap();
    assert_eq!(reading.stress_level, StressLevel::VeryHigh);
    assert!(reading.symptoms.is_none());
}

#[test]
fn reading_json_requires_medication_flag() {
    let json = serde_json::json!({
        "id": Uuid::new_v4(),
        "patient_id": Uuid::new_v4(),
        "glucose": 110.0,
        "stress_level": "Low",
        "recorded_at": "2025-03-01T08:00:00Z",
    });
    assert!(serde_json::from_value::<Reading>(json).is_err());
}

#[test]
fn risk_tier_displays_capitalized() {
    assert_eq!(RiskTier::High.to_string(), "High");
    assert_eq!(serde_json::to_value(RiskTier::Medium).unwrap(), "Medium");
    assert_eq!(
        serde_json::from_value::<RiskTier>(serde_json::json!("High")).unwrap(),
        RiskTier::High
    );
}

#[test]
fn reading_json_accepts_loose_stress_spellings() {
    for (raw, expected) in [
        ("very_high", StressLevel::VeryHigh),
        ("very high", StressLevel::VeryHigh),
        ("high", StressLevel::High),
        (" Medium ", StressLevel::Medium),
    ] {
        let json = serde_json::json!({
            "id": Uuid::new_v4(),
            "patient_id": Uuid::new_v4(),
            "glucose": 140.0,
            "medication_taken": true,
            "stress_level": raw,
            "recorded_at": "2025-03-01T08:00:00Z",
        });
        let reading: Reading = serde_json::from_value(json).unwrap();
        assert_eq!(reading.stress_level, expected, "{raw:?}");
    }
}

#[test]
fn reading_json_rejects_unknown_stress() {
    let json = serde_json::json!({
        "id": Uuid::new_v4(),
        "patient_id": Uuid::new_v4(),
        "glucose": 140.0,
        "medication_taken": true,
        "stress_level": "extreme",
        "recorded_at": "2025-03-01T08:00:00Z",
    });
    assert!(serde_json::from_value::<Reading>(json).is_err());
}

#[test]
fn stress_serializes_as_display_name() {
    assert_eq!(serde_json::to_value(StressLevel::VeryHigh).unwrap(), "Very High");
}

#[test]
fn alert_resolves_once() {
    let mut alert = Alert::pending(
        Uuid::new_v4(),
        Uuid::new_v4(),
        AlertType::HighRisk,
        "High-risk patient detected. Glucose: 300 mg/dL",
        ts("2025-03-01T08:00:00Z"),
    );
    assert_eq!(alert.status, AlertStatus::Pending);
    assert_eq!(serde_json::to_value(alert.alert_type).unwrap(), "high_risk");

    let resolved_at = ts("2025-03-02T09:30:00Z");
    alert.resolve(resolved_at).unwrap();
    assert_eq!(alert.status, AlertStatus::Resolved);
    assert_eq!(alert.resolved_at, Some(resolved_at));

    assert!(matches!(
        alert.resolve(resolved_at),
        Err(CoreError::AlertAlreadyResolved(id)) if id == alert.id
    ));
}
