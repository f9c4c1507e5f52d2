//! Prompt assembly for generative advice.

use arch_core::models::assessment::RiskTier;
use arch_core::models::reading::{GlucoseMgDl, StressLevel};

pub const SYSTEM_PROMPT: &str = "You are a healthcare AI assistant supporting community health \
workers who manage diabetes patients in rural Cameroon. Give personalized, practical advice \
that is culturally relevant and concise.";

/// The reading fields and risk tier advice is generated for.
#[derive(Debug, Clone, Copy)]
pub struct AdviceRequest<'a> {
    pub glucose: GlucoseMgDl,
    pub medication_taken: bool,
    pub stress_level: StressLevel,
    pub symptoms: Option<&'a str>,
    pub tier: RiskTier,
}

/// A system prompt plus the user turn sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

pub fn build_prompt(request: &AdviceRequest<'_>) -> Prompt {
    let medication = if request.medication_taken { "Yes" } else { "No" };
    let symptoms = request
        .symptoms
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("None reported");

    let user = format!(
        "Patient Data:\n\
         - Glucose Level: {glucose} mg/dL\n\
         - Medication Taken: {medication}\n\
         - Stress Level: {stress}\n\
         - Symptoms: {symptoms}\n\
         - Risk Level: {tier}\n\
         \n\
         Provide:\n\
         1. Immediate actions (1-2 sentences)\n\
         2. Dietary recommendations using local foods (fufu, yam, beans, plantain, etc.)\n\
         3. Lifestyle advice\n\
         4. When to seek urgent care\n",
        glucose = request.glucose,
        stress = request.stress_level,
        tier = request.tier,
    );

    Prompt {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}
