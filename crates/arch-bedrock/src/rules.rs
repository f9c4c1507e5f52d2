//! Deterministic advice keyed on the glucose band alone.

use arch_core::models::reading::GlucoseMgDl;

pub const LOW_GLUCOSE_ADVICE: &str = "Low blood sugar detected. Take 15g of fast-acting \
carbohydrate (3 teaspoons of sugar or honey). Rest for 15 minutes and test again. If symptoms \
persist, seek medical care immediately.";

pub const VERY_HIGH_GLUCOSE_ADVICE: &str = "Very high blood sugar. Drink plenty of water and \
take your prescribed medication if a dose was missed. Avoid heavy meals. Contact the clinic \
immediately if you feel very unwell, have difficulty breathing, or are vomiting.";

pub const HIGH_GLUCOSE_ADVICE: &str = "Blood sugar is high. Reduce portion sizes and choose \
boiled yam or beans instead of fufu. Take a 20-minute walk. Make sure you take your medication \
as prescribed and drink water regularly.";

pub const IN_RANGE_ADVICE: &str = "Good reading! Keep your current diet and medication routine. \
Continue eating balanced meals with vegetables, lean protein, and whole grains, and keep up \
regular physical activity.";

/// Unlike scoring, the bands here are tested from most to least severe, so
/// readings above 250 mg/dL get the urgent guidance.
pub fn rule_based_advice(glucose: GlucoseMgDl) -> &'static str {
    let value = glucose.value();
    if value < 70.0 {
        LOW_GLUCOSE_ADVICE
    } else if value > 250.0 {
        VERY_HIGH_GLUCOSE_ADVICE
    } else if value > 180.0 {
        HIGH_GLUCOSE_ADVICE
    } else {
        IN_RANGE_ADVICE
    }
}
