use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::regimes::contractor::{Activity, TaxCategory};
use crate::types::Percent;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    Recommended,
    Neutral,
    NotRecommended,
}

/// Risk-weighted verdict on switching from payroll to contracting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Break-even advantage the switch should clear, in percentage
    /// points. Always within [15, 40].
    pub minimum_advantage_pct: Percent,
    pub risk_level: RiskLevel,
    pub status: DecisionStatus,
    pub headline: String,
    pub justification: String,
}

// ---------------------------------------------------------------------------
// Threshold rules
// ---------------------------------------------------------------------------

const THRESHOLD_FLOOR: Percent = dec!(15);
const THRESHOLD_CAP: Percent = dec!(40);
/// Margin above the threshold that moves the verdict from neutral to
/// recommended.
const SAFETY_MARGIN: Percent = dec!(10);

/// Base minimum advantage by declared activity. More volatile markets
/// demand a larger cushion before the switch pays off.
fn activity_threshold(activity: Activity) -> Percent {
    match activity {
        Activity::InformationTechnology => dec!(20),
        Activity::Consulting => dec!(25),
        Activity::DesignMarketing => dec!(30),
        Activity::Engineering => dec!(25),
        Activity::Education => dec!(35),
        Activity::OtherServices => dec!(30),
    }
}

/// Categorical adjustment for the administrative burden of the chosen
/// tax category.
fn category_offset(category: TaxCategory) -> Percent {
    match category {
        TaxCategory::MicroEntity => dec!(-5),
        TaxCategory::Simplified => dec!(0),
        TaxCategory::PresumedProfit => dec!(5),
    }
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Classify the annual advantage percentage into a terminal decision.
/// Pure: no state survives between invocations.
pub fn classify(
    annual_advantage_pct: Percent,
    activity: Activity,
    category: TaxCategory,
) -> Recommendation {
    let minimum = (activity_threshold(activity) + category_offset(category))
        .clamp(THRESHOLD_FLOOR, THRESHOLD_CAP);

    let advantage =
        annual_advantage_pct.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);

    let (risk_level, status, headline, justification) = if annual_advantage_pct
        >= minimum + SAFETY_MARGIN
    {
        (
            RiskLevel::Low,
            DecisionStatus::Recommended,
            "Switch to contracting recommended".to_string(),
            format!(
                "The {advantage}% advantage is well above the recommended minimum of {minimum}%, leaving a comfortable safety margin."
            ),
        )
    } else if annual_advantage_pct >= minimum {
        (
            RiskLevel::Medium,
            DecisionStatus::Neutral,
            "Switch possible, but weigh it carefully".to_string(),
            format!(
                "The {advantage}% advantage meets the {minimum}% minimum with little margin to spare. Consider your risk tolerance."
            ),
        )
    } else if annual_advantage_pct >= Decimal::ZERO {
        (
            RiskLevel::High,
            DecisionStatus::NotRecommended,
            "Switch not recommended".to_string(),
            format!(
                "The {advantage}% advantage is below the recommended minimum of {minimum}%. The risks outweigh the benefits."
            ),
        )
    } else {
        (
            RiskLevel::High,
            DecisionStatus::NotRecommended,
            "Payroll employment is clearly better".to_string(),
            format!(
                "Contracting yields {}% LESS than payroll employment. Keep the current regime.",
                advantage.abs()
            ),
        )
    };

    Recommendation {
        minimum_advantage_pct: minimum,
        risk_level,
        status,
        headline,
        justification,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
