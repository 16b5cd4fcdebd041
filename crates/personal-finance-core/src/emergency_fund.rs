use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PersonalFinanceError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::PersonalFinanceResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyFundInput {
    pub essential_monthly_expenses: Money,
    pub amount_saved: Money,
    /// Months of expenses the fund should cover.
    pub target_months: u32,
    /// How much can be set aside each month.
    pub monthly_saving: Money,
}

/// How far along the fund is, classified by progress percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingStatus {
    Insufficient,
    Partial,
    Adequate,
    Excellent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyFundOutput {
    pub target_amount: Money,
    pub remaining_amount: Money,
    /// Whole months until the target is reached at the current saving
    /// pace; zero when complete or when there is no saving capacity.
    pub months_to_complete: u32,
    pub progress_pct: Percent,
    /// Suggested monthly set-aside: 20% of essential expenses.
    pub recommended_monthly_saving: Money,
    pub status: FundingStatus,
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

const MINIMUM_TARGET_MONTHS: u32 = 3;
const MAXIMUM_TARGET_MONTHS: u32 = 24;
const RECOMMENDED_SAVING_RATE: Decimal = dec!(0.20);

const INSUFFICIENT_BELOW_PCT: Percent = dec!(25);
const PARTIAL_BELOW_PCT: Percent = dec!(75);
const ADEQUATE_BELOW_PCT: Percent = dec!(100);

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Plan an emergency fund: target, gap, time to completion and a
/// funding-status classification.
pub fn plan_emergency_fund(
    input: &EmergencyFundInput,
) -> PersonalFinanceResult<ComputationOutput<EmergencyFundOutput>> {
    let start = Instant::now();

    validate(input)?;

    let target_amount = input.essential_monthly_expenses * Decimal::from(input.target_months);
    let remaining_amount = (target_amount - input.amount_saved).max(Decimal::ZERO);
    let progress_pct = if target_amount > Decimal::ZERO {
        input.amount_saved / target_amount * dec!(100)
    } else {
        Decimal::ZERO
    };

    let months_to_complete = if remaining_amount > Decimal::ZERO && input.monthly_saving > Decimal::ZERO
    {
        (remaining_amount / input.monthly_saving)
            .ceil()
            .to_u32()
            .unwrap_or(u32::MAX)
    } else {
        0
    };

    let recommended_monthly_saving = input.essential_monthly_expenses * RECOMMENDED_SAVING_RATE;
    let status = classify_progress(progress_pct);

    Ok(with_metadata(
        "Target of N months of essential expenses; completion paced by \
         declared monthly saving capacity",
        input,
        Vec::new(),
        start.elapsed().as_micros() as u64,
        EmergencyFundOutput {
            target_amount,
            remaining_amount,
            months_to_complete,
            progress_pct,
            recommended_monthly_saving,
            status,
        },
    ))
}

fn classify_progress(progress_pct: Percent) -> FundingStatus {
    if progress_pct < INSUFFICIENT_BELOW_PCT {
        FundingStatus::Insufficient
    } else if progress_pct < PARTIAL_BELOW_PCT {
        FundingStatus::Partial
    } else if progress_pct < ADEQUATE_BELOW_PCT {
        FundingStatus::Adequate
    } else {
        FundingStatus::Excellent
    }
}

fn validate(input: &EmergencyFundInput) -> PersonalFinanceResult<()> {
    if input.essential_monthly_expenses <= Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "essential_monthly_expenses".into(),
            reason: "must be greater than zero".into(),
        });
    }
    if input.amount_saved < Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "amount_saved".into(),
            reason: "must not be negative".into(),
        });
    }
    if input.target_months < MINIMUM_TARGET_MONTHS || input.target_months > MAXIMUM_TARGET_MONTHS {
        return Err(PersonalFinanceError::InvalidInput {
            field: "target_months".into(),
            reason: format!(
                "must be between {} and {} months",
                MINIMUM_TARGET_MONTHS, MAXIMUM_TARGET_MONTHS
            ),
        });
    }
    if input.monthly_saving < Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "monthly_saving".into(),
            reason: "must not be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
