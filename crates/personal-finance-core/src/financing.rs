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

/// Amortization system for a property loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmortizationSystem {
    /// Constant amortization, declining installments.
    Sac,
    /// Level installments (French system).
    Price,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancingInput {
    pub property_value: Money,
    pub down_payment: Money,
    /// Annual interest in percentage points (9.5 = 9.5% p.a.).
    pub annual_interest_pct: Percent,
    pub installments: u32,
    pub system: AmortizationSystem,
    pub household_income: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancingOutput {
    pub financed_amount: Money,
    /// Level installment under Price; first (largest) installment under Sac.
    pub first_installment: Money,
    /// Everything paid over the loan's life, down payment included.
    pub total_paid: Money,
    pub total_interest: Money,
    /// Transfer tax, notary and registration costs on acquisition.
    pub acquisition_taxes: Money,
    /// Income needed to keep the installment within the commitment ceiling.
    pub minimum_income_required: Money,
    /// Installment as a share of household income; zero when no income given.
    pub income_commitment_pct: Percent,
}

// ---------------------------------------------------------------------------
// Limits and acquisition taxes
// ---------------------------------------------------------------------------

const MINIMUM_DOWN_PAYMENT_PCT: Percent = dec!(20);
const MAX_INCOME_COMMITMENT_PCT: Percent = dec!(30);
const MINIMUM_ANNUAL_RATE_PCT: Percent = dec!(3);
const MAXIMUM_ANNUAL_RATE_PCT: Percent = dec!(25);

const TRANSFER_TAX_PCT: Percent = dec!(2.0);
const NOTARY_PCT: Percent = dec!(1.0);
const MISC_FEES_PCT: Percent = dec!(0.5);

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
fn compound(rate: Decimal, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    let factor = Decimal::ONE + rate;
    for _ in 0..n {
        result *= factor;
    }
    result
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Simulate a property financing under the chosen amortization system.
pub fn simulate_financing(
    input: &FinancingInput,
) -> PersonalFinanceResult<ComputationOutput<FinancingOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate(input)?;

    let principal = input.property_value - input.down_payment;
    let monthly_rate = input.annual_interest_pct / dec!(100) / dec!(12);
    let n = input.installments;

    let (first_installment, schedule_total) = match input.system {
        AmortizationSystem::Price => {
            let installment = if monthly_rate.is_zero() {
                principal / Decimal::from(n)
            } else {
                let factor = compound(monthly_rate, n);
                principal * (monthly_rate * factor) / (factor - Decimal::ONE)
            };
            (installment, installment * Decimal::from(n))
        }
        AmortizationSystem::Sac => {
            let amortization = principal / Decimal::from(n);
            let mut outstanding = principal;
            let mut total = Decimal::ZERO;
            let mut first = Decimal::ZERO;
            for period in 1..=n {
                let interest = outstanding * monthly_rate;
                let installment = amortization + interest;
                if period == 1 {
                    first = installment;
                }
                total += installment;
                outstanding -= amortization;
            }
            (first, total)
        }
    };

    let total_interest = schedule_total - principal;
    let acquisition_tax_pct = TRANSFER_TAX_PCT + NOTARY_PCT + MISC_FEES_PCT;
    let acquisition_taxes = input.property_value * acquisition_tax_pct / dec!(100);
    let minimum_income_required = first_installment * dec!(100) / MAX_INCOME_COMMITMENT_PCT;

    let income_commitment_pct = match input.household_income {
        Some(income) if income > Decimal::ZERO => first_installment / income * dec!(100),
        _ => Decimal::ZERO,
    };
    if income_commitment_pct > MAX_INCOME_COMMITMENT_PCT {
        warnings.push(format!(
            "Installment commits {}% of household income, above the {}% ceiling.",
            income_commitment_pct.round_dp(1),
            MAX_INCOME_COMMITMENT_PCT
        ));
    }

    let methodology = match input.system {
        AmortizationSystem::Price => "Level-installment (Price) amortization",
        AmortizationSystem::Sac => "Constant-amortization (Sac) schedule, declining installments",
    };

    Ok(with_metadata(
        methodology,
        input,
        warnings,
        start.elapsed().as_micros() as u64,
        FinancingOutput {
            financed_amount: principal,
            first_installment,
            total_paid: schedule_total + input.down_payment,
            total_interest,
            acquisition_taxes,
            minimum_income_required,
            income_commitment_pct,
        },
    ))
}

fn validate(input: &FinancingInput) -> PersonalFinanceResult<()> {
    if input.property_value <= Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "property_value".into(),
            reason: "must be greater than zero".into(),
        });
    }
    if input.down_payment < Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "down_payment".into(),
            reason: "must not be negative".into(),
        });
    }
    if input.down_payment >= input.property_value {
        return Err(PersonalFinanceError::InvalidInput {
            field: "down_payment".into(),
            reason: "must be below the property value".into(),
        });
    }
    let down_payment_pct = input.down_payment / input.property_value * dec!(100);
    if down_payment_pct < MINIMUM_DOWN_PAYMENT_PCT {
        return Err(PersonalFinanceError::InvalidInput {
            field: "down_payment".into(),
            reason: format!(
                "must be at least {}% of the property value",
                MINIMUM_DOWN_PAYMENT_PCT
            ),
        });
    }
    if input.annual_interest_pct < MINIMUM_ANNUAL_RATE_PCT
        || input.annual_interest_pct > MAXIMUM_ANNUAL_RATE_PCT
    {
        return Err(PersonalFinanceError::InvalidInput {
            field: "annual_interest_pct".into(),
            reason: format!(
                "must be between {}% and {}% per year",
                MINIMUM_ANNUAL_RATE_PCT, MAXIMUM_ANNUAL_RATE_PCT
            ),
        });
    }
    if input.installments == 0 {
        return Err(PersonalFinanceError::InvalidInput {
            field: "installments".into(),
            reason: "must be at least 1".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
