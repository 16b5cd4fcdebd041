use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PersonalFinanceError;
use crate::regimes::contractor::{self, ContractorBreakdown, ContractorInput, TaxCategory};
use crate::regimes::payroll::{self, PayrollBreakdown, PayrollInput};
use crate::regimes::recommendation::{self, Recommendation};
use crate::tables;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::PersonalFinanceResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    Payroll,
    Contractor,
}

/// Signed differences between the regimes, contractor minus payroll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimeDelta {
    pub monthly_difference: Money,
    pub annual_difference: Money,
    pub monthly_difference_pct: Percent,
    pub annual_difference_pct: Percent,
    pub monthly_winner: Regime,
    pub annual_winner: Regime,
}

/// Full comparison: both breakdowns, the delta block, and the verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutput {
    pub payroll: PayrollBreakdown,
    pub contractor: ContractorBreakdown,
    pub delta: RegimeDelta,
    pub recommendation: Recommendation,
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Deltas and nominal winners at each granularity. Ties resolve to the
/// contractor regime; the percentage of a zero payroll base is zero.
pub fn compare(payroll: &PayrollBreakdown, contractor: &ContractorBreakdown) -> RegimeDelta {
    let monthly_difference = contractor.net_monthly_income - payroll.net_monthly_income;
    let annual_difference = contractor.net_annual_income - payroll.net_annual_income;

    let monthly_difference_pct = percentage_of(monthly_difference, payroll.net_monthly_income);
    let annual_difference_pct = percentage_of(annual_difference, payroll.net_annual_income);

    RegimeDelta {
        monthly_difference,
        annual_difference,
        monthly_difference_pct,
        annual_difference_pct,
        monthly_winner: winner(monthly_difference),
        annual_winner: winner(annual_difference),
    }
}

fn percentage_of(difference: Money, base: Money) -> Percent {
    if base > Decimal::ZERO {
        difference / base * dec!(100)
    } else {
        Decimal::ZERO
    }
}

fn winner(difference: Money) -> Regime {
    if difference >= Decimal::ZERO {
        Regime::Contractor
    } else {
        Regime::Payroll
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Compare net income under both employment regimes and produce a
/// risk-weighted recommendation. All-or-nothing: inputs pass the
/// validation gate or no computation runs.
pub fn compare_regimes(
    payroll_input: &PayrollInput,
    contractor_input: &ContractorInput,
) -> PersonalFinanceResult<ComputationOutput<ComparisonOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate(payroll_input, contractor_input)?;

    if payroll_input.gross_salary.is_zero() {
        warnings.push("Payroll salary is zero; the comparison is one-sided.".to_string());
    }
    if contractor_input.monthly_revenue.is_zero() {
        warnings.push("Contractor revenue is zero; the comparison is one-sided.".to_string());
    }

    let payroll = payroll::compute(payroll_input)?;
    let contractor = contractor::compute(contractor_input)?;
    let delta = compare(&payroll, &contractor);

    let recommendation = recommendation::classify(
        delta.annual_difference_pct,
        contractor_input.activity,
        contractor_input.tax_category,
    );

    let assumptions = serde_json::json!({
        "payroll": payroll_input,
        "contractor": contractor_input,
        "tax_year": 2024,
    });

    Ok(with_metadata(
        "Progressive 2024 withholding tables per regime; annual advantage \
         percentage classified against an activity- and category-adjusted \
         break-even threshold",
        &assumptions,
        warnings,
        start.elapsed().as_micros() as u64,
        ComparisonOutput {
            payroll,
            contractor,
            delta,
            recommendation,
        },
    ))
}

// ---------------------------------------------------------------------------
// Validation gate
// ---------------------------------------------------------------------------

fn validate(
    payroll_input: &PayrollInput,
    contractor_input: &ContractorInput,
) -> PersonalFinanceResult<()> {
    if payroll_input.gross_salary.is_zero() && contractor_input.monthly_revenue.is_zero() {
        return Err(PersonalFinanceError::InvalidInput {
            field: "gross_salary".into(),
            reason: "provide at least one income: payroll salary or contractor revenue".into(),
        });
    }
    if payroll_input.gross_salary > Decimal::ZERO && payroll_input.gross_salary < tables::MINIMUM_WAGE
    {
        return Err(PersonalFinanceError::InvalidInput {
            field: "gross_salary".into(),
            reason: format!(
                "payroll salary must be zero or at least the minimum wage ({})",
                tables::MINIMUM_WAGE
            ),
        });
    }
    for (field, amount) in [
        ("gross_salary", payroll_input.gross_salary),
        ("meal_voucher", payroll_input.meal_voucher),
        ("transport_voucher", payroll_input.transport_voucher),
        ("health_plan", payroll_input.health_plan),
        ("other_benefits", payroll_input.other_benefits),
        ("monthly_revenue", contractor_input.monthly_revenue),
        ("monthly_expenses", contractor_input.monthly_expenses),
    ] {
        if amount < Decimal::ZERO {
            return Err(PersonalFinanceError::InvalidInput {
                field: field.into(),
                reason: "must not be negative".into(),
            });
        }
    }
    if payroll_input.gross_salary > Decimal::ZERO && payroll_input.tenure_years == 0 {
        return Err(PersonalFinanceError::InvalidInput {
            field: "tenure_years".into(),
            reason: "must be at least 1".into(),
        });
    }
    if contractor_input.tax_category == TaxCategory::MicroEntity
        && contractor_input.monthly_revenue * dec!(12) > tables::MICRO_ENTITY_ANNUAL_CEILING
    {
        return Err(PersonalFinanceError::InvalidInput {
            field: "monthly_revenue".into(),
            reason: format!(
                "micro-entity revenue exceeds the annual ceiling of {}",
                tables::MICRO_ENTITY_ANNUAL_CEILING
            ),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
