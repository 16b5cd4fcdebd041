use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::tables;
use crate::types::{Money, Percent};
use crate::PersonalFinanceResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Tax category declared by the contractor. Closed enumeration: an
/// unrecognized category is unrepresentable, not a runtime error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxCategory {
    /// Micro-entity flat rate, subject to an annual revenue ceiling.
    MicroEntity,
    /// Simplified regime, tiered flat rate on annualized revenue.
    Simplified,
    /// Presumed-profit regime, multi-component percentage formula.
    PresumedProfit,
}

/// Declared principal business activity. Drives the recommendation
/// thresholds, not the tax arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    InformationTechnology,
    Consulting,
    DesignMarketing,
    Engineering,
    Education,
    OtherServices,
}

/// Inputs for the independent-contractor regime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractorInput {
    pub monthly_revenue: Money,
    pub tax_category: TaxCategory,
    pub activity: Activity,
    /// Deductible operating expenses (accountant, insurance, ...).
    pub monthly_expenses: Money,
}

/// Net-income breakdown under the contractor regime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractorBreakdown {
    pub gross_revenue: Money,
    pub total_tax: Money,
    pub net_monthly_income: Money,
    /// Net monthly × 12: the regime has no 13th-salary analog.
    pub net_annual_income: Money,
    pub effective_tax_rate_pct: Percent,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Compute the contractor-regime breakdown. Total over validated inputs;
/// the comparison entry point performs the validation gate.
pub fn compute(input: &ContractorInput) -> PersonalFinanceResult<ContractorBreakdown> {
    let total_tax = category_tax(input.monthly_revenue, input.tax_category)?;
    let net_monthly_income = input.monthly_revenue - total_tax - input.monthly_expenses;
    let net_annual_income = net_monthly_income * dec!(12);
    let effective_tax_rate_pct = if input.monthly_revenue > Decimal::ZERO {
        total_tax / input.monthly_revenue * dec!(100)
    } else {
        Decimal::ZERO
    };

    Ok(ContractorBreakdown {
        gross_revenue: input.monthly_revenue,
        total_tax,
        net_monthly_income,
        net_annual_income,
        effective_tax_rate_pct,
    })
}

/// Monthly tax owed under the declared category.
fn category_tax(revenue: Money, category: TaxCategory) -> PersonalFinanceResult<Money> {
    match category {
        TaxCategory::MicroEntity => {
            // Revenue past the eligibility ceiling falls back to the
            // lowest simplified tier instead of the micro-entity rate.
            // An overflow rule, not an error.
            if revenue * dec!(12) > tables::MICRO_ENTITY_ANNUAL_CEILING {
                let tiers = tables::simplified_service_tiers()?;
                let lowest_rate = tiers.brackets()[0].rate;
                Ok(revenue * lowest_rate)
            } else {
                Ok(revenue * tables::MICRO_ENTITY_RATE)
            }
        }
        TaxCategory::Simplified => {
            let tiers = tables::simplified_service_tiers()?;
            Ok(tiers.evaluate(revenue))
        }
        TaxCategory::PresumedProfit => Ok(presumed_profit_tax(revenue)),
    }
}

/// Presumed-profit formula: five fixed-percentage components plus a
/// surtax on the slice of the presumed corporate-income base above the
/// monthly threshold.
fn presumed_profit_tax(revenue: Money) -> Money {
    let services_tax = revenue * tables::SERVICES_TAX_RATE;
    let pis = revenue * tables::TURNOVER_PIS_RATE;
    let cofins = revenue * tables::TURNOVER_COFINS_RATE;

    let corporate_income_base = revenue * tables::PRESUMED_BASE_RATE;
    let social_contribution_base = revenue * tables::PRESUMED_BASE_RATE;

    let corporate_income_tax = corporate_income_base * tables::CORPORATE_INCOME_RATE;
    let social_contribution = social_contribution_base * tables::SOCIAL_CONTRIBUTION_RATE;

    let surtax = if corporate_income_base > tables::SURTAX_MONTHLY_THRESHOLD {
        (corporate_income_base - tables::SURTAX_MONTHLY_THRESHOLD) * tables::CORPORATE_SURTAX_RATE
    } else {
        Decimal::ZERO
    };

    services_tax + pis + cofins + corporate_income_tax + social_contribution + surtax
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
