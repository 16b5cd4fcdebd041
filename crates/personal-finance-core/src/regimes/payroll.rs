use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::tables;
use crate::types::{Money, Years};
use crate::PersonalFinanceResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Inputs for the payroll-employment (salaried) regime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollInput {
    pub gross_salary: Money,
    pub meal_voucher: Money,
    pub transport_voucher: Money,
    pub health_plan: Money,
    pub other_benefits: Money,
    /// Years of tenure, for the accumulated severance-fund projection.
    pub tenure_years: Years,
}

/// Full monthly and annual net-income breakdown under payroll employment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    pub net_salary: Money,
    pub social_security: Money,
    pub income_tax: Money,
    pub total_benefits: Money,
    /// Employer-paid severance-fund deposit for one month.
    pub severance_fund_monthly: Money,
    /// Deposits accumulated over the declared tenure.
    pub severance_fund_accumulated: Money,
    pub thirteenth_salary_net: Money,
    pub vacation_premium: Money,
    pub net_monthly_income: Money,
    pub net_annual_income: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Compute the payroll-regime breakdown. Total over validated inputs
/// (non-negative amounts); the comparison entry point performs the
/// validation gate.
pub fn compute(input: &PayrollInput) -> PersonalFinanceResult<PayrollBreakdown> {
    let social_security_table = tables::social_security_table()?;
    let income_tax_table = tables::income_tax_table()?;

    let social_security = social_security_table.evaluate(input.gross_salary);
    let income_tax = income_tax_table.evaluate(input.gross_salary - social_security);
    let net_salary = input.gross_salary - social_security - income_tax;

    let total_benefits =
        input.meal_voucher + input.transport_voucher + input.health_plan + input.other_benefits;

    let severance_fund_monthly = input.gross_salary * tables::SEVERANCE_FUND_RATE;
    let severance_fund_accumulated =
        severance_fund_monthly * dec!(12) * Decimal::from(input.tenure_years);

    // The 13th salary is a legally distinct taxable event: both
    // withholdings are recomputed on the same gross salary rather than
    // reusing the monthly figures.
    let thirteenth_social_security = social_security_table.evaluate(input.gross_salary);
    let thirteenth_income_tax =
        income_tax_table.evaluate(input.gross_salary - thirteenth_social_security);
    let thirteenth_salary_net =
        input.gross_salary - thirteenth_social_security - thirteenth_income_tax;

    let vacation_premium = input.gross_salary / dec!(3);

    let net_monthly_income = net_salary + total_benefits;
    // Benefits are paid 12 times; only the salary-derived amounts carry
    // the annual extras.
    let net_annual_income = net_monthly_income * dec!(12)
        + thirteenth_salary_net
        + severance_fund_monthly * dec!(12)
        + vacation_premium;

    Ok(PayrollBreakdown {
        net_salary,
        social_security,
        income_tax,
        total_benefits,
        severance_fund_monthly,
        severance_fund_accumulated,
        thirteenth_salary_net,
        vacation_premium,
        net_monthly_income,
        net_annual_income,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn default_input() -> PayrollInput {
        PayrollInput {
            gross_salary: dec!(3000),
            meal_voucher: dec!(0),
            transport_voucher: dec!(0),
            health_plan: dec!(0),
            other_benefits: dec!(0),
            tenure_years: 1,
        }
    }

    // ---------------------------------------------------------------
    // 1. Reference scenario: 3000 gross, three marginal bands
    // ---------------------------------------------------------------
    #[test]
    fn test_social_security_three_bands() {
        let result = compute(&default_input()).unwrap();
        // 1412 * 7.5% + 1254.68 * 9% + 333.32 * 12% = 258.8196
        assert_eq!(result.social_security, dec!(258.8196));
    }

    #[test]
    fn test_income_tax_on_salary_less_social_security() {
        let result = compute(&default_input()).unwrap();
        // Base 2741.1804 falls in the 7.5% band: base * 0.075 - 158.40
        let base = dec!(3000) - dec!(258.8196);
        assert_eq!(result.income_tax, base * dec!(0.075) - dec!(158.40));
    }

    #[test]
    fn test_net_salary_subtracts_both_withholdings() {
        let result = compute(&default_input()).unwrap();
        assert_eq!(
            result.net_salary,
            dec!(3000) - result.social_security - result.income_tax
        );
    }

    // ---------------------------------------------------------------
    // 2. Benefits sum directly, untaxed
    // ---------------------------------------------------------------
    #[test]
    fn test_benefits_sum_untaxed() {
        let mut input = default_input();
        input.meal_voucher = dec!(600);
        input.transport_voucher = dec!(200);
        input.health_plan = dec!(350);
        input.other_benefits = dec!(50);
        let result = compute(&input).unwrap();
        assert_eq!(result.total_benefits, dec!(1200));
        assert_eq!(result.net_monthly_income, result.net_salary + dec!(1200));
        // Withholdings ignore benefits entirely.
        assert_eq!(result.social_security, dec!(258.8196));
    }

    // ---------------------------------------------------------------
    // 3. Severance fund: 8% of gross, accumulated over tenure
    // ---------------------------------------------------------------
    #[test]
    fn test_severance_fund_accumulation() {
        let mut input = default_input();
        input.tenure_years = 5;
        let result = compute(&input).unwrap();
        assert_eq!(result.severance_fund_monthly, dec!(240.00));
        assert_eq!(result.severance_fund_accumulated, dec!(14400.00));
    }

    // ---------------------------------------------------------------
    // 4. 13th salary equals the monthly net salary (independent event,
    //    numerically identical)
    // ---------------------------------------------------------------
    #[test]
    fn test_thirteenth_matches_monthly_net_salary() {
        let result = compute(&default_input()).unwrap();
        assert_eq!(result.thirteenth_salary_net, result.net_salary);
    }

    // ---------------------------------------------------------------
    // 5. Annual net formula
    // ---------------------------------------------------------------
    #[test]
    fn test_annual_net_includes_extras() {
        let mut input = default_input();
        input.meal_voucher = dec!(500);
        let result = compute(&input).unwrap();
        let expected = (result.net_salary + dec!(500)) * dec!(12)
            + result.thirteenth_salary_net
            + result.severance_fund_monthly * dec!(12)
            + dec!(3000) / dec!(3);
        assert_eq!(result.net_annual_income, expected);
    }

    // ---------------------------------------------------------------
    // 6. Withholding saturates above the contribution ceiling
    // ---------------------------------------------------------------
    #[test]
    fn test_social_security_saturates_for_high_salary() {
        let mut high = default_input();
        high.gross_salary = dec!(20_000);
        let mut ceiling = default_input();
        ceiling.gross_salary = dec!(7786.02);
        assert_eq!(
            compute(&high).unwrap().social_security,
            compute(&ceiling).unwrap().social_security
        );
    }

    #[test]
    fn test_zero_salary_is_total() {
        let mut input = default_input();
        input.gross_salary = dec!(0);
        let result = compute(&input).unwrap();
        assert_eq!(result.net_salary, dec!(0));
        assert_eq!(result.social_security, dec!(0));
        assert_eq!(result.income_tax, dec!(0));
    }
}
