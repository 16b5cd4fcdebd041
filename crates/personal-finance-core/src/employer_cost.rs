use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PersonalFinanceError;
use crate::tables;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::PersonalFinanceResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Tax regime of the employing company. Levies differ: the simplified
/// regime is exempt from the workplace-risk and training-system charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployerTaxRegime {
    Simplified,
    PresumedProfit,
    ActualProfit,
}

/// Monthly benefit costs, at face value before employee deductions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenefitCosts {
    pub transport_voucher: Money,
    pub meal_voucher: Money,
    pub restaurant_voucher: Money,
    pub health_plan: Money,
    pub dental_plan: Money,
    pub life_insurance: Money,
    pub childcare_allowance: Money,
    pub education_allowance: Money,
    pub private_pension: Money,
    pub culture_voucher: Money,
    pub uniforms_and_ppe: Money,
    pub other: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployerCostConfig {
    /// Employee payroll deduction caps, statutory maxima.
    pub transport_deduction_cap_pct: Percent,
    pub meal_deduction_cap_pct: Percent,
    pub restaurant_deduction_cap_pct: Percent,
    /// Workplace-accident rate by risk grade (1%, 2% or 3%).
    pub workplace_risk_pct: Percent,
    pub hazard_premium: bool,
    pub unhealthiness_premium: bool,
    pub night_shift_premium: bool,
    /// Average overtime as a percentage of the base salary.
    pub overtime_pct: Percent,
    /// Annual profit share as a percentage of the base salary.
    pub profit_share_pct: Percent,
    pub annual_union_dues: Money,
}

impl Default for EmployerCostConfig {
    fn default() -> Self {
        Self {
            transport_deduction_cap_pct: dec!(6),
            meal_deduction_cap_pct: dec!(20),
            restaurant_deduction_cap_pct: dec!(20),
            workplace_risk_pct: dec!(1),
            hazard_premium: false,
            unhealthiness_premium: false,
            night_shift_premium: false,
            overtime_pct: dec!(0),
            profit_share_pct: dec!(0),
            annual_union_dues: dec!(0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployerCostInput {
    pub gross_salary: Money,
    pub tax_regime: EmployerTaxRegime,
    #[serde(default)]
    pub benefits: BenefitCosts,
    #[serde(default)]
    pub config: EmployerCostConfig,
}

/// Mandatory payroll charges, itemized monthly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollCharges {
    pub employer_social_security: Money,
    pub severance_fund: Money,
    pub vacation_provision: Money,
    pub thirteenth_provision: Money,
    pub workplace_risk: Money,
    pub training_system: Money,
    pub hazard_premium: Money,
    pub unhealthiness_premium: Money,
    pub night_shift_premium: Money,
    pub overtime: Money,
    pub profit_share: Money,
    pub union_dues: Money,
    pub total_charges: Money,
}

/// Benefits net of employee deductions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NettedBenefits {
    pub transport_voucher_net: Money,
    pub meal_voucher_net: Money,
    pub restaurant_voucher_net: Money,
    pub transport_voucher_deduction: Money,
    pub meal_voucher_deduction: Money,
    pub restaurant_voucher_deduction: Money,
    pub other_benefits: Money,
    pub total_benefits: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostSummary {
    pub total_monthly_cost: Money,
    pub total_annual_cost: Money,
    /// Charges as a share of the gross salary.
    pub charges_to_salary_pct: Percent,
    /// Cost per worked hour, on a 220-hour month.
    pub hourly_cost: Money,
    /// Total monthly cost over gross salary.
    pub cost_multiplier: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployerCostOutput {
    pub charges: PayrollCharges,
    pub benefits: NettedBenefits,
    pub summary: CostSummary,
}

// ---------------------------------------------------------------------------
// Rates
// ---------------------------------------------------------------------------

const EMPLOYER_SOCIAL_SECURITY_RATE: Rate = dec!(0.20);
/// Combined industry training and development levies.
const TRAINING_SYSTEM_RATE: Rate = dec!(0.058);
const HAZARD_PREMIUM_RATE: Rate = dec!(0.30);
/// Unhealthiness premium, applied to the minimum wage.
const UNHEALTHINESS_PREMIUM_RATE: Rate = dec!(0.40);
const NIGHT_SHIFT_PREMIUM_RATE: Rate = dec!(0.20);
const MONTHLY_WORKED_HOURS: Decimal = dec!(220);

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Estimate the full employer-side cost of one payroll employee.
pub fn estimate_employer_cost(
    input: &EmployerCostInput,
) -> PersonalFinanceResult<ComputationOutput<EmployerCostOutput>> {
    let start = Instant::now();

    validate(input)?;

    let charges = compute_charges(input);
    let benefits = compute_benefits(input);

    let total_monthly_cost = input.gross_salary + charges.total_charges + benefits.total_benefits;
    let summary = CostSummary {
        total_monthly_cost,
        total_annual_cost: total_monthly_cost * dec!(12),
        charges_to_salary_pct: if input.gross_salary > Decimal::ZERO {
            charges.total_charges / input.gross_salary * dec!(100)
        } else {
            Decimal::ZERO
        },
        hourly_cost: total_monthly_cost / MONTHLY_WORKED_HOURS,
        cost_multiplier: if input.gross_salary > Decimal::ZERO {
            total_monthly_cost / input.gross_salary
        } else {
            Decimal::ZERO
        },
    };

    Ok(with_metadata(
        "Statutory payroll charges and provisions on the premium-inclusive \
         base, plus benefit costs net of employee deductions",
        input,
        Vec::new(),
        start.elapsed().as_micros() as u64,
        EmployerCostOutput {
            charges,
            benefits,
            summary,
        },
    ))
}

fn compute_charges(input: &EmployerCostInput) -> PayrollCharges {
    let salary = input.gross_salary;
    let config = &input.config;

    let hazard_premium = if config.hazard_premium {
        salary * HAZARD_PREMIUM_RATE
    } else {
        Decimal::ZERO
    };
    let unhealthiness_premium = if config.unhealthiness_premium {
        tables::MINIMUM_WAGE * UNHEALTHINESS_PREMIUM_RATE
    } else {
        Decimal::ZERO
    };
    let night_shift_premium = if config.night_shift_premium {
        salary * NIGHT_SHIFT_PREMIUM_RATE
    } else {
        Decimal::ZERO
    };
    let overtime = salary * config.overtime_pct / dec!(100);

    // Premiums and overtime integrate the base every charge is levied on.
    let charge_base =
        salary + hazard_premium + unhealthiness_premium + night_shift_premium + overtime;

    let employer_social_security = charge_base * EMPLOYER_SOCIAL_SECURITY_RATE;
    let severance_fund = charge_base * tables::SEVERANCE_FUND_RATE;
    let vacation_provision = charge_base * (Decimal::ONE + Decimal::ONE / dec!(3)) / dec!(12);
    let thirteenth_provision = charge_base / dec!(12);
    let profit_share = salary * config.profit_share_pct / dec!(100) / dec!(12);

    // The simplified regime is exempt from these two levies.
    let (workplace_risk, training_system) = match input.tax_regime {
        EmployerTaxRegime::Simplified => (Decimal::ZERO, Decimal::ZERO),
        EmployerTaxRegime::PresumedProfit | EmployerTaxRegime::ActualProfit => (
            charge_base * config.workplace_risk_pct / dec!(100),
            charge_base * TRAINING_SYSTEM_RATE,
        ),
    };

    let union_dues = config.annual_union_dues / dec!(12);

    let total_charges = employer_social_security
        + severance_fund
        + vacation_provision
        + thirteenth_provision
        + workplace_risk
        + training_system
        + hazard_premium
        + unhealthiness_premium
        + night_shift_premium
        + overtime
        + profit_share
        + union_dues;

    PayrollCharges {
        employer_social_security,
        severance_fund,
        vacation_provision,
        thirteenth_provision,
        workplace_risk,
        training_system,
        hazard_premium,
        unhealthiness_premium,
        night_shift_premium,
        overtime,
        profit_share,
        union_dues,
        total_charges,
    }
}

fn compute_benefits(input: &EmployerCostInput) -> NettedBenefits {
    let salary = input.gross_salary;
    let benefits = &input.benefits;
    let config = &input.config;

    // The employee co-pays each voucher up to the statutory cap; the
    // employer carries the remainder.
    let netted = |face: Money, cap_pct: Percent| {
        let deduction = face.min(salary * cap_pct / dec!(100));
        ((face - deduction).max(Decimal::ZERO), deduction)
    };

    let (transport_net, transport_deduction) =
        netted(benefits.transport_voucher, config.transport_deduction_cap_pct);
    let (meal_net, meal_deduction) = netted(benefits.meal_voucher, config.meal_deduction_cap_pct);
    let (restaurant_net, restaurant_deduction) = netted(
        benefits.restaurant_voucher,
        config.restaurant_deduction_cap_pct,
    );

    let other_benefits = benefits.health_plan
        + benefits.dental_plan
        + benefits.life_insurance
        + benefits.childcare_allowance
        + benefits.education_allowance
        + benefits.private_pension
        + benefits.culture_voucher
        + benefits.uniforms_and_ppe
        + benefits.other;

    let total_benefits = transport_net + meal_net + restaurant_net + other_benefits;

    NettedBenefits {
        transport_voucher_net: transport_net,
        meal_voucher_net: meal_net,
        restaurant_voucher_net: restaurant_net,
        transport_voucher_deduction: transport_deduction,
        meal_voucher_deduction: meal_deduction,
        restaurant_voucher_deduction: restaurant_deduction,
        other_benefits,
        total_benefits,
    }
}

fn validate(input: &EmployerCostInput) -> PersonalFinanceResult<()> {
    if input.gross_salary < tables::MINIMUM_WAGE {
        return Err(PersonalFinanceError::InvalidInput {
            field: "gross_salary".into(),
            reason: format!("must be at least the minimum wage ({})", tables::MINIMUM_WAGE),
        });
    }
    let config = &input.config;
    if config.transport_deduction_cap_pct > dec!(6) {
        return Err(PersonalFinanceError::InvalidInput {
            field: "transport_deduction_cap_pct".into(),
            reason: "must not exceed 6%".into(),
        });
    }
    if config.meal_deduction_cap_pct > dec!(20) {
        return Err(PersonalFinanceError::InvalidInput {
            field: "meal_deduction_cap_pct".into(),
            reason: "must not exceed 20%".into(),
        });
    }
    if config.restaurant_deduction_cap_pct > dec!(20) {
        return Err(PersonalFinanceError::InvalidInput {
            field: "restaurant_deduction_cap_pct".into(),
            reason: "must not exceed 20%".into(),
        });
    }
    if config.workplace_risk_pct < dec!(1) || config.workplace_risk_pct > dec!(3) {
        return Err(PersonalFinanceError::InvalidInput {
            field: "workplace_risk_pct".into(),
            reason: "must be between 1% and 3%".into(),
        });
    }
    if config.overtime_pct < Decimal::ZERO || config.overtime_pct > dec!(50) {
        return Err(PersonalFinanceError::InvalidInput {
            field: "overtime_pct".into(),
            reason: "must be between 0% and 50%".into(),
        });
    }
    if config.profit_share_pct < Decimal::ZERO || config.profit_share_pct > dec!(200) {
        return Err(PersonalFinanceError::InvalidInput {
            field: "profit_share_pct".into(),
            reason: "must be between 0% and 200%".into(),
        });
    }
    if config.annual_union_dues < Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "annual_union_dues".into(),
            reason: "must not be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn default_input() -> EmployerCostInput {
        EmployerCostInput {
            gross_salary: dec!(5000),
            tax_regime: EmployerTaxRegime::Simplified,
            benefits: BenefitCosts::default(),
            config: EmployerCostConfig::default(),
        }
    }

    #[test]
    fn test_basic_charges_simplified_regime() {
        let result = estimate_employer_cost(&default_input()).unwrap().result;
        let charges = &result.charges;
        assert_eq!(charges.employer_social_security, dec!(1000.00));
        assert_eq!(charges.severance_fund, dec!(400.00));
        assert_eq!(charges.thirteenth_provision, dec!(5000) / dec!(12));
        // Simplified regime pays neither levy.
        assert_eq!(charges.workplace_risk, dec!(0));
        assert_eq!(charges.training_system, dec!(0));
    }

    #[test]
    fn test_vacation_provision_includes_one_third() {
        let result = estimate_employer_cost(&default_input()).unwrap().result;
        let expected = dec!(5000) * (Decimal::ONE + Decimal::ONE / dec!(3)) / dec!(12);
        assert_eq!(result.charges.vacation_provision, expected);
    }

    #[test]
    fn test_presumed_profit_pays_risk_and_training_levies() {
        let mut input = default_input();
        input.tax_regime = EmployerTaxRegime::PresumedProfit;
        let result = estimate_employer_cost(&input).unwrap().result;
        assert_eq!(result.charges.workplace_risk, dec!(50.00));
        assert_eq!(result.charges.training_system, dec!(290.000));
    }

    #[test]
    fn test_premiums_integrate_charge_base() {
        let mut input = default_input();
        input.config.hazard_premium = true;
        let result = estimate_employer_cost(&input).unwrap().result;
        // Base becomes 6500: social security 20% of 6500.
        assert_eq!(result.charges.hazard_premium, dec!(1500.00));
        assert_eq!(result.charges.employer_social_security, dec!(1300.000));
    }

    #[test]
    fn test_unhealthiness_premium_tracks_minimum_wage() {
        let mut input = default_input();
        input.config.unhealthiness_premium = true;
        let result = estimate_employer_cost(&input).unwrap().result;
        assert_eq!(
            result.charges.unhealthiness_premium,
            tables::MINIMUM_WAGE * dec!(0.40)
        );
    }

    #[test]
    fn test_voucher_netting_caps_employee_share() {
        let mut input = default_input();
        input.benefits.transport_voucher = dec!(500);
        // Cap 6% of 5000 = 300: employee pays 300, employer nets 200.
        let result = estimate_employer_cost(&input).unwrap().result;
        assert_eq!(result.benefits.transport_voucher_deduction, dec!(300.00));
        assert_eq!(result.benefits.transport_voucher_net, dec!(200.00));
    }

    #[test]
    fn test_small_voucher_fully_deducted() {
        let mut input = default_input();
        input.benefits.transport_voucher = dec!(150);
        let result = estimate_employer_cost(&input).unwrap().result;
        assert_eq!(result.benefits.transport_voucher_deduction, dec!(150));
        assert_eq!(result.benefits.transport_voucher_net, dec!(0));
    }

    #[test]
    fn test_summary_composition() {
        let mut input = default_input();
        input.benefits.health_plan = dec!(400);
        let result = estimate_employer_cost(&input).unwrap().result;
        let expected_monthly =
            dec!(5000) + result.charges.total_charges + result.benefits.total_benefits;
        assert_eq!(result.summary.total_monthly_cost, expected_monthly);
        assert_eq!(result.summary.total_annual_cost, expected_monthly * dec!(12));
        assert_eq!(
            result.summary.hourly_cost,
            expected_monthly / dec!(220)
        );
        assert!(result.summary.cost_multiplier > Decimal::ONE);
    }

    #[test]
    fn test_rejects_salary_below_minimum_wage() {
        let mut input = default_input();
        input.gross_salary = dec!(1000);
        assert!(estimate_employer_cost(&input).is_err());
    }

    #[test]
    fn test_rejects_workplace_risk_out_of_band() {
        let mut input = default_input();
        input.config.workplace_risk_pct = dec!(4);
        assert!(estimate_employer_cost(&input).is_err());
    }
}
