use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use personal_finance_core::employer_cost::{
    estimate_employer_cost, BenefitCosts, EmployerCostConfig, EmployerCostInput, EmployerTaxRegime,
};

use crate::input;

/// Arguments for the employer-cost estimate. The benefit and
/// configuration details beyond the common flags come via --input.
#[derive(Args)]
pub struct EmployerCostArgs {
    /// Gross monthly salary
    #[arg(long)]
    pub salary: Option<Decimal>,

    /// Employer tax regime
    #[arg(long, value_enum, default_value = "simplified")]
    pub tax_regime: TaxRegimeArg,

    /// Monthly transport-voucher face value
    #[arg(long, default_value = "0")]
    pub transport_voucher: Decimal,

    /// Monthly meal-voucher face value
    #[arg(long, default_value = "0")]
    pub meal_voucher: Decimal,

    /// Monthly employer-paid health plan
    #[arg(long, default_value = "0")]
    pub health_plan: Decimal,

    /// Average overtime as a percentage of salary
    #[arg(long, default_value = "0")]
    pub overtime: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum TaxRegimeArg {
    Simplified,
    PresumedProfit,
    ActualProfit,
}

impl From<TaxRegimeArg> for EmployerTaxRegime {
    fn from(arg: TaxRegimeArg) -> Self {
        match arg {
            TaxRegimeArg::Simplified => EmployerTaxRegime::Simplified,
            TaxRegimeArg::PresumedProfit => EmployerTaxRegime::PresumedProfit,
            TaxRegimeArg::ActualProfit => EmployerTaxRegime::ActualProfit,
        }
    }
}

pub fn run_employer_cost(args: EmployerCostArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cost_input: EmployerCostInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        EmployerCostInput {
            gross_salary: args
                .salary
                .ok_or("--salary is required (or provide --input)")?,
            tax_regime: args.tax_regime.into(),
            benefits: BenefitCosts {
                transport_voucher: args.transport_voucher,
                meal_voucher: args.meal_voucher,
                health_plan: args.health_plan,
                ..BenefitCosts::default()
            },
            config: EmployerCostConfig {
                overtime_pct: args.overtime,
                ..EmployerCostConfig::default()
            },
        }
    };

    let output = estimate_employer_cost(&cost_input)?;
    Ok(serde_json::to_value(&output)?)
}
