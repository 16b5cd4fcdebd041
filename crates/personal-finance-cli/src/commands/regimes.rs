use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::Value;

use personal_finance_core::regimes::{
    compare_regimes, Activity, ContractorInput, PayrollInput, TaxCategory,
};

use crate::input;

/// Arguments for the regime comparison
#[derive(Args)]
pub struct CompareRegimesArgs {
    /// Gross monthly payroll salary
    #[arg(long)]
    pub salary: Option<Decimal>,

    /// Monthly meal-voucher benefit
    #[arg(long, default_value = "0")]
    pub meal_voucher: Decimal,

    /// Monthly transport-voucher benefit
    #[arg(long, default_value = "0")]
    pub transport_voucher: Decimal,

    /// Monthly employer-paid health plan
    #[arg(long, default_value = "0")]
    pub health_plan: Decimal,

    /// Other monthly benefits
    #[arg(long, default_value = "0")]
    pub other_benefits: Decimal,

    /// Years of tenure for the severance-fund projection
    #[arg(long, default_value = "1")]
    pub tenure_years: u32,

    /// Gross monthly contractor revenue
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// Contractor tax category
    #[arg(long, value_enum, default_value = "simplified")]
    pub tax_category: TaxCategoryArg,

    /// Declared principal activity
    #[arg(long, value_enum, default_value = "information-technology")]
    pub activity: ActivityArg,

    /// Monthly deductible contractor expenses
    #[arg(long, default_value = "0")]
    pub expenses: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum TaxCategoryArg {
    MicroEntity,
    Simplified,
    PresumedProfit,
}

impl From<TaxCategoryArg> for TaxCategory {
    fn from(arg: TaxCategoryArg) -> Self {
        match arg {
            TaxCategoryArg::MicroEntity => TaxCategory::MicroEntity,
            TaxCategoryArg::Simplified => TaxCategory::Simplified,
            TaxCategoryArg::PresumedProfit => TaxCategory::PresumedProfit,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ActivityArg {
    InformationTechnology,
    Consulting,
    DesignMarketing,
    Engineering,
    Education,
    OtherServices,
}

impl From<ActivityArg> for Activity {
    fn from(arg: ActivityArg) -> Self {
        match arg {
            ActivityArg::InformationTechnology => Activity::InformationTechnology,
            ActivityArg::Consulting => Activity::Consulting,
            ActivityArg::DesignMarketing => Activity::DesignMarketing,
            ActivityArg::Engineering => Activity::Engineering,
            ActivityArg::Education => Activity::Education,
            ActivityArg::OtherServices => Activity::OtherServices,
        }
    }
}

/// JSON shape accepted from --input files and piped stdin.
#[derive(Deserialize)]
struct CompareRegimesRequest {
    payroll: PayrollInput,
    contractor: ContractorInput,
}

pub fn run_compare(args: CompareRegimesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: CompareRegimesRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        CompareRegimesRequest {
            payroll: PayrollInput {
                gross_salary: args.salary.unwrap_or(dec!(0)),
                meal_voucher: args.meal_voucher,
                transport_voucher: args.transport_voucher,
                health_plan: args.health_plan,
                other_benefits: args.other_benefits,
                tenure_years: args.tenure_years,
            },
            contractor: ContractorInput {
                monthly_revenue: args.revenue.unwrap_or(dec!(0)),
                tax_category: args.tax_category.into(),
                activity: args.activity.into(),
                monthly_expenses: args.expenses,
            },
        }
    };

    let output = compare_regimes(&request.payroll, &request.contractor)?;
    Ok(serde_json::to_value(&output)?)
}
