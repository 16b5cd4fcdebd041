use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use personal_finance_core::financing::{simulate_financing, AmortizationSystem, FinancingInput};

use crate::input;

/// Arguments for the financing simulation
#[derive(Args)]
pub struct FinancingArgs {
    /// Property value
    #[arg(long)]
    pub property_value: Option<Decimal>,

    /// Down payment (at least 20% of the property value)
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 9.5)
    #[arg(long, alias = "rate")]
    pub annual_interest: Option<Decimal>,

    /// Number of monthly installments
    #[arg(long, default_value = "360")]
    pub installments: u32,

    /// Amortization system
    #[arg(long, value_enum, default_value = "sac")]
    pub system: SystemArg,

    /// Household income, for the commitment analysis
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum SystemArg {
    Sac,
    Price,
}

impl From<SystemArg> for AmortizationSystem {
    fn from(arg: SystemArg) -> Self {
        match arg {
            SystemArg::Sac => AmortizationSystem::Sac,
            SystemArg::Price => AmortizationSystem::Price,
        }
    }
}

pub fn run_financing(args: FinancingArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let financing_input: FinancingInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        FinancingInput {
            property_value: args
                .property_value
                .ok_or("--property-value is required (or provide --input)")?,
            down_payment: args
                .down_payment
                .ok_or("--down-payment is required (or provide --input)")?,
            annual_interest_pct: args
                .annual_interest
                .ok_or("--annual-interest is required (or provide --input)")?,
            installments: args.installments,
            system: args.system.into(),
            household_income: args.income,
        }
    };

    let output = simulate_financing(&financing_input)?;
    Ok(serde_json::to_value(&output)?)
}
