use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use personal_finance_core::emergency_fund::{plan_emergency_fund, EmergencyFundInput};

use crate::input;

/// Arguments for the emergency-fund plan
#[derive(Args)]
pub struct EmergencyFundArgs {
    /// Essential monthly expenses
    #[arg(long)]
    pub expenses: Option<Decimal>,

    /// Amount already saved
    #[arg(long, default_value = "0")]
    pub saved: Decimal,

    /// Months of expenses the fund should cover
    #[arg(long, default_value = "6")]
    pub target_months: u32,

    /// Monthly saving capacity
    #[arg(long, default_value = "0")]
    pub monthly_saving: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_emergency_fund(args: EmergencyFundArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fund_input: EmergencyFundInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        EmergencyFundInput {
            essential_monthly_expenses: args
                .expenses
                .ok_or("--expenses is required (or provide --input)")?,
            amount_saved: args.saved,
            target_months: args.target_months,
            monthly_saving: args.monthly_saving,
        }
    };

    let output = plan_emergency_fund(&fund_input)?;
    Ok(serde_json::to_value(&output)?)
}
