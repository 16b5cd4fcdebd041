mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::emergency_fund::EmergencyFundArgs;
use commands::employer_cost::EmployerCostArgs;
use commands::financing::FinancingArgs;
use commands::regimes::CompareRegimesArgs;

/// Brazilian personal-finance calculations
#[derive(Parser)]
#[command(
    name = "pfa",
    version,
    about = "Brazilian personal-finance calculations",
    long_about = "A CLI for personal-finance decisions with decimal precision. \
                  Compares payroll employment against independent contracting \
                  under the 2024 tax tables, and simulates property financing, \
                  emergency funds, and employer-side payroll costs."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare payroll employment vs independent contracting
    CompareRegimes(CompareRegimesArgs),
    /// Simulate a property financing (Sac or Price)
    Financing(FinancingArgs),
    /// Plan an emergency fund
    EmergencyFund(EmergencyFundArgs),
    /// Estimate the employer-side cost of an employee
    EmployerCost(EmployerCostArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::CompareRegimes(args) => commands::regimes::run_compare(args),
        Commands::Financing(args) => commands::financing::run_financing(args),
        Commands::EmergencyFund(args) => commands::emergency_fund::run_emergency_fund(args),
        Commands::EmployerCost(args) => commands::employer_cost::run_employer_cost(args),
        Commands::Version => {
            println!("pfa {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::emit(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
