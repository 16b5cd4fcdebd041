//! Brazilian reference data for the 2024 tax year.
//!
//! Tables are immutable reference data: built fresh through the validated
//! `BracketTable` constructor and never mutated. Amounts in BRL.

use rust_decimal_macros::dec;

use crate::brackets::{BracketTable, EvaluationMode, TaxBracket};
use crate::types::{Money, Rate};
use crate::PersonalFinanceResult;

/// Legal minimum monthly wage.
pub const MINIMUM_WAGE: Money = dec!(1412);

/// Employer-paid severance fund (FGTS), percentage of gross salary.
pub const SEVERANCE_FUND_RATE: Rate = dec!(0.08);

/// Micro-entity (MEI) flat rate on monthly revenue.
pub const MICRO_ENTITY_RATE: Rate = dec!(0.06);

/// Micro-entity annual revenue eligibility ceiling.
pub const MICRO_ENTITY_ANNUAL_CEILING: Money = dec!(81_000);

/// Simplified-regime annual revenue ceiling (last service tier).
pub const SIMPLIFIED_ANNUAL_CEILING: Money = dec!(4_800_000);

// Presumed-profit components, all percentages of gross revenue except
// the surtax, which applies to the presumed corporate-income base.
pub const SERVICES_TAX_RATE: Rate = dec!(0.03);
pub const TURNOVER_PIS_RATE: Rate = dec!(0.0065);
pub const TURNOVER_COFINS_RATE: Rate = dec!(0.03);
pub const CORPORATE_INCOME_RATE: Rate = dec!(0.15);
pub const SOCIAL_CONTRIBUTION_RATE: Rate = dec!(0.09);
pub const PRESUMED_BASE_RATE: Rate = dec!(0.32);
pub const CORPORATE_SURTAX_RATE: Rate = dec!(0.10);
pub const SURTAX_MONTHLY_THRESHOLD: Money = dec!(20_000);

/// Employee social-security withholding (INSS), cumulative marginal
/// bands with a contribution ceiling at the top band.
pub fn social_security_table() -> PersonalFinanceResult<BracketTable> {
    BracketTable::new(
        EvaluationMode::CumulativeMarginal,
        vec![
            TaxBracket::new(dec!(0), Some(dec!(1412)), dec!(0.075)),
            TaxBracket::new(dec!(1412), Some(dec!(2666.68)), dec!(0.09)),
            TaxBracket::new(dec!(2666.68), Some(dec!(4000.03)), dec!(0.12)),
            TaxBracket::new(dec!(4000.03), Some(dec!(7786.02)), dec!(0.14)),
        ],
    )
}

/// Income-tax withholding (IRRF), single-bracket lookup with baked-in
/// deductions. The first band is the exemption floor.
pub fn income_tax_table() -> PersonalFinanceResult<BracketTable> {
    BracketTable::new(
        EvaluationMode::LookupWithDeduction,
        vec![
            TaxBracket::new(dec!(0), Some(dec!(2112)), dec!(0)),
            TaxBracket::with_deduction(dec!(2112), Some(dec!(2826.65)), dec!(0.075), dec!(158.40)),
            TaxBracket::with_deduction(dec!(2826.65), Some(dec!(3751.05)), dec!(0.15), dec!(370.40)),
            TaxBracket::with_deduction(dec!(3751.05), Some(dec!(4664.68)), dec!(0.225), dec!(651.73)),
            TaxBracket::with_deduction(dec!(4664.68), None, dec!(0.275), dec!(884.96)),
        ],
    )
}

/// Simplified-regime service tiers (Simples Nacional, services annex),
/// flat rate selected by annualized revenue. The 6% entry tier ends at
/// the micro-entity ceiling; revenue past micro-entity scale pays 9%.
pub fn simplified_service_tiers() -> PersonalFinanceResult<BracketTable> {
    BracketTable::new(
        EvaluationMode::RevenueTierFlat,
        vec![
            TaxBracket::new(dec!(0), Some(MICRO_ENTITY_ANNUAL_CEILING), dec!(0.06)),
            TaxBracket::new(MICRO_ENTITY_ANNUAL_CEILING, Some(dec!(360_000)), dec!(0.09)),
            TaxBracket::new(dec!(360_000), Some(dec!(720_000)), dec!(0.105)),
            TaxBracket::new(dec!(720_000), Some(dec!(1_800_000)), dec!(0.14)),
            TaxBracket::new(dec!(1_800_000), Some(dec!(3_600_000)), dec!(0.22)),
            TaxBracket::new(dec!(3_600_000), Some(SIMPLIFIED_ANNUAL_CEILING), dec!(0.33)),
        ],
    )
}
