use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PersonalFinanceError;
use crate::types::{Money, Rate};
use crate::PersonalFinanceResult;

/// RevenueTierFlat matches on the annualized base (12 monthly periods).
const ANNUALIZATION_FACTOR: Decimal = dec!(12);

/// One band of a progressive tax table.
///
/// `upper: None` marks the unbounded top band. `deduction` only matters
/// under `LookupWithDeduction`; it is zero everywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub lower: Money,
    pub upper: Option<Money>,
    pub rate: Rate,
    pub deduction: Money,
}

impl TaxBracket {
    /// Band taxed at a marginal or flat rate, no deduction.
    pub fn new(lower: Money, upper: Option<Money>, rate: Rate) -> Self {
        Self {
            lower,
            upper,
            rate,
            deduction: Decimal::ZERO,
        }
    }

    /// Band with a baked-in deduction (single-bracket lookup tables).
    pub fn with_deduction(lower: Money, upper: Option<Money>, rate: Rate, deduction: Money) -> Self {
        Self {
            lower,
            upper,
            rate,
            deduction,
        }
    }

    fn contains(&self, amount: Money) -> bool {
        amount >= self.lower && self.upper.is_none_or(|u| amount <= u)
    }
}

/// Aggregation rule applied when a table is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvaluationMode {
    /// Each band taxes only the slice of the base that falls within it;
    /// the total saturates at the final band's ceiling.
    CumulativeMarginal,
    /// Exactly one band applies: tax = base × rate − deduction, never negative.
    LookupWithDeduction,
    /// The annualized base (× 12) selects one band; tax = monthly base × rate.
    RevenueTierFlat,
}

/// An ordered, contiguous progressive tax table tagged with its
/// evaluation mode. Construction validates the shape once so the
/// evaluators can assume full `[0, +∞)` coverage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BracketTable {
    mode: EvaluationMode,
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    pub fn new(mode: EvaluationMode, brackets: Vec<TaxBracket>) -> PersonalFinanceResult<Self> {
        if brackets.is_empty() {
            return Err(PersonalFinanceError::InvalidTable(
                "table must contain at least one bracket".into(),
            ));
        }
        if !brackets[0].lower.is_zero() {
            return Err(PersonalFinanceError::InvalidTable(format!(
                "first bracket must start at zero, starts at {}",
                brackets[0].lower
            )));
        }
        for (i, bracket) in brackets.iter().enumerate() {
            let is_last = i == brackets.len() - 1;
            match bracket.upper {
                Some(upper) if upper <= bracket.lower => {
                    return Err(PersonalFinanceError::InvalidTable(format!(
                        "bracket {} has upper bound {} not above lower bound {}",
                        i, upper, bracket.lower
                    )));
                }
                Some(upper) => {
                    if let Some(next) = brackets.get(i + 1) {
                        if next.lower != upper {
                            return Err(PersonalFinanceError::InvalidTable(format!(
                                "bracket {} ends at {} but bracket {} starts at {}",
                                i,
                                upper,
                                i + 1,
                                next.lower
                            )));
                        }
                    }
                }
                None if !is_last => {
                    return Err(PersonalFinanceError::InvalidTable(format!(
                        "only the last bracket may be unbounded, bracket {} is not",
                        i
                    )));
                }
                None => {}
            }
        }
        Ok(Self { mode, brackets })
    }

    pub fn mode(&self) -> EvaluationMode {
        self.mode
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Upper bound of the final band, if the table has a ceiling.
    pub fn ceiling(&self) -> Option<Money> {
        self.brackets.last().and_then(|b| b.upper)
    }

    /// Tax owed on a non-negative base amount. Total and pure: every
    /// non-negative input maps to a defined, non-negative tax.
    pub fn evaluate(&self, base: Money) -> Money {
        match self.mode {
            EvaluationMode::CumulativeMarginal => self.evaluate_cumulative(base),
            EvaluationMode::LookupWithDeduction => self.evaluate_lookup(base),
            EvaluationMode::RevenueTierFlat => self.evaluate_tier_flat(base),
        }
    }

    /// Sum of per-band slices up to the base amount. Bases above the
    /// table ceiling contribute nothing beyond the final band.
    fn evaluate_cumulative(&self, base: Money) -> Money {
        let mut tax = Decimal::ZERO;
        for bracket in &self.brackets {
            if base <= bracket.lower {
                break;
            }
            let slice_top = bracket.upper.map_or(base, |u| base.min(u));
            tax += (slice_top - bracket.lower) * bracket.rate;
            if bracket.upper.is_none_or(|u| base <= u) {
                break;
            }
        }
        tax
    }

    /// Single containing band, clamped at zero so a deduction can never
    /// turn the tax negative. The first band acts as the exemption floor.
    fn evaluate_lookup(&self, base: Money) -> Money {
        for bracket in &self.brackets {
            if bracket.contains(base) {
                let tax = base * bracket.rate - bracket.deduction;
                return tax.max(Decimal::ZERO);
            }
        }
        Decimal::ZERO
    }

    /// Flat, non-marginal rate selected by the annualized base. Above
    /// the last band's ceiling the last rate applies (saturating).
    fn evaluate_tier_flat(&self, base: Money) -> Money {
        let annualized = base * ANNUALIZATION_FACTOR;
        let rate = self
            .brackets
            .iter()
            .find(|b| b.contains(annualized))
            .or_else(|| self.brackets.last())
            .map_or(Decimal::ZERO, |b| b.rate);
        base * rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marginal_table() -> BracketTable {
        BracketTable::new(
            EvaluationMode::CumulativeMarginal,
            vec![
                TaxBracket::new(dec!(0), Some(dec!(1000)), dec!(0.05)),
                TaxBracket::new(dec!(1000), Some(dec!(2000)), dec!(0.10)),
                TaxBracket::new(dec!(2000), Some(dec!(3000)), dec!(0.20)),
            ],
        )
        .unwrap()
    }

    fn lookup_table() -> BracketTable {
        BracketTable::new(
            EvaluationMode::LookupWithDeduction,
            vec![
                TaxBracket::new(dec!(0), Some(dec!(2000)), dec!(0)),
                TaxBracket::with_deduction(dec!(2000), Some(dec!(3000)), dec!(0.10), dec!(200)),
                TaxBracket::with_deduction(dec!(3000), None, dec!(0.20), dec!(500)),
            ],
        )
        .unwrap()
    }

    fn tier_table() -> BracketTable {
        BracketTable::new(
            EvaluationMode::RevenueTierFlat,
            vec![
                TaxBracket::new(dec!(0), Some(dec!(120_000)), dec!(0.06)),
                TaxBracket::new(dec!(120_000), Some(dec!(240_000)), dec!(0.09)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_constructor_rejects_gap() {
        let result = BracketTable::new(
            EvaluationMode::CumulativeMarginal,
            vec![
                TaxBracket::new(dec!(0), Some(dec!(1000)), dec!(0.05)),
                TaxBracket::new(dec!(1001), Some(dec!(2000)), dec!(0.10)),
            ],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_constructor_rejects_nonzero_start() {
        let result = BracketTable::new(
            EvaluationMode::CumulativeMarginal,
            vec![TaxBracket::new(dec!(100), Some(dec!(1000)), dec!(0.05))],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_constructor_rejects_interior_unbounded() {
        let result = BracketTable::new(
            EvaluationMode::CumulativeMarginal,
            vec![
                TaxBracket::new(dec!(0), None, dec!(0.05)),
                TaxBracket::new(dec!(1000), Some(dec!(2000)), dec!(0.10)),
            ],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_cumulative_spans_bands() {
        // 1000 * 5% + 500 * 10% = 50 + 50 = 100
        assert_eq!(marginal_table().evaluate(dec!(1500)), dec!(100.00));
    }

    #[test]
    fn test_cumulative_zero_base() {
        assert_eq!(marginal_table().evaluate(dec!(0)), dec!(0));
    }

    #[test]
    fn test_cumulative_continuity_at_boundary() {
        // Evaluated at a band boundary equals the sum of the adjacent
        // bands' marginal contributions below it.
        let table = marginal_table();
        let at_boundary = table.evaluate(dec!(2000));
        let expected = dec!(1000) * dec!(0.05) + dec!(1000) * dec!(0.10);
        assert_eq!(at_boundary, expected);
        // One unit above picks up the next band's rate only for the excess.
        assert_eq!(table.evaluate(dec!(2001)), expected + dec!(0.20));
    }

    #[test]
    fn test_cumulative_saturates_at_ceiling() {
        let table = marginal_table();
        let at_ceiling = table.evaluate(dec!(3000));
        assert_eq!(table.evaluate(dec!(50_000)), at_ceiling);
    }

    #[test]
    fn test_cumulative_monotone() {
        let table = marginal_table();
        let mut previous = Decimal::ZERO;
        for base in [100, 999, 1000, 1001, 1999, 2500, 2999, 3000, 4000] {
            let tax = table.evaluate(Decimal::from(base));
            assert!(tax >= previous, "tax decreased at base {}", base);
            previous = tax;
        }
    }

    #[test]
    fn test_lookup_exemption_floor() {
        assert_eq!(lookup_table().evaluate(dec!(1500)), dec!(0));
        assert_eq!(lookup_table().evaluate(dec!(2000)), dec!(0));
    }

    #[test]
    fn test_lookup_applies_deduction() {
        // 2500 * 10% - 200 = 50
        assert_eq!(lookup_table().evaluate(dec!(2500)), dec!(50.00));
    }

    #[test]
    fn test_lookup_clamps_negative_to_zero() {
        let table = BracketTable::new(
            EvaluationMode::LookupWithDeduction,
            vec![TaxBracket::with_deduction(
                dec!(0),
                None,
                dec!(0.01),
                dec!(1000),
            )],
        )
        .unwrap();
        assert_eq!(table.evaluate(dec!(100)), dec!(0));
    }

    #[test]
    fn test_lookup_monotone_within_and_across_brackets() {
        let table = lookup_table();
        let mut previous = Decimal::ZERO;
        for base in [0, 1999, 2000, 2001, 2999, 3000, 3001, 10_000] {
            let tax = table.evaluate(Decimal::from(base));
            assert!(tax >= previous, "tax decreased at base {}", base);
            previous = tax;
        }
    }

    #[test]
    fn test_tier_flat_boundary_semantics() {
        // Monthly 10_000 annualizes to 120_000, exactly the first tier's
        // upper bound: the first tier's rate applies.
        assert_eq!(tier_table().evaluate(dec!(10_000)), dec!(600.00));
        // One currency unit of annual revenue above moves to the next tier.
        let monthly = dec!(120_001) / dec!(12);
        assert_eq!(tier_table().evaluate(monthly), monthly * dec!(0.09));
    }

    #[test]
    fn test_tier_flat_saturates_above_ceiling() {
        // Annualized 360_000 exceeds the 240_000 ceiling: last rate holds.
        assert_eq!(tier_table().evaluate(dec!(30_000)), dec!(2700.00));
    }
}
