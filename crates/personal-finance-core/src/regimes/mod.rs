//! Employment-regime comparison: payroll (salaried) vs independent
//! contractor, with a risk-weighted recommendation.

pub mod comparison;
pub mod contractor;
pub mod payroll;
pub mod recommendation;

pub use comparison::{compare, compare_regimes, ComparisonOutput, Regime, RegimeDelta};
pub use contractor::{Activity, ContractorBreakdown, ContractorInput, TaxCategory};
pub use payroll::{PayrollBreakdown, PayrollInput};
pub use recommendation::{classify, DecisionStatus, Recommendation, RiskLevel};
