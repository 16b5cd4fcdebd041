pub mod brackets;
pub mod error;
pub mod tables;
pub mod types;

#[cfg(feature = "regimes")]
pub mod regimes;

#[cfg(feature = "financing")]
pub mod financing;

#[cfg(feature = "emergency_fund")]
pub mod emergency_fund;

#[cfg(feature = "employer_cost")]
pub mod employer_cost;

pub use error::PersonalFinanceError;
pub use types::*;

/// Standard result type for all personal-finance operations
pub type PersonalFinanceResult<T> = Result<T, PersonalFinanceError>;
