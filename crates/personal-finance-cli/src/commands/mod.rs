pub mod emergency_fund;
pub mod employer_cost;
pub mod financing;
pub mod regimes;
