pub mod error;
pub mod lending;
pub mod time_value;
pub mod types;

pub use error::LendingError;
pub use lending::amortization::{compute_amortization, AmortizationResult, LoanTerms};
pub use types::*;

/// Standard result type for all lending operations
pub type LendingResult<T> = Result<T, LendingError>;
