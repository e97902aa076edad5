//! Domain types for benchbeat

pub mod period;
pub mod record;

pub use period::{Period, PeriodError, PeriodSet, Window};
pub use record::{FinancialRecord, Fundamentals, PeriodGrowth};
