use serde::{Deserialize, Serialize};

use super::period::Window;
use crate::format::{format_currency, format_percentage};

/// Latest reported fundamentals for a ticker. `None` means "could not be retrieved".
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Fundamentals {
    pub total_revenue: Option<f64>,
    pub net_income: Option<f64>,
    pub market_cap: Option<f64>,
}

impl Fundamentals {
    /// All three fields absent; used when the fundamentals fetch fails.
    pub fn missing() -> Self {
        Self::default()
    }
}

/// Growth over one configured period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodGrowth {
    pub label: String,
    pub window: Window,
    /// Percentage change, present only when both endpoint prices were retrieved.
    pub growth_pct: Option<f64>,
}

/// Per-ticker result of a screen run. Built once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialRecord {
    pub ticker: String,
    pub fundamentals: Fundamentals,
    /// One entry per configured period, five-year first.
    pub growth: Vec<PeriodGrowth>,
}

impl FinancialRecord {
    /// Growth for a period label; `None` if unknown or missing.
    pub fn growth_for(&self, label: &str) -> Option<f64> {
        self.growth
            .iter()
            .find(|g| g.label == label)
            .and_then(|g| g.growth_pct)
    }

    pub fn formatted_revenue(&self) -> String {
        format_currency(self.fundamentals.total_revenue)
    }

    pub fn formatted_earnings(&self) -> String {
        format_currency(self.fundamentals.net_income)
    }

    pub fn formatted_market_cap(&self) -> String {
        format_currency(self.fundamentals.market_cap)
    }

    pub fn formatted_growth(&self, label: &str) -> String {
        format_percentage(self.growth_for(label))
    }

    /// Number of periods whose growth could not be computed.
    pub fn missing_periods(&self) -> usize {
        self.growth.iter().filter(|g| g.growth_pct.is_none()).count()
    }
}
