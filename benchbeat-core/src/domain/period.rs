use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// A named date range over which growth is measured.
///
/// `start` is inclusive and `end` is exclusive, so back-to-back periods may
/// share a boundary date without overlapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Period {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(label: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            label: label.into(),
            start,
            end,
        }
    }

    fn overlaps(&self, other: &Period) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Which family of windows a period belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Window {
    /// Compared against the benchmarks.
    FiveYear,
    /// Computed and reported only.
    TenYear,
}

#[derive(Debug, Error, PartialEq)]
pub enum PeriodError {
    #[error("period '{label}' ends ({end}) on or before it starts ({start})")]
    EmptyRange {
        label: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("duplicate period label '{0}'")]
    DuplicateLabel(String),
    #[error("periods '{0}' and '{1}' overlap")]
    Overlap(String, String),
    #[error("at least one five-year period is required for the comparison")]
    NoComparisonPeriods,
}

/// The configured period windows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodSet {
    pub five_year: Vec<Period>,
    #[serde(default)]
    pub ten_year: Vec<Period>,
}

impl PeriodSet {
    /// Periods the outperformance filter compares.
    pub fn comparison(&self) -> &[Period] {
        &self.five_year
    }

    /// All periods tagged with their window, five-year first, in configured order.
    pub fn iter(&self) -> impl Iterator<Item = (Window, &Period)> {
        self.five_year
            .iter()
            .map(|p| (Window::FiveYear, p))
            .chain(self.ten_year.iter().map(|p| (Window::TenYear, p)))
    }

    /// Number of periods across both windows.
    pub fn period_count(&self) -> usize {
        self.five_year.len() + self.ten_year.len()
    }

    /// Check ranges are non-empty, labels unique, and windows of the same
    /// family non-overlapping.
    pub fn validate(&self) -> Result<(), PeriodError> {
        if self.five_year.is_empty() {
            return Err(PeriodError::NoComparisonPeriods);
        }

        let mut labels = HashSet::new();
        for (_, period) in self.iter() {
            if period.end <= period.start {
                return Err(PeriodError::EmptyRange {
                    label: period.label.clone(),
                    start: period.start,
                    end: period.end,
                });
            }
            if !labels.insert(period.label.as_str()) {
                return Err(PeriodError::DuplicateLabel(period.label.clone()));
            }
        }

        for family in [&self.five_year, &self.ten_year] {
            for (i, a) in family.iter().enumerate() {
                if let Some(b) = family[i + 1..].iter().find(|b| a.overlaps(b)) {
                    return Err(PeriodError::Overlap(a.label.clone(), b.label.clone()));
                }
            }
        }

        Ok(())
    }
}
