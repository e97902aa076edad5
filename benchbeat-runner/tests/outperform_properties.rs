//! Property tests for the outperformance filter.

use benchbeat_core::domain::{FinancialRecord, Fundamentals, Period, PeriodGrowth, Window};
use benchbeat_runner::{beats_in_every_period, find_outperformers};
use chrono::NaiveDate;
use proptest::prelude::*;

fn periods(n: usize) -> Vec<Period> {
    (0..n)
        .map(|i| {
            let y = 1994 + 5 * i as i32;
            Period::new(
                format!("{y}-{}", y + 5),
                NaiveDate::from_ymd_opt(y, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(y + 5, 1, 1).unwrap(),
            )
        })
        .collect()
}

fn record(ticker: &str, periods: &[Period], values: &[Option<f64>]) -> FinancialRecord {
    FinancialRecord {
        ticker: ticker.into(),
        fundamentals: Fundamentals::missing(),
        growth: periods
            .iter()
            .zip(values)
            .map(|(p, v)| PeriodGrowth {
                label: p.label.clone(),
                window: Window::FiveYear,
                growth_pct: *v,
            })
            .collect(),
    }
}

fn arb_growth() -> impl Strategy<Value = f64> {
    -100.0..1_000.0_f64
}

proptest! {
    #[test]
    fn benchmark_never_beats_itself(values in prop::collection::vec(arb_growth(), 1..7)) {
        let ps = periods(values.len());
        let some: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
        let bench = record("SPY", &ps, &some);
        prop_assert!(find_outperformers(&[bench.clone()], &bench, &ps).is_empty());
    }

    #[test]
    fn uniformly_higher_growth_qualifies(
        values in prop::collection::vec(arb_growth(), 1..7),
        delta in 0.01..50.0_f64,
    ) {
        let ps = periods(values.len());
        let bench = record("SPY", &ps, &values.iter().copied().map(Some).collect::<Vec<_>>());
        let higher: Vec<Option<f64>> = values.iter().map(|v| Some(v + delta)).collect();
        prop_assert!(beats_in_every_period(&record("X", &ps, &higher), &bench, &ps));
    }

    #[test]
    fn any_missing_value_disqualifies(
        values in prop::collection::vec(arb_growth(), 1..7),
        hole in any::<prop::sample::Index>(),
    ) {
        let ps = periods(values.len());
        let bench = record("SPY", &ps, &values.iter().map(|v| Some(v - 1.0)).collect::<Vec<_>>());
        let mut with_hole: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
        with_hole[hole.index(values.len())] = None;
        prop_assert!(!beats_in_every_period(&record("X", &ps, &with_hole), &bench, &ps));
    }
}
