//! Statistics Calculator Module
//! Categorical counts and the gender-by-age-band crosstab.

use crate::data::{AgeBand, AGE_CATEGORY_COLUMN};
use polars::prelude::*;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column not found: {0}")]
    MissingColumn(String),
}

/// One bar of a categorical count chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub label: String,
    pub count: u32,
}

/// Gender counts for one age band. `counts` is parallel to
/// [`GenderBreakdown::genders`].
#[derive(Debug, Clone)]
pub struct BandSlice {
    pub band: &'static str,
    pub counts: Vec<u32>,
}

impl BandSlice {
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }
}

/// Gender split per age band, bands in fixed band order, absent
/// combinations counted as 0.
#[derive(Debug, Clone)]
pub struct GenderBreakdown {
    pub genders: Vec<String>,
    pub bands: Vec<BandSlice>,
}

/// Handles the counting behind the three charts.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Count occurrences of each non-null value in a column, ordered by
    /// count descending with ties broken alphabetically.
    pub fn value_counts(df: &DataFrame, column: &str) -> Result<Vec<CategoryCount>, StatsError> {
        let series = df
            .column(column)
            .map_err(|_| StatsError::MissingColumn(column.to_string()))?;

        let mut counts: HashMap<String, u32> = HashMap::new();
        for i in 0..df.height() {
            let val = series.get(i)?;
            if val.is_null() {
                continue;
            }
            let label = val.to_string().trim_matches('"').to_string();
            *counts.entry(label).or_insert(0) += 1;
        }

        let mut out: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(label, count)| CategoryCount { label, count })
            .collect();
        out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
        Ok(out)
    }

    /// Build the gender-by-age-band crosstab. Rows with a null gender or a
    /// null band are skipped.
    pub fn gender_by_band(df: &DataFrame, gender_col: &str) -> Result<GenderBreakdown, StatsError> {
        let gender_series = df
            .column(gender_col)
            .map_err(|_| StatsError::MissingColumn(gender_col.to_string()))?;
        let band_series = df
            .column(AGE_CATEGORY_COLUMN)
            .map_err(|_| StatsError::MissingColumn(AGE_CATEGORY_COLUMN.to_string()))?;

        let mut genders: BTreeSet<String> = BTreeSet::new();
        let mut pair_counts: HashMap<(String, String), u32> = HashMap::new();

        for i in 0..df.height() {
            let g = gender_series.get(i)?;
            let b = band_series.get(i)?;
            if g.is_null() || b.is_null() {
                continue;
            }
            let gender = g.to_string().trim_matches('"').to_string();
            let band = b.to_string().trim_matches('"').to_string();
            genders.insert(gender.clone());
            *pair_counts.entry((band, gender)).or_insert(0) += 1;
        }

        let genders: Vec<String> = genders.into_iter().collect();
        let bands = AgeBand::ALL
            .iter()
            .map(|band| {
                let label = band.label();
                let counts = genders
                    .iter()
                    .map(|g| {
                        pair_counts
                            .get(&(label.to_string(), g.clone()))
                            .copied()
                            .unwrap_or(0)
                    })
                    .collect();
                BandSlice {
                    band: label,
                    counts,
                }
            })
            .collect();

        Ok(GenderBreakdown { genders, bands })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> DataFrame {
        DataFrame::new(vec![
            Column::new(
                "gender".into(),
                vec!["female", "male", "female", "female", "male"],
            ),
            Column::new(
                AGE_CATEGORY_COLUMN.into(),
                vec![
                    Some("18-45"),
                    Some("18-45"),
                    Some("45-70"),
                    Some("under 18"),
                    None,
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn value_counts_orders_by_count_then_label() {
        let counts = StatsCalculator::value_counts(&roster(), "gender").unwrap();
        assert_eq!(
            counts,
            vec![
                CategoryCount {
                    label: "female".into(),
                    count: 3
                },
                CategoryCount {
                    label: "male".into(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn value_counts_skips_nulls() {
        let counts = StatsCalculator::value_counts(&roster(), AGE_CATEGORY_COLUMN).unwrap();
        let total: u32 = counts.iter().map(|c| c.count).sum();
        assert_eq!(total, 4);
        assert_eq!(counts[0].label, "18-45");
        assert_eq!(counts[0].count, 2);
    }

    #[test]
    fn crosstab_fills_absent_combinations_with_zero() {
        let breakdown = StatsCalculator::gender_by_band(&roster(), "gender").unwrap();
        assert_eq!(breakdown.genders, vec!["female", "male"]);
        assert_eq!(breakdown.bands.len(), 4);

        let by_band: Vec<(&str, Vec<u32>)> = breakdown
            .bands
            .iter()
            .map(|b| (b.band, b.counts.clone()))
            .collect();
        assert_eq!(
            by_band,
            vec![
                ("under 18", vec![1, 0]),
                ("18-45", vec![1, 1]),
                ("45-70", vec![1, 0]),
                ("over 70", vec![0, 0]),
            ]
        );
        assert_eq!(breakdown.bands[3].total(), 0);
    }

    #[test]
    fn missing_column_is_an_error() {
        let err = StatsCalculator::value_counts(&roster(), "department").unwrap_err();
        assert!(matches!(err, StatsError::MissingColumn(_)));
    }
}
