//! Data Processor Module
//! Derives the age and age-category columns from the birth-date column.

use chrono::{Datelike, Local, NaiveDate};
use polars::prelude::*;
use thiserror::Error;

/// Name of the derived age column.
pub const AGE_COLUMN: &str = "age";
/// Name of the derived age-category column.
pub const AGE_CATEGORY_COLUMN: &str = "age_category";

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column not found: {0}")]
    MissingColumn(String),
    #[error("Invalid birth date {value:?} (expected format {format})")]
    InvalidDate { value: String, format: String },
}

/// Fixed age bands: [0,18], (18,45], (45,70], (70,80].
/// Ages outside [0,80] fall in no band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBand {
    Under18,
    From18To45,
    From45To70,
    Over70,
}

impl AgeBand {
    pub const ALL: [AgeBand; 4] = [
        AgeBand::Under18,
        AgeBand::From18To45,
        AgeBand::From45To70,
        AgeBand::Over70,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AgeBand::Under18 => "under 18",
            AgeBand::From18To45 => "18-45",
            AgeBand::From45To70 => "45-70",
            AgeBand::Over70 => "over 70",
        }
    }

    pub fn from_age(age: i32) -> Option<AgeBand> {
        match age {
            0..=18 => Some(AgeBand::Under18),
            19..=45 => Some(AgeBand::From18To45),
            46..=70 => Some(AgeBand::From45To70),
            71..=80 => Some(AgeBand::Over70),
            _ => None,
        }
    }
}

/// Handles the derived-column computation.
pub struct DataProcessor;

impl DataProcessor {
    /// Full years between `birth` and `today`, counting the birthday itself
    /// as already passed.
    pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
        let mut age = today.year() - birth.year();
        if (today.month(), today.day()) < (birth.month(), birth.day()) {
            age -= 1;
        }
        age
    }

    /// Append `age` and `age_category` columns derived from `birth_col`.
    pub fn add_age_columns(
        df: &DataFrame,
        birth_col: &str,
        date_format: &str,
    ) -> Result<DataFrame, ProcessorError> {
        Self::add_age_columns_as_of(df, birth_col, date_format, Local::now().date_naive())
    }

    /// Same as [`add_age_columns`], with an explicit reference date.
    pub fn add_age_columns_as_of(
        df: &DataFrame,
        birth_col: &str,
        date_format: &str,
        today: NaiveDate,
    ) -> Result<DataFrame, ProcessorError> {
        let birth_series = df
            .column(birth_col)
            .map_err(|_| ProcessorError::MissingColumn(birth_col.to_string()))?;

        let mut ages: Vec<Option<i32>> = Vec::with_capacity(df.height());
        let mut bands: Vec<Option<&'static str>> = Vec::with_capacity(df.height());

        for i in 0..df.height() {
            let val = birth_series.get(i)?;
            if val.is_null() {
                ages.push(None);
                bands.push(None);
                continue;
            }

            let raw = val.to_string().trim_matches('"').to_string();
            let birth = NaiveDate::parse_from_str(&raw, date_format).map_err(|_| {
                ProcessorError::InvalidDate {
                    value: raw.clone(),
                    format: date_format.to_string(),
                }
            })?;

            let age = Self::age_on(birth, today);
            ages.push(Some(age));
            bands.push(AgeBand::from_age(age).map(|b| b.label()));
        }

        let mut out = df.clone();
        out.with_column(Column::new(AGE_COLUMN.into(), ages))?;
        out.with_column(Column::new(AGE_CATEGORY_COLUMN.into(), bands))?;
        Ok(out)
    }
}
