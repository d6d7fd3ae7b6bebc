//! Stats module - categorical counts and the crosstab

mod calculator;

pub use calculator::{BandSlice, CategoryCount, GenderBreakdown, StatsCalculator};
