//! # Constraint Evaluator
//!
//! Decides whether a candidate date is selectable. Range validity and the
//! disabled set are orthogonal checks; [`Constraints::allows`] runs both, plus
//! the optional weekend rule.

use crate::dates::is_weekend;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Inclusive range check. Missing bounds never reject.
pub fn is_within_range(date: NaiveDate, min: Option<NaiveDate>, max: Option<NaiveDate>) -> bool {
    min.map_or(true, |min| date >= min) && max.map_or(true, |max| date <= max)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub disabled_dates: BTreeSet<NaiveDate>,
    pub no_weekends: bool,
}

impl Constraints {
    pub fn is_within_range(&self, date: NaiveDate) -> bool {
        is_within_range(date, self.min_date, self.max_date)
    }

    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        self.disabled_dates.contains(&date) || (self.no_weekends && is_weekend(date))
    }

    pub fn allows(&self, date: NaiveDate) -> bool {
        self.is_within_range(date) && !self.is_disabled(date)
    }
}
