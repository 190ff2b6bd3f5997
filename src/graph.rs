//! Contribution graph data model
//!
//! These types are the entire contract with the downstream skyline
//! renderer: it indexes `weeks` and `days` positionally to place
//! geometry and normalizes `count` against `lowest`/`highest`, and it
//! uses `level` as an index into a fixed color palette. Field names and
//! nesting are therefore load-bearing; renaming any of them is a
//! breaking change.

use serde::{Deserialize, Serialize};

/// One day cell of the contribution calendar.
///
/// `level` is the site's own discretized bucket (0-4) for display
/// purposes; `count` is the raw activity intensity. The two are parsed
/// independently from different markup attributes and are only related
/// by monotonicity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// ISO calendar date of the cell
    pub date: String,
    /// Discretized display bucket assigned by the site (small range, 0-4)
    pub level: u32,
    /// Activity count for the day
    pub count: u32,
}

/// One column of the calendar: seven days, chronological, Sunday-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRecord {
    /// Day cells in document order (top-to-bottom in the source markup)
    pub days: Vec<DayRecord>,
}

/// The full scraped calendar plus summary statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphResponse {
    /// Weeks in document order (left-to-right in the source markup)
    pub weeks: Vec<WeekRecord>,
    /// Running minimum of all `count` values, starting from 0
    pub lowest: u32,
    /// Running maximum of all `count` values
    pub highest: u32,
}
