//! Shared data models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use crate::dispatch::Operation;

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A degenerate range covering a single day.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Whether `date` falls inside the range, inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// One row of a Day/Week/Month/Year collection, as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodRow {
    /// Row id in the external store
    pub id: String,
    pub title: String,
    /// The row's date property; a single date is a degenerate range
    pub date_range: Option<DateRange>,
    /// Created-time property used by Day rows populated on a schedule
    pub automatic_date: Option<NaiveDate>,
}

/// Handle to a freshly created row.
///
/// All follow-up writes (date range, relations, arbitrary properties) address
/// this id. There is no atomicity between creation and later writes; a
/// partial failure leaves the row created but unlinked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowHandle {
    pub id: String,
}

/// JSON body of the API-gateway create endpoints. Transient, never persisted.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRequest {
    pub secret: String,
    pub page_id: String,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    /// Operation selector; absent or null means `add_row`
    #[serde(rename = "type", default)]
    pub operation: Option<Operation>,
    #[serde(default)]
    pub props: Option<HashMap<String, serde_json::Value>>,
}
