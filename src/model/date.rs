//! Query date held in date-input form (`YYYY-MM-DD`)
//!
//! The portal wants `DD-MM-YYYY`; conversion happens only at the moment a
//! request or download URL is built.

use chrono::{Days, Local, NaiveDate};

/// Format used for the stored value and for export file names
pub const INPUT_FORMAT: &str = "%Y-%m-%d";

/// Format the portal expects
pub const API_FORMAT: &str = "%d-%m-%Y";

/// The date the cause list is requested for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDate {
    value: String,
}

impl Default for QueryDate {
    fn default() -> Self {
        Self::today()
    }
}

impl QueryDate {
    /// Today's local date
    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            value: date.format(INPUT_FORMAT).to_string(),
        }
    }

    /// Raw `YYYY-MM-DD` value
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Store a value from the date editor verbatim
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn set_today(&mut self) {
        *self = Self::today();
    }

    pub fn set_tomorrow(&mut self) {
        self.set_tomorrow_from(Local::now().date_naive());
    }

    /// Set to the day after `today`, rolling over month and year ends
    pub fn set_tomorrow_from(&mut self, today: NaiveDate) {
        let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
        *self = Self::from_date(tomorrow);
    }

    /// The value in `DD-MM-YYYY` form
    pub fn api_format(&self) -> String {
        to_api_format(&self.value)
    }

    /// File name used for the JSON export of this date's list
    pub fn export_file_name(&self) -> String {
        format!("cause_list_{}.json", self.value)
    }
}

/// Reorder `YYYY-MM-DD` into `DD-MM-YYYY`
///
/// Pure field reordering with no numeric parsing. Anything without three
/// dash-separated fields is passed through unchanged.
pub fn to_api_format(date: &str) -> String {
    let mut parts = date.splitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day)) => format!("{}-{}-{}", day, month, year),
        _ => date.to_string(),
    }
}
