//! Calendar-year creation windows used to filter collection queries.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use super::error::WardenError;

/// Earliest year accepted by [`YearWindow::new`].
pub const MIN_YEAR: i32 = 1900;
/// Latest year accepted by [`YearWindow::new`].
pub const MAX_YEAR: i32 = 2100;

/// Half-open UTC interval `[year-01-01T00:00:00Z, (year+1)-01-01T00:00:00Z)`.
///
/// # Example
///
/// ```
/// use gitlab_warden::gitlab::YearWindow;
///
/// let window = YearWindow::new(2023).expect("2023 is in range");
/// assert_eq!(window.created_after(), "2023-01-01T00:00:00Z");
/// assert_eq!(window.created_before(), "2024-01-01T00:00:00Z");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl YearWindow {
    /// Builds the window for `year`.
    ///
    /// # Errors
    ///
    /// Returns [`WardenError::InvalidInput`] when `year` lies outside
    /// `MIN_YEAR..=MAX_YEAR`.
    pub fn new(year: i32) -> Result<Self, WardenError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(WardenError::InvalidInput {
                message: format!("year {year} must be between {MIN_YEAR} and {MAX_YEAR}"),
            });
        }

        let start = start_of_year(year)?;
        let end = start_of_year(year.saturating_add(1))?;
        Ok(Self { start, end })
    }

    /// Inclusive lower bound, ISO-8601 UTC.
    #[must_use]
    pub fn created_after(&self) -> String {
        self.start.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Exclusive upper bound, ISO-8601 UTC.
    #[must_use]
    pub fn created_before(&self) -> String {
        self.end.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

fn start_of_year(year: i32) -> Result<DateTime<Utc>, WardenError> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| WardenError::InvalidInput {
            message: format!("year {year} is not representable"),
        })
}
