use chrono::{Datelike, Months, NaiveDate};

/// Inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The window used when a caller does not narrow the range: 2000-01-01 to 2099-12-31
    pub fn all_time() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid constant date"),
            end: NaiveDate::from_ymd_opt(2099, 12, 31).expect("valid constant date"),
        }
    }

    /// First to last day of the given calendar month
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = start.checked_add_months(Months::new(1))?.pred_opt()?;
        Some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// A range whose start is after its end matches nothing
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// `YYYY-MM` of the range start
    pub fn month_label(&self) -> String {
        format!("{:04}-{:02}", self.start.year(), self.start.month())
    }
}
