use chrono::{DateTime, Datelike, Local, Months, NaiveDate, NaiveTime, Utc, Weekday};

/// A single calendar month; fixes the set of day columns in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportMonth {
    year: i32,
    month: u32,
}

impl ReportMonth {
    /// Returns `None` when `month` is not in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The month containing today's local date, the same clock the log
    /// panel stamps lines with.
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Number of days in the month (28..=31).
    pub fn day_count(&self) -> u32 {
        let first = self.first_day();
        first
            .checked_add_months(Months::new(1))
            .map(|next| (next - first).num_days() as u32)
            .unwrap_or(31)
    }

    /// Day-of-month numbers, starting at 1.
    pub fn days(&self) -> Vec<u32> {
        (1..=self.day_count()).collect()
    }

    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn weekday(&self, day: u32) -> Option<Weekday> {
        self.date(day).map(|d| d.weekday())
    }

    pub fn is_weekend(&self, day: u32) -> bool {
        matches!(self.weekday(day), Some(Weekday::Sat | Weekday::Sun))
    }

    /// Long display name, e.g. "October 2026".
    pub fn title(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    /// First second through last second of the month, in UTC.
    pub fn range(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let first = self.first_day();
        let last = self.date(self.day_count()).unwrap_or(first);
        let from = first.and_time(NaiveTime::MIN).and_utc();
        let to = last
            .and_hms_opt(23, 59, 59)
            .map(|dt| dt.and_utc())
            .unwrap_or(from);
        (from, to)
    }

    /// The given day of this month at `time` (UTC).
    pub fn timestamp_for(&self, day: u32, time: NaiveTime) -> Option<DateTime<Utc>> {
        self.date(day).map(|d| d.and_time(time).and_utc())
    }
}
