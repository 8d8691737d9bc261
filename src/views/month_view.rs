use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

// Year/month pair driving calendar navigation and range fetches.
// Constructed only through `containing`/`next`/`prev`, so the month is
// always in 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
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

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("cursor holds a valid month")
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn day_count(self) -> u32 {
        (self.next().first_day() - self.first_day()).num_days() as u32
    }

    // Fetch window for the visible month: first day 00:00:00 through
    // last day 23:59:59.
    pub fn range(self) -> (NaiveDateTime, NaiveDateTime) {
        let start = self.first_day().and_time(NaiveTime::MIN);
        let end = self.next().first_day().and_time(NaiveTime::MIN) - Duration::seconds(1);
        (start, end)
    }
}

// Plain-text month grid. Selected day is bracketed, days with at least
// one schedule carry a star.
pub fn render_month(
    cursor: MonthCursor,
    selected: NaiveDate,
    marked: &HashSet<NaiveDate>,
) -> String {
    let first = cursor.first_day();
    let mut out = String::new();
    out.push_str(&format!("      {}\n", first.format("%B %Y")));
    out.push_str("  Su  Mo  Tu  We  Th  Fr  Sa\n");

    let lead = first.weekday().num_days_from_sunday();
    let mut line = "    ".repeat(lead as usize);
    for day in 1..=cursor.day_count() {
        let date = first + Duration::days(i64::from(day) - 1);
        let cell = if date == selected {
            format!("[{:>2}]", day)
        } else if marked.contains(&date) {
            format!(" {:>2}*", day)
        } else {
            format!(" {:>2} ", day)
        };
        line.push_str(&cell);
        if (lead + day) % 7 == 0 {
            out.push_str(line.trim_end());
            out.push('\n');
            line.clear();
        }
    }
    if !line.trim().is_empty() {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
