use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::models::schedule::Schedule;

// 24-hour day as 48 half-hour rows, 1-based.
pub const SLOT_ROWS: u32 = 48;

pub fn time_row(time: NaiveTime) -> u32 {
    time.hour() * 2 + if time.minute() >= 30 { 1 } else { 0 } + 1
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridEntry {
    pub schedule_id: i64,
    pub start_row: u32,
    pub end_row: u32,
    pub span: u32,
}

// Single shared column; overlapping events stack rather than getting
// packed into lanes.
pub fn layout_entries(schedules: &[&Schedule]) -> Vec<GridEntry> {
    schedules
        .iter()
        .map(|schedule| {
            let start_row = time_row(schedule.start_datetime.time());
            let end_row = time_row(schedule.end_datetime.time());
            GridEntry {
                schedule_id: schedule.id,
                start_row,
                end_row,
                span: end_row.saturating_sub(start_row).max(1),
            }
        })
        .collect()
}

pub fn render_day(date: NaiveDate, schedules: &[&Schedule]) -> String {
    let entries = layout_entries(schedules);
    let mut out = String::new();
    out.push_str(&format!("{}\n", date.format("%A, %B %-d %Y")));
    for row in 1..=SLOT_ROWS {
        let hour = (row - 1) / 2;
        let minute = if (row - 1) % 2 == 0 { 0 } else { 30 };
        let mut line = format!("{:02}:{:02} |", hour, minute);
        for (entry, schedule) in entries.iter().zip(schedules.iter()) {
            if entry.start_row == row {
                let marker = if schedule.is_completed { "[x]" } else { "[ ]" };
                let provenance = if schedule.is_ai_generated { " (ai)" } else { "" };
                line.push_str(&format!(
                    " #{} {} {}{}",
                    schedule.id, marker, schedule.title, provenance
                ));
            } else if row > entry.start_row && row < entry.start_row + entry.span {
                line.push_str(" |");
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
