use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Schedule {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
    pub is_completed: bool,
    pub is_ai_generated: bool,
    pub ai_reason: Option<String>,
    pub created_at: NaiveDateTime,
}

// Create/full-update payload. The status endpoint takes its own body,
// see clients::api_client.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScheduleDraft {
    pub title: String,
    pub description: Option<String>,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
    pub is_completed: bool,
}

// Bulk-create input shape: date and times stay strings, the backend
// combines them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BulkScheduleItem {
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub reason: Option<String>,
}

// Ephemeral suggestion from the recommendation endpoint. Never persisted
// as-is; converted on acceptance.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AIRecommendation {
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecommendationResponse {
    pub schedules: Vec<AIRecommendation>,
    pub summary: String,
}

impl AIRecommendation {
    // The endpoint promises "YYYY-MM-DD" dates and "HH:MM" times.
    pub fn start_end(&self) -> Result<(NaiveDateTime, NaiveDateTime), String> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|err| format!("bad recommendation date {:?}: {}", self.date, err))?;
        let start = NaiveTime::parse_from_str(&self.start_time, "%H:%M")
            .map_err(|err| format!("bad recommendation start {:?}: {}", self.start_time, err))?;
        let end = NaiveTime::parse_from_str(&self.end_time, "%H:%M")
            .map_err(|err| format!("bad recommendation end {:?}: {}", self.end_time, err))?;
        Ok((date.and_time(start), date.and_time(end)))
    }

    pub fn to_draft(&self) -> Result<ScheduleDraft, String> {
        let (start_datetime, end_datetime) = self.start_end()?;
        Ok(ScheduleDraft {
            title: self.title.clone(),
            description: None,
            start_datetime,
            end_datetime,
            is_completed: false,
        })
    }

    pub fn to_bulk_item(&self) -> BulkScheduleItem {
        BulkScheduleItem {
            title: self.title.clone(),
            date: self.date.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            reason: Some(self.reason.clone()),
        }
    }
}
