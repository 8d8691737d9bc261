use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use inquire::Text;

use crate::clients::api_client::ApiError;
use crate::models::schedule::{Schedule, ScheduleDraft};
use crate::views::persona_form::prompt_error;

// Creation form for the currently selected day.
pub fn create_form(date: NaiveDate) -> Result<ScheduleDraft, ApiError> {
    prompt_draft(date, None)
}

// Edit form, pre-filled with the existing record. Completion state is
// kept; the status toggle has its own call.
pub fn edit_form(schedule: &Schedule) -> Result<ScheduleDraft, ApiError> {
    prompt_draft(schedule.start_datetime.date(), Some(schedule))
}

fn prompt_draft(date: NaiveDate, current: Option<&Schedule>) -> Result<ScheduleDraft, ApiError> {
    let mut title_prompt = Text::new("Title:");
    if let Some(schedule) = current {
        title_prompt = title_prompt.with_initial_value(&schedule.title);
    }
    let title = title_prompt.prompt().map_err(prompt_error)?;
    if title.trim().is_empty() {
        return Err(ApiError::Validation("title is required".to_string()));
    }

    let mut description_prompt = Text::new("Description (optional):");
    let current_description = current.and_then(|schedule| schedule.description.as_deref());
    if let Some(description) = current_description {
        description_prompt = description_prompt.with_initial_value(description);
    }
    let description = description_prompt
        .prompt_skippable()
        .map_err(prompt_error)?
        .filter(|value| !value.trim().is_empty());

    let date_initial = date.format("%Y-%m-%d").to_string();
    let day = parse_date(
        &Text::new("Date (YYYY-MM-DD):")
            .with_initial_value(&date_initial)
            .prompt()
            .map_err(prompt_error)?,
    )?;

    let start_initial = current
        .map(|schedule| schedule.start_datetime.format("%H:%M").to_string())
        .unwrap_or_else(|| "09:00".to_string());
    let start = parse_time(
        &Text::new("Start time (HH:MM):")
            .with_initial_value(&start_initial)
            .prompt()
            .map_err(prompt_error)?,
    )?;

    let end_initial = current
        .map(|schedule| schedule.end_datetime.format("%H:%M").to_string())
        .unwrap_or_else(|| "10:00".to_string());
    let end = parse_time(
        &Text::new("End time (HH:MM):")
            .with_initial_value(&end_initial)
            .prompt()
            .map_err(prompt_error)?,
    )?;

    Ok(ScheduleDraft {
        title: title.trim().to_string(),
        description,
        start_datetime: combine(day, start),
        end_datetime: combine(day, end),
        is_completed: current.map(|schedule| schedule.is_completed).unwrap_or(false),
    })
}

fn combine(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

pub fn parse_date(input: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::Validation(format!("{:?} is not a YYYY-MM-DD date", input.trim())))
}

fn parse_time(input: &str) -> Result<NaiveTime, ApiError> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .map_err(|_| ApiError::Validation(format!("{:?} is not a HH:MM time", input.trim())))
}
