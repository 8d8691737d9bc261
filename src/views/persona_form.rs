use inquire::{InquireError, MultiSelect, Select, Text};

use crate::clients::api_client::ApiError;
use crate::models::persona::{FocusDuration, Persona, PersonaDraft, PreferredTime};

// Full-page onboarding variant, shown when no persona exists yet.
pub fn onboarding_form() -> Result<PersonaDraft, ApiError> {
    println!("No persona found. Your persona gives the AI context for recommendations.");
    prompt_draft(None)
}

// Lightweight edit variant, pre-filled from the current persona.
pub fn edit_form(current: &Persona) -> Result<PersonaDraft, ApiError> {
    prompt_draft(Some(current))
}

fn prompt_draft(current: Option<&Persona>) -> Result<PersonaDraft, ApiError> {
    let mut text_prompt = Text::new("Describe yourself and your goals:");
    if let Some(persona) = current {
        text_prompt = text_prompt.with_initial_value(&persona.persona_text);
    }
    let persona_text = text_prompt.prompt().map_err(prompt_error)?;
    // Required-field check happens before any network call.
    if persona_text.trim().is_empty() {
        return Err(ApiError::Validation(
            "persona description is required".to_string(),
        ));
    }

    let preselected: Vec<usize> = current
        .and_then(|persona| persona.preferred_times.as_ref())
        .map(|times| {
            PreferredTime::ALL
                .iter()
                .enumerate()
                .filter(|(_, option)| times.contains(option))
                .map(|(index, _)| index)
                .collect()
        })
        .unwrap_or_default();
    let preferred = MultiSelect::new("Preferred times of day:", PreferredTime::ALL.to_vec())
        .with_default(&preselected)
        .prompt()
        .map_err(prompt_error)?;
    let preferred_times = if preferred.is_empty() {
        None
    } else {
        Some(preferred)
    };

    let focus_options = FocusDuration::ALL.to_vec();
    let cursor = current
        .and_then(|persona| persona.focus_duration)
        .and_then(|duration| focus_options.iter().position(|option| *option == duration))
        .unwrap_or(0);
    let focus_duration = Select::new("Typical focus block (esc to skip):", focus_options)
        .with_starting_cursor(cursor)
        .prompt_skippable()
        .map_err(prompt_error)?;

    let mut location_prompt = Text::new("Location (optional):");
    let current_location = current.and_then(|persona| persona.location.as_deref());
    if let Some(location) = current_location {
        location_prompt = location_prompt.with_initial_value(location);
    }
    let location = location_prompt
        .prompt_skippable()
        .map_err(prompt_error)?
        .filter(|value| !value.trim().is_empty())
        .map(|value| value.trim().to_string());

    Ok(PersonaDraft {
        persona_text: persona_text.trim().to_string(),
        preferred_times,
        focus_duration,
        location,
    })
}

pub(crate) fn prompt_error(err: InquireError) -> ApiError {
    ApiError::Validation(format!("input aborted: {}", err))
}
