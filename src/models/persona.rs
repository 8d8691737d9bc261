use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PreferredTime {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl PreferredTime {
    pub const ALL: [PreferredTime; 4] = [
        PreferredTime::Morning,
        PreferredTime::Afternoon,
        PreferredTime::Evening,
        PreferredTime::Night,
    ];
}

impl fmt::Display for PreferredTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            PreferredTime::Morning => "morning",
            PreferredTime::Afternoon => "afternoon",
            PreferredTime::Evening => "evening",
            PreferredTime::Night => "night",
        };
        write!(f, "{}", tag)
    }
}

// Wire tags match the backend exactly, including the "+" suffix.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum FocusDuration {
    #[serde(rename = "30min")]
    HalfHour,
    #[serde(rename = "1hour")]
    OneHour,
    #[serde(rename = "1.5hour")]
    NinetyMinutes,
    #[serde(rename = "2hour+")]
    TwoHoursPlus,
}

impl FocusDuration {
    pub const ALL: [FocusDuration; 4] = [
        FocusDuration::HalfHour,
        FocusDuration::OneHour,
        FocusDuration::NinetyMinutes,
        FocusDuration::TwoHoursPlus,
    ];
}

impl fmt::Display for FocusDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            FocusDuration::HalfHour => "30min",
            FocusDuration::OneHour => "1hour",
            FocusDuration::NinetyMinutes => "1.5hour",
            FocusDuration::TwoHoursPlus => "2hour+",
        };
        write!(f, "{}", tag)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Persona {
    pub id: i64,
    pub persona_text: String,
    pub preferred_times: Option<Vec<PreferredTime>>,
    pub focus_duration: Option<FocusDuration>,
    pub location: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

// Upsert payload; the backend assigns id and timestamps.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct PersonaDraft {
    pub persona_text: String,
    pub preferred_times: Option<Vec<PreferredTime>>,
    pub focus_duration: Option<FocusDuration>,
    pub location: Option<String>,
}

impl PersonaDraft {
    pub fn from_persona(persona: &Persona) -> Self {
        Self {
            persona_text: persona.persona_text.clone(),
            preferred_times: persona.preferred_times.clone(),
            focus_duration: persona.focus_duration,
            location: persona.location.clone(),
        }
    }
}
