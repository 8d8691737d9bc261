#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use aiScheduler::clients::api_client::{ApiError, SchedulerApi};
use aiScheduler::models::persona::{Persona, PersonaDraft};
use aiScheduler::models::schedule::{
    BulkScheduleItem, RecommendationResponse, Schedule, ScheduleDraft,
};

pub fn timestamp(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

// Tiny in-memory stand-in for the scheduler backend. `fail_next_with`
// scripts a one-shot failure for whichever call comes next.
pub struct FakeApi {
    persona: Mutex<Option<Persona>>,
    schedules: Mutex<HashMap<i64, Schedule>>,
    next_id: AtomicI64,
    fail_next: Mutex<Option<ApiError>>,
    recommendation: Mutex<Option<RecommendationResponse>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            persona: Mutex::new(None),
            schedules: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            fail_next: Mutex::new(None),
            recommendation: Mutex::new(None),
        }
    }

    pub fn fail_next_with(&self, err: ApiError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    pub fn set_recommendation(&self, response: RecommendationResponse) {
        *self.recommendation.lock().unwrap() = Some(response);
    }

    // Seeds the backend directly, bypassing the client under test.
    pub fn seed_schedule(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        title: &str,
    ) -> Schedule {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let schedule = Schedule {
            id,
            title: title.to_string(),
            description: None,
            start_datetime: start,
            end_datetime: end,
            is_completed: false,
            is_ai_generated: false,
            ai_reason: None,
            created_at: Self::now(),
        };
        self.schedules.lock().unwrap().insert(id, schedule.clone());
        schedule
    }

    pub fn backend_len(&self) -> usize {
        self.schedules.lock().unwrap().len()
    }

    pub fn backend_schedule(&self, id: i64) -> Option<Schedule> {
        self.schedules.lock().unwrap().get(&id).cloned()
    }

    fn take_failure(&self) -> Option<ApiError> {
        self.fail_next.lock().unwrap().take()
    }

    fn now() -> NaiveDateTime {
        timestamp(2025, 11, 1, 12, 0)
    }

    fn parse_bulk_item(item: &BulkScheduleItem) -> Result<(NaiveDateTime, NaiveDateTime), ApiError> {
        let bad = |message: String| ApiError::Transport {
            status: Some(400),
            message,
        };
        let date = NaiveDate::parse_from_str(&item.date, "%Y-%m-%d")
            .map_err(|e| bad(e.to_string()))?;
        let start = NaiveTime::parse_from_str(&item.start_time, "%H:%M")
            .map_err(|e| bad(e.to_string()))?;
        let end = NaiveTime::parse_from_str(&item.end_time, "%H:%M")
            .map_err(|e| bad(e.to_string()))?;
        Ok((date.and_time(start), date.and_time(end)))
    }
}

#[async_trait]
impl SchedulerApi for FakeApi {
    async fn get_persona(&self) -> Result<Persona, ApiError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        self.persona.lock().unwrap().clone().ok_or(ApiError::NotFound)
    }

    async fn save_persona(&self, draft: &PersonaDraft) -> Result<Persona, ApiError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let mut slot = self.persona.lock().unwrap();
        let updated_at = slot.as_ref().map(|_| Self::now());
        let persona = Persona {
            id: 1,
            persona_text: draft.persona_text.clone(),
            preferred_times: draft.preferred_times.clone(),
            focus_duration: draft.focus_duration,
            location: draft.location.clone(),
            created_at: Self::now(),
            updated_at,
        };
        *slot = Some(persona.clone());
        Ok(persona)
    }

    async fn refresh_persona_from_history(&self) -> Result<Persona, ApiError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let mut slot = self.persona.lock().unwrap();
        let Some(persona) = slot.as_mut() else {
            return Err(ApiError::NotFound);
        };
        persona.persona_text = format!("{} (refreshed)", persona.persona_text);
        persona.updated_at = Some(Self::now());
        Ok(persona.clone())
    }

    async fn get_schedules(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Schedule>, ApiError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let mut in_range: Vec<Schedule> = self
            .schedules
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.start_datetime >= start && s.end_datetime <= end)
            .cloned()
            .collect();
        in_range.sort_by_key(|s| s.start_datetime);
        Ok(in_range)
    }

    async fn create_schedule(&self, draft: &ScheduleDraft) -> Result<Schedule, ApiError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let schedule = Schedule {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            start_datetime: draft.start_datetime,
            end_datetime: draft.end_datetime,
            is_completed: draft.is_completed,
            is_ai_generated: false,
            ai_reason: None,
            created_at: Self::now(),
        };
        self.schedules.lock().unwrap().insert(id, schedule.clone());
        Ok(schedule)
    }

    async fn bulk_create_schedules(
        &self,
        items: &[BulkScheduleItem],
    ) -> Result<Vec<Schedule>, ApiError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let (start_datetime, end_datetime) = Self::parse_bulk_item(item)?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let schedule = Schedule {
                id,
                title: item.title.clone(),
                description: None,
                start_datetime,
                end_datetime,
                is_completed: false,
                is_ai_generated: true,
                ai_reason: item.reason.clone(),
                created_at: Self::now(),
            };
            self.schedules.lock().unwrap().insert(id, schedule.clone());
            created.push(schedule);
        }
        Ok(created)
    }

    async fn update_schedule(
        &self,
        id: i64,
        draft: &ScheduleDraft,
    ) -> Result<Schedule, ApiError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let mut map = self.schedules.lock().unwrap();
        let Some(existing) = map.get_mut(&id) else {
            return Err(ApiError::NotFound);
        };
        existing.title = draft.title.clone();
        existing.description = draft.description.clone();
        existing.start_datetime = draft.start_datetime;
        existing.end_datetime = draft.end_datetime;
        existing.is_completed = draft.is_completed;
        Ok(existing.clone())
    }

    async fn update_schedule_status(
        &self,
        id: i64,
        is_completed: bool,
    ) -> Result<Schedule, ApiError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let mut map = self.schedules.lock().unwrap();
        let Some(existing) = map.get_mut(&id) else {
            return Err(ApiError::NotFound);
        };
        existing.is_completed = is_completed;
        Ok(existing.clone())
    }

    async fn delete_schedule(&self, id: i64) -> Result<(), ApiError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        if self.schedules.lock().unwrap().remove(&id).is_none() {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }

    async fn recommend_schedules(
        &self,
        _prompt: &str,
        _start_date: NaiveDate,
        _end_date: NaiveDate,
    ) -> Result<RecommendationResponse, ApiError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        self.recommendation
            .lock()
            .unwrap()
            .clone()
            .ok_or(ApiError::Transport {
                status: None,
                message: "no scripted recommendation".to_string(),
            })
    }
}
