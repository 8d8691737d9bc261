use std::collections::{HashMap, HashSet};

use chrono::{Local, NaiveDate, NaiveDateTime};
use log::warn;

use crate::clients::api_client::SchedulerApi;
use crate::models::schedule::{BulkScheduleItem, Schedule, ScheduleDraft};

// Cache of one contiguous fetched range, keyed by id. Switching ranges
// replaces the whole set; navigating back re-fetches.
pub struct ScheduleStore {
    schedules: HashMap<i64, Schedule>,
    selected_date: NaiveDate,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::with_selected_date(Local::now().date_naive())
    }

    pub fn with_selected_date(date: NaiveDate) -> Self {
        Self {
            schedules: HashMap::new(),
            selected_date: date,
        }
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    // Pure local state change; month navigation drives fetches
    // independently.
    pub fn set_selected_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Schedule> {
        self.schedules.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Schedule> {
        self.schedules.values()
    }

    // Schedules starting on `date`, ascending by start time. Feeds the
    // day timetable.
    pub fn schedules_on(&self, date: NaiveDate) -> Vec<&Schedule> {
        let mut day: Vec<&Schedule> = self
            .schedules
            .values()
            .filter(|schedule| schedule.start_datetime.date() == date)
            .collect();
        day.sort_by_key(|schedule| schedule.start_datetime);
        day
    }

    pub fn scheduled_days(&self) -> HashSet<NaiveDate> {
        self.schedules
            .values()
            .map(|schedule| schedule.start_datetime.date())
            .collect()
    }

    // Replaces the whole set with the server's range result. Failures
    // are logged and swallowed; local state stays as it was.
    pub async fn fetch(
        &mut self,
        api: &dyn SchedulerApi,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) {
        match api.get_schedules(start, end).await {
            Ok(list) => {
                self.schedules = list
                    .into_iter()
                    .map(|schedule| (schedule.id, schedule))
                    .collect();
            }
            Err(err) => warn!("failed to load schedules for {}..{}: {}", start, end, err),
        }
    }

    pub async fn add(&mut self, api: &dyn SchedulerApi, draft: &ScheduleDraft) -> bool {
        match api.create_schedule(draft).await {
            Ok(created) => {
                self.schedules.insert(created.id, created);
                true
            }
            Err(err) => {
                warn!("failed to create schedule: {}", err);
                false
            }
        }
    }

    pub async fn bulk_add(&mut self, api: &dyn SchedulerApi, items: &[BulkScheduleItem]) -> bool {
        match api.bulk_create_schedules(items).await {
            Ok(created) => {
                for schedule in created {
                    self.schedules.insert(schedule.id, schedule);
                }
                true
            }
            Err(err) => {
                warn!("failed to bulk-create {} schedules: {}", items.len(), err);
                false
            }
        }
    }

    // Full replace-on-update. The local entry is only swapped if the id
    // is still in the fetched range.
    pub async fn edit(&mut self, api: &dyn SchedulerApi, id: i64, draft: &ScheduleDraft) -> bool {
        match api.update_schedule(id, draft).await {
            Ok(updated) => {
                if self.schedules.contains_key(&id) {
                    self.schedules.insert(id, updated);
                }
                true
            }
            Err(err) => {
                warn!("failed to update schedule {}: {}", id, err);
                false
            }
        }
    }

    // Deletes remotely first; the local entry goes away only on
    // confirmed success.
    pub async fn remove(&mut self, api: &dyn SchedulerApi, id: i64) -> bool {
        match api.delete_schedule(id).await {
            Ok(()) => {
                self.schedules.remove(&id);
                true
            }
            Err(err) => {
                warn!("failed to delete schedule {}: {}", id, err);
                false
            }
        }
    }

    pub async fn toggle_status(
        &mut self,
        api: &dyn SchedulerApi,
        id: i64,
        is_completed: bool,
    ) -> bool {
        match api.update_schedule_status(id, is_completed).await {
            Ok(updated) => {
                if self.schedules.contains_key(&id) {
                    self.schedules.insert(id, updated);
                }
                true
            }
            Err(err) => {
                warn!("failed to update status of schedule {}: {}", id, err);
                false
            }
        }
    }
}

impl Default for ScheduleStore {
    fn default() -> Self {
        Self::new()
    }
}
