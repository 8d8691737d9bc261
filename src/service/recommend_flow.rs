use chrono::NaiveDate;
use log::warn;

use crate::clients::api_client::SchedulerApi;
use crate::models::schedule::{AIRecommendation, BulkScheduleItem};
use crate::service::schedule_store::ScheduleStore;

pub const GENERIC_FAILURE: &str =
    "Could not fetch AI recommendations. Please try again in a moment.";

// One flow instance per dialog. The tagged states rule out impossible
// combinations like loading-and-failed at once.
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendState {
    Idle,
    Loading,
    Ready {
        summary: String,
        schedules: Vec<AIRecommendation>,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug)]
pub struct RecommendFlow {
    state: RecommendState,
}

impl RecommendFlow {
    pub fn new() -> Self {
        Self {
            state: RecommendState::Idle,
        }
    }

    pub fn state(&self) -> &RecommendState {
        &self.state
    }

    pub async fn submit(
        &mut self,
        api: &dyn SchedulerApi,
        prompt: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) {
        self.state = RecommendState::Loading;
        match api.recommend_schedules(prompt, start_date, end_date).await {
            Ok(response) => {
                self.state = RecommendState::Ready {
                    summary: response.summary,
                    schedules: response.schedules,
                };
            }
            Err(err) => {
                warn!("recommendation request failed: {}", err);
                self.state = RecommendState::Failed {
                    message: GENERIC_FAILURE.to_string(),
                };
            }
        }
    }

    // Accepts a single suggestion: date plus times collapse into one
    // create call. The suggestion leaves the list once it is stored.
    pub async fn accept_one(
        &mut self,
        api: &dyn SchedulerApi,
        store: &mut ScheduleStore,
        index: usize,
    ) -> bool {
        let RecommendState::Ready { schedules, .. } = &mut self.state else {
            return false;
        };
        let Some(recommendation) = schedules.get(index) else {
            return false;
        };
        let draft = match recommendation.to_draft() {
            Ok(draft) => draft,
            Err(err) => {
                warn!("unusable recommendation at index {}: {}", index, err);
                return false;
            }
        };
        let added = store.add(api, &draft).await;
        if added {
            if let RecommendState::Ready { schedules, .. } = &mut self.state {
                schedules.remove(index);
            }
        }
        added
    }

    // Accepts everything in one bulk-create call, then the dialog is
    // done either way and the flow returns to Idle.
    pub async fn accept_all(&mut self, api: &dyn SchedulerApi, store: &mut ScheduleStore) -> bool {
        let RecommendState::Ready { schedules, .. } = &self.state else {
            return false;
        };
        let items: Vec<BulkScheduleItem> = schedules
            .iter()
            .map(AIRecommendation::to_bulk_item)
            .collect();
        let added = store.bulk_add(api, &items).await;
        self.state = RecommendState::Idle;
        added
    }

    // Closing discards whatever the flow held.
    pub fn close(&mut self) {
        self.state = RecommendState::Idle;
    }
}

impl Default for RecommendFlow {
    fn default() -> Self {
        Self::new()
    }
}
