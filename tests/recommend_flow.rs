mod common;

use aiScheduler::clients::api_client::ApiError;
use aiScheduler::models::schedule::{AIRecommendation, RecommendationResponse};
use aiScheduler::service::recommend_flow::{GENERIC_FAILURE, RecommendFlow, RecommendState};
use aiScheduler::service::schedule_store::ScheduleStore;
use chrono::NaiveDate;
use common::{FakeApi, timestamp};

fn jogging_plan() -> RecommendationResponse {
    RecommendationResponse {
        summary: "Three morning jogs spread across the week.".to_string(),
        schedules: vec![
            AIRecommendation {
                title: "Morning jog".to_string(),
                date: "2025-12-01".to_string(),
                start_time: "07:00".to_string(),
                end_time: "07:30".to_string(),
                reason: "Morning is a preferred time.".to_string(),
            },
            AIRecommendation {
                title: "Morning jog".to_string(),
                date: "2025-12-03".to_string(),
                start_time: "07:00".to_string(),
                end_time: "07:30".to_string(),
                reason: "Keeps a one-day recovery gap.".to_string(),
            },
            AIRecommendation {
                title: "Park run".to_string(),
                date: "2025-12-06".to_string(),
                start_time: "08:00".to_string(),
                end_time: "08:30".to_string(),
                reason: "Weekend slot with good weather.".to_string(),
            },
        ],
    }
}

fn week() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 12, 7).unwrap(),
    )
}

#[tokio::test]
async fn submit_success_lands_in_ready() {
    let api = FakeApi::new();
    api.set_recommendation(jogging_plan());
    let mut flow = RecommendFlow::new();

    let (start, end) = week();
    flow.submit(&api, "I want to jog three times a week", start, end)
        .await;

    match flow.state() {
        RecommendState::Ready { summary, schedules } => {
            assert_eq!(summary, "Three morning jogs spread across the week.");
            assert_eq!(schedules.len(), 3);
        }
        other => panic!("expected Ready, got {:?}", other),
    }
}

#[tokio::test]
async fn submit_failure_shows_one_generic_message() {
    let api = FakeApi::new();
    api.fail_next_with(ApiError::Transport {
        status: Some(502),
        message: "bad gateway".to_string(),
    });
    let mut flow = RecommendFlow::new();

    let (start, end) = week();
    flow.submit(&api, "plan something", start, end).await;

    assert_eq!(
        flow.state(),
        &RecommendState::Failed {
            message: GENERIC_FAILURE.to_string(),
        }
    );
}

#[tokio::test]
async fn accept_all_creates_every_suggestion() {
    let api = FakeApi::new();
    let plan = jogging_plan();
    api.set_recommendation(plan.clone());
    let mut flow = RecommendFlow::new();
    let mut store = ScheduleStore::with_selected_date(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());

    let (start, end) = week();
    flow.submit(&api, "I want to jog three times a week", start, end)
        .await;
    assert!(flow.accept_all(&api, &mut store).await);

    assert_eq!(store.len(), 3);
    for rec in &plan.schedules {
        let (expected_start, expected_end) = rec.start_end().unwrap();
        let stored = store
            .iter()
            .find(|s| s.start_datetime == expected_start)
            .expect("accepted suggestion should be cached");
        assert_eq!(stored.title, rec.title);
        assert_eq!(stored.end_datetime, expected_end);
        assert!(stored.is_ai_generated);
        assert_eq!(stored.ai_reason.as_deref(), Some(rec.reason.as_str()));
    }
    // The dialog is done; the flow returns to Idle.
    assert_eq!(flow.state(), &RecommendState::Idle);
}

#[tokio::test]
async fn accept_one_creates_a_single_schedule_and_drops_the_suggestion() {
    let api = FakeApi::new();
    api.set_recommendation(jogging_plan());
    let mut flow = RecommendFlow::new();
    let mut store = ScheduleStore::with_selected_date(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());

    let (start, end) = week();
    flow.submit(&api, "I want to jog three times a week", start, end)
        .await;
    assert!(flow.accept_one(&api, &mut store, 2).await);

    assert_eq!(store.len(), 1);
    let added = store.iter().next().expect("one entry");
    assert_eq!(added.title, "Park run");
    assert_eq!(added.start_datetime, timestamp(2025, 12, 6, 8, 0));
    assert_eq!(added.end_datetime, timestamp(2025, 12, 6, 8, 30));

    match flow.state() {
        RecommendState::Ready { schedules, .. } => {
            assert_eq!(schedules.len(), 2);
            assert!(schedules.iter().all(|rec| rec.title != "Park run"));
        }
        other => panic!("expected Ready, got {:?}", other),
    }
}

#[tokio::test]
async fn accept_one_with_a_bad_index_changes_nothing() {
    let api = FakeApi::new();
    api.set_recommendation(jogging_plan());
    let mut flow = RecommendFlow::new();
    let mut store = ScheduleStore::with_selected_date(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());

    let (start, end) = week();
    flow.submit(&api, "plan", start, end).await;
    assert!(!flow.accept_one(&api, &mut store, 99).await);
    assert!(store.is_empty());
}

#[tokio::test]
async fn accept_all_failure_still_closes_the_dialog() {
    let api = FakeApi::new();
    api.set_recommendation(jogging_plan());
    let mut flow = RecommendFlow::new();
    let mut store = ScheduleStore::with_selected_date(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());

    let (start, end) = week();
    flow.submit(&api, "plan", start, end).await;

    api.fail_next_with(ApiError::Transport {
        status: Some(500),
        message: "boom".to_string(),
    });
    assert!(!flow.accept_all(&api, &mut store).await);
    assert!(store.is_empty());
    assert_eq!(flow.state(), &RecommendState::Idle);
}

#[tokio::test]
async fn closing_discards_the_results() {
    let api = FakeApi::new();
    api.set_recommendation(jogging_plan());
    let mut flow = RecommendFlow::new();

    let (start, end) = week();
    flow.submit(&api, "plan", start, end).await;
    flow.close();
    assert_eq!(flow.state(), &RecommendState::Idle);
}
