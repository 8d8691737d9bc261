use std::fmt;

use chrono::Duration;
use inquire::{Confirm, InquireError, Select, Text};

use crate::clients::api_client::SchedulerApi;
use crate::service::persona_store::PersonaStore;
use crate::service::recommend_flow::{RecommendFlow, RecommendState};
use crate::service::schedule_store::ScheduleStore;
use crate::views::month_view::{self, MonthCursor};
use crate::views::schedule_form::parse_date;
use crate::views::{day_grid, persona_form, schedule_form};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    PrevMonth,
    NextMonth,
    PickDay,
    AddSchedule,
    EditSchedule,
    DeleteSchedule,
    ToggleDone,
    Recommend,
    EditPersona,
    RefreshPersona,
    Quit,
}

const MENU: [MenuAction; 11] = [
    MenuAction::PrevMonth,
    MenuAction::NextMonth,
    MenuAction::PickDay,
    MenuAction::AddSchedule,
    MenuAction::EditSchedule,
    MenuAction::DeleteSchedule,
    MenuAction::ToggleDone,
    MenuAction::Recommend,
    MenuAction::EditPersona,
    MenuAction::RefreshPersona,
    MenuAction::Quit,
];

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuAction::PrevMonth => "Previous month",
            MenuAction::NextMonth => "Next month",
            MenuAction::PickDay => "Pick a day",
            MenuAction::AddSchedule => "Add schedule",
            MenuAction::EditSchedule => "Edit schedule",
            MenuAction::DeleteSchedule => "Delete schedule",
            MenuAction::ToggleDone => "Toggle completion",
            MenuAction::Recommend => "AI suggestions",
            MenuAction::EditPersona => "Edit persona",
            MenuAction::RefreshPersona => "Refresh persona from history",
            MenuAction::Quit => "Quit",
        };
        write!(f, "{}", label)
    }
}

struct EventChoice {
    id: i64,
    label: String,
}

impl fmt::Display for EventChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

pub async fn run(api: &dyn SchedulerApi) {
    let mut persona_store = PersonaStore::new();
    persona_store.fetch(api).await;
    if let Some(err) = &persona_store.error {
        println!("Could not load persona: {}", err);
        return;
    }
    if persona_store.persona.is_none() {
        match persona_form::onboarding_form() {
            Ok(draft) => {
                if persona_store.save(api, &draft).await {
                    println!("Persona saved.");
                } else if let Some(err) = &persona_store.error {
                    println!("Failed to save persona: {}", err);
                }
            }
            Err(err) => println!("{}", err),
        }
    }

    let mut store = ScheduleStore::new();
    let mut cursor = MonthCursor::containing(store.selected_date());
    refresh_month(api, &mut store, cursor).await;

    loop {
        println!();
        println!(
            "{}",
            month_view::render_month(cursor, store.selected_date(), &store.scheduled_days())
        );
        {
            let day = store.schedules_on(store.selected_date());
            print!("{}", day_grid::render_day(store.selected_date(), &day));
        }

        let action = match Select::new("Action:", MENU.to_vec()).prompt() {
            Ok(action) => action,
            Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
                break;
            }
            Err(err) => {
                println!("{}", err);
                break;
            }
        };

        match action {
            MenuAction::PrevMonth => {
                cursor = cursor.prev();
                if !cursor.contains(store.selected_date()) {
                    store.set_selected_date(cursor.first_day());
                }
                refresh_month(api, &mut store, cursor).await;
            }
            MenuAction::NextMonth => {
                cursor = cursor.next();
                if !cursor.contains(store.selected_date()) {
                    store.set_selected_date(cursor.first_day());
                }
                refresh_month(api, &mut store, cursor).await;
            }
            MenuAction::PickDay => {
                let initial = store.selected_date().format("%Y-%m-%d").to_string();
                let input = match Text::new("Day (YYYY-MM-DD):")
                    .with_initial_value(&initial)
                    .prompt()
                {
                    Ok(input) => input,
                    Err(_) => continue,
                };
                match parse_date(&input) {
                    Ok(date) => {
                        store.set_selected_date(date);
                        // Jumping outside the visible month counts as
                        // month navigation and re-fetches.
                        if !cursor.contains(date) {
                            cursor = MonthCursor::containing(date);
                            refresh_month(api, &mut store, cursor).await;
                        }
                    }
                    Err(err) => println!("{}", err),
                }
            }
            MenuAction::AddSchedule => match schedule_form::create_form(store.selected_date()) {
                Ok(draft) => {
                    if store.add(api, &draft).await {
                        println!("Schedule created.");
                    } else {
                        println!("The schedule was not created.");
                    }
                }
                Err(err) => println!("{}", err),
            },
            MenuAction::EditSchedule => {
                if let Some(id) = pick_event(&store, "Edit which schedule?") {
                    let existing = match store.get(id) {
                        Some(schedule) => schedule.clone(),
                        None => continue,
                    };
                    match schedule_form::edit_form(&existing) {
                        Ok(draft) => {
                            if store.edit(api, id, &draft).await {
                                println!("Schedule updated.");
                            } else {
                                println!("The schedule was not updated.");
                            }
                        }
                        Err(err) => println!("{}", err),
                    }
                }
            }
            MenuAction::DeleteSchedule => {
                if let Some(id) = pick_event(&store, "Delete which schedule?") {
                    let confirmed = Confirm::new("Delete this schedule?")
                        .with_default(false)
                        .prompt()
                        .unwrap_or(false);
                    if confirmed && store.remove(api, id).await {
                        println!("Schedule deleted.");
                    }
                }
            }
            MenuAction::ToggleDone => {
                if let Some(id) = pick_event(&store, "Toggle which schedule?") {
                    let is_completed = store
                        .get(id)
                        .map(|schedule| schedule.is_completed)
                        .unwrap_or(false);
                    store.toggle_status(api, id, !is_completed).await;
                }
            }
            MenuAction::Recommend => recommend_dialog(api, &mut store).await,
            MenuAction::EditPersona => {
                let form = match &persona_store.persona {
                    Some(persona) => {
                        let current = persona.clone();
                        persona_form::edit_form(&current)
                    }
                    None => persona_form::onboarding_form(),
                };
                match form {
                    Ok(draft) => {
                        if persona_store.save(api, &draft).await {
                            println!("Persona saved.");
                        } else if let Some(err) = &persona_store.error {
                            println!("Failed to save persona: {}", err);
                        }
                    }
                    Err(err) => println!("{}", err),
                }
            }
            MenuAction::RefreshPersona => {
                println!("Asking the AI to rework your persona from recent history...");
                if persona_store.refresh_from_history(api).await {
                    if let Some(persona) = &persona_store.persona {
                        println!("Updated persona:\n{}", persona.persona_text);
                    }
                } else if let Some(err) = &persona_store.error {
                    println!("Failed to refresh persona: {}", err);
                }
            }
            MenuAction::Quit => break,
        }
    }
}

async fn refresh_month(api: &dyn SchedulerApi, store: &mut ScheduleStore, cursor: MonthCursor) {
    let (start, end) = cursor.range();
    store.fetch(api, start, end).await;
}

fn pick_event(store: &ScheduleStore, message: &str) -> Option<i64> {
    let day = store.schedules_on(store.selected_date());
    if day.is_empty() {
        println!("No schedules on the selected day.");
        return None;
    }
    let choices: Vec<EventChoice> = day
        .iter()
        .map(|schedule| EventChoice {
            id: schedule.id,
            label: format!(
                "#{} {}-{} {} {}",
                schedule.id,
                schedule.start_datetime.format("%H:%M"),
                schedule.end_datetime.format("%H:%M"),
                if schedule.is_completed { "[x]" } else { "[ ]" },
                schedule.title
            ),
        })
        .collect();
    match Select::new(message, choices).prompt() {
        Ok(choice) => Some(choice.id),
        Err(_) => None,
    }
}

async fn recommend_dialog(api: &dyn SchedulerApi, store: &mut ScheduleStore) {
    let goal = match Text::new("What do you want to plan?").prompt() {
        Ok(goal) => goal,
        Err(_) => return,
    };
    if goal.trim().is_empty() {
        println!("A goal is required.");
        return;
    }

    let start_initial = store.selected_date().format("%Y-%m-%d").to_string();
    let start_date = match Text::new("From (YYYY-MM-DD):")
        .with_initial_value(&start_initial)
        .prompt()
        .map_err(|_| ())
        .and_then(|input| parse_date(&input).map_err(|err| println!("{}", err)))
    {
        Ok(date) => date,
        Err(()) => return,
    };
    let end_initial = (start_date + Duration::days(6)).format("%Y-%m-%d").to_string();
    let end_date = match Text::new("To (YYYY-MM-DD):")
        .with_initial_value(&end_initial)
        .prompt()
        .map_err(|_| ())
        .and_then(|input| parse_date(&input).map_err(|err| println!("{}", err)))
    {
        Ok(date) => date,
        Err(()) => return,
    };
    if end_date < start_date {
        println!("The end date must not come before the start date.");
        return;
    }

    let mut flow = RecommendFlow::new();
    println!("Requesting AI suggestions...");
    flow.submit(api, goal.trim(), start_date, end_date).await;

    loop {
        let items: Vec<String> = match flow.state() {
            RecommendState::Failed { message } => {
                println!("{}", message);
                flow.close();
                return;
            }
            RecommendState::Ready { summary, schedules } => {
                if schedules.is_empty() {
                    println!("No suggestions left.");
                    flow.close();
                    return;
                }
                println!();
                println!("{}", summary);
                schedules
                    .iter()
                    .enumerate()
                    .map(|(index, rec)| {
                        format!(
                            "{}. {} {} {}-{} - {}",
                            index + 1,
                            rec.date,
                            rec.title,
                            rec.start_time,
                            rec.end_time,
                            rec.reason
                        )
                    })
                    .collect()
            }
            RecommendState::Idle | RecommendState::Loading => return,
        };
        for item in &items {
            println!("  {}", item);
        }

        let choice = match Select::new("Suggestions:", vec!["Accept all", "Accept one", "Close"])
            .prompt()
        {
            Ok(choice) => choice,
            Err(_) => {
                flow.close();
                return;
            }
        };
        match choice {
            "Accept all" => {
                let count = items.len();
                if flow.accept_all(api, store).await {
                    println!("Added {} schedules.", count);
                } else {
                    println!("The suggestions could not be added.");
                }
                return;
            }
            "Accept one" => {
                let picked = match Select::new("Accept which suggestion?", items.clone()).prompt() {
                    Ok(label) => items.iter().position(|item| *item == label),
                    Err(_) => None,
                };
                if let Some(index) = picked {
                    if flow.accept_one(api, store, index).await {
                        println!("Suggestion added.");
                    } else {
                        println!("That suggestion could not be added.");
                    }
                }
            }
            _ => {
                flow.close();
                return;
            }
        }
    }
}
