use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};

use crate::app;
use crate::clients::api_client::{HttpSchedulerApi, SchedulerApi};
use crate::models::schedule::ScheduleDraft;

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive calendar (the default when no subcommand is given)
    Calendar {},
    /// Create a single schedule without entering the calendar
    Create {
        title: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
        #[arg(long)]
        description: Option<String>,
    },
    /// Print AI suggestions for a goal and date range
    Recommend {
        prompt: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
}

pub async fn cli(api: &HttpSchedulerApi) {
    // Fine to panic here
    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Calendar {}) {
        Commands::Calendar {} => app::run(api).await,
        Commands::Create {
            title,
            start,
            end,
            description,
        } => {
            let draft = ScheduleDraft {
                title,
                description,
                start_datetime: start,
                end_datetime: end,
                is_completed: false,
            };
            match api.create_schedule(&draft).await {
                Ok(created) => println!("Created schedule #{}: {}", created.id, created.title),
                Err(e) => println!("Failed to create schedule: {}", e),
            }
        }
        Commands::Recommend {
            prompt,
            start_date,
            end_date,
        } => match api.recommend_schedules(&prompt, start_date, end_date).await {
            Ok(response) => {
                println!("{}", response.summary);
                for rec in &response.schedules {
                    println!(
                        "- {} {} {}-{}: {}",
                        rec.date, rec.title, rec.start_time, rec.end_time, rec.reason
                    );
                }
            }
            Err(e) => println!("Failed to fetch recommendations: {}", e),
        },
    }
}
