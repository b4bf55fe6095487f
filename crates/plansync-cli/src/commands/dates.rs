use anyhow::Result;
use owo_colors::OwoColorize;
use plansync_core::repository::Repository;
use plansync_core::schedule::Schedule;
use plansync_core::sync::Synchronizer;

use crate::cli::DatesCommand;
use crate::commands::{finish, print_header, Completion};
use crate::views::console::ConsoleObserver;

pub async fn set_dates(repo: &impl Repository, schedule: &Schedule, command: DatesCommand) -> Result<Completion> {
    print_header("Set roadmap dates", schedule);
    println!(
        "  Base date:  {} (day 1)",
        schedule.base_date.format("%Y-%m-%d").to_string().cyan()
    );
    println!();

    let mut observer = ConsoleObserver::new(command.yes);
    let outcome = Synchronizer::new(repo, schedule)
        .sync_dates(&mut observer)
        .await?;

    Ok(finish(outcome, schedule))
}
