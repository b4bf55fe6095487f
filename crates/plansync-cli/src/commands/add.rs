use anyhow::Result;
use plansync_core::repository::Repository;
use plansync_core::schedule::Schedule;
use plansync_core::sync::Synchronizer;

use crate::cli::AddCommand;
use crate::commands::{finish, print_header, Completion};
use crate::views::console::ConsoleObserver;

pub async fn add_items(repo: &impl Repository, schedule: &Schedule, command: AddCommand) -> Result<Completion> {
    print_header("Add issues to project", schedule);
    println!();

    let mut observer = ConsoleObserver::new(command.yes);
    let outcome = Synchronizer::new(repo, schedule)
        .add_items(&mut observer)
        .await?;

    Ok(finish(outcome, schedule))
}
