use anyhow::Result;
use owo_colors::OwoColorize;
use plansync_core::error::CoreError;
use plansync_core::fields::select_date_fields;
use plansync_core::repository::Repository;
use plansync_core::schedule::Schedule;
use plansync_core::sync::Synchronizer;

use crate::commands::Completion;
use crate::views::table::display_fields;

pub async fn list_fields(repo: &impl Repository, schedule: &Schedule) -> Result<Completion> {
    let (project, fields) = Synchronizer::new(repo, schedule).discover().await?;
    println!("Fields of {}:", project.title.bright_white().bold());

    match select_date_fields(&fields, &schedule.fields) {
        Ok(selected) => {
            display_fields(&fields, Some(&selected));
            Ok(Completion::Clean)
        }
        // Still show what exists; the missing date field is the actionable part.
        Err(CoreError::NoDateFields(_)) => {
            display_fields(&fields, None);
            println!(
                "{} No DATE field found. Create a 'Start date' and 'End date' field on the project.",
                "⚠".yellow()
            );
            Ok(Completion::WithFailures)
        }
        Err(e) => Err(e.into()),
    }
}
