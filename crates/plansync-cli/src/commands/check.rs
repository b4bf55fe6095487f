use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use plansync_core::schedule::Schedule;

use crate::commands::Completion;

/// Loading already validated the document; this only reports on it.
pub fn check_schedule(schedule: &Schedule) -> Result<Completion> {
    let success_style = Style::new().green().bold();
    let unscheduled = schedule.issues.len() - schedule.schedule.len();

    println!("{} Schedule document is valid", "✓".style(success_style));
    println!("  {} issue(s) mapped, {} scheduled", schedule.issues.len(), schedule.schedule.len());
    if unscheduled > 0 {
        println!(
            "  {} {} mapped issue(s) have no schedule and will be skipped",
            "→".blue(),
            unscheduled
        );
    }
    Ok(Completion::Clean)
}
