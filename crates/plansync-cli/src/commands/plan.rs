use anyhow::Result;
use plansync_core::schedule::Schedule;

use crate::commands::{print_header, Completion};
use crate::views::table::{display_plan, ViewPlanRow};

pub fn show_plan(schedule: &Schedule) -> Result<Completion> {
    print_header("Roadmap plan", schedule);
    println!("  Base date:  {}", schedule.base_date.format("%Y-%m-%d"));
    println!();

    let rows: Vec<ViewPlanRow> = schedule
        .entries()
        .into_iter()
        .map(|entry| ViewPlanRow {
            dates: entry.dates(schedule.base_date),
            days: entry.days.map(Into::into),
            task_id: entry.task_id,
            issue_number: entry.issue_number,
        })
        .collect();

    display_plan(&rows);
    Ok(Completion::Clean)
}
