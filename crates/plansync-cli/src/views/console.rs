use chrono::NaiveDate;
use dialoguer::Confirm;
use owo_colors::{OwoColorize, Style};
use plansync_core::models::{DateFields, EntryOutcome, EntryRecord, ProjectHandle, RunReport};
use plansync_core::schedule::ScheduleEntry;
use plansync_core::sync::SyncObserver;
use std::io::Write;

/// Prints batch progress to stdout and asks for confirmation on the terminal.
pub struct ConsoleObserver {
    assume_yes: bool,
}

impl ConsoleObserver {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl SyncObserver for ConsoleObserver {
    fn confirm(&mut self, prompt: &str) -> bool {
        println!();
        if self.assume_yes {
            return true;
        }
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }

    fn project_resolved(&mut self, project: &ProjectHandle) {
        let success_style = Style::new().green().bold();
        println!(
            "{} Project found: {}",
            "✓".style(success_style),
            project.title.bright_white().bold()
        );
    }

    fn fields_selected(&mut self, fields: &DateFields) {
        let success_style = Style::new().green().bold();
        let (Some(start), Some(end)) = (&fields.start, &fields.end) else {
            return;
        };
        println!("{} Start date field: {}", "✓".style(success_style), start.name.cyan());
        if end.id != start.id {
            println!("{} End date field: {}", "✓".style(success_style), end.name.cyan());
        } else {
            println!(
                "{} No separate end date field; '{}' holds both dates",
                "⚠".yellow(),
                start.name
            );
        }
    }

    fn entry_started(&mut self, entry: &ScheduleEntry, dates: Option<(NaiveDate, NaiveDate)>) {
        let label = format!("[{}] Issue #{}", entry.task_id, entry.issue_number);
        match dates {
            Some((start, end)) => print!(
                "{} ({} ~ {})... ",
                label.bold(),
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ),
            None => print!("{}... ", label.bold()),
        }
        let _ = std::io::stdout().flush();
    }

    fn entry_finished(&mut self, record: &EntryRecord) {
        match &record.outcome {
            EntryOutcome::Success { warning: None } => println!("{}", "✓ done".green()),
            EntryOutcome::Success { warning: Some(w) } => {
                println!("{} {}", "✓ done".green(), format!("(warning: {})", w).yellow())
            }
            EntryOutcome::AlreadyApplied => println!("{}", "⏭ already applied".bright_black()),
            EntryOutcome::Unscheduled => println!("{}", "no schedule, skipped".bright_black()),
            EntryOutcome::Failed(reason) => println!("{} {}", "✗".red().bold(), reason.red()),
        }
    }
}

pub fn print_summary(report: &RunReport, project_url: &str) {
    let rule = "=".repeat(60);
    println!();
    println!("{}", rule.bright_black());
    println!("{}", "Summary".bold());
    println!("{}", rule.bright_black());
    println!("{} Succeeded: {}", "✓".green().bold(), report.success);
    if report.skipped > 0 {
        println!("{} Already applied: {}", "⏭".bright_black(), report.skipped);
    }
    if report.unscheduled > 0 {
        println!("{} No schedule: {}", "•".bright_black(), report.unscheduled);
    }
    if report.failed > 0 {
        println!("{} Failed: {}", "✗".red().bold(), report.failed);
    }
    let warnings = report.warnings().count();
    if warnings > 0 {
        println!("{} Warnings: {}", "⚠".yellow(), warnings);
    }
    println!("{}", rule.bright_black());

    if report.success > 0 || report.skipped > 0 {
        println!("\nView the project: {}", project_url.blue().underline());
    }
}
