use plansync_core::gateway::GhCliGateway;
use plansync_core::models::RunOutcome;
use plansync_core::repository::GraphQlRepository;
use plansync_core::schedule::Schedule;

use crate::config::Config;
use crate::views::console::print_summary;

pub mod add;
pub mod check;
pub mod dates;
pub mod fields;
pub mod plan;

/// How a command finished when it did not error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Clean,
    WithFailures,
}

pub fn repository(config: &Config) -> GraphQlRepository<GhCliGateway> {
    let gateway = GhCliGateway::new(&config.gh_path).with_timeout(config.timeout());
    GraphQlRepository::new(gateway)
}

pub fn print_header(title: &str, schedule: &Schedule) {
    use owo_colors::OwoColorize;

    println!("{}", title.bold());
    println!("  Project:    #{}", schedule.project.number);
    println!("  Repository: {}", schedule.repository);
}

/// Prints the end-of-run summary and maps the outcome to a completion.
pub fn finish(outcome: RunOutcome, schedule: &Schedule) -> Completion {
    match outcome {
        RunOutcome::Cancelled => {
            println!("Cancelled.");
            Completion::Clean
        }
        RunOutcome::Completed(report) => {
            print_summary(&report, &schedule.project_url());
            if report.has_failures() {
                Completion::WithFailures
            } else {
                Completion::Clean
            }
        }
    }
}
