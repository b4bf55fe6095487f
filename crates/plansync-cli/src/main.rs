use clap::Parser;
use owo_colors::{OwoColorize, Style};
use plansync_core::error::CoreError;
use plansync_core::schedule::Schedule;

use commands::Completion;

mod cli;
mod commands;
mod config;
mod views;

const EXIT_FAILURES: i32 = 1;
const EXIT_USAGE: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    let default_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match config::Config::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} Invalid configuration: {}", "Error:".red().bold(), e);
            std::process::exit(EXIT_USAGE);
        }
    };

    let schedule_path = cli.schedule.clone().unwrap_or_else(|| config.schedule.clone());
    let schedule = match Schedule::load(&schedule_path) {
        Ok(schedule) => schedule,
        Err(e) => {
            handle_error(e.into());
            std::process::exit(EXIT_USAGE);
        }
    };

    let repository = commands::repository(&config);

    let result = match cli.command {
        cli::Commands::Dates(command) => {
            commands::dates::set_dates(&repository, &schedule, command).await
        }
        cli::Commands::Add(command) => {
            commands::add::add_items(&repository, &schedule, command).await
        }
        cli::Commands::Fields => commands::fields::list_fields(&repository, &schedule).await,
        cli::Commands::Plan => commands::plan::show_plan(&schedule),
        cli::Commands::Check => commands::check::check_schedule(&schedule),
    };

    match result {
        Ok(Completion::Clean) => {}
        Ok(Completion::WithFailures) => std::process::exit(EXIT_FAILURES),
        Err(e) => {
            let code = exit_code_for(&e);
            handle_error(e);
            std::process::exit(code);
        }
    }
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<CoreError>() {
        Some(CoreError::InvalidInput(_)) => EXIT_USAGE,
        _ => EXIT_FAILURES,
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::AuthScope(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
                eprintln!("The GitHub CLI token lacks project scopes. Run:");
                eprintln!("  {}", "gh auth refresh -s read:project,project".yellow());
            }
            CoreError::NoDateFields(fields) => {
                eprintln!("{} No DATE field found on the project.", "Error:".style(error_style));
                eprintln!("Available fields:");
                for field in fields {
                    eprintln!("  - {}", field);
                }
                eprintln!(
                    "Create a DATE field named 'Start date' (and optionally 'End date'), or set [fields] in the schedule."
                );
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::Transport(s) => {
                eprintln!("{} gh failed: {}", "Error:".style(error_style), s.yellow());
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {:#}", "Error:".style(error_style), err);
    }
}
