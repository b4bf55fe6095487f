//! # Plansync Core Library
//!
//! Synchronizes a roadmap schedule onto a GitHub Projects (v2) board through
//! the `gh` command-line client.
//!
//! ## Core Modules
//!
//! - [`schedule`]: The schedule document, its validation and date arithmetic
//! - [`gateway`]: The `gh api graphql` transport and response envelope
//! - [`queries`]: GraphQL documents with bound variables
//! - [`repository`]: Project, issue and item lookups and mutations
//! - [`fields`]: Choosing the start/end date fields of a project
//! - [`sync`]: Batch orchestration producing a [`models::RunReport`]
//! - [`models`]: Handles and report types
//! - [`error`]: The error taxonomy
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use plansync_core::{
//!     gateway::GhCliGateway, models::RunOutcome, repository::GraphQlRepository,
//!     schedule::Schedule, sync::{Synchronizer, SyncObserver},
//! };
//!
//! struct AlwaysYes;
//!
//! impl SyncObserver for AlwaysYes {
//!     fn confirm(&mut self, _prompt: &str) -> bool {
//!         true
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let schedule = Schedule::load("roadmap.toml".as_ref())?;
//!     let repo = GraphQlRepository::new(GhCliGateway::default());
//!
//!     let outcome = Synchronizer::new(&repo, &schedule)
//!         .sync_dates(&mut AlwaysYes)
//!         .await?;
//!     if let RunOutcome::Completed(report) = outcome {
//!         println!("{} applied, {} failed", report.success, report.failed);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod fields;
pub mod gateway;
pub mod models;
pub mod queries;
pub mod repository;
pub mod schedule;
pub mod sync;
