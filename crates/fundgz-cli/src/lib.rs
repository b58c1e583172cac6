//! fundgz: track a list of funds and print their estimated valuations.
//!
//! Orchestrates the workspace crates:
//! - Code store (tracked `label|code` records)
//! - Bounded concurrent valuation fetch
//! - Terminal table rendering
//! - Interactive add/delete prompts

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod prompt;
pub mod render;

pub use app::{Application, DeleteOutcome, RunOutcome};
pub use cli::{Cli, Command};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use prompt::{Answer, Prompter, ScriptedPrompter, TermPrompter};
pub use render::{trend_color, Styling, TableRenderer};
