//! CLI module - Command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

pub mod config;
pub mod delete;
pub mod edit;
pub mod list;
pub mod new;
pub mod serve;
pub mod view;

/// memo - personal markdown memo manager
///
/// Numbered markdown notes in one directory, with optional git history
/// and a local web viewer.
#[derive(Parser, Debug)]
#[command(name = "memo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, env = "MEMO_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new memo
    New(new::NewArgs),

    /// Edit a memo by number
    Edit(edit::EditArgs),

    /// Delete a memo by number
    Delete(delete::DeleteArgs),

    /// List the memos already created
    List(list::ListArgs),

    /// View a memo in the terminal
    View(view::ViewArgs),

    /// View the memos in the browser
    Serve(serve::ServeArgs),

    /// Get, set or edit configuration
    Config(config::ConfigArgs),
}

/// Output width: the configured width when set, otherwise the terminal's,
/// otherwise 80.
pub(crate) fn display_width(config: &Config) -> usize {
    if config.display_width > 0 {
        return config.display_width;
    }
    console::Term::stdout()
        .size_checked()
        .map(|(_, cols)| cols as usize)
        .unwrap_or(80)
}
