//! `memo new` command
//!
//! Allocates the next sequence number, writes the initial file and opens
//! the editor on it.
//!
//! # Usage
//! ```bash
//! memo new                   # Prompt for a title
//! memo new "Shopping list"   # Title given up front
//! memo new "Scratch" --no-edit
//! ```

use anyhow::Result;
use clap::Args;
use dialoguer::Input;

use crate::config::Config;
use crate::core::store::MemoStore;
use crate::core::{editor, git};

#[derive(Args, Debug)]
pub struct NewArgs {
    /// Title for the memo (prompted for when omitted)
    pub title: Option<String>,

    /// Create the file without opening the editor
    #[arg(long)]
    pub no_edit: bool,
}

pub fn run(args: NewArgs, config: &Config) -> Result<()> {
    let title = match args.title {
        Some(title) => title,
        None if console::user_attended() => Input::<String>::new()
            .with_prompt("Memo title")
            .allow_empty(true)
            .interact_text()?,
        None => String::new(),
    };

    let store = MemoStore::open(&config.memo_dir);
    let (number, path) = store.create(&title)?;
    println!("Created memo {}: {}", number, path.display());

    if !args.no_edit {
        editor::open(&config.editor, &path)?;
    }

    if config.git {
        git::commit_file(&config.memo_dir, &path, &format!("Add memo {}", number))?;
    }

    Ok(())
}
